//! Backend access through the authenticated gateway.

mod client;

pub use client::AuthenticatedGateway;
