//! Itinera Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest-backed authenticated
//! gateway, the provisioning client, the REST trip backend and an
//! in-process identity provider.

pub mod api;
pub mod config;
pub mod gateway;
pub mod identity;
pub mod provisioning;

pub use api::RestTripBackend;
pub use config::{AppConfig, ConfigError, ENV_PREFIX};
pub use gateway::AuthenticatedGateway;
pub use identity::LocalIdentityProvider;
pub use provisioning::GatewayProvisioner;
