//! Itinera Domain - Core business types
//!
//! This crate defines the domain model for the Itinera trip planner client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod itinerary;
pub mod session;
pub mod trip;

pub use auth::{AuthError, BearerToken, Identity, ProvisioningTransport};
pub use error::DomainError;
pub use itinerary::{
    ItineraryItem, ItineraryItemType, ItineraryItemUpdate, ItineraryKind, NewItineraryItem,
};
pub use session::{Session, SessionTransition, SessionUpdate};
pub use trip::Trip;
