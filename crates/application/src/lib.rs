//! Itinera Application - Session state, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (identity provider, user provisioning, backend resources)
//! - The session observer and its read-only context
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod session;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{GatewayError, IdentityProvider, PrincipalStream, TripBackend, UserProvisioner};
pub use session::{SessionContext, SessionListener, SessionObserver};
pub use use_cases::{ListUpcomingTrips, LoadTripItinerary, TripItinerary};
