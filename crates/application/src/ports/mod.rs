//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod gateway;
mod identity_provider;
mod provisioner;
mod trip_backend;

pub use gateway::GatewayError;
pub use identity_provider::{IdentityProvider, PrincipalStream};
pub use provisioner::UserProvisioner;
pub use trip_backend::TripBackend;
