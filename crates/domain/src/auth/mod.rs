//! Authentication domain types

mod types;

pub use types::{AuthError, BearerToken, Identity, ProvisioningTransport};
