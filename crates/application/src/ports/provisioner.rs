//! User provisioning port

use async_trait::async_trait;
use itinera_domain::Identity;

use super::GatewayError;

/// Tells the backend that a principal exists.
///
/// The backend treats repeated calls for the same principal as an upsert, so
/// callers never deduplicate.
#[async_trait]
pub trait UserProvisioner: Send + Sync {
    /// Ensures a backend user record exists for `identity`.
    ///
    /// # Errors
    /// Returns the gateway error of the single network call. No retry is made.
    async fn provision(&self, identity: &Identity) -> Result<(), GatewayError>;
}
