//! Identity provider port

use async_trait::async_trait;
use itinera_domain::{AuthError, BearerToken, Identity};
use tokio::sync::mpsc;

/// Stream of principal changes pushed by the identity provider.
///
/// `Some` carries the newly active principal, `None` means signed out.
/// The stream ending means the provider stopped delivering notifications.
pub type PrincipalStream = mpsc::UnboundedReceiver<Option<Identity>>;

/// Boundary to the external identity provider.
///
/// Implementations own the principal and its credentials; the client only
/// observes changes and asks for a token when it needs one.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a listener for session changes.
    ///
    /// The current principal (or its absence) is delivered first, followed by
    /// one item per change. Dropping the returned stream unregisters it.
    fn subscribe(&self) -> PrincipalStream;

    /// Fetches the token for the active principal.
    ///
    /// Returns `Ok(None)` when nobody is signed in. The provider is
    /// responsible for refreshing expired tokens.
    ///
    /// # Errors
    /// Returns an error if a principal is active but no token can be obtained.
    async fn current_token(&self) -> Result<Option<BearerToken>, AuthError>;

    /// Signs the active principal out.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the sign-out.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
