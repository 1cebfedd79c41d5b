//! In-process identity provider.
//!
//! Holds the active principal and its token in memory and pushes every change
//! to all subscribers. Used for local development sessions and by tests that
//! need a real provider instead of a scripted stream.

use async_trait::async_trait;
use itinera_application::{IdentityProvider, PrincipalStream};
use itinera_domain::{AuthError, BearerToken, Identity};
use parking_lot::Mutex;
use tokio::sync::mpsc;

#[derive(Default)]
struct LocalState {
    principal: Option<(Identity, BearerToken)>,
    listeners: Vec<mpsc::UnboundedSender<Option<Identity>>>,
}

impl LocalState {
    fn user(&self) -> Option<Identity> {
        self.principal.as_ref().map(|(identity, _)| identity.clone())
    }

    fn broadcast(&mut self) {
        let user = self.user();
        self.listeners
            .retain(|listener| listener.send(user.clone()).is_ok());
    }
}

/// Thread-safe in-memory identity provider.
#[derive(Default)]
pub struct LocalIdentityProvider {
    state: Mutex<LocalState>,
}

impl LocalIdentityProvider {
    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `identity` the active principal and notifies subscribers.
    pub fn sign_in(&self, identity: Identity, token: BearerToken) {
        let mut state = self.state.lock();
        tracing::debug!(uid = %identity.uid, token = %token.preview(), "local sign-in");
        state.principal = Some((identity, token));
        state.broadcast();
    }

    /// Replaces the token of the active principal without a session change.
    ///
    /// Returns false if nobody is signed in.
    pub fn rotate_token(&self, token: BearerToken) -> bool {
        let mut state = self.state.lock();
        match state.principal.as_mut() {
            Some((_, current)) => {
                *current = token;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        let mut state = self.state.lock();
        state.listeners.retain(|listener| !listener.is_closed());
        state.listeners.len()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn subscribe(&self) -> PrincipalStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        if tx.send(state.user()).is_ok() {
            state.listeners.push(tx);
        }
        rx
    }

    async fn current_token(&self) -> Result<Option<BearerToken>, AuthError> {
        Ok(self
            .state
            .lock()
            .principal
            .as_ref()
            .map(|(_, token)| token.clone()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut state = self.state.lock();
        if state.principal.take().is_some() {
            tracing::debug!("local sign-out");
            state.broadcast();
        }
        Ok(())
    }
}

impl std::fmt::Debug for LocalIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LocalIdentityProvider")
            .field("user", &state.user().map(|user| user.uid))
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alice() -> Identity {
        Identity::new("alice").unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_delivers_current_state_first() {
        let provider = LocalIdentityProvider::new();
        let mut stream = provider.subscribe();
        assert_eq!(stream.recv().await, Some(None));

        provider.sign_in(alice(), BearerToken::new("t"));
        let mut late = provider.subscribe();
        assert_eq!(late.recv().await, Some(Some(alice())));
        assert_eq!(stream.recv().await, Some(Some(alice())));
    }

    #[tokio::test]
    async fn test_sign_out_notifies_and_clears_token() {
        let provider = LocalIdentityProvider::new();
        provider.sign_in(alice(), BearerToken::new("t"));
        let mut stream = provider.subscribe();
        stream.recv().await;

        provider.sign_out().await.unwrap();

        assert_eq!(stream.recv().await, Some(None));
        assert_eq!(provider.current_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_when_signed_out_is_silent() {
        let provider = LocalIdentityProvider::new();
        let mut stream = provider.subscribe();
        stream.recv().await;

        provider.sign_out().await.unwrap();

        assert!(stream.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rotate_token() {
        let provider = LocalIdentityProvider::new();
        assert!(!provider.rotate_token(BearerToken::new("x")));

        provider.sign_in(alice(), BearerToken::new("old"));
        assert!(provider.rotate_token(BearerToken::new("new")));
        assert_eq!(
            provider.current_token().await.unwrap(),
            Some(BearerToken::new("new"))
        );
    }

    #[test]
    fn test_dropped_subscriptions_are_released() {
        let provider = LocalIdentityProvider::new();
        let stream = provider.subscribe();
        let _kept = provider.subscribe();
        assert_eq!(provider.listener_count(), 2);

        drop(stream);
        assert_eq!(provider.listener_count(), 1);
    }
}
