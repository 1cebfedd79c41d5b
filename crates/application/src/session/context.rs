//! Read-only access to the published session.

use itinera_domain::{Identity, Session};
use tokio::sync::watch;

/// Read-only view of the session published by the observer.
///
/// Cloning is cheap; every clone sees the same snapshot. Holders can read the
/// current value or wait for the next one, never write.
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: watch::Receiver<Session>,
}

impl SessionContext {
    pub(crate) const fn new(state: watch::Receiver<Session>) -> Self {
        Self { state }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// The signed-in principal, if any.
    #[must_use]
    pub fn user(&self) -> Option<Identity> {
        self.state.borrow().user().cloned()
    }

    /// Returns true until the first upstream notification.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Waits for the next published session.
    ///
    /// Returns `None` once the observer has been dropped.
    pub async fn changed(&mut self) -> Option<Session> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Waits until the session has left the loading state.
    ///
    /// Returns `None` if the observer is dropped before that happens.
    pub async fn resolved(&mut self) -> Option<Session> {
        self.state
            .wait_for(|session| !session.is_loading())
            .await
            .ok()
            .map(|session| session.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_context_reads_published_snapshot() {
        let (tx, rx) = watch::channel(Session::initial());
        let mut context = SessionContext::new(rx);
        assert!(context.is_loading());
        assert_eq!(context.user(), None);

        let alice = Identity::new("alice").unwrap();
        tx.send_replace(Session::resolved(Some(alice.clone())));

        assert_eq!(context.changed().await, Some(Session::resolved(Some(alice.clone()))));
        assert_eq!(context.user(), Some(alice));
        assert!(!context.is_loading());
    }

    #[tokio::test]
    async fn test_resolved_returns_immediately_once_loaded() {
        let (_tx, rx) = watch::channel(Session::resolved(None));
        let mut context = SessionContext::new(rx);
        assert_eq!(context.resolved().await, Some(Session::resolved(None)));
    }

    #[tokio::test]
    async fn test_changed_returns_none_when_observer_gone() {
        let (tx, rx) = watch::channel(Session::initial());
        let mut context = SessionContext::new(rx);
        drop(tx);
        assert_eq!(context.changed().await, None);
        assert_eq!(context.resolved().await, None);
    }
}
