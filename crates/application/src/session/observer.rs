//! Session observer.
//!
//! Owns the single authoritative `Session` for the running client. It consumes
//! the identity provider's principal stream, publishes a fresh snapshot for
//! every notification and fires backend provisioning on each absent -> present
//! edge. Provisioning is spawned and never awaited by the observer.

use std::sync::Arc;

use itinera_domain::{Identity, Session, SessionTransition};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::context::SessionContext;
use super::listener::{Listeners, SessionListener};
use crate::ports::{IdentityProvider, PrincipalStream, UserProvisioner};

/// Running subscription to the identity provider.
///
/// Acts as the cancellation handle: `stop` (or dropping the observer)
/// unregisters the listener. Readers obtain a [`SessionContext`].
pub struct SessionObserver {
    state: watch::Receiver<Session>,
    listeners: Listeners,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionObserver {
    /// Subscribes to `identity` and starts publishing sessions.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(
        identity: &dyn IdentityProvider,
        provisioner: Arc<dyn UserProvisioner>,
    ) -> Self {
        let (tx, rx) = watch::channel(Session::initial());
        let listeners = Listeners::default();
        let stream = identity.subscribe();
        let task = tokio::spawn(run(stream, tx, listeners.clone(), provisioner));

        tracing::debug!("session observer started");

        Self {
            state: rx,
            listeners,
            task: Mutex::new(Some(task)),
        }
    }

    /// Read-only handle on the session, for consumers.
    #[must_use]
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.state.clone())
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Invokes `callback` with every session published from now on.
    ///
    /// Unlike [`SessionContext::changed`], no notification is skipped: the
    /// callback sees each one in order. It runs until the returned listener is
    /// cancelled or dropped.
    #[must_use]
    pub fn on_change<F>(&self, callback: F) -> SessionListener
    where
        F: Fn(&Session) + Send + 'static,
    {
        self.listeners.register(callback)
    }

    /// Returns true while the upstream subscription is being processed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Unregisters from the identity provider. Later calls are no-ops.
    ///
    /// In-flight provisioning calls are left to complete.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::debug!("session observer stopped");
        }
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SessionObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionObserver")
            .field("session", &*self.state.borrow())
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run(
    mut stream: PrincipalStream,
    state: watch::Sender<Session>,
    listeners: Listeners,
    provisioner: Arc<dyn UserProvisioner>,
) {
    while let Some(user) = stream.recv().await {
        let update = state.borrow().resolve(user);
        let uid = update.session.user().map(|user| user.uid.as_str());

        match update.transition {
            SessionTransition::SignedIn => tracing::info!(uid, "signed in"),
            SessionTransition::SignedOut => tracing::info!("signed out"),
            SessionTransition::PrincipalChanged => {
                tracing::info!(uid, "active principal changed");
            }
            SessionTransition::Unchanged => {}
        }

        if update.transition.requires_provisioning()
            && let Some(identity) = update.session.user()
        {
            spawn_provisioning(Arc::clone(&provisioner), identity.clone());
        }

        listeners.publish(&update.session);
        state.send_replace(update.session);
    }

    // No recovery: the last published session stays in place.
    tracing::error!("identity provider session stream closed");
}

fn spawn_provisioning(provisioner: Arc<dyn UserProvisioner>, identity: Identity) {
    tokio::spawn(async move {
        match provisioner.provision(&identity).await {
            Ok(()) => tracing::debug!(uid = %identity.uid, "backend user provisioned"),
            Err(error) => {
                tracing::warn!(uid = %identity.uid, %error, "backend user provisioning failed");
            }
        }
    });
}
