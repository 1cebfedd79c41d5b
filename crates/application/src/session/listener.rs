//! Push delivery of sessions to registered callbacks.
//!
//! Each listener owns an unbounded queue, so every published session reaches
//! every callback in publication order, even when several arrive back to back.

use std::sync::Arc;

use itinera_domain::Session;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Registry of callback queues fed by the observer task.
#[derive(Debug, Clone, Default)]
pub(crate) struct Listeners {
    queues: Arc<Mutex<Vec<mpsc::UnboundedSender<Session>>>>,
}

impl Listeners {
    /// Spawns a task invoking `callback` for every session published from now on.
    pub(crate) fn register<F>(&self, callback: F) -> SessionListener
    where
        F: Fn(&Session) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Session>();
        self.queues.lock().push(tx);

        let task = tokio::spawn(async move {
            while let Some(session) = rx.recv().await {
                callback(&session);
            }
        });
        SessionListener { task }
    }

    /// Queues `session` for every live listener and forgets cancelled ones.
    pub(crate) fn publish(&self, session: &Session) {
        self.queues
            .lock()
            .retain(|queue| queue.send(session.clone()).is_ok());
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        let mut queues = self.queues.lock();
        queues.retain(|queue| !queue.is_closed());
        queues.len()
    }
}

/// Callback registration created by `SessionObserver::on_change`.
///
/// Dropping the listener unregisters the callback.
#[derive(Debug)]
pub struct SessionListener {
    task: JoinHandle<()>,
}

impl SessionListener {
    /// Unregisters the callback.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for SessionListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use itinera_domain::Identity;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn test_every_published_session_is_delivered_in_order() {
        let listeners = Listeners::default();
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let _listener = listeners.register(move |session| {
            seen_tx.send(session.is_signed_in()).unwrap();
        });

        let alice = Identity::new("alice").unwrap();
        listeners.publish(&Session::resolved(Some(alice.clone())));
        listeners.publish(&Session::resolved(None));
        listeners.publish(&Session::resolved(Some(alice)));

        let mut seen = Vec::new();
        for _ in 0..3 {
            let next = tokio::time::timeout(Duration::from_secs(2), seen_rx.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(next);
        }
        assert_eq!(seen, vec![true, false, true]);
    }

    #[tokio::test]
    async fn test_cancelled_listener_stops_receiving() {
        let listeners = Listeners::default();
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();

        let listener = listeners.register(move |session| {
            let _ = seen_tx.send(session.clone());
        });
        assert_eq!(listeners.len(), 1);
        listener.cancel();
        tokio::task::yield_now().await;

        listeners.publish(&Session::resolved(None));
        tokio::task::yield_now().await;

        assert!(seen_rx.try_recv().is_err());
        tokio::time::timeout(Duration::from_secs(2), async {
            while listeners.len() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("cancelled listener was not released");
    }
}
