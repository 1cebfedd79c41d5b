//! Client-side session state machine.
//!
//! A `Session` starts out loading with no user. Every upstream notification
//! resolves it to `loading == false`; loading never comes back afterwards.
//! Resolving also classifies the edge taken so that side effects can be
//! attached to transitions rather than to states.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// Normalized authentication status consumed by the rest of the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<Identity>,
    loading: bool,
}

impl Session {
    /// The state before the identity provider has reported anything.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// A resolved session with the given user.
    #[must_use]
    pub const fn resolved(user: Option<Identity>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    /// The signed-in principal, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    /// True until the first upstream notification has been applied.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true if a principal is present.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Applies an upstream notification and reports which edge was taken.
    #[must_use]
    pub fn resolve(&self, user: Option<Identity>) -> SessionUpdate {
        let transition = match (&self.user, &user) {
            (None, Some(_)) => SessionTransition::SignedIn,
            (Some(_), None) => SessionTransition::SignedOut,
            (Some(previous), Some(next)) if previous.uid != next.uid => {
                SessionTransition::PrincipalChanged
            }
            _ => SessionTransition::Unchanged,
        };

        SessionUpdate {
            session: Self::resolved(user),
            transition,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Edge taken by a session update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTransition {
    /// absent -> present, including the very first resolution with a user.
    SignedIn,
    /// present -> absent.
    SignedOut,
    /// present -> present with a different uid.
    PrincipalChanged,
    /// Same presence and same principal (or still absent).
    Unchanged,
}

impl SessionTransition {
    /// Returns true if the backend user record must be provisioned.
    ///
    /// Every edge that makes a new principal active qualifies.
    #[must_use]
    pub const fn requires_provisioning(self) -> bool {
        matches!(self, Self::SignedIn | Self::PrincipalChanged)
    }
}

/// Result of applying one upstream notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    /// The session to publish.
    pub session: Session,
    /// The edge that produced it.
    pub transition: SessionTransition,
}
