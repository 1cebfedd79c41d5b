//! Application error types

use thiserror::Error;

use crate::ports::GatewayError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A backend call failed.
    #[error("backend error: {0}")]
    Gateway(#[from] GatewayError),

    /// The operation needs a signed-in principal.
    #[error("not signed in")]
    NotSignedIn,
}

impl ApplicationError {
    /// Whether the caller may offer the user a retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(error) => error.is_retryable(),
            Self::NotSignedIn => false,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
