//! Errors surfaced by the authenticated request gateway.

use itinera_domain::AuthError;

/// Errors returned by backend calls.
///
/// The gateway never retries; call sites decide how to report these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The identity provider failed to produce a token.
    #[error("could not obtain credentials: {0}")]
    Token(#[from] AuthError),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The backend rejected the credentials (or their absence).
    #[error("unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code (401 or 403).
        status: u16,
        /// Response body.
        message: String,
    },

    /// The resource does not exist or is not visible to the principal.
    #[error("not found: {message}")]
    NotFound {
        /// Response body.
        message: String,
    },

    /// Any other non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The transport timed out.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Maps a non-success HTTP status and body to an error.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            404 => Self::NotFound { message },
            _ => Self::Status { status, message },
        }
    }

    /// Whether showing a retry option to the user makes sense.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::ConnectionFailed(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_status() {
        assert_eq!(
            GatewayError::from_status(401, "no token"),
            GatewayError::Unauthorized {
                status: 401,
                message: "no token".to_string()
            }
        );
        assert!(matches!(
            GatewayError::from_status(403, ""),
            GatewayError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            GatewayError::from_status(404, ""),
            GatewayError::NotFound { .. }
        ));
        assert!(matches!(
            GatewayError::from_status(500, ""),
            GatewayError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_retryable() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::from_status(503, "").is_retryable());
        assert!(!GatewayError::from_status(400, "").is_retryable());
        assert!(!GatewayError::from_status(401, "").is_retryable());
        assert!(!GatewayError::Token(AuthError::TokenUnavailable {
            message: "expired".to_string()
        })
        .is_retryable());
    }
}
