//! Identity, credential and provisioning types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DomainError;

/// An authenticated principal as reported by the identity provider.
///
/// The identity provider owns this record; the application only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable unique id assigned by the identity provider.
    pub uid: String,
    /// Display name, if the provider has one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address, if the provider has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image location.
    #[serde(default)]
    pub photo_url: Option<Url>,
}

impl Identity {
    /// Creates an identity with only its id set.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidIdentifier` if `uid` is blank.
    pub fn new(uid: impl Into<String>) -> Result<Self, DomainError> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "identity uid must not be empty".to_string(),
            ));
        }
        Ok(Self {
            uid,
            display_name: None,
            email: None,
            photo_url: None,
        })
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name suitable for display: display name, then email, then uid.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// A short-lived bearer credential derived from the active identity.
///
/// Never cached by the client. `Debug` prints only a preview.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Get a preview of the token (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.len() > 12 {
            let cut = self.0.char_indices().nth(8).map_or(self.0.len(), |(i, _)| i);
            format!("{}...", &self.0[..cut])
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.preview()).finish()
    }
}

/// How the backend is told that a principal exists.
///
/// Both variants are the same idempotent upsert and differ only in transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningTransport {
    /// `POST /signin` with no body; the token travels in the `Authorization` header.
    #[default]
    Signin,
    /// `POST /api/v1/auth/update-user` with `{"token": ...}` as the JSON body.
    UpdateUser,
}

impl ProvisioningTransport {
    /// Path of the provisioning endpoint, relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Signin => "/signin",
            Self::UpdateUser => "/api/v1/auth/update-user",
        }
    }

    /// Whether the token is also sent in the request body.
    #[must_use]
    pub const fn sends_token_in_body(self) -> bool {
        matches!(self, Self::UpdateUser)
    }
}

impl FromStr for ProvisioningTransport {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "signin" => Ok(Self::Signin),
            "update_user" => Ok(Self::UpdateUser),
            other => Err(DomainError::UnknownProvisioningTransport(other.to_string())),
        }
    }
}

/// Errors raised at the identity provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The provider could not produce a token for the active principal.
    #[error("token unavailable: {message}")]
    TokenUnavailable {
        /// Error description.
        message: String,
    },
}
