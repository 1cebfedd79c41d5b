//! Process-wide configuration, read once at startup.

use config::{Config, Environment};
use itinera_domain::{BearerToken, DomainError, Identity, ProvisioningTransport};
use serde::Deserialize;
use url::Url;

/// Prefix of every environment variable read by [`AppConfig::from_env`].
pub const ENV_PREFIX: &str = "ITINERA";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// `ITINERA_API_BASE_URL` is not set.
    #[error("ITINERA_API_BASE_URL is required")]
    MissingBaseUrl,

    /// A value failed validation.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    provisioning: String,
    user_agent: String,
    dev_uid: Option<String>,
    dev_id_token: Option<String>,
}

/// Immutable client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    api_base_url: Url,
    provisioning: ProvisioningTransport,
    user_agent: String,
    dev_session: Option<(Identity, BearerToken)>,
}

impl AppConfig {
    /// Creates a configuration for `api_base_url` with default settings.
    ///
    /// # Errors
    /// Returns an error if the URL is not an absolute `http(s)` URL.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            provisioning: ProvisioningTransport::default(),
            user_agent: default_user_agent(),
            dev_session: None,
        })
    }

    /// Loads the configuration from `ITINERA_*` environment variables.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing or invalid, or if another
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(environment())
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let built = Config::builder()
            .set_default("provisioning", "signin")?
            .set_default("user_agent", default_user_agent())?
            .add_source(environment)
            .build()?;

        let raw: RawConfig = built.try_deserialize()?;
        let base_url = raw.api_base_url.ok_or(ConfigError::MissingBaseUrl)?;

        let dev_session = match (raw.dev_uid, raw.dev_id_token) {
            (Some(uid), Some(token)) => Some((Identity::new(uid)?, BearerToken::new(token))),
            _ => None,
        };

        Ok(Self {
            api_base_url: parse_base_url(&base_url)?,
            provisioning: raw.provisioning.parse()?,
            user_agent: raw.user_agent,
            dev_session,
        })
    }

    /// Base address of the backend.
    #[must_use]
    pub const fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Provisioning transport the backend expects.
    #[must_use]
    pub const fn provisioning(&self) -> ProvisioningTransport {
        self.provisioning
    }

    /// `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Principal and token to sign in with at startup, for local development.
    #[must_use]
    pub const fn dev_session(&self) -> Option<&(Identity, BearerToken)> {
        self.dev_session.as_ref()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn default_user_agent() -> String {
    format!("Itinera/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_base_url(value: &str) -> Result<Url, DomainError> {
    let url = Url::parse(value.trim())
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {value}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::InvalidUrl(format!(
            "unsupported scheme '{}': {value}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(DomainError::InvalidUrl(value.to_string()));
    }
    // Endpoint paths are joined onto the base.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(DomainError::InvalidUrl(format!(
            "base URL must not carry a query or fragment: {value}"
        )));
    }
    Ok(url)
}
