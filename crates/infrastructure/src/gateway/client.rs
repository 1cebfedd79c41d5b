//! Authenticated request gateway using reqwest.
//!
//! Every outgoing request asks the identity provider for the current token
//! right before it is sent. Nothing is cached here: freshness is the identity
//! provider's job.

use std::sync::Arc;

use itinera_application::{GatewayError, IdentityProvider};
use itinera_domain::BearerToken;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;

/// Shared HTTP client for all backend calls.
///
/// Holds one fixed base URL and the identity provider used to authorize
/// requests. No retries, no timeout override beyond transport defaults.
pub struct AuthenticatedGateway {
    client: Client,
    base_url: Url,
    identity: Arc<dyn IdentityProvider>,
}

impl AuthenticatedGateway {
    /// Creates a gateway from the process configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(
        config: &AppConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;

        Ok(Self::with_client(
            client,
            config.api_base_url().clone(),
            identity,
        ))
    }

    /// Creates a gateway with a custom reqwest client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: Url,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            client,
            base_url,
            identity,
        }
    }

    /// Resolves `path` against the base URL, keeping any base path prefix.
    ///
    /// # Errors
    /// Returns `InvalidUrl` if the result does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = format!("{base}/{path}");
        Url::parse(&joined).map_err(|e| GatewayError::InvalidUrl(format!("{e}: {joined}")))
    }

    /// Fetches the token for the active principal from the identity provider.
    ///
    /// # Errors
    /// Returns `Token` if the provider fails to produce one.
    pub async fn current_token(&self) -> Result<Option<BearerToken>, GatewayError> {
        Ok(self.identity.current_token().await?)
    }

    /// Builds a request for `url` with credentials attached when available.
    ///
    /// Returns the token that was attached so callers needing it in the body
    /// use the exact same value.
    ///
    /// # Errors
    /// Returns `Token` if the identity provider fails; the request is not sent.
    pub async fn authorized(
        &self,
        method: Method,
        url: Url,
    ) -> Result<(RequestBuilder, Option<BearerToken>), GatewayError> {
        let token = self.current_token().await?;

        tracing::debug!(
            %method,
            %url,
            authenticated = token.is_some(),
            "dispatching backend request"
        );

        let mut builder = self.client.request(method, url);
        if let Some(token) = &token {
            builder = builder.header(AUTHORIZATION, token.authorization_value());
        }
        Ok((builder, token))
    }

    /// Sends a prepared request and maps non-success statuses to errors.
    ///
    /// # Errors
    /// Returns a transport error or the status mapped by `GatewayError::from_status`.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(Self::map_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(text) => text,
                Err(error) => {
                    tracing::debug!(%error, "failed to read error response body");
                    String::new()
                }
            };
            tracing::debug!(status = status.as_u16(), "backend rejected request");
            return Err(GatewayError::from_status(status.as_u16(), message));
        }
        Ok(response)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    /// See [`Self::send`]; decoding failures map to `Decode`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        let (builder, _) = self.authorized(Method::GET, url).await?;
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    /// See [`Self::send`]; decoding failures map to `Decode`.
    pub async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, _) = self.authorized(Method::POST, url).await?;
        let builder = builder.json(body);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    ///
    /// # Errors
    /// See [`Self::send`]; decoding failures map to `Decode`.
    pub async fn put_json<B, T>(&self, url: Url, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, _) = self.authorized(Method::PUT, url).await?;
        let builder = builder.json(body);
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    /// `DELETE` a resource, ignoring the response body.
    ///
    /// # Errors
    /// See [`Self::send`].
    pub async fn delete(&self, url: Url) -> Result<(), GatewayError> {
        let (builder, _) = self.authorized(Method::DELETE, url).await?;
        self.send(builder).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let bytes = response.bytes().await.map_err(Self::map_error)?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Maps reqwest errors to `GatewayError`.
    fn map_error(error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            return GatewayError::Timeout;
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(String::from))
                .unwrap_or_else(|| "unknown".to_string());
            return GatewayError::ConnectionFailed(format!("{host}: {error}"));
        }

        if error.is_builder() {
            return GatewayError::InvalidUrl(error.to_string());
        }

        if error.is_decode() {
            return GatewayError::Decode(error.to_string());
        }

        GatewayError::Other(error.to_string())
    }
}

impl std::fmt::Debug for AuthenticatedGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
