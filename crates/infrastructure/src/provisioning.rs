//! Backend user provisioning over the authenticated gateway.

use std::sync::Arc;

use async_trait::async_trait;
use itinera_application::{GatewayError, UserProvisioner};
use itinera_domain::{AuthError, Identity, ProvisioningTransport};
use reqwest::Method;
use serde::Serialize;

use crate::gateway::AuthenticatedGateway;

#[derive(Serialize)]
struct UpdateUserBody<'a> {
    token: &'a str,
}

/// Provisions backend users with one `POST` per call.
///
/// The backend upserts, so repeated calls for the same principal are harmless.
#[derive(Debug, Clone)]
pub struct GatewayProvisioner {
    gateway: Arc<AuthenticatedGateway>,
    transport: ProvisioningTransport,
}

impl GatewayProvisioner {
    /// Creates a provisioner using the given transport.
    #[must_use]
    pub const fn new(gateway: Arc<AuthenticatedGateway>, transport: ProvisioningTransport) -> Self {
        Self { gateway, transport }
    }
}

#[async_trait]
impl UserProvisioner for GatewayProvisioner {
    async fn provision(&self, identity: &Identity) -> Result<(), GatewayError> {
        let url = self.gateway.endpoint(self.transport.path())?;
        let (builder, token) = self.gateway.authorized(Method::POST, url).await?;

        // The principal may have signed out between the edge and this call.
        let Some(token) = token else {
            return Err(GatewayError::Token(AuthError::TokenUnavailable {
                message: format!("no token for {}", identity.uid),
            }));
        };

        let builder = if self.transport.sends_token_in_body() {
            builder.json(&UpdateUserBody {
                token: token.as_str(),
            })
        } else {
            builder
        };

        self.gateway.send(builder).await?;
        tracing::debug!(
            uid = %identity.uid,
            transport = ?self.transport,
            "provisioning request accepted"
        );
        Ok(())
    }
}
