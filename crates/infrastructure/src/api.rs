//! REST client for trip and itinerary resources.

use std::sync::Arc;

use async_trait::async_trait;
use itinera_application::{GatewayError, TripBackend};
use itinera_domain::{ItineraryItem, ItineraryItemUpdate, NewItineraryItem, Trip};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::gateway::AuthenticatedGateway;

const FUTURE_TRIPS: &str = "/api/v1/future";
const ITINERARY_ITEMS: &str = "/api/v1/itinerary-items";
const HEALTH: &str = "/healthz";

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// `TripBackend` implementation over the authenticated gateway.
#[derive(Debug, Clone)]
pub struct RestTripBackend {
    gateway: Arc<AuthenticatedGateway>,
}

impl RestTripBackend {
    /// Creates a backend client sharing `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<AuthenticatedGateway>) -> Self {
        Self { gateway }
    }

    /// Checks the unauthenticated liveness endpoint.
    ///
    /// # Errors
    /// Returns the gateway error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<bool, GatewayError> {
        let url = self.gateway.endpoint(HEALTH)?;
        let health: HealthResponse = self.gateway.get_json(url).await?;
        Ok(health.status == "ok")
    }

    fn item_url(&self, item_id: Uuid) -> Result<Url, GatewayError> {
        self.gateway.endpoint(&format!("{ITINERARY_ITEMS}/{item_id}"))
    }
}

#[async_trait]
impl TripBackend for RestTripBackend {
    async fn future_trips(&self) -> Result<Vec<Trip>, GatewayError> {
        let url = self.gateway.endpoint(FUTURE_TRIPS)?;
        self.gateway.get_json(url).await
    }

    async fn itinerary_items(
        &self,
        trip_id: Option<Uuid>,
    ) -> Result<Vec<ItineraryItem>, GatewayError> {
        let mut url = self.gateway.endpoint(ITINERARY_ITEMS)?;
        if let Some(trip_id) = trip_id {
            url.query_pairs_mut()
                .append_pair("trip_id", &trip_id.to_string());
        }
        self.gateway.get_json(url).await
    }

    async fn itinerary_item(&self, item_id: Uuid) -> Result<ItineraryItem, GatewayError> {
        self.gateway.get_json(self.item_url(item_id)?).await
    }

    async fn create_itinerary_item(
        &self,
        item: &NewItineraryItem,
    ) -> Result<ItineraryItem, GatewayError> {
        let url = self.gateway.endpoint(ITINERARY_ITEMS)?;
        self.gateway.post_json(url, item).await
    }

    async fn update_itinerary_item(
        &self,
        item_id: Uuid,
        update: &ItineraryItemUpdate,
    ) -> Result<ItineraryItem, GatewayError> {
        self.gateway.put_json(self.item_url(item_id)?, update).await
    }

    async fn delete_itinerary_item(&self, item_id: Uuid) -> Result<(), GatewayError> {
        self.gateway.delete(self.item_url(item_id)?).await
    }
}
