//! Backend resource port

use async_trait::async_trait;
use itinera_domain::{ItineraryItem, ItineraryItemUpdate, NewItineraryItem, Trip};
use uuid::Uuid;

use super::GatewayError;

/// Trip and itinerary resources exposed by the backend.
///
/// Every call goes through the authenticated gateway; the backend decides
/// which principal the data belongs to.
#[async_trait]
pub trait TripBackend: Send + Sync {
    /// Trips of the current user that have not happened yet.
    async fn future_trips(&self) -> Result<Vec<Trip>, GatewayError>;

    /// Itinerary items of the current user, optionally limited to one trip.
    async fn itinerary_items(&self, trip_id: Option<Uuid>)
    -> Result<Vec<ItineraryItem>, GatewayError>;

    /// A single itinerary item.
    async fn itinerary_item(&self, item_id: Uuid) -> Result<ItineraryItem, GatewayError>;

    /// Creates an itinerary item.
    async fn create_itinerary_item(
        &self,
        item: &NewItineraryItem,
    ) -> Result<ItineraryItem, GatewayError>;

    /// Applies a partial update to an itinerary item.
    async fn update_itinerary_item(
        &self,
        item_id: Uuid,
        update: &ItineraryItemUpdate,
    ) -> Result<ItineraryItem, GatewayError>;

    /// Deletes an itinerary item.
    async fn delete_itinerary_item(&self, item_id: Uuid) -> Result<(), GatewayError>;
}
