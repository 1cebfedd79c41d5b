//! In-memory backend used by use case tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use itinera_domain::{
    ItineraryItem, ItineraryItemUpdate, ItineraryKind, NewItineraryItem, Trip,
};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::ports::{GatewayError, TripBackend};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, day, hour, 0, 0).unwrap()
}

pub fn trip(name: &str, start: Option<DateTime<Utc>>) -> Trip {
    Trip {
        trip_id: Uuid::now_v7(),
        name: name.to_string(),
        description: None,
        created_by_user_id: Uuid::nil(),
        start_date: start,
        end_date: None,
        created_at: at(1, 0),
        updated_at: at(1, 0),
    }
}

pub fn activity(trip_id: Uuid, start: DateTime<Utc>) -> ItineraryItem {
    ItineraryItem {
        itinerary_item_id: Uuid::now_v7(),
        trip_id: Some(trip_id),
        created_by_user_id: Uuid::nil(),
        itinerary_datetime: None,
        booking_reference: None,
        booking_url: None,
        notes: None,
        raw_details_json: None,
        created_at: None,
        updated_at: None,
        kind: ItineraryKind::Activity {
            description: None,
            location_name: None,
            start_datetime: start,
            end_datetime: None,
        },
    }
}

#[derive(Default)]
pub struct MockBackend {
    pub trips: Vec<Trip>,
    pub items: Mutex<Vec<ItineraryItem>>,
    pub failure: Option<GatewayError>,
}

impl MockBackend {
    fn check(&self) -> Result<(), GatewayError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl TripBackend for MockBackend {
    async fn future_trips(&self) -> Result<Vec<Trip>, GatewayError> {
        self.check()?;
        Ok(self.trips.clone())
    }

    async fn itinerary_items(
        &self,
        trip_id: Option<Uuid>,
    ) -> Result<Vec<ItineraryItem>, GatewayError> {
        self.check()?;
        Ok(self
            .items
            .lock()
            .iter()
            .filter(|item| trip_id.is_none() || item.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn itinerary_item(&self, item_id: Uuid) -> Result<ItineraryItem, GatewayError> {
        self.check()?;
        self.items
            .lock()
            .iter()
            .find(|item| item.itinerary_item_id == item_id)
            .cloned()
            .ok_or_else(|| GatewayError::from_status(404, "not found"))
    }

    async fn create_itinerary_item(
        &self,
        _item: &NewItineraryItem,
    ) -> Result<ItineraryItem, GatewayError> {
        Err(GatewayError::Other("not supported by mock".to_string()))
    }

    async fn update_itinerary_item(
        &self,
        item_id: Uuid,
        _update: &ItineraryItemUpdate,
    ) -> Result<ItineraryItem, GatewayError> {
        self.itinerary_item(item_id).await
    }

    async fn delete_itinerary_item(&self, item_id: Uuid) -> Result<(), GatewayError> {
        self.check()?;
        self.items
            .lock()
            .retain(|item| item.itinerary_item_id != item_id);
        Ok(())
    }
}
