//! Load trip itinerary use case

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itinera_domain::ItineraryItem;
use uuid::Uuid;

use crate::error::ApplicationResult;
use crate::ports::TripBackend;

/// Itinerary of one trip, ordered by schedule time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripItinerary {
    /// The trip.
    pub trip_id: Uuid,
    /// Items sorted by `ItineraryItem::scheduled_at`.
    pub items: Vec<ItineraryItem>,
}

impl TripItinerary {
    /// Groups items by the UTC calendar day they are scheduled on.
    #[must_use]
    pub fn by_day(&self) -> BTreeMap<NaiveDate, Vec<&ItineraryItem>> {
        let mut days: BTreeMap<NaiveDate, Vec<&ItineraryItem>> = BTreeMap::new();
        for item in &self.items {
            days.entry(item.scheduled_at().date_naive())
                .or_default()
                .push(item);
        }
        days
    }
}

/// Loads the itinerary items of a trip.
pub struct LoadTripItinerary<B> {
    backend: B,
}

impl<B: TripBackend> LoadTripItinerary<B> {
    /// Creates a new `LoadTripItinerary` use case.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns the backend error unchanged; no retry is attempted.
    pub async fn execute(&self, trip_id: Uuid) -> ApplicationResult<TripItinerary> {
        let mut items = self.backend.itinerary_items(Some(trip_id)).await?;
        items.sort_by_key(ItineraryItem::scheduled_at);
        Ok(TripItinerary { trip_id, items })
    }
}
