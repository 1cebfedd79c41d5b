//! Itinerary items: flights, ground transport, car rentals, lodging and activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminant of an itinerary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryItemType {
    /// Air travel.
    Flight,
    /// Trains and buses.
    #[serde(rename = "ground")]
    GroundTransportation,
    /// Rented car.
    CarRental,
    /// Hotel or other lodging.
    Accommodation,
    /// Anything else worth scheduling.
    Activity,
}

impl ItineraryItemType {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::GroundTransportation => "Ground transport",
            Self::CarRental => "Car rental",
            Self::Accommodation => "Accommodation",
            Self::Activity => "Activity",
        }
    }
}

/// Type-specific part of an itinerary item, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItineraryKind {
    /// Air travel between two airports.
    Flight {
        /// IATA code of the departure airport.
        origin_airport_code: String,
        /// IATA code of the arrival airport.
        destination_airport_code: String,
        /// Departure time.
        departure_datetime: DateTime<Utc>,
        /// Arrival time.
        arrival_datetime: DateTime<Utc>,
        /// Airline.
        #[serde(default)]
        transport_carrier: Option<String>,
        /// Flight number.
        #[serde(default)]
        transport_number: Option<String>,
    },
    /// Train or bus.
    #[serde(rename = "ground")]
    GroundTransportation {
        /// Departure station or address.
        origin_detail: String,
        /// Arrival station or address.
        destination_detail: String,
        /// Departure time.
        departure_datetime: DateTime<Utc>,
        /// Arrival time.
        arrival_datetime: DateTime<Utc>,
        /// Operator.
        #[serde(default)]
        transport_carrier: Option<String>,
        /// Train or bus number.
        #[serde(default)]
        transport_number: Option<String>,
    },
    /// Car rental.
    CarRental {
        /// Where the car is picked up.
        pickup_location: String,
        /// Where the car is returned, if elsewhere.
        #[serde(default)]
        dropoff_location: Option<String>,
        /// Pickup time.
        pickup_datetime: DateTime<Utc>,
        /// Return time.
        dropoff_datetime: DateTime<Utc>,
    },
    /// Lodging.
    Accommodation {
        /// Street address.
        address: String,
        /// Check-in time.
        check_in_datetime: DateTime<Utc>,
        /// Check-out time.
        check_out_datetime: DateTime<Utc>,
    },
    /// Scheduled activity.
    Activity {
        /// What it is.
        #[serde(default)]
        description: Option<String>,
        /// Where it happens.
        #[serde(default)]
        location_name: Option<String>,
        /// Start time.
        start_datetime: DateTime<Utc>,
        /// End time.
        #[serde(default)]
        end_datetime: Option<DateTime<Utc>>,
    },
}

impl ItineraryKind {
    /// The discriminant of this kind.
    #[must_use]
    pub const fn item_type(&self) -> ItineraryItemType {
        match self {
            Self::Flight { .. } => ItineraryItemType::Flight,
            Self::GroundTransportation { .. } => ItineraryItemType::GroundTransportation,
            Self::CarRental { .. } => ItineraryItemType::CarRental,
            Self::Accommodation { .. } => ItineraryItemType::Accommodation,
            Self::Activity { .. } => ItineraryItemType::Activity,
        }
    }

    /// The timestamp the item is sorted and displayed by.
    #[must_use]
    pub const fn primary_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::Flight {
                departure_datetime, ..
            }
            | Self::GroundTransportation {
                departure_datetime, ..
            } => *departure_datetime,
            Self::CarRental {
                pickup_datetime, ..
            } => *pickup_datetime,
            Self::Accommodation {
                check_in_datetime, ..
            } => *check_in_datetime,
            Self::Activity { start_datetime, .. } => *start_datetime,
        }
    }
}

/// An itinerary item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    /// Backend-assigned id.
    pub itinerary_item_id: Uuid,
    /// Trip this item belongs to, if any.
    #[serde(default)]
    pub trip_id: Option<Uuid>,
    /// Author of the item.
    pub created_by_user_id: Uuid,
    /// Explicit schedule time, overriding the kind's own timestamp.
    #[serde(default)]
    pub itinerary_datetime: Option<DateTime<Utc>>,
    /// Confirmation code.
    #[serde(default)]
    pub booking_reference: Option<String>,
    /// Link to the booking.
    #[serde(default)]
    pub booking_url: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Unstructured details kept verbatim.
    #[serde(default)]
    pub raw_details_json: Option<serde_json::Value>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Type-specific fields.
    #[serde(flatten)]
    pub kind: ItineraryKind,
}

impl ItineraryItem {
    /// The time the item is scheduled at.
    #[must_use]
    pub fn scheduled_at(&self) -> DateTime<Utc> {
        self.itinerary_datetime
            .unwrap_or_else(|| self.kind.primary_datetime())
    }
}

/// Request body for creating an itinerary item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItineraryItem {
    /// Trip to attach the item to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<Uuid>,
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: ItineraryItemType,
    /// Schedule time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary_datetime: Option<DateTime<Utc>>,
    /// Confirmation code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
    /// Link to the booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Unstructured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_details_json: Option<serde_json::Value>,
}

impl NewItineraryItem {
    /// Creates a request with only the type set.
    #[must_use]
    pub const fn new(item_type: ItineraryItemType) -> Self {
        Self {
            trip_id: None,
            item_type,
            itinerary_datetime: None,
            booking_reference: None,
            booking_url: None,
            notes: None,
            raw_details_json: None,
        }
    }

    /// Attaches the item to a trip.
    #[must_use]
    pub const fn for_trip(mut self, trip_id: Uuid) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    /// Sets the schedule time.
    #[must_use]
    pub const fn at(mut self, when: DateTime<Utc>) -> Self {
        self.itinerary_datetime = Some(when);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update of an itinerary item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItemUpdate {
    /// New trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<Uuid>,
    /// New type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItineraryItemType>,
    /// New schedule time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary_datetime: Option<DateTime<Utc>>,
    /// New confirmation code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
    /// New booking link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// New unstructured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_details_json: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flight_item_from_backend_payload() {
        let payload = json!({
            "itinerary_item_id": "2f1c0d9e-1b2a-4c3d-8e4f-5a6b7c8d9e0f",
            "trip_id": null,
            "created_by_user_id": "6f1d2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "type": "flight",
            "origin_airport_code": "SFO",
            "destination_airport_code": "LIS",
            "departure_datetime": "2026-11-02T08:30:00Z",
            "arrival_datetime": "2026-11-02T22:10:00Z",
            "transport_carrier": "TAP",
            "computed_itinerary_datetime": "2026-11-02T08:30:00Z"
        });

        let item: ItineraryItem = serde_json::from_value(payload).unwrap();
        assert_eq!(item.kind.item_type(), ItineraryItemType::Flight);
        assert_eq!(item.trip_id, None);
        assert_eq!(
            item.scheduled_at(),
            Utc.with_ymd_and_hms(2026, 11, 2, 8, 30, 0).unwrap()
        );
        let ItineraryKind::Flight {
            transport_carrier,
            transport_number,
            ..
        } = &item.kind
        else {
            unreachable!("expected a flight");
        };
        assert_eq!(transport_carrier.as_deref(), Some("TAP"));
        assert_eq!(transport_number, &None);
    }

    #[test]
    fn test_ground_item_uses_short_tag() {
        let payload = json!({
            "itinerary_item_id": "2f1c0d9e-1b2a-4c3d-8e4f-5a6b7c8d9e0f",
            "created_by_user_id": "6f1d2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "type": "ground",
            "origin_detail": "Lisboa Santa Apolonia",
            "destination_detail": "Porto Campanha",
            "departure_datetime": "2026-11-05T09:00:00Z",
            "arrival_datetime": "2026-11-05T12:00:00Z"
        });

        let item: ItineraryItem = serde_json::from_value(payload).unwrap();
        assert_eq!(
            item.kind.item_type(),
            ItineraryItemType::GroundTransportation
        );
        assert_eq!(item.kind.item_type().label(), "Ground transport");
    }

    #[test]
    fn test_explicit_itinerary_datetime_wins() {
        let payload = json!({
            "itinerary_item_id": "2f1c0d9e-1b2a-4c3d-8e4f-5a6b7c8d9e0f",
            "created_by_user_id": "6f1d2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "itinerary_datetime": "2026-11-03T15:00:00Z",
            "type": "accommodation",
            "address": "Rua Augusta 1",
            "check_in_datetime": "2026-11-02T14:00:00Z",
            "check_out_datetime": "2026-11-06T11:00:00Z"
        });

        let item: ItineraryItem = serde_json::from_value(payload).unwrap();
        assert_eq!(
            item.scheduled_at(),
            Utc.with_ymd_and_hms(2026, 11, 3, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let payload = json!({
            "itinerary_item_id": "2f1c0d9e-1b2a-4c3d-8e4f-5a6b7c8d9e0f",
            "created_by_user_id": "6f1d2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "type": "cruise"
        });
        assert!(serde_json::from_value::<ItineraryItem>(payload).is_err());
    }

    #[test]
    fn test_new_item_omits_unset_fields() {
        let trip = Uuid::nil();
        let body = NewItineraryItem::new(ItineraryItemType::CarRental)
            .for_trip(trip)
            .with_notes("compact");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "trip_id": "00000000-0000-0000-0000-000000000000",
                "type": "car_rental",
                "notes": "compact"
            })
        );
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ItineraryItemUpdate::default();
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));

        let update = ItineraryItemUpdate {
            item_type: Some(ItineraryItemType::Activity),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "activity" })
        );
    }
}
