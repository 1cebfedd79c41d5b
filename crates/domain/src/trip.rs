//! Trip resource as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A trip owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Backend-assigned id.
    pub trip_id: Uuid,
    /// Trip name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Owner of the trip.
    pub created_by_user_id: Uuid,
    /// First day of the trip.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Last day of the trip.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trip_deserializes_backend_payload() {
        let json = r#"{
            "trip_id": "0b9f7c1e-8a57-4a8b-9d0c-3d1f5b7a2c11",
            "name": "Lisbon",
            "created_by_user_id": "6f1d2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "start_date": "2026-11-02T00:00:00Z",
            "created_at": "2026-10-01T12:00:00Z",
            "updated_at": "2026-10-01T12:00:00Z"
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.name, "Lisbon");
        assert_eq!(trip.description, None);
        assert_eq!(trip.end_date, None);
        assert_eq!(
            trip.start_date,
            Some(Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap())
        );
    }
}
