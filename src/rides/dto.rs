use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::rides::repo::Ride;

/// Request body for booking a ride. Any extra fields a client sends
/// (id, timestamp, driver) are ignored; those are server-assigned.
#[derive(Debug, Deserialize)]
pub struct BookRideRequest {
    pub pickup: String,
    pub dropoff: String,
}

#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: Uuid,
    pub pickup: String,
    pub dropoff: String,
    #[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
    pub driver: String,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            pickup: ride.pickup,
            dropoff: ride.dropoff,
            requested_at: ride.requested_at,
            driver: ride.driver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn ride_response_uses_camel_case_requested_at() {
        let response = RideResponse {
            id: Uuid::new_v4(),
            pickup: "5th Avenue".into(),
            dropoff: "Central Park".into(),
            requested_at: datetime!(2026-01-15 09:30:00 UTC),
            driver: "Alex Rider".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"requestedAt\":\"2026-01-15T09:30:00Z\""));
        assert!(json.contains("\"driver\":\"Alex Rider\""));
    }

    #[test]
    fn book_request_ignores_extra_fields() {
        let req: BookRideRequest = serde_json::from_str(
            r#"{"pickup":"A","dropoff":"B","driver":"Mallory","requestedAt":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.pickup, "A");
        assert_eq!(req.dropoff, "B");
    }
}
