use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::error::ApiError;
use crate::rides::repo::{NewRide, Ride};
use crate::state::AppState;

/// Placeholder driver for live bookings. A dispatch subsystem would
/// replace this without touching the booking contract.
pub const BOOKED_DRIVER: &str = "Demo Driver";

/// Fixed demo ride inserted into an empty store. Its driver is distinct
/// from [`BOOKED_DRIVER`] so seed data is distinguishable from bookings.
pub const SEED_PICKUP: &str = "5th Avenue";
pub const SEED_DROPOFF: &str = "Central Park";
pub const SEED_DRIVER: &str = "Alex Rider";
const SEED_AGE: Duration = Duration::seconds(1800);

fn seed_ride() -> NewRide {
    NewRide {
        pickup: SEED_PICKUP.into(),
        dropoff: SEED_DROPOFF.into(),
        requested_at: OffsetDateTime::now_utc() - SEED_AGE,
        driver: SEED_DRIVER.into(),
    }
}

fn booked_ride(pickup: &str, dropoff: &str) -> NewRide {
    NewRide {
        pickup: pickup.into(),
        dropoff: dropoff.into(),
        requested_at: OffsetDateTime::now_utc(),
        driver: BOOKED_DRIVER.into(),
    }
}

/// All rides in store order, seeding the demo ride first if the store is
/// empty. The check-then-insert runs under `seed_lock` so concurrent
/// calls on an empty store seed at most once.
pub async fn list_rides(state: &AppState) -> Result<Vec<Ride>, ApiError> {
    {
        let _guard = state.seed_lock.lock().await;
        if Ride::count(&state.db).await? == 0 {
            let seeded = Ride::create(&state.db, &seed_ride()).await?;
            info!(ride_id = %seeded.id, "seeded demo ride into empty store");
        }
    }
    Ok(Ride::find_all(&state.db).await?)
}

/// Book a ride. The timestamp is stamped server-side and the driver is
/// the fixed placeholder; neither is taken from the caller.
pub async fn book_ride(state: &AppState, pickup: &str, dropoff: &str) -> Result<Ride, ApiError> {
    let pickup = pickup.trim();
    let dropoff = dropoff.trim();
    if pickup.is_empty() {
        return Err(ApiError::Validation("pickup is required".into()));
    }
    if dropoff.is_empty() {
        return Err(ApiError::Validation("dropoff is required".into()));
    }

    let ride = Ride::create(&state.db, &booked_ride(pickup, dropoff)).await?;
    info!(ride_id = %ride.id, pickup = %ride.pickup, dropoff = %ride.dropoff, "ride booked");
    Ok(ride)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ride_matches_fixed_demo_record() {
        let seed = seed_ride();
        assert_eq!(seed.pickup, "5th Avenue");
        assert_eq!(seed.dropoff, "Central Park");
        assert_eq!(seed.driver, "Alex Rider");

        let age = OffsetDateTime::now_utc() - seed.requested_at;
        assert!(age >= Duration::seconds(1800));
        assert!(age < Duration::seconds(1805));
    }

    #[test]
    fn booked_ride_stamps_current_time_and_placeholder_driver() {
        let before = OffsetDateTime::now_utc();
        let ride = booked_ride("Airport", "Downtown");
        let after = OffsetDateTime::now_utc();

        assert_eq!(ride.pickup, "Airport");
        assert_eq!(ride.dropoff, "Downtown");
        assert_eq!(ride.driver, "Demo Driver");
        assert!(ride.requested_at >= before && ride.requested_at <= after);
    }

    #[test]
    fn seed_and_booking_drivers_are_distinct() {
        assert_ne!(SEED_DRIVER, BOOKED_DRIVER);
    }

    #[tokio::test]
    async fn book_ride_rejects_empty_pickup() {
        let state = AppState::fake();
        let err = book_ride(&state, "  ", "Central Park").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn book_ride_rejects_empty_dropoff() {
        let state = AppState::fake();
        let err = book_ride(&state, "5th Avenue", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
