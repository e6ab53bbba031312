use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Ride record in the database. Created via booking or one-time seeding,
/// never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: Uuid,
    pub pickup: String,
    pub dropoff: String,
    pub requested_at: OffsetDateTime,
    pub driver: String,
}

/// Ride fields under the caller's control plus the server-assigned
/// timestamp; the store assigns the id on insert.
#[derive(Debug, Clone)]
pub struct NewRide {
    pub pickup: String,
    pub dropoff: String,
    pub requested_at: OffsetDateTime,
    pub driver: String,
}

impl Ride {
    pub async fn count(db: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rides")
            .fetch_one(db)
            .await
    }

    /// All rides in store order; no sort is applied.
    pub async fn find_all(db: &PgPool) -> Result<Vec<Ride>, sqlx::Error> {
        sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, pickup, dropoff, requested_at, driver
            FROM rides
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn create(db: &PgPool, new: &NewRide) -> Result<Ride, sqlx::Error> {
        sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (pickup, dropoff, requested_at, driver)
            VALUES ($1, $2, $3, $4)
            RETURNING id, pickup, dropoff, requested_at, driver
            "#,
        )
        .bind(&new.pickup)
        .bind(&new.dropoff)
        .bind(new.requested_at)
        .bind(&new.driver)
        .fetch_one(db)
        .await
    }
}
