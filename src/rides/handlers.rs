use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::rides::dto::{BookRideRequest, RideResponse};
use crate::rides::services;
use crate::state::AppState;

pub fn ride_routes() -> Router<AppState> {
    Router::new().route("/rides", get(list_rides).post(book_ride))
}

#[instrument(skip(state))]
pub async fn list_rides(
    State(state): State<AppState>,
) -> Result<Json<Vec<RideResponse>>, ApiError> {
    let rides = services::list_rides(&state).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn book_ride(
    State(state): State<AppState>,
    Json(payload): Json<BookRideRequest>,
) -> Result<Json<RideResponse>, ApiError> {
    let ride = services::book_ride(&state, &payload.pickup, &payload.dropoff).await?;
    Ok(Json(RideResponse::from(ride)))
}
