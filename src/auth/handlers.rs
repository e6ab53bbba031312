use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::auth::dto::{AuthResponse, LoginRequest};
use crate::auth::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = services::login(&state, &payload.email, &payload.password).await?;
    Ok(Json(response))
}
