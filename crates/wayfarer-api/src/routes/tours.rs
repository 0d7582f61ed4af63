//! Tour listing.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::instrument;
use wayfarer_core::model::Tour;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for GET /api/v1/tours.
#[derive(Debug, Serialize)]
pub struct TourListResponse {
    /// Every tour the data source knows about.
    pub tours: Vec<Tour>,
}

/// GET /api/v1/tours
#[instrument(skip(state))]
async fn list_tours(State(state): State<AppState>) -> Result<Json<TourListResponse>, ApiError> {
    let tours = state.tour_repository.list_tours().await?;
    Ok(Json(TourListResponse { tours }))
}

/// Returns the tour listing router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/tours", get(list_tours))
}
