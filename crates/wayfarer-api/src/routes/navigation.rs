//! Routes for tour navigation.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use wayfarer_core::model::{PoiId, TourId};
use wayfarer_map::route::{RouteOutcome, RouteRequest};
use wayfarer_navigation::application::command_handlers::{self, NavigationCommandResult};
use wayfarer_navigation::application::query_handlers::{self, NavigationView};
use wayfarer_navigation::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /load-tour.
#[derive(Debug, Deserialize)]
pub struct LoadTourRequest {
    /// The tour to enter.
    pub tour_id: TourId,
}

/// Request body for POST /select.
#[derive(Debug, Deserialize)]
pub struct SelectPoiRequest {
    /// The stop to jump to.
    pub poi_id: PoiId,
}

/// Query string for GET /api/v1/navigation.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    /// Narration language key.
    #[serde(default = "default_language")]
    pub lang: String,
}

fn default_language() -> String {
    "en".to_owned()
}

/// Response body returned after a navigation command is handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Current index after the command.
    pub current_index: usize,
    /// Current stop after the command.
    pub current_poi_id: Option<PoiId>,
    /// IDs of the notifications the command recorded.
    pub event_ids: Vec<Uuid>,
    /// What became of the route overlay, when the command replaced it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteOutcome>,
}

/// Loads the route outside the session lock, if the sync asked for one.
pub(crate) async fn respond(
    state: &AppState,
    result: NavigationCommandResult,
    route_request: Option<RouteRequest>,
) -> CommandResponse {
    let route = match route_request {
        Some(request) => Some(state.load_route(request).await),
        None => None,
    };
    CommandResponse {
        current_index: result.current_index,
        current_poi_id: result.current_poi_id,
        event_ids: result.event_ids,
        route,
    }
}

/// POST /api/v1/navigation/load-tour
#[instrument(skip(state, request), fields(tour_id = %request.tour_id))]
async fn load_tour(
    State(state): State<AppState>,
    Json(request): Json<LoadTourRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::LoadTour {
        correlation_id: Uuid::new_v4(),
        tour_id: request.tour_id,
    };

    info!(correlation_id = %command.correlation_id, "handling load_tour command");

    let (result, route_request) = {
        let mut session = state.session.lock().await;
        let result = command_handlers::handle_load_tour(
            &command,
            &mut session.store,
            state.tour_repository.as_ref(),
        )
        .await?;
        (result, session.sync())
    };

    Ok(Json(respond(&state, result, route_request).await))
}

/// POST /api/v1/navigation/next
#[instrument(skip(state))]
async fn next(State(state): State<AppState>) -> Json<CommandResponse> {
    let command = commands::AdvanceToNextPoi {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling next command");

    let (result, route_request) = {
        let mut session = state.session.lock().await;
        let result = command_handlers::handle_next(&command, &mut session.store);
        (result, session.sync())
    };

    Json(respond(&state, result, route_request).await)
}

/// POST /api/v1/navigation/previous
#[instrument(skip(state))]
async fn previous(State(state): State<AppState>) -> Json<CommandResponse> {
    let command = commands::ReturnToPreviousPoi {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling previous command");

    let (result, route_request) = {
        let mut session = state.session.lock().await;
        let result = command_handlers::handle_previous(&command, &mut session.store);
        (result, session.sync())
    };

    Json(respond(&state, result, route_request).await)
}

/// POST /api/v1/navigation/select
#[instrument(skip(state, request), fields(poi_id = %request.poi_id))]
async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectPoiRequest>,
) -> Json<CommandResponse> {
    let command = commands::SelectPoi {
        correlation_id: Uuid::new_v4(),
        poi_id: request.poi_id,
    };

    info!(correlation_id = %command.correlation_id, "handling select command");

    let (result, route_request) = {
        let mut session = state.session.lock().await;
        let result = command_handlers::handle_select_poi(&command, &mut session.store);
        (result, session.sync())
    };

    Json(respond(&state, result, route_request).await)
}

/// GET /api/v1/navigation
#[instrument(skip(state))]
async fn view(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Json<NavigationView> {
    let session = state.session.lock().await;
    Json(query_handlers::navigation_view(session.store.state(), &query.lang))
}

/// Returns the router for navigation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/navigation", get(view))
        .route("/api/v1/navigation/load-tour", post(load_tour))
        .route("/api/v1/navigation/next", post(next))
        .route("/api/v1/navigation/previous", post(previous))
        .route("/api/v1/navigation/select", post(select))
}
