//! Routes for the headless map.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use wayfarer_core::location::LocationError;
use wayfarer_core::map::{CameraTarget, MarkerKey};
use wayfarer_core::model::{LngLat, PoiId};
use wayfarer_map::camera::{CameraMove, FitState};
use wayfarer_map::config::FitOptions;
use wayfarer_map::facade::PoiSelected;
use wayfarer_map::surface::HeadlessMap;
use wayfarer_navigation::application::command_handlers;

use crate::error::ApiError;
use crate::routes::navigation::{CommandResponse, respond};
use crate::state::AppState;

/// Response body for GET /api/v1/map.
#[derive(Debug, Serialize)]
pub struct MapResponse {
    /// Everything currently on the map.
    pub scene: HeadlessMap,
    /// Whether the current tour load has been framed.
    pub fit_state: FitState,
    /// Whether the user-location puck is shown.
    pub has_user_location: bool,
    /// Whether 3D buildings are shown.
    pub is_3d: bool,
}

/// Response body for a marker click.
#[derive(Debug, Serialize)]
pub struct MarkerClickResponse {
    /// The notification raised for the host page.
    pub poi_selected: PoiSelected,
    /// Navigation after the selection.
    pub navigation: CommandResponse,
}

/// Response body for POST /recenter.
#[derive(Debug, Serialize)]
pub struct RecenterResponse {
    /// The camera command issued, if the map was ready.
    pub camera_move: Option<CameraMove>,
}

/// Request body for POST /pois/{poi_id}/fly-to.
#[derive(Debug, Default, Deserialize)]
pub struct FlyToRequest {
    /// Target zoom; the configured focus zoom when unset.
    #[serde(default)]
    pub zoom: Option<f64>,
    /// Animation duration; the configured duration when unset.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Request and response body for POST /buildings.
#[derive(Debug, Deserialize, Serialize)]
pub struct BuildingsBody {
    /// Whether 3D buildings should be shown.
    pub enabled: bool,
}

/// Why the client could not determine its position.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    /// Permission refused.
    Denied,
    /// No fix available.
    Unavailable,
    /// Gave up waiting.
    Timeout,
}

impl From<LocationFailure> for LocationError {
    fn from(failure: LocationFailure) -> Self {
        match failure {
            LocationFailure::Denied => Self::Denied,
            LocationFailure::Unavailable => Self::Unavailable,
            LocationFailure::Timeout => Self::Timeout,
        }
    }
}

/// Request body for POST /locate: the client relays its geolocation result.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocateRequest {
    /// A position fix.
    Fix {
        /// Longitude in degrees.
        lng: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// The lookup failed.
    Failed {
        /// Failure reason.
        error: LocationFailure,
    },
}

/// Response body for POST /locate.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    /// Whether the user-location puck is shown.
    pub has_user_location: bool,
}

/// GET /api/v1/map
#[instrument(skip(state))]
async fn snapshot(State(state): State<AppState>) -> Json<MapResponse> {
    let session = state.session.lock().await;
    Json(MapResponse {
        scene: session.map.map().clone(),
        fit_state: session.map.fit_state(),
        has_user_location: session.map.has_user_location(),
        is_3d: session.map.is_3d(),
    })
}

/// POST /api/v1/map/markers/{poi_id}/click
#[instrument(skip(state))]
async fn marker_click(
    State(state): State<AppState>,
    Path(poi_id): Path<PoiId>,
) -> Result<Json<MarkerClickResponse>, ApiError> {
    let (poi_selected, result, route_request) = {
        let mut guard = state.session.lock().await;
        let session = &mut *guard;
        let key = MarkerKey::Poi(poi_id.clone());
        let (selected, result) = command_handlers::run_tracked(&mut session.store, |store| {
            session.map.marker_clicked(store, &key)
        });
        let poi_selected = selected.ok_or(ApiError::PoiNotFound(poi_id))?;
        (poi_selected, result, session.sync())
    };

    info!(poi_id = %poi_selected.poi.id, "marker click handled");
    let navigation = respond(&state, result, route_request).await;
    Ok(Json(MarkerClickResponse {
        poi_selected,
        navigation,
    }))
}

/// POST /api/v1/map/recenter
#[instrument(skip(state))]
async fn recenter(
    State(state): State<AppState>,
    Json(options): Json<FitOptions>,
) -> Json<RecenterResponse> {
    let mut guard = state.session.lock().await;
    let session = &mut *guard;
    let camera_move = session.map.recenter(session.store.state(), &options);
    Json(RecenterResponse { camera_move })
}

/// POST /api/v1/map/pois/{poi_id}/fly-to
#[instrument(skip(state))]
async fn fly_to(
    State(state): State<AppState>,
    Path(poi_id): Path<PoiId>,
    Json(request): Json<FlyToRequest>,
) -> Result<Json<CameraTarget>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = &mut *guard;
    session
        .map
        .fly_to_poi(session.store.state(), &poi_id, request.zoom, request.duration_ms)
        .map(Json)
        .ok_or(ApiError::PoiNotFound(poi_id))
}

/// POST /api/v1/map/buildings
#[instrument(skip(state))]
async fn buildings(
    State(state): State<AppState>,
    Json(request): Json<BuildingsBody>,
) -> Json<BuildingsBody> {
    let enabled = state.session.lock().await.map.set_3d(request.enabled);
    Json(BuildingsBody { enabled })
}

/// POST /api/v1/map/locate
#[instrument(skip(state))]
async fn locate(
    State(state): State<AppState>,
    Json(request): Json<LocateRequest>,
) -> Json<LocateResponse> {
    let result = match request {
        LocateRequest::Fix { lng, lat } => Ok(LngLat::new(lng, lat)),
        LocateRequest::Failed { error } => Err(LocationError::from(error)),
    };
    let has_user_location = state.session.lock().await.map.apply_user_location(result);
    Json(LocateResponse { has_user_location })
}

/// Returns the router for the map.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/map", get(snapshot))
        .route("/api/v1/map/markers/{poi_id}/click", post(marker_click))
        .route("/api/v1/map/recenter", post(recenter))
        .route("/api/v1/map/pois/{poi_id}/fly-to", post(fly_to))
        .route("/api/v1/map/buildings", post(buildings))
        .route("/api/v1/map/locate", post(locate))
}
