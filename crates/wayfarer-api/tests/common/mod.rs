//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wayfarer_catalog::Catalog;
use wayfarer_core::event::Clock;
use wayfarer_map::config::MapConfig;
use wayfarer_test_support::{FixedClock, StubRouteFetcher};

use wayfarer_api::routes;
use wayfarer_api::state::AppState;

pub const LONDON: &str = "london-vivid-history";
pub const BRIXTON: &str = "brixton-vivid-history";

const CATALOG: &str = include_str!("../../../../data/catalog.yaml");
const LONDON_ROUTE: &str = include_str!("../../../../data/london-vivid-history-route.geojson");
const BRIXTON_ROUTE: &str = include_str!("../../../../data/brixton-vivid-history-route.geojson");

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Route fetcher serving the bundled route documents.
pub fn bundled_routes() -> StubRouteFetcher {
    StubRouteFetcher::new()
        .with_document(
            "/data/london-vivid-history-route.geojson",
            serde_json::from_str(LONDON_ROUTE).unwrap(),
        )
        .with_document(
            "/data/brixton-vivid-history-route.geojson",
            serde_json::from_str(BRIXTON_ROUTE).unwrap(),
        )
}

/// Build the app state over the bundled catalog and route documents.
pub fn build_test_state() -> AppState {
    build_test_state_with(bundled_routes())
}

/// Build the app state over the bundled catalog with a custom fetcher.
pub fn build_test_state_with(route_fetcher: StubRouteFetcher) -> AppState {
    let catalog = Catalog::from_yaml_str(CATALOG).unwrap();
    AppState::new(
        fixed_clock(),
        Arc::new(catalog),
        Arc::new(route_fetcher),
        MapConfig::default(),
    )
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    router_for(build_test_state())
}

/// Build the full app router over an existing state.
pub fn router_for(state: AppState) -> Router {
    routes::api_router().with_state(state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Load `tour_id` and return the command response.
pub async fn load_tour(app: Router, tour_id: &str) -> serde_json::Value {
    let (status, json) = post_json(
        app,
        "/api/v1/navigation/load-tour",
        &serde_json::json!({ "tour_id": tour_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "load-tour failed: {json}");
    json
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
