//! Integration tests for the headless map endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn poi_marker<'a>(map: &'a Value, poi_id: &str) -> &'a Value {
    map["scene"]["markers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|marker| marker["key"]["kind"] == "poi" && marker["key"]["id"] == poi_id)
        .unwrap()
}

#[tokio::test]
async fn test_snapshot_before_any_tour_is_empty() {
    let app = common::build_test_app();

    let (status, map) = common::get_json(app, "/api/v1/map").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["scene"]["loaded"], true);
    assert!(map["scene"]["markers"].as_array().unwrap().is_empty());
    assert_eq!(map["fit_state"], "not_fitted");
    assert_eq!(map["has_user_location"], false);
    assert_eq!(map["is_3d"], false);
}

#[tokio::test]
async fn test_loading_a_tour_draws_route_markers_and_fits_once() {
    // Arrange
    let app = common::build_test_app();

    // Act
    common::load_tour(app.clone(), common::LONDON).await;
    let (_, map) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(map["fit_state"], "fitted");
    assert!(map["scene"]["sources"]["tour-route"].is_object());
    let markers = map["scene"]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 6);
    let current = poi_marker(&map, "poi-1-westminster");
    assert_eq!(current["label"], "1");
    assert_eq!(current["style"]["category"], "current");
    assert_eq!(poi_marker(&map, "poi-6-seven-dials")["label"], "6");
    assert_eq!(markers.last().unwrap()["key"]["id"], "poi-1-westminster");
}

#[tokio::test]
async fn test_switching_tours_replaces_markers() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let loaded = common::load_tour(app.clone(), common::BRIXTON).await;
    let (_, map) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(loaded["route"], "installed");
    let markers = map["scene"]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 5);
    assert!(
        markers
            .iter()
            .all(|marker| marker["key"]["id"].as_str().unwrap().starts_with("brixton-"))
    );
    let layers = map["scene"]["layers"].as_array().unwrap();
    assert_eq!(
        layers.iter().filter(|layer| layer["id"] == "tour-route-line").count(),
        1
    );
}

#[tokio::test]
async fn test_marker_click_selects_poi_and_reports_it() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let (status, json) = common::post_empty(
        app.clone(),
        "/api/v1/map/markers/poi-4-trafalgar/click",
    )
    .await;
    let (_, map) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["poi_selected"]["poi"]["id"], "poi-4-trafalgar");
    assert_eq!(json["navigation"]["current_index"], 3);
    assert_eq!(json["navigation"]["event_ids"].as_array().unwrap().len(), 2);
    assert_eq!(poi_marker(&map, "poi-4-trafalgar")["style"]["category"], "current");
    assert_eq!(poi_marker(&map, "poi-1-westminster")["style"]["category"], "visited");
    assert_eq!(poi_marker(&map, "poi-2-parliament")["style"]["category"], "upcoming");
}

#[tokio::test]
async fn test_marker_click_on_unknown_poi_returns_404() {
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    let (status, json) =
        common::post_empty(app, "/api/v1/map/markers/brixton-1-station/click").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "poi_not_found");
}

#[tokio::test]
async fn test_recenter_fits_bounds_of_loaded_tour() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/map/recenter",
        &json!({ "padding": 80, "max_zoom": 15 }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["camera_move"]["kind"], "fit_bounds");
    assert_eq!(json["camera_move"]["options"]["padding"], 80.0);
    assert_eq!(json["camera_move"]["options"]["max_zoom"], 15.0);
}

#[tokio::test]
async fn test_recenter_without_tour_flies_to_default_center() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(app, "/api/v1/map/recenter", &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["camera_move"]["kind"], "fly_to");
    assert_eq!(json["camera_move"]["zoom"], 12.0);
}

#[tokio::test]
async fn test_fly_to_poi_uses_focus_zoom_and_rejects_unknown_poi() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let (status, target) = common::post_json(
        app.clone(),
        "/api/v1/map/pois/poi-3-whitehall/fly-to",
        &json!({}),
    )
    .await;
    let (missing_status, missing) =
        common::post_json(app, "/api/v1/map/pois/ghost/fly-to", &json!({ "zoom": 18 })).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(target["zoom"], 15.0);
    assert_eq!(target["duration_ms"], 1000);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "poi_not_found");
}

#[tokio::test]
async fn test_buildings_toggle_adds_and_removes_layer() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, enabled) =
        common::post_json(app.clone(), "/api/v1/map/buildings", &json!({ "enabled": true }))
            .await;
    let (_, with_buildings) = common::get_json(app.clone(), "/api/v1/map").await;
    let (_, disabled) =
        common::post_json(app.clone(), "/api/v1/map/buildings", &json!({ "enabled": false }))
            .await;
    let (_, without_buildings) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enabled["enabled"], true);
    assert_eq!(with_buildings["is_3d"], true);
    assert!(
        with_buildings["scene"]["layers"]
            .as_array()
            .unwrap()
            .iter()
            .any(|layer| layer["id"] == "vh-3d-buildings")
    );
    assert_eq!(disabled["enabled"], false);
    assert_eq!(without_buildings["is_3d"], false);
    assert!(without_buildings["scene"]["layers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_locate_shows_then_clears_user_puck() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, found) = common::post_json(
        app.clone(),
        "/api/v1/map/locate",
        &json!({ "lng": -0.1281, "lat": 51.508 }),
    )
    .await;
    let (_, with_puck) = common::get_json(app.clone(), "/api/v1/map").await;
    let (_, lost) = common::post_json(
        app.clone(),
        "/api/v1/map/locate",
        &json!({ "error": "denied" }),
    )
    .await;
    let (_, without_puck) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["has_user_location"], true);
    assert!(
        with_puck["scene"]["markers"]
            .as_array()
            .unwrap()
            .iter()
            .any(|marker| marker["key"]["kind"] == "user_location")
    );
    assert!(with_puck["scene"]["camera"]["zoom"].as_f64().unwrap() >= 15.0);
    assert_eq!(lost["has_user_location"], false);
    assert!(without_puck["scene"]["markers"].as_array().unwrap().is_empty());
}
