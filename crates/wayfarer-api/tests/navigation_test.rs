//! Integration tests for tour listing and navigation over the bundled catalog.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use wayfarer_test_support::StubRouteFetcher;

#[tokio::test]
async fn test_list_tours_returns_bundled_catalog() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/tours").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["tours"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tour| tour["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![common::LONDON, common::BRIXTON]);
}

#[tokio::test]
async fn test_walk_through_london_tour() {
    // Arrange
    let app = common::build_test_app();
    let loaded = common::load_tour(app.clone(), common::LONDON).await;
    assert_eq!(loaded["current_poi_id"], "poi-1-westminster");
    assert_eq!(loaded["route"], "installed");

    // Act
    common::post_empty(app.clone(), "/api/v1/navigation/next").await;
    common::post_empty(app.clone(), "/api/v1/navigation/next").await;
    let (status, back) = common::post_empty(app.clone(), "/api/v1/navigation/previous").await;
    let (_, view) = common::get_json(app, "/api/v1/navigation").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(back["current_index"], 1);
    assert_eq!(back["current_poi_id"], "poi-2-parliament");
    assert_eq!(
        view["visited_ids"],
        json!(["poi-1-westminster", "poi-2-parliament", "poi-3-whitehall"])
    );
    assert_eq!(view["tour"]["id"], common::LONDON);
    assert_eq!(view["pois"].as_array().unwrap().len(), 6);
    assert_eq!(view["pois"][1]["category"], "current");
    assert_eq!(view["pois"][2]["category"], "visited");
    assert_eq!(view["pois"][3]["category"], "upcoming");
    assert!(view["pois"][0]["description"].is_string());
}

#[tokio::test]
async fn test_select_unknown_poi_is_a_no_op() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/navigation/select",
        &json!({ "poi_id": "ghost" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_poi_id"], "poi-1-westminster");
    assert!(json["event_ids"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_load_unknown_tour_returns_404_and_keeps_session() {
    // Arrange
    let app = common::build_test_app();
    common::load_tour(app.clone(), common::LONDON).await;

    // Act
    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/navigation/load-tour",
        &json!({ "tour_id": "atlantis" }),
    )
    .await;
    let (_, view) = common::get_json(app, "/api/v1/navigation").await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "tour_not_found");
    assert_eq!(view["tour"]["id"], common::LONDON);
}

#[tokio::test]
async fn test_unreachable_route_degrades_without_failing_the_load() {
    // Arrange
    let state = common::build_test_state_with(
        StubRouteFetcher::new().with_unreachable("/data/london-vivid-history-route.geojson"),
    );
    let app = common::router_for(state);

    // Act
    let loaded = common::load_tour(app.clone(), common::LONDON).await;
    let (_, map) = common::get_json(app, "/api/v1/map").await;

    // Assert
    assert_eq!(loaded["route"], "degraded");
    assert_eq!(loaded["current_poi_id"], "poi-1-westminster");
    assert!(map["scene"]["sources"].get("tour-route").is_none());
    assert_eq!(map["scene"]["markers"].as_array().unwrap().len(), 6);
}
