//! Route overlay loading.
//!
//! Loading is split in two so the surface is never borrowed across the
//! network wait: [`RouteLoader::begin`] clears the overlay and issues a
//! [`RouteRequest`], the host fetches the document, and
//! [`RouteLoader::complete`] installs it. Each `begin` bumps a per-overlay
//! generation; a completion whose generation is no longer the newest is
//! dropped, so a slow response for a previous tour can never draw over the
//! current one.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};
use wayfarer_core::map::{LayerSpec, MapSurface};
use wayfarer_core::route::{RouteFetchError, RouteFetcher};

/// A route fetch in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// Overlay the document is for.
    pub overlay_id: String,
    /// Document location.
    pub url: String,
    /// Generation this request was issued under.
    pub generation: u64,
}

/// What became of a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The overlay is on the map.
    Installed,
    /// Fetch or parse failed; the map has no overlay.
    Degraded,
    /// A newer request superseded this one; nothing was changed.
    Stale,
}

/// Source id backing an overlay.
#[must_use]
pub fn source_id(overlay_id: &str) -> String {
    format!("{overlay_id}-route")
}

/// Line layer id of an overlay.
#[must_use]
pub fn layer_id(overlay_id: &str) -> String {
    format!("{overlay_id}-route-line")
}

/// Installs and replaces named route overlays.
#[derive(Debug, Clone)]
pub struct RouteLoader {
    color: String,
    width: f64,
    generations: HashMap<String, u64>,
}

impl RouteLoader {
    /// Creates a loader that strokes routes with `color` at `width` pixels.
    #[must_use]
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            generations: HashMap::new(),
        }
    }

    /// Removes the overlay and invalidates every outstanding request for it.
    pub fn clear(&mut self, map: &mut dyn MapSurface, overlay_id: &str) {
        *self.generations.entry(overlay_id.to_owned()).or_default() += 1;
        remove_overlay(map, overlay_id);
    }

    /// Clears the overlay and issues a request for the document at `url`.
    pub fn begin(&mut self, map: &mut dyn MapSurface, overlay_id: &str, url: &str) -> RouteRequest {
        self.clear(map, overlay_id);
        let generation = self.generations[overlay_id];
        debug!(overlay_id, url, generation, "route request issued");
        RouteRequest {
            overlay_id: overlay_id.to_owned(),
            url: url.to_owned(),
            generation,
        }
    }

    /// Whether `request` is still the newest for its overlay.
    #[must_use]
    pub fn is_current(&self, request: &RouteRequest) -> bool {
        self.generations.get(&request.overlay_id) == Some(&request.generation)
    }

    /// Applies the fetch result of `request`. Failures leave the map without
    /// an overlay and are only logged.
    pub fn complete(
        &self,
        map: &mut dyn MapSurface,
        request: &RouteRequest,
        result: Result<serde_json::Value, RouteFetchError>,
    ) -> RouteOutcome {
        if !self.is_current(request) {
            debug!(
                overlay_id = %request.overlay_id,
                url = %request.url,
                generation = request.generation,
                "dropping superseded route response"
            );
            return RouteOutcome::Stale;
        }

        let document = match result {
            Ok(document) => document,
            Err(error) => {
                warn!(overlay_id = %request.overlay_id, %error, "route overlay unavailable");
                return RouteOutcome::Degraded;
            }
        };

        remove_overlay(map, &request.overlay_id);
        let source = source_id(&request.overlay_id);
        map.add_geojson_source(&source, document);
        map.add_layer(LayerSpec::Line {
            id: layer_id(&request.overlay_id),
            source,
            color: self.color.clone(),
            width: self.width,
        });
        debug!(overlay_id = %request.overlay_id, url = %request.url, "route overlay installed");
        RouteOutcome::Installed
    }

    /// Replaces the overlay with the document at `url` in one step.
    pub async fn load_route(
        &mut self,
        map: &mut dyn MapSurface,
        fetcher: &dyn RouteFetcher,
        overlay_id: &str,
        url: &str,
    ) -> RouteOutcome {
        let request = self.begin(map, overlay_id, url);
        let result = fetcher.fetch(&request.url).await;
        self.complete(map, &request, result)
    }
}

fn remove_overlay(map: &mut dyn MapSurface, overlay_id: &str) {
    let layer = layer_id(overlay_id);
    if map.has_layer(&layer) {
        map.remove_layer(&layer);
    }
    let source = source_id(overlay_id);
    if map.has_source(&source) {
        map.remove_source(&source);
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::map::{LayerSpec, MapInit, MapSurface};
    use wayfarer_core::model::LngLat;
    use wayfarer_test_support::StubRouteFetcher;

    use super::*;
    use crate::surface::HeadlessMap;

    const LONDON: &str = "/data/london-route.geojson";
    const BRIXTON: &str = "/data/brixton-route.geojson";

    fn map() -> HeadlessMap {
        let mut map = HeadlessMap::new(MapInit {
            center: LngLat::new(-0.1246, 51.5007),
            zoom: 14.0,
            pitch: 0.0,
            bearing: 0.0,
            style_url: "style.json".to_owned(),
        });
        map.finish_loading();
        map
    }

    fn fetcher() -> StubRouteFetcher {
        StubRouteFetcher::new()
            .with_document(
                LONDON,
                StubRouteFetcher::line_document(&[[-0.1246, 51.5007], [-0.1276, 51.5034]]),
            )
            .with_document(
                BRIXTON,
                StubRouteFetcher::line_document(&[[-0.1145, 51.4613], [-0.1160, 51.4620]]),
            )
            .with_unreachable("/data/offline.geojson")
    }

    fn loader() -> RouteLoader {
        RouteLoader::new("#1976d2", 4.0)
    }

    #[tokio::test]
    async fn test_load_route_installs_line_layer_over_source() {
        // Arrange
        let mut map = map();
        let mut loader = loader();

        // Act
        let outcome = loader
            .load_route(&mut map, &fetcher(), "tour", LONDON)
            .await;

        // Assert
        assert_eq!(outcome, RouteOutcome::Installed);
        assert_eq!(
            map.source("tour-route").unwrap()["features"][0]["geometry"]["type"],
            "LineString"
        );
        assert_eq!(
            map.layers(),
            &[LayerSpec::Line {
                id: "tour-route-line".to_owned(),
                source: "tour-route".to_owned(),
                color: "#1976d2".to_owned(),
                width: 4.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_reloading_same_overlay_replaces_instead_of_appending() {
        let mut map = map();
        let mut loader = loader();
        let fetcher = fetcher();

        loader.load_route(&mut map, &fetcher, "tour", LONDON).await;
        loader.load_route(&mut map, &fetcher, "tour", LONDON).await;
        let outcome = loader.load_route(&mut map, &fetcher, "tour", BRIXTON).await;

        assert_eq!(outcome, RouteOutcome::Installed);
        assert_eq!(map.layers().len(), 1);
        assert_eq!(
            map.source("tour-route").unwrap()["features"][0]["geometry"]["coordinates"][0][0],
            -0.1145
        );
    }

    #[tokio::test]
    async fn test_http_failure_degrades_to_no_overlay() {
        let mut map = map();
        let mut loader = loader();
        let fetcher = fetcher();
        loader.load_route(&mut map, &fetcher, "tour", LONDON).await;

        let missing = loader
            .load_route(&mut map, &fetcher, "tour", "/data/missing.geojson")
            .await;

        assert_eq!(missing, RouteOutcome::Degraded);
        assert!(!map.has_layer("tour-route-line"));
        assert!(!map.has_source("tour-route"));
    }

    #[tokio::test]
    async fn test_network_failure_degrades_to_no_overlay() {
        let mut map = map();
        let mut loader = loader();

        let outcome = loader
            .load_route(&mut map, &fetcher(), "tour", "/data/offline.geojson")
            .await;

        assert_eq!(outcome, RouteOutcome::Degraded);
        assert!(map.layers().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_is_not_applied_over_newer_tour() {
        // Arrange
        let mut map = map();
        let mut loader = loader();
        let fetcher = fetcher();
        let london = loader.begin(&mut map, "tour", LONDON);
        let brixton = loader.begin(&mut map, "tour", BRIXTON);

        // Act: responses arrive out of order.
        let brixton_outcome =
            loader.complete(&mut map, &brixton, fetcher.fetch(&brixton.url).await);
        let london_outcome = loader.complete(&mut map, &london, fetcher.fetch(&london.url).await);

        // Assert
        assert_eq!(brixton_outcome, RouteOutcome::Installed);
        assert_eq!(london_outcome, RouteOutcome::Stale);
        assert_eq!(
            map.source("tour-route").unwrap()["features"][0]["geometry"]["coordinates"][0][0],
            -0.1145
        );
    }

    #[test]
    fn test_clear_invalidates_outstanding_request() {
        let mut map = map();
        let mut loader = loader();
        let request = loader.begin(&mut map, "tour", LONDON);

        loader.clear(&mut map, "tour");

        assert!(!loader.is_current(&request));
        let outcome = loader.complete(
            &mut map,
            &request,
            Ok(StubRouteFetcher::line_document(&[[0.0, 0.0], [1.0, 1.0]])),
        );
        assert_eq!(outcome, RouteOutcome::Stale);
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_generations_are_tracked_per_overlay() {
        let mut map = map();
        let mut loader = loader();
        let tour = loader.begin(&mut map, "tour", LONDON);

        let other = loader.begin(&mut map, "alt", BRIXTON);

        assert!(loader.is_current(&tour));
        assert!(loader.is_current(&other));
    }
}
