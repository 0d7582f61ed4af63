//! Host-supplied map configuration.

use serde::{Deserialize, Serialize};
use wayfarer_core::map::{FitBoundsOptions, MapInit, Padding};
use wayfarer_core::model::{LngLat, Poi};

/// Style used when the host does not supply one.
pub const DEFAULT_STYLE_URL: &str = "https://demotiles.maplibre.org/style.json";

/// Westminster, London.
pub const DEFAULT_CENTER: LngLat = LngLat::new(-0.1246, 51.5007);

/// Constants the sync engine needs from its host. Every field has a
/// default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map style document.
    pub style_url: String,
    /// Where the camera goes when there is nothing to show.
    pub default_center: LngLat,
    /// Zoom the surface is created with.
    pub initial_zoom: f64,
    /// City-overview zoom used with no POIs.
    pub overview_zoom: f64,
    /// Close inspection zoom used for a single POI.
    pub single_poi_zoom: f64,
    /// Zoom used when flying to one POI on request.
    pub poi_focus_zoom: f64,
    /// Padding around fitted bounds.
    pub fit_padding: Padding,
    /// Zoom cap when fitting bounds.
    pub fit_max_zoom: f64,
    /// Camera animation duration in milliseconds.
    pub animation_duration_ms: u64,
    /// Name the route overlay is registered under.
    pub overlay_id: String,
    /// Route stroke colour.
    pub route_color: String,
    /// Route stroke width in pixels.
    pub route_width: f64,
    /// The camera never zooms out below this when centring on the user.
    pub user_location_min_zoom: f64,
    /// Initial pitch in degrees.
    pub pitch: f64,
    /// Initial bearing in degrees.
    pub bearing: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style_url: DEFAULT_STYLE_URL.to_owned(),
            default_center: DEFAULT_CENTER,
            initial_zoom: 14.0,
            overview_zoom: 12.0,
            single_poi_zoom: 17.0,
            poi_focus_zoom: 15.0,
            fit_padding: Padding::Uniform(50.0),
            fit_max_zoom: 16.0,
            animation_duration_ms: 1000,
            overlay_id: "tour".to_owned(),
            route_color: "#1976d2".to_owned(),
            route_width: 4.0,
            user_location_min_zoom: 15.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

impl MapConfig {
    /// Surface parameters for a map about to show `pois`: centred on the
    /// first stop, or on the default location when there is none.
    #[must_use]
    pub fn map_init(&self, pois: &[Poi]) -> MapInit {
        MapInit {
            center: pois.first().map_or(self.default_center, Poi::position),
            zoom: self.initial_zoom,
            pitch: self.pitch,
            bearing: self.bearing,
            style_url: self.style_url.clone(),
        }
    }
}

/// Per-call overrides for camera framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Overrides [`MapConfig::fit_padding`].
    #[serde(default)]
    pub padding: Option<Padding>,
    /// Overrides [`MapConfig::fit_max_zoom`].
    #[serde(default)]
    pub max_zoom: Option<f64>,
    /// Overrides [`MapConfig::animation_duration_ms`].
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl FitOptions {
    /// Fills unset fields from `config`.
    #[must_use]
    pub fn resolve(&self, config: &MapConfig) -> FitBoundsOptions {
        FitBoundsOptions {
            padding: self.padding.unwrap_or(config.fit_padding),
            max_zoom: self.max_zoom.unwrap_or(config.fit_max_zoom),
            duration_ms: self.duration_ms.unwrap_or(config.animation_duration_ms),
        }
    }
}
