//! Headless map surface.
//!
//! Keeps the scene a real widget would show (markers in insertion order,
//! sources, layers, camera) plus a journal of every call, so hosts without
//! a rendering surface can serve the scene and tests can assert on exact
//! call order.

use std::collections::BTreeMap;

use serde::Serialize;
use wayfarer_core::map::{
    CameraTarget, FitBoundsOptions, LayerSpec, LngLatBounds, MapInit, MapSurface, MarkerKey,
    MarkerSpec, Padding,
};
use wayfarer_core::model::LngLat;

/// Tile size the zoom estimate assumes, in pixels.
const TILE_SIZE: f64 = 512.0;

/// One call made on a [`HeadlessMap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum MapCall {
    /// `add_marker`.
    AddMarker {
        /// Marker identity.
        key: MarkerKey,
    },
    /// `move_marker`.
    MoveMarker {
        /// Marker identity.
        key: MarkerKey,
    },
    /// `remove_marker`.
    RemoveMarker {
        /// Marker identity.
        key: MarkerKey,
    },
    /// `add_geojson_source`.
    AddSource {
        /// Source id.
        id: String,
    },
    /// `remove_source`.
    RemoveSource {
        /// Source id.
        id: String,
    },
    /// `add_layer`.
    AddLayer {
        /// Layer id.
        id: String,
    },
    /// `remove_layer`.
    RemoveLayer {
        /// Layer id.
        id: String,
    },
    /// `fly_to`.
    FlyTo {
        /// Camera target.
        target: CameraTarget,
    },
    /// `ease_to`.
    EaseTo {
        /// Camera target.
        target: CameraTarget,
    },
    /// `fit_bounds`.
    FitBounds {
        /// Framed region.
        bounds: LngLatBounds,
        /// Framing options.
        options: FitBoundsOptions,
    },
}

/// Where the camera currently points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    /// Center of the viewport.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
}

/// An in-memory [`MapSurface`].
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessMap {
    init: MapInit,
    loaded: bool,
    viewport: (f64, f64),
    camera: CameraState,
    markers: Vec<MarkerSpec>,
    sources: BTreeMap<String, serde_json::Value>,
    layers: Vec<LayerSpec>,
    #[serde(skip)]
    journal: Vec<MapCall>,
}

impl HeadlessMap {
    /// Creates a surface that has not finished loading yet.
    #[must_use]
    pub fn new(init: MapInit) -> Self {
        let camera = CameraState {
            center: init.center,
            zoom: init.zoom,
        };
        Self {
            init,
            loaded: false,
            viewport: (1024.0, 768.0),
            camera,
            markers: Vec::new(),
            sources: BTreeMap::new(),
            layers: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Sets the viewport size used to estimate fitted zoom levels.
    #[must_use]
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Registers a source the style itself provides (e.g. vector tiles).
    #[must_use]
    pub fn with_style_source(mut self, id: &str) -> Self {
        self.sources
            .insert(id.to_owned(), serde_json::json!({ "type": "vector" }));
        self
    }

    /// Marks the style as loaded.
    pub fn finish_loading(&mut self) {
        self.loaded = true;
    }

    /// Parameters the surface was created with.
    #[must_use]
    pub fn init(&self) -> &MapInit {
        &self.init
    }

    /// Markers in insertion order; later entries draw on top.
    #[must_use]
    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    /// The marker with `key`.
    #[must_use]
    pub fn marker(&self, key: &MarkerKey) -> Option<&MarkerSpec> {
        self.markers.iter().find(|marker| &marker.key == key)
    }

    /// Layers in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Data of a GeoJSON source.
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&serde_json::Value> {
        self.sources.get(id)
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> CameraState {
        self.camera
    }

    /// Every call made so far.
    #[must_use]
    pub fn journal(&self) -> &[MapCall] {
        &self.journal
    }

    /// Forgets the journal, keeping the scene.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn fitted_zoom(&self, bounds: &LngLatBounds, options: &FitBoundsOptions) -> f64 {
        let (horizontal, vertical) = match options.padding {
            Padding::Uniform(p) => (2.0 * p, 2.0 * p),
            Padding::Sides {
                top,
                bottom,
                left,
                right,
            } => (left + right, top + bottom),
        };
        let width = (self.viewport.0 - horizontal).max(1.0);
        let height = (self.viewport.1 - vertical).max(1.0);
        let span_lng = bounds.north_east.lng - bounds.south_west.lng;
        let span_lat = bounds.north_east.lat - bounds.south_west.lat;

        let zoom_for = |pixels: f64, span: f64| {
            if span <= f64::EPSILON {
                f64::INFINITY
            } else {
                (pixels * 360.0 / (TILE_SIZE * span)).log2()
            }
        };
        zoom_for(width, span_lng)
            .min(zoom_for(height, span_lat))
            .min(options.max_zoom)
    }
}

impl MapSurface for HeadlessMap {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn add_marker(&mut self, marker: MarkerSpec) {
        self.journal.push(MapCall::AddMarker {
            key: marker.key.clone(),
        });
        self.markers.retain(|existing| existing.key != marker.key);
        self.markers.push(marker);
    }

    fn move_marker(&mut self, key: &MarkerKey, position: LngLat) {
        if let Some(marker) = self.markers.iter_mut().find(|marker| &marker.key == key) {
            marker.position = position;
            self.journal.push(MapCall::MoveMarker { key: key.clone() });
        }
    }

    fn remove_marker(&mut self, key: &MarkerKey) {
        self.journal.push(MapCall::RemoveMarker { key: key.clone() });
        self.markers.retain(|marker| &marker.key != key);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_geojson_source(&mut self, id: &str, data: serde_json::Value) {
        self.journal.push(MapCall::AddSource { id: id.to_owned() });
        self.sources.insert(id.to_owned(), data);
    }

    fn remove_source(&mut self, id: &str) {
        self.journal.push(MapCall::RemoveSource { id: id.to_owned() });
        self.sources.remove(id);
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id() == id)
    }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.journal.push(MapCall::AddLayer {
            id: layer.id().to_owned(),
        });
        self.layers.retain(|existing| existing.id() != layer.id());
        self.layers.push(layer);
    }

    fn remove_layer(&mut self, id: &str) {
        self.journal.push(MapCall::RemoveLayer { id: id.to_owned() });
        self.layers.retain(|layer| layer.id() != id);
    }

    fn fly_to(&mut self, target: CameraTarget) {
        self.journal.push(MapCall::FlyTo { target });
        self.camera = CameraState {
            center: target.center,
            zoom: target.zoom,
        };
    }

    fn ease_to(&mut self, target: CameraTarget) {
        self.journal.push(MapCall::EaseTo { target });
        self.camera = CameraState {
            center: target.center,
            zoom: target.zoom,
        };
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions) {
        self.journal.push(MapCall::FitBounds { bounds, options });
        let center = LngLat::new(
            f64::midpoint(bounds.south_west.lng, bounds.north_east.lng),
            f64::midpoint(bounds.south_west.lat, bounds.north_east.lat),
        );
        self.camera = CameraState {
            center,
            zoom: self.fitted_zoom(&bounds, &options),
        };
    }

    fn zoom(&self) -> f64 {
        self.camera.zoom
    }
}
