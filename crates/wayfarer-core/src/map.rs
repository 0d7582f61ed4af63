//! Map-rendering port.
//!
//! The map widget is a single mutable resource. Everything the sync engine
//! needs from it is expressed here: labelled clickable markers, named
//! GeoJSON sources and layers, camera animation and readiness. Surface
//! operations have no failure mode; a surface that is not ready is simply
//! not driven.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{LngLat, PoiId};

/// Visual category of a POI marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    /// The POI the user is currently at.
    Current,
    /// A POI the user has been to.
    Visited,
    /// A POI not yet reached.
    Upcoming,
}

impl MarkerCategory {
    /// Derives the category of `id`: `Current` beats `Visited` beats
    /// `Upcoming`.
    #[must_use]
    pub fn classify(id: &PoiId, current_id: Option<&PoiId>, visited: &BTreeSet<PoiId>) -> Self {
        if current_id == Some(id) {
            Self::Current
        } else if visited.contains(id) {
            Self::Visited
        } else {
            Self::Upcoming
        }
    }

    /// Stacking priority for surfaces that honour explicit z-ordering.
    #[must_use]
    pub const fn stacking_priority(self) -> i32 {
        match self {
            Self::Current => 1000,
            Self::Visited => 100,
            Self::Upcoming => 50,
        }
    }

    /// Style class used by DOM-backed surfaces.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Current => "vh-poi-marker--current",
            Self::Visited => "vh-poi-marker--visited",
            Self::Upcoming => "vh-poi-marker--upcoming",
        }
    }
}

/// Identity of a marker on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum MarkerKey {
    /// Marker for a tour stop.
    Poi(PoiId),
    /// The "you are here" puck.
    UserLocation,
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poi(id) => write!(f, "poi:{id}"),
            Self::UserLocation => f.write_str("user-location"),
        }
    }
}

/// How a marker is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Numbered POI button.
    Poi {
        /// Visual category.
        category: MarkerCategory,
        /// Requested stacking priority.
        z_index: i32,
    },
    /// User-location puck.
    UserPuck,
}

/// Everything a surface needs to place one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Marker identity; clicks are reported with it.
    pub key: MarkerKey,
    /// Where to place the marker.
    pub position: LngLat,
    /// Visible text, if any.
    pub label: Option<String>,
    /// Drawing style.
    pub style: MarkerStyle,
}

/// A map layer drawn from a named source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    /// Stroked line, used for the route overlay.
    Line {
        /// Layer id.
        id: String,
        /// Source id.
        source: String,
        /// Stroke colour.
        color: String,
        /// Stroke width in pixels.
        width: f64,
    },
    /// Extruded polygons, used for 3D buildings.
    FillExtrusion {
        /// Layer id.
        id: String,
        /// Source id.
        source: String,
        /// Layer inside a vector source.
        source_layer: String,
        /// Fill colour.
        color: String,
        /// Feature property holding the extrusion height.
        height_property: String,
        /// Fill opacity in `[0, 1]`.
        opacity: f64,
    },
}

impl LayerSpec {
    /// The layer id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Line { id, .. } | Self::FillExtrusion { id, .. } => id,
        }
    }
}

/// Axis-aligned geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    /// Minimum longitude/latitude corner.
    pub south_west: LngLat,
    /// Maximum longitude/latitude corner.
    pub north_east: LngLat,
}

impl LngLatBounds {
    /// Degenerate bounds around a single point.
    #[must_use]
    pub const fn from_point(point: LngLat) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds containing every point; `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    /// Grows the bounds to include `point`.
    pub fn extend(&mut self, point: LngLat) {
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
    }

    /// Whether `point` lies inside or on the edge of the bounds.
    #[must_use]
    pub fn contains(&self, point: LngLat) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
    }
}

/// Viewport padding in pixels, uniform or per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    /// Same padding on every side.
    Uniform(f64),
    /// Individual padding per side.
    Sides {
        /// Top padding.
        top: f64,
        /// Bottom padding.
        bottom: f64,
        /// Left padding.
        left: f64,
        /// Right padding.
        right: f64,
    },
}

/// Camera move to a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    /// New center.
    pub center: LngLat,
    /// New zoom level.
    pub zoom: f64,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
}

/// Parameters for framing a bounding region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBoundsOptions {
    /// Viewport padding.
    pub padding: Padding,
    /// Zoom cap for the resulting camera.
    pub max_zoom: f64,
    /// Animation duration in milliseconds.
    pub duration_ms: u64,
}

/// Initial surface parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInit {
    /// Initial center.
    pub center: LngLat,
    /// Initial zoom.
    pub zoom: f64,
    /// Initial pitch in degrees.
    pub pitch: f64,
    /// Initial bearing in degrees.
    pub bearing: f64,
    /// Map style document URL.
    pub style_url: String,
}

/// Capability set of an interactive map widget.
pub trait MapSurface: Send {
    /// Whether the surface has finished loading its style.
    fn is_loaded(&self) -> bool;

    /// Places a marker. A marker with the same key is replaced.
    fn add_marker(&mut self, marker: MarkerSpec);

    /// Moves an existing marker. Unknown keys are ignored.
    fn move_marker(&mut self, key: &MarkerKey, position: LngLat);

    /// Removes a marker. Unknown keys are ignored.
    fn remove_marker(&mut self, key: &MarkerKey);

    /// Whether a source with this id exists.
    fn has_source(&self, id: &str) -> bool;

    /// Registers a GeoJSON source.
    fn add_geojson_source(&mut self, id: &str, data: serde_json::Value);

    /// Removes a source. Unknown ids are ignored.
    fn remove_source(&mut self, id: &str);

    /// Whether a layer with this id exists.
    fn has_layer(&self, id: &str) -> bool;

    /// Adds a layer on top of the existing ones.
    fn add_layer(&mut self, layer: LayerSpec);

    /// Removes a layer. Unknown ids are ignored.
    fn remove_layer(&mut self, id: &str);

    /// Animates the camera along a flight path to `target`.
    fn fly_to(&mut self, target: CameraTarget);

    /// Animates the camera directly to `target`.
    fn ease_to(&mut self, target: CameraTarget);

    /// Animates the camera to frame `bounds`.
    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitBoundsOptions);

    /// Current zoom level.
    fn zoom(&self) -> f64;
}
