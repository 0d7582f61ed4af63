//! Tour and POI records as delivered by the data-access port.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a tour.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(String);

impl TourId {
    /// Creates a tour identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TourId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a point of interest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(String);

impl PoiId {
    /// Creates a POI identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoiId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A geographic coordinate in `[longitude, latitude]` order, as map
/// libraries and GeoJSON expect it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LngLat {
    /// Creates a coordinate from longitude and latitude.
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

/// A walking tour: display metadata plus a route overlay reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Tour identifier.
    pub id: TourId,
    /// Display title.
    pub title: String,
    /// Route length in kilometres.
    #[serde(default)]
    pub distance_km: f64,
    /// Expected walking time in minutes.
    #[serde(default)]
    pub duration_minutes: u32,
    /// Display price, already formatted for the audience.
    #[serde(default)]
    pub price: String,
    /// Language keys the tour has narration for.
    #[serde(default)]
    pub language_options: Vec<String>,
    /// URL (absolute or host-relative) of the route GeoJSON document.
    #[serde(default)]
    pub route_url: Option<String>,
    /// Cover image URLs.
    #[serde(default)]
    pub cover_images: Vec<String>,
}

/// Media attached to a POI beyond its narration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalMedia {
    /// Background music URL.
    #[serde(default)]
    pub music_url: Option<String>,
    /// Video URL.
    #[serde(default)]
    pub video_url: Option<String>,
}

/// A single stop along a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// POI identifier.
    pub id: PoiId,
    /// Owning tour.
    pub tour_id: TourId,
    /// Traversal order. Only needs to be orderable, not contiguous.
    pub order_index: i32,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display title.
    pub title: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Narrative text keyed by language.
    #[serde(default)]
    pub description_by_language: BTreeMap<String, String>,
    /// Narration audio URL keyed by language.
    #[serde(default)]
    pub audio_by_language: BTreeMap<String, String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Optional music/video.
    #[serde(default)]
    pub optional_media: Option<OptionalMedia>,
}

impl Poi {
    /// The POI position as a map coordinate.
    #[must_use]
    pub fn position(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }

    /// Narrative text for `language`, if the POI has one.
    #[must_use]
    pub fn description_for(&self, language: &str) -> Option<&str> {
        self.description_by_language.get(language).map(String::as_str)
    }

    /// Narration audio URL for `language`, if the POI has one.
    #[must_use]
    pub fn audio_for(&self, language: &str) -> Option<&str> {
        self.audio_by_language.get(language).map(String::as_str)
    }
}
