//! Tour and POI builders with just enough data for engine tests.

use std::collections::BTreeMap;

use wayfarer_core::model::{Poi, PoiId, Tour, TourId};

/// A tour whose route lives at `/data/{id}-route.geojson`.
#[must_use]
pub fn tour(id: &str) -> Tour {
    Tour {
        id: TourId::from(id),
        title: format!("Tour {id}"),
        distance_km: 1.0,
        duration_minutes: 10,
        price: "£0".to_owned(),
        language_options: vec!["en".to_owned()],
        route_url: Some(format!("/data/{id}-route.geojson")),
        cover_images: Vec::new(),
    }
}

/// A stop whose coordinate is derived from `order_index`, so distinct
/// orders give distinct positions.
#[must_use]
pub fn poi(tour_id: &str, id: &str, order_index: i32) -> Poi {
    let offset = f64::from(order_index) * 0.001;
    poi_at(tour_id, id, order_index, -0.1246 + offset, 51.5007 + offset)
}

/// A stop at an explicit coordinate.
#[must_use]
pub fn poi_at(tour_id: &str, id: &str, order_index: i32, lng: f64, lat: f64) -> Poi {
    Poi {
        id: PoiId::from(id),
        tour_id: TourId::from(tour_id),
        order_index,
        lat,
        lng,
        title: id.to_uppercase(),
        address: format!("Addr {id}"),
        description_by_language: BTreeMap::from([("en".to_owned(), format!("About {id}"))]),
        audio_by_language: BTreeMap::from([("en".to_owned(), format!("/audio/{id}.mp3"))]),
        images: Vec::new(),
        optional_media: None,
    }
}
