//! Wayfarer — YAML tour catalog.
//!
//! A file-backed implementation of the data-access port. A catalog document
//! lists tours and POIs flat, the way a database export would; every POI
//! names its tour.

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, CatalogDocument};
pub use error::CatalogError;
