//! Wayfarer Core — shared domain model and ports.
//!
//! This crate defines the tour/POI model and the narrow interfaces the
//! navigation and map-sync crates consume: the data-access port, the
//! map-rendering port, the route-document fetcher and the location
//! provider. It contains no infrastructure code.

pub mod error;
pub mod event;
pub mod location;
pub mod map;
pub mod model;
pub mod repository;
pub mod route;
