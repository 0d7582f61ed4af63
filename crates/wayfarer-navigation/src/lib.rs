//! Wayfarer — tour progress state machine.
//!
//! Owns "which tour, which POIs, which POI is current, which have been
//! visited" and reports every effective change as a notification.

pub mod application;
pub mod domain;
