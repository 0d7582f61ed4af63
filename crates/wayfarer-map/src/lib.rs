//! Wayfarer — map synchronization engine.
//!
//! Keeps an interactive map's route overlay, POI markers and camera in
//! lockstep with the navigation state. Every mutation of the surface is a
//! clear-then-rebuild, so repeated or overlapping syncs converge instead
//! of accumulating.

pub mod buildings;
pub mod camera;
pub mod config;
pub mod facade;
pub mod http;
pub mod location;
pub mod markers;
pub mod route;
pub mod surface;
