//! Wayfarer API — HTTP host for tour navigation and the headless map.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
