//! Shared test fakes and fixtures for the Wayfarer tour engine.

mod clock;
pub mod fixtures;
mod location;
mod repository;
mod route;

pub use clock::FixedClock;
pub use location::StubLocationProvider;
pub use repository::{FailingTourRepository, InMemoryTourRepository};
pub use route::StubRouteFetcher;
