//! Route modules organized by concern.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod map;
pub mod navigation;
pub mod tours;

/// Every API route, without state or middleware.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(tours::router())
        .merge(navigation::router())
        .merge(map::router())
}
