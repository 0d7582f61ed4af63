//! Wayfarer API server entry point.

use std::error::Error;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use wayfarer_api::config::ServerConfig;
use wayfarer_api::error::AppError;
use wayfarer_api::routes;
use wayfarer_api::state::AppState;
use wayfarer_catalog::Catalog;
use wayfarer_core::event::SystemClock;
use wayfarer_map::http::HttpRouteFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Wayfarer API server");

    let config = ServerConfig::from_env()?;

    let catalog = Catalog::from_path(&config.catalog_path).map_err(AppError::from)?;
    tracing::info!(
        path = %config.catalog_path.display(),
        tours = catalog.tours().len(),
        "catalog loaded"
    );

    // Route URLs in the catalog are host-relative and served from `data_dir` below.
    let route_fetcher = HttpRouteFetcher::new()
        .map_err(AppError::from)?
        .with_base_url(config.public_url.clone());

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(catalog),
        Arc::new(route_fetcher),
        config.map.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::api_router()
        .nest_service("/data", ServeDir::new(&config.data_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    tracing::info!("Listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app).await.map_err(AppError::from)?;

    Ok(())
}
