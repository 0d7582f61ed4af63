//! Wayfarer API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use wayfarer_catalog::CatalogError;
use wayfarer_core::error::TourError;
use wayfarer_core::model::PoiId;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The tour catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The route-fetching HTTP client could not be built.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Loading a tour failed.
    #[error(transparent)]
    Tour(#[from] TourError),

    /// The loaded tour has no such POI.
    #[error("poi not found: {0}")]
    PoiNotFound(PoiId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::Tour(TourError::TourNotFound(_)) => (StatusCode::NOT_FOUND, "tour_not_found"),
            Self::Tour(TourError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Tour(TourError::Infrastructure(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
            Self::PoiNotFound(_) => (StatusCode::NOT_FOUND, "poi_not_found"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use wayfarer_core::model::TourId;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        let response = err.into().into_response();
        response.status()
    }

    #[test]
    fn test_tour_not_found_maps_to_404() {
        assert_eq!(
            status_of(TourError::TourNotFound(TourId::from("nowhere"))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(TourError::Validation("tour has no stops".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(TourError::Infrastructure("catalog unavailable".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_poi_not_found_maps_to_404() {
        assert_eq!(
            status_of(ApiError::PoiNotFound(PoiId::from("ghost"))),
            StatusCode::NOT_FOUND
        );
    }
}
