//! Domain error types.

use thiserror::Error;

use crate::model::TourId;

/// Top-level domain error type.
///
/// Navigation itself never fails; these errors come from the data-access
/// side of loading a tour.
#[derive(Debug, Error)]
pub enum TourError {
    /// The data source has no tour with this identifier.
    #[error("tour not found: {0}")]
    TourNotFound(TourId),

    /// A request was well-formed but cannot be honoured.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/data-source error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
