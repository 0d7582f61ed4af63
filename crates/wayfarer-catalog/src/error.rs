//! Catalog loading errors.

use std::path::PathBuf;

use thiserror::Error;
use wayfarer_core::model::{PoiId, TourId};

/// Why a catalog could not be built.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// Catalog location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid catalog.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two tours share an identifier.
    #[error("duplicate tour id: {0}")]
    DuplicateTour(TourId),

    /// Two POIs share an identifier.
    #[error("duplicate poi id: {0}")]
    DuplicatePoi(PoiId),

    /// A POI names a tour the catalog does not define.
    #[error("poi {poi_id} belongs to unknown tour {tour_id}")]
    UnknownTour {
        /// The orphaned POI.
        poi_id: PoiId,
        /// The tour it names.
        tour_id: TourId,
    },
}
