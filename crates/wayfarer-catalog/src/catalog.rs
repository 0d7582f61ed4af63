//! The catalog repository.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use wayfarer_core::error::TourError;
use wayfarer_core::model::{Poi, Tour, TourId};
use wayfarer_core::repository::TourRepository;

use crate::error::CatalogError;

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Tours in listing order.
    #[serde(default)]
    pub tours: Vec<Tour>,
    /// POIs of every tour, in any order.
    #[serde(default)]
    pub pois: Vec<Poi>,
}

/// An immutable, validated set of tours and their POIs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tours: Vec<Tour>,
    pois: HashMap<TourId, Vec<Poi>>,
}

impl Catalog {
    /// Validates `document` and indexes its POIs by tour, each list sorted
    /// by `order_index` (stable).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if identifiers repeat or a POI names an
    /// unknown tour.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut pois: HashMap<TourId, Vec<Poi>> = HashMap::new();
        for tour in &document.tours {
            if pois.insert(tour.id.clone(), Vec::new()).is_some() {
                return Err(CatalogError::DuplicateTour(tour.id.clone()));
            }
        }

        let mut seen = BTreeSet::new();
        for poi in document.pois {
            if !seen.insert(poi.id.clone()) {
                return Err(CatalogError::DuplicatePoi(poi.id));
            }
            match pois.get_mut(&poi.tour_id) {
                Some(stops) => stops.push(poi),
                None => {
                    return Err(CatalogError::UnknownTour {
                        poi_id: poi.id,
                        tour_id: poi.tour_id,
                    });
                }
            }
        }
        for stops in pois.values_mut() {
            stops.sort_by_key(|poi| poi.order_index);
        }

        Ok(Self {
            tours: document.tours,
            pois,
        })
    }

    /// Parses and validates a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML, or any validation
    /// error of [`Catalog::from_document`].
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(source)?;
        Self::from_document(document)
    }

    /// Reads a YAML catalog from `path`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// of [`Catalog::from_yaml_str`].
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&source)?;
        info!(tours = catalog.tours.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Tours in listing order.
    #[must_use]
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }
}

#[async_trait]
impl TourRepository for Catalog {
    async fn get_tour_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError> {
        Ok(self.tours.iter().find(|tour| &tour.id == id).cloned())
    }

    async fn get_pois_for_tour(&self, tour_id: &TourId) -> Result<Vec<Poi>, TourError> {
        Ok(self.pois.get(tour_id).cloned().unwrap_or_default())
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, TourError> {
        Ok(self.tours.clone())
    }
}
