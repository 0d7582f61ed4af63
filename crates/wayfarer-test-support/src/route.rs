//! Test route fetcher — serves canned documents and records requests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use wayfarer_core::route::{RouteFetchError, RouteFetcher};

/// A fetcher that answers from a fixed table. Unknown URLs get a 404.
#[derive(Debug, Default)]
pub struct StubRouteFetcher {
    documents: BTreeMap<String, serde_json::Value>,
    unreachable: Vec<String>,
    requested: Mutex<Vec<String>>,
}

impl StubRouteFetcher {
    /// Creates a fetcher that knows no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `document` for `url`.
    #[must_use]
    pub fn with_document(mut self, url: &str, document: serde_json::Value) -> Self {
        self.documents.insert(url.to_owned(), document);
        self
    }

    /// Fails requests to `url` with a network error.
    #[must_use]
    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_owned());
        self
    }

    /// URLs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    /// A minimal line feature collection through `coordinates`.
    #[must_use]
    pub fn line_document(coordinates: &[[f64; 2]]) -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "LineString", "coordinates": coordinates }
            }]
        })
    }
}

#[async_trait]
impl RouteFetcher for StubRouteFetcher {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, RouteFetchError> {
        self.requested.lock().unwrap().push(url.to_owned());
        if self.unreachable.iter().any(|u| u == url) {
            return Err(RouteFetchError::Network {
                url: url.to_owned(),
                message: "connection refused".to_owned(),
            });
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| RouteFetchError::Status {
                url: url.to_owned(),
                status: 404,
            })
    }
}
