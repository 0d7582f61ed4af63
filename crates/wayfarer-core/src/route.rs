//! Route-document fetch port.

use async_trait::async_trait;
use thiserror::Error;

/// Why a route document could not be obtained. Always recovered locally by
/// degrading to "no overlay".
#[derive(Debug, Error)]
pub enum RouteFetchError {
    /// The request never produced a response.
    #[error("network error fetching {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("route request to {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not parseable JSON.
    #[error("route document from {url} is not valid JSON: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Parser error description.
        message: String,
    },
}

/// Fetches a GeoJSON feature collection describing a tour route.
///
/// The document is returned as raw JSON; geometry is not validated.
#[async_trait]
pub trait RouteFetcher: Send + Sync {
    /// Fetches and parses the document at `url`.
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, RouteFetchError>;
}
