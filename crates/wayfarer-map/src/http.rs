//! HTTP route fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;
use wayfarer_core::route::{RouteFetchError, RouteFetcher};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches route documents over HTTP. Relative URLs such as
/// `/data/route.geojson` are resolved against the configured base.
#[derive(Debug, Clone)]
pub struct HttpRouteFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl HttpRouteFetcher {
    /// Creates a fetcher that only accepts absolute URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. no TLS
    /// backend).
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Resolves relative URLs against `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn resolve(&self, url: &str) -> Result<Url, RouteFetchError> {
        let parsed = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        parsed.map_err(|e| RouteFetchError::Network {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RouteFetcher for HttpRouteFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, RouteFetchError> {
        let resolved = self.resolve(url)?;
        let network = |e: reqwest::Error| RouteFetchError::Network {
            url: url.to_owned(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(resolved.clone())
            .send()
            .await
            .map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouteFetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network)?;
        let document = serde_json::from_str(&body).map_err(|e| RouteFetchError::Parse {
            url: url.to_owned(),
            message: e.to_string(),
        })?;
        debug!(%resolved, bytes = body.len(), "route document fetched");
        Ok(document)
    }
}
