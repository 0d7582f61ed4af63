//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;
use wayfarer_map::config::MapConfig;

use crate::error::AppError;

/// Everything the server reads at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
    /// YAML tour catalog.
    pub catalog_path: PathBuf,
    /// Directory served under `/data`.
    pub data_dir: PathBuf,
    /// Base that host-relative route URLs are resolved against.
    pub public_url: Url,
    /// Map constants.
    pub map: MapConfig,
}

impl ServerConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, so tests need not touch the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let public_url = match lookup("WAYFARER_PUBLIC_URL") {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| AppError::Config(format!("WAYFARER_PUBLIC_URL is not a URL: {e}")))?,
            None => Url::parse(&format!("http://127.0.0.1:{port}/"))
                .map_err(|e| AppError::Config(format!("cannot derive public URL: {e}")))?,
        };

        let mut map = MapConfig::default();
        if let Some(style_url) = lookup("WAYFARER_STYLE_URL") {
            map.style_url = style_url;
        }

        Ok(Self {
            addr,
            catalog_path: lookup("WAYFARER_CATALOG")
                .map_or_else(|| PathBuf::from("data/catalog.yaml"), PathBuf::from),
            data_dir: lookup("WAYFARER_DATA_DIR")
                .map_or_else(|| PathBuf::from("data"), PathBuf::from),
            public_url,
            map,
        })
    }
}
