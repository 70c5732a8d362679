//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted basket and favorites.
    pub data_dir: PathBuf,
    /// Listing response used as the product catalog.
    pub catalog_path: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".shopfront"),
            catalog_path: PathBuf::from("data/products.json"),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read `SHOP_*` variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_blank = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::Invalid { name, reason: "empty".into() }),
                other => Ok(other),
            }
        };

        let config = Self {
            data_dir: non_blank("SHOP_DATA_DIR")?.map(PathBuf::from).unwrap_or(defaults.data_dir),
            catalog_path: non_blank("SHOP_CATALOG_PATH")?.map(PathBuf::from).unwrap_or(defaults.catalog_path),
            log_filter: lookup("RUST_LOG").filter(|v| !v.trim().is_empty()).unwrap_or(defaults.log_filter),
        };
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
