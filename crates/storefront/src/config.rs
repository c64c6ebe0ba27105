//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SUNSTONE_API_URL` - Base URL of the user-directory API
//!   (default: `http://localhost:3001`)
//! - `SUNSTONE_STORAGE_DIR` - Directory for durable client storage
//!   (default: `.sunstone`)
//! - `SUNSTONE_CATALOG` - Path to the bundled catalog fixture
//!   (default: `data/catalog.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default user-directory API base URL (a local json-server instance).
const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Default durable storage directory.
const DEFAULT_STORAGE_DIR: &str = ".sunstone";

/// Default catalog fixture path.
const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote user-directory endpoint
    pub api_base_url: Url,
    /// Directory holding durable client storage files
    pub storage_dir: PathBuf,
    /// Path to the bundled catalog fixture
    pub catalog_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a development default, so an empty environment
    /// yields a working local configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `SUNSTONE_API_URL` is set
    /// but is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("SUNSTONE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SUNSTONE_API_URL".into(), e.to_string()))?;

        let storage_dir = std::env::var("SUNSTONE_STORAGE_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let catalog_path = std::env::var("SUNSTONE_CATALOG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from);

        Ok(Self {
            api_base_url,
            storage_dir,
            catalog_path,
        })
    }
}
