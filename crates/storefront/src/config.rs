//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (catalog commands only)
//! - `ADMIN_INSIGHT_URL` - Base URL of the admin catalog API
//!
//! ## Optional
//! - `NAU_DATA_DIR` - Directory holding the persisted cart (default: `nau`
//!   under the platform data directory, or `.nau` if there is none)
//! - `NAU_CATALOG_TIMEOUT_SECS` - Catalog HTTP timeout in seconds (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const CATALOG_URL_VAR: &str = "ADMIN_INSIGHT_URL";
const DATA_DIR_VAR: &str = "NAU_DATA_DIR";
const CATALOG_TIMEOUT_VAR: &str = "NAU_CATALOG_TIMEOUT_SECS";

const APP_DIR_NAME: &str = "nau";
const FALLBACK_DATA_DIR: &str = ".nau";
const DEFAULT_CATALOG_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persistent cart slot
    pub data_dir: PathBuf,
    /// Catalog API configuration, if `ADMIN_INSIGHT_URL` is set
    pub catalog: Option<CatalogConfig>,
}

/// Admin catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL the `/api/v1/end_user/...` paths are resolved against
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(default_data_dir, PathBuf::from);

        let catalog = match lookup(CATALOG_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(raw) => Some(CatalogConfig::parse(&raw, lookup(CATALOG_TIMEOUT_VAR))?),
            None => None,
        };

        Ok(Self { data_dir, catalog })
    }

    /// The catalog configuration, required by commands that hit the API.
    ///
    /// # Errors
    ///
    /// Returns `MissingEnvVar` if `ADMIN_INSIGHT_URL` was not set.
    pub fn catalog(&self) -> Result<&CatalogConfig, ConfigError> {
        self.catalog
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar(CATALOG_URL_VAR.to_string()))
    }
}

/// Per-user cart location, independent of the working directory.
///
/// `~/.local/share/nau` on Linux, `~/Library/Application Support/nau` on
/// macOS, `%APPDATA%\nau` on Windows. Falls back to `.nau` when the
/// platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(FALLBACK_DATA_DIR),
        |dir| dir.join(APP_DIR_NAME),
    )
}

impl CatalogConfig {
    fn parse(raw_url: &str, raw_timeout: Option<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidEnvVar(CATALOG_URL_VAR.to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                CATALOG_URL_VAR.to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let secs = raw_timeout
            .unwrap_or_else(|| DEFAULT_CATALOG_TIMEOUT_SECS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(CATALOG_TIMEOUT_VAR.to_string(), e.to_string())
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                CATALOG_TIMEOUT_VAR.to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(secs),
        })
    }
}
