//! Unified error handling.
//!
//! Provides the `StorefrontError` type returned by every command. Each
//! variant maps to a process exit code following the BSD `sysexits`
//! conventions, so scripts can tell a bad argument from an unreachable API.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Exit code for a command line usage error.
pub const EXIT_USAGE: u8 = 64;
/// Exit code when the requested item does not exist.
pub const EXIT_NO_INPUT: u8 = 66;
/// Exit code when a remote service is unavailable.
pub const EXIT_UNAVAILABLE: u8 = 69;
/// Exit code for configuration errors.
pub const EXIT_CONFIG: u8 = 78;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorefrontError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Catalog(CatalogError::NotFound(_)) | Self::NotFound(_) => EXIT_NO_INPUT,
            Self::Catalog(_) => EXIT_UNAVAILABLE,
            Self::InvalidInput(_) => EXIT_USAGE,
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
