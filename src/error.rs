//! Error types for the storage boundary, configuration and store inputs.
//!
//! Store actions never surface [`StorageError`]; it is logged and swallowed at
//! the persistence boundary. It is public so adapter implementations outside
//! this crate can report failures.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`StorageAdapter`](crate::storage::StorageAdapter).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file or device I/O failed
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be encoded or decoded
    #[error("Storage document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Rejected currency input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("Unsupported currency code '{0}'")]
    Unsupported(String),
}

/// Rejected theme input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("Unknown theme '{0}'")]
    Unknown(String),
}
