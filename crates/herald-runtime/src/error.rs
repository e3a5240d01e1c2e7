//! Runtime error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Merging or deserializing the configuration failed.
    #[error("invalid configuration: {0}")]
    Extraction(#[from] figment::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
