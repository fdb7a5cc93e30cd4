//! Error types
//!
//! This module provides error handling for the extraction pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for doxyts-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for doxyts-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed document or missing compound declaration
    #[error("Schema error in {}: {message}", file.display())]
    Schema { file: PathBuf, message: String },

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl EtchError {
    /// Create a schema error
    pub fn schema(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        EtchError::Schema {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }
}
