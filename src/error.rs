// src/error.rs

//! Unified error handling for the dejaq CLI.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for dejaq operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Provider-specific failures (credentials, profiles, transport) are collapsed
/// into the closed set of variants below so the rest of the tool never handles
/// raw SDK error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error (missing or unusable profile store)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No AWS credentials could be resolved
    #[error("No AWS credentials found: {0}")]
    NoCredentials(String),

    /// The named AWS profile does not exist
    #[error("AWS profile '{0}' not found")]
    ProfileNotFound(String),

    /// Generic AWS client/transport error
    #[error("AWS client error: {0}")]
    Client(String),

    /// Document submission failed
    #[error("Upload failed for {source_path}: {message}")]
    Upload {
        source_path: String,
        message: String,
    },

    /// No data source with the requested display name
    #[error("Web crawler data source '{0}' not found")]
    DataSourceNotFound(String),

    /// Invalid command-line invocation
    #[error("Usage error: {0}")]
    Usage(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic client error.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// Create an upload error for a source path.
    pub fn upload(path: &Path, message: impl fmt::Display) -> Self {
        Self::Upload {
            source_path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
