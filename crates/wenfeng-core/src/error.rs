//! Error types for wenfeng-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input text is empty or contains only whitespace.
    #[error("invalid input: text must be a non-empty string")]
    InvalidInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur when reading or writing style profiles.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file could not be read or written.
    #[error("failed to access profile {path}: {source}")]
    Io {
        /// Path of the profile file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The profile could not be encoded or decoded as JSON.
    #[error("malformed profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`ProfileError`].
pub type ProfileResult<T> = Result<T, ProfileError>;
