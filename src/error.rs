//! Error types for Chartroom
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Chartroom operations
///
/// Covers configuration loading, backend API calls, and resume file
/// handling. Interactive command parsing has its own `CommandError`.
#[derive(Error, Debug)]
pub enum ChartroomError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors (non-JSON error bodies, unusable base URLs)
    #[error("API error: {0}")]
    Api(String),

    /// Resume file has an extension other than `.txt` or `.md`
    #[error("Unsupported resume format: {0}")]
    UnsupportedResumeFormat(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Chartroom operations
///
/// Uses `anyhow::Error` so callers can attach context while still
/// downcasting to [`ChartroomError`] where needed.
pub type Result<T> = anyhow::Result<T>;
