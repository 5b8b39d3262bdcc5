//! Error types for JuiceScout.
//!
//! Library crates use [`MigrationError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all migration operations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error while reading an export file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Export content could not be tokenized as delimited text.
    #[error("format error: {message}")]
    Format { message: String },

    /// Network-level failure reaching the destination.
    #[error("transport error: {0}")]
    Transport(String),

    /// Destination answered with a non-success status.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Destination rejected a request as malformed. Every later request would
    /// be built the same way, so this stops the run.
    #[error("destination rejected payload as malformed (HTTP {status}: {body}); payload: {payload}")]
    MalformedPayload {
        status: u16,
        body: String,
        payload: String,
    },

    /// The destination has no collection to migrate into.
    #[error("destination account has no collections")]
    NoCollections,

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MigrationError>;

impl MigrationError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a format error from any displayable message.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
