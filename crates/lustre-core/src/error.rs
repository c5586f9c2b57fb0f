//! Error types for lustre-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for lustre operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared across the lustre crates.
///
/// `InvalidInput` is the only variant caused by the caller; everything else
/// is a server-side failure.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Caller supplied missing or malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search index (or another upstream store) failed.
    #[error("Upstream error: {message}")]
    Upstream {
        /// What was being attempted
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A local operation failed (index writing, serialization, ...).
    #[error("Operation failed: {0}")]
    Operation(String),

    /// I/O error tied to a filesystem path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Creates an operation error.
    pub fn operation(message: impl Into<String>) -> Self {
        Error::Operation(message.into())
    }

    /// Creates an upstream error without a source.
    pub fn upstream(message: impl Into<String>) -> Self {
        Error::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an upstream error wrapping its cause.
    pub fn upstream_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an I/O error annotated with the path involved.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error was caused by the caller (maps to HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
