//! Store Error Types
//!
//! Errors raised while reading or writing a persisted organization document.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors
///
/// Content problems (missing labels, bad shape) are not store errors; they
/// are reported by validation once the document has been read.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document has been saved at this location yet
    #[error("No document found at {path}")]
    NotFound { path: PathBuf },

    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored bytes are not JSON, or the document could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Wrap an I/O error with the path it occurred at, mapping a missing
    /// file to [`StoreError::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
