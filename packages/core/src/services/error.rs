//! Service Layer Error Types
//!
//! Errors raised while loading, accepting, saving or resetting the working
//! document.

use crate::db::StoreError;
use crate::operations::TreeOperationError;
use thiserror::Error;

/// Document session errors
#[derive(Error, Debug)]
pub enum DocumentServiceError {
    /// Persistence failed
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// A mutation was rejected
    #[error(transparent)]
    Operation(#[from] TreeOperationError),

    /// Uploaded bytes are not JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document root (after unwrapping `organization`) is not an object
    #[error("Document root must be a JSON object")]
    NotAnObject,

    /// Blocking validation errors; the working document was not replaced
    #[error("Document validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    /// Reset requested before anything was loaded
    #[error("No document has been loaded")]
    NoDocumentLoaded,
}

impl DocumentServiceError {
    /// Create a validation failed error
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Blocking validation messages, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::ValidationFailed { errors } => Some(errors),
            _ => None,
        }
    }
}
