//! HTTP error handling
//!
//! Every failing endpoint answers with the same JSON body:
//! `{ "message": ..., "code": ..., "details": ... }`. The code selects the
//! status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use orgchart_core::{DocumentServiceError, ExportError, StoreError, TreeOperationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Optional detailed error information for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }

    /// No document is loaded (missing data file and nothing saved yet).
    pub fn no_document() -> Self {
        Self::new("No organization document is loaded", "DOCUMENT_NOT_FOUND")
    }

    pub fn node_not_found(id: &str) -> Self {
        Self::new(format!("Node not found: {}", id), "NODE_NOT_FOUND")
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, "INVALID_INPUT")
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NODE_NOT_FOUND" | "DOCUMENT_NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_INPUT" | "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "ROOT_DELETE_FORBIDDEN" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} ({})", self.message, self.code);
        }
        (status, Json(self)).into_response()
    }
}

impl From<TreeOperationError> for HttpError {
    fn from(err: TreeOperationError) -> Self {
        match &err {
            TreeOperationError::NodeNotFound { .. } | TreeOperationError::ParentNotFound { .. } => {
                HttpError::new(err.to_string(), "NODE_NOT_FOUND")
            }
            TreeOperationError::RootCannotBeDeleted { .. } => {
                HttpError::new(err.to_string(), "ROOT_DELETE_FORBIDDEN")
            }
            TreeOperationError::MissingLabel => HttpError::new(err.to_string(), "VALIDATION_ERROR"),
        }
    }
}

impl From<DocumentServiceError> for HttpError {
    fn from(err: DocumentServiceError) -> Self {
        match err {
            DocumentServiceError::Operation(e) => e.into(),
            DocumentServiceError::ValidationFailed { errors } => HttpError::with_details(
                format!("Document has {} validation errors", errors.len()),
                "VALIDATION_ERROR",
                errors.join("\n"),
            ),
            DocumentServiceError::InvalidJson(e) => {
                HttpError::with_details("Invalid JSON", "INVALID_INPUT", e.to_string())
            }
            DocumentServiceError::NotAnObject => {
                HttpError::invalid_input("Document root must be a JSON object")
            }
            DocumentServiceError::NoDocumentLoaded => HttpError::no_document(),
            DocumentServiceError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            HttpError::with_details(
                "No organization document is stored",
                "DOCUMENT_NOT_FOUND",
                err.to_string(),
            )
        } else {
            HttpError::with_details("Storage operation failed", "STORE_ERROR", err.to_string())
        }
    }
}

impl From<ExportError> for HttpError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnknownFormat(format) => {
                HttpError::invalid_input(format!("Unknown export format: {}", format))
            }
            other => HttpError::with_details("Export failed", "EXPORT_ERROR", other.to_string()),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::with_details("Serialization failed", "SERIALIZATION_ERROR", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(HttpError::node_not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(HttpError::invalid_input("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            HttpError::from(TreeOperationError::root_cannot_be_deleted("board")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HttpError::new("boom", "STORE_ERROR").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_failure_carries_details() {
        let err: HttpError =
            DocumentServiceError::validation_failed(vec!["a".into(), "b".into()]).into();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.details.as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_missing_store_is_not_found() {
        let err: HttpError = StoreError::not_found("public/data.json").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
