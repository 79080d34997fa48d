//! Document Service - Load, Accept, Save, Reset
//!
//! Orchestrates the boundary of a charting session: everything that reaches
//! a store or arrives from outside passes through here.
//!
//! ```text
//! raw JSON ──▶ unwrap `organization` ──▶ validate ──▶ normalize ──▶ OrgDocument
//!                                           │
//!                                           └── errors: rejected, nothing replaced
//! ```
//!
//! The service does not own the working document. It hands out accepted
//! [`OrgDocument`]s and remembers the last one read from the store so that
//! [`DocumentService::reset`] can return to it.

use crate::db::DocumentStore;
use crate::services::document::OrgDocument;
use crate::services::error::DocumentServiceError;
use crate::services::normalizer::unwrap_document;
use crate::services::validator::{validate, ValidationLimits, ValidationReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A document that passed validation, with the report it passed with.
#[derive(Debug, Clone)]
pub struct AcceptedDocument {
    pub document: OrgDocument,
    /// Warnings only; a report with errors is never accepted
    pub report: ValidationReport,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub warnings: Vec<String>,
}

pub struct DocumentService<S: DocumentStore> {
    store: Arc<S>,
    limits: ValidationLimits,
    snapshot: RwLock<Option<OrgDocument>>,
}

impl<S: DocumentStore> DocumentService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            limits: ValidationLimits::default(),
            snapshot: RwLock::new(None),
        }
    }

    pub fn with_limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate then normalize a raw document.
    ///
    /// # Errors
    ///
    /// - [`DocumentServiceError::NotAnObject`] if the root is not an object
    /// - [`DocumentServiceError::ValidationFailed`] on any blocking error
    pub fn prepare(&self, raw: &Value) -> Result<AcceptedDocument, DocumentServiceError> {
        let root = unwrap_document(raw);
        if !root.is_object() {
            return Err(DocumentServiceError::NotAnObject);
        }

        let report = validate(root, &self.limits);
        if !report.is_valid {
            tracing::warn!(
                "Rejected document with {} validation errors",
                report.errors.len()
            );
            return Err(DocumentServiceError::validation_failed(report.errors));
        }
        if report.has_warnings() {
            tracing::debug!("Accepted document with {} warnings", report.warnings.len());
        }

        let document = OrgDocument::from_json(root)?;
        Ok(AcceptedDocument { document, report })
    }

    /// Read, validate and normalize the stored document, and remember it as
    /// the reset snapshot.
    pub async fn load(&self) -> Result<AcceptedDocument, DocumentServiceError> {
        let raw = self.store.load().await?;
        let accepted = self.prepare(&raw)?;

        *self.snapshot.write().await = Some(accepted.document.clone());
        tracing::info!(
            "Loaded organization document from {} ({} nodes)",
            self.store.location(),
            accepted.report.stats.total_nodes
        );
        Ok(accepted)
    }

    /// Parse uploaded bytes through the same pipeline as [`load`](Self::load).
    ///
    /// The reset snapshot is not affected.
    pub fn parse_upload(&self, bytes: &[u8]) -> Result<AcceptedDocument, DocumentServiceError> {
        let raw: Value = serde_json::from_slice(bytes)?;
        self.prepare(&raw)
    }

    /// Persist `document` (with `counts` annotations) to the store.
    ///
    /// The document is re-validated first; blocking errors abort the save.
    pub async fn save(&self, document: &OrgDocument) -> Result<SaveReceipt, DocumentServiceError> {
        let report = document.validate(&self.limits);
        if !report.is_valid {
            return Err(DocumentServiceError::validation_failed(report.errors));
        }

        let json = document.to_json()?;
        self.store.save(&json).await?;

        let location = self.store.location();
        tracing::info!(
            "Saved organization document to {} ({} nodes, {} warnings)",
            location,
            report.stats.total_nodes,
            report.warnings.len()
        );
        Ok(SaveReceipt {
            timestamp: Utc::now(),
            location,
            warnings: report.warnings,
        })
    }

    /// The last document read by [`load`](Self::load).
    pub async fn reset(&self) -> Result<OrgDocument, DocumentServiceError> {
        let snapshot = self
            .snapshot
            .read()
            .await
            .clone()
            .ok_or(DocumentServiceError::NoDocumentLoaded)?;
        tracing::info!("Reset to last loaded document");
        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> Option<OrgDocument> {
        self.snapshot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::NewNode;
    use serde_json::json;

    fn service(document: Value) -> DocumentService<MemoryStore> {
        DocumentService::new(Arc::new(MemoryStore::with_document(document)))
    }

    #[tokio::test]
    async fn test_load_unwraps_and_remembers_snapshot() {
        let service = service(json!({"organization": {"label": "Board", "children": [{"label": "HR"}]}}));

        let accepted = service.load().await.unwrap();
        assert_eq!(accepted.document.root().id, "board");
        assert_eq!(service.snapshot().await, Some(accepted.document));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_document() {
        let service = service(json!({"label": "Board", "children": [{"name": "No label"}]}));

        let err = service.load().await.unwrap_err();
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
        assert!(service.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_document() {
        let service = DocumentService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.load().await,
            Err(DocumentServiceError::Store(_))
        ));
    }

    #[test]
    fn test_parse_upload() {
        let service = service(json!({"label": "Board"}));

        let accepted = service.parse_upload(br#"{"label": "Uploaded"}"#).unwrap();
        assert_eq!(accepted.document.root().label, "Uploaded");

        assert!(matches!(
            service.parse_upload(b"{ nope"),
            Err(DocumentServiceError::InvalidJson(_))
        ));
        assert!(matches!(
            service.parse_upload(b"[1, 2]"),
            Err(DocumentServiceError::NotAnObject)
        ));
    }

    #[tokio::test]
    async fn test_save_persists_counts_and_reset_returns_loaded() {
        let service = service(json!({"label": "Board", "children": [{"label": "HR"}]}));
        let loaded = service.load().await.unwrap().document;

        let (edited, _) = loaded
            .insert("board", NewNode::new("Guard").with_employment_type("military"))
            .unwrap();
        let receipt = service.save(&edited).await.unwrap();
        assert_eq!(receipt.location, "memory");

        let stored = service.store().load().await.unwrap();
        assert_eq!(stored["children"][1]["id"], "guard");
        assert_eq!(stored["counts"]["military"], 1);

        assert_eq!(service.reset().await.unwrap(), loaded);
    }

    #[tokio::test]
    async fn test_numeric_child_id_survives_upload_save_and_delete() {
        let service = service(json!({"label": "Board"}));
        let accepted = service
            .parse_upload(br#"{"label": "7", "children": [{"id": 7, "label": "Seven"}]}"#)
            .unwrap();
        let doc = accepted.document;
        assert_eq!(doc.root().id, "7_2");

        service.save(&doc).await.unwrap();

        let without_child = doc.delete("7").unwrap();
        assert_eq!(without_child.node_count(), 1);
        service.save(&without_child).await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_before_load() {
        let service = service(json!({"label": "Board"}));
        assert!(matches!(
            service.reset().await,
            Err(DocumentServiceError::NoDocumentLoaded)
        ));
    }
}
