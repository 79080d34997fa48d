//! Integration tests for DocumentService over a JSON file
//!
//! Tests cover:
//! - Loading wrapped and bare documents from disk
//! - Rejecting documents with blocking validation errors
//! - Edit → save → reload cycles
//! - Reset returning the last loaded (not last saved) document

use orgchart_core::db::{DocumentStore, JsonFileStore};
use orgchart_core::models::{NewNode, NodeUpdate};
use orgchart_core::services::{DocumentService, DocumentServiceError};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

async fn setup(document: serde_json::Value) -> (DocumentService<JsonFileStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("public").join("data.json"));
    store.save(&document).await.unwrap();
    (DocumentService::new(Arc::new(store)), temp_dir)
}

fn organization() -> serde_json::Value {
    json!({
        "organization": {
            "id": "saha",
            "label": "Headquarters",
            "children": [
                {"id": "ops", "label": "Operations", "employmentType": "نظامی",
                 "children": [{"label": "Dispatch", "name": "Reza"}]},
                {"id": "support", "label": "Support", "employmentType": "contractor", "theme": "amber"}
            ]
        }
    })
}

#[tokio::test]
async fn test_load_normalizes_file_contents() {
    let (service, _dir) = setup(organization()).await;

    let accepted = service.load().await.unwrap();
    let doc = accepted.document;

    assert_eq!(doc.root().id, "saha");
    assert_eq!(doc.node_count(), 4);
    assert_eq!(doc.find_by_id("dispatch").unwrap().parent_id.as_deref(), Some("ops"));
    assert_eq!(
        doc.find_by_id("support").unwrap().extra.get("theme"),
        Some(&json!("amber"))
    );
    // Dispatch has no id in the file
    assert!(accepted.report.warnings.iter().any(|w| w.contains("Dispatch")));
}

#[tokio::test]
async fn test_invalid_file_is_rejected() {
    let (service, _dir) = setup(json!({"label": "Root", "children": {"label": "x"}})).await;

    let err = service.load().await.unwrap_err();
    assert!(matches!(err, DocumentServiceError::ValidationFailed { .. }));
    assert!(service.snapshot().await.is_none());
}

#[tokio::test]
async fn test_edit_save_reload_cycle() {
    let (service, _dir) = setup(organization()).await;
    let loaded = service.load().await.unwrap().document;

    let (doc, id) = loaded
        .insert("ops", NewNode::new("Maintenance").with_employment_type("employee"))
        .unwrap();
    let doc = doc
        .update("support", &NodeUpdate::new().with_name("Leila"))
        .unwrap();
    let receipt = service.save(&doc).await.unwrap();
    assert!(receipt.location.ends_with("data.json"));

    let reloaded = service.load().await.unwrap().document;
    assert_eq!(reloaded, doc);
    assert_eq!(reloaded.find_path(&id).len(), 3);
    assert_eq!(reloaded.stats().total_personnel, 2);
}

#[tokio::test]
async fn test_reset_returns_last_loaded_not_last_saved() {
    let (service, _dir) = setup(organization()).await;
    let loaded = service.load().await.unwrap().document;

    let edited = loaded.delete("support").unwrap();
    service.save(&edited).await.unwrap();

    assert_eq!(service.reset().await.unwrap(), loaded);
}

#[test]
fn test_upload_bytes_without_runtime() {
    let (service, _dir) = tokio_test::block_on(setup(organization()));

    let bytes = serde_json::to_vec(&organization()).unwrap();
    let accepted = service.parse_upload(&bytes).unwrap();
    assert_eq!(accepted.document.root().label, "Headquarters");

    let err = service.parse_upload(br#"{"children": []}"#).unwrap_err();
    assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
}
