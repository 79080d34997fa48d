//! File-backed document store
//!
//! Writes go to a sibling temporary file first and are then renamed over the
//! target, so a crash mid-save leaves the previous document intact.

use crate::db::document_store::DocumentStore;
use crate::db::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "document.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Value, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        let document = serde_json::from_slice(&bytes)?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(document)
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json.as_bytes())
            .await
            .map_err(|e| StoreError::io(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        let err = store.load().await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_save_creates_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("public").join("data.json"));
        let document = json!({"id": "board", "label": "هیئت مدیره", "children": []});

        store.save(&document).await.unwrap();
        assert_eq!(store.load().await.unwrap(), document);
        assert!(!store.temp_path().exists());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"id\""), "expected pretty output: {}", raw);
    }

    #[tokio::test]
    async fn test_invalid_json_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
