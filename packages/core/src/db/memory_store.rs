//! In-memory document store for tests and ephemeral sessions.

use crate::db::document_store::DocumentStore;
use crate::db::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

const LOCATION: &str = "memory";

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `document`.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Value, StoreError> {
        self.document
            .lock()
            .await
            .clone()
            .ok_or_else(|| StoreError::not_found(LOCATION))
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        *self.document.lock().await = Some(document.clone());
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}
