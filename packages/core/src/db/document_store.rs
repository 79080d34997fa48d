//! DocumentStore Trait - Persistence Abstraction
//!
//! The organization chart is stored as one JSON document. A store only moves
//! whole documents in and out; parsing, validation and normalization happen
//! in [`DocumentService`](crate::services::DocumentService).
//!
//! # Examples
//!
//! ```rust
//! use orgchart_core::db::{DocumentStore, MemoryStore};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! store.save(&json!({"label": "Board"})).await.unwrap();
//! assert_eq!(store.load().await.unwrap()["label"], "Board");
//! # });
//! ```

use crate::db::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Load/save sink for the whole document.
///
/// Implementations must be `Send + Sync` so a service holding one can be
/// shared across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the stored document.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when nothing has been saved yet.
    async fn load(&self) -> Result<Value, StoreError>;

    /// Replace the stored document.
    async fn save(&self, document: &Value) -> Result<(), StoreError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}
