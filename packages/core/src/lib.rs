//! OrgChart Core Business Logic Layer
//!
//! This crate provides the in-memory tree engine behind the organization
//! chart: normalization, aggregation, lookup, mutation, search and
//! validation, plus the document session and its persistence seam.
//!
//! # Architecture
//!
//! - **Owned Tree**: a node exclusively owns its ordered children
//! - **Copy-on-Write**: mutations return a new tree, the caller keeps or drops the old one
//! - **Derived Data**: `parentId`, `counts` and the id index are rebuilt, never trusted
//! - **One Traversal**: every query specializes `walk` or `fold`
//!
//! # Modules
//!
//! - [`models`] - `OrgNode`, insert/update payloads, employment categories
//! - [`utils`] - Identifier generation
//! - [`operations`] - Insert, update and delete
//! - [`services`] - Read-only engines, `OrgDocument` and `DocumentService`
//! - [`db`] - `DocumentStore` trait with file and memory backends
//!
//! # Examples
//!
//! ```rust
//! use orgchart_core::{NewNode, OrgDocument};
//! use serde_json::json;
//!
//! let doc = OrgDocument::from_json(&json!({
//!     "label": "Board",
//!     "children": [
//!         {"label": "Finance", "employmentType": "contractor"},
//!         {"label": "HR", "employmentType": "military"}
//!     ]
//! }))
//! .unwrap();
//!
//! assert_eq!(doc.stats().capacity, 3);
//!
//! let (doc, id) = doc.insert("hr", NewNode::new("Hiring")).unwrap();
//! assert_eq!(doc.find_path(&id).len(), 3);
//! ```

pub mod db;
pub mod models;
pub mod operations;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use db::{DocumentStore, JsonFileStore, MemoryStore, StoreError};
pub use models::*;
pub use operations::TreeOperationError;
pub use services::*;
