//! Tree Services
//!
//! Read-only engines over a normalized tree and the session layer on top:
//!
//! - `traversal` - `walk` (pre-order, early exit) and `fold` (post-order)
//! - `normalizer` - raw JSON to canonical `OrgNode` tree
//! - `statistics` - capacity, personnel and category tallies
//! - `lookup` - paths, id/label lookups, level listings
//! - `node_index` - rebuildable id index
//! - `search` - substring filter that keeps ancestors of matches
//! - `validator` - error/warning report over raw JSON
//! - `export` - JSON envelope, CSV and text outline
//! - `document` - `OrgDocument`, the caller-owned handle
//! - `document_service` - load/upload/save/reset against a `DocumentStore`

pub mod document;
pub mod document_service;
pub mod error;
pub mod export;
pub mod lookup;
pub mod node_index;
pub mod normalizer;
pub mod search;
pub mod statistics;
pub mod traversal;
pub mod validator;

pub use document::OrgDocument;
pub use document_service::{AcceptedDocument, DocumentService, SaveReceipt};
pub use error::DocumentServiceError;
pub use export::{ExportError, ExportFormat};
pub use node_index::NodeIndex;
pub use statistics::{LevelSummary, SubtreeStats};
pub use validator::{ValidationLimits, ValidationReport, ValidationStats};
