//! Persistence Layer
//!
//! The whole chart is one JSON document, loaded once per session and saved
//! back in full. [`DocumentStore`] is the seam; [`JsonFileStore`] is the
//! production backend and [`MemoryStore`] backs tests.

mod document_store;
mod error;
mod json_file_store;
mod memory_store;

pub use document_store::DocumentStore;
pub use error::StoreError;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
