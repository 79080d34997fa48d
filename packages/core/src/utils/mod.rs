//! Utility functions for the organization chart core
//!
//! This module provides common utility functions used across the codebase.

mod id;

pub use id::{fallback_id, generate_id, id_text, slugify, IdAllocator};
