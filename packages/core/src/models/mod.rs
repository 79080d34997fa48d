//! Data Models
//!
//! This module contains the data structures of an organization chart:
//!
//! - `OrgNode` - One position/unit; the tree is built from owned children
//! - `NewNode` / `NodeUpdate` - Insert payload and partial patch
//! - `EmploymentCategory` / `CategoryCounts` - Personnel classification buckets

mod employment;
mod node;

pub(crate) use node::is_structural_key;
pub use employment::{CategoryCounts, EmploymentCategory};
pub use node::{NewNode, NodeUpdate, OrgNode};
