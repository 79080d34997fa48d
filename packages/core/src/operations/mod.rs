//! Tree Operations
//!
//! Copy-on-write mutations over a normalized [`OrgNode`](crate::models::OrgNode)
//! tree and the error type they report.

pub mod error;
pub mod mutation;

pub use error::TreeOperationError;
pub use mutation::{delete_node, insert_child, update_node};
