//! Error types for tree mutations
//!
//! Every mutation either returns a new tree or one of these errors; the
//! caller's tree is never touched in either case.

use thiserror::Error;

/// Errors that can occur during insert, update or delete.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::operations::TreeOperationError;
///
/// let err = TreeOperationError::parent_not_found("legal");
/// assert_eq!(err.to_string(), "Parent node 'legal' does not exist");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeOperationError {
    /// Target of an update or delete does not exist
    #[error("Node '{node_id}' does not exist")]
    NodeNotFound { node_id: String },

    /// Insert target does not exist
    #[error("Parent node '{parent_id}' does not exist")]
    ParentNotFound { parent_id: String },

    /// The root has no parent to detach from
    #[error("Root node '{node_id}' cannot be deleted")]
    RootCannotBeDeleted { node_id: String },

    /// New nodes and label updates must carry a non-blank label
    #[error("Node label is required")]
    MissingLabel,
}

impl TreeOperationError {
    /// Create a NodeNotFound error
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    /// Create a ParentNotFound error
    pub fn parent_not_found(parent_id: impl Into<String>) -> Self {
        Self::ParentNotFound {
            parent_id: parent_id.into(),
        }
    }

    /// Create a RootCannotBeDeleted error
    pub fn root_cannot_be_deleted(node_id: impl Into<String>) -> Self {
        Self::RootCannotBeDeleted {
            node_id: node_id.into(),
        }
    }
}
