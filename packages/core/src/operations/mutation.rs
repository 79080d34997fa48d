//! Mutation Engine
//!
//! Copy-on-write insert, update and delete. Each operation takes the current
//! tree by reference and returns a new tree; the input is never modified,
//! so a caller can discard the result (or keep an older version) to undo.
//!
//! Every successful mutation recomputes the cached `counts` on the new tree.

use crate::models::{NewNode, NodeUpdate, OrgNode};
use crate::operations::error::TreeOperationError;
use crate::services::lookup::{node_at_mut, route_to};
use crate::services::statistics::annotate_counts;
use crate::utils::IdAllocator;

/// Append a new child to the end of `parent_id`'s children.
///
/// Returns the new tree and the id generated for the inserted node. The id
/// is derived from the label and suffixed if it is already in use.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::models::{NewNode, OrgNode};
/// use orgchart_core::operations::insert_child;
///
/// let root = OrgNode::new("board", "Board");
/// let (updated, id) = insert_child(&root, "board", NewNode::new("Audit")).unwrap();
///
/// assert_eq!(id, "audit");
/// assert_eq!(updated.children[0].parent_id.as_deref(), Some("board"));
/// assert!(root.children.is_empty());
/// ```
pub fn insert_child(
    root: &OrgNode,
    parent_id: &str,
    payload: NewNode,
) -> Result<(OrgNode, String), TreeOperationError> {
    if payload.label.trim().is_empty() {
        return Err(TreeOperationError::MissingLabel);
    }
    let route =
        route_to(root, parent_id).ok_or_else(|| TreeOperationError::parent_not_found(parent_id))?;

    let mut ids = IdAllocator::seeded_from_tree(root);
    let id = ids.allocate(Some(payload.label.as_str()));

    let mut updated = root.clone();
    let parent = node_at_mut(&mut updated, &route)
        .ok_or_else(|| TreeOperationError::parent_not_found(parent_id))?;
    let actual_parent_id = parent.id.clone();
    parent
        .children
        .push(payload.into_node(id.clone(), &actual_parent_id));

    annotate_counts(&mut updated);
    tracing::debug!("Inserted node '{}' under '{}'", id, parent_id);
    Ok((updated, id))
}

/// Merge `patch` into the own fields of node `id`.
///
/// An empty patch succeeds and yields an equal tree.
pub fn update_node(
    root: &OrgNode,
    id: &str,
    patch: &NodeUpdate,
) -> Result<OrgNode, TreeOperationError> {
    if patch.label.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(TreeOperationError::MissingLabel);
    }
    let route = route_to(root, id).ok_or_else(|| TreeOperationError::node_not_found(id))?;

    let mut updated = root.clone();
    let node =
        node_at_mut(&mut updated, &route).ok_or_else(|| TreeOperationError::node_not_found(id))?;
    patch.apply_to(node);

    annotate_counts(&mut updated);
    tracing::debug!("Updated node '{}'", id);
    Ok(updated)
}

/// Remove node `id` and its whole subtree from its parent.
pub fn delete_node(root: &OrgNode, id: &str) -> Result<OrgNode, TreeOperationError> {
    let route = route_to(root, id).ok_or_else(|| TreeOperationError::node_not_found(id))?;
    let Some((&position, parent_route)) = route.split_last() else {
        return Err(TreeOperationError::root_cannot_be_deleted(id));
    };

    let mut updated = root.clone();
    let parent = node_at_mut(&mut updated, parent_route)
        .ok_or_else(|| TreeOperationError::node_not_found(id))?;
    let removed = parent.children.remove(position);

    annotate_counts(&mut updated);
    tracing::debug!(
        "Deleted node '{}' ({} children removed with it)",
        removed.id,
        removed.children.len()
    );
    Ok(updated)
}
