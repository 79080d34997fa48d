//! Organization document handle
//!
//! [`OrgDocument`] is a caller-owned value: a normalized tree plus an id
//! index derived from it. There is no process-wide working document; whoever
//! holds the handle decides when to replace it with the result of a mutation.
//!
//! Mutations are copy-on-write. They return a new `OrgDocument` (with a
//! rebuilt index and fresh `counts`) and leave `self` untouched, so keeping
//! the previous handle is all an undo needs.

use crate::models::{NewNode, NodeUpdate, OrgNode};
use crate::operations::{self, TreeOperationError};
use crate::services::error::DocumentServiceError;
use crate::services::lookup;
use crate::services::node_index::NodeIndex;
use crate::services::normalizer::{normalize, unwrap_document};
use crate::services::search::filter_tree;
use crate::services::statistics::{
    aggregate, annotate_counts, level_breakdown, LevelSummary, SubtreeStats,
};
use crate::services::validator::{validate_tree, ValidationLimits, ValidationReport};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct OrgDocument {
    root: OrgNode,
    index: NodeIndex,
}

impl OrgDocument {
    /// Wrap a normalized tree, refreshing cached counts and the index.
    pub fn new(mut root: OrgNode) -> Self {
        annotate_counts(&mut root);
        let index = NodeIndex::build(&root);
        Self { root, index }
    }

    /// Normalize a raw document (bare root or `organization` wrapper).
    ///
    /// This does not validate; use
    /// [`DocumentService::prepare`](crate::services::DocumentService::prepare)
    /// when blocking errors must reject the input.
    pub fn from_json(document: &Value) -> Result<Self, DocumentServiceError> {
        let root = normalize(unwrap_document(document), None)
            .ok_or(DocumentServiceError::NotAnObject)?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &OrgNode {
        &self.root
    }

    pub fn into_root(self) -> OrgNode {
        self.root
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        lookup::list_all(&self.root).len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&OrgNode> {
        self.index.get(&self.root, id)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&OrgNode> {
        lookup::find_by_label(&self.root, label)
    }

    pub fn find_path(&self, id: &str) -> Vec<&OrgNode> {
        lookup::find_path(&self.root, id)
    }

    pub fn list_at_level(&self, level: usize) -> Vec<&OrgNode> {
        lookup::list_at_level(&self.root, level)
    }

    pub fn list_all(&self) -> Vec<&OrgNode> {
        lookup::list_all(&self.root)
    }

    /// Node for a deep-link id, or the root when the id is absent/unknown.
    pub fn resolve_deep_link(&self, id: Option<&str>) -> &OrgNode {
        lookup::resolve_deep_link_with(&self.root, id, |id| self.find_by_id(id))
    }

    /// Level of `id` below the root (root is level 0).
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.index.depth(id)
    }

    /// Aggregate over the whole chart.
    pub fn stats(&self) -> SubtreeStats {
        aggregate(&self.root)
    }

    /// Aggregate over the subtree rooted at `id`.
    pub fn stats_for(&self, id: &str) -> Option<SubtreeStats> {
        self.find_by_id(id).map(aggregate)
    }

    pub fn level_breakdown(&self) -> Vec<LevelSummary> {
        level_breakdown(&self.root)
    }

    /// Pruned copy of the tree for `query`; see [`filter_tree`].
    pub fn filter(&self, query: &str) -> Option<OrgNode> {
        filter_tree(&self.root, query)
    }

    pub fn validate(&self, limits: &ValidationLimits) -> ValidationReport {
        validate_tree(&self.root, limits)
    }

    /// Insert under `parent_id`; returns the new document and the new node's id.
    pub fn insert(
        &self,
        parent_id: &str,
        payload: NewNode,
    ) -> Result<(OrgDocument, String), TreeOperationError> {
        let (root, id) = operations::insert_child(&self.root, parent_id, payload)?;
        Ok((Self::with_counts(root), id))
    }

    pub fn update(&self, id: &str, patch: &NodeUpdate) -> Result<OrgDocument, TreeOperationError> {
        operations::update_node(&self.root, id, patch).map(Self::with_counts)
    }

    pub fn delete(&self, id: &str) -> Result<OrgDocument, TreeOperationError> {
        operations::delete_node(&self.root, id).map(Self::with_counts)
    }

    /// JSON form of the tree as persisted, `counts` included.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.root)
    }

    /// Mutations already refreshed `counts`; only the index is rebuilt.
    fn with_counts(root: OrgNode) -> Self {
        let index = NodeIndex::build(&root);
        Self { root, index }
    }
}

impl From<OrgNode> for OrgDocument {
    fn from(root: OrgNode) -> Self {
        Self::new(root)
    }
}
