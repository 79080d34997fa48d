//! Organization Node Data Structures
//!
//! This module defines the `OrgNode` struct, the single entity of an
//! organization chart, plus the payload types used to create and patch nodes.
//!
//! # Architecture
//!
//! - **Owned Tree**: every node exclusively owns its ordered `children`
//! - **Derived Back-Reference**: `parent_id` is recomputed by normalization and
//!   never drives structure
//! - **Derived Counts**: `counts` is a display cache rebuilt after every
//!   mutation, never an input
//! - **Open Fields**: keys the chart does not know about are kept in `extra`
//!   and written back unchanged
//!
//! # Examples
//!
//! ```rust
//! use orgchart_core::models::OrgNode;
//!
//! let board = OrgNode::new("board", "Board")
//!     .with_child(OrgNode::new("finance", "Finance").with_employment_type("contractor"))
//!     .with_child(OrgNode::new("hr", "HR").with_employment_type("military"));
//!
//! assert_eq!(board.children.len(), 2);
//! assert!(board.is_root());
//! ```

use crate::models::employment::{CategoryCounts, EmploymentCategory};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One position or unit in the organization tree.
///
/// # Fields
///
/// - `id`: Unique identifier, slug of the label or a synthetic fallback
/// - `label`: Display title of the unit or role (required, may be blank while editing)
/// - `name`: Person occupying the role
/// - `employment_type`: Free text, classified by [`EmploymentCategory::classify`]
/// - `parent_id`: Id of the owning node (`None` for the root)
/// - `children`: Ordered sub-units; order drives layout and row index
/// - `counts`: Cached descendant tallies for display
/// - `extra`: Any other fields present in the source document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub children: Vec<OrgNode>,

    /// Descendant tallies, excluding the node itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<CategoryCounts>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrgNode {
    /// Create a childless node with the given id and label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_employment_type(mut self, employment_type: impl Into<String>) -> Self {
        self.employment_type = Some(employment_type.into());
        self
    }

    /// Append a child, setting its `parent_id` to this node's id.
    pub fn with_child(mut self, mut child: OrgNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// A node without a parent reference is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether a person is assigned (non-blank `name`).
    pub fn has_person(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    pub fn category(&self) -> EmploymentCategory {
        EmploymentCategory::classify(self.employment_type.as_deref())
    }

    /// Copy of this node's own fields with no children.
    pub fn detached(&self) -> OrgNode {
        OrgNode {
            id: self.id.clone(),
            label: self.label.clone(),
            name: self.name.clone(),
            employment_type: self.employment_type.clone(),
            parent_id: self.parent_id.clone(),
            children: Vec::new(),
            counts: self.counts,
            extra: self.extra.clone(),
        }
    }

    /// Remove cached `counts` from this node and every descendant.
    pub fn clear_counts(&mut self) {
        self.counts = None;
        for child in &mut self.children {
            child.clear_counts();
        }
    }
}

/// Payload for inserting a new node under an existing parent.
///
/// The id is always generated from `label`; callers cannot choose it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_employment_type(mut self, employment_type: impl Into<String>) -> Self {
        self.employment_type = Some(employment_type.into());
        self
    }

    /// Materialize the payload as a childless node.
    pub fn into_node(self, id: String, parent_id: &str) -> OrgNode {
        OrgNode {
            id,
            label: self.label,
            name: blank_to_none(self.name),
            employment_type: blank_to_none(self.employment_type),
            parent_id: Some(parent_id.to_string()),
            children: Vec::new(),
            counts: None,
            extra: self
                .extra
                .into_iter()
                .filter(|(key, _)| !is_structural_key(key))
                .collect(),
        }
    }
}

/// Keys that only normalization and mutation may set.
pub(crate) fn is_structural_key(key: &str) -> bool {
    matches!(key, "id" | "parentId" | "children" | "counts")
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept both plain values and `null` for the double-Option pattern.
///
/// - Missing field → None (don't update)
/// - null → Some(None) (clear)
/// - "value" → Some(Some("value")) (set)
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial update of a node's own fields.
///
/// `id`, `parent_id` and `children` are not reachable through this path.
///
/// # Double-Option Pattern
///
/// `name` and `employment_type` distinguish three states:
///
/// - `None`: leave the field alone
/// - `Some(None)`: clear the field
/// - `Some(Some(value))`: set the field
///
/// # Examples
///
/// ```rust
/// # use orgchart_core::models::NodeUpdate;
/// let rename = NodeUpdate::new().with_label("People Operations");
/// let vacate = NodeUpdate {
///     name: Some(None),
///     ..Default::default()
/// };
/// assert!(!rename.is_empty());
/// assert!(!vacate.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub name: Option<Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub employment_type: Option<Option<String>>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn with_employment_type(mut self, employment_type: impl Into<String>) -> Self {
        self.employment_type = Some(Some(employment_type.into()));
        self
    }

    /// Check if update contains any changes
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.name.is_none() && self.employment_type.is_none()
    }

    /// Merge the patch into `node`'s own fields.
    pub fn apply_to(&self, node: &mut OrgNode) {
        if let Some(label) = &self.label {
            node.label = label.clone();
        }
        if let Some(name) = &self.name {
            node.name = blank_to_none(name.clone());
        }
        if let Some(employment_type) = &self.employment_type {
            node.employment_type = blank_to_none(employment_type.clone());
        }
    }
}
