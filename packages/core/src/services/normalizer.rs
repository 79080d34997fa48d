//! Tree Normalizer
//!
//! Turns arbitrary JSON into a canonical [`OrgNode`] tree:
//!
//! - every node has an `id` (existing ids are kept, missing ones generated)
//! - every non-root node's `parent_id` is its owner's id, the root has none
//! - `children` is always a list; `null` and non-object entries are dropped
//! - cached `counts` from the input are discarded
//! - unknown keys are carried in `extra`
//!
//! Output is always a fresh tree, so normalizing an already-normalized tree is
//! an identity on ids and shape.

use crate::models::{is_structural_key, OrgNode};
use crate::utils::{id_text, IdAllocator};
use serde_json::{Map, Value};

/// Field some documents use to wrap the root: `{ "organization": { ... } }`.
pub const ORGANIZATION_KEY: &str = "organization";

/// Return the tree root of a loaded document, accepting both the bare root
/// and the `organization` wrapper.
pub fn unwrap_document(document: &Value) -> &Value {
    match document.get(ORGANIZATION_KEY) {
        Some(inner) if inner.is_object() => inner,
        _ => document,
    }
}

/// Normalize a whole document (root or wrapped root).
///
/// Returns `None` when the root is not a JSON object.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::services::normalizer::normalize_document;
/// use serde_json::json;
///
/// let root = normalize_document(&json!({
///     "organization": {
///         "label": "Board",
///         "children": [{ "label": "HR" }, null]
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(root.id, "board");
/// assert_eq!(root.children.len(), 1);
/// assert_eq!(root.children[0].id, "hr");
/// assert_eq!(root.children[0].parent_id.as_deref(), Some("board"));
/// ```
pub fn normalize_document(document: &Value) -> Option<OrgNode> {
    normalize(unwrap_document(document), None)
}

/// Normalize a (sub)tree, optionally attaching it under `parent_id`.
pub fn normalize(value: &Value, parent_id: Option<&str>) -> Option<OrgNode> {
    let mut ids = IdAllocator::seeded_from_value(value);
    let mut dropped = 0usize;
    let node = normalize_node(value, parent_id, &mut ids, &mut dropped);
    if dropped > 0 {
        tracing::warn!("Normalization dropped {} non-object child entries", dropped);
    }
    node
}

fn normalize_node(
    value: &Value,
    parent_id: Option<&str>,
    ids: &mut IdAllocator,
    dropped: &mut usize,
) -> Option<OrgNode> {
    let object = value.as_object()?;

    let label = text_field(object, "label");
    let id = match object.get("id").and_then(id_text) {
        Some(id) => id,
        None => ids.allocate(label.as_deref()),
    };

    let children = match object.get("children") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let child = normalize_node(entry, Some(id.as_str()), ids, dropped);
                if child.is_none() {
                    *dropped += 1;
                }
                child
            })
            .collect(),
        _ => Vec::new(),
    };

    let extra = object
        .iter()
        .filter(|(key, _)| !is_structural_key(key) && !is_own_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some(OrgNode {
        id,
        label: label.unwrap_or_default(),
        name: text_field(object, "name"),
        employment_type: text_field(object, "employmentType"),
        parent_id: parent_id.map(str::to_string),
        children,
        counts: None,
        extra,
    })
}

fn is_own_field(key: &str) -> bool {
    matches!(key, "label" | "name" | "employmentType")
}

/// Read a scalar field as text. Numbers and booleans are stringified,
/// `null`, arrays and objects are treated as absent.
fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
