//! Node identifier generation
//!
//! Identifiers are derived from the label so that they stay legible in URLs
//! and exported files: `"Human Resources"` becomes `human_resources`. Letters
//! of any script are word characters, so non-Latin labels keep their text.
//!
//! A synthetic `node_<millis>_<suffix>` identifier is used only when the label
//! produces an empty slug. Collisions with identifiers already present in a
//! document are resolved by [`IdAllocator`] with a numeric suffix.

use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

/// Runs of anything that is not a (Unicode) word character
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w]+").unwrap());

const FALLBACK_PREFIX: &str = "node";

/// Slug a label: trim, lower-case, collapse non-word runs to `_`, strip edge
/// underscores. Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use orgchart_core::utils::slugify;
///
/// assert_eq!(slugify("  Human Resources "), Some("human_resources".to_string()));
/// assert_eq!(slugify("R&D / Labs"), Some("r_d_labs".to_string()));
/// assert_eq!(slugify("--"), None);
/// ```
pub fn slugify(label: &str) -> Option<String> {
    let lowered = label.trim().to_lowercase();
    let replaced = NON_WORD_RE.replace_all(&lowered, "_");
    let slug = replaced.trim_matches('_');
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// Synthetic identifier for nodes whose label yields no slug.
///
/// Not deterministic and not guaranteed unique; see [`IdAllocator`].
pub fn fallback_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        FALLBACK_PREFIX,
        Utc::now().timestamp_millis(),
        &suffix[..5]
    )
}

/// Read a raw JSON `id` as text.
///
/// Strings are taken as-is, numbers and booleans are stringified. Empty
/// strings, `null`, arrays and objects count as no id.
///
/// ```
/// use orgchart_core::utils::id_text;
/// use serde_json::json;
///
/// assert_eq!(id_text(&json!(7)), Some("7".to_string()));
/// assert_eq!(id_text(&json!(true)), Some("true".to_string()));
/// assert_eq!(id_text(&json!("")), None);
/// ```
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Identifier for a label, without collision handling.
///
/// Deterministic for any label with a non-empty slug.
pub fn generate_id(label: Option<&str>) -> String {
    label.and_then(slugify).unwrap_or_else(fallback_id)
}

/// Hands out identifiers that do not clash with ones already taken.
///
/// The first candidate is [`generate_id`]; on collision `_2`, `_3`, ... are
/// appended until a free identifier is found.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every `id` in a raw JSON tree, read through [`id_text`].
    pub fn seeded_from_value(value: &Value) -> Self {
        let mut allocator = Self::new();
        allocator.collect_value_ids(value);
        allocator
    }

    /// Seed with every id in a normalized tree.
    pub fn seeded_from_tree(root: &crate::models::OrgNode) -> Self {
        let mut allocator = Self::new();
        for node in crate::services::lookup::list_all(root) {
            allocator.reserve(&node.id);
        }
        allocator
    }

    fn collect_value_ids(&mut self, value: &Value) {
        let Some(object) = value.as_object() else {
            return;
        };
        if let Some(id) = object.get("id").and_then(id_text) {
            self.reserve(&id);
        }
        if let Some(children) = object.get("children").and_then(Value::as_array) {
            for child in children {
                self.collect_value_ids(child);
            }
        }
    }

    /// Mark an identifier as used. Empty identifiers are ignored.
    pub fn reserve(&mut self, id: &str) {
        if !id.is_empty() {
            self.taken.insert(id.to_string());
        }
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Produce and reserve a fresh identifier for `label`.
    pub fn allocate(&mut self, label: Option<&str>) -> String {
        let base = generate_id(label);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        if candidate != base {
            tracing::debug!("Id '{}' already taken, using '{}'", base, candidate);
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
