//! Document Validator
//!
//! Checks a raw JSON document (before normalization) and produces a
//! [`ValidationReport`]. Errors block saving and uploads; warnings are
//! informational only.
//!
//! Validation runs on `serde_json::Value` rather than [`OrgNode`] so that
//! shape problems the normalizer would silently repair (non-array
//! `children`, missing labels, repeated ids) are still reported.
//!
//! # Rules
//!
//! Errors:
//! - root is not an object
//! - `label` missing or blank
//! - `children` present but not an array
//! - a node repeating the id of one of its own ancestors (reference cycle)
//!
//! Warnings:
//! - missing `id`, or an id already used elsewhere in the document
//! - label longer than [`ValidationLimits::max_label_len`] characters
//! - unrecognized `employmentType`
//! - depth beyond [`ValidationLimits::max_depth`]
//! - more than [`ValidationLimits::max_children`] children
//! - duplicate labels among direct siblings
//! - non-object entries in `children`
//! - nonzero `counts` on a node without children

use crate::models::{EmploymentCategory, OrgNode};
use crate::utils::id_text;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Placeholder used in paths for nodes without a usable label
const UNNAMED: &str = "(unnamed)";

/// Sanity thresholds for warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationLimits {
    pub max_label_len: usize,
    /// Deepest level (root is 0) accepted without a warning
    pub max_depth: usize,
    pub max_children: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_label_len: 100,
            max_depth: 10,
            max_children: 50,
        }
    }
}

/// Shape statistics gathered during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub total_nodes: usize,
    /// Number of distinct levels (a lone root has one)
    pub total_levels: usize,
    pub nodes_with_name: usize,
    pub nodes_with_employment_type: usize,
    pub nodes_with_children: usize,
    pub max_children_count: usize,
    /// Mean fan-out among nodes that have children, two decimals
    pub average_children_count: f64,
    pub total_children_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
    pub timestamp: DateTime<Utc>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validate a raw document root.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::services::validator::{validate, ValidationLimits};
/// use serde_json::json;
///
/// let report = validate(
///     &json!({"id": "board", "label": "Board", "children": {"label": "HR"}}),
///     &ValidationLimits::default(),
/// );
/// assert!(!report.is_valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
pub fn validate(root: &Value, limits: &ValidationLimits) -> ValidationReport {
    let mut run = ValidationRun {
        limits,
        errors: Vec::new(),
        warnings: Vec::new(),
        stats: ValidationStats::default(),
        seen_ids: HashSet::new(),
        ancestor_ids: Vec::new(),
        path: Vec::new(),
    };

    match root.as_object() {
        Some(object) => run.visit(object, 0),
        None => run
            .errors
            .push("Document root must be a JSON object".to_string()),
    }

    let mut stats = run.stats;
    if stats.nodes_with_children > 0 {
        let average = stats.total_children_count as f64 / stats.nodes_with_children as f64;
        stats.average_children_count = (average * 100.0).round() / 100.0;
    }

    tracing::debug!(
        "Validated {} nodes: {} errors, {} warnings",
        stats.total_nodes,
        run.errors.len(),
        run.warnings.len()
    );

    ValidationReport {
        is_valid: run.errors.is_empty(),
        errors: run.errors,
        warnings: run.warnings,
        stats,
        timestamp: Utc::now(),
    }
}

/// Validate an already-normalized tree.
pub fn validate_tree(root: &OrgNode, limits: &ValidationLimits) -> ValidationReport {
    match serde_json::to_value(root) {
        Ok(value) => validate(&value, limits),
        Err(e) => validate(&Value::String(e.to_string()), limits),
    }
}

struct ValidationRun<'l> {
    limits: &'l ValidationLimits,
    errors: Vec<String>,
    warnings: Vec<String>,
    stats: ValidationStats,
    seen_ids: HashSet<String>,
    ancestor_ids: Vec<String>,
    path: Vec<String>,
}

impl ValidationRun<'_> {
    fn visit(&mut self, node: &Map<String, Value>, level: usize) {
        let label = node.get("label").and_then(Value::as_str).map(str::trim);
        self.path
            .push(label.filter(|l| !l.is_empty()).unwrap_or(UNNAMED).to_string());
        let display = self.path.last().cloned().unwrap_or_default();

        let id = node.get("id").and_then(id_text);
        if let Some(id) = &id {
            if self.ancestor_ids.contains(id) {
                self.errors.push(format!(
                    "Reference cycle: node '{}' repeats the id of an ancestor at {}",
                    id,
                    self.path_text()
                ));
                self.path.pop();
                return;
            }
        }

        self.stats.total_nodes += 1;
        self.stats.total_levels = self.stats.total_levels.max(level + 1);

        match label {
            Some(l) if !l.is_empty() => {
                let length = l.chars().count();
                if length > self.limits.max_label_len {
                    self.warnings.push(format!(
                        "Label of '{}' is too long ({} characters)",
                        display, length
                    ));
                }
            }
            _ => self
                .errors
                .push(format!("Node at {} has no \"label\"", self.path_text())),
        }

        match &id {
            Some(id) => {
                if !self.seen_ids.insert(id.clone()) {
                    self.warnings.push(format!(
                        "Duplicate id '{}' at {}",
                        id,
                        self.path_text()
                    ));
                }
            }
            None => self
                .warnings
                .push(format!("Node '{}' at {} has no \"id\"", display, self.path_text())),
        }

        if has_text(node, "name") {
            self.stats.nodes_with_name += 1;
        }
        match node.get("employmentType") {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) if raw.trim().is_empty() => {}
            Some(Value::String(raw)) => {
                self.stats.nodes_with_employment_type += 1;
                if !EmploymentCategory::is_recognized(raw) {
                    self.warnings.push(format!(
                        "Employment type '{}' of '{}' is not a recognized category",
                        raw, display
                    ));
                }
            }
            Some(other) => {
                self.stats.nodes_with_employment_type += 1;
                self.warnings.push(format!(
                    "Employment type of '{}' should be text, found {}",
                    display, other
                ));
            }
        }

        if level > self.limits.max_depth {
            self.warnings.push(format!(
                "Tree is very deep at '{}' (level {})",
                display,
                level + 1
            ));
        }

        let children: &[Value] = match node.get("children") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(children)) => children,
            Some(_) => {
                self.errors.push(format!(
                    "\"children\" of '{}' must be an array",
                    display
                ));
                &[]
            }
        };

        if children.is_empty() && counts_total(node) > 0 {
            self.warnings.push(format!(
                "'{}' carries personnel counts but has no children",
                display
            ));
        }

        if !children.is_empty() {
            self.stats.nodes_with_children += 1;
            self.stats.total_children_count += children.len();
            self.stats.max_children_count = self.stats.max_children_count.max(children.len());

            if children.len() > self.limits.max_children {
                self.warnings.push(format!(
                    "'{}' has many children ({})",
                    display,
                    children.len()
                ));
            }
            self.check_sibling_labels(&display, children);

            if let Some(id) = &id {
                self.ancestor_ids.push(id.clone());
            }
            for (position, child) in children.iter().enumerate() {
                match child.as_object() {
                    Some(child) => self.visit(child, level + 1),
                    None => self.warnings.push(format!(
                        "Entry {} in \"children\" of '{}' is not a node and will be dropped",
                        position, display
                    )),
                }
            }
            if id.is_some() {
                self.ancestor_ids.pop();
            }
        }

        self.path.pop();
    }

    fn check_sibling_labels(&mut self, display: &str, children: &[Value]) {
        let mut labels = HashSet::new();
        let mut duplicates = Vec::new();
        for label in children
            .iter()
            .filter_map(|child| child.get("label").and_then(Value::as_str))
            .filter(|label| !label.is_empty())
        {
            if !labels.insert(label) && !duplicates.contains(&label) {
                duplicates.push(label);
            }
        }
        if !duplicates.is_empty() {
            self.warnings.push(format!(
                "'{}' has children with duplicate labels: {}",
                display,
                duplicates.join(", ")
            ));
        }
    }

    fn path_text(&self) -> String {
        self.path.join(" > ")
    }
}

fn has_text(node: &Map<String, Value>, key: &str) -> bool {
    node.get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn counts_total(node: &Map<String, Value>) -> u64 {
    node.get("counts")
        .and_then(Value::as_object)
        .map(|counts| counts.values().filter_map(Value::as_u64).sum())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value) -> ValidationReport {
        validate(&value, &ValidationLimits::default())
    }

    fn board() -> Value {
        json!({
            "id": "board",
            "label": "Board",
            "name": "Maryam",
            "children": [
                {"id": "finance", "label": "Finance", "employmentType": "contractor", "children": []},
                {"id": "hr", "label": "HR", "employmentType": "military",
                 "children": [{"id": "hiring", "label": "Hiring", "name": "Ali"}]}
            ]
        })
    }

    #[test]
    fn test_clean_document_is_valid() {
        let report = check(board());
        assert!(report.is_valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
        assert!(!report.has_warnings(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_stats() {
        let stats = check(board()).stats;
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_levels, 3);
        assert_eq!(stats.nodes_with_name, 2);
        assert_eq!(stats.nodes_with_employment_type, 2);
        assert_eq!(stats.nodes_with_children, 2);
        assert_eq!(stats.max_children_count, 2);
        assert_eq!(stats.total_children_count, 3);
        assert_eq!(stats.average_children_count, 1.5);
    }

    #[test]
    fn test_non_object_root() {
        let report = check(json!([]));
        assert!(!report.is_valid);
        assert_eq!(report.stats.total_nodes, 0);
    }

    #[test]
    fn test_missing_and_blank_labels_are_errors() {
        let report = check(json!({
            "id": "root",
            "label": "Root",
            "children": [{"id": "a"}, {"id": "b", "label": "  "}]
        }));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("Root > (unnamed)"));
    }

    #[test]
    fn test_non_array_children_is_error() {
        let report = check(json!({"id": "root", "label": "Root", "children": "none"}));
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("must be an array"));
    }

    #[test]
    fn test_null_children_is_fine() {
        assert!(check(json!({"id": "root", "label": "Root", "children": null})).is_valid);
    }

    #[test]
    fn test_ancestor_id_repeat_is_cycle() {
        let report = check(json!({
            "id": "root",
            "label": "Root",
            "children": [{"id": "a", "label": "A", "children": [{"id": "root", "label": "Loop"}]}]
        }));
        assert!(!report.is_valid);
        assert!(report.errors[0].starts_with("Reference cycle"));
        assert_eq!(report.stats.total_nodes, 2);
    }

    #[test]
    fn test_duplicate_id_elsewhere_is_warning() {
        let report = check(json!({
            "id": "root",
            "label": "Root",
            "children": [{"id": "x", "label": "A"}, {"id": "x", "label": "B"}]
        }));
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.starts_with("Duplicate id 'x'")));
    }

    #[test]
    fn test_boolean_ids_are_ids() {
        let report = check(json!({
            "id": true,
            "label": "Root",
            "children": [{"id": "true", "label": "Echo"}, {"id": false, "label": "Off"}]
        }));
        assert!(!report.is_valid);
        assert!(report.errors[0].starts_with("Reference cycle: node 'true'"));
        assert!(!report.warnings.iter().any(|w| w.contains("'Off'") && w.contains("no \"id\"")));
    }

    #[test]
    fn test_content_warnings() {
        let long_label = "L".repeat(101);
        let report = check(json!({
            "label": "Root",
            "counts": {"official": 3},
            "children": [
                {"id": "a", "label": long_label, "employmentType": "astronaut"},
                {"id": "b", "label": "Twin", "counts": {"military": 2}},
                {"id": "c", "label": "Twin"},
                42
            ]
        }));

        assert!(report.is_valid, "errors: {:?}", report.errors);
        let warnings = report.warnings.join("\n");
        assert!(warnings.contains("has no \"id\""));
        assert!(warnings.contains("too long (101 characters)"));
        assert!(warnings.contains("'astronaut'"));
        assert!(warnings.contains("duplicate labels: Twin"));
        assert!(warnings.contains("'Twin' carries personnel counts"));
        assert!(warnings.contains("Entry 3"));
        assert!(!warnings.contains("'Root' carries"));
    }

    #[test]
    fn test_depth_and_fan_out_limits() {
        let limits = ValidationLimits {
            max_label_len: 100,
            max_depth: 1,
            max_children: 1,
        };
        let report = validate(
            &json!({
                "id": "r", "label": "R",
                "children": [
                    {"id": "a", "label": "A", "children": [{"id": "deep", "label": "Deep"}]},
                    {"id": "b", "label": "B"}
                ]
            }),
            &limits,
        );
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("very deep at 'Deep'")));
        assert!(report.warnings.iter().any(|w| w.contains("'R' has many children (2)")));
    }

    #[test]
    fn test_validate_tree_on_normalized_nodes() {
        let root = OrgNode::new("board", "Board").with_child(OrgNode::new("hr", "HR"));
        let report = validate_tree(&root, &ValidationLimits::default());
        assert!(report.is_valid);
        assert_eq!(report.stats.total_nodes, 2);
    }
}
