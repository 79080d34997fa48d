//! Search & Filter
//!
//! Case-insensitive substring search over `label`, `name` and
//! `employmentType`. [`filter_tree`] prunes the tree down to the matches plus
//! the ancestors needed to reach them, keeping the original child order.

use crate::models::OrgNode;
use crate::services::traversal::fold;

/// Whether any searchable field of `node` contains `needle`.
///
/// `needle` must already be lower-cased.
pub fn node_matches(node: &OrgNode, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&node.label)
        || node.name.as_deref().is_some_and(contains)
        || node.employment_type.as_deref().is_some_and(contains)
}

/// Prune `root` to the nodes matching `query` and their ancestors.
///
/// - An empty or whitespace-only query returns the whole tree.
/// - A node that matches keeps only those descendants that themselves match
///   or lead to a match.
/// - `None` means nothing matched, the root included.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::models::OrgNode;
/// use orgchart_core::services::search::filter_tree;
///
/// let root = OrgNode::new("board", "Board")
///     .with_child(OrgNode::new("finance", "Finance"))
///     .with_child(OrgNode::new("hr", "HR").with_name("Sara"));
///
/// let filtered = filter_tree(&root, "sar").unwrap();
/// assert_eq!(filtered.children.len(), 1);
/// assert_eq!(filtered.children[0].id, "hr");
/// assert!(filter_tree(&root, "legal").is_none());
/// ```
pub fn filter_tree(root: &OrgNode, query: &str) -> Option<OrgNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Some(root.clone());
    }

    fold(root, |node, children: Vec<Option<OrgNode>>| {
        let kept: Vec<OrgNode> = children.into_iter().flatten().collect();
        if kept.is_empty() && !node_matches(node, &needle) {
            return None;
        }
        let mut pruned = node.detached();
        pruned.children = kept;
        Some(pruned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lookup::list_all;

    fn board() -> OrgNode {
        OrgNode::new("board", "Board")
            .with_child(
                OrgNode::new("finance", "Finance")
                    .with_employment_type("Contractor")
                    .with_child(OrgNode::new("payroll", "Payroll").with_name("Reza"))
                    .with_child(OrgNode::new("audit", "Audit")),
            )
            .with_child(
                OrgNode::new("hr", "HR")
                    .with_name("Sara")
                    .with_child(OrgNode::new("hiring", "Hiring")),
            )
    }

    fn labels(root: &OrgNode) -> Vec<String> {
        list_all(root).iter().map(|n| n.label.clone()).collect()
    }

    #[test]
    fn test_blank_query_returns_whole_tree() {
        let root = board();
        assert_eq!(filter_tree(&root, "").as_ref(), Some(&root));
        assert_eq!(filter_tree(&root, "   ").as_ref(), Some(&root));
    }

    #[test]
    fn test_ancestors_are_kept_siblings_pruned() {
        let filtered = filter_tree(&board(), "REZA").unwrap();
        assert_eq!(labels(&filtered), vec!["Board", "Finance", "Payroll"]);
    }

    #[test]
    fn test_matching_node_drops_non_matching_descendants() {
        let filtered = filter_tree(&board(), "sara").unwrap();
        assert_eq!(labels(&filtered), vec!["Board", "HR"]);
    }

    #[test]
    fn test_matches_employment_type() {
        let filtered = filter_tree(&board(), "contract").unwrap();
        assert_eq!(labels(&filtered), vec!["Board", "Finance"]);
    }

    #[test]
    fn test_root_match_alone_survives() {
        let filtered = filter_tree(&board(), "board").unwrap();
        assert!(filtered.children.is_empty());
    }

    #[test]
    fn test_no_match_is_none() {
        assert!(filter_tree(&board(), "legal").is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let filtered = filter_tree(&board(), "i").unwrap();
        assert_eq!(
            labels(&filtered),
            vec!["Board", "Finance", "Audit", "HR", "Hiring"]
        );
    }
}
