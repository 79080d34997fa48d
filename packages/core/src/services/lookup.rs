//! Path & Lookup Engine
//!
//! Read-only queries over a normalized tree, all built on [`walk`]. Lookups
//! are depth-first pre-order and the first match wins, so a document with a
//! colliding id still answers deterministically.
//!
//! Misses are not errors: callers get `None` or an empty `Vec` and decide how
//! to fall back (usually to the root).

use crate::models::OrgNode;
use crate::services::traversal::walk;
use std::ops::ControlFlow;

/// Root-to-target chain, inclusive on both ends. Empty when `target_id` is absent.
pub fn find_path<'a>(root: &'a OrgNode, target_id: &str) -> Vec<&'a OrgNode> {
    let flow = walk(root, |visit| {
        if visit.node.id == target_id {
            let mut path = visit.ancestors.to_vec();
            path.push(visit.node);
            ControlFlow::Break(path)
        } else {
            ControlFlow::Continue(())
        }
    });
    match flow {
        ControlFlow::Break(path) => path,
        ControlFlow::Continue(()) => Vec::new(),
    }
}

pub fn find_by_id<'a>(root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
    find_first(root, |node| node.id == id)
}

pub fn find_by_label<'a>(root: &'a OrgNode, label: &str) -> Option<&'a OrgNode> {
    find_first(root, |node| node.label == label)
}

fn find_first<'a>(root: &'a OrgNode, predicate: impl Fn(&OrgNode) -> bool) -> Option<&'a OrgNode> {
    match walk(root, |visit| {
        if predicate(visit.node) {
            ControlFlow::Break(visit.node)
        } else {
            ControlFlow::Continue(())
        }
    }) {
        ControlFlow::Break(node) => Some(node),
        ControlFlow::Continue(()) => None,
    }
}

/// Child-index route from the root to the first node with `id`.
///
/// The root itself has the empty route.
pub fn route_to(root: &OrgNode, id: &str) -> Option<Vec<usize>> {
    match walk(root, |visit| {
        if visit.node.id == id {
            ControlFlow::Break(visit.route.to_vec())
        } else {
            ControlFlow::Continue(())
        }
    }) {
        ControlFlow::Break(route) => Some(route),
        ControlFlow::Continue(()) => None,
    }
}

/// Follow a child-index route. `None` if any index is out of range.
pub fn node_at<'a>(root: &'a OrgNode, route: &[usize]) -> Option<&'a OrgNode> {
    let mut current = root;
    for &index in route {
        current = current.children.get(index)?;
    }
    Some(current)
}

pub fn node_at_mut<'a>(root: &'a mut OrgNode, route: &[usize]) -> Option<&'a mut OrgNode> {
    let mut current = root;
    for &index in route {
        current = current.children.get_mut(index)?;
    }
    Some(current)
}

/// Every node whose distance from the root equals `level` (root is level 0).
pub fn list_at_level(root: &OrgNode, level: usize) -> Vec<&OrgNode> {
    let mut nodes = Vec::new();
    let _ = walk(root, |visit| {
        if visit.depth() == level {
            nodes.push(visit.node);
        }
        ControlFlow::<()>::Continue(())
    });
    nodes
}

/// Pre-order flattening of the whole tree.
pub fn list_all(root: &OrgNode) -> Vec<&OrgNode> {
    let mut nodes = Vec::new();
    let _ = walk(root, |visit| {
        nodes.push(visit.node);
        ControlFlow::<()>::Continue(())
    });
    nodes
}

/// Resolve a deep-link target, falling back to the root when the id is
/// missing or unknown.
pub fn resolve_deep_link<'a>(root: &'a OrgNode, id: Option<&str>) -> &'a OrgNode {
    resolve_deep_link_with(root, id, |id| find_by_id(root, id))
}

/// [`resolve_deep_link`] with a caller-supplied id lookup, such as an index.
pub fn resolve_deep_link_with<'a>(
    root: &'a OrgNode,
    id: Option<&str>,
    find: impl FnOnce(&str) -> Option<&'a OrgNode>,
) -> &'a OrgNode {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => find(id).unwrap_or_else(|| {
            tracing::debug!("Deep link target '{}' not found, falling back to root", id);
            root
        }),
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> OrgNode {
        OrgNode::new("board", "Board")
            .with_child(
                OrgNode::new("finance", "Finance")
                    .with_employment_type("contractor")
                    .with_child(OrgNode::new("payroll", "Payroll")),
            )
            .with_child(OrgNode::new("hr", "HR").with_employment_type("military"))
    }

    fn ids(nodes: &[&OrgNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_find_path_inclusive() {
        let root = board();
        assert_eq!(ids(&find_path(&root, "payroll")), vec!["board", "finance", "payroll"]);
        assert_eq!(ids(&find_path(&root, "board")), vec!["board"]);
    }

    #[test]
    fn test_find_path_missing_is_empty() {
        assert!(find_path(&board(), "legal").is_empty());
    }

    #[test]
    fn test_find_by_label() {
        let root = board();
        assert_eq!(find_by_label(&root, "HR").map(|n| n.id.as_str()), Some("hr"));
        assert!(find_by_label(&root, "hr").is_none());
    }

    #[test]
    fn test_first_match_wins_on_duplicate_ids() {
        let root = OrgNode::new("root", "Root")
            .with_child(OrgNode::new("dup", "First"))
            .with_child(OrgNode::new("dup", "Second"));
        assert_eq!(find_by_id(&root, "dup").unwrap().label, "First");
    }

    #[test]
    fn test_routes() {
        let root = board();
        assert_eq!(route_to(&root, "payroll"), Some(vec![0, 0]));
        assert_eq!(route_to(&root, "board"), Some(vec![]));
        assert_eq!(node_at(&root, &[1]).map(|n| n.id.as_str()), Some("hr"));
        assert!(node_at(&root, &[5]).is_none());
    }

    #[test]
    fn test_node_at_mut() {
        let mut root = board();
        node_at_mut(&mut root, &[1]).unwrap().label = "People".to_string();
        assert_eq!(root.children[1].label, "People");
        assert!(node_at_mut(&mut root, &[1, 0]).is_none());
    }

    #[test]
    fn test_list_at_level_and_all() {
        let root = board();
        assert_eq!(ids(&list_at_level(&root, 0)), vec!["board"]);
        assert_eq!(ids(&list_at_level(&root, 1)), vec!["finance", "hr"]);
        assert_eq!(ids(&list_at_level(&root, 2)), vec!["payroll"]);
        assert!(list_at_level(&root, 3).is_empty());
        assert_eq!(ids(&list_all(&root)), vec!["board", "finance", "payroll", "hr"]);
    }

    #[test]
    fn test_deep_link_with_custom_lookup() {
        let root = board();
        let finance = &root.children[0];
        assert_eq!(resolve_deep_link_with(&root, Some("x"), |_| Some(finance)).id, "finance");
        assert_eq!(resolve_deep_link_with(&root, Some("x"), |_| None).id, "board");
        assert_eq!(resolve_deep_link_with(&root, None, |_| Some(finance)).id, "board");
    }

    #[test]
    fn test_deep_link_falls_back_to_root() {
        let root = board();
        assert_eq!(resolve_deep_link(&root, Some("hr")).id, "hr");
        assert_eq!(resolve_deep_link(&root, Some("unknown")).id, "board");
        assert_eq!(resolve_deep_link(&root, Some("")).id, "board");
        assert_eq!(resolve_deep_link(&root, None).id, "board");
    }
}
