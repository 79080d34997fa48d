//! Generic tree traversal
//!
//! Every read-only query over an [`OrgNode`] tree is a specialization of one
//! of two primitives:
//!
//! - [`walk`]: depth-first pre-order with early exit through [`ControlFlow`]
//! - [`fold`]: post-order reduction where each node sees its children's results
//!
//! Recursion depth equals tree depth.

use crate::models::OrgNode;
use std::ops::ControlFlow;

/// Context handed to a [`walk`] visitor.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'v, 'a> {
    /// Node being visited
    pub node: &'a OrgNode,
    /// Root-first chain of ancestors, excluding `node`
    pub ancestors: &'v [&'a OrgNode],
    /// Child indices leading from the root to `node`
    pub route: &'v [usize],
}

impl<'v, 'a> Visit<'v, 'a> {
    /// Distance from the root (root is level 0).
    pub fn depth(&self) -> usize {
        self.route.len()
    }

    pub fn parent(&self) -> Option<&'a OrgNode> {
        self.ancestors.last().copied()
    }
}

/// Visit `root` and its descendants in pre-order.
///
/// The walk stops at the first `Break`, which is returned to the caller.
///
/// # Examples
///
/// ```rust
/// use orgchart_core::models::OrgNode;
/// use orgchart_core::services::traversal::walk;
/// use std::ops::ControlFlow;
///
/// let root = OrgNode::new("board", "Board").with_child(OrgNode::new("hr", "HR"));
/// let found = walk(&root, |visit| {
///     if visit.node.label == "HR" {
///         ControlFlow::Break(visit.depth())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert_eq!(found, ControlFlow::Break(1));
/// ```
pub fn walk<'a, B, F>(root: &'a OrgNode, mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&Visit<'_, 'a>) -> ControlFlow<B>,
{
    let mut ancestors = Vec::new();
    let mut route = Vec::new();
    walk_from(root, &mut ancestors, &mut route, &mut visit)
}

fn walk_from<'a, B, F>(
    node: &'a OrgNode,
    ancestors: &mut Vec<&'a OrgNode>,
    route: &mut Vec<usize>,
    visit: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(&Visit<'_, 'a>) -> ControlFlow<B>,
{
    let context = Visit {
        node,
        ancestors: ancestors.as_slice(),
        route: route.as_slice(),
    };
    if let ControlFlow::Break(value) = visit(&context) {
        return ControlFlow::Break(value);
    }

    ancestors.push(node);
    for (index, child) in node.children.iter().enumerate() {
        route.push(index);
        let flow = walk_from(child, ancestors, route, visit);
        route.pop();
        if flow.is_break() {
            ancestors.pop();
            return flow;
        }
    }
    ancestors.pop();

    ControlFlow::Continue(())
}

/// Reduce the tree bottom-up: `f(node, results_of_children)`.
///
/// Children's results arrive in child order.
pub fn fold<R, F>(root: &OrgNode, mut f: F) -> R
where
    F: FnMut(&OrgNode, Vec<R>) -> R,
{
    fold_from(root, &mut f)
}

fn fold_from<R, F>(node: &OrgNode, f: &mut F) -> R
where
    F: FnMut(&OrgNode, Vec<R>) -> R,
{
    let mut results = Vec::with_capacity(node.children.len());
    for child in &node.children {
        results.push(fold_from(child, f));
    }
    f(node, results)
}
