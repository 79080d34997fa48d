//! Id index for repeated lookups
//!
//! Maps each id to the child-index route of its first pre-order occurrence,
//! so lookups are O(depth) instead of O(n). The index does not borrow the
//! tree; it is rebuilt whenever a new tree version is produced and must only
//! be used with that version.

use crate::models::OrgNode;
use crate::services::lookup::node_at;
use crate::services::traversal::walk;
use std::collections::HashMap;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIndex {
    routes: HashMap<String, Vec<usize>>,
}

impl NodeIndex {
    pub fn build(root: &OrgNode) -> Self {
        let mut routes = HashMap::new();
        let _ = walk(root, |visit| {
            routes
                .entry(visit.node.id.clone())
                .or_insert_with(|| visit.route.to_vec());
            ControlFlow::<()>::Continue(())
        });
        Self { routes }
    }

    /// Resolve `id` against the tree this index was built from.
    pub fn get<'a>(&self, root: &'a OrgNode, id: &str) -> Option<&'a OrgNode> {
        node_at(root, self.routes.get(id)?)
    }

    pub fn depth(&self, id: &str) -> Option<usize> {
        self.routes.get(id).map(Vec::len)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.routes.contains_key(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lookup::find_by_id;

    #[test]
    fn test_index_agrees_with_walk() {
        let root = OrgNode::new("board", "Board")
            .with_child(OrgNode::new("finance", "Finance").with_child(OrgNode::new("tax", "Tax")))
            .with_child(OrgNode::new("hr", "HR"));
        let index = NodeIndex::build(&root);

        for id in ["board", "finance", "tax", "hr"] {
            assert_eq!(index.get(&root, id), find_by_id(&root, id));
        }
        assert_eq!(index.depth("tax"), Some(2));
        assert!(index.get(&root, "legal").is_none());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let root = OrgNode::new("root", "Root")
            .with_child(OrgNode::new("dup", "First"))
            .with_child(OrgNode::new("dup", "Second"));
        let index = NodeIndex::build(&root);
        assert_eq!(index.get(&root, "dup").unwrap().label, "First");
        assert_eq!(index.len(), 2);
    }
}
