//! Statistics Aggregator
//!
//! Personnel tallies are always derived from `employmentType` values; a
//! node's cached `counts` are never read back as input.
//!
//! - [`aggregate`] covers a node and its whole subtree. Every visited node
//!   adds one to `capacity` and exactly one category bucket, so the bucket
//!   sum always equals `capacity`.
//! - [`annotate_counts`] writes descendant-only tallies onto every node for
//!   chart and list display.
//!
//! All functions are O(subtree size) and safe to call on every render.

use crate::models::{CategoryCounts, EmploymentCategory, OrgNode};
use crate::services::traversal::walk;
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, ControlFlow};

/// Aggregate over a subtree, the subtree root included.
///
/// Serializes flat: `{"capacity": 3, "totalPersonnel": 1, "military": 1, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtreeStats {
    /// Number of positions (nodes)
    pub capacity: usize,
    /// Positions with a person assigned
    pub total_personnel: usize,
    #[serde(flatten)]
    pub counts: CategoryCounts,
}

impl SubtreeStats {
    /// Account for a single node.
    pub fn record(&mut self, node: &OrgNode) {
        self.capacity += 1;
        if node.has_person() {
            self.total_personnel += 1;
        }
        self.counts.increment(node.category());
    }

    /// Positions without a person assigned.
    pub fn vacancies(&self) -> usize {
        self.capacity - self.total_personnel
    }

    pub fn count(&self, category: EmploymentCategory) -> usize {
        self.counts.get(category)
    }
}

impl AddAssign for SubtreeStats {
    fn add_assign(&mut self, other: Self) {
        self.capacity += other.capacity;
        self.total_personnel += other.total_personnel;
        self.counts += other.counts;
    }
}

/// Tally `node` and all of its descendants.
pub fn aggregate(node: &OrgNode) -> SubtreeStats {
    let mut stats = SubtreeStats::default();
    let _ = walk(node, |visit| {
        stats.record(visit.node);
        ControlFlow::<()>::Continue(())
    });
    stats
}

/// Tally only the descendants of `node`.
pub fn descendant_stats(node: &OrgNode) -> SubtreeStats {
    let mut stats = SubtreeStats::default();
    for child in &node.children {
        stats += aggregate(child);
    }
    stats
}

/// Recompute the cached `counts` of every node in one post-order pass.
///
/// Returns the aggregate of `root`'s whole subtree.
pub fn annotate_counts(root: &mut OrgNode) -> SubtreeStats {
    let mut below = SubtreeStats::default();
    for child in &mut root.children {
        below += annotate_counts(child);
    }
    root.counts = Some(below.counts);

    let mut total = below;
    total.record(root);
    total
}

/// Node and category totals for one depth of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub level: usize,
    pub count: usize,
    pub personnel: usize,
    pub counts: CategoryCounts,
}

/// Per-level breakdown, index = level (root is level 0).
pub fn level_breakdown(root: &OrgNode) -> Vec<LevelSummary> {
    let mut levels: Vec<LevelSummary> = Vec::new();
    let _ = walk(root, |visit| {
        let depth = visit.depth();
        while levels.len() <= depth {
            let level = levels.len();
            levels.push(LevelSummary {
                level,
                ..Default::default()
            });
        }
        let summary = &mut levels[depth];
        summary.count += 1;
        if visit.node.has_person() {
            summary.personnel += 1;
        }
        summary.counts.increment(visit.node.category());
        ControlFlow::<()>::Continue(())
    });
    levels
}
