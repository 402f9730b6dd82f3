//! Invariant checking for deterministic simulation testing.
//!
//! This module walks an AVL tree after each operation and records every
//! structural violation it finds: ordering, cached heights, balance,
//! record count, and the AVL height bound.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::tree::node::Node;
use crate::tree::{AvlTree, IndexKey};
use crate::types::PlotRecord;

/// An invariant violation detected during simulation.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// Operation index where it was detected.
    pub operation_index: usize,
    /// Additional context.
    pub context: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation {}: {} ({})",
            self.operation_index, self.description, self.context
        )
    }
}

/// Checker for tree and index invariants.
#[derive(Debug, Default)]
pub struct InvariantChecker {
    /// Detected violations.
    violations: Vec<InvariantViolation>,
}

impl InvariantChecker {
    /// Create a new invariant checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Get all violations.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }

    /// Take all violations, leaving the checker empty.
    pub fn take_violations(&mut self) -> Vec<InvariantViolation> {
        std::mem::take(&mut self.violations)
    }

    /// Check if any violations were detected.
    #[must_use]
    pub const fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Add a violation.
    pub fn add_violation(
        &mut self,
        description: &str,
        operation_index: usize,
        context: String,
    ) {
        self.violations.push(InvariantViolation {
            description: description.to_string(),
            operation_index,
            context,
        });
    }

    /// Run every structural check on `tree`.
    pub fn check_tree<K: IndexKey>(&mut self, tree: &AvlTree<K>, operation_index: usize) {
        let count = self.check_node(tree.root_node(), operation_index).1;

        if count != tree.len() {
            self.add_violation(
                "Length does not match node count",
                operation_index,
                format!("len() = {}, nodes = {count}", tree.len()),
            );
        }

        if tree.is_empty() && (tree.height() != 0 || tree.root().is_some()) {
            self.add_violation(
                "Empty tree has a root",
                operation_index,
                format!("height = {}", tree.height()),
            );
        }

        self.check_height_bound(tree.height(), tree.len(), operation_index);
        self.check_order::<K>(&tree.inorder(), operation_index);
    }

    /// Check `height <= 1.44 * log2(n + 2) - 0.328`.
    #[allow(clippy::cast_precision_loss)]
    pub fn check_height_bound(&mut self, height: usize, len: usize, operation_index: usize) {
        let bound = 1.44f64.mul_add((len as f64 + 2.0).log2(), -0.328);
        if height as f64 > bound {
            self.add_violation(
                "Height exceeds AVL bound",
                operation_index,
                format!("height {height} > {bound:.3} for {len} records"),
            );
        }
    }

    /// Check that consecutive records are strictly increasing in the
    /// tie-broken key order.
    pub fn check_order<K: IndexKey>(&mut self, records: &[&PlotRecord], operation_index: usize) {
        for pair in records.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let ordering = K::compare_entry(&K::key_of(next), next.plot_number, prev);
            if ordering != Ordering::Greater {
                self.add_violation(
                    "Records out of order",
                    operation_index,
                    format!("plot {} listed before plot {}", prev.plot_number, next.plot_number),
                );
            }
        }
    }

    /// Check that no plot number appears twice.
    pub fn check_unique_plots(&mut self, records: &[&PlotRecord], operation_index: usize) {
        let mut seen = HashSet::new();
        for record in records {
            if !seen.insert(record.plot_number) {
                self.add_violation(
                    "Duplicate plot number stored",
                    operation_index,
                    format!("plot {}", record.plot_number),
                );
            }
        }
    }

    /// Verify cached heights and balance factors below `node`.
    ///
    /// Returns the recomputed height and the node count of the subtree.
    fn check_node(
        &mut self,
        node: Option<&Node>,
        operation_index: usize,
    ) -> (usize, usize) {
        let Some(node) = node else {
            return (0, 0);
        };

        let (left_height, left_count) = self.check_node(node.left.as_deref(), operation_index);
        let (right_height, right_count) =
            self.check_node(node.right.as_deref(), operation_index);
        let height = 1 + left_height.max(right_height);

        if node.height != height {
            self.add_violation(
                "Cached height is stale",
                operation_index,
                format!(
                    "plot {}: cached {}, actual {height}",
                    node.record.plot_number, node.height
                ),
            );
        }

        if left_height.abs_diff(right_height) > 1 {
            self.add_violation(
                "Node out of balance",
                operation_index,
                format!(
                    "plot {}: left {left_height}, right {right_height}",
                    node.record.plot_number
                ),
            );
        }

        (height, left_count + right_count + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use crate::tree::{ByArea, ByPlotNumber};

    #[test]
    fn test_checker_accepts_valid_tree() {
        let mut tree = AvlTree::<ByPlotNumber>::new();
        for plot in 0..100 {
            tree.insert(record(plot, 10.0)).expect("insert");
        }

        let mut checker = InvariantChecker::new();
        checker.check_tree(&tree, 0);
        assert!(!checker.has_violations(), "{:?}", checker.violations());
    }

    #[test]
    fn test_checker_detects_out_of_order_records() {
        let a = record(1, 300.0);
        let b = record(2, 100.0);

        let mut checker = InvariantChecker::new();
        checker.check_order::<ByPlotNumber>(&[&a, &b], 0);
        assert!(!checker.has_violations());

        checker.check_order::<ByArea>(&[&a, &b], 1);
        assert_eq!(checker.violations().len(), 1);
        assert_eq!(
            checker.violations()[0].to_string(),
            "operation 1: Records out of order (plot 1 listed before plot 2)"
        );
    }

    #[test]
    fn test_checker_detects_duplicate_plots() {
        let a = record(4, 1.0);
        let b = record(4, 2.0);

        let mut checker = InvariantChecker::new();
        checker.check_unique_plots(&[&a, &b], 3);
        assert!(checker.has_violations());
        assert_eq!(checker.take_violations().len(), 1);
        assert!(!checker.has_violations());
    }

    #[test]
    fn test_height_bound() {
        let mut checker = InvariantChecker::new();
        // 7 records fit in height 3 (bound ~ 4.24); height 4 still fits,
        // height 5 does not.
        checker.check_height_bound(3, 7, 0);
        checker.check_height_bound(4, 7, 0);
        assert!(!checker.has_violations());
        checker.check_height_bound(5, 7, 0);
        assert!(checker.has_violations());
    }
}
