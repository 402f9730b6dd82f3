//! AVL tree nodes and the rotations that keep them balanced.
//!
//! Nodes exclusively own their children. Every structural helper consumes a
//! boxed subtree and returns the (possibly different) root of the rebuilt
//! subtree, which the caller reattaches.

use crate::types::PlotRecord;

/// An owned, possibly empty subtree.
pub(crate) type Link = Option<Box<Node>>;

/// A node holding one record.
///
/// # Invariants
///
/// - `height == 1 + max(height(left), height(right))` once the node has
///   been through `update_height` after its last structural change.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) record: PlotRecord,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) height: usize,
}

impl Node {
    /// Create a detached leaf.
    pub(crate) fn leaf(record: PlotRecord) -> Box<Self> {
        Box::new(Self {
            record,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Recompute the cached height from the children.
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Height of the left subtree minus height of the right subtree.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Height of a subtree; 0 for an empty one.
pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Promote the right child.
///
/// A node without a right child is returned untouched.
pub(crate) fn rotate_left(mut root: Box<Node>, rotations: &mut u64) -> Box<Node> {
    let Some(mut pivot) = root.right.take() else {
        return root;
    };
    root.right = pivot.left.take();
    root.update_height();
    tracing::trace!(
        "rotate left: plot {} over plot {}",
        pivot.record.plot_number,
        root.record.plot_number
    );
    pivot.left = Some(root);
    pivot.update_height();
    *rotations += 1;
    pivot
}

/// Promote the left child.
///
/// A node without a left child is returned untouched.
pub(crate) fn rotate_right(mut root: Box<Node>, rotations: &mut u64) -> Box<Node> {
    let Some(mut pivot) = root.left.take() else {
        return root;
    };
    root.left = pivot.right.take();
    root.update_height();
    tracing::trace!(
        "rotate right: plot {} over plot {}",
        pivot.record.plot_number,
        root.record.plot_number
    );
    pivot.right = Some(root);
    pivot.update_height();
    *rotations += 1;
    pivot
}

/// Refresh the height of `node` and restore the balance invariant with at
/// most one single or double rotation.
///
/// Both children must already be balanced with correct heights.
pub(crate) fn rebalance(mut node: Box<Node>, rotations: &mut u64) -> Box<Node> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if let Some(left) = node.left.take() {
            // Left child leans right: left-right case.
            let left = if height(&left.left) < height(&left.right) {
                rotate_left(left, rotations)
            } else {
                left
            };
            node.left = Some(left);
        }
        return rotate_right(node, rotations);
    }

    if balance < -1 {
        if let Some(right) = node.right.take() {
            // Right child leans left: right-left case.
            let right = if height(&right.right) < height(&right.left) {
                rotate_right(right, rotations)
            } else {
                right
            };
            node.right = Some(right);
        }
        return rotate_left(node, rotations);
    }

    node
}
