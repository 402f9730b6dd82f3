//! In-memory AVL tree over plot records.
//!
//! The tree is ordered by a key kind `K` (see `IndexKey`), with equal keys
//! ordered by plot number. Insert, delete, and exact lookup are O(log n);
//! predicate scans and listings visit every node.
//!
//! Mutation is recursive over owned links: each level descends into one
//! child slot, then refreshes its height and rebalances on the way back up.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::tree::key::IndexKey;
use crate::tree::node::{self, Link, Node};
use crate::types::{PlotNumber, PlotRecord};

/// A self-balancing binary search tree of plot records.
pub struct AvlTree<K: IndexKey> {
    root: Link,
    len: usize,
    /// Single rotations performed over the tree's lifetime.
    rotations: u64,
    _key: PhantomData<K>,
}

impl<K: IndexKey> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IndexKey> AvlTree<K> {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            len: 0,
            rotations: 0,
            _key: PhantomData,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// The record stored at the root, if any.
    #[must_use]
    pub fn root(&self) -> Option<&PlotRecord> {
        self.root.as_deref().map(|node| &node.record)
    }

    /// Number of single rotations performed so far.
    ///
    /// A double rotation counts as two.
    #[must_use]
    pub const fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Insert a record.
    ///
    /// Fails with `DuplicateKey` if a record with the same key and plot
    /// number is already stored, in which case the tree is unchanged.
    pub fn insert(&mut self, record: PlotRecord) -> Result<(), TreeError> {
        let key = K::key_of(&record);
        Self::insert_into(&mut self.root, record, &key, &mut self.rotations)?;
        self.len += 1;
        Ok(())
    }

    /// Remove the first record reached whose key equals `key`.
    ///
    /// When several records share the key, which one is removed depends on
    /// the tree's shape; use `delete_exact` to pick one.
    pub fn delete(&mut self, key: &K::Key) -> Result<PlotRecord, TreeError> {
        let removed = Self::remove_from(
            &mut self.root,
            &|record: &PlotRecord| K::compare(key, &K::key_of(record)),
            &mut self.rotations,
        )
        .ok_or(TreeError::NotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Remove the record with exactly this key and plot number.
    pub fn delete_exact(
        &mut self,
        key: &K::Key,
        plot_number: PlotNumber,
    ) -> Result<PlotRecord, TreeError> {
        let removed = Self::remove_from(
            &mut self.root,
            &|record: &PlotRecord| K::compare_entry(key, plot_number, record),
            &mut self.rotations,
        )
        .ok_or(TreeError::NotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Find the first record reached whose key equals `key`.
    #[must_use]
    pub fn find_exact(&self, key: &K::Key) -> Option<&PlotRecord> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match K::compare(key, &K::key_of(&node.record)) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            }
        }
        None
    }

    /// Collect every record matching `predicate`, in tree order.
    pub fn find_by_predicate<P>(&self, mut predicate: P) -> Vec<&PlotRecord>
    where
        P: FnMut(&PlotRecord) -> bool,
    {
        self.iter().filter(|&record| predicate(record)).collect()
    }

    /// Snapshot of all records in ascending key order.
    #[must_use]
    pub fn inorder(&self) -> Vec<&PlotRecord> {
        self.iter().collect()
    }

    /// Iterate over records in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    #[cfg(test)]
    pub(crate) fn root_node(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    fn insert_into(
        slot: &mut Link,
        record: PlotRecord,
        key: &K::Key,
        rotations: &mut u64,
    ) -> Result<(), TreeError> {
        let Some(node) = slot.as_mut() else {
            *slot = Some(Node::leaf(record));
            return Ok(());
        };

        match K::compare_entry(key, record.plot_number, &node.record) {
            Ordering::Less => Self::insert_into(&mut node.left, record, key, rotations)?,
            Ordering::Greater => Self::insert_into(&mut node.right, record, key, rotations)?,
            Ordering::Equal => {
                return Err(TreeError::DuplicateKey {
                    plot_number: record.plot_number,
                });
            }
        }

        Self::rebalance_slot(slot, rotations);
        Ok(())
    }

    /// Remove the node `direction` routes to, returning its record.
    ///
    /// `direction` compares the search target against a stored record.
    /// Returns `None` (with the subtree untouched) if no node matches.
    fn remove_from<F>(slot: &mut Link, direction: &F, rotations: &mut u64) -> Option<PlotRecord>
    where
        F: Fn(&PlotRecord) -> Ordering,
    {
        let ordering = direction(&slot.as_ref()?.record);

        let removed = match ordering {
            Ordering::Less => Self::remove_from(&mut slot.as_mut()?.left, direction, rotations)?,
            Ordering::Greater => {
                Self::remove_from(&mut slot.as_mut()?.right, direction, rotations)?
            }
            Ordering::Equal => return Self::unlink(slot, rotations),
        };

        Self::rebalance_slot(slot, rotations);
        Some(removed)
    }

    /// Remove the node in `slot`, returning its record.
    fn unlink(slot: &mut Link, rotations: &mut u64) -> Option<PlotRecord> {
        let mut node = slot.take()?;

        match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => {
                *slot = child;
                Some(node.record)
            }
            (Some(left), Some(right)) => {
                // Two children: the in-order successor's record moves up
                // into this node and the successor node is removed.
                let (right, successor) = Self::take_min(right, rotations);
                node.left = Some(left);
                node.right = right;
                let removed = std::mem::replace(&mut node.record, successor);
                *slot = Some(node::rebalance(node, rotations));
                Some(removed)
            }
        }
    }

    /// Detach the leftmost node of a subtree.
    ///
    /// Returns the rebalanced remainder and the detached record.
    fn take_min(mut node: Box<Node>, rotations: &mut u64) -> (Link, PlotRecord) {
        match node.left.take() {
            None => {
                let Node { record, right, .. } = *node;
                (right, record)
            }
            Some(left) => {
                let (left, min) = Self::take_min(left, rotations);
                node.left = left;
                (Some(node::rebalance(node, rotations)), min)
            }
        }
    }

    fn rebalance_slot(slot: &mut Link, rotations: &mut u64) {
        if let Some(node) = slot.take() {
            *slot = Some(node::rebalance(node, rotations));
        }
    }
}

impl<'a, K: IndexKey> IntoIterator for &'a AvlTree<K> {
    type Item = &'a PlotRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// In-order iterator over an `AvlTree`.
///
/// Holds the path of nodes whose record has not been yielded yet.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<&'a Node>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PlotRecord;

    fn next(&mut self) -> Option<&'a PlotRecord> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.record)
    }
}

/// Errors that can occur during tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A record with the same key and plot number is already stored.
    DuplicateKey {
        /// Plot number of the rejected record.
        plot_number: PlotNumber,
    },
    /// No record matches the requested key.
    NotFound,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { plot_number } => write!(f, "duplicate plot: {plot_number}"),
            Self::NotFound => write!(f, "not found"),
        }
    }
}

impl std::error::Error for TreeError {}
