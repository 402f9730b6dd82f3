//! AVL tree implementation for the plot index.
//!
//! This module provides an in-memory, self-balancing binary search tree
//! that keeps plot records ordered by a chosen key.
//!
//! # Structure
//!
//! - `AvlTree<K>`: owns the root link and exposes insert, delete, lookup,
//!   predicate scans, and in-order iteration.
//! - Nodes own their children exclusively and cache their subtree height.
//! - `K: IndexKey` picks the key at compile time: `ByPlotNumber` or `ByArea`.
//!   Records with equal keys are ordered by plot number.
//!
//! # Usage
//!
//! ```
//! use registry::tree::{AvlTree, ByPlotNumber};
//! use registry::types::{PlotNumber, PlotRecord};
//!
//! let mut tree = AvlTree::<ByPlotNumber>::new();
//! for plot in [10, 20, 30] {
//!     tree.insert(PlotRecord::new(plot, "owner", 120.0, "lot")).unwrap();
//! }
//!
//! // Ascending insert rotated 20 to the root.
//! assert_eq!(tree.root().map(|r| r.plot_number), Some(PlotNumber(20)));
//! assert_eq!(tree.height(), 2);
//! ```

mod avl;
mod key;
pub(crate) mod node;

pub use avl::{AvlTree, Iter, TreeError};
pub use key::{ByArea, ByPlotNumber, IndexKey};
