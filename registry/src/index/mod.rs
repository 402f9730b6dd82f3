//! Record-level index over the AVL tree.
//!
//! - `PlotIndex`: owns one tree ordered by plot number or area,
//!   rejects duplicates, and exposes add/search/delete/list.
//! - `IndexKind`: which field the tree is ordered by.

mod kind;
mod plot_index;

pub use kind::IndexKind;
pub use plot_index::{DEFAULT_AREA_TOLERANCE, IndexError, PlotIndex};
