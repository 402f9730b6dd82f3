//! Plot index implementation.
//!
//! The plot index binds one AVL tree to a chosen key (plot number or area)
//! and provides the record-level operations a registry front end needs.
//! Plot numbers are unique when the index is ordered by plot number. An
//! area index accepts repeated areas and repeated plot numbers, rejecting
//! only an exact (area, plot number) repeat.

use crate::config::IndexConfig;
use crate::index::IndexKind;
use crate::tree::{AvlTree, ByArea, ByPlotNumber, TreeError};
use crate::types::{PlotNumber, PlotRecord};

/// Default absolute tolerance for area matches.
pub const DEFAULT_AREA_TOLERANCE: f64 = 1e-9;

/// The tree behind an index, one variant per key kind.
enum KeyedTree {
    Plot(AvlTree<ByPlotNumber>),
    Area(AvlTree<ByArea>),
}

/// Index of land plot records.
///
/// # Invariants
///
/// - Ordered by plot number, no two stored records share a plot number.
/// - Ordered by area, no two stored records share both area and plot number.
/// - `tolerance` is finite and positive.
pub struct PlotIndex {
    tree: KeyedTree,
    tolerance: f64,
}

impl PlotIndex {
    /// Create an empty index ordered by `kind`, with the default area
    /// tolerance.
    #[must_use]
    pub fn new(kind: IndexKind) -> Self {
        Self::with_tolerance(kind, DEFAULT_AREA_TOLERANCE)
    }

    /// Create an empty index with a custom area tolerance.
    ///
    /// A tolerance that is not finite and positive falls back to
    /// `DEFAULT_AREA_TOLERANCE`.
    #[must_use]
    pub fn with_tolerance(kind: IndexKind, tolerance: f64) -> Self {
        let tree = match kind {
            IndexKind::Plot => KeyedTree::Plot(AvlTree::new()),
            IndexKind::Area => KeyedTree::Area(AvlTree::new()),
        };
        let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            DEFAULT_AREA_TOLERANCE
        };
        Self { tree, tolerance }
    }

    /// Create an empty index from configuration.
    #[must_use]
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::with_tolerance(config.index_by, config.area_tolerance)
    }

    /// The key the index is ordered by.
    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        match self.tree {
            KeyedTree::Plot(_) => IndexKind::Plot,
            KeyedTree::Area(_) => IndexKind::Area,
        }
    }

    /// Absolute tolerance used by area matches.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of stored records.
    #[must_use]
    pub const fn len(&self) -> usize {
        match &self.tree {
            KeyedTree::Plot(tree) => tree.len(),
            KeyedTree::Area(tree) => tree.len(),
        }
    }

    /// Check if the index holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the underlying tree.
    #[must_use]
    pub fn height(&self) -> usize {
        match &self.tree {
            KeyedTree::Plot(tree) => tree.height(),
            KeyedTree::Area(tree) => tree.height(),
        }
    }

    /// Add a new record.
    ///
    /// Ordered by plot number, fails with `DuplicateKey` if the plot number
    /// is already registered. Ordered by area, fails only if a record with
    /// the same area and plot number is stored. The index is unchanged on
    /// failure.
    pub fn add(&mut self, record: PlotRecord) -> Result<(), IndexError> {
        let plot_number = record.plot_number;
        let result = match &mut self.tree {
            KeyedTree::Plot(tree) => {
                if tree.find_exact(&plot_number).is_some() {
                    Err(TreeError::DuplicateKey { plot_number })
                } else {
                    tree.insert(record)
                }
            }
            KeyedTree::Area(tree) => tree.insert(record),
        };

        if let Err(e) = result {
            tracing::debug!("rejected record: {e}");
            return Err(e.into());
        }

        tracing::debug!("added plot {plot_number} ({} records)", self.len());
        Ok(())
    }

    /// Look up a record by plot number.
    ///
    /// O(log n) when ordered by plot number, a full scan otherwise. If an
    /// area index holds the plot number more than once, the first record in
    /// index order (smallest area) is returned.
    #[must_use]
    pub fn search_by_plot(&self, plot_number: PlotNumber) -> Option<&PlotRecord> {
        match &self.tree {
            KeyedTree::Plot(tree) => tree.find_exact(&plot_number),
            KeyedTree::Area(tree) => tree.iter().find(|r| r.plot_number == plot_number),
        }
    }

    /// All records whose area is within `tolerance` of `area`, in index
    /// order.
    #[must_use]
    pub fn search_by_area(&self, area: f64) -> Vec<&PlotRecord> {
        let tolerance = self.tolerance;
        let matches = |r: &PlotRecord| (r.area - area).abs() < tolerance;
        match &self.tree {
            KeyedTree::Plot(tree) => tree.find_by_predicate(matches),
            KeyedTree::Area(tree) => tree.find_by_predicate(matches),
        }
    }

    /// Remove the record with this plot number.
    ///
    /// On an area index with a repeated plot number, removes the record
    /// `search_by_plot` would return.
    pub fn delete_by_plot(&mut self, plot_number: PlotNumber) -> Result<PlotRecord, IndexError> {
        let result = match &mut self.tree {
            KeyedTree::Plot(tree) => tree.delete(&plot_number),
            KeyedTree::Area(tree) => {
                let area = tree
                    .iter()
                    .find(|r| r.plot_number == plot_number)
                    .map(|r| r.area);
                match area {
                    Some(area) => tree.delete_exact(&area, plot_number),
                    None => Err(TreeError::NotFound),
                }
            }
        };

        Self::log_removal(result, || format!("plot {plot_number}"))
    }

    /// Remove one record whose area is within `tolerance` of `area`.
    ///
    /// When several records match, the first in index order is removed.
    pub fn delete_by_area(&mut self, area: f64) -> Result<PlotRecord, IndexError> {
        let tolerance = self.tolerance;
        let matches = |r: &PlotRecord| (r.area - area).abs() < tolerance;

        let result = match &mut self.tree {
            KeyedTree::Plot(tree) => {
                let target = tree.iter().find(|&r| matches(r)).map(|r| r.plot_number);
                match target {
                    Some(plot_number) => tree.delete(&plot_number),
                    None => Err(TreeError::NotFound),
                }
            }
            KeyedTree::Area(tree) => {
                let target = tree
                    .iter()
                    .find(|&r| matches(r))
                    .map(|r| (r.area, r.plot_number));
                match target {
                    Some((stored_area, plot_number)) => {
                        tree.delete_exact(&stored_area, plot_number)
                    }
                    None => Err(TreeError::NotFound),
                }
            }
        };

        Self::log_removal(result, || format!("area {area:?}"))
    }

    /// All records in index order.
    #[must_use]
    pub fn list_all(&self) -> Vec<&PlotRecord> {
        match &self.tree {
            KeyedTree::Plot(tree) => tree.inorder(),
            KeyedTree::Area(tree) => tree.inorder(),
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(
        &self,
        checker: &mut crate::simulation::InvariantChecker,
        operation_index: usize,
    ) {
        match &self.tree {
            KeyedTree::Plot(tree) => {
                checker.check_tree(tree, operation_index);
                checker.check_unique_plots(&tree.inorder(), operation_index);
            }
            KeyedTree::Area(tree) => checker.check_tree(tree, operation_index),
        }
    }

    fn log_removal(
        result: Result<PlotRecord, TreeError>,
        target: impl FnOnce() -> String,
    ) -> Result<PlotRecord, IndexError> {
        match result {
            Ok(record) => {
                tracing::debug!("deleted plot {}", record.plot_number);
                Ok(record)
            }
            Err(e) => {
                tracing::debug!("delete by {} failed: {e}", target());
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for PlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotIndex")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur during index operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// A record with this plot number is already registered.
    DuplicateKey(PlotNumber),
    /// No record matches the requested key.
    NotFound,
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(plot_number) => write!(f, "plot {plot_number} exists"),
            Self::NotFound => write!(f, "no matching record"),
        }
    }
}

impl std::error::Error for IndexError {}

impl From<TreeError> for IndexError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::DuplicateKey { plot_number } => Self::DuplicateKey(plot_number),
            TreeError::NotFound => Self::NotFound,
        }
    }
}
