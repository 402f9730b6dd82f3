//! Key kinds an AVL tree can be ordered by.
//!
//! The key kind is a compile-time parameter of `AvlTree`, so the extractor
//! and comparator are resolved statically. Equal keys are always ordered by
//! plot number, which keeps the tree's order total even for non-unique keys
//! such as area.

use std::cmp::Ordering;
use std::fmt;

use crate::types::{PlotNumber, PlotRecord};

/// A key extracted from a `PlotRecord`, with a total order over it.
pub trait IndexKey {
    /// The extracted key type.
    type Key: Copy + fmt::Debug;

    /// Extract the key from a record.
    fn key_of(record: &PlotRecord) -> Self::Key;

    /// Compare two keys. Must be a total order.
    fn compare(a: &Self::Key, b: &Self::Key) -> Ordering;

    /// Compare a key and plot number against a stored record, breaking key
    /// ties by plot number.
    fn compare_entry(key: &Self::Key, plot_number: PlotNumber, record: &PlotRecord) -> Ordering {
        Self::compare(key, &Self::key_of(record)).then_with(|| plot_number.cmp(&record.plot_number))
    }
}

/// Orders records by plot number.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByPlotNumber;

impl IndexKey for ByPlotNumber {
    type Key = PlotNumber;

    fn key_of(record: &PlotRecord) -> PlotNumber {
        record.plot_number
    }

    fn compare(a: &PlotNumber, b: &PlotNumber) -> Ordering {
        a.cmp(b)
    }
}

/// Orders records by area.
///
/// Uses `f64::total_cmp`, so NaN areas still have a defined position
/// (after all positive numbers).
#[derive(Debug, Clone, Copy, Default)]
pub struct ByArea;

impl IndexKey for ByArea {
    type Key = f64;

    fn key_of(record: &PlotRecord) -> f64 {
        record.area
    }

    fn compare(a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }
}
