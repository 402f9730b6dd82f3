//! Plot number type.
//!
//! Newtype wrapper for the integer that identifies a land plot, keeping
//! plot numbers from being confused with other integers (heights, counts)
//! that flow through the index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identifier of a land plot.
///
/// The inner field is public to allow direct access when a collaborator
/// needs the raw integer.
///
/// # Invariants
///
/// - Unique across a `PlotIndex` ordered by plot number; such an index
///   rejects a second record with the same plot number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlotNumber(pub i64);

impl PlotNumber {
    /// Get the underlying integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use registry::types::PlotNumber;
    /// assert_eq!(PlotNumber(42).get(), 42);
    /// ```
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PlotNumber {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

impl From<PlotNumber> for i64 {
    fn from(plot: PlotNumber) -> Self {
        plot.0
    }
}
