//! Land plot records.
//!
//! A `PlotRecord` is the unit stored in the index: one plot with its owner,
//! area, and location. All fields are supplied by the caller; nothing is
//! derived.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PlotNumber;

/// A single land plot.
///
/// # Invariants
///
/// - `plot_number` is unique within an index ordered by plot number.
/// - Equality is field-wise, so two records with the same plot number but
///   different owners compare unequal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Identifier of the plot.
    pub plot_number: PlotNumber,
    /// Name of the registered owner.
    pub owner_name: String,
    /// Area in square feet.
    pub area: f64,
    /// Free-form location description.
    pub location: String,
}

impl PlotRecord {
    /// Create a new record.
    ///
    /// # Examples
    ///
    /// ```
    /// use registry::types::{PlotNumber, PlotRecord};
    /// let record = PlotRecord::new(12, "Asha", 250.5, "North Ridge");
    /// assert_eq!(record.plot_number, PlotNumber(12));
    /// assert_eq!(record.owner_name, "Asha");
    /// ```
    #[must_use]
    pub fn new(
        plot_number: impl Into<PlotNumber>,
        owner_name: impl Into<String>,
        area: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            plot_number: plot_number.into(),
            owner_name: owner_name.into(),
            area,
            location: location.into(),
        }
    }
}

impl fmt::Display for PlotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting keeps the fractional part on whole areas ("100.0").
        write!(
            f,
            "Plot#: {} | Owner: {} | Area: {:?} | Location: {}",
            self.plot_number, self.owner_name, self.area, self.location
        )
    }
}
