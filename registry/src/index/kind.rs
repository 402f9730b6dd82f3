//! Choice of the field a `PlotIndex` is ordered by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The field a `PlotIndex` is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Ordered by plot number; plot lookups and deletes are O(log n).
    #[default]
    Plot,
    /// Ordered by area, ties broken by plot number.
    Area,
}

impl IndexKind {
    /// Lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plot => "plot",
            Self::Area => "area",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plot" => Ok(Self::Plot),
            "area" => Ok(Self::Area),
            other => Err(format!("unknown index kind '{other}' (expected 'plot' or 'area')")),
        }
    }
}
