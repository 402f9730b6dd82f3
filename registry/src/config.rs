//! Index configuration module.
//!
//! This module provides configuration loading for a plot index from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `REGISTRY_INDEX_BY`: Field the index is ordered by, `plot` or `area` (default: `plot`)
//! - `REGISTRY_AREA_TOLERANCE`: Absolute tolerance for area matches (default: `1e-9`)
//!
//! # Invariants
//!
//! - `area_tolerance` is always finite and positive

use crate::index::{DEFAULT_AREA_TOLERANCE, IndexKind};

/// Index configuration.
///
/// # Post-conditions
///
/// When constructed via `from_env()` or `from_vars()`:
/// - `area_tolerance` is finite and positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Field the index is ordered by.
    pub index_by: IndexKind,
    /// Absolute tolerance used when matching areas.
    pub area_tolerance: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_by: IndexKind::default(),
            area_tolerance: DEFAULT_AREA_TOLERANCE,
        }
    }
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl IndexConfig {
    /// Variable selecting the index kind.
    pub const INDEX_BY_VAR: &'static str = "REGISTRY_INDEX_BY";
    /// Variable setting the area tolerance.
    pub const AREA_TOLERANCE_VAR: &'static str = "REGISTRY_AREA_TOLERANCE";

    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `REGISTRY_INDEX_BY` is set to something other than `plot` or `area`
    /// - `REGISTRY_AREA_TOLERANCE` is set but not a finite positive number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// `lookup` returns the value of a variable, or `None` if it is unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let index_by = Self::load_index_by(lookup(Self::INDEX_BY_VAR))?;
        let area_tolerance = Self::load_area_tolerance(lookup(Self::AREA_TOLERANCE_VAR))?;

        Ok(Self {
            index_by,
            area_tolerance,
        })
    }

    /// Parse the index kind.
    ///
    /// Returns the default if not set.
    fn load_index_by(value: Option<String>) -> Result<IndexKind, ConfigError> {
        let Some(value) = value else {
            return Ok(IndexKind::default());
        };

        value
            .parse::<IndexKind>()
            .map_err(|message| ConfigError::InvalidValue {
                name: Self::INDEX_BY_VAR.to_string(),
                message,
            })
    }

    /// Parse the area tolerance.
    ///
    /// Returns the default if not set.
    fn load_area_tolerance(value: Option<String>) -> Result<f64, ConfigError> {
        let Some(value) = value else {
            return Ok(DEFAULT_AREA_TOLERANCE);
        };

        match value.trim().parse::<f64>() {
            Ok(tolerance) if tolerance.is_finite() && tolerance > 0.0 => Ok(tolerance),
            _ => Err(ConfigError::InvalidValue {
                name: Self::AREA_TOLERANCE_VAR.to_string(),
                message: format!("'{value}' is not a finite positive number"),
            }),
        }
    }
}
