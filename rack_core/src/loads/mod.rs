//! Loads on a PV mounting rack per GB 50009-2012
//!
//! Characteristic area loads are computed per action, converted to line
//! loads on one main beam, then factored and combined.
//!
//! # Overview
//!
//! - [`LoadType`] - the three actions on a rack (D, W, S)
//! - [`compute_wind_load`] / [`compute_snow_load`] / [`compute_dead_load`] -
//!   characteristic area loads (kPa)
//! - [`LoadCase`] - unfactored values by load type
//! - [`LoadCombination`] - factors for one code combination
//! - [`combine`] - line loads, governing combination and span forces
//!
//! # Example
//!
//! ```
//! use rack_core::loads::{LoadType, LoadCase, gb50009_design_combinations};
//!
//! // Line loads on a rail (kN/m)
//! let rail = LoadCase::new("Rail")
//!     .with_load(LoadType::Dead, 0.25)
//!     .with_load(LoadType::Wind, 1.10)
//!     .with_load(LoadType::Snow, 0.60);
//!
//! let max_load = gb50009_design_combinations()
//!     .iter()
//!     .map(|c| c.apply(&rail))
//!     .fold(0.0f64, f64::max);
//!
//! assert!(max_load > 2.0);
//! ```

pub mod combinations;
pub mod dead;
pub mod load_types;
pub mod snow;
pub mod wind;

pub use combinations::{
    combine,
    find_governing_combination,
    find_minimum_combination,
    gb50009_design_combinations,
    gb50009_service_combinations,
    gb50009_uplift_combinations,
    CombinationResult,
    CombinedLoad,
    LoadCombination,
    SpanForces,
};
pub use dead::{compute_dead_load, DeadLoad};
pub use load_types::LoadType;
pub use snow::{compute_snow_load, SnowLoad};
pub use wind::{compute_wind_load, WindLoad};

use serde::{Deserialize, Serialize};

/// Unfactored load values by type for one member
///
/// Units depend on context: kPa for area loads, kN/m for line loads.
///
/// # Example
/// ```
/// use rack_core::loads::{LoadCase, LoadType};
///
/// let case = LoadCase::new("Rail")
///     .with_load(LoadType::Dead, 0.3)
///     .with_load(LoadType::Wind, 1.2);
///
/// assert_eq!(case.get(LoadType::Dead), 0.3);
/// assert_eq!(case.get(LoadType::Snow), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadCase {
    pub label: String,
    #[serde(default)]
    pub dead: f64,
    #[serde(default)]
    pub wind: f64,
    #[serde(default)]
    pub snow: f64,
}

impl LoadCase {
    /// Create a new empty load case with a label
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            ..LoadCase::default()
        }
    }

    /// Set a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        match load_type {
            LoadType::Dead => self.dead = value,
            LoadType::Wind => self.wind = value,
            LoadType::Snow => self.snow = value,
        }
        self
    }

    pub fn get(&self, load_type: LoadType) -> f64 {
        match load_type {
            LoadType::Dead => self.dead,
            LoadType::Wind => self.wind,
            LoadType::Snow => self.snow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_case_builder() {
        let case = LoadCase::new("Test")
            .with_load(LoadType::Dead, 10.0)
            .with_load(LoadType::Snow, 20.0);

        assert_eq!(case.label, "Test");
        assert_eq!(case.get(LoadType::Dead), 10.0);
        assert_eq!(case.get(LoadType::Snow), 20.0);
        assert_eq!(case.get(LoadType::Wind), 0.0);
    }

    #[test]
    fn test_load_case_serialization() {
        let case = LoadCase::new("Rail").with_load(LoadType::Wind, 1.5);
        let json = serde_json::to_string(&case).unwrap();
        let parsed: LoadCase = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, case);

        let sparse: LoadCase = serde_json::from_str(r#"{ "label": "Sparse", "dead": 0.4 }"#).unwrap();
        assert_eq!(sparse.get(LoadType::Snow), 0.0);
    }
}
