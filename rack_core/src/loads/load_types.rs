//! Load type definitions per GB 50009-2012
//!
//! A PV rack carries three load categories: the permanent weight of panels
//! and racking, wind pressure normal to the panel plane, and roof snow.

use serde::{Deserialize, Serialize};

/// Load types acting on a PV mounting rack
///
/// # Example
/// ```
/// use rack_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(dead.to_string(), "D");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Panels plus racking self-weight (permanent, Gk)
    Dead,
    /// W - Wind pressure normal to the panel plane (wk)
    Wind,
    /// S - Snow on the panel plane (sk)
    Snow,
}

impl LoadType {
    /// Standard abbreviation used in combination equations (D, W, S)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Wind => "W",
            LoadType::Snow => "S",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
