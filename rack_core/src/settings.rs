//! # Design Settings
//!
//! Tunable parameters that are not part of the code tables: selection
//! thresholds, combination tie tolerance and the estimating allowances used
//! for dead load and quantities. All fields have serde defaults, so a
//! settings block in an input file only needs the values it changes.
//!
//! ```rust
//! use rack_core::settings::DesignSettings;
//!
//! let settings: DesignSettings = serde_json::from_str(r#"{ "safety_threshold": 0.9 }"#).unwrap();
//! assert_eq!(settings.safety_threshold, 0.9);
//! assert_eq!(settings.combination_tolerance, 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_at_least, CalcError, CalcResult};

/// Standard gravitational acceleration used for mass-to-force conversion (m/s²)
pub const GRAVITY: f64 = 9.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignSettings {
    /// Maximum utilization a profile may reach and still pass (≤ 1.0)
    pub safety_threshold: f64,

    /// Relative tolerance under which two combinations count as tied
    pub combination_tolerance: f64,

    /// Racking self-weight as a fraction of panel weight
    pub support_allowance: f64,

    /// Column length as a multiple of mounting height (embedment, bracing)
    pub column_length_factor: f64,

    /// Connection hardware as a fraction of beam + column steel
    pub connection_allowance: f64,

    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            safety_threshold: 0.95,
            combination_tolerance: 1e-6,
            support_allowance: 0.30,
            column_length_factor: 1.2,
            connection_allowance: 0.15,
            gravity: GRAVITY,
        }
    }
}

impl DesignSettings {
    pub fn validate(&self) -> CalcResult<()> {
        ensure_at_least("safety_threshold", self.safety_threshold, 0.0, true)?;
        if self.safety_threshold > 1.0 {
            return Err(CalcError::invalid_input(
                "safety_threshold",
                self.safety_threshold.to_string(),
                "Threshold above 1.0 would accept overstressed members",
            ));
        }
        ensure_at_least("combination_tolerance", self.combination_tolerance, 0.0, false)?;
        ensure_at_least("support_allowance", self.support_allowance, 0.0, false)?;
        ensure_at_least("column_length_factor", self.column_length_factor, 0.0, true)?;
        ensure_at_least("connection_allowance", self.connection_allowance, 0.0, false)?;
        ensure_at_least("gravity", self.gravity, 0.0, true)
    }
}
