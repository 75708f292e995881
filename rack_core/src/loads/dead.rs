//! # Dead Load
//!
//! Panel self-weight spread over the panel area, increased by an allowance
//! for the racking steel itself:
//!
//! ```text
//! gk = m · g / A / 1000 · (1 + allowance)      [kPa]
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::params::PanelParameters;
use crate::settings::DesignSettings;
use crate::units::Kilograms;

/// Characteristic permanent load on the panel plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadLoad {
    /// Panel weight per unit area (kPa)
    pub panel_kpa: f64,
    /// Racking allowance as a fraction of panel weight
    pub support_allowance: f64,
    /// Characteristic dead load gk (kPa)
    pub gk_kpa: f64,
}

/// Compute the dead area load of one panel plus racking allowance.
///
/// ```rust
/// use rack_core::loads::compute_dead_load;
/// use rack_core::params::PanelParameters;
/// use rack_core::settings::DesignSettings;
///
/// let panel = PanelParameters { length_m: 2.0, width_m: 1.0, mass_kg: 20.0 };
/// let dead = compute_dead_load(&panel, &DesignSettings::default()).unwrap();
/// // 20 kg · 9.8 / 2 m² = 98 N/m², plus 30 %
/// assert!((dead.gk_kpa - 0.1274).abs() < 1e-12);
/// ```
pub fn compute_dead_load(panel: &PanelParameters, settings: &DesignSettings) -> CalcResult<DeadLoad> {
    panel.validate()?;
    settings.validate()?;

    let weight = Kilograms(panel.mass_kg).weight(settings.gravity);
    let panel_kpa = weight.0 / panel.area_m2();
    let gk_kpa = panel_kpa * (1.0 + settings.support_allowance);

    debug!(panel_kpa, gk_kpa, "dead load computed");

    Ok(DeadLoad {
        panel_kpa,
        support_allowance: settings.support_allowance,
        gk_kpa,
    })
}
