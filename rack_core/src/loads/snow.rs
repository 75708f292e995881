//! # Snow Load (GB 50009-2012 §7.1.1)
//!
//! `sk = μr · s0`, with μr read from the roof-surface distribution curve at
//! the panel tilt. Steep arrays shed snow: μr falls from 1.0 at 25° to zero
//! at 55°.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::params::{GeometryParameters, SiteParameters};
use crate::tables::CodeTables;

/// Characteristic snow load on the panel surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowLoad {
    /// Basic snow pressure s0 (kPa)
    pub s0_kpa: f64,
    /// Roof-surface distribution coefficient μr
    pub mu_r: f64,
    /// Characteristic snow pressure sk (kPa, horizontal projection)
    pub sk_kpa: f64,
}

impl SnowLoad {
    pub fn equation(&self) -> String {
        format!(
            "sk = μr·s0 = {:.3} × {:.3} = {:.4} kPa",
            self.mu_r, self.s0_kpa, self.sk_kpa
        )
    }
}

/// Compute the characteristic snow pressure for a site and tilt.
///
/// # Example
///
/// ```rust
/// use rack_core::loads::compute_snow_load;
/// use rack_core::params::{GeometryParameters, SiteParameters};
/// use rack_core::tables::{CodeTables, RoofType, TerrainCategory};
///
/// let tables = CodeTables::gb50009_2012().unwrap();
/// let site = SiteParameters::new("harbin", TerrainCategory::B, 3.0);
/// let geometry = GeometryParameters {
///     tilt_deg: 35.0,
///     roof_type: RoofType::MonoSlope,
///     array_width_m: 2.0,
///     row_length_m: 10.0,
///     mounting_height_m: 3.0,
///     support_span_m: 2.5,
///     beams_per_rack: 2,
/// };
///
/// let snow = compute_snow_load(&site, &geometry, &tables).unwrap();
/// assert!((snow.sk_kpa - 0.70 * 0.45).abs() < 1e-12);
/// ```
pub fn compute_snow_load(
    site: &SiteParameters,
    geometry: &GeometryParameters,
    tables: &CodeTables,
) -> CalcResult<SnowLoad> {
    geometry.validate()?;

    let s0_kpa = site.basic_snow_pressure(tables)?;
    let mu_r = tables.snow_distribution.eval(geometry.tilt_deg);
    let sk_kpa = (mu_r * s0_kpa).max(0.0);

    debug!(region = %site.region, tilt_deg = geometry.tilt_deg, s0_kpa, mu_r, sk_kpa, "snow load computed");

    Ok(SnowLoad { s0_kpa, mu_r, sk_kpa })
}
