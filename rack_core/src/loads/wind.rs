//! # Wind Load (GB 50009-2012 §8.1.1)
//!
//! Characteristic wind pressure on the panel plane:
//!
//! ```text
//! wk = βgz · μs · μz · w0
//! ```
//!
//! - `w0` basic wind pressure of the region (or the site override)
//! - `μz` height-variation coefficient for the terrain category
//! - `μs` shape coefficient of the array form at the panel tilt
//! - `βgz` gust factor from the tables' gust model
//!
//! ## Example
//!
//! ```rust
//! use rack_core::loads::compute_wind_load;
//! use rack_core::params::{GeometryParameters, SiteParameters};
//! use rack_core::tables::{CodeTables, RoofType, TerrainCategory};
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let site = SiteParameters::new("beijing", TerrainCategory::B, 3.0);
//! let geometry = GeometryParameters {
//!     tilt_deg: 30.0,
//!     roof_type: RoofType::MonoSlope,
//!     array_width_m: 2.0,
//!     row_length_m: 10.0,
//!     mounting_height_m: 3.0,
//!     support_span_m: 2.5,
//!     beams_per_rack: 2,
//! };
//!
//! let wind = compute_wind_load(&site, &geometry, &tables).unwrap();
//! // 1.0 · 1.3 · 1.0 · 0.45
//! assert!((wind.wk_kpa - 0.585).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::params::{GeometryParameters, SiteParameters};
use crate::tables::CodeTables;

/// Characteristic wind load on the panel plane, with its factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindLoad {
    /// Basic wind pressure w0 (kPa)
    pub w0_kpa: f64,
    /// Height-variation coefficient μz
    pub mu_z: f64,
    /// Shape coefficient μs
    pub mu_s: f64,
    /// Gust factor βgz
    pub beta_gz: f64,
    /// Characteristic wind pressure wk (kPa)
    pub wk_kpa: f64,
}

impl WindLoad {
    /// Equation with values substituted, for reports
    pub fn equation(&self) -> String {
        format!(
            "wk = βgz·μs·μz·w0 = {:.3} × {:.3} × {:.3} × {:.3} = {:.4} kPa",
            self.beta_gz, self.mu_s, self.mu_z, self.w0_kpa, self.wk_kpa
        )
    }
}

/// Compute the characteristic wind pressure for a site and rack geometry.
///
/// Fails with `InvalidInput` for a non-positive height or an out-of-range
/// tilt, and with `UnknownRegion` when the site's region is not tabulated.
pub fn compute_wind_load(
    site: &SiteParameters,
    geometry: &GeometryParameters,
    tables: &CodeTables,
) -> CalcResult<WindLoad> {
    site.validate()?;
    geometry.validate()?;

    let w0_kpa = site.basic_wind_pressure(tables)?;
    let profile = tables.exposure(site.terrain)?;
    let mu_z = profile.mu_z(site.height_m);
    let mu_s = tables.wind_shape(geometry.roof_type)?.eval(geometry.tilt_deg);
    let beta_gz = tables.gust.beta_gz(profile, site.height_m);

    let wk_kpa = (beta_gz * mu_s * mu_z * w0_kpa).max(0.0);

    debug!(
        region = %site.region,
        terrain = %site.terrain,
        height_m = site.height_m,
        w0_kpa,
        mu_z,
        mu_s,
        beta_gz,
        wk_kpa,
        "wind load computed"
    );

    Ok(WindLoad {
        w0_kpa,
        mu_z,
        mu_s,
        beta_gz,
        wk_kpa,
    })
}
