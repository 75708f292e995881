//! # Column Profile Selection
//!
//! Sizes the rack supports for the axial reaction of the main beam lines.
//!
//! ## Assumptions
//!
//! - Axial load only: N = n·q·L, the reactions of `n` beam lines, each a
//!   continuous line of equal spans bearing on the same support
//! - Stocky member, no buckling reduction (mounting heights are a few metres)
//! - Same catalog and threshold as the main beam
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::column::select_for_axial;
//! use rack_core::settings::DesignSettings;
//! use rack_core::tables::CodeTables;
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let column = select_for_axial(12.0, tables.profiles(), &DesignSettings::default()).unwrap();
//! assert!(column.axial_utilization <= 0.95);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Member;
use crate::errors::{CalcError, CalcResult};
use crate::loads::CombinedLoad;
use crate::params::GeometryParameters;
use crate::settings::DesignSettings;
use crate::tables::{ProfileCatalog, ProfileRecord};

/// Chosen support profile and its axial check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub profile: ProfileRecord,

    /// Axial demand N (kN)
    pub axial_kn: f64,

    /// Axial capacity A·f (kN)
    pub capacity_kn: f64,

    /// N / (A · f)
    pub axial_utilization: f64,

    pub passes: bool,

    pub threshold: f64,
}

/// Check one profile for an axial load
pub fn check_column(profile: &ProfileRecord, axial_kn: f64, threshold: f64) -> ColumnSelection {
    let capacity_kn = profile.axial_capacity_kn();
    let axial_utilization = axial_kn.max(0.0) / capacity_kn;
    ColumnSelection {
        profile: profile.clone(),
        axial_kn,
        capacity_kn,
        axial_utilization,
        passes: axial_utilization <= threshold,
        threshold,
    }
}

/// Lightest profile carrying `axial_kn` within the threshold
pub fn select_for_axial(
    axial_kn: f64,
    catalog: &ProfileCatalog,
    settings: &DesignSettings,
) -> CalcResult<ColumnSelection> {
    settings.validate()?;
    let threshold = settings.safety_threshold;

    let mut best: Option<ColumnSelection> = None;
    for profile in catalog.iter() {
        let check = check_column(profile, axial_kn, threshold);
        if check.passes {
            debug!(profile = %check.profile.label, utilization = check.axial_utilization, "column selected");
            return Ok(check);
        }
        if best.as_ref().map_or(true, |b| check.axial_utilization < b.axial_utilization) {
            best = Some(check);
        }
    }

    warn!(axial_kn, candidates = catalog.len(), "no column profile within threshold");
    Err(CalcError::NoSuitableProfile {
        member: Member::Column.to_string(),
        best_candidate: best.as_ref().map(|b| b.profile.label.clone()),
        strength_utilization: best.as_ref().map_or(0.0, |b| b.axial_utilization),
        deflection_utilization: 0.0,
        threshold,
    })
}

/// Axial load on one support: every beam line of the rack bears on it.
pub fn column_axial_kn(combined: &CombinedLoad, geometry: &GeometryParameters) -> f64 {
    combined.forces.axial_kn * f64::from(geometry.beams_per_rack)
}

/// Select the support profile for a combined load
pub fn select_column_profile(
    combined: &CombinedLoad,
    geometry: &GeometryParameters,
    catalog: &ProfileCatalog,
    settings: &DesignSettings,
) -> CalcResult<ColumnSelection> {
    geometry.validate()?;
    select_for_axial(column_axial_kn(combined, geometry), catalog, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CodeTables;

    #[test]
    fn test_light_load_takes_lightest() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let column = select_for_axial(5.0, tables.profiles(), &DesignSettings::default()).unwrap();
        assert_eq!(column.profile.label, "C80x40x15x2.0");
    }

    #[test]
    fn test_picks_lightest_meeting_demand() {
        let tables = CodeTables::gb50009_2012().unwrap();
        // C80 carries 4.24e-4 · 156 667 ≈ 66.4 kN, so 0.95 of it ≈ 63.1 kN
        let column = select_for_axial(64.0, tables.profiles(), &DesignSettings::default()).unwrap();
        assert_eq!(column.profile.label, "□60x60x2.5");
        assert!(column.passes);
    }

    #[test]
    fn test_overload_reports_largest_section() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let err = select_for_axial(1.0e4, tables.profiles(), &DesignSettings::default()).unwrap_err();
        match err {
            CalcError::NoSuitableProfile { member, best_candidate, .. } => {
                assert_eq!(member, "column");
                assert_eq!(best_candidate.as_deref(), Some("□120x120x4.0"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_supports_carry_every_beam_line() {
        use crate::loads::{compute_dead_load, compute_snow_load, compute_wind_load, combine};
        use crate::params::{PanelParameters, SiteParameters};
        use crate::tables::{RoofType, TerrainCategory};

        let tables = CodeTables::gb50009_2012().unwrap();
        let settings = DesignSettings::default();
        let geometry = GeometryParameters {
            tilt_deg: 25.0,
            roof_type: RoofType::MonoSlope,
            array_width_m: 2.0,
            row_length_m: 10.0,
            mounting_height_m: 2.5,
            support_span_m: 2.5,
            beams_per_rack: 2,
        };
        let site = SiteParameters::new("beijing", TerrainCategory::B, 3.0);
        let wind = compute_wind_load(&site, &geometry, &tables).unwrap();
        let snow = compute_snow_load(&site, &geometry, &tables).unwrap();
        let dead = compute_dead_load(&PanelParameters::default(), &settings).unwrap();
        let combined = combine(&dead, &wind, &snow, &geometry, &settings).unwrap();

        let column = select_column_profile(&combined, &geometry, tables.profiles(), &settings).unwrap();

        // 4 supports share the design load of both 10 m beam lines
        let rack_load = combined.design_line_load_kn_m * geometry.row_length_m * 2.0;
        let supports = geometry.supports_per_rack() as f64;
        assert_eq!(supports, 4.0);
        assert!((column.axial_kn * supports - rack_load).abs() < 1e-9);
        assert!((column.axial_kn - 2.0 * combined.forces.axial_kn).abs() < 1e-12);
    }

    #[test]
    fn test_utilization() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let tube = tables.profiles().get("□100x100x3.5").unwrap();
        let check = check_column(tube, 103.4, 0.95);
        assert!((check.axial_utilization - 0.5).abs() < 1e-3);
    }
}
