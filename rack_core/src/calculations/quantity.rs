//! # Material Quantities
//!
//! Steel take-off for a run of identical racks: the main beam length and
//! mass from the selected profile, and a fuller bill of materials that adds
//! supports and connection hardware.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::beam::{select_for_demand, BeamDemand};
//! use rack_core::calculations::quantity::estimate_quantity;
//! use rack_core::params::GeometryParameters;
//! use rack_core::settings::DesignSettings;
//! use rack_core::tables::{CodeTables, RoofType};
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let demand = BeamDemand { moment_knm: 0.5, service_line_load_kn_m: 0.5, span_m: 2.0 };
//! let beam = select_for_demand(&demand, tables.profiles(), &DesignSettings::default()).unwrap();
//!
//! let geometry = GeometryParameters {
//!     tilt_deg: 25.0,
//!     roof_type: RoofType::MonoSlope,
//!     array_width_m: 2.0,
//!     row_length_m: 10.0,
//!     mounting_height_m: 2.5,
//!     support_span_m: 2.0,
//!     beams_per_rack: 2,
//! };
//!
//! let quantity = estimate_quantity(&beam, &geometry, 5).unwrap();
//! assert_eq!(quantity.total_length_m, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::beam::SelectionResult;
use super::column::ColumnSelection;
use crate::errors::{CalcError, CalcResult};
use crate::params::GeometryParameters;
use crate::settings::DesignSettings;

/// Main beam take-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityResult {
    pub profile_label: String,
    pub rack_count: i64,
    /// Main beam length in one rack (m)
    pub length_per_rack_m: f64,
    /// Main beam length over all racks (m)
    pub total_length_m: f64,
    /// Main beam steel over all racks (kg)
    pub total_mass_kg: f64,
}

/// One line of the bill of materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberQuantity {
    pub profile_label: String,
    /// Pieces over all racks
    pub pieces: i64,
    /// Length of one piece (m)
    pub piece_length_m: f64,
    pub total_length_m: f64,
    pub total_mass_kg: f64,
}

impl MemberQuantity {
    fn new(profile_label: &str, pieces: i64, piece_length_m: f64, mass_kg_per_m: f64) -> Self {
        let total_length_m = pieces as f64 * piece_length_m;
        MemberQuantity {
            profile_label: profile_label.to_string(),
            pieces,
            piece_length_m,
            total_length_m,
            total_mass_kg: total_length_m * mass_kg_per_m,
        }
    }
}

/// Steel take-off for the whole installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    pub rack_count: i64,
    pub beams: MemberQuantity,
    pub columns: MemberQuantity,
    /// Bolts, brackets and clamps as a fraction of member steel (kg)
    pub connection_mass_kg: f64,
    pub total_mass_kg: f64,
}

fn check_rack_count(rack_count: i64) -> CalcResult<()> {
    if rack_count < 0 {
        return Err(CalcError::invalid_input(
            "rack_count",
            rack_count.to_string(),
            "Rack count cannot be negative",
        ));
    }
    Ok(())
}

/// Pieces over all racks, refusing counts that do not fit in an `i64`
fn total_pieces(per_rack: u32, rack_count: i64) -> CalcResult<i64> {
    i64::from(per_rack).checked_mul(rack_count).ok_or_else(|| {
        CalcError::invalid_input(
            "rack_count",
            rack_count.to_string(),
            format!("{} pieces per rack overflows the piece count", per_rack),
        )
    })
}

/// Main beam length and mass for `rack_count` racks.
///
/// Zero racks give zero quantities; a negative count is `InvalidInput`.
pub fn estimate_quantity(
    selection: &SelectionResult,
    geometry: &GeometryParameters,
    rack_count: i64,
) -> CalcResult<QuantityResult> {
    check_rack_count(rack_count)?;
    geometry.validate()?;

    let length_per_rack_m = geometry.beams_per_rack as f64 * geometry.row_length_m;
    let total_length_m = length_per_rack_m * rack_count as f64;
    let total_mass_kg = total_length_m * selection.profile.mass_kg_per_m;

    debug!(rack_count, total_length_m, total_mass_kg, "main beam quantity estimated");

    Ok(QuantityResult {
        profile_label: selection.profile.label.clone(),
        rack_count,
        length_per_rack_m,
        total_length_m,
        total_mass_kg,
    })
}

/// Beams, supports and connection allowance for `rack_count` racks.
///
/// Supports per rack are `ceil(row_length / support_span)`; each is
/// `mounting_height · column_length_factor` long.
pub fn estimate_bill_of_materials(
    beam: &SelectionResult,
    column: &ColumnSelection,
    geometry: &GeometryParameters,
    rack_count: i64,
    settings: &DesignSettings,
) -> CalcResult<BillOfMaterials> {
    check_rack_count(rack_count)?;
    geometry.validate()?;
    settings.validate()?;

    let beams = MemberQuantity::new(
        &beam.profile.label,
        total_pieces(geometry.beams_per_rack, rack_count)?,
        geometry.row_length_m,
        beam.profile.mass_kg_per_m,
    );
    let columns = MemberQuantity::new(
        &column.profile.label,
        total_pieces(geometry.supports_per_rack(), rack_count)?,
        geometry.mounting_height_m * settings.column_length_factor,
        column.profile.mass_kg_per_m,
    );

    let steel_kg = beams.total_mass_kg + columns.total_mass_kg;
    let connection_mass_kg = steel_kg * settings.connection_allowance;
    let total_mass_kg = steel_kg + connection_mass_kg;

    debug!(
        beams = beams.pieces,
        columns = columns.pieces,
        total_mass_kg,
        "bill of materials estimated"
    );

    Ok(BillOfMaterials {
        rack_count,
        beams,
        columns,
        connection_mass_kg,
        total_mass_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::beam::{check_profile, BeamDemand};
    use crate::calculations::column::check_column;
    use crate::tables::{CodeTables, RoofType};

    fn geometry() -> GeometryParameters {
        GeometryParameters {
            tilt_deg: 25.0,
            roof_type: RoofType::MonoSlope,
            array_width_m: 2.0,
            row_length_m: 10.0,
            mounting_height_m: 2.5,
            support_span_m: 3.0,
            beams_per_rack: 2,
        }
    }

    fn beam() -> SelectionResult {
        let tables = CodeTables::gb50009_2012().unwrap();
        let demand = BeamDemand {
            moment_knm: 0.5,
            service_line_load_kn_m: 0.5,
            span_m: 3.0,
        };
        check_profile(tables.profiles().get("C100x50x20x2.5").unwrap(), &demand, 0.95)
    }

    fn column() -> ColumnSelection {
        let tables = CodeTables::gb50009_2012().unwrap();
        check_column(tables.profiles().get("□60x60x2.5").unwrap(), 5.0, 0.95)
    }

    #[test]
    fn test_quantity() {
        let b = beam();
        let q = estimate_quantity(&b, &geometry(), 3).unwrap();
        assert_eq!(q.length_per_rack_m, 20.0);
        assert_eq!(q.total_length_m, 60.0);
        assert!((q.total_mass_kg - 60.0 * b.profile.mass_kg_per_m).abs() < 1e-9);
    }

    #[test]
    fn test_zero_racks() {
        let q = estimate_quantity(&beam(), &geometry(), 0).unwrap();
        assert_eq!(q.total_length_m, 0.0);
        assert_eq!(q.total_mass_kg, 0.0);
    }

    #[test]
    fn test_negative_racks() {
        let err = estimate_quantity(&beam(), &geometry(), -1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let err = estimate_bill_of_materials(&beam(), &column(), &geometry(), -1, &DesignSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_huge_rack_count_is_rejected() {
        let count = i64::MAX / 2 + 1;
        let err = estimate_bill_of_materials(&beam(), &column(), &geometry(), count, &DesignSettings::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("rack_count"));

        // one beam and one support per rack still fits
        let single = GeometryParameters {
            beams_per_rack: 1,
            support_span_m: 10.0,
            ..geometry()
        };
        let bom = estimate_bill_of_materials(&beam(), &column(), &single, i64::MAX, &DesignSettings::default())
            .unwrap();
        assert_eq!(bom.beams.pieces, i64::MAX);
        assert_eq!(bom.columns.pieces, i64::MAX);
    }

    #[test]
    fn test_bill_of_materials() {
        let b = beam();
        let c = column();
        let bom = estimate_bill_of_materials(&b, &c, &geometry(), 2, &DesignSettings::default()).unwrap();

        // ceil(10 / 3) = 4 supports per rack
        assert_eq!(bom.columns.pieces, 8);
        assert!((bom.columns.piece_length_m - 3.0).abs() < 1e-12);
        assert_eq!(bom.beams.pieces, 4);
        assert_eq!(bom.beams.total_length_m, 40.0);

        let steel = bom.beams.total_mass_kg + bom.columns.total_mass_kg;
        assert!((bom.connection_mass_kg - 0.15 * steel).abs() < 1e-9);
        assert!((bom.total_mass_kg - 1.15 * steel).abs() < 1e-9);
    }
}
