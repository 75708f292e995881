//! # Rack Design
//!
//! Runs the complete calculation for one rack type: characteristic loads,
//! combinations, main beam and column selection, then quantities.
//!
//! ```text
//! site, geometry ──► wind ─┐
//! site, geometry ──► snow ─┼─► combine ─► beam ─► quantity
//! panel ──────────► dead ─┘          └──► column ─► bill of materials
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::rack::{design_rack, RackDesignInput};
//! use rack_core::params::{GeometryParameters, PanelParameters, SiteParameters};
//! use rack_core::settings::DesignSettings;
//! use rack_core::tables::{CodeTables, RoofType, TerrainCategory};
//!
//! let input = RackDesignInput {
//!     label: "Row A".to_string(),
//!     site: SiteParameters::new("beijing", TerrainCategory::B, 3.0),
//!     geometry: GeometryParameters {
//!         tilt_deg: 25.0,
//!         roof_type: RoofType::MonoSlope,
//!         array_width_m: 2.0,
//!         row_length_m: 10.0,
//!         mounting_height_m: 2.5,
//!         support_span_m: 2.5,
//!         beams_per_rack: 2,
//!     },
//!     panel: PanelParameters::default(),
//!     rack_count: 4,
//! };
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let report = design_rack(&input, &tables, &DesignSettings::default()).unwrap();
//! assert!(report.selection_result.passes);
//! assert_eq!(report.quantity_result.total_length_m, 80.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::beam::{select_profile, SelectionResult};
use super::column::{select_column_profile, ColumnSelection};
use super::quantity::{estimate_bill_of_materials, estimate_quantity, BillOfMaterials, QuantityResult};
use crate::errors::CalcResult;
use crate::loads::{combine, compute_dead_load, compute_snow_load, compute_wind_load};
use crate::loads::{CombinedLoad, DeadLoad, SnowLoad, WindLoad};
use crate::params::{GeometryParameters, PanelParameters, SiteParameters};
use crate::settings::DesignSettings;
use crate::tables::CodeTables;

fn default_label() -> String {
    "Rack".to_string()
}

/// Everything needed to design one rack type.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Row A",
///   "site": { "region": "beijing", "terrain": "B", "height_m": 3.0 },
///   "geometry": {
///     "tilt_deg": 25.0,
///     "roof_type": "MonoSlope",
///     "array_width_m": 2.0,
///     "row_length_m": 10.0,
///     "mounting_height_m": 2.5,
///     "support_span_m": 2.5
///   },
///   "panel": { "length_m": 1.7, "width_m": 1.0, "mass_kg": 20.0 },
///   "rack_count": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackDesignInput {
    /// User label (e.g., "Row A", "Carport east")
    #[serde(default = "default_label")]
    pub label: String,

    pub site: SiteParameters,

    pub geometry: GeometryParameters,

    #[serde(default)]
    pub panel: PanelParameters,

    /// Number of identical racks
    pub rack_count: i64,
}

/// The full calculation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackDesignReport {
    pub label: String,
    /// Code edition of the tables used
    pub code_edition: String,
    pub wind_load: WindLoad,
    pub snow_load: SnowLoad,
    pub dead_load: DeadLoad,
    pub combined_load: CombinedLoad,
    pub selection_result: SelectionResult,
    pub column_selection: ColumnSelection,
    pub quantity_result: QuantityResult,
    pub bill_of_materials: BillOfMaterials,
}

impl RackDesignReport {
    /// Both members pass within the threshold
    pub fn passes(&self) -> bool {
        self.selection_result.passes && self.column_selection.passes
    }
}

/// Design one rack type.
///
/// Pure: the same input, tables and settings always give the same report.
/// The first failing stage's error is returned unchanged.
#[instrument(skip_all, name = "design_rack", fields(label = %input.label))]
pub fn design_rack(
    input: &RackDesignInput,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> CalcResult<RackDesignReport> {
    settings.validate()?;

    let wind_load = compute_wind_load(&input.site, &input.geometry, tables)?;
    let snow_load = compute_snow_load(&input.site, &input.geometry, tables)?;
    let dead_load = compute_dead_load(&input.panel, settings)?;
    let combined_load = combine(&dead_load, &wind_load, &snow_load, &input.geometry, settings)?;

    let selection_result = select_profile(&combined_load, tables.profiles(), settings)?;
    let column_selection = select_column_profile(&combined_load, &input.geometry, tables.profiles(), settings)?;

    let quantity_result = estimate_quantity(&selection_result, &input.geometry, input.rack_count)?;
    let bill_of_materials = estimate_bill_of_materials(
        &selection_result,
        &column_selection,
        &input.geometry,
        input.rack_count,
        settings,
    )?;

    debug!(
        beam = %selection_result.profile.label,
        column = %column_selection.profile.label,
        total_mass_kg = bill_of_materials.total_mass_kg,
        "rack design complete"
    );

    Ok(RackDesignReport {
        label: input.label.clone(),
        code_edition: tables.edition.clone(),
        wind_load,
        snow_load,
        dead_load,
        combined_load,
        selection_result,
        column_selection,
        quantity_result,
        bill_of_materials,
    })
}
