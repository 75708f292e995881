//! # Member Calculations
//!
//! Selection and take-off for the steel members of a PV rack. Each
//! calculation follows the pattern:
//!
//! - a demand derived from [`crate::loads::CombinedLoad`]
//! - a `*Result`/`*Selection` record (JSON-serializable)
//! - a pure `select_*`/`estimate_*` function returning `CalcResult`
//!
//! ## Available Calculations
//!
//! - [`beam`] - main beam (rail) strength and deflection
//! - [`column`] - support axial check
//! - [`quantity`] - steel lengths, masses and bill of materials
//! - [`rack`] - the full pipeline for one rack type

pub mod beam;
pub mod column;
pub mod quantity;
pub mod rack;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use beam::{check_profile, select_profile, BeamDemand, SelectionResult};
pub use column::{column_axial_kn, select_column_profile, ColumnSelection};
pub use quantity::{estimate_bill_of_materials, estimate_quantity, BillOfMaterials, MemberQuantity, QuantityResult};
pub use rack::{design_rack, RackDesignInput, RackDesignReport};

/// Rack member being sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    /// Rail carrying the panels between supports
    MainBeam,
    /// Vertical support
    Column,
}

impl Member {
    pub fn display_name(&self) -> &'static str {
        match self {
            Member::MainBeam => "main beam",
            Member::Column => "column",
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
