//! # Main Beam Profile Selection
//!
//! Picks the lightest catalog profile whose strength and deflection
//! utilizations both stay within the safety threshold.
//!
//! ## Assumptions
//!
//! - Simply supported span between rack supports
//! - Uniform line load from the governing design combination (strength)
//! - Uniform line load from the governing characteristic combination (deflection)
//! - Elastic section, no lateral-torsional reduction
//!
//! ## Checks
//!
//! ```text
//! strength   = M / (W · f)
//! deflection = δ / (L/n),   δ = 5·q·L⁴ / (384·E·I)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rack_core::calculations::beam::{select_for_demand, BeamDemand};
//! use rack_core::settings::DesignSettings;
//! use rack_core::tables::CodeTables;
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let demand = BeamDemand {
//!     moment_knm: 0.8,
//!     service_line_load_kn_m: 0.9,
//!     span_m: 2.5,
//! };
//!
//! let result = select_for_demand(&demand, tables.profiles(), &DesignSettings::default()).unwrap();
//! assert!(result.passes);
//! assert!(result.governing_unity() <= 0.95);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Member;
use crate::errors::{CalcError, CalcResult};
use crate::loads::CombinedLoad;
use crate::settings::DesignSettings;
use crate::tables::{ProfileCatalog, ProfileRecord};

/// What a main beam has to carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamDemand {
    /// Design moment M (kN·m)
    pub moment_knm: f64,

    /// Characteristic line load for deflection (kN/m)
    pub service_line_load_kn_m: f64,

    /// Span between supports (m)
    pub span_m: f64,
}

impl From<&CombinedLoad> for BeamDemand {
    fn from(combined: &CombinedLoad) -> Self {
        BeamDemand {
            moment_knm: combined.forces.moment_knm,
            service_line_load_kn_m: combined.service_line_load_kn_m,
            span_m: combined.span_m,
        }
    }
}

/// Outcome of checking one profile against a beam demand.
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile": { "label": "C100x50x20x2.5", "kind": "CChannel", "...": "..." },
///   "strength_utilization": 0.62,
///   "deflection_utilization": 0.41,
///   "deflection_mm": 4.1,
///   "allowable_deflection_mm": 10.0,
///   "passes": true,
///   "threshold": 0.95
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub profile: ProfileRecord,

    /// M / (W · f)
    pub strength_utilization: f64,

    /// δ / (L/n)
    pub deflection_utilization: f64,

    /// Mid-span deflection under the service load (mm)
    pub deflection_mm: f64,

    /// L/n (mm)
    pub allowable_deflection_mm: f64,

    /// Both utilizations within the threshold
    pub passes: bool,

    /// Safety threshold the utilizations were compared against
    pub threshold: f64,
}

impl SelectionResult {
    /// Get the governing (highest) utilization
    pub fn governing_unity(&self) -> f64 {
        self.strength_utilization.max(self.deflection_utilization)
    }

    /// Get a description of what governs the design
    pub fn governing_condition(&self) -> &'static str {
        if self.strength_utilization >= self.deflection_utilization {
            "Strength"
        } else {
            "Deflection"
        }
    }
}

/// Mid-span deflection of a simply supported beam under uniform load (m)
fn uniform_load_deflection_m(q_kn_m: f64, span_m: f64, profile: &ProfileRecord) -> f64 {
    let ei = profile.elastic_modulus_kpa().0 * profile.moment_of_inertia_m4().0;
    5.0 * q_kn_m * span_m.powi(4) / (384.0 * ei)
}

/// Check a single profile against a demand.
///
/// Never fails; a profile that does not pass comes back with
/// `passes == false`.
pub fn check_profile(profile: &ProfileRecord, demand: &BeamDemand, threshold: f64) -> SelectionResult {
    let moment = demand.moment_knm.max(0.0);
    let strength_utilization = moment / profile.moment_capacity_knm();

    let (deflection_m, allowable_m) = if demand.span_m > 0.0 {
        let q = demand.service_line_load_kn_m.max(0.0);
        (
            uniform_load_deflection_m(q, demand.span_m, profile),
            demand.span_m / profile.deflection_limit_ratio,
        )
    } else {
        (0.0, 0.0)
    };
    let deflection_utilization = if allowable_m > 0.0 { deflection_m / allowable_m } else { 0.0 };

    SelectionResult {
        profile: profile.clone(),
        strength_utilization,
        deflection_utilization,
        deflection_mm: deflection_m * 1000.0,
        allowable_deflection_mm: allowable_m * 1000.0,
        passes: strength_utilization <= threshold && deflection_utilization <= threshold,
        threshold,
    }
}

/// Scan the catalog (lightest first) for a main beam profile.
///
/// # Errors
///
/// `NoSuitableProfile` when no profile passes. The error names the
/// candidate with the lowest governing utilization, or none for an empty
/// catalog.
pub fn select_for_demand(
    demand: &BeamDemand,
    catalog: &ProfileCatalog,
    settings: &DesignSettings,
) -> CalcResult<SelectionResult> {
    settings.validate()?;
    let threshold = settings.safety_threshold;

    let mut best: Option<SelectionResult> = None;
    for profile in catalog.iter() {
        let check = check_profile(profile, demand, threshold);
        if check.passes {
            debug!(
                profile = %check.profile.label,
                strength = check.strength_utilization,
                deflection = check.deflection_utilization,
                "main beam selected"
            );
            return Ok(check);
        }
        let better = best
            .as_ref()
            .map_or(true, |b| check.governing_unity() < b.governing_unity());
        if better {
            best = Some(check);
        }
    }

    warn!(
        candidates = catalog.len(),
        best = best.as_ref().map(|b| b.profile.label.as_str()).unwrap_or("<none>"),
        "no main beam profile within threshold"
    );
    Err(no_suitable(Member::MainBeam, best.as_ref(), threshold))
}

pub(crate) fn no_suitable(member: Member, best: Option<&SelectionResult>, threshold: f64) -> CalcError {
    CalcError::NoSuitableProfile {
        member: member.to_string(),
        best_candidate: best.map(|b| b.profile.label.clone()),
        strength_utilization: best.map_or(0.0, |b| b.strength_utilization),
        deflection_utilization: best.map_or(0.0, |b| b.deflection_utilization),
        threshold,
    }
}

/// Select the main beam for a combined load.
///
/// # Arguments
///
/// * `combined` - Output of [`crate::loads::combine`]
/// * `catalog` - Profiles sorted by weight, usually `tables.profiles()`
/// * `settings` - Supplies the safety threshold
pub fn select_profile(
    combined: &CombinedLoad,
    catalog: &ProfileCatalog,
    settings: &DesignSettings,
) -> CalcResult<SelectionResult> {
    select_for_demand(&BeamDemand::from(combined), catalog, settings)
}
