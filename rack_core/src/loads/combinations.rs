//! GB 50009-2012 Load Combinations
//!
//! Ultimate (design) combinations per §3.2.3/§3.2.4, characteristic (service)
//! combinations per §3.2.8 for deflection, and one wind-uplift check.
//!
//! ## Wind Load Sign Convention
//!
//! Wind (W) is entered as a positive magnitude acting toward the panel face.
//! The uplift combination `GB-U` applies it with a negative factor, so a
//! negative result means net suction on the rack.
//!
//! ## Ordering
//!
//! Factors are stored as an ordered list rather than a map: the factored sum
//! is always accumulated in the order the factors were declared, and two runs
//! over the same inputs give bit-identical results. When two combinations
//! tie within the relative tolerance, the one declared first governs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dead::DeadLoad;
use super::load_types::LoadType;
use super::snow::SnowLoad;
use super::wind::WindLoad;
use super::LoadCase;
use crate::errors::{ensure_at_least, CalcResult};
use crate::params::GeometryParameters;
use crate::settings::DesignSettings;

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use rack_core::loads::{LoadCombination, LoadCase, LoadType};
///
/// let combo = LoadCombination::new("GB-1", "1.2D + 1.4W")
///     .with_factor(LoadType::Dead, 1.2)
///     .with_factor(LoadType::Wind, 1.4);
///
/// let case = LoadCase::new("Rail")
///     .with_load(LoadType::Dead, 0.5)
///     .with_load(LoadType::Wind, 1.0);
///
/// assert!((combo.apply(&case) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "GB-1", "SLS-2")
    pub name: String,

    /// Human-readable equation for display (e.g., "1.2D + 1.4W")
    pub equation: String,

    /// Load factors in summation order
    pub factors: Vec<(LoadType, f64)>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: Vec::new(),
        }
    }

    /// Add a load factor (builder pattern)
    ///
    /// Setting a type twice replaces its factor in place, keeping the
    /// original position in the summation order.
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        match self.factors.iter_mut().find(|(lt, _)| *lt == load_type) {
            Some(entry) => entry.1 = factor,
            None => self.factors.push((load_type, factor)),
        }
        self
    }

    /// Apply this combination to a LoadCase, returning the total factored load
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .fold(0.0, |sum, (load_type, factor)| sum + factor * case.get(*load_type))
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors
            .iter()
            .find(|(lt, _)| *lt == load_type)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }
}

/// Ultimate limit state combinations, in priority order
///
/// ```
/// use rack_core::loads::gb50009_design_combinations;
///
/// let combos = gb50009_design_combinations();
/// assert_eq!(combos[0].name, "GB-1");
/// assert_eq!(combos.len(), 4);
/// ```
pub fn gb50009_design_combinations() -> Vec<LoadCombination> {
    vec![
        // variable-load governed, wind alone
        LoadCombination::new("GB-1", "1.2D + 1.4W")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Wind, 1.4),

        // variable-load governed, snow alone
        LoadCombination::new("GB-2", "1.2D + 1.4S")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Snow, 1.4),

        // wind and snow together, 0.9 reduction on both
        LoadCombination::new("GB-3", "1.2D + 0.9×1.4(W + S)")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Wind, 0.9 * 1.4)
            .with_factor(LoadType::Snow, 0.9 * 1.4),

        // permanent-load governed, ψc = 0.7 snow, 0.6 wind
        LoadCombination::new("GB-4", "1.35D + 0.98S + 0.84W")
            .with_factor(LoadType::Dead, 1.35)
            .with_factor(LoadType::Snow, 1.4 * 0.7)
            .with_factor(LoadType::Wind, 1.4 * 0.6),
    ]
}

/// Characteristic combinations for deflection checks
pub fn gb50009_service_combinations() -> Vec<LoadCombination> {
    vec![
        LoadCombination::new("SLS-1", "D + W")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Wind, 1.0),
        LoadCombination::new("SLS-2", "D + S")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Snow, 1.0),
        LoadCombination::new("SLS-3", "D + 0.9(W + S)")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Wind, 0.9)
            .with_factor(LoadType::Snow, 0.9),
    ]
}

/// Wind suction against favourable dead load (γG = 1.0)
pub fn gb50009_uplift_combinations() -> Vec<LoadCombination> {
    vec![LoadCombination::new("GB-U", "1.0D - 1.4W")
        .with_factor(LoadType::Dead, 1.0)
        .with_factor(LoadType::Wind, -1.4)]
}

fn exceeds(candidate: f64, current: f64, tolerance: f64) -> bool {
    candidate - current > tolerance * candidate.abs().max(current.abs())
}

/// Find the governing (maximum) load combination result
///
/// A later combination only replaces the current maximum when it is larger
/// by more than `tolerance` relative to the larger magnitude.
///
/// # Example
/// ```
/// use rack_core::loads::{LoadCase, LoadType, gb50009_design_combinations, find_governing_combination};
///
/// let case = LoadCase::new("Rail")
///     .with_load(LoadType::Dead, 0.3)
///     .with_load(LoadType::Wind, 1.0);
///
/// let (max_load, combo_name) = find_governing_combination(&case, &gb50009_design_combinations(), 1e-6);
/// assert_eq!(combo_name, "GB-1");
/// assert!((max_load - 1.76).abs() < 1e-12);
/// ```
pub fn find_governing_combination(
    case: &LoadCase,
    combinations: &[LoadCombination],
    tolerance: f64,
) -> (f64, String) {
    let mut governing: Option<(f64, &LoadCombination)> = None;
    for combo in combinations {
        let load = combo.apply(case);
        match governing {
            Some((current, _)) if !exceeds(load, current, tolerance) => {}
            _ => governing = Some((load, combo)),
        }
    }
    governing
        .map(|(load, combo)| (load, combo.name.clone()))
        .unwrap_or((0.0, String::new()))
}

/// Find the minimum load combination result (critical for uplift)
///
/// Negative values indicate net uplift. Ties keep the earlier combination.
pub fn find_minimum_combination(
    case: &LoadCase,
    combinations: &[LoadCombination],
    tolerance: f64,
) -> (f64, String) {
    let mut minimum: Option<(f64, &LoadCombination)> = None;
    for combo in combinations {
        let load = combo.apply(case);
        match minimum {
            Some((current, _)) if !exceeds(current, load, tolerance) => {}
            _ => minimum = Some((load, combo)),
        }
    }
    minimum
        .map(|(load, combo)| (load, combo.name.clone()))
        .unwrap_or((0.0, String::new()))
}

/// One evaluated combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    pub name: String,
    pub equation: String,
    /// Factored (or characteristic) line load on the main beam (kN/m)
    pub line_load_kn_m: f64,
}

/// Internal forces in a simply supported span under uniform load
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanForces {
    /// Mid-span moment M = qL²/8 (kN·m)
    pub moment_knm: f64,
    /// End shear V = qL/2 (kN)
    pub shear_kn: f64,
    /// Support reaction of a continuous line of equal spans, N = qL (kN)
    pub axial_kn: f64,
}

impl SpanForces {
    /// Forces for line load `q` (kN/m) over span `span_m` (m).
    ///
    /// A zero span or a non-positive load gives zero forces.
    ///
    /// ```
    /// use rack_core::loads::SpanForces;
    ///
    /// let f = SpanForces::simply_supported(2.4, 2.0);
    /// assert!((f.moment_knm - 1.2).abs() < 1e-12);
    /// assert!((f.shear_kn - 2.4).abs() < 1e-12);
    /// assert!((f.axial_kn - 4.8).abs() < 1e-12);
    /// ```
    pub fn simply_supported(q_kn_m: f64, span_m: f64) -> Self {
        if span_m <= 0.0 || q_kn_m <= 0.0 {
            return SpanForces::default();
        }
        SpanForces {
            moment_knm: q_kn_m * span_m * span_m / 8.0,
            shear_kn: q_kn_m * span_m / 2.0,
            axial_kn: q_kn_m * span_m,
        }
    }
}

/// Line loads on one main beam, all combinations evaluated, and the
/// governing internal forces.
///
/// ## JSON Example
///
/// ```json
/// {
///   "line_loads": { "label": "Main beam", "dead": 0.3, "wind": 1.17, "snow": 0.72 },
///   "design": [ { "name": "GB-1", "equation": "1.2D + 1.4W", "line_load_kn_m": 2.0 } ],
///   "governing_combination": "GB-3",
///   "design_line_load_kn_m": 2.7,
///   "service_combination": "SLS-3",
///   "service_line_load_kn_m": 2.0,
///   "uplift_combination": "GB-U",
///   "min_line_load_kn_m": -1.3,
///   "span_m": 2.5,
///   "forces": { "moment_knm": 2.1, "shear_kn": 3.4, "axial_kn": 6.8 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedLoad {
    /// Unfactored line loads (kN/m)
    pub line_loads: LoadCase,

    /// Every ultimate combination, in priority order
    pub design: Vec<CombinationResult>,

    /// Every characteristic combination, in priority order
    pub service: Vec<CombinationResult>,

    pub governing_combination: String,

    /// Governing factored line load (kN/m)
    pub design_line_load_kn_m: f64,

    pub service_combination: String,

    /// Governing characteristic line load, used for deflection (kN/m)
    pub service_line_load_kn_m: f64,

    pub uplift_combination: String,

    /// Smallest line load over design and uplift combinations (kN/m)
    ///
    /// Negative means net uplift on the connections.
    pub min_line_load_kn_m: f64,

    pub span_m: f64,

    /// Forces under the governing design line load
    pub forces: SpanForces,
}

impl CombinedLoad {
    pub fn has_uplift(&self) -> bool {
        self.min_line_load_kn_m < 0.0
    }
}

fn evaluate(case: &LoadCase, combinations: &[LoadCombination]) -> Vec<CombinationResult> {
    combinations
        .iter()
        .map(|c| CombinationResult {
            name: c.name.clone(),
            equation: c.equation.clone(),
            line_load_kn_m: c.apply(case),
        })
        .collect()
}

/// Convert area loads to line loads on one main beam and combine them.
///
/// Dead and wind act on the panel plane, so their line load is the area load
/// times the array width. Snow is given per horizontal projection and is
/// scaled by cos(tilt).
///
/// # Example
/// ```
/// use rack_core::loads::{combine, DeadLoad, SnowLoad, WindLoad};
/// use rack_core::params::GeometryParameters;
/// use rack_core::settings::DesignSettings;
/// use rack_core::tables::RoofType;
///
/// let dead = DeadLoad { panel_kpa: 0.1, support_allowance: 0.0, gk_kpa: 0.1 };
/// let wind = WindLoad { w0_kpa: 0.5, mu_z: 1.0, mu_s: 1.0, beta_gz: 1.0, wk_kpa: 0.5 };
/// let snow = SnowLoad { s0_kpa: 0.0, mu_r: 1.0, sk_kpa: 0.0 };
/// let geometry = GeometryParameters {
///     tilt_deg: 0.0,
///     roof_type: RoofType::Flat,
///     array_width_m: 2.0,
///     row_length_m: 10.0,
///     mounting_height_m: 2.0,
///     support_span_m: 2.0,
///     beams_per_rack: 2,
/// };
///
/// let combined = combine(&dead, &wind, &snow, &geometry, &DesignSettings::default()).unwrap();
/// assert_eq!(combined.governing_combination, "GB-1");
/// // 1.2 × 0.2 + 1.4 × 1.0
/// assert!((combined.design_line_load_kn_m - 1.64).abs() < 1e-12);
/// ```
pub fn combine(
    dead: &DeadLoad,
    wind: &WindLoad,
    snow: &SnowLoad,
    geometry: &GeometryParameters,
    settings: &DesignSettings,
) -> CalcResult<CombinedLoad> {
    geometry.validate()?;
    settings.validate()?;
    ensure_at_least("dead.gk_kpa", dead.gk_kpa, 0.0, false)?;
    ensure_at_least("wind.wk_kpa", wind.wk_kpa, 0.0, false)?;
    ensure_at_least("snow.sk_kpa", snow.sk_kpa, 0.0, false)?;

    let width = geometry.array_width_m;
    let line_loads = LoadCase::new("Main beam")
        .with_load(LoadType::Dead, dead.gk_kpa * width)
        .with_load(LoadType::Wind, wind.wk_kpa * width)
        .with_load(LoadType::Snow, snow.sk_kpa * geometry.tilt_radians().cos() * width);

    let tolerance = settings.combination_tolerance;
    let design_combos = gb50009_design_combinations();
    let service_combos = gb50009_service_combinations();
    let uplift_combos = gb50009_uplift_combinations();

    let (design_line_load_kn_m, governing_combination) =
        find_governing_combination(&line_loads, &design_combos, tolerance);
    let (service_line_load_kn_m, service_combination) =
        find_governing_combination(&line_loads, &service_combos, tolerance);

    let mut all_combos = design_combos.clone();
    all_combos.extend(uplift_combos.iter().cloned());
    let (min_line_load_kn_m, uplift_combination) = find_minimum_combination(&line_loads, &all_combos, tolerance);

    let span_m = geometry.support_span_m;
    let forces = SpanForces::simply_supported(design_line_load_kn_m, span_m);

    debug!(
        governing = %governing_combination,
        q_design = design_line_load_kn_m,
        q_service = service_line_load_kn_m,
        q_min = min_line_load_kn_m,
        moment_knm = forces.moment_knm,
        "load combinations evaluated"
    );

    Ok(CombinedLoad {
        design: evaluate(&line_loads, &design_combos),
        service: evaluate(&line_loads, &service_combos),
        line_loads,
        governing_combination,
        design_line_load_kn_m,
        service_combination,
        service_line_load_kn_m,
        uplift_combination,
        min_line_load_kn_m,
        span_m,
        forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::RoofType;

    fn geometry() -> GeometryParameters {
        GeometryParameters {
            tilt_deg: 0.0,
            roof_type: RoofType::Flat,
            array_width_m: 1.0,
            row_length_m: 10.0,
            mounting_height_m: 2.0,
            support_span_m: 2.0,
            beams_per_rack: 2,
        }
    }

    fn loads(gk: f64, wk: f64, sk: f64) -> (DeadLoad, WindLoad, SnowLoad) {
        (
            DeadLoad { panel_kpa: gk, support_allowance: 0.0, gk_kpa: gk },
            WindLoad { w0_kpa: wk, mu_z: 1.0, mu_s: 1.0, beta_gz: 1.0, wk_kpa: wk },
            SnowLoad { s0_kpa: sk, mu_r: 1.0, sk_kpa: sk },
        )
    }

    #[test]
    fn test_combination_count() {
        assert_eq!(gb50009_design_combinations().len(), 4);
        assert_eq!(gb50009_service_combinations().len(), 3);
        assert_eq!(gb50009_uplift_combinations().len(), 1);
    }

    #[test]
    fn test_factor_lookup() {
        let combos = gb50009_design_combinations();
        let gb4 = combos.iter().find(|c| c.name == "GB-4").unwrap();
        assert_eq!(gb4.get_factor(LoadType::Dead), 1.35);
        assert!((gb4.get_factor(LoadType::Snow) - 0.98).abs() < 1e-12);
        assert!((gb4.get_factor(LoadType::Wind) - 0.84).abs() < 1e-12);
        assert_eq!(combos[0].get_factor(LoadType::Snow), 0.0);
    }

    #[test]
    fn test_with_factor_replaces_in_place() {
        let combo = LoadCombination::new("X", "D + W")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Wind, 1.0)
            .with_factor(LoadType::Dead, 1.2);
        assert_eq!(combo.factors, vec![(LoadType::Dead, 1.2), (LoadType::Wind, 1.0)]);
    }

    #[test]
    fn test_tie_keeps_first_combination() {
        // B is larger only by float noise
        let case = LoadCase::new("Tie")
            .with_load(LoadType::Dead, 0.0)
            .with_load(LoadType::Wind, 1.0)
            .with_load(LoadType::Snow, 1.0);
        let combos = vec![
            LoadCombination::new("A", "W").with_factor(LoadType::Wind, 1.0),
            LoadCombination::new("B", "S").with_factor(LoadType::Snow, 1.0 + 1e-9),
        ];
        let (_, name) = find_governing_combination(&case, &combos, 1e-6);
        assert_eq!(name, "A");

        let (_, name) = find_governing_combination(&case, &combos, 0.0);
        assert_eq!(name, "B");
    }

    #[test]
    fn test_wind_and_snow_together() {
        let (d, w, s) = loads(0.2, 1.0, 1.0);
        let combined = combine(&d, &w, &s, &geometry(), &DesignSettings::default()).unwrap();
        // GB-3: 0.24 + 1.26·2 = 2.76 beats GB-1/GB-2 at 1.64
        assert_eq!(combined.governing_combination, "GB-3");
        assert!((combined.design_line_load_kn_m - 2.76).abs() < 1e-12);
        assert_eq!(combined.service_combination, "SLS-3");
        assert!((combined.service_line_load_kn_m - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_permanent_governed() {
        let (d, w, s) = loads(2.0, 0.0, 0.0);
        let combined = combine(&d, &w, &s, &geometry(), &DesignSettings::default()).unwrap();
        assert_eq!(combined.governing_combination, "GB-4");
        assert!((combined.design_line_load_kn_m - 2.7).abs() < 1e-12);
    }

    #[test]
    fn test_uplift_reported() {
        let (d, w, s) = loads(0.1, 1.0, 0.0);
        let combined = combine(&d, &w, &s, &geometry(), &DesignSettings::default()).unwrap();
        assert_eq!(combined.uplift_combination, "GB-U");
        assert!((combined.min_line_load_kn_m - (0.1 - 1.4)).abs() < 1e-12);
        assert!(combined.has_uplift());
    }

    #[test]
    fn test_snow_projected_by_tilt() {
        let (d, w, s) = loads(0.0, 0.0, 1.0);
        let tilted = GeometryParameters { tilt_deg: 60.0, ..geometry() };
        let combined = combine(&d, &w, &s, &tilted, &DesignSettings::default()).unwrap();
        assert!((combined.line_loads.snow - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_forces() {
        let (d, w, s) = loads(0.0, 1.0, 0.0);
        let combined = combine(&d, &w, &s, &geometry(), &DesignSettings::default()).unwrap();
        // q = 1.4, L = 2
        assert!((combined.forces.moment_knm - 0.7).abs() < 1e-12);
        assert!((combined.forces.shear_kn - 1.4).abs() < 1e-12);
        assert!((combined.forces.axial_kn - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_span_gives_zero_forces() {
        let (d, w, s) = loads(0.2, 1.0, 1.0);
        let g = GeometryParameters { support_span_m: 0.0, ..geometry() };
        let combined = combine(&d, &w, &s, &g, &DesignSettings::default()).unwrap();
        assert_eq!(combined.forces, SpanForces::default());
    }

    #[test]
    fn test_zero_load_gives_zero_forces() {
        let (d, w, s) = loads(0.0, 0.0, 0.0);
        let combined = combine(&d, &w, &s, &geometry(), &DesignSettings::default()).unwrap();
        assert_eq!(combined.design_line_load_kn_m, 0.0);
        assert_eq!(combined.forces, SpanForces::default());
    }

    #[test]
    fn test_negative_width_rejected() {
        let (d, w, s) = loads(0.2, 1.0, 1.0);
        let g = GeometryParameters { array_width_m: -1.0, ..geometry() };
        let err = combine(&d, &w, &s, &g, &DesignSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_combine_is_repeatable() {
        let (d, w, s) = loads(0.17, 0.61, 0.33);
        let g = GeometryParameters { tilt_deg: 27.0, ..geometry() };
        let a = combine(&d, &w, &s, &g, &DesignSettings::default()).unwrap();
        let b = combine(&d, &w, &s, &g, &DesignSettings::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.design_line_load_kn_m.to_bits(), b.design_line_load_kn_m.to_bits());
    }
}
