//! Shape coefficients: wind μs and snow distribution μr against tilt angle.

use serde::{Deserialize, Serialize};

use super::piecewise::PiecewiseLinear;
use crate::errors::{CalcError, CalcResult};

/// Roof/array form, selecting the wind shape-coefficient curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoofType {
    /// Single-slope array (单坡)
    MonoSlope,
    /// Double-slope / back-to-back array (双坡)
    DuoSlope,
    /// Flat-roof mounting (平顶)
    #[default]
    Flat,
}

impl RoofType {
    pub const ALL: [RoofType; 3] = [RoofType::MonoSlope, RoofType::DuoSlope, RoofType::Flat];

    pub fn display_name(&self) -> &'static str {
        match self {
            RoofType::MonoSlope => "Mono-slope",
            RoofType::DuoSlope => "Duo-slope",
            RoofType::Flat => "Flat",
        }
    }
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// μs as a function of tilt (degrees) for one roof type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindShapeCurve {
    pub roof_type: RoofType,
    pub mu_s: PiecewiseLinear,
}

/// Bundled μs curves (simplified from GB 50009-2012 Table 8.3.1).
///
/// Plateau values above 30° are the full-exposure coefficients for each
/// roof form; flatter arrays ramp down toward the low-slope value.
pub fn gb50009_wind_shape() -> Vec<WindShapeCurve> {
    let ramp = |points: Vec<(f64, f64)>| PiecewiseLinear { points };
    let curve = |roof_type, mu_s| WindShapeCurve { roof_type, mu_s };
    vec![
        curve(RoofType::MonoSlope, ramp(vec![(0.0, 0.8), (30.0, 1.3)])),
        curve(RoofType::DuoSlope, ramp(vec![(0.0, 0.6), (30.0, 0.9)])),
        curve(RoofType::Flat, PiecewiseLinear::constant(1.0)),
    ]
}

/// Bundled μr curve, GB 50009-2012 Table 7.2.1 item 1 (single-slope roof)
pub fn gb50009_snow_distribution() -> PiecewiseLinear {
    PiecewiseLinear {
        points: vec![
            (25.0, 1.0),
            (30.0, 0.85),
            (35.0, 0.70),
            (40.0, 0.55),
            (45.0, 0.40),
            (50.0, 0.25),
            (55.0, 0.0),
        ],
    }
}

pub(crate) fn validate_wind_shape(curves: &[WindShapeCurve]) -> CalcResult<()> {
    for roof_type in RoofType::ALL {
        let count = curves.iter().filter(|c| c.roof_type == roof_type).count();
        if count != 1 {
            return Err(CalcError::table_error(
                "wind_shape",
                format!("expected exactly one curve for {}, found {}", roof_type, count),
            ));
        }
    }
    if curves.iter().any(|c| c.mu_s.min_value() < 0.0) {
        return Err(CalcError::table_error(
            "wind_shape",
            "shape coefficients are magnitudes and cannot be negative",
        ));
    }
    Ok(())
}

pub(crate) fn validate_snow_distribution(curve: &PiecewiseLinear) -> CalcResult<()> {
    if curve.min_value() < 0.0 {
        return Err(CalcError::table_error(
            "snow_distribution",
            "distribution coefficients cannot be negative",
        ));
    }
    Ok(())
}
