//! Piecewise-linear curves over tabulated breakpoints.
//!
//! Every coefficient that the load code tabulates against an angle (wind
//! shape coefficient μs, snow distribution coefficient μr) is evaluated
//! through [`PiecewiseLinear`], so the behaviour at and beyond the table
//! edges is a single code path:
//!
//! - `x` at or below the first breakpoint returns the first value
//! - `x` at or above the last breakpoint returns the last value
//! - between breakpoints the value is linearly interpolated
//!
//! ```rust
//! use rack_core::tables::PiecewiseLinear;
//!
//! let mu_r = PiecewiseLinear::new(vec![(25.0, 1.0), (50.0, 0.0)]).unwrap();
//! assert_eq!(mu_r.eval(10.0), 1.0);
//! assert!((mu_r.eval(37.5) - 0.5).abs() < 1e-12);
//! assert_eq!(mu_r.eval(70.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A curve defined by `(x, y)` breakpoints with strictly ascending `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct PiecewiseLinear {
    pub(super) points: Vec<(f64, f64)>,
}

impl PiecewiseLinear {
    /// Build a curve, rejecting empty, non-finite or unsorted breakpoints.
    pub fn new(points: Vec<(f64, f64)>) -> CalcResult<Self> {
        if points.is_empty() {
            return Err(CalcError::table_error("piecewise", "curve has no breakpoints"));
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(CalcError::table_error("piecewise", "breakpoints must be finite"));
        }
        if points.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(CalcError::table_error(
                "piecewise",
                "breakpoints must be strictly ascending in x",
            ));
        }
        Ok(PiecewiseLinear { points })
    }

    /// A curve that returns `value` everywhere.
    pub fn constant(value: f64) -> Self {
        PiecewiseLinear {
            points: vec![(0.0, value)],
        }
    }

    /// Evaluate the curve at `x`, clamping outside the breakpoint range.
    pub fn eval(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        // first.0 < x < last.0, so a bracketing segment exists
        let i = self.points.partition_point(|(px, _)| *px <= x);
        let (x0, y0) = self.points[i - 1];
        let (x1, y1) = self.points[i];
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// Smallest tabulated value
    pub fn min_value(&self) -> f64 {
        self.points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<Vec<(f64, f64)>> for PiecewiseLinear {
    type Error = CalcError;

    fn try_from(points: Vec<(f64, f64)>) -> CalcResult<Self> {
        PiecewiseLinear::new(points)
    }
}

impl From<PiecewiseLinear> for Vec<(f64, f64)> {
    fn from(curve: PiecewiseLinear) -> Self {
        curve.points
    }
}
