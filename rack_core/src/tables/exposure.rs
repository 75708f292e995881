//! Terrain exposure: height-variation coefficient μz and gust factor βgz.
//!
//! GB 50009-2012 §8.2.1 tabulates μz against height for four terrain
//! roughness categories. The table is generated by a power law
//!
//! ```text
//! μz  = k · (z/10)^(2α)
//! βgz = 1 + 2·g·I10 · (z/10)^(−α)          (§8.6.1, g = 2.5)
//! ```
//!
//! with `z` clamped to `[floor_height_m, gradient_height_m]`. Below the floor
//! height the code holds the coefficient constant; above the gradient height
//! the wind is no longer affected by the ground.
//!
//! | Category | k     | 2α   | α    | I10  | floor | gradient |
//! |----------|-------|------|------|------|-------|----------|
//! | A        | 1.284 | 0.24 | 0.12 | 0.12 | 5 m   | 300 m    |
//! | B        | 1.000 | 0.30 | 0.15 | 0.14 | 10 m  | 350 m    |
//! | C        | 0.544 | 0.44 | 0.22 | 0.23 | 15 m  | 450 m    |
//! | D        | 0.262 | 0.60 | 0.30 | 0.39 | 30 m  | 550 m    |

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_at_least, CalcError, CalcResult};

/// Peak factor g in the gust-factor formula
pub const PEAK_FACTOR: f64 = 2.5;

/// Ground roughness category per GB 50009-2012 §8.2.1
///
/// # Example
/// ```
/// use rack_core::tables::TerrainCategory;
///
/// assert_eq!(TerrainCategory::B.code(), "B");
/// assert_eq!(TerrainCategory::default(), TerrainCategory::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainCategory {
    /// A - near-sea surfaces, islands, coasts, lake shores, deserts
    A,
    /// B - open country, villages, forests, low-rise suburbs
    #[default]
    B,
    /// C - urban areas with dense buildings
    C,
    /// D - urban areas with dense and tall buildings
    D,
}

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 4] = [
        TerrainCategory::A,
        TerrainCategory::B,
        TerrainCategory::C,
        TerrainCategory::D,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TerrainCategory::A => "A",
            TerrainCategory::B => "B",
            TerrainCategory::C => "C",
            TerrainCategory::D => "D",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TerrainCategory::A => "Coast, islands, lake shores, desert",
            TerrainCategory::B => "Open country, villages, forests, low-rise suburbs",
            TerrainCategory::C => "Urban area with dense buildings",
            TerrainCategory::D => "Urban area with dense, tall buildings",
        }
    }
}

impl std::fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Power-law exposure profile for one terrain category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    pub terrain: TerrainCategory,

    /// Coefficient k in μz = k·(z/10)^(2α)
    pub k: f64,

    /// Ground roughness exponent α
    pub alpha: f64,

    /// Turbulence intensity at 10 m, I10
    pub turbulence_10m: f64,

    /// Height below which coefficients are held constant (m)
    pub floor_height_m: f64,

    /// Gradient wind height (m)
    pub gradient_height_m: f64,
}

impl ExposureProfile {
    /// Height clamped into the tabulated range
    pub fn effective_height(&self, height_m: f64) -> f64 {
        height_m.clamp(self.floor_height_m, self.gradient_height_m)
    }

    /// Height-variation coefficient μz at `height_m`
    pub fn mu_z(&self, height_m: f64) -> f64 {
        let z = self.effective_height(height_m);
        self.k * (z / 10.0).powf(2.0 * self.alpha)
    }

    /// Gust factor βgz at `height_m`
    pub fn beta_gz(&self, height_m: f64) -> f64 {
        let z = self.effective_height(height_m);
        1.0 + 2.0 * PEAK_FACTOR * self.turbulence_10m * (z / 10.0).powf(-self.alpha)
    }

    fn validate(&self) -> CalcResult<()> {
        let field = |name: &str| format!("exposure.{}.{}", self.terrain, name);
        ensure_at_least(&field("k"), self.k, 0.0, true)?;
        ensure_at_least(&field("alpha"), self.alpha, 0.0, true)?;
        ensure_at_least(&field("turbulence_10m"), self.turbulence_10m, 0.0, false)?;
        ensure_at_least(&field("floor_height_m"), self.floor_height_m, 0.0, true)?;
        if self.gradient_height_m < self.floor_height_m {
            return Err(CalcError::table_error(
                "exposure",
                format!("terrain {}: gradient height below floor height", self.terrain),
            ));
        }
        Ok(())
    }
}

/// How the gust-response factor βgz is obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", content = "value")]
pub enum GustModel {
    /// Fixed factor independent of height and terrain
    Constant(f64),
    /// Code formula βgz = 1 + 2·g·I10·(z/10)^(−α)
    HeightDependent,
}

impl Default for GustModel {
    fn default() -> Self {
        GustModel::Constant(1.0)
    }
}

impl GustModel {
    pub fn beta_gz(&self, profile: &ExposureProfile, height_m: f64) -> f64 {
        match self {
            GustModel::Constant(beta) => *beta,
            GustModel::HeightDependent => profile.beta_gz(height_m),
        }
    }
}

/// The four bundled exposure profiles
pub fn gb50009_exposure() -> Vec<ExposureProfile> {
    let p = |terrain, k, alpha, turbulence_10m, floor_height_m, gradient_height_m| ExposureProfile {
        terrain,
        k,
        alpha,
        turbulence_10m,
        floor_height_m,
        gradient_height_m,
    };
    vec![
        p(TerrainCategory::A, 1.284, 0.12, 0.12, 5.0, 300.0),
        p(TerrainCategory::B, 1.000, 0.15, 0.14, 10.0, 350.0),
        p(TerrainCategory::C, 0.544, 0.22, 0.23, 15.0, 450.0),
        p(TerrainCategory::D, 0.262, 0.30, 0.39, 30.0, 550.0),
    ]
}

pub(crate) fn validate_exposure(profiles: &[ExposureProfile], gust: &GustModel) -> CalcResult<()> {
    for terrain in TerrainCategory::ALL {
        let count = profiles.iter().filter(|p| p.terrain == terrain).count();
        if count != 1 {
            return Err(CalcError::table_error(
                "exposure",
                format!("expected exactly one profile for terrain {}, found {}", terrain, count),
            ));
        }
    }
    for profile in profiles {
        profile.validate()?;
    }
    if let GustModel::Constant(beta) = gust {
        ensure_at_least("gust.value", *beta, 0.0, true)?;
    }
    Ok(())
}
