//! # Unit Types
//!
//! Type-safe wrappers for the units that cross table boundaries. Code tables
//! are written in the units the steel handbooks use (cm², cm³, cm⁴, MPa,
//! degrees); the formulas work in base SI (m, kN, kPa, radians). These
//! newtypes make each conversion explicit at the point it happens.
//!
//! ## Units in use
//!
//! - Length: metres (m); section dimensions in millimetres (mm)
//! - Force: kilonewtons (kN)
//! - Pressure / stress: kilopascals (kPa = kN/m²), megapascals (MPa)
//! - Distributed load: kN/m
//! - Moment: kN·m
//! - Section properties: cm², cm³, cm⁴ in tables, m², m³, m⁴ in formulas
//!
//! ## Example
//!
//! ```rust
//! use rack_core::units::{Cm4, M4, Mpa, Kpa, Degrees};
//!
//! let ix: M4 = Cm4(112.12).into();
//! assert!((ix.0 - 112.12e-8).abs() < 1e-15);
//!
//! let f: Kpa = Mpa(156.7).into();
//! assert!((f.0 - 156_700.0).abs() < 1e-9);
//!
//! let tilt = Degrees(60.0);
//! assert!((tilt.to_radians().cos() - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl Degrees {
    /// Convert to radians
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl Radians {
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

// ============================================================================
// Stress / Pressure
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mpa(pub f64);

/// Pressure or stress in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kpa(pub f64);

impl From<Mpa> for Kpa {
    fn from(mpa: Mpa) -> Self {
        Kpa(mpa.0 * 1000.0)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Area in square centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm2(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct M2(pub f64);

/// Section modulus in cm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm3(pub f64);

/// Section modulus in m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct M3(pub f64);

/// Moment of inertia in cm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm4(pub f64);

/// Moment of inertia in m⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct M4(pub f64);

impl From<Cm2> for M2 {
    fn from(a: Cm2) -> Self {
        M2(a.0 * 1e-4)
    }
}

impl From<Cm3> for M3 {
    fn from(w: Cm3) -> Self {
        M3(w.0 * 1e-6)
    }
}

impl From<Cm4> for M4 {
    fn from(i: Cm4) -> Self {
        M4(i.0 * 1e-8)
    }
}

// ============================================================================
// Mass / Force
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl Kilograms {
    /// Weight under gravitational acceleration `g` (m/s²)
    pub fn weight(self, g: f64) -> Kilonewtons {
        Kilonewtons(self.0 * g / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_conversions() {
        let a: M2 = Cm2(4.24).into();
        assert!((a.0 - 4.24e-4).abs() < 1e-15);

        let w: M3 = Cm3(500.0).into();
        assert!((w.0 - 0.0005).abs() < 1e-15);
    }

    #[test]
    fn test_stress_conversion() {
        let kpa: Kpa = Mpa(235.0).into();
        assert_eq!(kpa.0, 235_000.0);
    }

    #[test]
    fn test_weight() {
        // 20 kg panel under g = 9.8
        let w = Kilograms(20.0).weight(9.8);
        assert!((w.0 - 0.196).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let tilt = Degrees(25.0);
        let json = serde_json::to_string(&tilt).unwrap();
        assert_eq!(json, "25.0");

        let roundtrip: Degrees = serde_json::from_str(&json).unwrap();
        assert_eq!(tilt, roundtrip);
    }
}
