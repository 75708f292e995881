//! Steel Profile Catalog
//!
//! Cold-formed C-channels and square hollow tubes commonly used for PV rack
//! beams and posts, with the section properties the selector needs.
//!
//! ## Data Source
//!
//! Section rows give nominal dimensions (mm), gross area A (cm²) and strong
//! axis moment of inertia Ix (cm⁴) as listed in the steel handbook. Derived
//! properties are computed on catalog construction:
//!
//! - elastic section modulus Wx = Ix / (h/2), unless the row overrides it
//! - mass per metre = A · ρ
//! - allowable stress f = fy / γ from the steel grade
//!
//! ## Ordering
//!
//! [`ProfileCatalog`] keeps its records sorted by ascending mass per metre
//! (stable, so equal masses keep table order). A front-to-back scan therefore
//! visits the lightest sections first, and the order never depends on map
//! iteration.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::tables::{gb50009_sections, ProfileCatalog, SteelGrade};
//!
//! let catalog = ProfileCatalog::from_specs(&gb50009_sections(), &SteelGrade::q235b(), 250.0).unwrap();
//! let lightest = catalog.iter().next().unwrap();
//! assert_eq!(lightest.label, "C80x40x15x2.0");
//! assert!((lightest.mass_kg_per_m - 3.3284).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_at_least, CalcError, CalcResult};
use crate::units::{Cm2, Cm3, Cm4, Kpa, Mpa, M2, M3, M4};

/// Cross-section family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Lipped cold-formed channel (C型钢)
    CChannel,
    /// Square hollow section (方管)
    SquareTube,
}

impl SectionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKind::CChannel => "C-channel",
            SectionKind::SquareTube => "Square tube",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Steel material grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelGrade {
    /// Grade designation (e.g., "Q235B")
    pub name: String,

    /// Yield strength fy (MPa)
    pub yield_strength_mpa: f64,

    /// Material safety factor γ applied to fy
    pub safety_factor: f64,

    /// Modulus of elasticity E (MPa)
    pub elastic_modulus_mpa: f64,

    /// Density ρ (kg/m³)
    pub density_kg_m3: f64,
}

impl SteelGrade {
    /// Q235B structural steel
    pub fn q235b() -> Self {
        SteelGrade {
            name: "Q235B".to_string(),
            yield_strength_mpa: 235.0,
            safety_factor: 1.5,
            elastic_modulus_mpa: 206_000.0,
            density_kg_m3: 7850.0,
        }
    }

    /// Allowable stress fy / γ (MPa)
    pub fn allowable_stress_mpa(&self) -> f64 {
        self.yield_strength_mpa / self.safety_factor
    }

    fn validate(&self) -> CalcResult<()> {
        ensure_at_least("steel.yield_strength_mpa", self.yield_strength_mpa, 0.0, true)?;
        ensure_at_least("steel.safety_factor", self.safety_factor, 0.0, true)?;
        ensure_at_least("steel.elastic_modulus_mpa", self.elastic_modulus_mpa, 0.0, true)?;
        ensure_at_least("steel.density_kg_m3", self.density_kg_m3, 0.0, true)
    }
}

/// One row of the section table, as written in the handbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub label: String,
    pub kind: SectionKind,
    /// Overall depth h (mm)
    pub depth_mm: f64,
    /// Flange width / tube side b (mm)
    pub width_mm: f64,
    /// Lip length for C-channels (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lip_mm: Option<f64>,
    /// Wall thickness t (mm)
    pub thickness_mm: f64,
    /// Gross area A (cm²)
    pub area_cm2: f64,
    /// Strong-axis moment of inertia Ix (cm⁴)
    pub ix_cm4: f64,
    /// Section modulus override Wx (cm³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wx_cm3: Option<f64>,
}

impl SectionSpec {
    fn c_channel(label: &str, h: f64, b: f64, lip: f64, t: f64, area_cm2: f64, ix_cm4: f64) -> Self {
        SectionSpec {
            label: label.to_string(),
            kind: SectionKind::CChannel,
            depth_mm: h,
            width_mm: b,
            lip_mm: Some(lip),
            thickness_mm: t,
            area_cm2,
            ix_cm4,
            wx_cm3: None,
        }
    }

    fn square_tube(label: &str, b: f64, t: f64, area_cm2: f64, ix_cm4: f64) -> Self {
        SectionSpec {
            label: label.to_string(),
            kind: SectionKind::SquareTube,
            depth_mm: b,
            width_mm: b,
            lip_mm: None,
            thickness_mm: t,
            area_cm2,
            ix_cm4,
            wx_cm3: None,
        }
    }

    fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::table_error("sections", "section with empty label"));
        }
        let field = |name: &str| format!("sections.{}.{}", self.label, name);
        ensure_at_least(&field("depth_mm"), self.depth_mm, 0.0, true)?;
        ensure_at_least(&field("width_mm"), self.width_mm, 0.0, true)?;
        ensure_at_least(&field("thickness_mm"), self.thickness_mm, 0.0, true)?;
        ensure_at_least(&field("area_cm2"), self.area_cm2, 0.0, true)?;
        ensure_at_least(&field("ix_cm4"), self.ix_cm4, 0.0, true)?;
        if let Some(wx) = self.wx_cm3 {
            ensure_at_least(&field("wx_cm3"), wx, 0.0, true)?;
        }
        Ok(())
    }
}

/// A catalog profile with everything the checks need.
///
/// Read-only reference data: the engine never mutates a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Section designation (e.g., "C100x50x20x2.5")
    pub label: String,

    pub kind: SectionKind,

    /// Gross area A (cm²)
    pub area_cm2: f64,

    /// Moment of inertia Ix (cm⁴)
    pub ix_cm4: f64,

    /// Elastic section modulus Wx (cm³)
    pub wx_cm3: f64,

    /// Self-weight (kg/m)
    pub mass_kg_per_m: f64,

    /// Allowable stress f (MPa)
    pub allowable_stress_mpa: f64,

    /// Modulus of elasticity E (MPa)
    pub elastic_modulus_mpa: f64,

    /// Deflection limit as span ratio n in δ ≤ L/n
    pub deflection_limit_ratio: f64,
}

impl ProfileRecord {
    /// Build a record from a table row and a steel grade
    pub fn from_spec(spec: &SectionSpec, steel: &SteelGrade, deflection_limit_ratio: f64) -> Self {
        let area: M2 = Cm2(spec.area_cm2).into();
        // Ix / (h/2) with Ix in cm⁴ and h in mm (h/2 in cm = h/20)
        let wx_cm3 = spec.wx_cm3.unwrap_or(spec.ix_cm4 / (spec.depth_mm / 20.0));
        ProfileRecord {
            label: spec.label.clone(),
            kind: spec.kind,
            area_cm2: spec.area_cm2,
            ix_cm4: spec.ix_cm4,
            wx_cm3,
            mass_kg_per_m: area.0 * steel.density_kg_m3,
            allowable_stress_mpa: steel.allowable_stress_mpa(),
            elastic_modulus_mpa: steel.elastic_modulus_mpa,
            deflection_limit_ratio,
        }
    }

    pub fn area_m2(&self) -> M2 {
        Cm2(self.area_cm2).into()
    }

    pub fn moment_of_inertia_m4(&self) -> M4 {
        Cm4(self.ix_cm4).into()
    }

    pub fn section_modulus_m3(&self) -> M3 {
        Cm3(self.wx_cm3).into()
    }

    pub fn allowable_stress_kpa(&self) -> Kpa {
        Mpa(self.allowable_stress_mpa).into()
    }

    pub fn elastic_modulus_kpa(&self) -> Kpa {
        Mpa(self.elastic_modulus_mpa).into()
    }

    /// Moment capacity W·f (kN·m)
    pub fn moment_capacity_knm(&self) -> f64 {
        self.section_modulus_m3().0 * self.allowable_stress_kpa().0
    }

    /// Axial capacity A·f (kN)
    pub fn axial_capacity_kn(&self) -> f64 {
        self.area_m2().0 * self.allowable_stress_kpa().0
    }

    fn validate(&self) -> CalcResult<()> {
        let field = |name: &str| format!("profiles.{}.{}", self.label, name);
        ensure_at_least(&field("area_cm2"), self.area_cm2, 0.0, true)?;
        ensure_at_least(&field("ix_cm4"), self.ix_cm4, 0.0, true)?;
        ensure_at_least(&field("wx_cm3"), self.wx_cm3, 0.0, true)?;
        ensure_at_least(&field("mass_kg_per_m"), self.mass_kg_per_m, 0.0, true)?;
        ensure_at_least(&field("allowable_stress_mpa"), self.allowable_stress_mpa, 0.0, true)?;
        ensure_at_least(&field("elastic_modulus_mpa"), self.elastic_modulus_mpa, 0.0, true)?;
        ensure_at_least(&field("deflection_limit_ratio"), self.deflection_limit_ratio, 0.0, true)
    }
}

impl std::fmt::Display for ProfileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, A={:.2} cm², Ix={:.2} cm⁴, Wx={:.2} cm³, {:.2} kg/m)",
            self.label, self.kind, self.area_cm2, self.ix_cm4, self.wx_cm3, self.mass_kg_per_m
        )
    }
}

/// Immutable profile catalog, sorted by ascending self-weight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProfileRecord>", into = "Vec<ProfileRecord>")]
pub struct ProfileCatalog {
    records: Vec<ProfileRecord>,
}

impl ProfileCatalog {
    /// Build a catalog from records, validating and sorting them by weight.
    pub fn new(mut records: Vec<ProfileRecord>) -> CalcResult<Self> {
        for (i, record) in records.iter().enumerate() {
            record.validate()?;
            if records[..i].iter().any(|r| r.label == record.label) {
                return Err(CalcError::table_error(
                    "profiles",
                    format!("duplicate profile label '{}'", record.label),
                ));
            }
        }
        // masses are validated finite, so total_cmp agrees with numeric order
        records.sort_by(|a, b| a.mass_kg_per_m.total_cmp(&b.mass_kg_per_m));
        Ok(ProfileCatalog { records })
    }

    /// Build a catalog from handbook rows and a steel grade
    pub fn from_specs(specs: &[SectionSpec], steel: &SteelGrade, deflection_limit_ratio: f64) -> CalcResult<Self> {
        steel.validate()?;
        ensure_at_least("deflection_limit_ratio", deflection_limit_ratio, 0.0, true)?;
        for spec in specs {
            spec.validate()?;
        }
        let records = specs
            .iter()
            .map(|spec| ProfileRecord::from_spec(spec, steel, deflection_limit_ratio))
            .collect();
        ProfileCatalog::new(records)
    }

    /// Records in ascending weight order
    pub fn iter(&self) -> impl Iterator<Item = &ProfileRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a profile by label
    pub fn get(&self, label: &str) -> Option<&ProfileRecord> {
        self.records.iter().find(|r| r.label.eq_ignore_ascii_case(label))
    }

    /// Position of a profile in weight order (0 = lightest)
    pub fn weight_rank(&self, label: &str) -> Option<usize> {
        self.records.iter().position(|r| r.label == label)
    }
}

impl TryFrom<Vec<ProfileRecord>> for ProfileCatalog {
    type Error = CalcError;

    fn try_from(records: Vec<ProfileRecord>) -> CalcResult<Self> {
        ProfileCatalog::new(records)
    }
}

impl From<ProfileCatalog> for Vec<ProfileRecord> {
    fn from(catalog: ProfileCatalog) -> Self {
        catalog.records
    }
}

/// Bundled section table
pub fn gb50009_sections() -> Vec<SectionSpec> {
    vec![
        // C-channels: h x b x lip x t
        SectionSpec::c_channel("C80x40x15x2.0", 80.0, 40.0, 15.0, 2.0, 4.24, 43.92),
        SectionSpec::c_channel("C100x50x20x2.5", 100.0, 50.0, 20.0, 2.5, 6.78, 112.12),
        SectionSpec::c_channel("C120x50x20x2.5", 120.0, 50.0, 20.0, 2.5, 7.18, 198.60),
        SectionSpec::c_channel("C140x50x20x3.0", 140.0, 50.0, 20.0, 3.0, 8.64, 322.55),
        // Square tubes: b x b x t
        SectionSpec::square_tube("□60x60x2.5", 60.0, 2.5, 5.67, 34.45),
        SectionSpec::square_tube("□80x80x3.0", 80.0, 3.0, 8.76, 73.49),
        SectionSpec::square_tube("□100x100x3.5", 100.0, 3.5, 13.20, 178.08),
        SectionSpec::square_tube("□120x120x4.0", 120.0, 4.0, 18.18, 346.36),
    ]
}
