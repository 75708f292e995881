//! # Code Tables
//!
//! Static reference data for GB 50009-2012 load calculation and steel
//! profile selection, bundled into one immutable [`CodeTables`] value.
//!
//! The tables are an explicit value, passed by reference into every
//! calculation. Substitute tables (for testing, or a project-specific
//! catalog) are built with [`CodeTables::from_toml_str`] or by editing a
//! clone of the bundled set and calling [`CodeTables::validated`].
//!
//! ## Contents
//!
//! - [`regions`] - basic wind/snow pressure by region (Appendix E)
//! - [`exposure`] - terrain categories, μz and βgz profiles (§8.2, §8.6)
//! - [`shape`] - wind shape μs and snow distribution μr curves (§8.3, §7.2)
//! - [`profiles`] - steel grade and section catalog
//! - [`piecewise`] - the tabulated-curve evaluator shared by all curves
//!
//! ## Example
//!
//! ```rust
//! use rack_core::tables::{CodeTables, TerrainCategory};
//!
//! let tables = CodeTables::gb50009_2012().unwrap();
//! let beijing = tables.region("beijing").unwrap();
//! assert_eq!(beijing.wind_kpa, 0.45);
//!
//! let b = tables.exposure(TerrainCategory::B).unwrap();
//! assert_eq!(b.mu_z(3.0), 1.0);
//! ```

pub mod exposure;
pub mod piecewise;
pub mod profiles;
pub mod regions;
pub mod shape;

pub use exposure::{gb50009_exposure, ExposureProfile, GustModel, TerrainCategory};
pub use piecewise::PiecewiseLinear;
pub use profiles::{gb50009_sections, ProfileCatalog, ProfileRecord, SectionKind, SectionSpec, SteelGrade};
pub use regions::{gb50009_regions, RegionPressure};
pub use shape::{gb50009_snow_distribution, gb50009_wind_shape, RoofType, WindShapeCurve};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Default main-beam deflection limit, δ ≤ L/250
pub const DEFAULT_DEFLECTION_LIMIT_RATIO: f64 = 250.0;

static BUILTIN: Lazy<CalcResult<CodeTables>> = Lazy::new(CodeTables::gb50009_2012);

/// Serialized form of [`CodeTables`] (the table file layout).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CodeTablesFile {
    edition: String,
    deflection_limit_ratio: f64,
    snow_distribution: PiecewiseLinear,
    #[serde(default)]
    gust: GustModel,
    steel: SteelGrade,
    regions: Vec<RegionPressure>,
    exposure: Vec<ExposureProfile>,
    wind_shape: Vec<WindShapeCurve>,
    sections: Vec<SectionSpec>,
}

/// All static reference data the engine reads.
///
/// Construct once, then share by reference. There is no interior mutability;
/// a `CodeTables` value is `Send + Sync` and never changes after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CodeTablesFile", into = "CodeTablesFile")]
pub struct CodeTables {
    /// Code edition these tables transcribe (e.g., "GB 50009-2012")
    pub edition: String,
    pub gust: GustModel,
    pub deflection_limit_ratio: f64,
    pub steel: SteelGrade,
    pub snow_distribution: PiecewiseLinear,
    pub regions: Vec<RegionPressure>,
    pub exposure: Vec<ExposureProfile>,
    pub wind_shape: Vec<WindShapeCurve>,
    pub sections: Vec<SectionSpec>,
    /// Derived from `sections` + `steel` on validation
    #[serde(skip)]
    profiles: ProfileCatalog,
}

impl CodeTables {
    /// The bundled GB 50009-2012 tables
    pub fn gb50009_2012() -> CalcResult<Self> {
        CodeTables {
            edition: "GB 50009-2012".to_string(),
            gust: GustModel::default(),
            deflection_limit_ratio: DEFAULT_DEFLECTION_LIMIT_RATIO,
            steel: SteelGrade::q235b(),
            snow_distribution: gb50009_snow_distribution(),
            regions: gb50009_regions(),
            exposure: gb50009_exposure(),
            wind_shape: gb50009_wind_shape(),
            sections: gb50009_sections(),
            profiles: ProfileCatalog::default(),
        }
        .validated()
    }

    /// Shared instance of the bundled tables, built on first use.
    pub fn builtin() -> CalcResult<&'static CodeTables> {
        (*BUILTIN).as_ref().map_err(Clone::clone)
    }

    /// Parse substitute tables from TOML
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Render the tables as TOML (the same layout `from_toml_str` reads)
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Validate every table and rebuild the derived profile catalog.
    pub fn validated(mut self) -> CalcResult<Self> {
        regions::validate_regions(&self.regions)?;
        exposure::validate_exposure(&self.exposure, &self.gust)?;
        shape::validate_wind_shape(&self.wind_shape)?;
        shape::validate_snow_distribution(&self.snow_distribution)?;
        self.profiles = ProfileCatalog::from_specs(&self.sections, &self.steel, self.deflection_limit_ratio)?;
        debug!(
            edition = %self.edition,
            regions = self.regions.len(),
            profiles = self.profiles.len(),
            "code tables validated"
        );
        Ok(self)
    }

    /// Look up a region by id or local name
    pub fn region(&self, key: &str) -> CalcResult<&RegionPressure> {
        regions::find_region(&self.regions, key)
    }

    /// Exposure profile for a terrain category
    pub fn exposure(&self, terrain: TerrainCategory) -> CalcResult<&ExposureProfile> {
        self.exposure
            .iter()
            .find(|p| p.terrain == terrain)
            .ok_or_else(|| CalcError::table_error("exposure", format!("no profile for terrain {}", terrain)))
    }

    /// Wind shape curve for a roof type
    pub fn wind_shape(&self, roof_type: RoofType) -> CalcResult<&PiecewiseLinear> {
        self.wind_shape
            .iter()
            .find(|c| c.roof_type == roof_type)
            .map(|c| &c.mu_s)
            .ok_or_else(|| CalcError::table_error("wind_shape", format!("no curve for {}", roof_type)))
    }

    /// Profile catalog, sorted by ascending weight
    pub fn profiles(&self) -> &ProfileCatalog {
        &self.profiles
    }
}

impl TryFrom<CodeTablesFile> for CodeTables {
    type Error = CalcError;

    fn try_from(file: CodeTablesFile) -> CalcResult<Self> {
        CodeTables {
            edition: file.edition,
            gust: file.gust,
            deflection_limit_ratio: file.deflection_limit_ratio,
            steel: file.steel,
            snow_distribution: file.snow_distribution,
            regions: file.regions,
            exposure: file.exposure,
            wind_shape: file.wind_shape,
            sections: file.sections,
            profiles: ProfileCatalog::default(),
        }
        .validated()
    }
}

impl From<CodeTables> for CodeTablesFile {
    fn from(tables: CodeTables) -> Self {
        CodeTablesFile {
            edition: tables.edition,
            gust: tables.gust,
            deflection_limit_ratio: tables.deflection_limit_ratio,
            steel: tables.steel,
            snow_distribution: tables.snow_distribution,
            regions: tables.regions,
            exposure: tables.exposure,
            wind_shape: tables.wind_shape,
            sections: tables.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_build() {
        let tables = CodeTables::gb50009_2012().unwrap();
        assert_eq!(tables.profiles().len(), 8);
        assert_eq!(tables.regions.len(), 7);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = CodeTables::builtin().unwrap();
        let b = CodeTables::builtin().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_toml_roundtrip() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let text = tables.to_toml_string().unwrap();
        assert!(text.contains("GB 50009-2012"));
        let parsed = CodeTables::from_toml_str(&text).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_substitute_tables_validated() {
        let mut tables = CodeTables::gb50009_2012().unwrap();
        tables.sections.clear();
        tables.regions.clear();
        let err = tables.validated().unwrap_err();
        assert_eq!(err.error_code(), "TABLE_ERROR");
    }

    #[test]
    fn test_substitute_catalog() {
        let mut tables = CodeTables::gb50009_2012().unwrap();
        tables.sections.retain(|s| s.kind == SectionKind::SquareTube);
        let tables = tables.validated().unwrap();
        assert_eq!(tables.profiles().len(), 4);
        assert!(tables.profiles().iter().all(|p| p.kind == SectionKind::SquareTube));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CodeTables::from_toml_str("edition = 3").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
