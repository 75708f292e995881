//! # Input Parameters
//!
//! Immutable inputs of a calculation run. Created by the caller (usually
//! deserialized from a project file) and only read by the engine.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "site": { "region": "beijing", "terrain": "B", "height_m": 3.0 },
//!   "geometry": {
//!     "tilt_deg": 25.0,
//!     "roof_type": "MonoSlope",
//!     "array_width_m": 2.0,
//!     "row_length_m": 10.0,
//!     "mounting_height_m": 3.0,
//!     "support_span_m": 2.5
//!   },
//!   "panel": { "length_m": 1.7, "width_m": 1.0, "mass_kg": 20.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_at_least, CalcError, CalcResult};
use crate::tables::{CodeTables, RoofType, TerrainCategory};
use crate::units::{Degrees, Radians};

/// Site parameters: where the rack stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    /// Region id or local name, looked up in the code tables
    pub region: String,

    /// Ground roughness category
    #[serde(default)]
    pub terrain: TerrainCategory,

    /// Structure height above ground used for wind exposure (m)
    pub height_m: f64,

    /// Basic wind pressure zone value overriding the region's w0 (kPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_wind_pressure_kpa: Option<f64>,

    /// Basic snow pressure zone value overriding the region's s0 (kPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_snow_pressure_kpa: Option<f64>,
}

impl SiteParameters {
    pub fn new(region: impl Into<String>, terrain: TerrainCategory, height_m: f64) -> Self {
        SiteParameters {
            region: region.into(),
            terrain,
            height_m,
            basic_wind_pressure_kpa: None,
            basic_snow_pressure_kpa: None,
        }
    }

    /// Override the basic wind pressure w0 (builder pattern)
    pub fn with_wind_pressure(mut self, w0_kpa: f64) -> Self {
        self.basic_wind_pressure_kpa = Some(w0_kpa);
        self
    }

    /// Override the basic snow pressure s0 (builder pattern)
    pub fn with_snow_pressure(mut self, s0_kpa: f64) -> Self {
        self.basic_snow_pressure_kpa = Some(s0_kpa);
        self
    }

    /// Basic wind pressure w0 (kPa).
    ///
    /// The region must exist in the tables even when w0 is overridden.
    pub fn basic_wind_pressure(&self, tables: &CodeTables) -> CalcResult<f64> {
        let region = tables.region(&self.region)?;
        match self.basic_wind_pressure_kpa {
            Some(w0) => {
                ensure_at_least("basic_wind_pressure_kpa", w0, 0.0, false)?;
                Ok(w0)
            }
            None => Ok(region.wind_kpa),
        }
    }

    /// Basic snow pressure s0 (kPa), same lookup rules as wind
    pub fn basic_snow_pressure(&self, tables: &CodeTables) -> CalcResult<f64> {
        let region = tables.region(&self.region)?;
        match self.basic_snow_pressure_kpa {
            Some(s0) => {
                ensure_at_least("basic_snow_pressure_kpa", s0, 0.0, false)?;
                Ok(s0)
            }
            None => Ok(region.snow_kpa),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.region.trim().is_empty() {
            return Err(CalcError::invalid_input("region", "", "Region cannot be empty"));
        }
        ensure_at_least("height_m", self.height_m, 0.0, true)
    }
}

fn default_beams_per_rack() -> u32 {
    2
}

/// Rack geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryParameters {
    /// Panel tilt from horizontal (degrees, 0-90)
    pub tilt_deg: f64,

    /// Array form, selects the wind shape curve
    #[serde(default)]
    pub roof_type: RoofType,

    /// Slope length of the panel array, the tributary width of one main beam (m)
    pub array_width_m: f64,

    /// Length of one rack row (m)
    pub row_length_m: f64,

    /// Height of the panel support above its base (m)
    pub mounting_height_m: f64,

    /// Span of the main beam between supports (m)
    pub support_span_m: f64,

    /// Main beams (rails) per rack
    #[serde(default = "default_beams_per_rack")]
    pub beams_per_rack: u32,
}

impl GeometryParameters {
    pub fn tilt(&self) -> Degrees {
        Degrees(self.tilt_deg)
    }

    pub fn tilt_radians(&self) -> Radians {
        self.tilt().to_radians()
    }

    /// Supports (columns) along one row: ceil(row length / span)
    pub fn supports_per_rack(&self) -> u32 {
        if self.support_span_m <= 0.0 || self.row_length_m <= 0.0 {
            return 0;
        }
        (self.row_length_m / self.support_span_m).ceil() as u32
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_at_least("tilt_deg", self.tilt_deg, 0.0, false)?;
        if self.tilt_deg > 90.0 {
            return Err(CalcError::invalid_input(
                "tilt_deg",
                self.tilt_deg.to_string(),
                "Tilt must be between 0 and 90 degrees",
            ));
        }
        ensure_at_least("array_width_m", self.array_width_m, 0.0, false)?;
        ensure_at_least("row_length_m", self.row_length_m, 0.0, false)?;
        ensure_at_least("mounting_height_m", self.mounting_height_m, 0.0, false)?;
        ensure_at_least("support_span_m", self.support_span_m, 0.0, false)
    }
}

/// PV module data, source of the dead load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelParameters {
    /// Module length (m)
    pub length_m: f64,

    /// Module width (m)
    pub width_m: f64,

    /// Module mass (kg)
    pub mass_kg: f64,
}

impl Default for PanelParameters {
    fn default() -> Self {
        PanelParameters {
            length_m: 1.7,
            width_m: 1.0,
            mass_kg: 20.0,
        }
    }
}

impl PanelParameters {
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_at_least("panel.length_m", self.length_m, 0.0, true)?;
        ensure_at_least("panel.width_m", self.width_m, 0.0, true)?;
        ensure_at_least("panel.mass_kg", self.mass_kg, 0.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GeometryParameters {
        GeometryParameters {
            tilt_deg: 25.0,
            roof_type: RoofType::MonoSlope,
            array_width_m: 2.0,
            row_length_m: 10.0,
            mounting_height_m: 3.0,
            support_span_m: 2.5,
            beams_per_rack: 2,
        }
    }

    #[test]
    fn test_override_still_requires_region() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let site = SiteParameters::new("Atlantis", TerrainCategory::B, 3.0).with_wind_pressure(0.35);
        assert_eq!(site.basic_wind_pressure(&tables).unwrap_err().error_code(), "UNKNOWN_REGION");
    }

    #[test]
    fn test_override_replaces_region_value() {
        let tables = CodeTables::gb50009_2012().unwrap();
        let site = SiteParameters::new("beijing", TerrainCategory::B, 3.0).with_wind_pressure(0.35);
        assert_eq!(site.basic_wind_pressure(&tables).unwrap(), 0.35);
        assert_eq!(site.basic_snow_pressure(&tables).unwrap(), 0.40);
    }

    #[test]
    fn test_supports_per_rack() {
        let g = geometry();
        assert_eq!(g.supports_per_rack(), 4);
        assert_eq!(GeometryParameters { support_span_m: 0.0, ..g }.supports_per_rack(), 0);
    }

    #[test]
    fn test_geometry_validation() {
        assert!(geometry().validate().is_ok());
        assert!(GeometryParameters { tilt_deg: 95.0, ..geometry() }.validate().is_err());
        assert!(GeometryParameters { support_span_m: -1.0, ..geometry() }.validate().is_err());
    }

    #[test]
    fn test_site_validation() {
        assert!(SiteParameters::new("beijing", TerrainCategory::B, 0.0).validate().is_err());
        assert!(SiteParameters::new("", TerrainCategory::B, 3.0).validate().is_err());
    }

    #[test]
    fn test_site_json_defaults() {
        let site: SiteParameters = serde_json::from_str(r#"{ "region": "lhasa", "height_m": 4.0 }"#).unwrap();
        assert_eq!(site.terrain, TerrainCategory::B);
        assert_eq!(site.basic_wind_pressure_kpa, None);
    }
}
