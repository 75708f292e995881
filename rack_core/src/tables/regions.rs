//! Basic wind and snow pressures by region (GB 50009-2012 Appendix E).
//!
//! The bundled map is a simplified extract for common project locations,
//! 50-year return period. Lookup accepts either the ASCII id
//! (case-insensitive) or the Chinese city name.

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_at_least, CalcError, CalcResult};

/// Basic pressures for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPressure {
    /// Lookup id (e.g., "beijing")
    pub id: String,

    /// Local name (e.g., "北京")
    #[serde(default)]
    pub name: String,

    /// Basic wind pressure w0 (kPa)
    pub wind_kpa: f64,

    /// Basic snow pressure s0 (kPa)
    pub snow_kpa: f64,
}

impl RegionPressure {
    pub fn new(id: &str, name: &str, wind_kpa: f64, snow_kpa: f64) -> Self {
        RegionPressure {
            id: id.to_string(),
            name: name.to_string(),
            wind_kpa,
            snow_kpa,
        }
    }

    /// Whether `key` names this region
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.id.eq_ignore_ascii_case(key) || (!self.name.is_empty() && self.name == key)
    }
}

/// The bundled region map
pub fn gb50009_regions() -> Vec<RegionPressure> {
    vec![
        RegionPressure::new("beijing", "北京", 0.45, 0.40),
        RegionPressure::new("shanghai", "上海", 0.55, 0.20),
        RegionPressure::new("guangzhou", "广州", 0.50, 0.00),
        RegionPressure::new("harbin", "哈尔滨", 0.55, 0.45),
        RegionPressure::new("urumqi", "乌鲁木齐", 0.60, 0.80),
        RegionPressure::new("lhasa", "拉萨", 0.30, 0.15),
        // Generic fallback zone. Only used when requested by name.
        RegionPressure::new("default", "默认", 0.40, 0.35),
    ]
}

/// Find a region by id or local name.
pub fn find_region<'a>(regions: &'a [RegionPressure], key: &str) -> CalcResult<&'a RegionPressure> {
    regions
        .iter()
        .find(|r| r.matches(key))
        .ok_or_else(|| CalcError::unknown_region(key))
}

pub(crate) fn validate_regions(regions: &[RegionPressure]) -> CalcResult<()> {
    if regions.is_empty() {
        return Err(CalcError::table_error("regions", "no regions defined"));
    }
    for (i, region) in regions.iter().enumerate() {
        if region.id.trim().is_empty() {
            return Err(CalcError::table_error("regions", format!("entry {} has an empty id", i)));
        }
        ensure_at_least(&format!("regions.{}.wind_kpa", region.id), region.wind_kpa, 0.0, false)?;
        ensure_at_least(&format!("regions.{}.snow_kpa", region.id), region.snow_kpa, 0.0, false)?;
        if regions[..i].iter().any(|r| r.id.eq_ignore_ascii_case(&region.id)) {
            return Err(CalcError::table_error(
                "regions",
                format!("duplicate region id '{}'", region.id),
            ));
        }
    }
    Ok(())
}
