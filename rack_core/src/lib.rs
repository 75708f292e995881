//! # rack_core - PV Mounting Rack Calculation Engine
//!
//! `rack_core` computes GB 50009-2012 loads on ground- and roof-mounted PV
//! racks and picks the lightest steel profile that carries them. All inputs
//! and outputs are JSON-serializable, so a report can be stored, diffed or
//! handed to another tool without a bespoke format.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit tables**: Code data is a [`tables::CodeTables`] value passed in, never a hidden global
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use rack_core::{design_rack, CodeTables, DesignSettings, RackDesignInput};
//!
//! let input: RackDesignInput = serde_json::from_str(r#"{
//!     "site": { "region": "shanghai", "terrain": "B", "height_m": 3.0 },
//!     "geometry": {
//!         "tilt_deg": 20.0,
//!         "roof_type": "MonoSlope",
//!         "array_width_m": 2.0,
//!         "row_length_m": 12.0,
//!         "mounting_height_m": 2.0,
//!         "support_span_m": 2.0
//!     },
//!     "rack_count": 6
//! }"#).unwrap();
//!
//! let tables = CodeTables::builtin().unwrap();
//! let report = design_rack(&input, tables, &DesignSettings::default()).unwrap();
//! println!("Main beam: {}", report.selection_result.profile.label);
//! ```
//!
//! ## Modules
//!
//! - [`tables`] - Code tables: regions, exposure, shape coefficients, profiles
//! - [`params`] - Site, geometry and panel inputs
//! - [`loads`] - Wind, snow and dead loads plus combinations
//! - [`calculations`] - Member selection, quantities, full rack design
//! - [`settings`] - Thresholds and estimating allowances
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod loads;
pub mod params;
pub mod settings;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{design_rack, RackDesignInput, RackDesignReport};
pub use errors::{CalcError, CalcResult};
pub use params::{GeometryParameters, PanelParameters, SiteParameters};
pub use settings::DesignSettings;
pub use tables::CodeTables;
