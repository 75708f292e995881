use crate::cli::DesignArgs;
use crate::error::{CliError, Result};
use rack_core::params::{GeometryParameters, PanelParameters, SiteParameters};
use rack_core::tables::GustModel;
use rack_core::{CodeTables, DesignSettings, RackDesignInput};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// On-disk layout of a rack input file.
///
/// ```toml
/// label = "Row A"
/// rack_count = 8
///
/// [site]
/// region = "beijing"
/// terrain = "B"
/// height_m = 3.0
///
/// [geometry]
/// tilt_deg = 25.0
/// ...
///
/// [settings]
/// safety_threshold = 0.9
/// ```
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct InputFile {
    label: Option<String>,
    rack_count: i64,
    site: SiteParameters,
    geometry: GeometryParameters,
    #[serde(default)]
    panel: PanelParameters,
    #[serde(default)]
    settings: DesignSettings,
}

/// A fully resolved design job: input, settings and tables.
#[derive(Debug)]
pub struct DesignJob {
    pub input: RackDesignInput,
    pub settings: DesignSettings,
    pub tables: CodeTables,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_input(path: &Path, text: &str) -> Result<InputFile> {
    if is_json(path) {
        serde_json::from_str(text).map_err(|e| CliError::parsing(path, e))
    } else {
        toml::from_str(text).map_err(|e| CliError::parsing(path, e))
    }
}

/// Read and parse a rack input file (TOML, or JSON by extension).
fn load_input(path: &Path) -> Result<InputFile> {
    debug!("Reading rack input from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_input(path, &text)
}

/// Bundled tables, or substitute tables from a TOML file.
pub fn load_tables(path: Option<&Path>) -> Result<CodeTables> {
    match path {
        None => Ok(CodeTables::gb50009_2012()?),
        Some(path) => {
            info!("Loading substitute code tables from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            CodeTables::from_toml_str(&text).map_err(|e| CliError::parsing(path, e))
        }
    }
}

impl DesignJob {
    /// Merge the input file, command-line overrides and tables.
    pub fn from_args(args: &DesignArgs) -> Result<Self> {
        let file = load_input(&args.input)?;
        let mut tables = load_tables(args.tables.as_deref())?;

        let mut settings = file.settings;
        if let Some(threshold) = args.safety_threshold {
            settings.safety_threshold = threshold;
        }
        settings
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if args.gust_by_height {
            tables.gust = GustModel::HeightDependent;
        }

        let rack_count = args.rack_count.unwrap_or(file.rack_count);
        if rack_count < 0 {
            return Err(CliError::Argument(format!(
                "rack count must not be negative (got {})",
                rack_count
            )));
        }

        let label = file.label.unwrap_or_else(|| {
            args.input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Rack")
                .to_string()
        });

        Ok(DesignJob {
            input: RackDesignInput {
                label,
                site: file.site,
                geometry: file.geometry,
                panel: file.panel,
                rack_count,
            },
            settings,
            tables,
        })
    }
}
