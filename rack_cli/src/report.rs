use crate::error::{CliError, Result};
use chrono::{DateTime, Utc};
use rack_core::RackDesignReport;
use serde::Serialize;
use std::fmt::Write as _;

/// JSON output wrapper: who produced the report and when.
#[derive(Serialize, Debug)]
pub struct ReportEnvelope<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub report: &'a RackDesignReport,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(report: &'a RackDesignReport) -> Self {
        ReportEnvelope {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            report,
        }
    }
}

/// JSON form of a failed run, printed with `--format json`.
#[derive(Serialize, Debug)]
pub struct ErrorEnvelope {
    pub error_code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<rack_core::CalcError>,
}

impl From<&CliError> for ErrorEnvelope {
    fn from(error: &CliError) -> Self {
        ErrorEnvelope {
            error_code: error.error_code(),
            message: error.to_string(),
            details: match error {
                CliError::Core(e) => Some(e.clone()),
                _ => None,
            },
        }
    }
}

pub fn render_json(report: &RackDesignReport) -> Result<String> {
    serde_json::to_string_pretty(&ReportEnvelope::new(report)).map_err(|e| CliError::Other(e.into()))
}

pub fn render_error_json(error: &CliError) -> String {
    serde_json::to_string_pretty(&ErrorEnvelope::from(error))
        .unwrap_or_else(|_| format!("{{\"error_code\":\"{}\"}}", error.error_code()))
}

fn pass_fail(passes: bool) -> &'static str {
    if passes {
        "✓ PASS"
    } else {
        "✗ FAIL"
    }
}

/// Plain-text calculation sheet.
pub fn render_text(report: &RackDesignReport) -> Result<String> {
    let mut out = String::new();
    write_sheet(&mut out, report).map_err(|e| CliError::Other(e.into()))?;
    Ok(out)
}

fn write_sheet(out: &mut String, r: &RackDesignReport) -> std::fmt::Result {
    let rule = "═══════════════════════════════════════";
    writeln!(out, "{}", rule)?;
    writeln!(out, "  PV RACK DESIGN: {}", r.label)?;
    writeln!(out, "  {}", r.code_edition)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    writeln!(out, "Loads (characteristic):")?;
    writeln!(out, "  {}", r.wind_load.equation())?;
    writeln!(out, "  {}", r.snow_load.equation())?;
    writeln!(out, "  gk = {:.4} kPa (panels {:.4} kPa + {:.0}% racking)", r.dead_load.gk_kpa, r.dead_load.panel_kpa, r.dead_load.support_allowance * 100.0)?;
    writeln!(out)?;

    let c = &r.combined_load;
    writeln!(out, "Line loads on main beam (kN/m):")?;
    writeln!(out, "  D = {:.3}   W = {:.3}   S = {:.3}", c.line_loads.dead, c.line_loads.wind, c.line_loads.snow)?;
    for combo in &c.design {
        let marker = if combo.name == c.governing_combination { " ◄" } else { "" };
        writeln!(out, "  {:<6} {:<24} {:>8.3}{}", combo.name, combo.equation, combo.line_load_kn_m, marker)?;
    }
    writeln!(out, "  Service:  {} = {:.3}", c.service_combination, c.service_line_load_kn_m)?;
    writeln!(out, "  Minimum:  {} = {:.3}{}", c.uplift_combination, c.min_line_load_kn_m, if c.has_uplift() { "  (net uplift)" } else { "" })?;
    writeln!(out)?;

    writeln!(out, "Demand (span {:.2} m):", c.span_m)?;
    writeln!(out, "  M = {:.3} kN·m", c.forces.moment_knm)?;
    writeln!(out, "  V = {:.3} kN", c.forces.shear_kn)?;
    writeln!(out, "  N = {:.3} kN", c.forces.axial_kn)?;
    writeln!(out)?;

    let s = &r.selection_result;
    writeln!(out, "Main beam: {}", s.profile)?;
    writeln!(out, "  Strength:   {:.3} {}", s.strength_utilization, pass_fail(s.strength_utilization <= s.threshold))?;
    writeln!(out, "  Deflection: {:.3} {} ({:.2} mm / {:.2} mm)", s.deflection_utilization, pass_fail(s.deflection_utilization <= s.threshold), s.deflection_mm, s.allowable_deflection_mm)?;
    writeln!(out, "  Governs:    {} (limit {:.2})", s.governing_condition(), s.threshold)?;
    writeln!(out)?;

    let col = &r.column_selection;
    writeln!(out, "Column: {}", col.profile)?;
    writeln!(out, "  Axial:      {:.3} {} ({:.2} kN / {:.2} kN)", col.axial_utilization, pass_fail(col.passes), col.axial_kn, col.capacity_kn)?;
    writeln!(out)?;

    let q = &r.quantity_result;
    let b = &r.bill_of_materials;
    writeln!(out, "Quantities ({} racks):", q.rack_count)?;
    writeln!(out, "  Beams:       {:>5} × {:.2} m  {:>10.1} m  {:>10.1} kg", b.beams.pieces, b.beams.piece_length_m, b.beams.total_length_m, b.beams.total_mass_kg)?;
    writeln!(out, "  Columns:     {:>5} × {:.2} m  {:>10.1} m  {:>10.1} kg", b.columns.pieces, b.columns.piece_length_m, b.columns.total_length_m, b.columns.total_mass_kg)?;
    writeln!(out, "  Connections: {:>41.1} kg", b.connection_mass_kg)?;
    writeln!(out, "  Total steel: {:>41.1} kg", b.total_mass_kg)?;
    writeln!(out)?;

    writeln!(out, "{}", rule)?;
    writeln!(out, "  RESULT: {}", if r.passes() { "✓ DESIGN ADEQUATE" } else { "✗ DESIGN INADEQUATE" })?;
    writeln!(out, "{}", rule)?;
    Ok(())
}
