use crate::cli::{DesignArgs, OutputFormat};
use crate::config::DesignJob;
use crate::error::Result;
use crate::report;
use rack_core::design_rack;
use tracing::info;

pub fn run(args: &DesignArgs) -> Result<()> {
    let job = DesignJob::from_args(args)?;
    info!(
        "Designing '{}' ({} racks, region {}, tables {})",
        job.input.label, job.input.rack_count, job.input.site.region, job.tables.edition
    );

    let report = design_rack(&job.input, &job.tables, &job.settings)?;

    let text = match args.format {
        OutputFormat::Text => report::render_text(&report)?,
        OutputFormat::Json => {
            let mut json = report::render_json(&report)?;
            json.push('\n');
            json
        }
    };
    super::emit(&text, args.output.as_deref())
}
