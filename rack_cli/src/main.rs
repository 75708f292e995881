//! # Solrack CLI
//!
//! Command-line front end for `rack_core`: reads a rack input file, runs the
//! GB 50009-2012 design and prints a calculation sheet or a JSON report.
//!
//! ```text
//! rack_cli design demos/beijing.toml
//! rack_cli design demos/beijing.toml --format json --safety-threshold 0.9
//! rack_cli tables --output my_tables.toml
//! rack_cli design site.toml --tables my_tables.toml -vv
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod report;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    let json_errors = matches!(&cli.command, Commands::Design(args) if args.format == OutputFormat::Json);

    if let Err(e) = run_app(cli) {
        error!("Command failed: {}", e);
        if json_errors {
            println!("{}", report::render_error_json(&e));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("Solrack CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match &cli.command {
        Commands::Design(args) => {
            info!("Dispatching to 'design' command.");
            commands::design::run(args)
        }
        Commands::Tables(args) => {
            info!("Dispatching to 'tables' command.");
            commands::tables::run(args)
        }
    }
}
