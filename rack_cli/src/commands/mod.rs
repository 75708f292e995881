pub mod design;
pub mod tables;

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Print to stdout, or write to `output` when given.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
