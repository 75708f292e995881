use crate::cli::TablesArgs;
use crate::error::Result;
use rack_core::CodeTables;

pub fn run(args: &TablesArgs) -> Result<()> {
    let tables = CodeTables::gb50009_2012()?;
    let text = tables.to_toml_string()?;
    super::emit(&text, args.output.as_deref())
}
