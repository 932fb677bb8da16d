//! Output formatting: JSON, compact JSON, YAML.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render any serializable value in the format selected by `--output`.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        // serde_yaml ends every document with a newline; print_output adds its own
        OutputFormat::Yaml => serde_yaml::to_string(data)?.trim_end().to_owned(),
    })
}

/// Print rendered output to stdout. Empty output prints nothing.
pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
