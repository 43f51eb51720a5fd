//! Reading pasted text and plan documents, writing JSON results.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use tabplan_core::table::split_lines;
use tabplan_core::{Period, PlanDocument};

/// Read input text from `file`, or from stdin when `file` is `None` or `-`.
pub fn read_text(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read input from stdin")?;
            Ok(text)
        }
    }
}

/// Fail with the user-facing "no table data" message unless `text` has a
/// header line and at least one data line.
pub fn require_table_data(text: &str) -> Result<()> {
    if split_lines(text).len() < 2 {
        bail!("no table data found: expected a header line and at least one data line");
    }
    Ok(())
}

/// Load the plan document to import into, or an empty one for `period`.
pub fn load_plan(path: Option<&Path>, period: Period) -> Result<PlanDocument> {
    let Some(path) = path else {
        return Ok(PlanDocument::empty(period));
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file: {}", path.display()))?;
    PlanDocument::from_json_str(period, &contents)
        .with_context(|| format!("failed to load plan file: {}", path.display()))
}

/// Serialize `value` as JSON to `output`, or stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, pretty: bool, output: Option<&Path>) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    json.push('\n');

    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
