//! Handler for `tabplan import`.
//!
//! Runs the full pipeline against a plan document and prints
//! `{"matched": bool, "data": <plan>}`. When nothing was matched and every
//! produced record is blank, the document is not written; the raw matrix is
//! printed instead so a person can choose columns by hand.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use tabplan_core::{Period, import_text, preview_matrix};

use crate::io::{load_plan, read_text, require_table_data, write_json};

/// What `tabplan import` ended up printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The reconciled document was written.
    Written,
    /// The import produced only blank records; the raw matrix was printed.
    RawPreview,
}

#[derive(Debug)]
pub struct ImportArgs<'a> {
    pub input: Option<&'a Path>,
    pub plan: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub period: Period,
    pub pretty: bool,
}

pub fn run_import(args: &ImportArgs<'_>) -> Result<ImportStatus> {
    let text = read_text(args.input)?;
    require_table_data(&text)?;
    let document = load_plan(args.plan, args.period)?;

    let outcome = import_text(&text, document);
    info!(
        period = %args.period,
        matched = outcome.matched,
        mode = ?outcome.report.mode,
        records = outcome.report.record_count,
        "import finished"
    );

    if outcome.needs_raw_preview() {
        eprintln!(
            "No usable {} plan content could be recognised; showing the raw table instead.",
            args.period
        );
        write_json(&preview_matrix(&text), args.pretty, None)?;
        return Ok(ImportStatus::RawPreview);
    }

    write_json(&outcome, args.pretty, args.output)?;
    Ok(ImportStatus::Written)
}
