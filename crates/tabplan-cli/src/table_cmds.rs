//! Handlers for the inspection subcommands.
//!
//! Implements:
//! - `tabplan parse [file]`    -- tokenized and repaired table as JSON
//! - `tabplan classify [file]` -- header tags and synthesis strategy
//! - `tabplan preview [file]`  -- positional matrix for manual review

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use tabplan_core::{SEMANTIC_DENSITY_THRESHOLD, prepare_table, preview_matrix};

use crate::io::{read_text, require_table_data, write_json};

// -----------------------------------------------------------------------
// tabplan parse
// -----------------------------------------------------------------------

pub fn run_parse(file: Option<&Path>, pretty: bool) -> Result<()> {
    let text = read_text(file)?;
    require_table_data(&text)?;

    let prepared = prepare_table(&text);
    let table = prepared.table();
    let merges: Vec<_> = prepared
        .merged
        .merges
        .iter()
        .map(|m| json!({"first": m.first, "second": m.second, "label": m.label}))
        .collect();

    let report = json!({
        "delimiter": table.delimiter,
        "headers": prepared.raw.headers,
        "mergedHeaders": table.headers,
        "merges": merges,
        "records": table.records(),
        "unterminatedQuoteLines": table.unterminated_quote_lines,
    });
    write_json(&report, pretty, None)
}

// -----------------------------------------------------------------------
// tabplan classify
// -----------------------------------------------------------------------

pub fn run_classify(file: Option<&Path>, pretty: bool) -> Result<()> {
    let text = read_text(file)?;
    require_table_data(&text)?;

    let prepared = prepare_table(&text);
    let headers: Vec<_> = prepared
        .table()
        .headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            json!({
                "column": column,
                "header": header,
                "tag": prepared.headers.tag(column),
            })
        })
        .collect();

    let map = &prepared.headers;
    let report = json!({
        "headers": headers,
        "hasLabel": map.has_label(),
        "taggedCount": map.tagged_count(),
        "density": map.density(),
        "semantic": !map.is_empty() && map.density() >= SEMANTIC_DENSITY_THRESHOLD,
    });
    write_json(&report, pretty, None)
}

// -----------------------------------------------------------------------
// tabplan preview
// -----------------------------------------------------------------------

pub fn run_preview(file: Option<&Path>, pretty: bool) -> Result<()> {
    let text = read_text(file)?;
    let matrix = preview_matrix(&text);
    if matrix.is_empty() {
        anyhow::bail!("no table data found: input is empty");
    }
    write_json(&matrix, pretty, None)
}
