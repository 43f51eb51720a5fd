//! Merging parsed rows into a plan document.
//!
//! Two modes, tried in order:
//!
//! - **Label match**: when some header is tagged [`FieldTag::Label`], each
//!   parsed row is matched case-insensitively against the existing records'
//!   label field. Matched records are updated in place with the row's other
//!   tagged values; every other record is left exactly as it was.
//! - **Synthesis**: when there is no label header, or no row matched, a new
//!   record sequence is built and replaces the old one. Records come from
//!   header meaning when enough headers are tagged (see
//!   [`SEMANTIC_DENSITY_THRESHOLD`]), otherwise from cell position.
//!
//! The document is borrowed mutably for the whole call, so in-place updates
//! are visible to the caller and no other reference can observe a partial
//! update.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::headers::{FieldTag, HeaderMap};
use crate::schema::{Period, PlanDocument, PlanRecord};
use crate::table::ParsedTable;

/// Minimum share of headers that must carry a tag before synthesized records
/// are built from header meaning instead of cell position.
///
/// Below this, the "headers" are most likely the first line of ad hoc text.
pub const SEMANTIC_DENSITY_THRESHOLD: f64 = 1.0 / 3.0;

/// How the records of a reconciled document were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReconcileMode {
    /// Existing records were updated by label.
    LabelMatch,
    /// New records were built from tagged headers.
    Semantic,
    /// New records were built from cell order.
    Positional,
}

/// Summary of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub period: Period,
    pub mode: ReconcileMode,
    /// Parsed rows that matched an existing record (label mode only).
    pub matched_rows: usize,
    /// Records in the document afterwards.
    pub record_count: usize,
}

impl ReconcileReport {
    /// Whether existing records were updated rather than replaced.
    pub fn matched(&self) -> bool {
        self.mode == ReconcileMode::LabelMatch
    }
}

/// Reconcile `table` into `document`.
///
/// `headers` must classify `table.headers` column for column.
pub fn reconcile(
    document: &mut PlanDocument,
    table: &ParsedTable,
    headers: &HeaderMap,
) -> ReconcileReport {
    let period = document.period();
    let (mode, matched_rows, record_count) = match document {
        PlanDocument::Daily(plan) => reconcile_records(&mut plan.stages, table, headers),
        PlanDocument::Weekly(plan) => reconcile_records(&mut plan.rows, table, headers),
        PlanDocument::Monthly(plan) => reconcile_records(&mut plan.rows, table, headers),
        PlanDocument::Yearly(plan) => reconcile_records(&mut plan.rows, table, headers),
    };

    info!(
        %period,
        ?mode,
        matched_rows,
        record_count,
        "reconciled parsed table"
    );
    ReconcileReport {
        period,
        mode,
        matched_rows,
        record_count,
    }
}

fn reconcile_records<R: PlanRecord>(
    records: &mut Vec<R>,
    table: &ParsedTable,
    headers: &HeaderMap,
) -> (ReconcileMode, usize, usize) {
    if let Some(label_column) = headers.label_column() {
        let matched = apply_label_matches(records, table, headers, label_column);
        if matched > 0 {
            return (ReconcileMode::LabelMatch, matched, records.len());
        }
        debug!("label header present but no record matched, synthesizing");
    }

    let (mode, fresh) = synthesize(table, headers);
    *records = fresh;
    (mode, 0, records.len())
}

/// Update records whose label matches a row's label cell. Returns the number
/// of parsed rows that found a match.
fn apply_label_matches<R: PlanRecord>(
    records: &mut [R],
    table: &ParsedTable,
    headers: &HeaderMap,
    label_column: usize,
) -> usize {
    // Later records win on duplicate labels.
    let index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| label_key(record.label()).map(|key| (key, i)))
        .collect();

    let mut matched = 0;
    for row in &table.rows {
        let Some(&target) = label_key(row.cell(label_column)).and_then(|key| index.get(&key))
        else {
            continue;
        };

        let record = &mut records[target];
        for (column, tag) in headers.tagged_columns() {
            if tag != FieldTag::Label {
                record.set_tagged(tag, row.cell(column));
            }
        }
        matched += 1;
    }
    matched
}

fn label_key(label: &str) -> Option<String> {
    let trimmed = label.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn synthesize<R: PlanRecord>(table: &ParsedTable, headers: &HeaderMap) -> (ReconcileMode, Vec<R>) {
    let semantic = !headers.is_empty() && headers.density() >= SEMANTIC_DENSITY_THRESHOLD;
    debug!(
        density = headers.density(),
        semantic, "choosing synthesis strategy"
    );

    if semantic {
        let records = table
            .rows
            .iter()
            .map(|row| {
                let mut record = R::default();
                for (column, tag) in headers.tagged_columns() {
                    record.set_tagged(tag, row.cell(column));
                }
                record
            })
            .collect();
        (ReconcileMode::Semantic, records)
    } else {
        let records = table
            .rows
            .iter()
            .map(|row| {
                let values: Vec<&str> = row
                    .cells()
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.trim().is_empty())
                    .collect();
                R::from_positional(&values)
            })
            .collect();
        (ReconcileMode::Positional, records)
    }
}
