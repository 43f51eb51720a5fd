//! End-to-end import: raw text in, reconciled plan document out.

use serde::Serialize;
use tracing::instrument;

use crate::headers::{HeaderMap, MergedHeaders, merge_split_headers};
use crate::reconcile::{ReconcileReport, reconcile};
use crate::schema::PlanDocument;
use crate::table::{ParsedMatrix, ParsedTable, parse_matrix, parse_table};

/// Result of [`import_text`].
///
/// Serializes as `{"matched": bool, "data": <document>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    /// Existing records were updated by label rather than replaced.
    pub matched: bool,
    pub data: PlanDocument,
    #[serde(skip)]
    pub report: ReconcileReport,
}

impl ImportOutcome {
    /// True when the import replaced the records with nothing usable.
    ///
    /// Callers should then show [`preview_matrix`] for manual column
    /// selection instead of saving `data`.
    pub fn needs_raw_preview(&self) -> bool {
        !self.matched && self.data.is_blank()
    }
}

/// Every intermediate stage of the text pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedTable {
    /// The table as tokenized.
    pub raw: ParsedTable,
    /// The table after split-header repair. Reconciliation reads this one.
    pub merged: MergedHeaders,
    /// Tags for `merged.table.headers`.
    pub headers: HeaderMap,
}

impl PreparedTable {
    /// The repaired table that classification and reconciliation use.
    pub fn table(&self) -> &ParsedTable {
        &self.merged.table
    }
}

/// Tokenize, repair and classify `text`.
pub fn prepare_table(text: &str) -> PreparedTable {
    let raw = parse_table(text);
    let merged = merge_split_headers(&raw);
    let headers = HeaderMap::build(&merged.table.headers);
    PreparedTable {
        raw,
        merged,
        headers,
    }
}

/// Import pasted `text` into `document`.
///
/// The document is taken by value and handed back in the outcome. When
/// records are matched by label, the returned document is the same one with
/// those records updated and all others untouched. Otherwise its record
/// sequence is replaced and its other top-level fields are kept. Callers that
/// still need the pre-import document must clone it first.
#[instrument(level = "info", skip(text, document), fields(len = text.len(), period = %document.period()))]
pub fn import_text(text: &str, mut document: PlanDocument) -> ImportOutcome {
    let prepared = prepare_table(text);
    let report = reconcile(&mut document, prepared.table(), &prepared.headers);
    ImportOutcome {
        matched: report.matched(),
        data: document,
        report,
    }
}

/// Positional view of `text` for manual review.
pub fn preview_matrix(text: &str) -> ParsedMatrix {
    parse_matrix(text)
}
