//! Tabular-text ingestion and lesson-plan reconciliation.
//!
//! Pasted delimited text flows strictly forward through the pipeline:
//!
//! 1. [`table`] detects the delimiter and tokenizes lines into a
//!    [`ParsedTable`] (or a positional [`ParsedMatrix`] for raw review).
//! 2. [`headers`] repairs headers split by upstream extraction and tags each
//!    header with a [`FieldTag`].
//! 3. [`reconcile`] merges the rows into a [`PlanDocument`] for one
//!    [`Period`], either updating label-matched records or synthesizing new
//!    ones.
//!
//! [`import`] composes the whole pipeline for callers.

pub mod error;
pub mod headers;
pub mod import;
pub mod reconcile;
pub mod schema;
pub mod table;

pub use error::PlanDocumentError;
pub use headers::{FieldTag, HeaderMap, MergedHeaders, classify_header, merge_split_headers};
pub use import::{ImportOutcome, PreparedTable, import_text, prepare_table, preview_matrix};
pub use reconcile::{ReconcileMode, ReconcileReport, SEMANTIC_DENSITY_THRESHOLD, reconcile};
pub use schema::{
    DailyPlan, MonthlyPlan, MonthlyRow, Period, PeriodPlan, PlanDocument, PlanRecord, Stage,
    WeeklyPlan, WeeklyRow, YearlyPlan, YearlyRow,
};
pub use table::{Delimiter, ParsedMatrix, ParsedTable, TableRow, parse_matrix, parse_table};
