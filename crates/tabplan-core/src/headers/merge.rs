//! Repair of headers split across two columns by upstream text extraction.
//!
//! Some extractors emit a header such as `Focus:` as two adjacent columns,
//! `Focus` and `:`. The stray punctuation column is folded back into the
//! header before it. The value of the folded column is taken from the
//! second of the two original cells.

use tracing::debug;

use crate::table::{ParsedTable, TableRow};

/// One pair of columns folded into a single header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMerge {
    /// Column index of the leading header in the original table.
    pub first: usize,
    /// Column index of the artifact column; its cells become the values.
    pub second: usize,
    /// The combined header label.
    pub label: String,
}

/// A table with split headers repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedHeaders {
    pub table: ParsedTable,
    pub merges: Vec<HeaderMerge>,
}

/// Whether `header` is a stray punctuation fragment rather than a label.
///
/// Matches empty text, anything starting with `:`, and text made only of
/// `:`, `,` and `-`.
pub fn is_header_artifact(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty()
        || trimmed.starts_with(':')
        || trimmed.chars().all(|c| matches!(c, ':' | ',' | '-'))
}

/// Fold every header followed by an artifact column into one column.
///
/// Pairs are consumed left to right; a merged pair is never merged again.
/// The input table is left untouched.
pub fn merge_split_headers(table: &ParsedTable) -> MergedHeaders {
    let headers = &table.headers;
    let mut labels = Vec::with_capacity(headers.len());
    let mut sources = Vec::with_capacity(headers.len());
    let mut merges = Vec::new();

    let mut i = 0;
    while i < headers.len() {
        match headers.get(i + 1) {
            Some(next) if is_header_artifact(next) => {
                let label = format!("{} {}", headers[i], next).trim().to_owned();
                debug!(first = i, second = i + 1, %label, "merging split header");
                merges.push(HeaderMerge {
                    first: i,
                    second: i + 1,
                    label: label.clone(),
                });
                labels.push(label);
                sources.push(i + 1);
                i += 2;
            }
            _ => {
                labels.push(headers[i].clone());
                sources.push(i);
                i += 1;
            }
        }
    }

    let rows = table
        .rows
        .iter()
        .map(|row| TableRow::new(sources.iter().map(|&c| row.cell(c).to_owned()).collect()))
        .collect();

    MergedHeaders {
        table: ParsedTable {
            headers: labels,
            rows,
            delimiter: table.delimiter,
            unterminated_quote_lines: table.unterminated_quote_lines.clone(),
        },
        merges,
    }
}
