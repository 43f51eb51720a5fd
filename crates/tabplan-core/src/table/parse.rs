//! Label-keyed table construction.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use super::delimiter::{Delimiter, detect_delimiter};
use super::tokenizer::tokenize_line;

/// One data row, with exactly one cell per header.
///
/// Cells missing from a short row are empty strings; cells beyond the header
/// count are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    /// Wrap `cells` as-is.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Pad or truncate `cells` to `width` columns.
    pub fn aligned(mut cells: Vec<String>, width: usize) -> Self {
        cells.resize(width, String::new());
        Self { cells }
    }

    /// Cell values in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// The cell at `column`, or `""` when out of range.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Headers plus rows parsed from pasted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Header labels in column order. Not required to be unique.
    pub headers: Vec<String>,
    /// Data rows, each aligned to `headers`.
    pub rows: Vec<TableRow>,
    /// Delimiter the text was split on; `None` for an empty table.
    pub delimiter: Option<Delimiter>,
    /// 1-based positions (among non-blank lines) of lines that ended inside
    /// an open quote.
    pub unterminated_quote_lines: Vec<usize>,
}

impl ParsedTable {
    /// True when no header or row was produced.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Index of the column labelled `label`.
    ///
    /// With duplicate labels the last column wins, matching mapping
    /// semantics where a later key overwrites an earlier one.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().rposition(|h| h == label)
    }

    /// Value of the `label` column in `row`, or `""` if there is no such column.
    pub fn value<'a>(&self, row: &'a TableRow, label: &str) -> &'a str {
        self.column_index(label)
            .map(|column| row.cell(column))
            .unwrap_or("")
    }

    /// Rows as header-keyed maps, for display and serialization.
    pub fn records(&self) -> Vec<BTreeMap<&str, &str>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .enumerate()
                    .map(|(column, header)| (header.as_str(), row.cell(column)))
                    .collect()
            })
            .collect()
    }
}

/// Non-blank lines of `text`, accepting both LF and CRLF endings.
///
/// Lines are not trimmed: a leading tab is a meaningful empty first cell.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Parse `text` into a header row and label-keyed data rows.
///
/// Text with fewer than two non-blank lines carries no table data and
/// yields an empty table rather than an error.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_table(text: &str) -> ParsedTable {
    let lines = split_lines(text);
    if lines.len() < 2 {
        debug!(lines = lines.len(), "not enough lines for a table");
        return ParsedTable::default();
    }

    let delimiter = detect_delimiter(text);
    let mut unterminated_quote_lines = Vec::new();
    let mut fields_of = |position: usize, line: &str| {
        let tokenized = tokenize_line(line, delimiter);
        if tokenized.unterminated_quote {
            warn!(
                line = position,
                "line ends inside an open quote; rest of line kept as one field"
            );
            unterminated_quote_lines.push(position);
        }
        tokenized.fields
    };

    let headers = fields_of(1, lines[0]);
    let width = headers.len();
    let rows = lines[1..]
        .iter()
        .enumerate()
        .map(|(i, &line)| TableRow::aligned(fields_of(i + 2, line), width))
        .collect::<Vec<_>>();

    debug!(columns = width, rows = rows.len(), %delimiter, "parsed table");
    ParsedTable {
        headers,
        rows,
        delimiter: Some(delimiter),
        unterminated_quote_lines,
    }
}
