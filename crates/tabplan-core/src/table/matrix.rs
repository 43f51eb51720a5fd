//! Positional matrix view used for raw human review.

use serde::Serialize;
use tracing::instrument;

use super::delimiter::detect_delimiter;
use super::parse::split_lines;
use super::tokenizer::split_line;

/// Headers plus every line as a positional row.
///
/// The first line is both the header sequence and the first matrix row.
/// No header repair or classification is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMatrix {
    pub headers: Vec<String>,
    pub matrix: Vec<Vec<String>>,
}

impl ParsedMatrix {
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Widest row length, so a reviewer can offer every column.
    pub fn width(&self) -> usize {
        self.matrix.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Values of `column` across all rows, `""` where a row is too short.
    pub fn column(&self, column: usize) -> Vec<&str> {
        self.matrix
            .iter()
            .map(|row| row.get(column).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Tokenize `text` into a [`ParsedMatrix`] with the same delimiter rules as
/// [`parse_table`](super::parse_table).
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_matrix(text: &str) -> ParsedMatrix {
    let lines = split_lines(text);
    if lines.is_empty() {
        return ParsedMatrix::default();
    }

    let delimiter = detect_delimiter(text);
    let matrix: Vec<Vec<String>> = lines
        .iter()
        .map(|line| split_line(line, delimiter))
        .collect();
    let headers = matrix[0].clone();

    ParsedMatrix { headers, matrix }
}
