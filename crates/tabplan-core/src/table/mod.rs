//! Delimited-text tokenization.
//!
//! Provides delimiter detection, quote-aware line splitting, the
//! label-keyed [`ParsedTable`] and the positional [`ParsedMatrix`].

pub mod delimiter;
pub mod matrix;
pub mod parse;
pub mod tokenizer;

pub use delimiter::{Delimiter, detect_delimiter};
pub use matrix::{ParsedMatrix, parse_matrix};
pub use parse::{ParsedTable, TableRow, parse_table, split_lines};
pub use tokenizer::{Tokenized, split_line, tokenize_line};
