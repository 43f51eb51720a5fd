//! Header repair and semantic classification.

pub mod classify;
pub mod merge;

pub use classify::{FieldTag, HeaderMap, KeywordEntry, classify_header, keyword_table};
pub use merge::{HeaderMerge, MergedHeaders, is_header_artifact, merge_split_headers};
