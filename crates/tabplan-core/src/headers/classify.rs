//! Keyword-based header classification.
//!
//! The keyword table lives in `keywords.toml`, embedded in the binary at
//! compile time and parsed once on first use.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The closed set of meanings a header can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldTag {
    /// The record's identifying field (`stage`, `day`, `phase`, `section`).
    Label,
    Focus,
    LanguageTarget,
    Assessment,
    TeacherActions,
    StudentActions,
    Method,
}

impl FieldTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Focus => "focus",
            Self::LanguageTarget => "languageTarget",
            Self::Assessment => "assessment",
            Self::TeacherActions => "teacherActions",
            Self::StudentActions => "studentActions",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords that identify one tag.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordEntry {
    pub tag: FieldTag,
    /// Lower-case fragments; a header containing any of them gets `tag`.
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KeywordLibrary {
    tags: Vec<KeywordEntry>,
}

static KEYWORDS_TOML: &str = include_str!("keywords.toml");

static KEYWORD_TABLE: LazyLock<Vec<KeywordEntry>> = LazyLock::new(|| {
    let library: KeywordLibrary =
        toml::from_str(KEYWORDS_TOML).expect("embedded keywords.toml is invalid");
    library.tags
});

/// The keyword table, in match priority order.
///
/// # Panics
///
/// Panics on first use if the embedded TOML is malformed. The table is
/// compiled in, so this is caught by the unit tests, not at runtime.
pub fn keyword_table() -> &'static [KeywordEntry] {
    &KEYWORD_TABLE
}

/// Classify one header label.
///
/// The header is lower-cased and tested for substring containment against
/// each entry of [`keyword_table`] in order. Returns `None` when nothing
/// matches.
pub fn classify_header(header: &str) -> Option<FieldTag> {
    let lowered = header.to_lowercase();
    keyword_table()
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|entry| entry.tag)
}

/// Per-column tags for a whole header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    tags: Vec<Option<FieldTag>>,
}

impl HeaderMap {
    /// Classify every header in `headers`.
    pub fn build(headers: &[String]) -> Self {
        let tags: Vec<Option<FieldTag>> = headers.iter().map(|h| classify_header(h)).collect();
        for (header, tag) in headers.iter().zip(&tags) {
            debug!(%header, tag = tag.map(FieldTag::as_str).unwrap_or("-"), "classified header");
        }
        Self { tags }
    }

    /// Tag of `column`, if any.
    pub fn tag(&self, column: usize) -> Option<FieldTag> {
        self.tags.get(column).copied().flatten()
    }

    pub fn tags(&self) -> &[Option<FieldTag>] {
        &self.tags
    }

    /// Number of headers classified.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether any header carries [`FieldTag::Label`].
    pub fn has_label(&self) -> bool {
        self.label_column().is_some()
    }

    /// First column tagged [`FieldTag::Label`].
    pub fn label_column(&self) -> Option<usize> {
        self.tags.iter().position(|t| *t == Some(FieldTag::Label))
    }

    /// Tagged columns in column order.
    pub fn tagged_columns(&self) -> impl Iterator<Item = (usize, FieldTag)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .filter_map(|(column, tag)| tag.map(|t| (column, t)))
    }

    pub fn tagged_count(&self) -> usize {
        self.tags.iter().filter(|t| t.is_some()).count()
    }

    /// Share of headers that received any tag; `0.0` with no headers.
    pub fn density(&self) -> f64 {
        if self.tags.is_empty() {
            return 0.0;
        }
        self.tagged_count() as f64 / self.tags.len() as f64
    }
}
