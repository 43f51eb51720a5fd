//! Field separator detection.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// The field separators recognised in pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
}

impl Delimiter {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }

    /// Whether fields under this delimiter may be wrapped in double quotes.
    ///
    /// Tab-separated text comes from spreadsheet pastes and is taken as-is.
    pub fn is_quote_aware(self) -> bool {
        !matches!(self, Self::Tab)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tab => "tab",
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
        };
        f.write_str(s)
    }
}

/// Pick the field separator for `text`.
///
/// Any tab character wins outright. Otherwise commas and semicolons are
/// counted across the whole text and the more frequent one is chosen, with
/// comma winning ties (including text that has neither).
pub fn detect_delimiter(text: &str) -> Delimiter {
    if text.contains('\t') {
        debug!("tab present, using tab delimiter");
        return Delimiter::Tab;
    }

    let (commas, semicolons) = text.chars().fold((0usize, 0usize), |(c, s), ch| match ch {
        ',' => (c + 1, s),
        ';' => (c, s + 1),
        _ => (c, s),
    });

    let delimiter = if commas >= semicolons {
        Delimiter::Comma
    } else {
        Delimiter::Semicolon
    };
    debug!(commas, semicolons, %delimiter, "detected delimiter");
    delimiter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_wins_over_any_comma_count() {
        assert_eq!(detect_delimiter("a\tb,c\nd\te,f"), Delimiter::Tab);
        assert_eq!(detect_delimiter("a,b,c,d,e;f\tg"), Delimiter::Tab);
    }

    #[test]
    fn comma_wins_ties() {
        assert_eq!(detect_delimiter("a,b;c\nd,e;f"), Delimiter::Comma);
    }

    #[test]
    fn semicolon_when_more_frequent() {
        assert_eq!(detect_delimiter("a;b;c\nd;e,f"), Delimiter::Semicolon);
    }

    #[test]
    fn plain_text_defaults_to_comma() {
        assert_eq!(detect_delimiter("just some words"), Delimiter::Comma);
        assert_eq!(detect_delimiter(""), Delimiter::Comma);
    }

    #[test]
    fn counts_are_global_not_per_line() {
        // First line favours semicolons, but the text as a whole has more commas.
        let text = "a;b\nc,d,e\nf,g";
        assert_eq!(detect_delimiter(text), Delimiter::Comma);
    }

    #[test]
    fn only_tab_is_not_quote_aware() {
        assert!(!Delimiter::Tab.is_quote_aware());
        assert!(Delimiter::Comma.is_quote_aware());
        assert!(Delimiter::Semicolon.is_quote_aware());
    }
}
