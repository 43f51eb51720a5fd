//! Splitting a single line into trimmed fields.

use super::delimiter::Delimiter;

/// Fields of one tokenized line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Trimmed field values, in column order.
    pub fields: Vec<String>,
    /// The line ended while a quoted field was still open. Everything after
    /// the opening quote, delimiters included, was absorbed into one field.
    pub unterminated_quote: bool,
}

/// Split `line` into fields under `delimiter`.
///
/// Tab-separated lines are split naively. Comma and semicolon lines are
/// scanned with quote tracking: a `"` toggles the quoted state, `""` inside
/// quotes is a literal quote, and the delimiter only separates fields outside
/// quotes. A field wholly wrapped in quotes has the outer pair removed.
///
/// Unbalanced quoting is tolerated, never rejected; see
/// [`Tokenized::unterminated_quote`].
pub fn tokenize_line(line: &str, delimiter: Delimiter) -> Tokenized {
    if !delimiter.is_quote_aware() {
        return Tokenized {
            fields: line
                .split(delimiter.as_char())
                .map(|f| f.trim().to_owned())
                .collect(),
            unterminated_quote: false,
        };
    }

    let separator = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
                current.push('"');
            }
        } else if ch == separator && !in_quotes {
            fields.push(finish_field(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(finish_field(&current));

    Tokenized {
        fields,
        unterminated_quote: in_quotes,
    }
}

/// Convenience wrapper returning only the field values.
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    tokenize_line(line, delimiter).fields
}

fn finish_field(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_split_ignores_quotes() {
        let fields = split_line("\"Monday\t review\"\tGrammar", Delimiter::Tab);
        assert_eq!(fields, vec!["\"Monday", "review\"", "Grammar"]);
    }

    #[test]
    fn tab_split_keeps_empty_cells() {
        let fields = split_line("Monday\t\tGrammar\t", Delimiter::Tab);
        assert_eq!(fields, vec!["Monday", "", "Grammar", ""]);
    }

    #[test]
    fn quoted_comma_does_not_split() {
        let fields = split_line("\"Monday, review\",Grammar", Delimiter::Comma);
        assert_eq!(fields, vec!["Monday, review", "Grammar"]);
    }

    #[test]
    fn escaped_quote_decodes_to_literal() {
        let fields = split_line(r#""""Hi""",x"#, Delimiter::Comma);
        assert_eq!(fields, vec![r#""Hi""#, "x"]);
    }

    #[test]
    fn fields_are_trimmed_before_unquoting() {
        let fields = split_line("  a ;  \"b; c\"  ; d", Delimiter::Semicolon);
        assert_eq!(fields, vec!["a", "b; c", "d"]);
    }

    #[test]
    fn comma_is_literal_under_semicolon_delimiter() {
        let fields = split_line("a,b;c", Delimiter::Semicolon);
        assert_eq!(fields, vec!["a,b", "c"]);
    }

    #[test]
    fn partially_quoted_field_keeps_its_quotes() {
        let fields = split_line("say \"hi\" now,x", Delimiter::Comma);
        assert_eq!(fields, vec!["say \"hi\" now", "x"]);
    }

    #[test]
    fn unterminated_quote_absorbs_rest_of_line() {
        let tokenized = tokenize_line("a,\"b,c,d", Delimiter::Comma);
        assert!(tokenized.unterminated_quote);
        assert_eq!(tokenized.fields, vec!["a", "\"b,c,d"]);
    }

    #[test]
    fn balanced_line_reports_no_open_quote() {
        let tokenized = tokenize_line("\"a\",\"b\"", Delimiter::Comma);
        assert!(!tokenized.unterminated_quote);
        assert_eq!(tokenized.fields, vec!["a", "b"]);
    }

    #[test]
    fn empty_line_is_a_single_empty_field() {
        assert_eq!(split_line("", Delimiter::Comma), vec![""]);
    }

    #[test]
    fn lone_quote_field_is_not_stripped() {
        // A single `"` opens a quote that never closes.
        let tokenized = tokenize_line("\"", Delimiter::Comma);
        assert_eq!(tokenized.fields, vec!["\""]);
        assert!(tokenized.unterminated_quote);
    }
}
