//! Lexer for the query mini-language.
//!
//! Splits a raw query into units. A unit is either a quoted phrase
//! (`"exact phrase"`, taken verbatim) or a word: a run of characters up to
//! the next separator. Separators are whitespace and the characters
//! `:`, `<`, `>`, `=`, in runs of any length. Each unit records the
//! separator run that follows it so the classifier can tell `name:foo`
//! from `name foo` and `size>=10`.
//!
//! Edge cases:
//! - An unterminated quote takes the rest of the input as one quoted unit.
//! - A quote only opens a phrase at the start of a unit. Inside a word it is
//!   an ordinary character.
//! - Separators before the first unit are skipped. A separator run at the
//!   end of the input is dropped (the last unit has no separator).

/// A lexical unit of a query, borrowed from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The unit text, without quotes.
    pub unit: &'a str,
    /// Whether the unit was written as a quoted phrase.
    pub is_quoted: bool,
    /// The separator run following the unit, `None` at end of input.
    pub separator: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// The separator with surrounding whitespace removed.
    pub fn trimmed_separator(&self) -> Option<&'a str> {
        self.separator.map(str::trim)
    }
}

/// Returns `true` for characters that separate units.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ':' | '<' | '>' | '=')
}

/// Tokenizes a query string.
///
/// The input is trimmed first; an empty query yields no tokens.
///
/// ```
/// use chromestatus_query::tokenize;
///
/// let tokens = tokenize(r#"owner:"jane doe" size>=10"#);
/// let units: Vec<_> = tokens.iter().map(|t| t.unit).collect();
/// assert_eq!(units, ["owner", "jane doe", "size", "10"]);
/// assert_eq!(tokens[2].separator, Some(">="));
/// ```
pub fn tokenize(raw: &str) -> Vec<Token<'_>> {
    Tokenizer::new(raw).collect()
}

/// Iterator over the tokens of a query.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the trimmed input.
    pub fn new(raw: &'a str) -> Self {
        let input = raw.trim();
        let pos = input.find(|c: char| !is_separator(c)).unwrap_or(input.len());
        Self { input, pos }
    }

    /// Reads one unit at the current position.
    ///
    /// Returns the unit text, whether it was quoted, and how many bytes of
    /// input it consumed.
    fn read_unit(&self) -> (&'a str, bool, usize) {
        let rest = &self.input[self.pos..];
        if let Some(body) = rest.strip_prefix('"') {
            return match body.find('"') {
                Some(end) => (&body[..end], true, end + 2),
                None => (body, true, rest.len()),
            };
        }
        let end = rest.find(is_separator).unwrap_or(rest.len());
        (&rest[..end], false, end)
    }

    /// Reads the separator run at the current position.
    fn read_separator(&self) -> (Option<&'a str>, usize) {
        let rest = &self.input[self.pos..];
        let len = rest.find(|c: char| !is_separator(c)).unwrap_or(rest.len());
        if len == rest.len() {
            // Nothing follows, so there is nothing to separate from.
            (None, len)
        } else {
            (Some(&rest[..len]), len)
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let (unit, is_quoted, consumed) = self.read_unit();
        self.pos += consumed;

        let (separator, consumed) = self.read_separator();
        self.pos += consumed;

        Some(Token {
            unit,
            is_quoted,
            separator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word<'a>(unit: &'a str, separator: Option<&'a str>) -> Token<'a> {
        Token {
            unit,
            is_quoted: false,
            separator,
        }
    }

    fn quoted<'a>(unit: &'a str, separator: Option<&'a str>) -> Token<'a> {
        Token {
            unit,
            is_quoted: true,
            separator,
        }
    }

    #[test]
    fn empty_and_blank_queries() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn bare_words() {
        assert_eq!(
            tokenize("foo bar"),
            vec![word("foo", Some(" ")), word("bar", None)]
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(tokenize("  foo  "), vec![word("foo", None)]);
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(tokenize(r#""exact phrase""#), vec![quoted("exact phrase", None)]);
    }

    #[test]
    fn field_value() {
        assert_eq!(
            tokenize("field:value"),
            vec![word("field", Some(":")), word("value", None)]
        );
    }

    #[test]
    fn field_quoted_value() {
        assert_eq!(
            tokenize(r#"field:"quoted value""#),
            vec![word("field", Some(":")), quoted("quoted value", None)]
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            tokenize("field<=10"),
            vec![word("field", Some("<=")), word("10", None)]
        );
        assert_eq!(
            tokenize("field==10"),
            vec![word("field", Some("==")), word("10", None)]
        );
        assert_eq!(
            tokenize("field=10"),
            vec![word("field", Some("=")), word("10", None)]
        );
    }

    #[test]
    fn separator_runs_keep_whitespace() {
        let tokens = tokenize("field : value");
        assert_eq!(tokens[0].separator, Some(" : "));
        assert_eq!(tokens[0].trimmed_separator(), Some(":"));
    }

    #[test]
    fn quoted_content_is_not_split() {
        assert_eq!(
            tokenize(r#""a:b >= c" d"#),
            vec![quoted("a:b >= c", Some(" ")), word("d", None)]
        );
    }

    #[test]
    fn trailing_separator_is_dropped() {
        assert_eq!(tokenize("foo:"), vec![word("foo", None)]);
        assert_eq!(tokenize("foo >="), vec![word("foo", None)]);
    }

    #[test]
    fn leading_separators_are_skipped() {
        assert_eq!(tokenize(":foo"), vec![word("foo", None)]);
        assert!(tokenize(":::").is_empty());
    }

    #[test]
    fn empty_quotes_yield_empty_unit() {
        assert_eq!(
            tokenize(r#""" foo"#),
            vec![quoted("", Some(" ")), word("foo", None)]
        );
    }

    #[test]
    fn unterminated_quote_takes_rest_of_input() {
        assert_eq!(tokenize(r#""foo bar"#), vec![quoted("foo bar", None)]);
        assert_eq!(
            tokenize(r#"name:"foo bar"#),
            vec![word("name", Some(":")), quoted("foo bar", None)]
        );
    }

    #[test]
    fn quote_inside_word_is_literal() {
        assert_eq!(tokenize(r#"say"hi""#), vec![word(r#"say"hi""#, None)]);
    }

    #[test]
    fn unit_directly_after_quote_has_empty_separator() {
        assert_eq!(
            tokenize(r#""a"b"#),
            vec![quoted("a", Some("")), word("b", None)]
        );
    }

    #[test]
    fn multibyte_input() {
        assert_eq!(
            tokenize("café:crème"),
            vec![word("café", Some(":")), word("crème", None)]
        );
    }
}
