//! Quote tracking and string-literal decoding.

use crate::error::{ScanError, ScanResult};

/// How a single character was classified by [`QuoteState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Outside any literal and not a quote.
    Code(char),
    /// Opening or closing quote.
    Delimiter,
    /// Backslash that escapes the next character.
    Escape,
    /// Literal content, including escaped characters.
    Quoted(char),
}

/// Transient quote/escape state for one literal read or one brace match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QuoteState {
    quote: Option<char>,
    escaping: bool,
}

impl QuoteState {
    /// Whether the last character left us inside a literal.
    pub(crate) fn in_literal(&self) -> bool {
        self.quote.is_some()
    }

    /// Advance by one character.
    pub(crate) fn step(&mut self, ch: char) -> Step {
        match self.quote {
            None if is_quote(ch) => {
                self.quote = Some(ch);
                Step::Delimiter
            }
            None => Step::Code(ch),
            Some(_) if self.escaping => {
                self.escaping = false;
                Step::Quoted(ch)
            }
            Some(_) if ch == '\\' => {
                self.escaping = true;
                Step::Escape
            }
            Some(quote) if ch == quote => {
                self.quote = None;
                Step::Delimiter
            }
            Some(_) => Step::Quoted(ch),
        }
    }
}

/// A decoded string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Literal content with escaping backslashes removed.
    pub value: String,
    /// Offset just past the closing quote.
    pub end: usize,
}

/// Whitespace skipped before a literal: space, tab, LF, VT, FF, CR.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Read the quoted literal starting at `at`, after optional whitespace.
///
/// Returns `Ok(None)` when nothing but whitespace remains. Escapes are not
/// translated: `\n` decodes to `n`, `\\` to a single backslash.
pub fn read_literal(text: &str, at: usize) -> ScanResult<Option<Literal>> {
    let Some(skipped) = text[at..].find(|ch| !is_whitespace(ch)) else {
        return Ok(None);
    };
    let open = at + skipped;

    let mut state = QuoteState::default();
    let mut chars = text[open..].char_indices();
    if let Some((_, first)) = chars.next() {
        if state.step(first) != Step::Delimiter {
            return Err(ScanError::MalformedLiteral {
                offset: open,
                found: first,
            });
        }
    }

    let mut value = String::new();
    for (i, ch) in chars {
        let step = state.step(ch);
        if !state.in_literal() {
            return Ok(Some(Literal {
                value,
                end: open + i + ch.len_utf8(),
            }));
        }
        if let Step::Quoted(content) = step {
            value.push(content);
        }
    }

    Err(ScanError::UnterminatedLiteral { offset: open })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Literal {
        read_literal(text, 0).unwrap().unwrap()
    }

    #[test]
    fn test_reads_single_and_double_quoted() {
        assert_eq!(read("'Primary'").value, "Primary");
        assert_eq!(read("\"Primary\"").value, "Primary");
        assert_eq!(read("'Primary', fn").end, 9);
    }

    #[test]
    fn test_skips_leading_whitespace() {
        let literal = read(" \t\r\n\x0B\x0C'Spaced'");
        assert_eq!(literal.value, "Spaced");
        assert_eq!(literal.end, 14);
    }

    #[test]
    fn test_other_quote_is_content() {
        assert_eq!(read(r#""Don't""#).value, "Don't");
        assert_eq!(read(r#"'Say "hi"'"#).value, r#"Say "hi""#);
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let literal = read(r"'It\'s' rest");
        assert_eq!(literal.value, "It's");
        assert_eq!(literal.end, 7);
    }

    #[test]
    fn test_escaped_backslash_is_one_character() {
        assert_eq!(read(r"'back\\slash'").value, r"back\slash");
        // The closing quote after `\\` is a real terminator.
        let literal = read(r"'end\\', fn");
        assert_eq!(literal.value, r"end\");
        assert_eq!(literal.end, 7);
    }

    #[test]
    fn test_escape_sequences_are_not_translated() {
        assert_eq!(read(r"'a\nb\tc'").value, "anbtc");
    }

    #[test]
    fn test_end_is_a_byte_offset() {
        let literal = read("'héllo'");
        assert_eq!(literal.value, "héllo");
        assert_eq!(literal.end, "'héllo'".len());
    }

    #[test]
    fn test_reads_from_offset() {
        let text = "storiesOf('Buttons')";
        let literal = read_literal(text, 10).unwrap().unwrap();
        assert_eq!(literal.value, "Buttons");
        assert_eq!(literal.end, 19);
    }

    #[test]
    fn test_whitespace_only_is_none() {
        assert!(read_literal("   \n", 0).unwrap().is_none());
        assert!(read_literal("", 0).unwrap().is_none());
    }

    #[test]
    fn test_non_quote_is_malformed() {
        match read_literal("  title)", 0) {
            Err(ScanError::MalformedLiteral { offset, found }) => {
                assert_eq!(offset, 2);
                assert_eq!(found, 't');
            }
            other => panic!("Expected MalformedLiteral, got {:?}", other),
        }
    }

    #[test]
    fn test_backtick_is_malformed() {
        assert!(matches!(
            read_literal("`Template`", 0),
            Err(ScanError::MalformedLiteral { found: '`', .. })
        ));
    }

    #[test]
    fn test_unterminated_reports_opening_quote() {
        assert!(matches!(
            read_literal("  'Oops", 0),
            Err(ScanError::UnterminatedLiteral { offset: 2 })
        ));
        assert!(matches!(
            read_literal(r"'dangling\'", 0),
            Err(ScanError::UnterminatedLiteral { offset: 0 })
        ));
    }

    #[test]
    fn test_quote_state_tracks_literals() {
        let mut state = QuoteState::default();
        assert_eq!(state.step('{'), Step::Code('{'));
        assert_eq!(state.step('"'), Step::Delimiter);
        assert!(state.in_literal());
        assert_eq!(state.step('{'), Step::Quoted('{'));
        assert_eq!(state.step('\\'), Step::Escape);
        assert_eq!(state.step('"'), Step::Quoted('"'));
        assert_eq!(state.step('"'), Step::Delimiter);
        assert!(!state.in_literal());
    }
}
