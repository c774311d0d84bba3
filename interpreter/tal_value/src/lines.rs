//! Universal line-break handling.
//!
//! Text decomposition (for sorting and line chunks) recognizes every line
//! terminator scripts may carry: CR, LF, CRLF, and the Unicode line and
//! paragraph separators. Reconstitution always joins with the context's
//! configured line ending, never with what was found in the input.

/// The Unicode line separator, U+2028.
pub const LINE_SEPARATOR: char = '\u{2028}';
/// The Unicode paragraph separator, U+2029.
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Split `text` on the universal line-break set: CR, LF, CRLF, U+2028,
/// U+2029. CRLF counts as a single break.
///
/// An empty input yields one empty line, matching how chunk counting
/// treats empty text as a single empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '\r' => {
                lines.push(&text[start..i]);
                if let Some(&(_, '\n')) = iter.peek() {
                    iter.next();
                    start = i + 2;
                } else {
                    start = i + 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                lines.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lf() {
        assert_eq!(split_lines("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_crlf_is_one_break() {
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_bare_cr() {
        assert_eq!(split_lines("a\rb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_unicode_separators() {
        assert_eq!(split_lines("a\u{2028}b\u{2029}c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_trailing_terminator_yields_empty_last_line() {
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(split_lines(""), vec![""]);
    }
}
