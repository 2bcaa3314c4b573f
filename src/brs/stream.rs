//! Line cursor
//!
//!     The classifier reads source through [LineCursor], a cursor over a single line. The host
//!     editor owns the line and the token boundaries: before each call into the classifier it
//!     marks the current position as the token start, and after the call everything consumed
//!     since that mark is the token text ([LineCursor::current]).
//!
//!     [LineStream] is the implementation used by the document driver and the tests. Positions
//!     are byte offsets into the line and always sit on char boundaries.

use regex::Regex;

/// The cursor contract the classifier consumes.
pub trait LineCursor {
    /// Next character without consuming it.
    fn peek(&self) -> Option<char>;

    /// Consume and return the next character.
    fn next(&mut self) -> Option<char>;

    /// Consume characters while `pred` holds. Returns true if anything was consumed.
    fn eat_while<F: FnMut(char) -> bool>(&mut self, pred: F) -> bool;

    /// Consume blanks. Returns true if anything was consumed.
    fn eat_space(&mut self) -> bool {
        self.eat_while(|c| c.is_whitespace())
    }

    /// Match an anchored pattern at the cursor, consuming it when `consume` is set.
    fn match_regex(&mut self, pattern: &Regex, consume: bool) -> bool;

    /// Match a literal at the cursor, consuming it when `consume` is set.
    fn match_str(&mut self, literal: &str, consume: bool, case_insensitive: bool) -> bool;

    fn skip_to_end(&mut self);

    /// At the start of the line.
    fn sol(&self) -> bool;

    /// At the end of the line.
    fn eol(&self) -> bool;

    /// Text consumed since the last token boundary.
    fn current(&self) -> &str;

    /// Text not consumed yet.
    fn rest(&self) -> &str;
}

/// A cursor over one line of text.
#[derive(Debug, Clone)]
pub struct LineStream<'a> {
    line: &'a str,
    start: usize,
    pos: usize,
}

impl<'a> LineStream<'a> {
    pub fn new(line: &'a str) -> Self {
        LineStream {
            line,
            start: 0,
            pos: 0,
        }
    }

    /// Mark the current position as the start of the next token.
    pub fn start_token(&mut self) {
        self.start = self.pos;
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn token_start(&self) -> usize {
        self.start
    }
}

impl LineCursor for LineStream<'_> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while<F: FnMut(char) -> bool>(&mut self, mut pred: F) -> bool {
        let before = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos > before
    }

    fn match_regex(&mut self, pattern: &Regex, consume: bool) -> bool {
        let rest = &self.line[self.pos..];
        match pattern.find(rest) {
            Some(m) if m.start() == 0 => {
                if consume {
                    self.pos += m.end();
                }
                true
            }
            _ => false,
        }
    }

    fn match_str(&mut self, literal: &str, consume: bool, case_insensitive: bool) -> bool {
        let rest = &self.line[self.pos..];
        if rest.len() < literal.len() || !rest.is_char_boundary(literal.len()) {
            return false;
        }
        let head = &rest[..literal.len()];
        let matched = if case_insensitive {
            head.eq_ignore_ascii_case(literal)
        } else {
            head == literal
        };
        if matched && consume {
            self.pos += literal.len();
        }
        matched
    }

    fn skip_to_end(&mut self) {
        self.pos = self.line.len();
    }

    fn sol(&self) -> bool {
        self.pos == 0
    }

    fn eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn current(&self) -> &str {
        &self.line[self.start..self.pos]
    }

    fn rest(&self) -> &str {
        &self.line[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_next() {
        let mut s = LineStream::new("aé");
        assert_eq!(s.peek(), Some('a'));
        assert_eq!(s.next(), Some('a'));
        assert_eq!(s.next(), Some('é'));
        assert_eq!(s.next(), None);
        assert!(s.eol());
        assert_eq!(s.current(), "aé");
    }

    #[test]
    fn test_eat_space_and_sol() {
        let mut s = LineStream::new("  x");
        assert!(s.sol());
        assert!(s.eat_space());
        assert!(!s.sol());
        assert!(!s.eat_space());
        assert_eq!(s.current(), "  ");
        s.start_token();
        assert_eq!(s.current(), "");
        assert_eq!(s.rest(), "x");
    }

    #[test]
    fn test_match_regex_consume_and_lookahead() {
        let re = Regex::new(r"^\d+").unwrap();
        let mut s = LineStream::new("123abc");
        assert!(s.match_regex(&re, false));
        assert_eq!(s.pos(), 0);
        assert!(s.match_regex(&re, true));
        assert_eq!(s.current(), "123");
        assert!(!s.match_regex(&re, true));
    }

    #[test]
    fn test_match_str_case_insensitive() {
        let mut s = LineStream::new("&hFF");
        assert!(!s.match_str("&H", false, false));
        assert!(s.match_str("&H", true, true));
        assert_eq!(s.rest(), "FF");
    }

    #[test]
    fn test_match_str_respects_char_boundaries() {
        let mut s = LineStream::new("é");
        assert!(!s.match_str("x", false, false));
    }
}
