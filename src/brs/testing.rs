//! Testing utilities for lexer assertions
//!
//! # Lexer Testing Guidelines
//!
//! Lexer tests run the classifier the way an editor host does: one line at a time, one token
//! per call, with the state carried from line to line. The helpers here wrap that loop so tests
//! do not re-implement it (and get the blank-line handling wrong).
//!
//! ## Rule 1: Drive lines through lex_line / lex_lines
//!
//! [lex_line] lexes a single line against a state you own, which is what you want when the test
//! is about the state after the line. [lex_lines] starts from a fresh state, lexes every line in
//! order and hands back the final state.
//!
//! ```rust-example
//! let lexer = Lexer::default();
//! let (lines, state) = lex_lines(&lexer, &["if x then", "print x", "end if"]);
//! assert_eq!(state.current_indent(), 0);
//! ```
//!
//! ## Rule 2: Compare significant tokens
//!
//! Whitespace tokens are noise in most assertions. [significant] drops them and turns each
//! token into a `(Style, String)` pair that reads well in `assert_eq!` failures.
//!
//! ## Rule 3: Larger programs live in fixtures
//!
//! Anything longer than a few lines belongs in `tests/fixtures/<name>.brs` and is loaded with
//! [fixture]. Keeping whole programs in files makes it easy to open them in an editor and check
//! the highlighting by eye.

use crate::brs::highlight::tokenize_line;
use crate::brs::lexing::{Lexer, LexerState};
use crate::brs::token::{Style, Token};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Lex one line with `state`, returning every token including whitespace.
pub fn lex_line(lexer: &Lexer<'_>, state: &mut LexerState, line: &str) -> Vec<Token> {
    tokenize_line(lexer, state, line)
        .iter()
        .map(|token| token.to_token())
        .collect()
}

/// Lex `lines` from a fresh state.
pub fn lex_lines(lexer: &Lexer<'_>, lines: &[&str]) -> (Vec<Vec<Token>>, LexerState) {
    let mut state = lexer.start_state();
    let tokens = lines
        .iter()
        .map(|line| lex_line(lexer, &mut state, line))
        .collect();
    (tokens, state)
}

/// Tokens without whitespace, as `(style, text)` pairs.
pub fn significant(tokens: &[Token]) -> Vec<(Style, String)> {
    tokens
        .iter()
        .filter(|token| token.style != Style::Whitespace)
        .map(|token| (token.style, token.text.clone()))
        .collect()
}

/// Path of a sample program under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.brs", name))
}

/// Read a sample program from `tests/fixtures`.
pub fn fixture(name: &str) -> io::Result<String> {
    fs::read_to_string(fixture_path(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_lines_carries_state() {
        let lexer = Lexer::default();
        let (lines, state) = lex_lines(&lexer, &["while x", "", "x = x - 1"]);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(state.current_indent(), 1);
    }

    #[test]
    fn test_significant_drops_whitespace() {
        let tokens = vec![
            Token::new(Style::Whitespace, "  "),
            Token::new(Style::Identifier, "x"),
        ];
        assert_eq!(significant(&tokens), vec![(Style::Identifier, "x".to_string())]);
    }

    #[test]
    fn test_fixture_path_points_into_tests() {
        let path = fixture_path("hello");
        assert!(path.ends_with("tests/fixtures/hello.brs"));
    }
}
