//! Per-document lexer state

use crate::brs::keywords::StringDelimiter;
use crate::brs::token::Token;

/// Which sub-tokenizer handles the next call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Base,
    InString { delimiter: StringDelimiter },
}

/// State carried from token to token and from line to line.
///
/// One value per open document. Only the classifier and the indentation engine change it;
/// hosts treat it as opaque apart from the read accessors and may clone it to cache the state
/// at a line boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexerState {
    pub(super) mode: Mode,
    pub(super) last_token: Option<Token>,
    pub(super) current_indent: i32,
    pub(super) pending_line_indent_delta: i32,
    pub(super) single_line_block_flag: bool,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Delimiter of the string being lexed, if inside one.
    pub fn string_delimiter(&self) -> Option<&str> {
        match &self.mode {
            Mode::InString { delimiter } => Some(&delimiter.text),
            Mode::Base => None,
        }
    }

    /// Whether the next line starts inside a string that spans lines.
    ///
    /// A single-character string still open here is dropped when the next line begins.
    pub fn in_multiline_string(&self) -> bool {
        matches!(&self.mode, Mode::InString { delimiter } if !delimiter.is_single_char())
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.last_token.as_ref()
    }

    /// Nesting depth. May be negative after unmatched closers.
    pub fn current_indent(&self) -> i32 {
        self.current_indent
    }

    pub fn pending_line_indent_delta(&self) -> i32 {
        self.pending_line_indent_delta
    }

    /// Depth that applies to the next line once the pending delta is folded in.
    pub fn effective_indent(&self) -> i32 {
        self.current_indent + self.pending_line_indent_delta
    }

    pub fn single_line_block_flag(&self) -> bool {
        self.single_line_block_flag
    }
}
