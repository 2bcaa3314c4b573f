//! Common lexer module
//!
//! Advisory errors and the classification result shared by the sub-tokenizers.

use crate::brs::token::Style;
use std::fmt;

/// Problems found while classifying a token.
///
/// None of these stop tokenization: the offending text is still returned as a token, styled
/// as an error, and lexing resumes right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No rule matched; the character was consumed on its own
    UnrecognizedCharacter(char),
    /// A single-line string reached the end of its line
    UnterminatedString { delimiter: String },
    /// A `.` followed by something that cannot be a member name
    InvalidMemberAccess { text: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnrecognizedCharacter(ch) => {
                write!(f, "Unrecognized character: {:?}", ch)
            }
            LexError::UnterminatedString { delimiter } => {
                write!(f, "Unterminated string, expected closing {}", delimiter)
            }
            LexError::InvalidMemberAccess { text } if text.is_empty() => {
                write!(f, "Invalid member access: missing member name")
            }
            LexError::InvalidMemberAccess { text } => {
                write!(f, "Invalid member access: {:?}", text)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Style of one token plus the advisory error behind it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub style: Style,
    pub error: Option<LexError>,
}

impl Classification {
    pub fn of(style: Style) -> Self {
        Classification { style, error: None }
    }

    pub fn failed(style: Style, error: LexError) -> Self {
        Classification {
            style,
            error: Some(error),
        }
    }
}
