//! Token styles and tokens
//!
//!     Every call into the classifier yields exactly one token: a style from a closed set and
//!     the text it consumed. Styles are what the editor paints; they carry no structure beyond
//!     that. The names returned by [Style::as_str] are stable and double as the serialized
//!     representation, so editor themes and the CLI output can rely on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Comment,
    String,
    StringEscape,
    StringError,
    Number,
    NumberHex,
    NumberOctal,
    NumberFloat,
    Keyword,
    /// Control-flow keywords (`if`, `then`, `exit for`, ...), painted apart from plain keywords.
    KeywordOperator,
    Type,
    Constant,
    Identifier,
    IdentifierMember,
    BuiltinFunction,
    BuiltinObject,
    Operator,
    Bracket,
    Delimiter,
    Error,
    Whitespace,
}

impl Style {
    /// Returns the stable style name, e.g. `"number-hex"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Comment => "comment",
            Style::String => "string",
            Style::StringEscape => "string-escape",
            Style::StringError => "string-error",
            Style::Number => "number",
            Style::NumberHex => "number-hex",
            Style::NumberOctal => "number-octal",
            Style::NumberFloat => "number-float",
            Style::Keyword => "keyword",
            Style::KeywordOperator => "keyword-operator",
            Style::Type => "type",
            Style::Constant => "constant",
            Style::Identifier => "identifier",
            Style::IdentifierMember => "identifier-member",
            Style::BuiltinFunction => "builtin-function",
            Style::BuiltinObject => "builtin-object",
            Style::Operator => "operator",
            Style::Bracket => "bracket",
            Style::Delimiter => "delimiter",
            Style::Error => "error",
            Style::Whitespace => "whitespace",
        }
    }

    pub fn is_number(self) -> bool {
        matches!(
            self,
            Style::Number | Style::NumberHex | Style::NumberOctal | Style::NumberFloat
        )
    }

    /// Styles that are rendered with an error color.
    pub fn is_error(self) -> bool {
        matches!(self, Style::Error | Style::StringError)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const STYLES: &[Style] = &[
    Style::Comment,
    Style::String,
    Style::StringEscape,
    Style::StringError,
    Style::Number,
    Style::NumberHex,
    Style::NumberOctal,
    Style::NumberFloat,
    Style::Keyword,
    Style::KeywordOperator,
    Style::Type,
    Style::Constant,
    Style::Identifier,
    Style::IdentifierMember,
    Style::BuiltinFunction,
    Style::BuiltinObject,
    Style::Operator,
    Style::Bracket,
    Style::Delimiter,
    Style::Error,
    Style::Whitespace,
];

/// A classified slice of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub style: Style,
    pub text: String,
}

impl Token {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Token {
            style,
            text: text.into(),
        }
    }
}
