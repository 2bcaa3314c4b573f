//! Lexer
//!
//!     This module holds the classifier the editor calls once per token. It is line-incremental:
//!     the host creates one [LexerState] per document with [Lexer::start_state], then for every
//!     line repeatedly calls [Lexer::token] until the cursor reaches the end of the line (or
//!     [Lexer::blank_line] for an empty line). Independently, whenever a new line is being
//!     composed, it asks [Lexer::indent] how far to indent it.
//!
//! Modes
//!
//!     The state carries an explicit [Mode]. In base mode the rules below apply; once a string
//!     delimiter is seen the string sub-tokenizer ([strings]) takes over until the string
//!     closes. Strings do not nest, so the mode never goes deeper than base -> string -> base.
//!
//! Base Rules
//!
//!     Leading blanks are returned as a whitespace token first. After that the rules are tried
//!     in the order of [BASE_RULES] and the first match wins. The order encodes precedence:
//!
//!         1. comments (`'` or `rem`) run to the end of the line
//!         2. numbers, see [numbers]
//!         3. string delimiters enter string mode
//!         4. operators, two-character before one-character, then word operators
//!         5. single-character delimiters
//!         6. brackets
//!         7. directive words that never nest (`library`)
//!         8. the inline opener (`do`)
//!         9. block openers (`sub`, `function`, `if`, `for`, `while`, `try`)
//!         10. middle control words (`then`, `else`, `exit for`, ...)
//!         11. the two-word closer (`end` + block word)
//!         12. fused closers (`endif`, `endsub`, `next`, ...)
//!         13. types and Roku component names (`roArray`), keywords, atoms, known members,
//!             builtin functions, builtin objects, function calls, identifiers
//!
//!     If nothing matches, one character is consumed and styled as an error, so every call
//!     makes progress. Rules 7 to 12 also move the nesting counter, see [indentation].
//!
//! Member Access
//!
//!     The token right after a `.` is lexed with its nesting side effects discarded and then
//!     restyled by [members], so `list.next()` neither dedents nor shows up as a keyword.

pub mod common;
pub mod indentation;
mod members;
mod numbers;
pub mod state;
mod strings;

pub use common::{Classification, LexError};
pub use indentation::indent_width;
pub use state::{LexerState, Mode};

use crate::brs::config::LexerConfig;
use crate::brs::keywords::{self, KeywordTables, WordTable};
use crate::brs::stream::LineCursor;
use crate::brs::token::{Style, Token};
use regex::Regex;

/// A base-mode matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Comment,
    Number,
    StringOpen,
    Operator,
    WordOperator,
    Delimiter,
    Bracket,
    NoIndent,
    InlineOpener,
    Opener,
    MiddleControl,
    DoubleCloser,
    FusedCloser,
    Type,
    RokuType,
    Keyword,
    Atom,
    KnownMember,
    BuiltinFunction,
    BuiltinObject,
    FunctionCall,
    Identifier,
}

/// Base-mode rules in precedence order.
const BASE_RULES: [Rule; 22] = [
    Rule::Comment,
    Rule::Number,
    Rule::StringOpen,
    Rule::Operator,
    Rule::WordOperator,
    Rule::Delimiter,
    Rule::Bracket,
    Rule::NoIndent,
    Rule::InlineOpener,
    Rule::Opener,
    Rule::MiddleControl,
    Rule::DoubleCloser,
    Rule::FusedCloser,
    Rule::Type,
    Rule::RokuType,
    Rule::Keyword,
    Rule::Atom,
    Rule::KnownMember,
    Rule::BuiltinFunction,
    Rule::BuiltinObject,
    Rule::FunctionCall,
    Rule::Identifier,
];

fn eat_word<C: LineCursor>(cursor: &mut C, table: &WordTable) -> bool {
    table
        .pattern()
        .is_some_and(|pattern| cursor.match_regex(pattern, true))
}

fn peek_word<C: LineCursor>(cursor: &mut C, table: &WordTable) -> bool {
    table
        .pattern()
        .is_some_and(|pattern| cursor.match_regex(pattern, false))
}

fn word<C: LineCursor>(cursor: &mut C, table: &WordTable, style: Style) -> Option<Style> {
    eat_word(cursor, table).then_some(style)
}

fn pattern<C: LineCursor>(cursor: &mut C, pattern: &Regex, style: Style) -> Option<Style> {
    cursor.match_regex(pattern, true).then_some(style)
}

/// The BrightScript classifier.
///
/// Holds the keyword tables by reference and the configuration by value; all mutable data
/// lives in the [LexerState] passed to each call, so one lexer can serve many documents.
#[derive(Debug, Clone)]
pub struct Lexer<'t> {
    tables: &'t KeywordTables,
    config: LexerConfig,
}

impl Lexer<'static> {
    /// A lexer over the standard BrightScript tables.
    pub fn brightscript(config: LexerConfig) -> Self {
        Lexer::new(KeywordTables::brightscript(), config)
    }
}

impl Default for Lexer<'static> {
    fn default() -> Self {
        Self::brightscript(LexerConfig::default())
    }
}

impl<'t> Lexer<'t> {
    pub fn new(tables: &'t KeywordTables, config: LexerConfig) -> Self {
        Lexer { tables, config }
    }

    /// Fresh state for a new document.
    pub fn start_state(&self) -> LexerState {
        LexerState::new()
    }

    /// Classify the next token on the line.
    pub fn token<C: LineCursor>(&self, cursor: &mut C, state: &mut LexerState) -> Style {
        self.classify(cursor, state).style
    }

    /// Like [Lexer::token], also reporting the advisory error behind an error style.
    pub fn classify<C: LineCursor>(&self, cursor: &mut C, state: &mut LexerState) -> Classification {
        if cursor.sol() {
            state.begin_line();
        }

        let follows_dot = matches!(
            &state.last_token,
            Some(token) if token.style == Style::Delimiter && token.text == "."
        );

        let in_string = matches!(state.mode, Mode::InString { .. });
        let mut classification = if in_string {
            strings::token_string(self.tables, &self.config, cursor, state)
        } else if follows_dot {
            self.token_member(cursor, state)
        } else {
            self.token_base(cursor, state)
        };

        if classification.style == Style::Delimiter && cursor.current() == "." && cursor.eol() {
            classification = Classification::failed(
                Style::Error,
                LexError::InvalidMemberAccess {
                    text: String::new(),
                },
            );
        }

        state.last_token = Some(Token::new(classification.style, cursor.current()));
        classification
    }

    /// Called by the host instead of [Lexer::token] for a line with no text.
    pub fn blank_line(&self, state: &mut LexerState) {
        state.begin_line();
    }

    /// Indent width for a new line whose text (after the cursor) is `text_after`.
    pub fn indent(&self, state: &LexerState, text_after: &str) -> usize {
        indent_width(self.tables, state, text_after, self.config.indent_unit)
    }

    fn token_member<C: LineCursor>(&self, cursor: &mut C, state: &mut LexerState) -> Classification {
        let snapshot = state.nesting_snapshot();
        let base = self.token_base(cursor, state);
        state.restore_nesting(snapshot);

        match members::reclassify(self.tables, base.style, cursor.current()) {
            Some(style) => Classification::of(style),
            None => Classification::failed(
                Style::Error,
                LexError::InvalidMemberAccess {
                    text: cursor.current().to_string(),
                },
            ),
        }
    }

    fn token_base<C: LineCursor>(&self, cursor: &mut C, state: &mut LexerState) -> Classification {
        if cursor.eat_space() || cursor.eol() {
            return Classification::of(Style::Whitespace);
        }

        for rule in BASE_RULES {
            if let Some(classification) = self.apply(rule, cursor, state) {
                return classification;
            }
        }

        match cursor.next() {
            Some(ch) => Classification::failed(Style::Error, LexError::UnrecognizedCharacter(ch)),
            None => Classification::of(Style::Whitespace),
        }
    }

    fn apply<C: LineCursor>(
        &self,
        rule: Rule,
        cursor: &mut C,
        state: &mut LexerState,
    ) -> Option<Classification> {
        let tables = self.tables;
        let style = match rule {
            Rule::Comment => {
                if cursor.peek() == Some('\'') || eat_word(cursor, &tables.comment_words) {
                    cursor.skip_to_end();
                    Some(Style::Comment)
                } else {
                    None
                }
            }
            Rule::Number => numbers::match_number(cursor),
            Rule::StringOpen => {
                let delimiter = tables
                    .string_delimiters()
                    .iter()
                    .find(|d| cursor.match_str(&d.text, true, false))?;
                log::trace!("string opened by {:?}", delimiter.text);
                state.mode = Mode::InString {
                    delimiter: delimiter.clone(),
                };
                return Some(strings::token_string(tables, &self.config, cursor, state));
            }
            Rule::Operator => pattern(cursor, &keywords::DOUBLE_OPERATORS, Style::Operator)
                .or_else(|| pattern(cursor, &keywords::SINGLE_OPERATORS, Style::Operator)),
            Rule::WordOperator => word(cursor, &tables.word_operators, Style::Operator),
            Rule::Delimiter => pattern(cursor, &keywords::SINGLE_DELIMITERS, Style::Delimiter),
            Rule::Bracket => pattern(cursor, &keywords::BRACKETS, Style::Bracket),
            Rule::NoIndent => {
                let style = word(cursor, &tables.no_indent, Style::KeywordOperator)?;
                state.mark_inline();
                Some(style)
            }
            Rule::InlineOpener => {
                let style = word(cursor, &tables.self_closing_openers, Style::Keyword)?;
                state.open_inline_block();
                Some(style)
            }
            Rule::Opener => {
                let style = word(cursor, &tables.openers, Style::Keyword).or_else(|| {
                    word(cursor, &tables.control_openers, Style::KeywordOperator)
                })?;
                state.open_block();
                Some(style)
            }
            Rule::MiddleControl => word(cursor, &tables.middle_control, Style::KeywordOperator),
            Rule::DoubleCloser => {
                if !eat_word(cursor, &tables.double_closers) {
                    return None;
                }
                cursor.eat_while(|c| c == ' ' || c == '\t');
                let style = if peek_word(cursor, &tables.control_openers) {
                    Style::KeywordOperator
                } else {
                    Style::Keyword
                };
                state.dedent();
                state.dedent();
                Some(style)
            }
            Rule::FusedCloser => {
                let style = word(cursor, &tables.closers, Style::Keyword).or_else(|| {
                    word(cursor, &tables.control_closers, Style::KeywordOperator)
                })?;
                state.close_block();
                Some(style)
            }
            Rule::Type => word(cursor, &tables.types, Style::Type),
            Rule::RokuType => pattern(cursor, &keywords::ROKU_TYPE, Style::Type),
            Rule::Keyword => word(cursor, &tables.keywords, Style::Keyword),
            Rule::Atom => word(cursor, &tables.atoms, Style::Constant),
            Rule::KnownMember => word(cursor, &tables.known_members, Style::IdentifierMember),
            Rule::BuiltinFunction => word(cursor, &tables.builtin_functions, Style::BuiltinFunction),
            Rule::BuiltinObject => word(cursor, &tables.builtin_objects, Style::BuiltinObject),
            Rule::FunctionCall => {
                let rest = cursor.rest();
                let is_call = keywords::IDENTIFIER
                    .find(rest)
                    .is_some_and(|m| rest[m.end()..].starts_with('('));
                if is_call {
                    pattern(cursor, &keywords::IDENTIFIER, Style::IdentifierMember)
                } else {
                    None
                }
            }
            Rule::Identifier => pattern(cursor, &keywords::IDENTIFIER, Style::Identifier),
        };
        style.map(Classification::of)
    }
}
