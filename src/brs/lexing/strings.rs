//! String sub-tokenizer
//!
//!     Entered when a delimiter opens a string; the delimiter is kept in
//!     [Mode::InString](super::Mode) until the string closes. Each call scans the body in
//!     bulk up to the next quote-like character and then decides:
//!
//!         - a doubled single-character delimiter (`""`) is an escaped quote, keep going;
//!         - the delimiter itself closes the string and returns to base mode;
//!         - `${` in an interpolating string ends the current segment; the `${ ... }` part is
//!           returned as its own string-escape token;
//!         - any other quote character is part of the body.
//!
//!     Single-character strings cannot span lines. One that reaches the end of its line (in
//!     the body or inside an unclosed `${`) is either flagged as an error or quietly closed,
//!     depending on [LexerConfig::treat_unterminated_string_as_error](crate::brs::config::LexerConfig).
//!     Multi-character delimiters keep the mode across lines.

use super::common::{Classification, LexError};
use super::state::{LexerState, Mode};
use crate::brs::config::LexerConfig;
use crate::brs::keywords::{KeywordTables, StringDelimiter};
use crate::brs::stream::LineCursor;
use crate::brs::token::Style;

pub(super) fn token_string<C: LineCursor>(
    tables: &KeywordTables,
    config: &LexerConfig,
    cursor: &mut C,
    state: &mut LexerState,
) -> Classification {
    let delimiter = match &state.mode {
        Mode::InString { delimiter } => delimiter.clone(),
        Mode::Base => return Classification::of(Style::String),
    };

    while !cursor.eol() {
        cursor.eat_while(|c| !(tables.is_quote_char(c) || (delimiter.interpolates && c == '$')));
        if cursor.eol() {
            break;
        }

        if delimiter.interpolates && cursor.match_str("${", false, false) {
            if !cursor.current().is_empty() {
                return Classification::of(Style::String);
            }
            cursor.match_str("${", true, false);
            cursor.eat_while(|c| c != '}');
            if !cursor.match_str("}", true, false) && delimiter.is_single_char() {
                return unterminated(config, state, delimiter, Style::StringEscape);
            }
            return Classification::of(Style::StringEscape);
        }

        if cursor.match_str(&delimiter.text, true, false) {
            if delimiter.is_single_char() && cursor.match_str(&delimiter.text, true, false) {
                continue;
            }
            state.mode = Mode::Base;
            log::trace!("string closed by {:?}", delimiter.text);
            return Classification::of(Style::String);
        }

        cursor.next();
    }

    if !delimiter.is_single_char() {
        return Classification::of(Style::String);
    }
    unterminated(config, state, delimiter, Style::String)
}

/// A single-character string reached the end of its line. `lenient` is the style used when
/// the policy quietly closes the string.
fn unterminated(
    config: &LexerConfig,
    state: &mut LexerState,
    delimiter: StringDelimiter,
    lenient: Style,
) -> Classification {
    state.mode = Mode::Base;
    if config.treat_unterminated_string_as_error {
        Classification::failed(
            Style::StringError,
            LexError::UnterminatedString {
                delimiter: delimiter.text,
            },
        )
    } else {
        Classification::of(lenient)
    }
}
