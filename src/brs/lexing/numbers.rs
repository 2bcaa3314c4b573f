//! Numeric literals
//!
//!     Forms are tried in order: hexadecimal (`&HFF`), octal (`&O17`), floats (`1.5`, `.5`,
//!     `10.`, `1e10`, `1.5D-3`), then integers (`42`, and a bare `0`). Any form may carry one
//!     type suffix character (`%`, `!`, `#`, `&`, `l`, `f`, `d`).
//!
//!     A form only counts if no identifier character follows the literal and its suffix. When
//!     one does, the next form is tried, so `10.x` still yields the integer `10`, while
//!     `123abc` yields no number at all and falls through to the remaining rules.

use crate::brs::stream::LineCursor;
use crate::brs::token::Style;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^&[hH][0-9a-fA-F]+").unwrap());
static OCTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^&[oO][0-7]+").unwrap());
static FLOAT_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+(?:[eEdD][+-]?\d+)?").unwrap());
static FLOAT_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\d+(?:[eEdD][+-]?\d+)?").unwrap());
static FLOAT_TRAILING_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.(?:[eEdD][+-]?\d+)?").unwrap());
static FLOAT_EXPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[eEdD][+-]?\d+").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9]\d*").unwrap());
static ZERO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0").unwrap());

fn is_suffix(ch: char) -> bool {
    matches!(ch, '%' | '!' | '#' | '&' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D')
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Forms in precedence order.
fn forms() -> [(&'static Lazy<Regex>, Style); 8] {
    [
        (&HEX, Style::NumberHex),
        (&OCTAL, Style::NumberOctal),
        (&FLOAT_FULL, Style::NumberFloat),
        (&FLOAT_FRACTION, Style::NumberFloat),
        (&FLOAT_TRAILING_DOT, Style::NumberFloat),
        (&FLOAT_EXPONENT, Style::NumberFloat),
        (&INTEGER, Style::Number),
        (&ZERO, Style::Number),
    ]
}

/// Byte length of the literal (suffix included) if `pattern` yields a standalone number.
fn literal_len(rest: &str, pattern: &Regex) -> Option<usize> {
    let m = pattern.find(rest)?;
    let mut len = m.end();
    let mut tail = rest[len..].chars();
    let mut next = tail.next();
    if let Some(ch) = next.filter(|c| is_suffix(*c)) {
        len += ch.len_utf8();
        next = tail.next();
    }
    match next {
        Some(ch) if is_identifier_char(ch) => None,
        _ => Some(len),
    }
}

/// Consume a numeric literal at the cursor, if one starts there.
pub(super) fn match_number<C: LineCursor>(cursor: &mut C) -> Option<Style> {
    let (len, style) = forms()
        .into_iter()
        .find_map(|(pattern, style)| literal_len(cursor.rest(), pattern).map(|len| (len, style)))?;
    let target = cursor.rest().len() - len;
    while cursor.rest().len() > target {
        cursor.next();
    }
    Some(style)
}
