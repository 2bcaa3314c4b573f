//! Dot-member reclassification
//!
//! BrightScript allows member access on builtin objects and on names that are keywords
//! elsewhere (`m.global`, `list.next()`, `node.end`). The token right after a `.` is lexed
//! normally and then restyled here: known member names become members, builtin and keyword
//! styles drop to plain identifiers, and anything that cannot name a member is an error.

use crate::brs::keywords::KeywordTables;
use crate::brs::token::Style;

/// Restyle the token that follows a `.`. Returns `None` for an invalid member access.
pub(super) fn reclassify(tables: &KeywordTables, style: Style, text: &str) -> Option<Style> {
    if tables.is_known_member(text.trim_start_matches('.').trim_end()) {
        return Some(Style::IdentifierMember);
    }
    match style {
        Style::Identifier | Style::IdentifierMember => Some(style),
        Style::BuiltinFunction | Style::BuiltinObject | Style::Keyword | Style::KeywordOperator => {
            Some(Style::Identifier)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_member_wins() {
        let tables = KeywordTables::brightscript();
        assert_eq!(
            reclassify(tables, Style::KeywordOperator, "next"),
            Some(Style::IdentifierMember)
        );
        assert_eq!(
            reclassify(tables, Style::Identifier, "Push"),
            Some(Style::IdentifierMember)
        );
    }

    #[test]
    fn test_builtins_and_keywords_downgrade() {
        let tables = KeywordTables::brightscript();
        assert_eq!(
            reclassify(tables, Style::BuiltinObject, "global"),
            Some(Style::Identifier)
        );
        assert_eq!(
            reclassify(tables, Style::BuiltinFunction, "len"),
            Some(Style::Identifier)
        );
        assert_eq!(reclassify(tables, Style::Keyword, "print"), Some(Style::Identifier));
    }

    #[test]
    fn test_identifiers_keep_their_style() {
        let tables = KeywordTables::brightscript();
        assert_eq!(reclassify(tables, Style::Identifier, "top"), Some(Style::Identifier));
        assert_eq!(
            reclassify(tables, Style::IdentifierMember, "getChild"),
            Some(Style::IdentifierMember)
        );
    }

    #[test]
    fn test_non_identifiers_are_invalid() {
        let tables = KeywordTables::brightscript();
        assert_eq!(reclassify(tables, Style::Number, "5"), None);
        assert_eq!(reclassify(tables, Style::Whitespace, " "), None);
        assert_eq!(reclassify(tables, Style::Type, "string"), None);
        assert_eq!(reclassify(tables, Style::Constant, "true"), None);
    }
}
