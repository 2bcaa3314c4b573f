//! Whole-document driver
//!
//!     The lexer is built to be driven by an editor, one line and one token at a time. This
//!     module plays the editor's part for a complete document: it walks the lines in order,
//!     asks for each line's indent before lexing it (the way the editor asks while the line is
//!     being typed), and collects the tokens.
//!
//!     On top of that loop sit [reindent], which rewrites leading whitespace from the computed
//!     indents, and [diagnostics], which lifts the advisory errors out of the token stream.

use crate::brs::lexing::{LexError, Lexer, LexerState};
use crate::brs::stream::{LineCursor, LineStream};
use crate::brs::token::{Style, Token};
use std::fmt;

/// One token with its position on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedToken {
    pub style: Style,
    pub text: String,
    /// Byte offset of the token within its line.
    pub column: usize,
    pub error: Option<LexError>,
}

impl HighlightedToken {
    pub fn to_token(&self) -> Token {
        Token::new(self.style, self.text.clone())
    }
}

/// One lexed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    /// Zero-based line index.
    pub number: usize,
    /// Indent width the engine computed for this line before lexing it.
    pub indent: usize,
    pub tokens: Vec<HighlightedToken>,
}

/// An advisory error located in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub column: usize,
    pub text: String,
    pub error: LexError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line + 1, self.column + 1, self.error)
    }
}

/// Lex one line the way an editor host does, carrying `state` forward.
pub fn tokenize_line(lexer: &Lexer<'_>, state: &mut LexerState, line: &str) -> Vec<HighlightedToken> {
    if line.is_empty() {
        lexer.blank_line(state);
        return Vec::new();
    }

    let mut stream = LineStream::new(line);
    let mut tokens = Vec::new();
    while !stream.eol() {
        stream.start_token();
        let classification = lexer.classify(&mut stream, state);
        if stream.current().is_empty() {
            // Every rule consumes input before the end of the line; bail out rather than spin.
            log::debug!("zero-length token at column {} of {:?}", stream.pos(), line);
            break;
        }
        tokens.push(HighlightedToken {
            style: classification.style,
            text: stream.current().to_string(),
            column: stream.token_start(),
            error: classification.error,
        });
    }
    tokens
}

/// Lex a whole document from a fresh state.
pub fn highlight(lexer: &Lexer<'_>, source: &str) -> Vec<HighlightedLine> {
    let mut state = lexer.start_state();
    source
        .lines()
        .enumerate()
        .map(|(number, line)| {
            let indent = lexer.indent(&state, line);
            let tokens = tokenize_line(lexer, &mut state, line);
            HighlightedLine {
                number,
                indent,
                tokens,
            }
        })
        .collect()
}

/// Rewrite every line's leading whitespace from the computed indents.
///
/// Lines that start inside a multi-line string keep their text untouched. Blank lines become
/// empty. A trailing newline in the source is kept.
pub fn reindent(lexer: &Lexer<'_>, source: &str) -> String {
    let mut state = lexer.start_state();
    let mut out = String::with_capacity(source.len());
    for (index, line) in source.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let rewritten = if state.in_multiline_string() {
            line.to_string()
        } else if line.trim().is_empty() {
            String::new()
        } else {
            let width = lexer.indent(&state, line);
            format!("{}{}", " ".repeat(width), line.trim_start())
        };
        tokenize_line(lexer, &mut state, &rewritten);
        out.push_str(&rewritten);
    }
    if source.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Collect the advisory errors carried by the tokens.
pub fn diagnostics(lines: &[HighlightedLine]) -> Vec<Diagnostic> {
    lines
        .iter()
        .flat_map(|line| {
            line.tokens.iter().filter_map(move |token| {
                token.error.clone().map(|error| Diagnostic {
                    line: line.number,
                    column: token.column,
                    text: token.text.clone(),
                    error,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brs::config::LexerConfig;

    #[test]
    fn test_tokens_cover_the_line() {
        let lexer = Lexer::default();
        let mut state = lexer.start_state();
        let line = "  x = &HFF + foo(1, \"a\") ' done";
        let tokens = tokenize_line(&lexer, &mut state, line);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, line);
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].column + pair[0].text.len(), pair[1].column);
        }
    }

    #[test]
    fn test_blank_lines_produce_no_tokens() {
        let lexer = Lexer::default();
        let lines = highlight(&lexer, "x = 1\n\ny = 2\n");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].tokens.is_empty());
        assert_eq!(lines[2].number, 2);
    }

    #[test]
    fn test_indents_follow_blocks() {
        let lexer = Lexer::brightscript(LexerConfig {
            indent_unit: 2,
            ..LexerConfig::default()
        });
        let lines = highlight(&lexer, "if x then\n  print 1\nend if");
        let indents: Vec<usize> = lines.iter().map(|l| l.indent).collect();
        assert_eq!(indents, vec![0, 2, 0]);
    }

    #[test]
    fn test_reindent() {
        let lexer = Lexer::default();
        let source = "sub main()\nfor i = 1 to 3\nprint i\nnext\n\n   end sub\n";
        let expected = "sub main()\n    for i = 1 to 3\n        print i\n    next\n\nend sub\n";
        assert_eq!(reindent(&lexer, source), expected);
    }

    #[test]
    fn test_reindent_leaves_multiline_strings_alone() {
        use crate::brs::keywords::{KeywordLists, KeywordTables, StringDelimiter};

        let mut lists = KeywordLists::brightscript();
        lists.string_delimiters.push(StringDelimiter::new("\"\"\""));
        let tables = KeywordTables::compile(&lists).unwrap();
        let lexer = Lexer::new(&tables, LexerConfig::default());
        let source = "x = \"\"\"a\n   b\"\"\"\nif y then\nz\nend if";
        let expected = "x = \"\"\"a\n   b\"\"\"\nif y then\n    z\nend if";
        assert_eq!(reindent(&lexer, source), expected);
    }

    #[test]
    fn test_diagnostics_locate_errors() {
        let lexer = Lexer::brightscript(LexerConfig {
            treat_unterminated_string_as_error: true,
            ..LexerConfig::default()
        });
        let lines = highlight(&lexer, "x = 1 ~ 2\nprint \"oops");
        let found = diagnostics(&lines);
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].line, found[0].column), (0, 6));
        assert_eq!(found[0].error, LexError::UnrecognizedCharacter('~'));
        assert_eq!(found[1].line, 1);
        assert_eq!(found[1].text, "\"oops");
        assert_eq!(found[1].to_string(), "2:7: Unterminated string, expected closing \"");
    }
}
