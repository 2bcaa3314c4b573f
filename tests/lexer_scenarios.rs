//! Scenario tests for the BrightScript lexer
//!
//! Each test drives the lexer line by line through the shared testing helpers, the same loop
//! the editor runs, and checks styles or the nesting counter afterwards.

use brs_lexer::brs::config::LexerConfig;
use brs_lexer::brs::lexing::Lexer;
use brs_lexer::brs::testing::{lex_line, lex_lines, significant};
use brs_lexer::brs::token::Style;
use rstest::rstest;

fn first_token(line: &str) -> (Style, String) {
    let lexer = Lexer::default();
    let mut state = lexer.start_state();
    significant(&lex_line(&lexer, &mut state, line))
        .into_iter()
        .next()
        .expect("line to produce a token")
}

#[rstest]
#[case("&HFF", Style::NumberHex)]
#[case("&o755", Style::NumberOctal)]
#[case("10.", Style::NumberFloat)]
#[case("3.14159#", Style::NumberFloat)]
#[case("0", Style::Number)]
#[case("42&", Style::Number)]
fn test_numeric_literal_is_one_token(#[case] text: &str, #[case] style: Style) {
    assert_eq!(first_token(text), (style, text.to_string()));
}

#[test]
fn test_letter_after_digits_is_not_a_number() {
    let (style, _) = first_token("123abc");
    assert!(!style.is_number());
}

#[test]
fn test_block_indent_with_two_column_unit() {
    let lexer = Lexer::brightscript(LexerConfig {
        indent_unit: 2,
        ..LexerConfig::default()
    });
    let mut state = lexer.start_state();
    lex_line(&lexer, &mut state, "if x then");
    assert_eq!(lexer.indent(&state, "  print 1"), 2);
    lex_line(&lexer, &mut state, "  print 1");
    assert_eq!(lexer.indent(&state, "end if"), 0);
    lex_line(&lexer, &mut state, "end if");
    assert_eq!(state.current_indent(), 0);
}

#[rstest]
#[case("for i = 1 to 3 : print i : next")]
#[case("while x : end while")]
#[case("if done then exit while : endif")]
#[case("library \"v30/bslCore.brs\"")]
fn test_same_line_construct_leaves_depth_unchanged(#[case] line: &str) {
    let lexer = Lexer::default();
    let (_, state) = lex_lines(&lexer, &["sub main()", line]);
    assert_eq!(state.current_indent(), 1, "{line}");
    assert_eq!(state.pending_line_indent_delta(), 0, "{line}");
    assert_eq!(lexer.indent(&state, "x = 1"), 4, "{line}");
}

#[test]
fn test_opener_at_end_of_line_counts_immediately() {
    let lexer = Lexer::default();
    let mut state = lexer.start_state();
    lex_line(&lexer, &mut state, "while true");
    assert_eq!(state.current_indent(), 1);
    assert_eq!(state.pending_line_indent_delta(), 0);

    let (_, state) = lex_lines(&lexer, &["x = 1 : end while"]);
    assert_eq!(state.current_indent(), -1);
    assert_eq!(state.pending_line_indent_delta(), 0);
}

#[test]
fn test_inline_loop_in_sub_keeps_depth_across_lines() {
    let lexer = Lexer::default();
    let mut state = lexer.start_state();
    lex_line(&lexer, &mut state, "sub main()");
    let before = state.current_indent();
    lex_line(&lexer, &mut state, "while x : end while");
    assert_eq!(state.current_indent(), before);
    lex_line(&lexer, &mut state, "print x");
    assert_eq!(state.current_indent(), before);
}

#[test]
fn test_member_access_on_builtin_object() {
    let lexer = Lexer::default();
    let mut state = lexer.start_state();
    let tokens = significant(&lex_line(&lexer, &mut state, "m.global"));
    assert_eq!(
        tokens,
        vec![
            (Style::BuiltinObject, "m".to_string()),
            (Style::Delimiter, ".".to_string()),
            (Style::Identifier, "global".to_string()),
        ]
    );
}

#[rstest]
#[case("list.Next()", Style::IdentifierMember)]
#[case("node.print", Style::Identifier)]
#[case("obj.len", Style::Identifier)]
#[case("a.b", Style::Identifier)]
#[case("a.\"s\"", Style::Error)]
fn test_member_reclassification(#[case] line: &str, #[case] style: Style) {
    let lexer = Lexer::default();
    let mut state = lexer.start_state();
    let tokens = significant(&lex_line(&lexer, &mut state, line));
    assert_eq!(tokens[2].0, style, "{line}");
}

#[test]
fn test_doubled_quote_string_is_one_token() {
    let line = r#""he said ""hi""""#;
    assert_eq!(first_token(line), (Style::String, line.to_string()));
}

#[test]
fn test_string_cannot_leak_into_next_line() {
    let lexer = Lexer::default();
    let (lines, state) = lex_lines(&lexer, &["x = \"open", "if y then"]);
    assert_eq!(lines[0].last().map(|t| t.style), Some(Style::String));
    assert_eq!(significant(&lines[1])[0], (Style::KeywordOperator, "if".to_string()));
    assert_eq!(state.current_indent(), 1);
}

/// `end` decrements twice and the block word after it re-increments, so a bare `end` drops two
/// levels while `end if` and `endif` drop one.
#[rstest]
#[case("endif", 0)]
#[case("end if", 0)]
#[case("end", -1)]
fn test_closer_forms(#[case] closer: &str, #[case] depth: i32) {
    let lexer = Lexer::default();
    let (_, state) = lex_lines(&lexer, &["if x then", "y = 1", closer, ""]);
    assert_eq!(state.current_indent(), depth);
}

#[test]
fn test_bare_end_clamps_indent_at_zero() {
    let lexer = Lexer::default();
    let (_, state) = lex_lines(&lexer, &["if x then", "end"]);
    assert_eq!(lexer.indent(&state, "print 1"), 0);
}

#[test]
fn test_member_named_like_closer_does_not_dedent() {
    let lexer = Lexer::default();
    let (_, state) = lex_lines(&lexer, &["for each n in nodes", "n.next()", "n.end = 1"]);
    assert_eq!(state.current_indent(), 1);
}

#[rstest]
#[case("else", 4)]
#[case("else if y then", 4)]
#[case("catch e", 4)]
#[case("return x", 8)]
#[case("exit for", 8)]
fn test_continuation_words(#[case] line: &str, #[case] width: usize) {
    let lexer = Lexer::default();
    let (_, state) = lex_lines(&lexer, &["sub main()", "if x then"]);
    assert_eq!(lexer.indent(&state, line), width);
}

#[test]
fn test_case_insensitive_keywords() {
    assert_eq!(first_token("END IF"), (Style::KeywordOperator, "END ".to_string()));
    assert_eq!(first_token("Function"), (Style::Keyword, "Function".to_string()));
    assert_eq!(first_token("PRINT"), (Style::Keyword, "PRINT".to_string()));
}
