//! # brs-lexer
//!
//! A line-incremental lexer and indentation engine for BrightScript.
//!
//! The lexer is meant to be driven by a text editor: the host keeps one
//! [LexerState](brs::lexing::LexerState) per document, feeds it one line at a time through a
//! [LineCursor](brs::stream::LineCursor), and asks for the indentation of the next line
//! whenever a new line is being composed. Nothing here builds a syntax tree; the output is a
//! stream of classified tokens used for highlighting and the nesting depth used for auto-indent.
//!
//! File Layout
//!
//! src/brs
//!   ├── token        Token styles (the closed classification set)
//!   ├── keywords     Keyword, operator and builtin tables, compiled once
//!   ├── stream       The cursor contract and the line stream implementation
//!   ├── lexing       Classifier, string sub-tokenizer, member reclassifier, indentation
//!   ├── config       Layered configuration loading
//!   ├── highlight    Whole-document driver (highlighting, re-indent, diagnostics)
//!   └── testing      Fixture loading and helpers shared by tests
//!
//! For the testing conventions, see the [testing module](brs::testing).

pub mod brs;
