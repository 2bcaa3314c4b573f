//! Indentation engine
//!
//!     The nesting counter is a side effect of classification: block openers raise it and
//!     closers lower it as they are lexed. Nothing else touches it, so whitespace, strings and
//!     comments are invisible to indentation.
//!
//!     Two pieces of state keep inline constructs from skewing the counter:
//!
//!         single_line_block_flag  Set once the line is known to close its own block (`do`,
//!                                 `library`). The next opener or fused closer on the same
//!                                 line consumes the flag instead of moving the counter.
//!
//!         pending_line_indent_delta
//!                                 Folded into the counter when the next line starts. Openers
//!                                 move the counter as soon as they are lexed, even at the end
//!                                 of a line, so the classification rules leave this at zero.
//!
//! Two-word closers
//!
//!     `end` decrements twice. The block word that follows it (`if`, `while`, `sub`, ...) is an
//!     opener and re-increments when it is lexed, so `end if` nets one level while a bare `end`
//!     nets two. Golden tests pin this down.
//!
//! Indent computation
//!
//!     [indent_width] is pure. Lines that start with a closer or a continuation word (`else`,
//!     `catch`) sit one level out from their block; everything else sits at the current depth.

use super::state::LexerState;
use crate::brs::keywords::KeywordTables;

impl LexerState {
    pub(super) fn begin_line(&mut self) {
        if self.pending_line_indent_delta != 0 {
            log::trace!(
                "folding pending indent {} into {}",
                self.pending_line_indent_delta,
                self.current_indent
            );
        }
        self.current_indent += self.pending_line_indent_delta;
        self.pending_line_indent_delta = 0;
        self.single_line_block_flag = false;
        self.last_token = None;
        if let super::Mode::InString { delimiter } = &self.mode {
            if delimiter.is_single_char() {
                self.mode = super::Mode::Base;
            }
        }
    }

    pub(super) fn indent(&mut self) {
        self.current_indent += 1;
        log::trace!("indent -> {}", self.current_indent);
    }

    pub(super) fn dedent(&mut self) {
        self.current_indent -= 1;
        log::trace!("dedent -> {}", self.current_indent);
    }

    /// Opener that honors an inline form earlier on the line.
    pub(super) fn open_block(&mut self) {
        if self.single_line_block_flag {
            self.single_line_block_flag = false;
        } else {
            self.indent();
        }
    }

    /// Opener that makes the rest of the line inline.
    pub(super) fn open_inline_block(&mut self) {
        if !self.single_line_block_flag {
            self.indent();
        }
        self.single_line_block_flag = true;
    }

    /// Fused closer that honors an inline form earlier on the line.
    pub(super) fn close_block(&mut self) {
        if self.single_line_block_flag {
            self.single_line_block_flag = false;
        } else {
            self.dedent();
        }
    }

    pub(super) fn mark_inline(&mut self) {
        self.single_line_block_flag = true;
    }

    pub(super) fn nesting_snapshot(&self) -> (i32, i32, bool) {
        (
            self.current_indent,
            self.pending_line_indent_delta,
            self.single_line_block_flag,
        )
    }

    pub(super) fn restore_nesting(&mut self, snapshot: (i32, i32, bool)) {
        let (current, pending, flag) = snapshot;
        self.current_indent = current;
        self.pending_line_indent_delta = pending;
        self.single_line_block_flag = flag;
    }
}

/// Indent width for a line about to be typed, given the text after the cursor.
pub fn indent_width(
    tables: &KeywordTables,
    state: &LexerState,
    text_after: &str,
    indent_unit: usize,
) -> usize {
    let text = text_after.trim();
    let depth = if tables.starts_with_dedent_word(text) {
        state.effective_indent() - 1
    } else {
        state.effective_indent()
    };
    depth.max(0) as usize * indent_unit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(depth: i32) -> LexerState {
        LexerState {
            current_indent: depth,
            ..LexerState::default()
        }
    }

    #[test]
    fn test_plain_line_uses_current_depth() {
        let tables = KeywordTables::brightscript();
        assert_eq!(indent_width(tables, &state_at(2), "print x", 4), 8);
    }

    #[test]
    fn test_closers_and_continuations_sit_one_level_out() {
        let tables = KeywordTables::brightscript();
        for text in ["end if", "endif", "  else", "else if y then", "catch e", "next", "end"] {
            assert_eq!(indent_width(tables, &state_at(2), text, 4), 4, "{text}");
        }
    }

    #[test]
    fn test_negative_depth_clamps_to_zero() {
        let tables = KeywordTables::brightscript();
        assert_eq!(indent_width(tables, &state_at(-3), "x = 1", 4), 0);
        assert_eq!(indent_width(tables, &state_at(0), "end sub", 4), 0);
    }

    #[test]
    fn test_pending_delta_counts_toward_next_line() {
        let tables = KeywordTables::brightscript();
        let mut state = LexerState {
            current_indent: 1,
            pending_line_indent_delta: 1,
            ..LexerState::default()
        };
        assert_eq!(indent_width(tables, &state, "x = 1", 2), 4);
        state.begin_line();
        assert_eq!(state.current_indent(), 2);
        assert_eq!(state.pending_line_indent_delta(), 0);
    }

    #[test]
    fn test_open_then_two_word_close_restores_depth() {
        let mut state = state_at(1);
        state.open_block();
        state.dedent();
        state.dedent();
        state.open_block();
        assert_eq!(state.current_indent(), 1);
        assert_eq!(state.pending_line_indent_delta(), 0);
    }

    #[test]
    fn test_inline_flag_suppresses_one_change() {
        let mut state = state_at(0);
        state.open_inline_block();
        assert_eq!(state.current_indent(), 1);
        state.open_block();
        assert_eq!(state.current_indent(), 1);
        assert!(!state.single_line_block_flag());
        state.close_block();
        assert_eq!(state.current_indent(), 0);
    }

    #[test]
    fn test_begin_line_clears_line_scoped_state() {
        let mut state = state_at(0);
        state.mark_inline();
        state.begin_line();
        assert!(!state.single_line_block_flag());
        assert!(state.last_token().is_none());
    }
}
