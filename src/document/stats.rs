//! Word/character counts and caret position.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Counts shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Maximal runs of Unicode word characters.
    pub words: usize,
    /// Length in UTF-16 code units.
    pub chars: usize,
}

impl TextStats {
    pub fn compute(text: &str) -> Self {
        Self {
            words: WORD.find_iter(text).count(),
            chars: utf16_len(text),
        }
    }
}

/// One-based caret position for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    /// Counted in UTF-16 code units, like the character count.
    pub column: usize,
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Position of the caret on zero-based line `line_idx`, given the part of
/// that line before the caret.
pub fn cursor_position(line_idx: usize, line_before_caret: &str) -> CursorPosition {
    CursorPosition {
        line: line_idx + 1,
        column: utf16_len(line_before_caret) + 1,
    }
}

pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
