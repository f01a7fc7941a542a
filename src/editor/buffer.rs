use std::ops::Range;

use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in chars from the start of the line.
    pub col: usize,
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// The caret is a char index into the rope. An optional anchor marks the
/// other end of a selection; the selection is always `min..max` of the two.
pub struct EditorBuffer {
    rope: Rope,
    caret: usize,
    anchor: Option<usize>,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            caret: 0,
            anchor: None,
            col_memory: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Char index where `line_idx` starts, clamped to the last line.
    pub fn line_start(&self, line_idx: usize) -> usize {
        let last = self.rope.len_lines().saturating_sub(1);
        self.rope.line_to_char(line_idx.min(last))
    }

    /// The caret as a char index.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// The caret as a line/column pair.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.caret);
        let col = self.caret - self.rope.line_to_char(line);
        Cursor { line, col }
    }

    /// The selected char range; empty (`caret..caret`) when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) => anchor.min(self.caret)..anchor.max(self.caret),
            None => self.caret..self.caret,
        }
    }

    /// Whether a non-empty selection is active.
    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// The currently selected text.
    pub fn selected_text(&self) -> String {
        let range = self.selection();
        self.rope.slice(range).to_string()
    }

    /// Select `start..end` (char indices), leaving the caret at `end`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.min(len);
        self.anchor = (start != end).then_some(start);
        self.set_caret(end);
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.len_chars());
    }

    /// Drop the selection without moving the caret.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Replace the whole buffer, caret at the start.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.anchor = None;
        self.set_caret(0);
    }

    /// Replace `range` (char indices) with `text`, caret after the inserted text.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.anchor = None;
        self.set_caret(start + text.chars().count());
    }

    /// Insert a character at the caret, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp));
    }

    /// Insert a string at the caret, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        let range = self.selection();
        if s.is_empty() && range.is_empty() {
            return;
        }
        self.replace_range(range, s);
    }

    /// Split the current line at the caret (Enter key).
    pub fn split_line(&mut self) {
        self.insert_str("\n");
    }

    /// Delete the selection or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.has_selection() {
            self.replace_range(self.selection(), "");
            return true;
        }
        if self.caret == 0 {
            return false;
        }
        self.replace_range(self.caret - 1..self.caret, "");
        true
    }

    /// Delete the selection or the character at the caret (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            self.replace_range(self.selection(), "");
            return true;
        }
        if self.caret >= self.len_chars() {
            return false;
        }
        self.replace_range(self.caret..self.caret + 1, "");
        true
    }

    /// Move the caret in the given direction, extending the selection when `extend` is set.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        self.begin_motion(extend);
        match direction {
            Direction::Left => self.set_caret(self.caret.saturating_sub(1)),
            Direction::Right => self.set_caret((self.caret + 1).min(self.len_chars())),
            Direction::Up => self.move_vertical(-1),
            Direction::Down => self.move_vertical(1),
        }
    }

    /// Move caret to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        self.begin_motion(extend);
        let line = self.cursor().line;
        self.set_caret(self.rope.line_to_char(line));
    }

    /// Move caret to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        let line = self.cursor().line;
        self.set_caret(self.rope.line_to_char(line) + self.line_len(line));
    }

    /// Move caret one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.begin_motion(false);
        let mut idx = self.caret;
        while idx > 0 && !is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        self.set_caret(idx);
    }

    /// Move caret one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.begin_motion(false);
        let len = self.len_chars();
        let mut idx = self.caret;
        while idx < len && is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        while idx < len && !is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        self.set_caret(idx);
    }

    /// Move caret to a specific line and column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.begin_motion(false);
        let line = line.min(self.line_count().saturating_sub(1));
        let col = col.min(self.line_len(line));
        self.set_caret(self.rope.line_to_char(line) + col);
    }

    /// Move caret to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self) {
        self.begin_motion(false);
        self.set_caret(0);
    }

    /// Move caret to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.begin_motion(false);
        self.set_caret(self.len_chars());
    }

    // --- Private helpers ---

    fn begin_motion(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
    }

    fn set_caret(&mut self, idx: usize) {
        self.caret = idx.min(self.len_chars());
        self.col_memory = self.cursor().col;
    }

    fn move_vertical(&mut self, delta: isize) {
        let cursor = self.cursor();
        let Some(target) = cursor.line.checked_add_signed(delta) else {
            return;
        };
        if target >= self.line_count() {
            return;
        }
        let memory = self.col_memory;
        let col = memory.min(self.line_len(target));
        self.caret = self.rope.line_to_char(target) + col;
        self.col_memory = memory;
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("caret", &self.caret)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = EditorBuffer::from_text("héllo\nhi");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 2);
    }

    // --- Editing ---

    #[test]
    fn test_insert_char_advances_caret() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('a');
        buf.insert_char('é');
        assert_eq!(buf.text(), "aé");
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn test_split_line_moves_to_next_line() {
        let mut buf = EditorBuffer::from_text("abcd");
        buf.move_to(0, 2);
        buf.split_line();
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor { line: 1, col: 0 });
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor { line: 0, col: 2 });
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(0, 5);
        buf.insert_str("howdy");
        assert_eq!(buf.text(), "howdy world");
        assert!(!buf.has_selection());
    }

    // --- Movement ---

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = EditorBuffer::from_text("abcdef\nab\nabcdef");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor(), Cursor { line: 1, col: 2 });
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor(), Cursor { line: 2, col: 5 });
    }

    #[test]
    fn test_shift_movement_extends_selection() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        assert_eq!(buf.selection(), 0..2);
        assert_eq!(buf.selected_text(), "he");
        buf.move_cursor(Direction::Right, false);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_word_motion() {
        let mut buf = EditorBuffer::from_text("foo, bar_baz qux");
        buf.move_word_right();
        assert_eq!(buf.caret(), 5);
        buf.move_word_right();
        assert_eq!(buf.caret(), 13);
        buf.move_word_left();
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(10, 10);
        assert_eq!(buf.cursor(), Cursor { line: 1, col: 2 });
    }
}
