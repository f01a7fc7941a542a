//! The editable document and its persistence bookkeeping.

use crate::editor::EditorBuffer;

use super::stats::{CursorPosition, cursor_position};

/// Seed text for a first run with nothing in the store.
pub const WELCOME_DOCUMENT: &str = r#"# Welcome to mdsplit

Type on the left, read the **live preview** on the right.

## What it does
- Preview refreshes shortly after you stop typing
- Your text is kept in the local store and autosaved
- Export to markdown, HTML or plain text
- Light and dark themes
- Formatting shortcuts

### Markdown examples

Write **bold** or _italic_ text, or `inline code`.

Lists:
- Item 1
- Item 2
  - Nested item

1. First item
2. Second item

```rust
fn main() {
    println!("Hello, World!");
}
```

> Blockquotes work as well.

| Shortcut | Action |
|----------|--------|
| Ctrl+S   | Save   |
| Ctrl+E   | Export |

[Links](https://github.com) are kept in the HTML export.

---

Happy writing! 📝"#;

/// The current text plus the snapshot it was last persisted as.
///
/// `dirty` is set by every mutation and cleared only by [`mark_persisted`],
/// so a clean document always equals its snapshot.
///
/// [`mark_persisted`]: DocumentState::mark_persisted
#[derive(Debug)]
pub struct DocumentState {
    buffer: EditorBuffer,
    dirty: bool,
    last_persisted: String,
}

impl DocumentState {
    /// A clean document whose snapshot equals `text`.
    pub fn clean(text: &str) -> Self {
        Self {
            buffer: EditorBuffer::from_text(text),
            dirty: false,
            last_persisted: text.to_string(),
        }
    }

    /// The current text, read fresh from the buffer.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    /// Mutable access to the buffer for caret movement.
    ///
    /// Text changes made through [`edit`](Self::edit) mark the document dirty;
    /// this accessor does not.
    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    /// Apply a text mutation and mark the document dirty.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut EditorBuffer) -> R) -> R {
        let result = f(&mut self.buffer);
        self.dirty = true;
        result
    }

    /// Replace the whole text (file open, new document).
    pub fn replace_text(&mut self, text: &str) {
        self.edit(|buf| buf.replace_all(text));
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn last_persisted(&self) -> &str {
        &self.last_persisted
    }

    /// Whether the text differs from the last persisted snapshot.
    pub fn differs_from_persisted(&self) -> bool {
        self.buffer.text() != self.last_persisted
    }

    /// Record that `text` was written to the store and clear the dirty flag.
    pub fn mark_persisted(&mut self, text: String) {
        self.last_persisted = text;
        self.dirty = self.differs_from_persisted();
    }

    pub fn cursor_position(&self) -> CursorPosition {
        let buf = &self.buffer;
        let cursor = buf.cursor();
        let before: String = buf
            .text()
            .chars()
            .skip(buf.line_start(cursor.line))
            .take(cursor.col)
            .collect();
        cursor_position(cursor.line, &before)
    }
}
