//! Markdown formatting shortcuts applied around the selection.

use crate::editor::EditorBuffer;

/// A toolbar formatting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Bold,
    Italic,
    Code,
    Link,
    Image,
    Heading,
    Quote,
    BulletList,
    OrderedList,
    Table,
}

impl FormatAction {
    /// Toolbar order, bound to Alt+1..Alt+0.
    pub const TOOLBAR: [Self; 10] = [
        Self::Bold,
        Self::Italic,
        Self::Code,
        Self::Link,
        Self::Image,
        Self::Heading,
        Self::Quote,
        Self::BulletList,
        Self::OrderedList,
        Self::Table,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
            Self::Heading => "heading",
            Self::Quote => "quote",
            Self::BulletList => "list",
            Self::OrderedList => "numbered",
            Self::Table => "table",
        }
    }

    /// Text inserted before and after the selection.
    pub fn markers(self, selected: &str) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("_", "_"),
            Self::Code if selected.contains('\n') => ("```\n", "\n```"),
            Self::Code => ("`", "`"),
            Self::Link => ("[", "](url)"),
            Self::Image => ("![", "](url)"),
            Self::Heading => ("## ", ""),
            Self::Quote => ("> ", ""),
            Self::BulletList => ("- ", ""),
            Self::OrderedList => ("1. ", ""),
            Self::Table => (
                "| Header 1 | Header 2 |\n|----------|----------|\n| ",
                " | Cell 2 |",
            ),
        }
    }

    /// Wrap the buffer's selection, keeping the original text selected.
    pub fn apply(self, buffer: &mut EditorBuffer) {
        let range = buffer.selection();
        let selected = buffer.selected_text();
        let (before, after) = self.markers(&selected);
        let wrapped = format!("{before}{selected}{after}");
        buffer.replace_range(range.clone(), &wrapped);
        let start = range.start + before.chars().count();
        let end = start + selected.chars().count();
        buffer.set_selection(start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(action: FormatAction, text: &str, start: usize, end: usize) -> EditorBuffer {
        let mut buf = EditorBuffer::from_text(text);
        buf.set_selection(start, end);
        action.apply(&mut buf);
        buf
    }

    #[test]
    fn test_bold_wraps_selection_and_keeps_it_selected() {
        let buf = apply(FormatAction::Bold, "say hello now", 4, 9);
        assert_eq!(buf.text(), "say **hello** now");
        assert_eq!(buf.selection(), 6..11);
        assert_eq!(buf.selected_text(), "hello");
    }

    #[test]
    fn test_italic_with_empty_selection_places_caret_inside() {
        let buf = apply(FormatAction::Italic, "ab", 1, 1);
        assert_eq!(buf.text(), "a__b");
        assert_eq!(buf.caret(), 2);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_code_uses_fence_for_multiline_selection() {
        let buf = apply(FormatAction::Code, "a\nb", 0, 3);
        assert_eq!(buf.text(), "```\na\nb\n```");
        let buf = apply(FormatAction::Code, "ab", 0, 2);
        assert_eq!(buf.text(), "`ab`");
    }

    #[test]
    fn test_link_and_image_templates() {
        assert_eq!(apply(FormatAction::Link, "site", 0, 4).text(), "[site](url)");
        assert_eq!(apply(FormatAction::Image, "pic", 0, 3).text(), "![pic](url)");
    }

    #[test]
    fn test_line_prefixes() {
        assert_eq!(apply(FormatAction::Heading, "T", 0, 1).text(), "## T");
        assert_eq!(apply(FormatAction::Quote, "q", 0, 1).text(), "> q");
        assert_eq!(apply(FormatAction::BulletList, "i", 0, 1).text(), "- i");
        assert_eq!(apply(FormatAction::OrderedList, "i", 0, 1).text(), "1. i");
    }

    #[test]
    fn test_table_template_wraps_selection_as_first_cell() {
        let buf = apply(FormatAction::Table, "x", 0, 1);
        assert_eq!(
            buf.text(),
            "| Header 1 | Header 2 |\n|----------|----------|\n| x | Cell 2 |"
        );
        assert_eq!(buf.selected_text(), "x");
    }

    #[test]
    fn test_multibyte_selection_offsets() {
        let buf = apply(FormatAction::Bold, "é ü", 2, 3);
        assert_eq!(buf.text(), "é **ü**");
        assert_eq!(buf.selected_text(), "ü");
    }
}
