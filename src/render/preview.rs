//! Preview model: styled logical lines built from the comrak AST.
//!
//! Lines are not wrapped here; the UI wraps them to the pane width.

use comrak::nodes::{AstNode, ListType, NodeValue};
use unicode_width::UnicodeWidthStr;

/// Inline styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl PreviewSpan {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// What kind of block a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Heading(u8),
    Paragraph,
    CodeBlock,
    Quote,
    ListItem,
    Rule,
    TableHeader,
    TableRow,
    Html,
}

/// One logical preview line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub kind: LineKind,
    /// Prefix repeated on wrapped continuation lines (quote bars, list indent).
    pub indent: String,
    pub spans: Vec<PreviewSpan>,
}

impl PreviewLine {
    fn empty() -> Self {
        Self {
            kind: LineKind::Empty,
            indent: String::new(),
            spans: Vec::new(),
        }
    }

    fn plain(kind: LineKind, indent: &str, text: impl Into<String>) -> Self {
        Self {
            kind,
            indent: indent.to_string(),
            spans: vec![PreviewSpan::new(text, SpanStyle::default())],
        }
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// The rendered preview as a list of logical lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDocument {
    lines: Vec<PreviewLine>,
}

impl PreviewDocument {
    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    /// Plain text of the preview, one logical line per row.
    pub fn plain_text(&self) -> String {
        let mut out = self
            .lines
            .iter()
            .map(PreviewLine::text)
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out
    }
}

pub(super) fn build<'a>(root: &'a AstNode<'a>, hard_breaks: bool) -> PreviewDocument {
    let mut builder = Builder {
        lines: Vec::new(),
        hard_breaks,
    };
    builder.block(root, "", "");
    while builder.lines.last().is_some_and(|l| l.kind == LineKind::Empty) {
        builder.lines.pop();
    }
    PreviewDocument {
        lines: builder.lines,
    }
}

struct Builder {
    lines: Vec<PreviewLine>,
    hard_breaks: bool,
}

impl Builder {
    /// `first` prefixes the block's first line; `rest` every following line.
    fn block<'a>(&mut self, node: &'a AstNode<'a>, first: &str, rest: &str) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                self.separate();
                self.inline_block(node, LineKind::Heading(heading.level), first, rest);
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::Paragraph => {
                self.inline_block(node, LineKind::Paragraph, first, rest);
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::CodeBlock(code) => {
                let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
                for (i, line) in literal.split('\n').enumerate() {
                    let prefix = if i == 0 { first } else { rest };
                    self.lines
                        .push(PreviewLine::plain(LineKind::CodeBlock, rest, format!("{prefix}{line}")));
                }
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::HtmlBlock(html) => {
                for (i, line) in html.literal.trim_end().lines().enumerate() {
                    let prefix = if i == 0 { first } else { rest };
                    self.lines
                        .push(PreviewLine::plain(LineKind::Html, rest, format!("{prefix}{line}")));
                }
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::ThematicBreak => {
                self.lines
                    .push(PreviewLine::plain(LineKind::Rule, rest, format!("{first}{}", "─".repeat(24))));
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::BlockQuote => {
                let first = format!("{first}│ ");
                let rest = format!("{rest}│ ");
                self.children(node, &first, &rest);
                self.trim_trailing_empty();
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::List(list) => {
                let mut number = list.start;
                for (i, item) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => {
                            let marker = format!("{number}. ");
                            number += 1;
                            marker
                        }
                    };
                    let task = task_marker(item);
                    let marker = format!("{marker}{task}");
                    let item_first = format!("{}{marker}", if i == 0 { first } else { rest });
                    let item_rest = format!("{rest}{}", " ".repeat(marker.width()));
                    self.list_item(item, &item_first, &item_rest);
                }
                if !list.tight {
                    self.trim_trailing_empty();
                }
                self.lines.push(PreviewLine::empty());
            }
            NodeValue::Table(_) => {
                self.table(node, first);
                self.lines.push(PreviewLine::empty());
            }
            _ => self.children(node, first, rest),
        }
    }

    fn children<'a>(&mut self, node: &'a AstNode<'a>, first: &str, rest: &str) {
        for (i, child) in node.children().enumerate() {
            self.block(child, if i == 0 { first } else { rest }, rest);
        }
    }

    fn list_item<'a>(&mut self, item: &'a AstNode<'a>, first: &str, rest: &str) {
        let start = self.lines.len();
        for (i, child) in item.children().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                self.inline_block(child, LineKind::ListItem, prefix, rest);
            } else {
                self.block(child, prefix, rest);
                self.trim_trailing_empty();
            }
        }
        if self.lines.len() == start {
            self.lines
                .push(PreviewLine::plain(LineKind::ListItem, rest, first.to_string()));
        }
    }

    fn table<'a>(&mut self, node: &'a AstNode<'a>, prefix: &str) {
        let rows: Vec<(bool, Vec<String>)> = node
            .children()
            .filter_map(|row| {
                let header = match row.data.borrow().value {
                    NodeValue::TableRow(header) => header,
                    _ => return None,
                };
                let cells = row.children().map(plain_text).collect();
                Some((header, cells))
            })
            .collect();
        let columns = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for (_, cells) in &rows {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        for (header, cells) in rows {
            let text = (0..columns)
                .map(|i| {
                    let cell = cells.get(i).map_or("", String::as_str);
                    let pad = widths[i].saturating_sub(cell.width());
                    format!(" {cell}{} ", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("│");
            let kind = if header {
                LineKind::TableHeader
            } else {
                LineKind::TableRow
            };
            self.lines
                .push(PreviewLine::plain(kind, prefix, format!("{prefix}{text}")));
            if header {
                let rule = widths
                    .iter()
                    .map(|w| "─".repeat(w + 2))
                    .collect::<Vec<_>>()
                    .join("┼");
                self.lines
                    .push(PreviewLine::plain(LineKind::TableRow, prefix, format!("{prefix}{rule}")));
            }
        }
    }

    /// Emit an inline container as one or more lines, split on line breaks.
    fn inline_block<'a>(&mut self, node: &'a AstNode<'a>, kind: LineKind, first: &str, rest: &str) {
        let mut spans = Vec::new();
        for child in node.children() {
            collect_inline(child, SpanStyle::default(), self.hard_breaks, &mut spans);
        }
        let mut current = vec![PreviewSpan::new(first, SpanStyle::default())];
        for span in spans {
            if span.text == "\n" {
                self.push_line(kind, rest, std::mem::take(&mut current));
                current.push(PreviewSpan::new(rest, SpanStyle::default()));
            } else {
                current.push(span);
            }
        }
        self.push_line(kind, rest, current);
    }

    fn push_line(&mut self, kind: LineKind, indent: &str, spans: Vec<PreviewSpan>) {
        let spans = spans.into_iter().filter(|s| !s.text.is_empty()).collect();
        self.lines.push(PreviewLine {
            kind,
            indent: indent.to_string(),
            spans,
        });
    }

    /// Keep headings visually separated from what precedes them.
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|l| l.kind != LineKind::Empty) {
            self.lines.push(PreviewLine::empty());
        }
    }

    fn trim_trailing_empty(&mut self) {
        while self.lines.last().is_some_and(|l| l.kind == LineKind::Empty) {
            self.lines.pop();
        }
    }
}

fn task_marker<'a>(item: &'a AstNode<'a>) -> &'static str {
    match item.data.borrow().value {
        NodeValue::TaskItem(Some(_)) => "[x] ",
        NodeValue::TaskItem(None) => "[ ] ",
        _ => "",
    }
}

fn collect_inline<'a>(
    node: &'a AstNode<'a>,
    style: SpanStyle,
    hard_breaks: bool,
    spans: &mut Vec<PreviewSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        NodeValue::Text(t) => {
            spans.push(PreviewSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            next.code = true;
            spans.push(PreviewSpan::new(code.literal.clone(), next));
            return;
        }
        NodeValue::Image(image) => {
            let alt = plain_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            spans.push(PreviewSpan::new(format!("[image: {label}]"), style));
            return;
        }
        NodeValue::LineBreak => {
            spans.push(PreviewSpan::new("\n", style));
            return;
        }
        NodeValue::SoftBreak => {
            let text = if hard_breaks { "\n" } else { " " };
            spans.push(PreviewSpan::new(text, style));
            return;
        }
        NodeValue::HtmlInline(_) => return,
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline(child, next, hard_breaks, spans);
    }
}

fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline(child, SpanStyle::default(), false, &mut spans);
    }
    spans.into_iter().map(|s| s.text).collect()
}
