//! Wrapping preview lines to the pane width.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::render::{LineKind, PreviewDocument, PreviewLine};

use super::style::Palette;

/// Lay the preview out as terminal rows `width` columns wide.
///
/// Prose is word-wrapped and continuation rows repeat the line's indent.
/// Code, tables, rules and raw HTML keep their rows and are clipped instead.
pub fn wrap_preview(doc: &PreviewDocument, width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in doc.lines() {
        let line_style = palette.line(line.kind);
        if preserves_rows(line.kind) {
            rows.push(styled_row(line, line_style, palette));
            continue;
        }
        let mut wrapper = Wrapper::new(width, &line.indent, line_style, &mut rows);
        for span in &line.spans {
            let style = palette.span(line_style, span.style);
            for piece in span.text.split_inclusive(' ') {
                wrapper.push(piece, style);
            }
        }
        wrapper.finish();
    }
    rows
}

const fn preserves_rows(kind: LineKind) -> bool {
    matches!(
        kind,
        LineKind::CodeBlock
            | LineKind::TableHeader
            | LineKind::TableRow
            | LineKind::Rule
            | LineKind::Html
    )
}

fn styled_row(line: &PreviewLine, line_style: Style, palette: &Palette) -> Line<'static> {
    let spans = line
        .spans
        .iter()
        .map(|span| Span::styled(span.text.clone(), palette.span(line_style, span.style)))
        .collect::<Vec<_>>();
    Line::from(spans).style(line_style)
}

struct Wrapper<'a> {
    width: usize,
    indent: &'a str,
    indent_width: usize,
    line_style: Style,
    row: Vec<Span<'static>>,
    used: usize,
    rows: &'a mut Vec<Line<'static>>,
}

impl<'a> Wrapper<'a> {
    fn new(
        width: usize,
        indent: &'a str,
        line_style: Style,
        rows: &'a mut Vec<Line<'static>>,
    ) -> Self {
        Self {
            width,
            indent,
            indent_width: indent.width(),
            line_style,
            row: Vec::new(),
            used: 0,
            rows,
        }
    }

    fn push(&mut self, piece: &str, style: Style) {
        // Trailing spaces may hang past the edge.
        let fit = piece.trim_end_matches(' ').width();
        if self.used + fit > self.width && self.used > self.indent_width {
            self.break_row();
        }
        if self.used + fit <= self.width {
            self.row.push(Span::styled(piece.to_string(), style));
            self.used += piece.width();
            return;
        }
        let mut chunk = String::new();
        for ch in piece.chars() {
            let w = ch.width().unwrap_or(0);
            if self.used + w > self.width && self.used > self.indent_width {
                if !chunk.is_empty() {
                    self.row.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                self.break_row();
            }
            chunk.push(ch);
            self.used += w;
        }
        if !chunk.is_empty() {
            self.row.push(Span::styled(chunk, style));
        }
    }

    fn break_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        self.rows.push(Line::from(row).style(self.line_style));
        if !self.indent.is_empty() {
            self.row
                .push(Span::styled(self.indent.to_string(), self.line_style));
        }
        self.used = self.indent_width;
    }

    fn finish(self) {
        self.rows.push(Line::from(self.row).style(self.line_style));
    }
}
