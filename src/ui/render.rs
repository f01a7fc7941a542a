use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::format::FormatAction;

use super::style::Palette;
use super::{PREVIEW_LEFT_PADDING, status};

/// Screen regions for one frame. Pane rects are the content areas inside
/// their title rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub editor_block: Rect,
    pub editor: Rect,
    pub preview_block: Option<Rect>,
    pub preview: Option<Rect>,
    pub status: Rect,
}

pub fn pane_layout(area: Rect, preview_visible: bool) -> PaneLayout {
    let main = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let (editor_block, preview_block) = if preview_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main);
        (columns[0], Some(columns[1]))
    } else {
        (main, None)
    };
    PaneLayout {
        editor_block,
        editor: editor_frame("").inner(editor_block),
        preview_block,
        preview: preview_block.map(|rect| preview_frame().inner(rect)),
        status,
    }
}

fn editor_frame(title: &str) -> Block<'_> {
    Block::default().borders(Borders::TOP).title(title)
}

fn preview_frame() -> Block<'static> {
    Block::default()
        .borders(Borders::TOP | Borders::LEFT)
        .title(" Preview ")
        .padding(Padding::left(PREVIEW_LEFT_PADDING))
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_theme(model.session.theme());
    let layout = pane_layout(area, model.preview_visible);

    frame.render_widget(Clear, area);
    render_editor(model, &palette, frame, &layout);
    if let (Some(block), Some(inner)) = (layout.preview_block, layout.preview) {
        render_preview(model, &palette, frame, block, inner);
    }

    let main_bottom = layout.status.y;
    let mut overlay_y = main_bottom;
    if model.prompt.is_some() && overlay_y > area.y {
        overlay_y -= 1;
        status::render_prompt_bar(model, frame, Rect::new(area.x, overlay_y, area.width, 1));
    }
    if model.active_toast().is_some() && overlay_y > area.y {
        overlay_y -= 1;
        status::render_toast_bar(model, frame, Rect::new(area.x, overlay_y, area.width, 1));
    }
    status::render_status_bar(model, &palette, frame, layout.status);
}

fn toolbar_title() -> String {
    let items = FormatAction::TOOLBAR
        .iter()
        .enumerate()
        .map(|(i, action)| format!("{}:{}", (i + 1) % 10, action.label()))
        .collect::<Vec<_>>()
        .join(" ");
    format!(" Markdown  M-{items} ")
}

fn render_editor(model: &Model, palette: &Palette, frame: &mut Frame, layout: &PaneLayout) {
    let title = toolbar_title();
    let block = editor_frame(&title)
        .border_style(palette.border)
        .style(palette.base);
    frame.render_widget(block, layout.editor_block);

    let area = layout.editor;
    let buf = model.session.buffer();
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(area.width.saturating_sub(gutter_width + 1)).max(1);
    let cursor = buf.cursor();
    let selection = buf.selection();
    let hscroll = cursor.col.saturating_sub(text_width - 1);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in model.editor_view.visible_range() {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, palette.gutter)];
        let caret_col = (line_idx == cursor.line).then_some(cursor.col);
        spans.extend(editor_line_spans(
            &line_text,
            buf.line_start(line_idx),
            &selection,
            caret_col,
            hscroll,
            palette,
        ));
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content).style(palette.base), area);
}

/// Spans for one source line with selection and caret painted in.
fn editor_line_spans(
    text: &str,
    line_start: usize,
    selection: &Range<usize>,
    caret_col: Option<usize>,
    hscroll: usize,
    palette: &Palette,
) -> Vec<Span<'static>> {
    fn flush(run: &mut String, style: Style, spans: &mut Vec<Span<'static>>) {
        if !run.is_empty() {
            spans.push(Span::styled(std::mem::take(run), style));
        }
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = palette.base;

    let chars: Vec<char> = text.chars().collect();
    for (col, ch) in chars.iter().enumerate().skip(hscroll) {
        let style = if caret_col == Some(col) {
            palette.caret
        } else if selection.contains(&(line_start + col)) {
            palette.selection
        } else {
            palette.base
        };
        if style != run_style {
            flush(&mut run, run_style, &mut spans);
            run_style = style;
        }
        run.push(*ch);
    }
    flush(&mut run, run_style, &mut spans);

    if caret_col.is_some_and(|col| col >= chars.len()) {
        spans.push(Span::styled(" ", palette.caret));
    }
    spans
}

fn render_preview(model: &Model, palette: &Palette, frame: &mut Frame, block: Rect, inner: Rect) {
    let frame_block = preview_frame()
        .border_style(palette.border)
        .style(palette.base);
    frame.render_widget(frame_block, block);

    let range = model.preview.visible_range();
    let content = model
        .preview_lines
        .get(range)
        .unwrap_or_default()
        .to_vec();
    frame.render_widget(Paragraph::new(content).style(palette.base), inner);
}

/// Width of the line-number column.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
