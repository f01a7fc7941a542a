use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PromptKind, ToastLevel};

use super::style::Palette;

pub fn render_status_bar(model: &Model, palette: &Palette, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let stats = session.stats();
    let pos = session.cursor_position();
    let (save_label, save_style) = if session.is_dirty() {
        ("Unsaved", palette.unsaved)
    } else {
        ("Saved", palette.status)
    };
    let preview_indicator = if model.preview_visible {
        ""
    } else {
        " [preview hidden]"
    };

    let left = format!(
        " {} words  {} chars  Ln {}, Col {}  ",
        stats.words, stats.chars, pos.line, pos.column
    );
    let right = format!(
        "  {}{}  ^S save  ^O open  ^E export  ^T theme  ^P preview  ^Q quit",
        session.theme(),
        preview_indicator
    );
    let line = Line::from(vec![
        Span::styled(left, palette.status),
        Span::styled(save_label, save_style),
        Span::styled(right, palette.status),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.status), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = &model.prompt else {
        return;
    };
    let text = match prompt.kind {
        PromptKind::Open => format!("Open file: {}_  Enter: open  Esc: cancel", prompt.input),
        PromptKind::Export(format) => format!(
            "Export as {}  name: {}_  Tab: format  Enter: export  Esc: cancel",
            format.label(),
            prompt.input
        ),
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}
