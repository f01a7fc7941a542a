use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model, PromptKind};
use crate::editor::Direction;
use crate::format::FormatAction;

use super::event_loop::ResizeDebouncer;

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "resize queued");
                resize_debouncer.queue(*width, *height, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if let Some(prompt) = &model.prompt {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(submit_prompt(prompt.kind, &prompt.input)),
                KeyCode::Tab => Some(Message::PromptCycleFormat),
                KeyCode::Backspace => {
                    let mut next = prompt.input.clone();
                    next.pop();
                    Some(Message::PromptInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.input.clone();
                    next.push(c);
                    Some(Message::PromptInput(next))
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if ctrl && let KeyCode::Char(c) = key.code {
            return match c.to_ascii_lowercase() {
                's' => Some(Message::Save),
                'b' => Some(Message::Format(FormatAction::Bold)),
                'i' => Some(Message::Format(FormatAction::Italic)),
                'n' => Some(Message::NewDocument),
                'o' => Some(Message::StartOpen),
                'e' => Some(Message::StartExport),
                't' => Some(Message::ToggleTheme),
                'p' => Some(Message::TogglePreview),
                'a' => Some(Message::SelectAll),
                'q' | 'c' => Some(Message::Quit),
                'l' => Some(Message::Redraw),
                _ => None,
            };
        }

        if alt && let KeyCode::Char(c) = key.code {
            return c
                .to_digit(10)
                .map(|digit| (digit as usize + 9) % 10)
                .map(|idx| Message::Format(FormatAction::TOOLBAR[idx]));
        }

        match key.code {
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
            KeyCode::Home => Some(Message::MoveHome(shift)),
            KeyCode::End => Some(Message::MoveEnd(shift)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let (width, height) = model.terminal_size;
        let layout = crate::ui::pane_layout(Rect::new(0, 0, width, height), model.preview_visible);
        let in_editor = point_in_rect(mouse.column, mouse.row, layout.editor_block);
        let in_preview = layout
            .preview_block
            .is_some_and(|rect| point_in_rect(mouse.column, mouse.row, rect));

        match mouse.kind {
            MouseEventKind::ScrollDown if in_editor => {
                model.editor_view.can_scroll_down().then_some(Message::EditorScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_editor => {
                model.editor_view.can_scroll_up().then_some(Message::EditorScrollUp(WHEEL_LINES))
            }
            MouseEventKind::ScrollDown if in_preview => {
                model.preview.can_scroll_down().then_some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if in_preview => {
                model.preview.can_scroll_up().then_some(Message::PreviewScrollUp(WHEEL_LINES))
            }
            MouseEventKind::Down(MouseButton::Left)
                if point_in_rect(mouse.column, mouse.row, layout.editor) =>
            {
                let (line, col) = editor_position(model, layout.editor, mouse.column, mouse.row);
                Some(Message::MoveTo(line, col))
            }
            _ => None,
        }
    }
}

fn submit_prompt(kind: PromptKind, input: &str) -> Message {
    let input = input.trim();
    match kind {
        PromptKind::Open if input.is_empty() => Message::PromptCancel,
        PromptKind::Open => Message::OpenFile(expand_home(input)),
        PromptKind::Export(format) => Message::Export(format, input.to_string()),
    }
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(input)
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Source (line, col) under a click in the editor's text area.
fn editor_position(model: &Model, area: Rect, column: u16, row: u16) -> (usize, usize) {
    let buf = model.session.buffer();
    let gutter = crate::ui::line_number_width(buf.line_count()) + 1;
    let text_width = usize::from(area.width.saturating_sub(gutter)).max(1);
    let hscroll = buf.cursor().col.saturating_sub(text_width - 1);
    let line = model.editor_view.offset() + usize::from(row - area.y);
    let col = usize::from(column.saturating_sub(area.x + gutter)) + hscroll;
    (line.min(buf.line_count().saturating_sub(1)), col)
}
