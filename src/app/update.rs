use std::path::PathBuf;

use crate::app::{Model, Prompt, PromptKind, ToastLevel};
use crate::editor::Direction;
use crate::export::ExportFormat;
use crate::format::FormatAction;
use crate::scroll::Pane;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the caret, replacing any selection
    InsertChar(char),
    /// Split the line at the caret (Enter)
    InsertNewline,
    /// Delete the selection or the character before the caret (Backspace)
    DeleteBack,
    /// Delete the selection or the character at the caret (Delete)
    DeleteForward,
    /// Wrap the selection with a toolbar action's markers
    Format(FormatAction),

    // Caret
    /// Move the caret, extending the selection when the flag is set
    MoveCursor(Direction, bool),
    /// Move to the beginning of the line (Home)
    MoveHome(bool),
    /// Move to the end of the line (End)
    MoveEnd(bool),
    /// Move one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move one word right (Ctrl+Right)
    MoveWordRight,
    /// Move to the start of the document (Ctrl+Home)
    MoveToStart,
    /// Move to the end of the document (Ctrl+End)
    MoveToEnd,
    /// Move to an absolute (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    /// Select the whole document
    SelectAll,
    /// Move the caret one editor page up
    PageUp,
    /// Move the caret one editor page down
    PageDown,

    // Scrolling
    /// Scroll the editor pane up by n lines
    EditorScrollUp(usize),
    /// Scroll the editor pane down by n lines
    EditorScrollDown(usize),
    /// Scroll the preview pane up by n rows
    PreviewScrollUp(usize),
    /// Scroll the preview pane down by n rows
    PreviewScrollDown(usize),

    // Document
    /// Save to the store now
    Save,
    /// Start a new, empty document
    NewDocument,
    /// Import a file as the new document
    OpenFile(PathBuf),
    /// Export in a format under a file name stem
    Export(ExportFormat, String),

    // Prompt
    /// Ask for a file to open
    StartOpen,
    /// Ask for an export name
    StartExport,
    /// Replace the prompt input
    PromptInput(String),
    /// Cycle the export format
    PromptCycleFormat,
    /// Close the prompt without acting
    PromptCancel,

    // View
    /// Switch between the light and dark theme
    ToggleTheme,
    /// Show or hide the preview pane
    TogglePreview,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Store and
/// filesystem work is left to the effects pass that follows.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::NewDocument) {
        model.new_confirmed = false;
    }

    let editor_before = model.editor_view.offset();
    let preview_before = model.preview.offset();
    let now = model.now_ms;

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.session.edit(now, |buf| buf.insert_char(ch));
            model.follow_caret();
        }
        Message::InsertNewline => {
            model.session.edit(now, |buf| buf.split_line());
            model.follow_caret();
        }
        Message::DeleteBack => {
            let buf = model.session.buffer();
            if buf.has_selection() || buf.caret() > 0 {
                model.session.edit(now, |buf| buf.delete_back());
                model.follow_caret();
            }
        }
        Message::DeleteForward => {
            let buf = model.session.buffer();
            if buf.has_selection() || buf.caret() < buf.len_chars() {
                model.session.edit(now, |buf| buf.delete_forward());
                model.follow_caret();
            }
        }
        Message::Format(action) => {
            model.session.apply_format(action);
            model.follow_caret();
        }

        // Caret
        Message::MoveCursor(dir, extend) => {
            model.session.buffer_mut().move_cursor(dir, extend);
            model.follow_caret();
        }
        Message::MoveHome(extend) => {
            model.session.buffer_mut().move_home(extend);
            model.follow_caret();
        }
        Message::MoveEnd(extend) => {
            model.session.buffer_mut().move_end(extend);
            model.follow_caret();
        }
        Message::MoveWordLeft => {
            model.session.buffer_mut().move_word_left();
            model.follow_caret();
        }
        Message::MoveWordRight => {
            model.session.buffer_mut().move_word_right();
            model.follow_caret();
        }
        Message::MoveToStart => {
            model.session.buffer_mut().move_to_start();
            model.follow_caret();
        }
        Message::MoveToEnd => {
            model.session.buffer_mut().move_to_end();
            model.follow_caret();
        }
        Message::MoveTo(line, col) => {
            model.session.buffer_mut().move_to(line, col);
            model.follow_caret();
        }
        Message::SelectAll => {
            model.session.buffer_mut().select_all();
        }
        Message::PageUp | Message::PageDown => {
            let page = usize::from(model.editor_view.height().max(1));
            let cursor = model.session.buffer().cursor();
            let line = if matches!(msg, Message::PageUp) {
                cursor.line.saturating_sub(page)
            } else {
                cursor.line + page
            };
            model.session.buffer_mut().move_to(line, cursor.col);
            model.follow_caret();
        }

        // Scrolling
        Message::EditorScrollUp(n) => model.editor_view.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor_view.scroll_down(n),
        Message::PreviewScrollUp(n) => model.preview.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview.scroll_down(n),

        // Document
        Message::NewDocument => {
            if model.session.is_dirty() && !model.new_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+N again to discard them",
                );
                model.new_confirmed = true;
            } else {
                model.new_confirmed = false;
                model.new_document_requested = true;
            }
        }
        Message::OpenFile(_) | Message::Export(_, _) => {
            model.prompt = None;
        }
        // Save, ToggleTheme: handled in effects (store access)
        // Redraw: no state change needed
        Message::Save | Message::ToggleTheme | Message::Redraw => {}

        // Prompt
        Message::StartOpen => {
            model.prompt = Some(Prompt::new(PromptKind::Open));
        }
        Message::StartExport => {
            model.prompt = Some(Prompt::new(PromptKind::Export(ExportFormat::Markdown)));
        }
        Message::PromptInput(input) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input = input;
            }
        }
        Message::PromptCycleFormat => {
            if let Some(prompt) = &mut model.prompt
                && let PromptKind::Export(format) = prompt.kind
            {
                prompt.kind = PromptKind::Export(next_format(format));
            }
        }
        Message::PromptCancel => {
            model.prompt = None;
        }

        // View
        Message::TogglePreview => {
            model.preview_visible = !model.preview_visible;
            model.reflow_layout();
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.reflow_layout();
        }

        // Application
        Message::Quit => {
            if model.session.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to save and quit",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    mirror_scroll(&mut model, editor_before, preview_before);
    model
}

/// Mirror whichever pane moved onto the other one.
fn mirror_scroll(model: &mut Model, editor_before: usize, preview_before: usize) {
    if !model.preview_visible {
        return;
    }
    let now = model.now_ms;
    if model.editor_view.offset() != editor_before {
        model
            .session
            .on_scroll(Pane::Editor, now, &model.editor_view, &mut model.preview);
    } else if model.preview.offset() != preview_before {
        model
            .session
            .on_scroll(Pane::Preview, now, &model.preview, &mut model.editor_view);
    }
}

fn next_format(format: ExportFormat) -> ExportFormat {
    let idx = ExportFormat::ALL
        .iter()
        .position(|f| *f == format)
        .unwrap_or(0);
    ExportFormat::ALL[(idx + 1) % ExportFormat::ALL.len()]
}
