use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use crate::editor::Direction;
use crate::export::ExportFormat;
use crate::format::FormatAction;
use crate::session::{Session, SessionConfig};
use crate::storage::{CONTENT_KEY, MemoryStore};
use crate::theme::Theme;

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, PromptKind, ToastLevel, update};

fn create_test_model(text: &str) -> Model {
    let store = MemoryStore::new().with(CONTENT_KEY, text);
    let session = Session::load(Box::new(store), SessionConfig::default(), 0).unwrap();
    Model::new(session, (80, 24))
}

fn create_long_test_model() -> Model {
    let mut md = String::from("# Long document\n\n");
    for i in 1..=100 {
        md.push_str(&format!("Paragraph {i} of content.\n\n"));
    }
    create_test_model(&md)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> event::KeyEvent {
    event::KeyEvent::new(code, modifiers)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_typing_marks_dirty_and_schedules_refresh() {
    let model = create_test_model("hello");
    assert!(!model.session.is_dirty());

    let model = update(model, Message::InsertChar('!'));
    assert!(model.session.is_dirty());
    assert!(model.session.sync().is_pending());
    assert_eq!(model.session.view().stats.chars, 5, "stats wait for the refresh");
}

#[test]
fn test_refresh_after_quiet_period_rewraps_preview() {
    let mut model = create_test_model("hello");
    model = update(model, Message::MoveToEnd);
    model = update(model, Message::InsertChar('!'));

    let tick = model.session.tick(299);
    assert!(!tick.refreshed);
    let tick = model.session.tick(300);
    assert!(tick.refreshed);
    assert!(model.sync_preview());
    assert!(!model.sync_preview(), "second call has nothing new to wrap");

    let rows: Vec<String> = model
        .preview_lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect();
    assert!(rows.iter().any(|row| row.trim_end() == "hello!"));
}

#[test]
fn test_backspace_at_start_leaves_document_clean() {
    let model = create_test_model("hello");
    let model = update(model, Message::DeleteBack);
    assert!(!model.session.is_dirty());
    assert!(!model.session.sync().is_pending());
}

#[test]
fn test_format_refreshes_immediately() {
    let mut model = create_test_model("word");
    model = update(model, Message::SelectAll);
    let before = model.session.sync().refreshes();

    model = update(model, Message::Format(FormatAction::Bold));
    assert_eq!(model.session.document().text(), "**word**");
    assert_eq!(model.session.sync().refreshes(), before + 1);
    assert!(model.session.is_dirty());
}

#[test]
fn test_new_document_requires_second_press_when_dirty() {
    let mut model = create_test_model("draft");
    model = update(model, Message::InsertChar('x'));

    model = update(model, Message::NewDocument);
    assert!(model.new_confirmed);
    assert!(!model.new_document_requested);
    let (_, level) = model.active_toast().expect("warning toast");
    assert_eq!(level, ToastLevel::Warning);

    model = update(model, Message::NewDocument);
    assert!(model.new_document_requested);
    App::handle_message_side_effects(&mut model, &Message::NewDocument);

    assert_eq!(model.session.document().text(), "");
    assert!(!model.session.is_dirty());
    assert!(!model.new_document_requested);
}

#[test]
fn test_other_action_declines_new_document() {
    let mut model = create_test_model("draft");
    model = update(model, Message::InsertChar('x'));
    model = update(model, Message::NewDocument);
    model = update(model, Message::MoveCursor(Direction::Right, false));
    assert!(!model.new_confirmed);

    model = update(model, Message::NewDocument);
    assert!(!model.new_document_requested);
    assert!(model.new_confirmed);
}

#[test]
fn test_new_document_when_clean_needs_one_press() {
    let model = create_test_model("saved text");
    let model = update(model, Message::NewDocument);
    assert!(model.new_document_requested);
}

#[test]
fn test_quit_with_unsaved_changes_requires_confirmation() {
    let mut model = create_test_model("draft");
    model = update(model, Message::InsertChar('x'));

    model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);

    model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_save_keeps_pending_quit_confirmation() {
    let mut model = create_test_model("draft");
    model = update(model, Message::InsertChar('x'));
    model = update(model, Message::Quit);
    model = update(model, Message::Save);
    assert!(model.quit_confirmed);
}

#[test]
fn test_clean_quit_is_immediate() {
    let model = create_test_model("nothing to lose");
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_save_side_effect_clears_dirty() {
    let mut model = create_test_model("draft");
    model = update(model, Message::InsertChar('x'));
    model = update(model, Message::Save);
    App::handle_message_side_effects(&mut model, &Message::Save);

    assert!(!model.session.is_dirty());
    assert_eq!(model.active_toast(), Some(("Saved", ToastLevel::Info)));
}

#[test]
fn test_toggle_preview_gives_editor_full_width() {
    let model = create_test_model("text");
    assert_eq!(model.editor_view.width(), 40);

    let model = update(model, Message::TogglePreview);
    assert!(!model.preview_visible);
    assert_eq!(model.editor_view.width(), 80);

    let model = update(model, Message::TogglePreview);
    assert_eq!(model.editor_view.width(), 40);
}

#[test]
fn test_resize_relayouts_panes() {
    let model = create_test_model("text");
    let model = update(model, Message::Resize(120, 40));
    assert_eq!(model.editor_view.width(), 60);
    assert_eq!(model.editor_view.height(), 38);
    assert_eq!(model.preview.width(), 60 - 1 - crate::ui::PREVIEW_LEFT_PADDING);
}

#[test]
fn test_editor_scroll_mirrors_onto_preview() {
    let model = create_long_test_model();
    assert_eq!(model.preview.offset(), 0);

    let model = update(model, Message::EditorScrollDown(50));
    assert!(model.preview.offset() > 0);
}

#[test]
fn test_mirrored_scroll_echo_is_swallowed() {
    let mut model = create_long_test_model();
    model = update(model, Message::EditorScrollDown(50));
    let editor_offset = model.editor_view.offset();

    model.now_ms = 50;
    model = update(model, Message::PreviewScrollDown(3));
    assert_eq!(model.editor_view.offset(), editor_offset);

    model.now_ms = 500;
    model = update(model, Message::PreviewScrollDown(3));
    assert_ne!(model.editor_view.offset(), editor_offset);
}

#[test]
fn test_scroll_sync_can_be_disabled() {
    let mut model = create_long_test_model();
    model.session.scroll_sync_mut().set_enabled(false);
    let model = update(model, Message::EditorScrollDown(50));
    assert_eq!(model.preview.offset(), 0);
}

#[test]
fn test_caret_movement_scrolls_editor() {
    let mut model = create_long_test_model();
    model = update(model, Message::MoveToEnd);
    let last = model.session.buffer().line_count() - 1;
    assert!(model.editor_view.visible_range().contains(&last));
}

#[test]
fn test_export_prompt_cycles_formats() {
    let mut model = create_test_model("text");
    model = update(model, Message::StartExport);
    assert_eq!(
        model.prompt.as_ref().map(|p| p.kind),
        Some(PromptKind::Export(ExportFormat::Markdown))
    );

    model = update(model, Message::PromptCycleFormat);
    model = update(model, Message::PromptInput("notes".to_string()));
    let msg = App::handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model);
    assert_eq!(
        msg,
        Some(Message::Export(ExportFormat::Html, "notes".to_string()))
    );
}

#[test]
fn test_prompt_typing_edits_input() {
    let mut model = create_test_model("text");
    model = update(model, Message::StartOpen);
    model = update(model, Message::PromptInput("rea".to_string()));

    let msg = App::handle_key(key(KeyCode::Char('d'), KeyModifiers::NONE), &model);
    assert_eq!(msg, Some(Message::PromptInput("read".to_string())));
    let msg = App::handle_key(key(KeyCode::Backspace, KeyModifiers::NONE), &model);
    assert_eq!(msg, Some(Message::PromptInput("re".to_string())));
    let msg = App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model);
    assert_eq!(msg, Some(Message::PromptCancel));
}

#[test]
fn test_empty_open_prompt_cancels() {
    let model = update(create_test_model("text"), Message::StartOpen);
    let msg = App::handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model);
    assert_eq!(msg, Some(Message::PromptCancel));
}

#[test]
fn test_export_side_effect_writes_file() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model("# Notes\n\nbody").with_export_dir(dir.path().to_path_buf());
    let msg = Message::Export(ExportFormat::Markdown, "notes".to_string());

    model = update(model, msg.clone());
    App::handle_message_side_effects(&mut model, &msg);

    let written = std::fs::read_to_string(dir.path().join("notes.md")).unwrap();
    assert_eq!(written, "# Notes\n\nbody");
    assert!(model.prompt.is_none());
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Info));
}

#[test]
fn test_open_file_side_effect_replaces_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("import.md");
    std::fs::write(&path, "# Imported\n\ntext").unwrap();
    let mut model = create_test_model("old");
    let msg = Message::OpenFile(path);

    model = update(model, msg.clone());
    App::handle_message_side_effects(&mut model, &msg);

    assert_eq!(model.session.document().text(), "# Imported\n\ntext");
    assert!(model.session.is_dirty());
    assert!(model.sync_preview());
}

#[test]
fn test_open_unsupported_file_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picture.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
    let mut model = create_test_model("old");
    let msg = Message::OpenFile(path);

    model = update(model, msg.clone());
    App::handle_message_side_effects(&mut model, &msg);

    assert_eq!(model.session.document().text(), "old");
    assert!(!model.session.is_dirty());
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );
}

#[test]
fn test_toggle_theme_rewraps_preview() {
    let mut model = create_test_model("# Title");
    let before = model.session.theme();
    model = update(model, Message::ToggleTheme);
    App::handle_message_side_effects(&mut model, &Message::ToggleTheme);
    assert_eq!(model.session.theme(), before.toggled());
    assert!(!model.sync_preview(), "effects already rewrapped");
}

#[test]
fn test_control_shortcuts() {
    let model = create_test_model("text");
    let cases = [
        ('s', Message::Save),
        ('b', Message::Format(FormatAction::Bold)),
        ('i', Message::Format(FormatAction::Italic)),
        ('n', Message::NewDocument),
        ('o', Message::StartOpen),
        ('e', Message::StartExport),
        ('t', Message::ToggleTheme),
        ('p', Message::TogglePreview),
        ('q', Message::Quit),
    ];
    for (c, expected) in cases {
        let msg = App::handle_key(key(KeyCode::Char(c), KeyModifiers::CONTROL), &model);
        assert_eq!(msg, Some(expected), "Ctrl+{c}");
    }
}

#[test]
fn test_alt_digits_map_to_toolbar() {
    let model = create_test_model("text");
    let msg = App::handle_key(key(KeyCode::Char('1'), KeyModifiers::ALT), &model);
    assert_eq!(msg, Some(Message::Format(FormatAction::Bold)));
    let msg = App::handle_key(key(KeyCode::Char('0'), KeyModifiers::ALT), &model);
    assert_eq!(msg, Some(Message::Format(FormatAction::Table)));
    let msg = App::handle_key(key(KeyCode::Char('x'), KeyModifiers::ALT), &model);
    assert_eq!(msg, None);
}

#[test]
fn test_editing_keys() {
    let model = create_test_model("text");
    assert_eq!(
        App::handle_key(key(KeyCode::Char('X'), KeyModifiers::SHIFT), &model),
        Some(Message::InsertChar('X'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Left, KeyModifiers::SHIFT), &model),
        Some(Message::MoveCursor(Direction::Left, true))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Right, KeyModifiers::CONTROL), &model),
        Some(Message::MoveWordRight)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model),
        Some(Message::InsertNewline)
    );
}

#[test]
fn test_wheel_scrolls_pane_under_pointer() {
    let model = create_long_test_model();
    let msg = App::handle_mouse(mouse(MouseEventKind::ScrollDown, 60, 5), &model);
    assert_eq!(msg, Some(Message::PreviewScrollDown(3)));
    let msg = App::handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5), &model);
    assert_eq!(msg, Some(Message::EditorScrollDown(3)));
    let msg = App::handle_mouse(mouse(MouseEventKind::ScrollUp, 10, 5), &model);
    assert_eq!(msg, None, "already at the top");
}

#[test]
fn test_click_in_editor_moves_caret() {
    let model = create_test_model("alpha\nbeta");
    // Gutter is one digit plus a space.
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), 5, 2),
        &model,
    );
    assert_eq!(msg, Some(Message::MoveTo(1, 3)));
}

#[test]
fn test_resize_debouncer_waits_for_quiet() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(100, 30, 0);
    debouncer.queue(120, 40, 50);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(120), None);
    assert_eq!(debouncer.take_ready(150), Some((120, 40)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_toast_lifecycle() {
    let mut model = create_test_model("text");
    model.show_toast(ToastLevel::Warning, "store unavailable");
    let (msg, level) = model.active_toast().expect("toast should be set");
    assert_eq!(msg, "store unavailable");
    assert_eq!(level, ToastLevel::Warning);

    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_render_shows_both_panes_and_status() {
    let mut model = create_test_model("# Heading\n\nSome *text*");
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|frame| crate::ui::render(&mut model, frame))
        .unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("Preview"));
    assert!(screen.contains("# Heading"));
    assert!(screen.contains("Saved"));
    assert!(screen.contains("Ln 1, Col 1"));
}

#[test]
fn test_render_with_dark_theme_and_prompt() {
    let store = MemoryStore::new().with(CONTENT_KEY, "text");
    let config = SessionConfig {
        theme: Some(Theme::Dark),
        ..SessionConfig::default()
    };
    let session = Session::load(Box::new(store), config, 0).unwrap();
    let mut model = update(Model::new(session, (80, 24)), Message::StartOpen);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|frame| crate::ui::render(&mut model, frame))
        .unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("Open file:"));
    assert!(screen.contains("dark"));
}
