use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::export::ExportFormat;
use crate::session::Session;
use crate::theme::Theme;
use crate::ui::style::Palette;
use crate::ui::viewport::Viewport;
use crate::ui::wrap::wrap_preview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the one-line prompt above the status bar is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a markdown or text file to import
    Open,
    /// File name stem for an export in the given format
    Export(ExportFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }
}

/// The complete application state.
///
/// Everything that is not terminal-specific lives in [`Session`]; the model
/// adds pane geometry, the wrapped preview and transient UI state.
pub struct Model {
    /// Document, preview, timers and store
    pub session: Session,
    /// Milliseconds since startup, set by the event loop before each update
    pub now_ms: u64,
    /// Editor pane scroll state in source lines
    pub editor_view: Viewport,
    /// Preview pane scroll state in wrapped rows
    pub preview: Viewport,
    /// The preview wrapped at the current pane width
    pub preview_lines: Vec<Line<'static>>,
    /// Whether the preview pane is shown
    pub preview_visible: bool,
    /// Terminal size as (width, height)
    pub terminal_size: (u16, u16),
    /// Active open/export prompt
    pub prompt: Option<Prompt>,
    /// Directory export artifacts are written to
    pub export_dir: PathBuf,
    toast: Option<Toast>,
    /// Set after a first Ctrl+N with unsaved changes; a second press proceeds
    pub new_confirmed: bool,
    /// Set after a first quit with unsaved changes; a second quit proceeds
    pub quit_confirmed: bool,
    /// A confirmed new document waiting for the effects pass
    pub(super) new_document_requested: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Refresh count, theme and width the preview was last wrapped for
    wrapped_for: Option<(u64, Theme, u16)>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("session", &self.session)
            .field("terminal_size", &self.terminal_size)
            .field("preview_visible", &self.preview_visible)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for a loaded session and lay it out for the terminal.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            session,
            terminal_size,
            ..Self::default()
        };
        model.reflow_layout();
        model
    }

    pub fn with_preview_visible(mut self, visible: bool) -> Self {
        self.preview_visible = visible;
        self.reflow_layout();
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Size both viewports from the current terminal size and pane split.
    pub(super) fn reflow_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let layout = crate::ui::pane_layout(Rect::new(0, 0, width, height), self.preview_visible);
        self.editor_view
            .resize(layout.editor.width, layout.editor.height);
        if let Some(preview) = layout.preview {
            self.preview.resize(preview.width, preview.height);
        }
        self.follow_caret();
        self.sync_preview();
    }

    /// Re-wrap the preview if a refresh, theme change or resize made the
    /// cached rows stale. Returns true when the rows changed.
    pub fn sync_preview(&mut self) -> bool {
        if !self.preview_visible {
            return false;
        }
        let key = (
            self.session.sync().refreshes(),
            self.session.theme(),
            self.preview.width(),
        );
        if self.wrapped_for == Some(key) {
            return false;
        }
        let palette = Palette::for_theme(key.1);
        self.preview_lines = wrap_preview(&self.session.view().preview, key.2, &palette);
        self.preview.set_total_lines(self.preview_lines.len());
        self.wrapped_for = Some(key);
        true
    }

    /// Keep the editor line count current and the caret line on screen.
    pub(super) fn follow_caret(&mut self) {
        let buf = self.session.buffer();
        self.editor_view.set_total_lines(buf.line_count());
        self.editor_view.ensure_visible(buf.cursor().line);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::default(),
            now_ms: 0,
            editor_view: Viewport::default(),
            preview: Viewport::default(),
            preview_lines: Vec::new(),
            preview_visible: true,
            terminal_size: (80, 24),
            prompt: None,
            export_dir: PathBuf::from("."),
            toast: None,
            new_confirmed: false,
            quit_confirmed: false,
            new_document_requested: false,
            should_quit: false,
            wrapped_for: None,
        }
    }
}
