//! The editing session: one document kept in step with its preview and store.
//!
//! [`Session`] owns every piece of editor state that is independent of the
//! terminal. The front-end feeds it edits and the current time; the session
//! decides when to refresh, when to autosave and what to persist.

use std::fmt;
use std::path::Path;

use crate::document::{CursorPosition, DocumentState, TextStats, WELCOME_DOCUMENT};
use crate::editor::EditorBuffer;
use crate::export::{self, ExportError, ExportFormat, ExportOutcome};
use crate::format::FormatAction;
use crate::render::{RenderOptions, RenderedView, Renderer};
use crate::scroll::{DEFAULT_RELEASE_MS, Pane, ScrollSurface, ScrollSync};
use crate::storage::{CONTENT_KEY, KeyValueStore, MemoryStore, StorageError, THEME_KEY};
use crate::sync::{Autosave, DEFAULT_AUTOSAVE_MS, DEFAULT_DEBOUNCE_MS, SyncPipeline};
use crate::theme::Theme;

/// Timing and rendering knobs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub debounce_ms: u64,
    pub autosave_ms: u64,
    pub scroll_release_ms: u64,
    /// Theme forced from the command line; the stored theme is used otherwise.
    pub theme: Option<Theme>,
    pub render: RenderOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            autosave_ms: DEFAULT_AUTOSAVE_MS,
            scroll_release_ms: DEFAULT_RELEASE_MS,
            theme: None,
            render: RenderOptions::default(),
        }
    }
}

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The text was written to the store.
    Written,
    /// The text already matched the stored snapshot.
    Unchanged,
}

/// What happened during one [`Session::tick`].
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// A debounced refresh ran and replaced the view.
    pub refreshed: bool,
    /// Set when the autosave interval elapsed with a dirty document.
    pub autosave: Option<Result<SaveOutcome, StorageError>>,
}

pub struct Session {
    document: DocumentState,
    view: RenderedView,
    renderer: Renderer,
    sync: SyncPipeline,
    autosave: Autosave,
    scroll: ScrollSync,
    theme: Theme,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("document", &self.document)
            .field("stats", &self.view.stats)
            .field("sync", &self.sync)
            .field("autosave", &self.autosave)
            .field("scroll", &self.scroll)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    /// An empty, unrendered session over a memory store.
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            document: DocumentState::clean(""),
            view: RenderedView::default(),
            renderer: Renderer::new(config.render),
            sync: SyncPipeline::new(config.debounce_ms),
            autosave: Autosave::new(config.autosave_ms, 0),
            scroll: ScrollSync::new(config.scroll_release_ms),
            theme: Theme::default(),
            store: Box::new(MemoryStore::new()),
        }
    }
}

impl Session {
    /// Start a session from the store.
    ///
    /// Stored non-empty content becomes the clean document; otherwise the
    /// welcome document is seeded, also clean. The preview is rendered once
    /// up front.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(
        store: Box<dyn KeyValueStore>,
        config: SessionConfig,
        now_ms: u64,
    ) -> Result<Self, StorageError> {
        let text = match store.get(CONTENT_KEY)? {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::info!("no stored document, seeding welcome text");
                WELCOME_DOCUMENT.to_string()
            }
        };
        let theme = match config.theme {
            Some(theme) => theme,
            None => stored_theme(store.as_ref())?,
        };
        let renderer = Renderer::new(config.render);
        let view = renderer.render(&text);
        Ok(Self {
            document: DocumentState::clean(&text),
            view,
            renderer,
            sync: SyncPipeline::new(config.debounce_ms),
            autosave: Autosave::new(config.autosave_ms, now_ms),
            scroll: ScrollSync::new(config.scroll_release_ms),
            theme,
            store,
        })
    }

    pub const fn document(&self) -> &DocumentState {
        &self.document
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        self.document.buffer()
    }

    /// Caret movement and selection; never marks the document dirty.
    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        self.document.buffer_mut()
    }

    /// The view produced by the most recent refresh.
    pub const fn view(&self) -> &RenderedView {
        &self.view
    }

    pub const fn stats(&self) -> TextStats {
        self.view.stats
    }

    pub fn cursor_position(&self) -> CursorPosition {
        self.document.cursor_position()
    }

    pub const fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn sync(&self) -> &SyncPipeline {
        &self.sync
    }

    pub const fn scroll_sync(&self) -> &ScrollSync {
        &self.scroll
    }

    pub const fn scroll_sync_mut(&mut self) -> &mut ScrollSync {
        &mut self.scroll
    }

    /// Record an input event: the document is dirty and a refresh is scheduled.
    pub const fn on_input(&mut self, now_ms: u64) {
        self.document.mark_dirty();
        self.sync.notify(now_ms);
    }

    /// Apply a text edit and schedule a refresh.
    pub fn edit<R>(&mut self, now_ms: u64, f: impl FnOnce(&mut EditorBuffer) -> R) -> R {
        let result = self.document.edit(f);
        self.sync.notify(now_ms);
        result
    }

    /// Advance timers to `now_ms`.
    ///
    /// Runs a due refresh first, so an autosave in the same tick sees the
    /// dirty flag the refresh set.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if let Some(view) = self.sync.poll(now_ms, &mut self.document, &self.renderer) {
            self.view = view;
            outcome.refreshed = true;
        }
        if self.autosave.tick(now_ms) && self.document.is_dirty() {
            tracing::debug!("autosave");
            outcome.autosave = Some(self.save());
        }
        self.scroll.release_if_due(now_ms);
        outcome
    }

    /// Earliest pending deadline, in milliseconds from `now_ms`.
    pub fn next_deadline_ms(&self, now_ms: u64) -> u64 {
        let autosave = self.autosave.remaining_ms(now_ms);
        self.sync
            .remaining_ms(now_ms)
            .map_or(autosave, |refresh| refresh.min(autosave))
    }

    /// Refresh immediately, superseding any pending refresh.
    pub fn refresh_now(&mut self) {
        self.view = self.sync.refresh_now(&mut self.document, &self.renderer);
    }

    /// Persist the current text unless it matches the stored snapshot.
    ///
    /// On failure the document stays dirty so a later save retries.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save(&mut self) -> Result<SaveOutcome, StorageError> {
        let text = self.document.text();
        if text == self.document.last_persisted() {
            self.document.mark_persisted(text);
            return Ok(SaveOutcome::Unchanged);
        }
        self.store.set(CONTENT_KEY, &text)?;
        tracing::debug!(bytes = text.len(), "document saved");
        self.document.mark_persisted(text);
        Ok(SaveOutcome::Written)
    }

    /// Replace the document with empty text, refresh and save.
    ///
    /// Confirmation for discarding unsaved work belongs to the caller.
    ///
    /// # Errors
    /// Returns an error if the empty document cannot be saved.
    pub fn new_document(&mut self) -> Result<SaveOutcome, StorageError> {
        self.document.replace_text("");
        self.refresh_now();
        self.save()
    }

    /// Import `path` as the new document text.
    ///
    /// Returns `Ok(false)` when the file is not markdown or text; the
    /// document is left untouched.
    ///
    /// # Errors
    /// Returns an error if a supported file cannot be read.
    pub fn open_file(&mut self, path: &Path) -> Result<bool, ExportError> {
        let Some(text) = export::read_import(path)? else {
            return Ok(false);
        };
        self.document.replace_text(&text);
        self.document.buffer_mut().move_to_start();
        self.refresh_now();
        tracing::info!(path = %path.display(), "imported");
        Ok(true)
    }

    /// Wrap the selection with `action`'s markers and refresh immediately.
    pub fn apply_format(&mut self, action: FormatAction) {
        self.document.edit(|buf| action.apply(buf));
        self.refresh_now();
    }

    /// Export the current text in `format` to `dir`.
    ///
    /// Renders from the live text, so a refresh that is still pending does
    /// not make the export stale.
    ///
    /// # Errors
    /// Returns an error if the artifact cannot be written or handed off.
    pub fn export(
        &self,
        format: ExportFormat,
        dir: &Path,
        stem: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let text = self.document.text();
        let view = self.renderer.render(&text);
        export::export(format, dir, stem, &text, &view, self.theme)
    }

    /// Flip the theme and persist the choice.
    ///
    /// The new theme applies even if persisting it fails.
    ///
    /// # Errors
    /// Returns an error if the theme cannot be stored.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    /// Mirror a scroll of `source` onto the other pane.
    pub fn on_scroll(
        &mut self,
        source: Pane,
        now_ms: u64,
        from: &impl ScrollSurface,
        to: &mut impl ScrollSurface,
    ) -> bool {
        self.scroll.on_scroll(source, now_ms, from, to)
    }
}

fn stored_theme(store: &dyn KeyValueStore) -> Result<Theme, StorageError> {
    let Some(raw) = store.get(THEME_KEY)? else {
        return Ok(Theme::default());
    };
    Ok(raw.parse().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring stored theme");
        Theme::default()
    }))
}
