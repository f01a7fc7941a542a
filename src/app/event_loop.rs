use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::session::Session;
use crate::storage::DirStore;

/// Longest the loop sleeps waiting for input when no deadline is closer.
const MAX_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, the terminal cannot be
    /// initialized, or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        let start = Instant::now();

        // Load before taking over the terminal so store errors print normally.
        let store = DirStore::new(&self.store_dir);
        let mut session = Session::load(Box::new(store), self.config.clone(), 0)
            .with_context(|| format!("Failed to load document from {}", self.store_dir.display()))?;
        session.scroll_sync_mut().set_enabled(self.scroll_sync);
        tracing::info!(store = %self.store_dir.display(), "session loaded");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - mdsplit requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(session, (size.width, size.height))
            .with_preview_visible(self.preview_visible)
            .with_export_dir(self.export_dir.clone());

        let result = execute!(stdout(), EnableMouseCapture)
            .map_err(anyhow::Error::from)
            .and_then(|()| Self::event_loop(&mut terminal, &mut model, start));

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        if model.session.is_dirty()
            && let Err(err) = model.session.save()
        {
            tracing::warn!(%err, "final save failed");
            eprintln!("mdsplit: unsaved changes could not be stored: {err}");
        }

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model, start: Instant) -> Result<()> {
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = elapsed_ms(start);
            model.now_ms = now_ms;

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let tick = model.session.tick(now_ms);
            if let Some(Err(err)) = &tick.autosave {
                tracing::warn!(%err, "autosave failed");
                model.show_toast(ToastLevel::Error, format!("Autosave failed: {err}"));
                needs_render = true;
            }
            if tick.refreshed || tick.autosave.is_some() {
                needs_render = true;
            }
            if model.sync_preview() {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            let poll_ms = if resize_debouncer.is_pending() {
                10
            } else {
                model.session.next_deadline_ms(now_ms).min(MAX_POLL_MS)
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render. Every
                // pending event is applied before timers are polled again.
                loop {
                    let event_ms = elapsed_ms(start);
                    model.now_ms = event_ms;
                    let msg =
                        Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        tracing::trace!(?msg, "message");
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
