//! Debounced refresh and autosave timers.
//!
//! Timers are deadlines polled from the event loop with the current time in
//! milliseconds, so nothing here sleeps or spawns.
//!
//! The refresh pipeline never captures text when it is armed: the text is
//! read from the document when the quiescence window has elapsed, so a
//! refresh always reflects the latest buffer.

use crate::document::DocumentState;
use crate::render::{RenderedView, Renderer};

/// Default quiescence window before a refresh fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Default autosave interval.
pub const DEFAULT_AUTOSAVE_MS: u64 = 30_000;

/// Single-slot delayed trigger. Arming replaces any pending deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    armed_at: Option<u64>,
}

impl Debouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            armed_at: None,
        }
    }

    /// Arm (or re-arm) the trigger at `now_ms`.
    pub const fn arm(&mut self, now_ms: u64) {
        self.armed_at = Some(now_ms);
    }

    /// Returns true exactly once after the window has elapsed since the last arm.
    pub fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(armed_at) = self.armed_at else {
            return false;
        };
        if now_ms.saturating_sub(armed_at) >= self.delay_ms {
            self.armed_at = None;
            true
        } else {
            false
        }
    }

    pub const fn cancel(&mut self) {
        self.armed_at = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Milliseconds until the pending trigger is due, if armed.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.armed_at
            .map(|armed_at| armed_at.saturating_add(self.delay_ms).saturating_sub(now_ms))
    }
}

/// Coalesces edit notifications into one refresh per quiescence window.
#[derive(Debug, Clone)]
pub struct SyncPipeline {
    debouncer: Debouncer,
    refreshes: u64,
}

impl SyncPipeline {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            debouncer: Debouncer::new(debounce_ms),
            refreshes: 0,
        }
    }

    /// Record an edit. Supersedes any pending refresh.
    pub const fn notify(&mut self, now_ms: u64) {
        self.debouncer.arm(now_ms);
    }

    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.debouncer.remaining_ms(now_ms)
    }

    /// Number of refresh cycles run so far.
    pub const fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Run the refresh cycle if the window has elapsed.
    ///
    /// The cycle renders HTML from the text current at this moment, recounts
    /// words and characters, then marks the document dirty.
    pub fn poll(
        &mut self,
        now_ms: u64,
        document: &mut DocumentState,
        renderer: &Renderer,
    ) -> Option<RenderedView> {
        if !self.debouncer.take_ready(now_ms) {
            return None;
        }
        Some(self.run(document, renderer))
    }

    /// Run the refresh cycle immediately, dropping any pending one.
    pub fn refresh_now(
        &mut self,
        document: &mut DocumentState,
        renderer: &Renderer,
    ) -> RenderedView {
        self.debouncer.cancel();
        self.run(document, renderer)
    }

    fn run(&mut self, document: &mut DocumentState, renderer: &Renderer) -> RenderedView {
        self.refreshes += 1;
        let text = document.text();
        let view = renderer.render(&text);
        document.mark_dirty();
        tracing::debug!(
            refresh = self.refreshes,
            words = view.stats.words,
            chars = view.stats.chars,
            "sync refresh"
        );
        view
    }
}

/// Fixed-interval poll timer.
///
/// Fires once per elapsed interval; missed intervals collapse into one.
#[derive(Debug, Clone)]
pub struct Autosave {
    interval_ms: u64,
    next_due: u64,
}

impl Autosave {
    pub const fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due: now_ms.saturating_add(interval_ms),
        }
    }

    /// Returns true when an interval boundary has been crossed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due {
            return false;
        }
        let interval = self.interval_ms.max(1);
        let behind = (now_ms - self.next_due) / interval;
        self.next_due = self
            .next_due
            .saturating_add(behind.saturating_add(1).saturating_mul(interval));
        true
    }

    pub const fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.next_due.saturating_sub(now_ms)
    }
}
