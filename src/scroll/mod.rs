//! Ratio-based scroll mirroring between the source and preview panes.
//!
//! The two panes have different total heights, so positions are mirrored by
//! the fraction of the scrollable range rather than by absolute offset. A
//! guard suppresses the echo from the programmatic scroll on the other pane
//! until a short release delay has elapsed.

/// Default time the re-entrancy guard stays held after a propagation.
pub const DEFAULT_RELEASE_MS: u64 = 100;

/// Which pane a scroll came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

impl Pane {
    pub const fn other(self) -> Self {
        match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        }
    }
}

/// Something with a vertical scroll position.
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;
    /// Total content height.
    fn scroll_height(&self) -> f64;
    /// Visible height.
    fn client_height(&self) -> f64;
    fn set_scroll_top(&mut self, top: f64);
}

/// Fraction of the scrollable range `surface` is scrolled through, in `0.0..=1.0`.
///
/// A surface whose content fits (no scrollable range) reports `0.0`.
pub fn scroll_ratio(surface: &impl ScrollSurface) -> f64 {
    let range = surface.scroll_height() - surface.client_height();
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }
    let ratio = surface.scroll_top() / range;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Scroll `target` to `ratio` of its scrollable range.
pub fn apply_ratio(target: &mut impl ScrollSurface, ratio: f64) {
    let range = target.scroll_height() - target.client_height();
    let top = if range.is_finite() && range > 0.0 {
        ratio * range
    } else {
        0.0
    };
    target.set_scroll_top(top);
}

/// Mirrors scrolls between two panes with a delayed-release guard.
#[derive(Debug, Clone)]
pub struct ScrollSync {
    release_ms: u64,
    locked_until: Option<u64>,
    last_source: Option<Pane>,
    enabled: bool,
}

impl ScrollSync {
    pub const fn new(release_ms: u64) -> Self {
        Self {
            release_ms,
            locked_until: None,
            last_source: None,
            enabled: true,
        }
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the guard is still held at `now_ms`.
    pub fn is_locked(&self, now_ms: u64) -> bool {
        self.locked_until.is_some_and(|until| now_ms < until)
    }

    /// The pane that started the current propagation window.
    pub const fn last_source(&self) -> Option<Pane> {
        self.last_source
    }

    /// Handle a scroll of `from` (which is pane `source`) by mirroring it onto `to`.
    ///
    /// Returns false without touching `to` while the guard is held, which is
    /// how the echo of our own programmatic scroll is swallowed.
    pub fn on_scroll(
        &mut self,
        source: Pane,
        now_ms: u64,
        from: &impl ScrollSurface,
        to: &mut impl ScrollSurface,
    ) -> bool {
        self.release_if_due(now_ms);
        if !self.enabled || self.is_locked(now_ms) {
            return false;
        }
        self.locked_until = Some(now_ms.saturating_add(self.release_ms));
        self.last_source = Some(source);
        let ratio = scroll_ratio(from);
        apply_ratio(to, ratio);
        tracing::trace!(?source, ratio, "scroll mirrored");
        true
    }

    /// Release the guard once its delay has elapsed.
    pub fn release_if_due(&mut self, now_ms: u64) {
        if self.locked_until.is_some_and(|until| now_ms >= until) {
            self.locked_until = None;
            self.last_source = None;
        }
    }
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_MS)
    }
}
