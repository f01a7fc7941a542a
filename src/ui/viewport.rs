//! Line-based scroll state for the editor and preview panes.
//!
//! Both panes scroll in whole terminal rows. A [`Viewport`] is also the
//! [`ScrollSurface`] used to mirror one pane's position onto the other.

use std::ops::Range;

use crate::scroll::ScrollSurface;

/// The visible window over a pane's lines.
///
/// ```
/// use mdsplit::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(40, 10, 100);
/// vp.scroll_down(5);
/// assert_eq!(vp.visible_range(), 5..15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Index of the first visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Visible line indices, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `line` at the top, clamped to the last full page.
    pub fn go_to_line(&mut self, line: usize) {
        self.offset = line.min(self.max_offset());
    }

    /// Scroll the minimum amount that brings `line` into view.
    pub fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 || line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length, e.g. after a refresh re-wrapped the preview.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24, 0)
    }
}

// Row counts stay far below 2^52, so the f64 conversions are exact.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
impl ScrollSurface for Viewport {
    fn scroll_top(&self) -> f64 {
        self.offset as f64
    }

    fn scroll_height(&self) -> f64 {
        self.total_lines as f64
    }

    fn client_height(&self) -> f64 {
        f64::from(self.height)
    }

    fn set_scroll_top(&mut self, top: f64) {
        let line = if top.is_finite() && top > 0.0 {
            top.round() as usize
        } else {
            0
        };
        self.go_to_line(line);
    }
}
