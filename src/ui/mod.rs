//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`wrap`]: Laying preview lines out at the pane width
//! - [`style`]: Theme palettes

pub mod style;
pub mod viewport;
pub mod wrap;

mod render;
mod status;

pub use render::{PaneLayout, line_number_width, pane_layout, render};

pub const PREVIEW_LEFT_PADDING: u16 = 2;
