//! Document state and derived statistics.
//!
//! This module handles:
//! - The editable text buffer and its dirty/clean bookkeeping
//! - Word and character counts for the status bar
//! - Caret position reporting

mod state;
mod stats;

pub use state::{DocumentState, WELCOME_DOCUMENT};
pub use stats::{CursorPosition, TextStats, cursor_position, utf16_len};
