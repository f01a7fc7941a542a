//! Lightweight editor module for the source pane.
//!
//! Provides a rope-backed text buffer with a caret and selection,
//! designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
