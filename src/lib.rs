// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportError)
    clippy::module_name_repetitions
)]

//! # mdsplit
//!
//! A split-pane terminal markdown editor with live preview.
//!
//! mdsplit keeps one document in step with its rendered preview:
//! - Debounced re-rendering after typing stops
//! - Word and character counts
//! - Proportional scroll mirroring between the panes
//! - Autosave to a local key-value store
//! - Import and export (markdown, HTML, plain text, print)
//!
//! ## Architecture
//!
//! The terminal front-end uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Everything below the front-end is plain library code driven by a
//! millisecond clock, so it runs the same in tests as in the event loop.
//!
//! ## Modules
//!
//! - [`session`]: The editing session tying the pieces together
//! - [`sync`]: Debounced refresh pipeline and autosave timer
//! - [`scroll`]: Scroll ratio mirroring with a re-entrancy guard
//! - [`document`]: Document state, dirty tracking and text statistics
//! - [`render`]: Markdown to HTML and preview lines via comrak
//! - [`storage`]: Key-value persistence
//! - [`export`]: Import and export
//! - [`format`]: Markdown formatting shortcuts
//! - [`editor`]: Rope-backed text buffer
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod format;
pub mod render;
pub mod scroll;
pub mod session;
pub mod storage;
pub mod sync;
pub mod theme;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::DocumentState;
    pub use crate::render::{RenderedView, Renderer};
    pub use crate::session::{Session, SessionConfig};
    pub use crate::storage::{DirStore, KeyValueStore, MemoryStore};
    pub use crate::ui::viewport::Viewport;
}
