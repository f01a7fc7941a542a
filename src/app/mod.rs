//! Terminal front-end and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, Prompt, PromptKind, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::SessionConfig;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    store_dir: PathBuf,
    config: SessionConfig,
    preview_visible: bool,
    scroll_sync: bool,
    export_dir: PathBuf,
}

impl App {
    /// Create an application persisting to `store_dir`.
    pub fn new(store_dir: PathBuf) -> Self {
        Self {
            store_dir,
            config: SessionConfig::default(),
            preview_visible: true,
            scroll_sync: true,
            export_dir: PathBuf::from("."),
        }
    }

    /// Timing, theme and renderer settings for the session.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set initial preview pane visibility.
    pub const fn with_preview_visible(mut self, visible: bool) -> Self {
        self.preview_visible = visible;
        self
    }

    /// Enable or disable mirroring scroll between the panes.
    pub const fn with_scroll_sync(mut self, enabled: bool) -> Self {
        self.scroll_sync = enabled;
        self
    }

    /// Directory export artifacts are written to.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }
}

#[cfg(test)]
mod tests;
