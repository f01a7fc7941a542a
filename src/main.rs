//! mdsplit - A split-pane terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! mdsplit
//! mdsplit --theme dark --no-scroll-sync
//! mdsplit --store ~/notes/.mdsplit --log mdsplit.log
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdsplit::app::App;
use mdsplit::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use mdsplit::storage::default_store_dir;
use mdsplit::theme::Theme;

/// A split-pane terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "mdsplit", version, about, long_about = None)]
struct Cli {
    /// Start with the preview pane hidden
    #[arg(long)]
    no_preview: bool,

    /// Do not mirror scrolling between the panes
    #[arg(long)]
    no_scroll_sync: bool,

    /// Color theme (overrides the stored choice)
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Quiet period before the preview refreshes, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    debounce_ms: Option<u64>,

    /// Autosave interval, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    autosave_ms: Option<u64>,

    /// Delay before a mirrored scroll may propagate back, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    scroll_release_ms: Option<u64>,

    /// Directory holding the saved document and theme
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Write log output to a file (also read from `MDSPLIT_LOG`)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config file
    #[arg(long)]
    clear: bool,
}

/// Route tracing output to `path`, or drop it while the TUI owns the screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_path = effective
        .log
        .clone()
        .or_else(|| std::env::var_os("MDSPLIT_LOG").map(PathBuf::from));
    init_logging(log_path.as_deref())?;

    let store_dir = effective.store.clone().unwrap_or_else(default_store_dir);
    let export_dir = std::env::current_dir().context("Failed to read current directory")?;
    tracing::info!(
        store = %store_dir.display(),
        export = %export_dir.display(),
        ?effective,
        "starting"
    );

    let mut app = App::new(store_dir)
        .with_config(effective.session_config())
        .with_preview_visible(!effective.no_preview)
        .with_scroll_sync(!effective.no_scroll_sync)
        .with_export_dir(export_dir);

    app.run().context("Application error")
}
