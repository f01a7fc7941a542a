use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::session::SessionConfig;
use crate::theme::Theme;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_preview: bool,
    pub no_scroll_sync: bool,
    pub theme: Option<Theme>,
    pub debounce_ms: Option<u64>,
    pub autosave_ms: Option<u64>,
    pub scroll_release_ms: Option<u64>,
    pub store: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_preview: self.no_preview || other.no_preview,
            no_scroll_sync: self.no_scroll_sync || other.no_scroll_sync,
            theme: other.theme.or(self.theme),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            autosave_ms: other.autosave_ms.or(self.autosave_ms),
            scroll_release_ms: other.scroll_release_ms.or(self.scroll_release_ms),
            store: other.store.clone().or_else(|| self.store.clone()),
            log: other.log.clone().or_else(|| self.log.clone()),
        }
    }

    /// Session timing with the defaults filled in for unset flags.
    pub fn session_config(&self) -> SessionConfig {
        let defaults = SessionConfig::default();
        SessionConfig {
            debounce_ms: self.debounce_ms.unwrap_or(defaults.debounce_ms),
            autosave_ms: self.autosave_ms.unwrap_or(defaults.autosave_ms),
            scroll_release_ms: self.scroll_release_ms.unwrap_or(defaults.scroll_release_ms),
            theme: self.theme,
            render: defaults.render,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mdsplit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mdsplit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mdsplit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("mdsplit").join("config");
        }
    }

    PathBuf::from(".mdsplitrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mdsplitrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mdsplit defaults (saved with --save)".to_string());
    if flags.no_preview {
        lines.push("--no-preview".to_string());
    }
    if flags.no_scroll_sync {
        lines.push("--no-scroll-sync".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {theme}"));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if let Some(ms) = flags.autosave_ms {
        lines.push(format!("--autosave-ms {ms}"));
    }
    if let Some(ms) = flags.scroll_release_ms {
        lines.push(format!("--scroll-release-ms {ms}"));
    }
    if let Some(dir) = &flags.store {
        lines.push(format!("--store {}", dir.display()));
    }
    if let Some(log) = &flags.log {
        lines.push(format!("--log {}", log.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let takes_value = matches!(
            name,
            "--theme"
                | "--debounce-ms"
                | "--autosave-ms"
                | "--scroll-release-ms"
                | "--store"
                | "--log"
        );
        let value = if takes_value && inline.is_none() {
            i += 1;
            tokens.get(i).map(String::as_str)
        } else {
            inline
        };
        match (name, value) {
            ("--no-preview", None) => flags.no_preview = true,
            ("--no-scroll-sync", None) => flags.no_scroll_sync = true,
            ("--theme", Some(v)) => flags.theme = Theme::from_str(v).ok(),
            ("--debounce-ms", Some(v)) => flags.debounce_ms = parse_ms(v),
            ("--autosave-ms", Some(v)) => flags.autosave_ms = parse_ms(v),
            ("--scroll-release-ms", Some(v)) => flags.scroll_release_ms = parse_ms(v),
            ("--store", Some(v)) => flags.store = Some(PathBuf::from(v)),
            ("--log", Some(v)) => flags.log = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}

/// Positive millisecond counts only; a zero window is rejected.
fn parse_ms(s: &str) -> Option<u64> {
    s.parse().ok().filter(|ms| *ms > 0)
}
