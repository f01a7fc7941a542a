//! File import and export.
//!
//! Export produces one of three file artifacts from the current state, or
//! hands a standalone HTML page to the host for printing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::render::RenderedView;
use crate::theme::Theme;

/// Filename stem used when none is given.
pub const DEFAULT_STEM: &str = "document";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to hand off {path} for printing: {source}")]
    Print {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Text,
    Print,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Markdown, Self::Html, Self::Text, Self::Print];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown (.md)",
            Self::Html => "HTML (.html)",
            Self::Text => "Plain text (.txt)",
            Self::Print => "Print",
        }
    }

    /// File extension of the artifact, `None` for the print hand-off.
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some("md"),
            Self::Html => Some("html"),
            Self::Text => Some("txt"),
            Self::Print => None,
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// The page was handed to the host opener for printing.
    Printed(PathBuf),
}

/// Content of the artifact for `format`.
pub fn export_content(
    format: ExportFormat,
    markdown: &str,
    view: &RenderedView,
    theme: Theme,
) -> String {
    match format {
        ExportFormat::Markdown => markdown.to_string(),
        ExportFormat::Html | ExportFormat::Print => html_page(&view.html, theme),
        ExportFormat::Text => view.preview.plain_text(),
    }
}

/// Target path for `stem` in `dir`; an empty stem falls back to [`DEFAULT_STEM`].
pub fn export_path(dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    let stem = stem.trim();
    let stem = if stem.is_empty() { DEFAULT_STEM } else { stem };
    let ext = format.extension().unwrap_or("html");
    dir.join(format!("{stem}.{ext}"))
}

/// Write the artifact for `format` into `dir`.
///
/// # Errors
/// Returns an error if the file cannot be written or the print hand-off fails.
pub fn export(
    format: ExportFormat,
    dir: &Path,
    stem: &str,
    markdown: &str,
    view: &RenderedView,
    theme: Theme,
) -> Result<ExportOutcome, ExportError> {
    let content = export_content(format, markdown, view, theme);
    if format == ExportFormat::Print {
        let path = std::env::temp_dir().join(format!("mdsplit-print-{}.html", std::process::id()));
        write_file(&path, &content)?;
        open_with_host(&path).map_err(|source| ExportError::Print {
            path: path.clone(),
            source,
        })?;
        return Ok(ExportOutcome::Printed(path));
    }
    let path = export_path(dir, stem, format);
    write_file(&path, &content)?;
    tracing::info!(path = %path.display(), ?format, "exported");
    Ok(ExportOutcome::Written(path))
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether `path` looks like a markdown or plain-text file.
pub fn is_importable(path: &Path) -> bool {
    let name = path.to_string_lossy();
    if name.ends_with(".md") {
        return true;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ["txt", "text", "markdown"]
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => true,
    }
}

/// Read a file for import.
///
/// Unsupported files (wrong type or not UTF-8 text) yield `Ok(None)`.
///
/// # Errors
/// Returns an error if a supported file cannot be read.
pub fn read_import(path: &Path) -> Result<Option<String>, ExportError> {
    if !is_importable(path) {
        tracing::debug!(path = %path.display(), "import ignored: unsupported type");
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.contains(&0) {
        tracing::debug!(path = %path.display(), "import ignored: binary content");
        return Ok(None);
    }
    Ok(String::from_utf8(bytes).ok())
}

/// Standalone HTML page around the rendered body, styled for `theme`.
pub fn html_page(body: &str, theme: Theme) -> String {
    let p = Palette::for_theme(theme);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Exported Markdown</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            line-height: 1.6;
            color: {text};
            background-color: {background};
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
        }}
        h1, h2, h3, h4, h5, h6 {{ margin-top: 24px; margin-bottom: 16px; font-weight: 600; line-height: 1.25; }}
        h1 {{ font-size: 2em; border-bottom: 1px solid {border}; padding-bottom: 0.3em; }}
        h2 {{ font-size: 1.5em; border-bottom: 1px solid {border}; padding-bottom: 0.3em; }}
        h3 {{ font-size: 1.25em; }}
        code {{ background-color: {code_bg}; padding: 0.2em 0.4em; border-radius: 3px; font-size: 85%; }}
        pre {{ background-color: {code_bg}; padding: 16px; overflow: auto; border-radius: 6px; }}
        pre code {{ padding: 0; background: none; }}
        blockquote {{ padding: 0 1em; color: {muted}; border-left: 0.25em solid {border}; }}
        a {{ color: {link}; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        table {{ border-collapse: collapse; width: 100%; }}
        table th, table td {{ padding: 6px 13px; border: 1px solid {border}; }}
        table th {{ background-color: {code_bg}; font-weight: 600; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
        text = p.text,
        background = p.background,
        border = p.border,
        code_bg = p.code_bg,
        muted = p.muted,
        link = p.link,
    )
}

struct Palette {
    text: &'static str,
    background: &'static str,
    border: &'static str,
    code_bg: &'static str,
    muted: &'static str,
    link: &'static str,
}

impl Palette {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: "#333333",
                background: "#ffffff",
                border: "#e0e0e0",
                code_bg: "#f5f5f5",
                muted: "#666666",
                link: "#007bff",
            },
            Theme::Dark => Self {
                text: "#ffffff",
                background: "#1e1e1e",
                border: "#404040",
                code_bg: "#2d2d2d",
                muted: "#cccccc",
                link: "#4dabf7",
            },
        }
    }
}

/// Open `path` with the platform's default handler.
fn open_with_host(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?.wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?
            .wait()?;
        Ok(())
    }
}
