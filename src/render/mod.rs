//! Markdown rendering with comrak.
//!
//! One parse produces both outputs of a refresh:
//! - [`RenderedView::html`]: the HTML used by the export layer
//! - [`RenderedView::preview`]: styled logical lines for the preview pane

mod html;
mod preview;

pub use preview::{LineKind, PreviewDocument, PreviewLine, PreviewSpan, SpanStyle};

use comrak::{Arena, Options, parse_document};

use crate::document::TextStats;

/// Renderer behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Treat single newlines inside a paragraph as hard breaks.
    pub hard_breaks: bool,
    /// Tables, strikethrough, autolinks and task lists.
    pub gfm: bool,
    /// Give headings an `id` derived from their text.
    pub header_ids: bool,
    /// Class prefix for the language of fenced code blocks.
    pub code_class_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            gfm: true,
            header_ids: true,
            code_class_prefix: "language-".to_string(),
        }
    }
}

/// Output of one refresh cycle.
#[derive(Debug, Clone, Default)]
pub struct RenderedView {
    pub html: String,
    pub preview: PreviewDocument,
    pub stats: TextStats,
}

/// Pure markdown renderer. Never fails; malformed input renders best-effort.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `markdown` to HTML only.
    pub fn render_html(&self, markdown: &str) -> String {
        let arena = Arena::new();
        let options = comrak_options(&self.options);
        let root = parse_document(&arena, markdown, &options);
        html::format(root, &options, &self.options.code_class_prefix)
    }

    /// Full refresh output: HTML, preview lines and counts.
    pub fn render(&self, markdown: &str) -> RenderedView {
        let arena = Arena::new();
        let options = comrak_options(&self.options);
        let root = parse_document(&arena, markdown, &options);
        RenderedView {
            html: html::format(root, &options, &self.options.code_class_prefix),
            preview: preview::build(root, self.options.hard_breaks),
            stats: TextStats::compute(markdown),
        }
    }
}

fn comrak_options(opts: &RenderOptions) -> Options {
    let mut options = Options::default();

    if opts.gfm {
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
    }
    if opts.header_ids {
        options.extension.header_ids = Some(String::new());
    }
    options.render.hardbreaks = opts.hard_breaks;
    // Raw HTML in the source is passed through to the preview page.
    options.render.unsafe_ = true;

    options
}
