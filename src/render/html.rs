//! HTML output and post-processing.

use comrak::nodes::AstNode;
use comrak::{Options, format_html};

const DEFAULT_CODE_PREFIX: &str = "language-";
const EXTERNAL_LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer" "#;

pub(super) fn format<'a>(root: &'a AstNode<'a>, options: &Options, code_prefix: &str) -> String {
    let mut out = Vec::new();
    if let Err(err) = format_html(root, options, &mut out) {
        tracing::warn!(%err, "html formatting stopped early");
    }
    let html = String::from_utf8_lossy(&out).into_owned();
    let html = open_links_externally(&html);
    if code_prefix == DEFAULT_CODE_PREFIX {
        html
    } else {
        html.replace(
            &format!("<code class=\"{DEFAULT_CODE_PREFIX}"),
            &format!("<code class=\"{code_prefix}"),
        )
    }
}

/// Make document links open in a new tab. In-page anchors are left alone.
fn open_links_externally(html: &str) -> String {
    const NEEDLE: &str = "<a href=\"";
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(idx) = rest.find(NEEDLE) {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);
        let href = &tail[NEEDLE.len()..];
        if href.starts_with('#') {
            out.push_str(NEEDLE);
        } else {
            out.push_str("<a ");
            out.push_str(EXTERNAL_LINK_ATTRS);
            out.push_str("href=\"");
        }
        rest = href;
    }
    out.push_str(rest);
    out
}
