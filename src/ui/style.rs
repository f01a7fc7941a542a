//! Terminal colors for the light and dark themes.
//!
//! Pane backgrounds are painted explicitly so the chosen theme shows even
//! when the terminal's own background disagrees with it.

use ratatui::style::{Color, Modifier, Style};

use crate::render::{LineKind, SpanStyle};
use crate::theme::Theme;

/// Resolved styles for one theme.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Base text on the pane background
    pub base: Style,
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    /// Heading level 4 and deeper
    pub h4: Style,
    pub code: Style,
    pub inline_code: Style,
    pub quote: Style,
    pub link: Style,
    pub rule: Style,
    pub table: Style,
    pub html: Style,
    /// Editor line-number gutter
    pub gutter: Style,
    pub caret: Style,
    pub selection: Style,
    pub border: Style,
    pub status: Style,
    /// Unsaved marker in the status bar
    pub unsaved: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        let bg = Color::Rgb(0x1e, 0x1e, 0x1e);
        let base = Style::default().fg(Color::Rgb(0xff, 0xff, 0xff)).bg(bg);
        Self {
            base,
            h1: base
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: base.fg(Color::Green).add_modifier(Modifier::BOLD),
            h3: base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
            h4: base.fg(Color::Blue).add_modifier(Modifier::BOLD),
            code: base.fg(Color::Indexed(250)).bg(Color::Rgb(0x2d, 0x2d, 0x2d)),
            inline_code: base.fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: base
                .fg(Color::Rgb(0xcc, 0xcc, 0xcc))
                .add_modifier(Modifier::ITALIC),
            link: base
                .fg(Color::Rgb(0x4d, 0xab, 0xf7))
                .add_modifier(Modifier::UNDERLINED),
            rule: base.fg(Color::Rgb(0x40, 0x40, 0x40)),
            table: base,
            html: base.fg(Color::Indexed(245)).add_modifier(Modifier::DIM),
            gutter: base.fg(Color::Indexed(242)),
            caret: Style::default().bg(Color::White).fg(Color::Black),
            selection: Style::default().bg(Color::Indexed(24)).fg(Color::White),
            border: base.fg(Color::Rgb(0x40, 0x40, 0x40)),
            status: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            unsaved: Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn light() -> Self {
        let bg = Color::Rgb(0xff, 0xff, 0xff);
        let base = Style::default().fg(Color::Rgb(0x33, 0x33, 0x33)).bg(bg);
        Self {
            base,
            h1: base
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: base.fg(Color::Indexed(28)).add_modifier(Modifier::BOLD),
            h3: base.fg(Color::Indexed(136)).add_modifier(Modifier::BOLD),
            h4: base.fg(Color::Indexed(25)).add_modifier(Modifier::BOLD),
            code: base.fg(Color::Indexed(238)).bg(Color::Rgb(0xf5, 0xf5, 0xf5)),
            inline_code: base.fg(Color::Indexed(124)).add_modifier(Modifier::BOLD),
            quote: base
                .fg(Color::Rgb(0x66, 0x66, 0x66))
                .add_modifier(Modifier::ITALIC),
            link: base
                .fg(Color::Rgb(0x00, 0x7b, 0xff))
                .add_modifier(Modifier::UNDERLINED),
            rule: base.fg(Color::Rgb(0xe0, 0xe0, 0xe0)),
            table: base,
            html: base.fg(Color::Indexed(244)),
            gutter: base.fg(Color::Indexed(247)),
            caret: Style::default().bg(Color::Black).fg(Color::White),
            selection: Style::default().bg(Color::Indexed(153)).fg(Color::Black),
            border: base.fg(Color::Rgb(0xe0, 0xe0, 0xe0)),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            unsaved: Style::default()
                .bg(Color::Indexed(252))
                .fg(Color::Indexed(124))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a whole preview line.
    pub const fn line(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Heading(1) => self.h1,
            LineKind::Heading(2) => self.h2,
            LineKind::Heading(3) => self.h3,
            LineKind::Heading(_) => self.h4,
            LineKind::CodeBlock => self.code,
            LineKind::Quote => self.quote,
            LineKind::Rule => self.rule,
            LineKind::TableHeader => self.table.add_modifier(Modifier::BOLD),
            LineKind::TableRow => self.table,
            LineKind::Html => self.html,
            LineKind::Empty | LineKind::Paragraph | LineKind::ListItem => self.base,
        }
    }

    /// Inline span style layered over its line's style.
    pub fn span(&self, line: Style, span: SpanStyle) -> Style {
        let mut style = line;
        if span.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if span.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if span.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if span.code {
            style = style.patch(self.inline_code);
        }
        if span.link {
            style = style.patch(self.link);
        }
        style
    }
}
