//! Status bar: title, chapter, position and pending work.

use crate::model::{Anchor, UnderlineMode};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};

/// One-line summary of where the reader is.
#[derive(Debug, Clone)]
pub struct StatusLine<'a> {
    /// Document title (the file name).
    pub title: &'a str,
    /// Current anchor.
    pub anchor: Anchor,
    /// Number of logical lines in the document.
    pub total_lines: usize,
    /// Title of the chapter containing the anchor.
    pub chapter: Option<&'a str>,
    /// Active row decoration.
    pub underline: UnderlineMode,
    /// Progress of a running format job.
    pub formatting: Option<f64>,
}

impl StatusLine<'_> {
    /// Position through the document as `line / total`, in percent.
    pub fn percent(&self) -> usize {
        if self.total_lines == 0 {
            return 100;
        }
        self.anchor.line.min(self.total_lines) * 100 / self.total_lines
    }

    /// Rendered status text, fields separated by ` | `.
    pub fn text(&self) -> String {
        let mut parts = vec![self.title.to_string()];
        if let Some(chapter) = self.chapter {
            parts.push(chapter.to_string());
        }
        parts.push(format!(
            "line {}/{} ({}%)",
            self.anchor.line + 1,
            self.total_lines,
            self.percent()
        ));
        if self.underline != UnderlineMode::None {
            parts.push(format!("underline: {}", self.underline.name()));
        }
        if let Some(progress) = self.formatting {
            parts.push(format!("formatting {:.0}%", progress * 100.0));
        }
        parts.join(" | ")
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.text())
            .style(Style::default().add_modifier(Modifier::REVERSED))
            .render(area, buf);
    }
}
