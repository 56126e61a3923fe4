//! Page widget: paints one render frame into a terminal area.
//!
//! Rows are placed by the controller in cell units relative to the page area.
//! Underlines cannot be drawn below a terminal cell, so they become the
//! `UNDERLINED` modifier across the full row width; a dashed underline only sets
//! it on the cells the dash mask inks.

use crate::model::UnderlineMode;
use crate::viewport::RenderFrame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

/// Renders the visible rows of a [`RenderFrame`].
pub struct PageWidget<'f, 'a> {
    frame: &'f RenderFrame<'a>,
    style: Style,
}

impl<'f, 'a> PageWidget<'f, 'a> {
    /// Widget over `frame`, in the default style.
    pub fn new(frame: &'f RenderFrame<'a>) -> Self {
        Self {
            frame,
            style: Style::default(),
        }
    }

    /// Base style for the text.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for PageWidget<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let underline = Style::default().add_modifier(Modifier::UNDERLINED);
        for row in &self.frame.rows {
            let x = area.x.saturating_add(row.placement.x.max(0.0) as u16);
            let y = area.y.saturating_add(row.placement.text_y.max(0.0) as u16);
            if y >= area.bottom() || x >= area.right() {
                continue;
            }
            let width = (self.frame.row_width.max(0.0) as u16).min(area.right() - x);
            buf.set_stringn(x, y, &row.segment.text, usize::from(width), self.style);

            match (self.frame.underline, self.frame.dash) {
                (UnderlineMode::None, _) => {}
                (UnderlineMode::Dashed, Some(dash)) => {
                    for dx in (0..width).filter(|dx| dash.is_ink(u32::from(*dx))) {
                        buf[(x + dx, y)].set_style(underline);
                    }
                }
                _ => buf.set_style(Rect::new(x, y, width, 1), underline),
            }
        }
    }
}
