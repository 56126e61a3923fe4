//! Render frame: what a drawing collaborator needs to paint one layout.

use crate::layout::{DashPattern, RowPlacement};
use crate::model::{Anchor, RowSegment, UnderlineMode};

/// One visible row and where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRow<'a> {
    /// Text and offsets of the row.
    pub segment: &'a RowSegment,
    /// Where the row and its underline are drawn.
    pub placement: RowPlacement,
}

/// Snapshot of the visible rows, borrowed from the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    /// Rows top to bottom.
    pub rows: Vec<PlacedRow<'a>>,
    /// Anchor the frame was laid out from.
    pub anchor: Anchor,
    /// Width available to each row (and to its underline).
    pub row_width: f32,
    /// Decoration to draw under every row.
    pub underline: UnderlineMode,
    /// Pre-tiled dash mask, present only for [`UnderlineMode::Dashed`].
    pub dash: Option<&'a DashPattern>,
}

impl RenderFrame<'_> {
    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row text, top to bottom.
    pub fn texts(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.segment.text.as_str()).collect()
    }
}
