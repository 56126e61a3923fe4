//! Viewport controller: anchor, visible rows and navigation.
//!
//! The controller owns everything about *where* the reader is looking: the anchor
//! (first visible code point), the rows currently on screen, the end anchor where
//! layout stopped, and the viewport size. Content is passed in by reference on every
//! call; the controller never stores text.
//!
//! # Invariants
//! - `rows[0]` starts exactly at `anchor` whenever any row is visible.
//! - `anchor` is `(0, 0)` on empty content, otherwise `anchor.line < content.len()`.
//! - Every operation that moves the anchor re-runs layout before returning.
//! - Boundary requests (start/end of document, out-of-range jumps, zero-sized
//!   viewport) return [`Update::None`] instead of failing.

use crate::layout::{
    place_row, DashPattern, DashStyle, LineBreaker, Padding, RowMetrics,
};
use crate::measure::TextMeasurer;
use crate::model::{Anchor, MeasurementFailure, RowSegment, UnderlineMode, ViewportSize};
use crate::viewport::frame::{PlacedRow, RenderFrame};
use tracing::{debug, trace};

/// What an operation did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Nothing changed; no redraw needed.
    None,
    /// Rows or decoration changed but the anchor did not.
    Redraw,
    /// The anchor moved (or content was replaced); rows were recomputed.
    Moved,
}

impl Update {
    /// Whether the view must be redrawn.
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether position listeners must be told.
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved)
    }

    /// The stronger of two updates: a move beats a redraw, a redraw beats nothing.
    pub fn merge(self, other: Update) -> Update {
        match (self, other) {
            (Self::Moved, _) | (_, Self::Moved) => Self::Moved,
            (Self::Redraw, _) | (_, Self::Redraw) => Self::Redraw,
            _ => Self::None,
        }
    }
}

/// Decoration and spacing settings for a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportStyle {
    /// Margins and row padding.
    pub padding: Padding,
    /// Underline decoration.
    pub underline: UnderlineMode,
    /// Dash geometry for [`UnderlineMode::Dashed`].
    pub dash: DashStyle,
}

impl Default for ViewportStyle {
    fn default() -> Self {
        Self {
            padding: Padding::PIXELS,
            underline: UnderlineMode::None,
            dash: DashStyle::default(),
        }
    }
}

/// Whether `anchor` may be the first visible position in `content`.
///
/// The line must exist and the offset must fall inside it (offset 0 is always
/// accepted, so empty lines can be anchored).
pub fn is_valid_anchor<S: AsRef<str>>(content: &[S], anchor: Anchor) -> bool {
    let Some(line) = content.get(anchor.line) else {
        return false;
    };
    anchor.offset == 0 || anchor.offset < line.as_ref().chars().count()
}

/// Stateful viewport over borrowed content.
pub struct ViewportController<M> {
    measurer: M,
    style: ViewportStyle,
    unit_width: f32,
    metrics: RowMetrics,
    anchor: Anchor,
    end_anchor: Anchor,
    rows: Vec<RowSegment>,
    size: ViewportSize,
    area: ViewportSize,
    dash: Option<DashPattern>,
}

impl<M: TextMeasurer> ViewportController<M> {
    /// Create a controller anchored at `anchor`.
    ///
    /// No rows are visible until the first [`layout`](Self::layout).
    ///
    /// # Errors
    ///
    /// Fails if the measurer cannot measure the reference glyph.
    pub fn new(measurer: M, style: ViewportStyle, anchor: Anchor) -> Result<Self, MeasurementFailure> {
        let unit_width = measurer.unit_width()?;
        let metrics = RowMetrics::new(measurer.line_height(), style.padding.row);
        Ok(Self {
            measurer,
            style,
            unit_width,
            metrics,
            anchor,
            end_anchor: anchor,
            rows: Vec::new(),
            size: ViewportSize::default(),
            area: ViewportSize::default(),
            dash: None,
        })
    }

    // ===== Accessors =====

    /// First visible position.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Position just past the last visible row.
    ///
    /// When the last row finishes its line this is the next line's start; at the end
    /// of the document it is the end of the last line.
    pub fn end_anchor(&self) -> Anchor {
        self.end_anchor
    }

    /// Rows currently on screen.
    pub fn rows(&self) -> &[RowSegment] {
        &self.rows
    }

    /// Outer viewport size from the last layout.
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Text area (viewport minus margins) from the last layout.
    pub fn area(&self) -> ViewportSize {
        self.area
    }

    /// Active underline decoration.
    pub fn underline(&self) -> UnderlineMode {
        self.style.underline
    }

    /// Measured width of the reference glyph.
    pub fn unit_width(&self) -> f32 {
        self.unit_width
    }

    /// Row metrics (line height, padding, pitch).
    pub fn metrics(&self) -> RowMetrics {
        self.metrics
    }

    /// The installed measurer.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Rows that fit the current text area.
    pub fn allowed_rows(&self) -> usize {
        self.metrics.allowed_rows(self.area.height)
    }

    /// Place the visible rows for the render collaborator.
    pub fn frame(&self) -> RenderFrame<'_> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, segment)| PlacedRow {
                segment,
                placement: place_row(&self.style.padding, &self.metrics, i),
            })
            .collect();
        RenderFrame {
            rows,
            anchor: self.anchor,
            row_width: self.area.width,
            underline: self.style.underline,
            dash: self.dash.as_ref(),
        }
    }

    // ===== Layout =====

    /// Lay out rows for `size` from the current anchor.
    pub fn layout<S: AsRef<str>>(
        &mut self,
        content: &[S],
        size: ViewportSize,
    ) -> Result<Update, MeasurementFailure> {
        self.size = size;
        self.relayout(content)?;
        Ok(Update::Redraw)
    }

    fn breaker(&self) -> LineBreaker<'_, M> {
        LineBreaker::new(&self.measurer, self.area.width, self.unit_width)
    }

    fn relayout<S: AsRef<str>>(&mut self, content: &[S]) -> Result<(), MeasurementFailure> {
        self.area = self.style.padding.working_area(self.size);
        self.rows.clear();
        self.end_anchor = self.anchor;
        self.dash = None;
        if self.area.is_empty() {
            trace!(size = ?self.size, "viewport has no text area");
            return Ok(());
        }
        let allowed = self.allowed_rows();
        if allowed == 0 {
            return Ok(());
        }
        if self.style.underline == UnderlineMode::Dashed {
            self.dash = Some(DashPattern::tile(self.style.dash, self.area.width as u32));
        }

        let mut rows = Vec::with_capacity(allowed);
        let mut end = self.anchor;
        let mut start = self.anchor.offset;
        'lines: for (index, text) in content.iter().enumerate().skip(self.anchor.line) {
            let breaks = self.breaker().forward(index, text.as_ref(), start)?;
            for row in breaks.rows {
                end = Anchor::new(index, row.end_offset());
                rows.push(row);
                if rows.len() >= allowed {
                    break 'lines;
                }
            }
            start = 0;
        }
        self.rows = rows;
        self.end_anchor = normalize_end(content, end);
        debug!(
            anchor = %self.anchor,
            end = %self.end_anchor,
            rows = self.rows.len(),
            allowed,
            "layout"
        );
        Ok(())
    }

    fn move_to<S: AsRef<str>>(
        &mut self,
        content: &[S],
        target: Anchor,
    ) -> Result<Update, MeasurementFailure> {
        if target == self.anchor {
            return Ok(Update::None);
        }
        self.anchor = target;
        self.relayout(content)?;
        Ok(Update::Moved)
    }

    // ===== Navigation =====

    /// Scroll down one row: the second visible row becomes the first.
    pub fn line_down<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        let Some(next) = self.rows.get(1).map(RowSegment::start) else {
            trace!("line down with fewer than two rows");
            return Ok(Update::None);
        };
        self.move_to(content, next)
    }

    /// Scroll up one row.
    ///
    /// Mid-line, the previous row is the last row of the current line broken up to
    /// the anchor; at a line start it is the last row of the previous line.
    pub fn line_up<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        let Some(first) = self.rows.first().map(RowSegment::start) else {
            return Ok(Update::None);
        };
        let Some(text) = content.get(first.line).map(AsRef::as_ref) else {
            trace!(%first, lines = content.len(), "line up from rows of replaced content");
            return Ok(Update::None);
        };
        let previous = if first.offset > 0 {
            self.breaker().reverse(first.line, text, first.offset)?.last().map(RowSegment::start)
        } else if first.line == 0 {
            trace!("line up at document start");
            return Ok(Update::None);
        } else {
            let line = first.line - 1;
            let Some(text) = content.get(line).map(AsRef::as_ref) else {
                return Ok(Update::None);
            };
            self.breaker().forward(line, text, 0)?.last().map(RowSegment::start)
        };
        match previous {
            Some(target) => self.move_to(content, target),
            None => Ok(Update::None),
        }
    }

    /// Scroll down one page: the row after the last visible row becomes the first.
    pub fn page_down<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        let Some(last_row) = self.rows.last() else {
            return Ok(Update::None);
        };
        if self.rows.len() < self.allowed_rows() {
            trace!("page down at document end");
            return Ok(Update::None);
        }
        if is_document_end(content, Anchor::new(last_row.line, last_row.end_offset())) {
            trace!("page down with last row ending the document");
            return Ok(Update::None);
        }
        self.move_to(content, self.end_anchor)
    }

    /// Scroll up one page: the row `allowed_rows` before the first visible row
    /// becomes the first, clamped to the document start.
    pub fn page_up<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        let Some(first) = self.rows.first().map(RowSegment::start) else {
            return Ok(Update::None);
        };
        if first.is_start() {
            trace!("page up at document start");
            return Ok(Update::None);
        }
        let target = self.walk_back(content, first, self.allowed_rows())?;
        self.move_to(content, target)
    }

    /// Jump to the document start.
    pub fn top<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        self.move_to(content, Anchor::START)
    }

    /// Jump to the last logical line.
    ///
    /// If the last line has at least `allowed_rows` rows, the anchor is the row
    /// `allowed_rows` from its end; otherwise it is the start of the last line.
    /// Nothing happens while the end of the document is already visible.
    pub fn bottom<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        let Some(last) = content.len().checked_sub(1) else {
            return Ok(Update::None);
        };
        let allowed = self.allowed_rows();
        let Some(last_row) = self.rows.last() else {
            return Ok(Update::None);
        };
        if is_document_end(content, Anchor::new(last_row.line, last_row.end_offset())) {
            trace!("bottom with document end visible");
            return Ok(Update::None);
        }
        let tail = self.breaker().forward(last, content[last].as_ref(), 0)?;
        let target = if tail.len() >= allowed {
            tail.rows[tail.len() - allowed].start()
        } else {
            Anchor::new(last, 0)
        };
        self.move_to(content, target)
    }

    /// Jump to `(line, offset)`, optionally placing it in the middle of the viewport.
    ///
    /// Positions outside the content are ignored: they usually come from a stale
    /// external position (a scrollbar computed before a reload).
    pub fn jump_to<S: AsRef<str>>(
        &mut self,
        content: &[S],
        line: usize,
        offset: usize,
        center: bool,
    ) -> Result<Update, MeasurementFailure> {
        let requested = Anchor::new(line, offset);
        if !is_valid_anchor(content, requested) {
            trace!(%requested, lines = content.len(), "ignoring out-of-range jump");
            return Ok(Update::None);
        }
        let target = if center {
            self.walk_back(content, requested, self.allowed_rows() / 2)?
        } else {
            requested
        };
        self.move_to(content, target)
    }

    /// Jump to the start of the line at `fraction` of the content (scrollbar drag).
    pub fn jump_to_fraction<S: AsRef<str>>(
        &mut self,
        content: &[S],
        fraction: f64,
    ) -> Result<Update, MeasurementFailure> {
        let Some(last) = content.len().checked_sub(1) else {
            return Ok(Update::None);
        };
        if fraction.is_nan() {
            return Ok(Update::None);
        }
        let line = ((content.len() as f64 * fraction.clamp(0.0, 1.0)) as usize).min(last);
        self.jump_to(content, line, 0, false)
    }

    /// Change the underline decoration and re-run layout.
    pub fn set_underline<S: AsRef<str>>(
        &mut self,
        content: &[S],
        mode: UnderlineMode,
    ) -> Result<Update, MeasurementFailure> {
        self.style.underline = mode;
        self.relayout(content)?;
        Ok(Update::Redraw)
    }

    /// Re-anchor after the content was replaced and re-run layout.
    ///
    /// The anchor survives if it still points inside the new content; otherwise it
    /// resets to the document start.
    pub fn content_changed<S: AsRef<str>>(&mut self, content: &[S]) -> Result<Update, MeasurementFailure> {
        if !is_valid_anchor(content, self.anchor) {
            debug!(anchor = %self.anchor, lines = content.len(), "anchor outside new content");
            self.anchor = Anchor::START;
        }
        self.relayout(content)?;
        Ok(Update::Moved)
    }

    /// Install a measurer for a new font or size, recalibrate and re-run layout.
    pub fn set_measurer<S: AsRef<str>>(
        &mut self,
        content: &[S],
        measurer: M,
    ) -> Result<Update, MeasurementFailure> {
        self.unit_width = measurer.unit_width()?;
        self.metrics = RowMetrics::new(measurer.line_height(), self.style.padding.row);
        self.measurer = measurer;
        self.relayout(content)?;
        Ok(Update::Redraw)
    }

    /// Anchor of the row `count` rows before `from`, clamped to the document start.
    ///
    /// A `from` outside the content (rows left over from replaced content) yields the
    /// current anchor, so the caller's move is a no-op.
    ///
    /// Rows before `from` on its own line come from reverse-breaking the line up to
    /// `from.offset`; earlier lines are broken forward in full.
    fn walk_back<S: AsRef<str>>(
        &self,
        content: &[S],
        from: Anchor,
        count: usize,
    ) -> Result<Anchor, MeasurementFailure> {
        let Some(text) = content.get(from.line).map(AsRef::as_ref) else {
            trace!(%from, lines = content.len(), "walk back from outside the content");
            return Ok(self.anchor);
        };
        if count == 0 {
            return Ok(from);
        }
        let breaker = self.breaker();
        let mut accumulated = 0;
        if from.offset > 0 {
            let before = breaker.reverse(from.line, text, from.offset)?;
            if before.len() >= count {
                return Ok(before.rows[before.len() - count].start());
            }
            accumulated = before.len();
        }
        for line in (0..from.line).rev() {
            let rows = breaker.forward(line, content[line].as_ref(), 0)?;
            if accumulated + rows.len() >= count {
                return Ok(rows.rows[rows.len() - (count - accumulated)].start());
            }
            accumulated += rows.len();
        }
        Ok(Anchor::START)
    }
}

/// Move an end position that finishes its line to the next line's start.
fn normalize_end<S: AsRef<str>>(content: &[S], end: Anchor) -> Anchor {
    let Some(line) = content.get(end.line) else {
        return end;
    };
    let exhausted = end.offset >= line.as_ref().chars().count();
    if exhausted && end.line + 1 < content.len() {
        Anchor::new(end.line + 1, 0)
    } else {
        end
    }
}

/// Whether `position` is at (or past) the end of the last line.
fn is_document_end<S: AsRef<str>>(content: &[S], position: Anchor) -> bool {
    match content.len().checked_sub(1) {
        None => true,
        Some(last) => {
            position.line > last
                || (position.line == last
                    && position.offset >= content[last].as_ref().chars().count())
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
