//! Viewport geometry: padding, row pitch and absolute row positions.

use crate::model::ViewportSize;

/// Padding around the text area and around each row, in measurer units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    /// Left and right margin.
    pub side: f32,
    /// Top and bottom margin.
    pub vertical: f32,
    /// Space above and below every text row.
    pub row: f32,
}

impl Padding {
    /// Defaults for a pixel-based renderer.
    pub const PIXELS: Self = Self {
        side: 50.0,
        vertical: 20.0,
        row: 5.0,
    };

    /// No padding at all.
    pub const NONE: Self = Self {
        side: 0.0,
        vertical: 0.0,
        row: 0.0,
    };

    /// Area left for text once the side and vertical margins are removed.
    ///
    /// Dimensions may come out zero or negative for tiny viewports; callers check
    /// [`ViewportSize::is_empty`].
    pub fn working_area(&self, size: ViewportSize) -> ViewportSize {
        ViewportSize::new(
            size.width - 2.0 * self.side,
            size.height - 2.0 * self.vertical,
        )
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::PIXELS
    }
}

/// Vertical metrics of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Measured height of a line of text.
    pub line_height: f32,
    /// Padding above and below the text.
    pub row_padding: f32,
}

impl RowMetrics {
    /// Create row metrics.
    pub fn new(line_height: f32, row_padding: f32) -> Self {
        Self {
            line_height,
            row_padding,
        }
    }

    /// Distance between the tops of consecutive rows.
    pub fn pitch(&self) -> f32 {
        self.line_height + 2.0 * self.row_padding
    }

    /// Number of whole rows that fit `height`.
    pub fn allowed_rows(&self, height: f32) -> usize {
        let pitch = self.pitch();
        if pitch <= 0.0 || height <= 0.0 {
            return 0;
        }
        (height / pitch) as usize
    }
}

/// Absolute position of one visible row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    /// Left edge of the text.
    pub x: f32,
    /// Top of the row's pitch box.
    pub y: f32,
    /// Top of the text inside the row.
    pub text_y: f32,
    /// Where an underline is drawn, directly under the text.
    pub underline_y: f32,
}

/// Place row `index`: `x = side`, `y = vertical + index * pitch`.
pub fn place_row(padding: &Padding, metrics: &RowMetrics, index: usize) -> RowPlacement {
    let y = padding.vertical + index as f32 * metrics.pitch();
    let text_y = y + metrics.row_padding;
    RowPlacement {
        x: padding.side,
        y,
        text_y,
        underline_y: text_y + metrics.line_height,
    }
}
