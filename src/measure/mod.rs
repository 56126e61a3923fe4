//! Text measurement collaborator.
//!
//! The core never loads fonts or rasterizes glyphs. It only asks a [`TextMeasurer`]
//! how wide a string is for the current font and size, and how tall one text row is.
//! A measurer is fixed for the duration of a layout pass; a font or size change means
//! installing a new measurer, which recalibrates the unit width.

use crate::model::MeasurementFailure;
use unicode_width::UnicodeWidthStr;

/// Calibration glyph: one wide CJK ideograph.
///
/// Its measured width is the "unit width" used to estimate how many code points
/// fit a row before exact measurement.
pub const REFERENCE_GLYPH: &str = "我";

/// Measures rendered text for one fixed font and size.
///
/// Implementations must be deterministic: the same input yields the same width
/// for as long as the measurer is installed.
pub trait TextMeasurer {
    /// Width of `text` rendered on a single row.
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure>;

    /// Height of one rendered row of text, before row padding.
    fn line_height(&self) -> f32;

    /// Width of the [`REFERENCE_GLYPH`].
    fn unit_width(&self) -> Result<f32, MeasurementFailure> {
        self.measure(REFERENCE_GLYPH)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure> {
        (**self).measure(text)
    }

    fn line_height(&self) -> f32 {
        (**self).line_height()
    }

    fn unit_width(&self) -> Result<f32, MeasurementFailure> {
        (**self).unit_width()
    }
}

/// Terminal measurer: widths are display columns, rows are one cell tall.
///
/// Wide (East Asian) characters take two columns, so the unit width is 2.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure> {
        Ok(text.width() as f32)
    }

    fn line_height(&self) -> f32 {
        1.0
    }
}

/// Measurer built from a per-character advance function.
///
/// The width of a string is the sum of its characters' advances (no kerning).
/// Useful for bitmap fonts with a fixed advance table.
#[derive(Debug, Clone)]
pub struct AdvanceMeasurer<F> {
    advance: F,
    line_height: f32,
}

impl<F> AdvanceMeasurer<F>
where
    F: Fn(char) -> f32,
{
    /// Create a measurer from an advance function and a row height.
    pub fn new(advance: F, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl<F> TextMeasurer for AdvanceMeasurer<F>
where
    F: Fn(char) -> f32,
{
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure> {
        Ok(text.chars().map(&self.advance).sum())
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Number of plain spaces whose width approximates `wide_chars` reference glyphs.
///
/// Returns `floor(width(glyphs) / width(" ")) + 1`, or 0 when no indent is requested.
///
/// # Errors
///
/// Propagates measurer failures, and fails if the measurer reports a non-positive
/// width for a space (the ratio would be meaningless).
pub fn leading_space_count<M: TextMeasurer + ?Sized>(
    measurer: &M,
    wide_chars: usize,
) -> Result<usize, MeasurementFailure> {
    if wide_chars == 0 {
        return Ok(0);
    }
    let target = measurer.measure(&REFERENCE_GLYPH.repeat(wide_chars))?;
    let space = measurer.measure(" ")?;
    if space <= 0.0 {
        return Err(MeasurementFailure::new(" ", "space has non-positive width"));
    }
    Ok((target / space) as usize + 1)
}
