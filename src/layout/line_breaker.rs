//! Greedy width-probing line breaker.
//!
//! Splits one logical line into maximal rows that fit a width. Each row starts from an
//! estimate of `floor(width / unit_width)` code points and is corrected by measuring:
//! shrink while it overflows, then grow while the next code point still fits. Growth
//! jumps by the number of unit widths left in the slack, so a row costs a handful of
//! measurements rather than one per code point.
//!
//! Breaking in reverse is not a mirror image of breaking forward: greedy rows commit
//! from the start of the line, so the row ending at offset N is found by breaking
//! `line[..N]` forward from 0 and taking the last result.

use crate::measure::TextMeasurer;
use crate::model::{MeasurementFailure, RowSegment};
use tracing::trace;

/// Result of breaking (part of) one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breaks {
    /// Rows in reading order.
    pub rows: Vec<RowSegment>,
    /// Offset just past the last row (where a further forward pass would resume).
    pub next_offset: usize,
}

impl Breaks {
    /// The last row, if any.
    pub fn last(&self) -> Option<&RowSegment> {
        self.rows.last()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Byte offsets of every code point boundary in a line.
struct CharBounds<'a> {
    text: &'a str,
    bounds: Vec<usize>,
}

impl<'a> CharBounds<'a> {
    fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self { text, bounds }
    }

    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}

/// Line breaker for one measurer, row width and unit width.
///
/// Cheap to construct; the controller builds one per layout pass.
pub struct LineBreaker<'m, M: ?Sized> {
    measurer: &'m M,
    width: f32,
    unit_width: f32,
}

impl<'m, M: TextMeasurer + ?Sized> LineBreaker<'m, M> {
    /// Create a breaker for rows of `width`, estimating with `unit_width`.
    pub fn new(measurer: &'m M, width: f32, unit_width: f32) -> Self {
        Self {
            measurer,
            width,
            unit_width,
        }
    }

    /// Row width this breaker fits to.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Break `text` (logical line `line`) forward from code point `start`.
    ///
    /// An empty line yields one empty row when broken from 0. A start at or past the
    /// end of a non-empty line yields no rows.
    pub fn forward(
        &self,
        line: usize,
        text: &str,
        start: usize,
    ) -> Result<Breaks, MeasurementFailure> {
        if text.is_empty() {
            return Ok(Self::blank_row(line, start));
        }
        let chars = CharBounds::new(text);
        let end = chars.len();
        if start >= end {
            return Ok(Breaks {
                rows: Vec::new(),
                next_offset: end,
            });
        }
        self.segment(line, &chars, start, end)
    }

    /// Break `text[..end]` forward from 0, recovering the rows that end at `end`.
    ///
    /// `end` is clamped to the line length. An empty line yields one empty row.
    pub fn reverse(&self, line: usize, text: &str, end: usize) -> Result<Breaks, MeasurementFailure> {
        if text.is_empty() {
            return Ok(Self::blank_row(line, 0));
        }
        let chars = CharBounds::new(text);
        let end = end.min(chars.len());
        self.segment(line, &chars, 0, end)
    }

    fn blank_row(line: usize, start: usize) -> Breaks {
        let rows = if start == 0 {
            vec![RowSegment::new(line, 0, String::new(), 0)]
        } else {
            Vec::new()
        };
        Breaks {
            rows,
            next_offset: 0,
        }
    }

    fn segment(
        &self,
        line: usize,
        chars: &CharBounds<'_>,
        start: usize,
        end: usize,
    ) -> Result<Breaks, MeasurementFailure> {
        let mut rows = Vec::new();
        let mut pos = start;
        while pos < end {
            let n = self.fit(chars, pos, end)?;
            rows.push(RowSegment::new(
                line,
                pos,
                chars.slice(pos, pos + n).to_string(),
                n,
            ));
            pos += n;
        }
        Ok(Breaks {
            rows,
            next_offset: pos,
        })
    }

    /// Number of code points from `pos` that form one maximal row (at least 1).
    fn fit(&self, chars: &CharBounds<'_>, pos: usize, end: usize) -> Result<usize, MeasurementFailure> {
        let remaining = end - pos;
        let estimate = if self.unit_width > 0.0 {
            (self.width / self.unit_width) as usize
        } else {
            1
        };
        let mut amount = estimate.clamp(1, remaining);
        let mut measured = self.measurer.measure(chars.slice(pos, pos + amount))?;
        let mut probes = 1usize;

        while measured > self.width && amount > 1 {
            amount -= 1;
            measured = self.measurer.measure(chars.slice(pos, pos + amount))?;
            probes += 1;
        }
        if measured > self.width {
            // A single glyph wider than the row still occupies a row of its own.
            return Ok(1);
        }

        let mut single_steps = self.unit_width <= 0.0;
        while amount < remaining {
            let step = if single_steps {
                1
            } else {
                (((self.width - measured) / self.unit_width) as usize).max(1)
            }
            .min(remaining - amount);
            let candidate = self.measurer.measure(chars.slice(pos, pos + amount + step))?;
            probes += 1;
            if candidate <= self.width {
                amount += step;
                measured = candidate;
            } else if step > 1 {
                single_steps = true;
            } else {
                break;
            }
        }
        trace!(pos, amount, probes, "fitted row");
        Ok(amount)
    }
}

/// Break one logical line forward from `start`. See [`LineBreaker::forward`].
pub fn break_forward<M: TextMeasurer + ?Sized>(
    measurer: &M,
    line: usize,
    text: &str,
    start: usize,
    width: f32,
    unit_width: f32,
) -> Result<Breaks, MeasurementFailure> {
    LineBreaker::new(measurer, width, unit_width).forward(line, text, start)
}

/// Break the prefix `text[..end]` of one logical line. See [`LineBreaker::reverse`].
pub fn break_reverse<M: TextMeasurer + ?Sized>(
    measurer: &M,
    line: usize,
    text: &str,
    end: usize,
    width: f32,
    unit_width: f32,
) -> Result<Breaks, MeasurementFailure> {
    LineBreaker::new(measurer, width, unit_width).reverse(line, text, end)
}

#[cfg(test)]
#[path = "line_breaker_tests.rs"]
mod tests;
