//! Core value types shared by the breaker, the viewport and the renderer.

use serde::Deserialize;
use std::fmt;

/// Logical position of the first visible code point.
///
/// `line` indexes the content store, `offset` counts code points (not bytes)
/// into that line. Anchors are plain values: they point into the content by
/// index and never borrow the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Anchor {
    /// Logical line index.
    pub line: usize,
    /// Code point offset within the line.
    pub offset: usize,
}

impl Anchor {
    /// Start of the document.
    pub const START: Self = Self { line: 0, offset: 0 };

    /// Create a new anchor.
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// Whether this anchor is the start of the document.
    pub fn is_start(&self) -> bool {
        *self == Self::START
    }

    /// Clamp a requested starting position into the given content.
    ///
    /// The line is clamped to the last line; an offset at or beyond the end of
    /// the (clamped) line resets to 0. Empty content always yields [`Anchor::START`].
    pub fn clamped<S: AsRef<str>>(line: usize, offset: usize, content: &[S]) -> Self {
        let Some(last) = content.len().checked_sub(1) else {
            return Self::START;
        };
        let line = line.min(last);
        let len = content[line].as_ref().chars().count();
        let offset = if offset >= len { 0 } else { offset };
        Self { line, offset }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, pos {}", self.line, self.offset)
    }
}

/// One on-screen row: a contiguous run of code points from one logical line.
///
/// Segments are recomputed on every layout pass and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSegment {
    /// Logical line the text was cut from.
    pub line: usize,
    /// Code point offset of the first character of `text` in its line.
    pub offset: usize,
    /// The row text.
    pub text: String,
    char_len: usize,
}

impl RowSegment {
    /// Create a segment. `char_len` must be the code point count of `text`.
    pub(crate) fn new(line: usize, offset: usize, text: String, char_len: usize) -> Self {
        debug_assert_eq!(text.chars().count(), char_len);
        Self {
            line,
            offset,
            text,
            char_len,
        }
    }

    /// Number of code points in the row.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether this row carries no text (an empty logical line).
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Anchor of the first code point of this row.
    pub fn start(&self) -> Anchor {
        Anchor::new(self.line, self.offset)
    }

    /// Offset one past the last code point of this row.
    pub fn end_offset(&self) -> usize {
        self.offset + self.char_len
    }
}

/// Decoration applied uniformly to all visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineMode {
    /// No decoration.
    #[default]
    None,
    /// Continuous rule under each row.
    Solid,
    /// Dashed rule under each row, drawn from a tiled [`crate::layout::DashPattern`].
    #[serde(alias = "dash")]
    Dashed,
}

impl UnderlineMode {
    /// Next mode in the None → Solid → Dashed → None cycle.
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Solid,
            Self::Solid => Self::Dashed,
            Self::Dashed => Self::None,
        }
    }

    /// Parse a configuration name (`none`, `solid`, `dashed`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "solid" => Some(Self::Solid),
            "dashed" | "dash" => Some(Self::Dashed),
            _ => None,
        }
    }

    /// Configuration name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Dashed => "dashed",
        }
    }
}

/// Size of the viewport in measurer units (pixels, or terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ViewportSize {
    /// Create a new viewport size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
