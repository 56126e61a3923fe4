//! Paragraph formatter (pure).
//!
//! Reflows raw lines into paragraphs: short lines are merged into one paragraph line
//! until it grows past a minimum length, chapter titles (lines starting with the
//! chapter mark) are set apart by blank separators, and runs of blank lines are
//! collapsed. The output replaces the content store wholesale.

pub mod toc;

pub use toc::{chapter_at, chapters, is_chapter_title, ChapterLocation};

use tracing::{debug, info};
use unicode_width::UnicodeWidthChar;

/// Default minimal paragraph length in code points before a paragraph is emitted.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 500;

/// Default number of consecutive blank lines kept (0 drops every blank-only line).
pub const DEFAULT_MAX_CHAINED_BLANK_LINES: usize = 0;

/// Default chapter mark.
pub const DEFAULT_CHAPTER_MARK: char = '»';

/// Formatter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// A paragraph is emitted once its length exceeds this many code points.
    pub min_paragraph_chars: usize,
    /// Most consecutive blank lines kept in the output.
    pub max_chained_blank_lines: usize,
    /// Glyph that starts a chapter title line.
    pub chapter_mark: char,
    /// Indent marker prepended to every paragraph.
    pub paragraph_prefix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            max_chained_blank_lines: DEFAULT_MAX_CHAINED_BLANK_LINES,
            chapter_mark: DEFAULT_CHAPTER_MARK,
            paragraph_prefix: String::new(),
        }
    }
}

/// Paragraph being accumulated.
struct ParagraphBuffer<'p> {
    prefix: &'p str,
    text: String,
    char_len: usize,
    has_content: bool,
}

impl<'p> ParagraphBuffer<'p> {
    fn new(prefix: &'p str) -> Self {
        Self {
            prefix,
            text: prefix.to_string(),
            char_len: prefix.chars().count(),
            has_content: false,
        }
    }

    fn push(&mut self, fragment: &str) {
        if self.has_content {
            let joins_wide = self.text.chars().next_back().is_some_and(is_wide)
                || fragment.chars().next().is_some_and(is_wide);
            if !joins_wide {
                self.text.push(' ');
                self.char_len += 1;
            }
        }
        self.text.push_str(fragment);
        self.char_len += fragment.chars().count();
        self.has_content = true;
    }

    /// Take the paragraph, leaving a fresh prefix-only buffer. `None` if nothing was pushed.
    fn take(&mut self) -> Option<String> {
        if !self.has_content {
            return None;
        }
        let fresh = Self::new(self.prefix);
        Some(std::mem::replace(self, fresh).text)
    }
}

fn is_wide(c: char) -> bool {
    c.width() == Some(2)
}

/// Merge short lines into paragraphs and set chapter titles apart.
///
/// `progress` receives the fraction of input consumed after every line and a final
/// `1.0`; pass `|_| {}` when progress is not reported.
pub fn format_paragraphs<S, P>(lines: &[S], options: &FormatOptions, mut progress: P) -> Vec<String>
where
    S: AsRef<str>,
    P: FnMut(f64),
{
    let total = lines.len();
    let mut out = Vec::with_capacity(total / 2 + 1);
    let mut paragraph = ParagraphBuffer::new(&options.paragraph_prefix);
    let mut blanks_in_row = 0usize;
    let mut chapter_count = 0usize;

    for (i, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            blanks_in_row += 1;
            if blanks_in_row <= options.max_chained_blank_lines {
                out.push(String::new());
            }
        } else if is_chapter_title(raw, options.chapter_mark) {
            if let Some(text) = paragraph.take() {
                out.push(text);
            }
            out.push(String::new());
            out.push(trimmed.to_string());
            out.push(String::new());
            blanks_in_row = 0;
            chapter_count += 1;
        } else {
            paragraph.push(trimmed);
            if paragraph.char_len > options.min_paragraph_chars {
                if let Some(text) = paragraph.take() {
                    out.push(text);
                }
                blanks_in_row = 0;
            }
        }
        progress((i + 1) as f64 / total as f64);
    }
    if let Some(text) = paragraph.take() {
        debug!(chars = text.chars().count(), "flushing trailing paragraph");
        out.push(text);
    }
    progress(1.0);

    info!(
        input_lines = total,
        output_lines = out.len(),
        chapters = chapter_count,
        "formatted paragraphs"
    );
    out
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
