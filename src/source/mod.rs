//! Text input: loading a file into logical lines.
//!
//! Bytes are decoded as UTF-8, replacing invalid sequences, so a file in a legacy
//! encoding still opens (with replacement glyphs) instead of failing.

use crate::content::split_lines;
use crate::model::error::InputError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Columns a tab advances to. Tabs are expanded at load so the line breaker only
/// ever measures printable text.
pub const TAB_WIDTH: usize = 4;

const BOM: char = '\u{feff}';

/// A text file loaded into logical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    lines: Vec<String>,
}

impl FileSource {
    /// Read and decode `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        let lines = decode(&bytes);
        info!(path = %path.display(), bytes = bytes.len(), lines = lines.len(), "loaded text");
        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Path the text was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take the logical lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Decode raw bytes into logical lines with tabs expanded.
pub fn decode(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    if text.contains(char::REPLACEMENT_CHARACTER) && std::str::from_utf8(bytes).is_err() {
        warn!("input is not valid UTF-8, undecodable bytes replaced");
    }
    let text = text.strip_prefix(BOM).unwrap_or(&text);
    split_lines(text)
        .into_iter()
        .map(|line| expand_tabs(&line, TAB_WIDTH))
        .collect()
}

/// Replace each tab with spaces up to the next multiple of `width` code points.
pub fn expand_tabs(line: &str, width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let width = width.max(1);
    let mut out = String::with_capacity(line.len() + width);
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let pad = width - column % width;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
