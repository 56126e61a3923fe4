//! Content store: the logical lines of the open text.
//!
//! The store is shared between the producers that replace content (file loading,
//! the paragraph formatter) and the single consumer that lays it out. Content is
//! only ever replaced wholesale under the write lock; the consumer holds a read
//! guard for the duration of one layout pass and drops it before running callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::info;

#[derive(Debug, Default)]
struct Shared {
    lines: RwLock<Vec<String>>,
    generation: AtomicU64,
}

/// Shared handle to the logical lines. Cloning shares the same store.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    shared: Arc<Shared>,
}

/// Read access to the lines for one layout pass.
pub type ContentGuard<'a> = RwLockReadGuard<'a, Vec<String>>;

impl ContentStore {
    /// Create a store holding `lines`.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                lines: RwLock::new(lines),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Borrow the lines. Hold the guard only for the duration of one pass.
    pub fn read(&self) -> ContentGuard<'_> {
        self.shared
            .lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the lines (input for the formatter).
    pub fn snapshot(&self) -> Vec<String> {
        self.read().clone()
    }

    /// Number of logical lines.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no lines.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Counter bumped on every replacement.
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    /// Swap in new content, re-indenting every line with `leading_spaces` spaces.
    ///
    /// Returns the new generation.
    pub fn replace(&self, mut lines: Vec<String>, leading_spaces: usize) -> u64 {
        apply_leading_indent(&mut lines, leading_spaces);
        let count = lines.len();
        let generation = {
            let mut guard = self
                .shared
                .lines
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = lines;
            // Bumped under the write lock: a reader holding the read lock always sees
            // the generation of the lines it is reading.
            self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1
        };
        info!(lines = count, leading_spaces, generation, "content replaced");
        generation
    }
}

/// Replace each line's leading spaces with exactly `spaces` plain spaces.
///
/// Empty lines stay empty so they keep rendering as blank separators.
pub fn apply_leading_indent(lines: &mut [String], spaces: usize) {
    let indent = " ".repeat(spaces);
    for line in lines.iter_mut() {
        let body = line.trim_start_matches(' ');
        if body.is_empty() {
            line.clear();
            continue;
        }
        if body.len() == line.len() && spaces == 0 {
            continue;
        }
        *line = format!("{indent}{body}");
    }
}

/// Split raw text into logical lines, normalizing `\r\n` to `\n`.
///
/// A trailing newline produces a final empty line, like the source text shows it.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}
