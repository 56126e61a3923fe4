//! Chapter detection and table of contents.

/// A chapter title and the logical line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLocation {
    /// Title text, trimmed.
    pub title: String,
    /// Logical line index of the title.
    pub line: usize,
}

/// Whether `line` is a chapter title: its left-trimmed content starts with `mark`.
pub fn is_chapter_title(line: &str, mark: char) -> bool {
    line.trim_start().starts_with(mark)
}

/// Every chapter title in `lines`, in reading order.
pub fn chapters<S: AsRef<str>>(lines: &[S], mark: char) -> Vec<ChapterLocation> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_chapter_title(line.as_ref(), mark))
        .map(|(line, text)| ChapterLocation {
            title: text.as_ref().trim().to_string(),
            line,
        })
        .collect()
}

/// Index of the chapter containing `line`: the last chapter starting at or before it.
///
/// `None` if `line` comes before the first chapter (or there are no chapters).
pub fn chapter_at(chapters: &[ChapterLocation], line: usize) -> Option<usize> {
    chapters
        .partition_point(|c| c.line <= line)
        .checked_sub(1)
}
