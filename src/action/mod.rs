//! View actions and their delivery to the viewport.
//!
//! Producers (the UI thread, the formatter worker) post [`ViewAction`]s through a
//! bounded [`ActionSender`]. A single consumer, the [`Reader`], applies at most one
//! action per refresh tick. When the queue is full the newest action is dropped.

pub mod format_job;
pub mod queue;
pub mod reader;

pub use format_job::{spawn_format, FormatProgress};
pub use queue::{action_queue, ActionReceiver, ActionSender, DEFAULT_QUEUE_CAPACITY};
pub use reader::{PositionCallback, Reader};

use crate::model::UnderlineMode;

/// Request to change what the viewport shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewAction {
    /// Scroll up one row.
    LineUp,
    /// Scroll down one row.
    LineDown,
    /// Scroll up one page.
    PageUp,
    /// Scroll down one page.
    PageDown,
    /// Jump to the document start.
    Top,
    /// Jump to the last line.
    Bottom,
    /// Jump to a position; with `center` the position lands in the middle row.
    JumpTo {
        /// Logical line index.
        line: usize,
        /// Character offset within the line.
        offset: usize,
        /// Place the position in the middle row rather than the first.
        center: bool,
    },
    /// Jump to the line at a fraction of the document (scrollbar drag).
    JumpToFraction(f64),
    /// Switch the row decoration.
    SetUnderline(UnderlineMode),
    /// The content store was replaced; re-anchor and relayout.
    ContentChanged,
}

impl ViewAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LineUp => "line_up",
            Self::LineDown => "line_down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::JumpTo { .. } => "jump_to",
            Self::JumpToFraction(_) => "jump_to_fraction",
            Self::SetUnderline(_) => "set_underline",
            Self::ContentChanged => "content_changed",
        }
    }
}
