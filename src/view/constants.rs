//! Layout dimension constants for TUI rendering.

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the scrollbar column.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// How long the event loop waits for input before running a refresh tick.
///
/// The reader applies one queued action per tick, so this also bounds how fast
/// held-down keys scroll.
pub const TICK_INTERVAL_MS: u64 = 16;
