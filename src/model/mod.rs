//! Domain model types (pure).
//!
//! Value types shared across the breaker, viewport and renderer, plus the error taxonomy.

pub mod error;
pub mod key_action;
pub mod types;

// Re-export for convenience
pub use error::{AppError, InputError, MeasurementFailure};
pub use key_action::KeyAction;
pub use types::{Anchor, RowSegment, UnderlineMode, ViewportSize};
