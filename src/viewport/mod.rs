//! Viewport: anchored layout of content into visible rows.
//!
//! [`ViewportController`] is the pure core. It knows nothing about threads or
//! queues; the action consumer in [`crate::action`] drives it.

pub mod controller;
pub mod frame;

pub use controller::{is_valid_anchor, Update, ViewportController, ViewportStyle};
pub use frame::{PlacedRow, RenderFrame};
