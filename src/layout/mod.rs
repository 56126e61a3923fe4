//! Row segmentation and viewport geometry (pure).

pub mod dash;
pub mod geometry;
pub mod line_breaker;

pub use dash::{DashPattern, DashStyle};
pub use geometry::{place_row, Padding, RowMetrics, RowPlacement};
pub use line_breaker::{break_forward, break_reverse, Breaks, LineBreaker};
