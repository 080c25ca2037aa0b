//! Common types shared across the calendar crates.

pub mod color;
pub mod geometry;
pub mod error;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use error::{CalendarError, CalendarResult};
