//! Rendering engine for the calendar of life.
//!
//! This crate handles:
//! - Figure geometry for the 52 x 80 week grid
//! - Display list generation from a classified grid
//! - Text shaping and rasterization through fontdue
//! - Software rasterization into an RGBA pixel buffer

pub mod display_list;
pub mod figure;
pub mod font;
pub mod painter;
pub mod rasterizer;
pub mod theme;

pub use display_list::{DisplayItem, DisplayItemType, DisplayList};
pub use figure::Figure;
pub use font::FontCache;
pub use painter::CalendarPainter;
pub use rasterizer::{PixelBuffer, Rasterizer};
pub use theme::Theme;
