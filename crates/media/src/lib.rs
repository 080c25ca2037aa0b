//! Image output for the calendar renderer.
//!
//! This crate provides:
//! - PNG export and read-back of single frames
//! - Animated PNG and GIF encoding of a frame sequence
//! - A store for intermediate frame files

pub mod animation;
pub mod frame_store;
pub mod raster;

pub use animation::{write_animation, AnimationFormat};
pub use frame_store::FrameStore;
pub use raster::{load_png, save_png, EncodeError, RasterImage};
