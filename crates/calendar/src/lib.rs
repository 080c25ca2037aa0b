//! Calendar of life - every week of an 80-year life on one page.
//!
//! This crate ties the components together:
//! - Life timeline and week classification
//! - Figure painting and rasterization
//! - PNG export and the ping-pong highlight animation

pub mod config;
pub mod engine;
pub mod pipeline;

pub use config::CalendarConfig;
pub use engine::{CalendarEngine, RunReport};
pub use pipeline::{AnimationPipeline, AnimationReport, PipelineStage};

/// Calendar version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
