//! Life timeline model for the calendar of life.
//!
//! This crate handles:
//! - Dated life stages and their validation
//! - Conversion of stage dates into week-of-life boundaries
//! - Classification of every week of the 52 x 80 calendar grid

pub mod stage;
pub mod timeline;
pub mod classifier;
pub mod grid;

pub use stage::{default_life, load_stages, parse_stages, LifeStage};
pub use timeline::{Timeline, DAYS_PER_WEEK};
pub use classifier::{StageClassifier, StageLabel};
pub use grid::{CalendarGrid, Cell, WEEKS_PER_YEAR, YEARS};
