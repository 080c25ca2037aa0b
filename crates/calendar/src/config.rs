//! Calendar configuration.

use calendar_media::AnimationFormat;
use common::{CalendarError, CalendarResult};
use std::path::PathBuf;

/// Highest DPI accepted; keeps the figure within GIF's 16-bit frame size.
pub const MAX_DPI: u32 = 1200;

/// Calendar configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    /// Directory receiving every output and intermediate file.
    pub output_dir: PathBuf,
    /// Output resolution.
    pub dpi: u32,
    /// Number of distinct highlight opacities in the animation.
    pub frame_count: usize,
    /// Delay between animation images in milliseconds.
    pub frame_delay_ms: u16,
    /// Font file for labels; a system font is searched when unset.
    pub font_path: Option<PathBuf>,
    /// Open each still image in the platform viewer after saving.
    pub show: bool,
    /// Whether to produce the animation.
    pub animate: bool,
    /// Dark still image file name.
    pub dark_file: String,
    /// Light still image file name.
    pub light_file: String,
    /// Animation file name without extension.
    pub animation_stem: String,
}

impl CalendarConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Low-resolution configuration for quick looks.
    pub fn preview() -> Self {
        Self {
            dpi: 72,
            frame_count: 3,
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the number of animation frames.
    pub fn with_frames(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_frame_delay(mut self, delay_ms: u16) -> Self {
        self.frame_delay_ms = delay_ms;
        self
    }

    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Check that the settings can produce output.
    pub fn validate(&self) -> CalendarResult<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(CalendarError::invalid(format!(
                "dpi must be between 1 and {}, got {}",
                MAX_DPI, self.dpi
            )));
        }

        if self.animate && self.frame_count == 0 {
            return Err(CalendarError::invalid("animation needs at least one frame"));
        }

        for name in [&self.dark_file, &self.light_file, &self.animation_stem] {
            if name.is_empty() {
                return Err(CalendarError::invalid("output file names must not be empty"));
            }
        }

        Ok(())
    }

    pub fn dark_path(&self) -> PathBuf {
        self.output_dir.join(&self.dark_file)
    }

    pub fn light_path(&self) -> PathBuf {
        self.output_dir.join(&self.light_file)
    }

    /// Path of the animation in the given format.
    pub fn animation_path(&self, format: AnimationFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.animation_stem, format.extension()))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dpi: 300,
            frame_count: 6,
            frame_delay_ms: 50,
            font_path: None,
            show: false,
            animate: true,
            dark_file: "calendar-of-life-dark.png".to_string(),
            light_file: "calendar-of-life.png".to_string(),
            animation_stem: "calendar-of-life-dark-animated".to_string(),
        }
    }
}
