//! Calendar engine - renders and saves the calendar figures.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use calendar_media::{save_png, RasterImage};
use common::CalendarResult;
use render::{CalendarPainter, Figure, FontCache, Rasterizer, Theme};
use timeline::{CalendarGrid, LifeStage, Timeline};
use tracing::{debug, info, warn};

use crate::config::CalendarConfig;
use crate::pipeline::{AnimationPipeline, AnimationReport};

/// Files produced by a full run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Still images, in the order written.
    pub stills: Vec<PathBuf>,
    /// Animation outcome, when enabled.
    pub animation: Option<AnimationReport>,
}

/// The main calendar engine.
pub struct CalendarEngine {
    /// Calendar configuration.
    config: CalendarConfig,
    /// Life stages and their week boundaries.
    timeline: Timeline,
    /// Classified week grid.
    grid: CalendarGrid,
    /// Figure geometry at the configured DPI.
    figure: Figure,
    /// Shared font.
    fonts: Arc<FontCache>,
}

impl CalendarEngine {
    /// Create an engine, loading the configured font or a system font.
    pub fn new(config: CalendarConfig, stages: Vec<LifeStage>) -> CalendarResult<Self> {
        let fonts = match &config.font_path {
            Some(path) => FontCache::from_file(path)?,
            None => FontCache::new(),
        };
        Self::with_fonts(config, stages, Arc::new(fonts))
    }

    /// Create an engine with an explicit font cache.
    pub fn with_fonts(
        config: CalendarConfig,
        stages: Vec<LifeStage>,
        fonts: Arc<FontCache>,
    ) -> CalendarResult<Self> {
        config.validate()?;

        let timeline = Timeline::new(stages)?;
        let grid = CalendarGrid::build(&timeline)?;
        let figure = Figure::new(config.dpi);

        debug!(
            "Engine ready: {} stages, {} cells, {:?} px",
            timeline.stages().len(),
            grid.len(),
            figure.pixel_size()
        );

        Ok(Self {
            config,
            timeline,
            grid,
            figure,
            fonts,
        })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Paint and rasterize one figure.
    pub fn render_frame(&self, theme: Theme, highlight: Option<f32>) -> CalendarResult<RasterImage> {
        let painter = CalendarPainter::new(self.figure, theme, self.fonts.clone());
        let display_list = painter.paint(&self.grid, &self.timeline, highlight);

        let (width, height) = self.figure.pixel_size();
        let buffer = Rasterizer::new(self.fonts.clone()).render(&display_list, width, height);
        debug!("Rasterized {} display items", display_list.len());

        Ok(RasterImage::new(width, height, buffer.into_raw())?)
    }

    /// Render one figure to `path`, optionally opening it afterwards.
    pub fn render_calendar(
        &self,
        theme: Theme,
        path: impl AsRef<Path>,
        highlight: Option<f32>,
        show: bool,
    ) -> CalendarResult<PathBuf> {
        let path = path.as_ref();
        let image = self.render_frame(theme, highlight)?;
        save_png(path, &image)?;
        info!("Saved {}", path.display());

        if show {
            open_in_viewer(path);
        }
        Ok(path.to_path_buf())
    }

    /// Write the dark and light stills, then the animation when enabled.
    pub fn run(&self) -> CalendarResult<RunReport> {
        let mut report = RunReport::default();

        report.stills.push(self.render_calendar(
            Theme::dark(),
            self.config.dark_path(),
            None,
            self.config.show,
        )?);
        report.stills.push(self.render_calendar(
            Theme::light(),
            self.config.light_path(),
            None,
            self.config.show,
        )?);

        if self.config.animate {
            report.animation = Some(AnimationPipeline::new(self).run()?);
        }

        Ok(report)
    }
}

/// Hand a file to the platform's default viewer. Failures are only logged.
///
/// The launcher returns once the viewer has been started, so it is waited on
/// and its exit status checked.
pub fn open_in_viewer(path: &Path) {
    let mut command = viewer_command();
    match command.arg(path).status() {
        Ok(status) if status.success() => debug!("Opened {}", path.display()),
        Ok(status) => warn!("Could not open {}: viewer exited with {}", path.display(), status),
        Err(e) => warn!("Could not open {}: {}", path.display(), e),
    }
}

#[cfg(target_os = "windows")]
fn viewer_command() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(target_os = "macos")]
fn viewer_command() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn viewer_command() -> Command {
    Command::new("xdg-open")
}
