//! Animation pipeline - fades the current week in and out.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use calendar_media::{write_animation, AnimationFormat, FrameStore, RasterImage};
use common::{CalendarError, CalendarResult};
use render::Theme;
use tracing::{debug, info};

use crate::engine::CalendarEngine;

/// Animation pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Render and save one frame per highlight opacity.
    RenderFrames,
    /// Read the frame files back.
    LoadFrames,
    /// Encode the animated PNG.
    EncodeApng,
    /// Encode the GIF.
    EncodeGif,
    /// Delete the frame files.
    Cleanup,
}

/// Outcome of one animation run.
#[derive(Clone, Debug, Default)]
pub struct AnimationReport {
    /// Distinct frame files written.
    pub frames_written: usize,
    /// Images in each animation, counting repeats.
    pub images: usize,
    /// Frame files deleted afterwards.
    pub frames_removed: usize,
    /// Animation files written.
    pub outputs: Vec<PathBuf>,
    /// Time spent per stage.
    pub stage_times: Vec<(PipelineStage, Duration)>,
}

/// `n` evenly spaced opacities from 0 to 1 inclusive.
pub fn alphas(n: usize) -> CalendarResult<Vec<f32>> {
    match n {
        0 => Err(CalendarError::invalid("frame count must be at least 1")),
        1 => Ok(vec![0.0]),
        _ => Ok((0..n).map(|i| i as f32 / (n - 1) as f32).collect()),
    }
}

/// Frame indices played forwards then backwards, without repeating either end.
pub fn ping_pong(n: usize) -> CalendarResult<Vec<usize>> {
    if n == 0 {
        return Err(CalendarError::invalid("frame count must be at least 1"));
    }
    Ok((0..n).chain((1..n.saturating_sub(1)).rev()).collect())
}

/// Drives the frames of the highlight animation through encoding.
pub struct AnimationPipeline<'a> {
    engine: &'a CalendarEngine,
    stages: Vec<PipelineStage>,
}

impl<'a> AnimationPipeline<'a> {
    pub fn new(engine: &'a CalendarEngine) -> Self {
        Self {
            engine,
            stages: vec![
                PipelineStage::RenderFrames,
                PipelineStage::LoadFrames,
                PipelineStage::EncodeApng,
                PipelineStage::EncodeGif,
                PipelineStage::Cleanup,
            ],
        }
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Run the pipeline.
    pub fn run(&self) -> CalendarResult<AnimationReport> {
        let config = self.engine.config();
        let alphas = alphas(config.frame_count)?;
        let sequence = ping_pong(config.frame_count)?;

        let mut report = AnimationReport {
            images: sequence.len(),
            ..AnimationReport::default()
        };
        let mut store = FrameStore::new(&config.output_dir);
        let mut frames: Vec<RasterImage> = Vec::new();

        for stage in &self.stages {
            let start = Instant::now();

            match stage {
                PipelineStage::RenderFrames => {
                    for &alpha in &alphas {
                        let image = self.engine.render_frame(Theme::dark(), Some(alpha))?;
                        let path = store.write(alpha, &image)?;
                        debug!("Frame alpha={} written to {}", alpha, path.display());
                    }
                    report.frames_written = store.len();
                }
                PipelineStage::LoadFrames => {
                    frames = store.load_all()?;
                }
                PipelineStage::EncodeApng | PipelineStage::EncodeGif => {
                    let format = if *stage == PipelineStage::EncodeApng {
                        AnimationFormat::Apng
                    } else {
                        AnimationFormat::Gif
                    };
                    let path = config.animation_path(format);
                    write_animation(format, &path, &frames, &sequence, config.frame_delay_ms)?;
                    report.outputs.push(path);
                }
                PipelineStage::Cleanup => {
                    report.frames_removed = store.cleanup()?;
                }
            }

            report.stage_times.push((*stage, start.elapsed()));
        }

        info!(
            "Animation done: {} frames, {} images, {} outputs",
            report.frames_written,
            report.images,
            report.outputs.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarConfig;
    use chrono::NaiveDate;
    use render::FontCache;
    use std::sync::Arc;
    use timeline::default_life;

    fn engine(dir: &std::path::Path, frames: usize) -> CalendarEngine {
        let config = CalendarConfig::default()
            .with_output_dir(dir)
            .with_dpi(10)
            .with_frames(frames);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        CalendarEngine::with_fonts(config, default_life(today).unwrap(), Arc::new(FontCache::empty())).unwrap()
    }

    fn files_in(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_alphas() {
        assert_eq!(alphas(6).unwrap(), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(alphas(2).unwrap(), vec![0.0, 1.0]);
        assert_eq!(alphas(1).unwrap(), vec![0.0]);
        assert!(matches!(alphas(0), Err(CalendarError::InvalidOperation(_))));
    }

    #[test]
    fn test_ping_pong() {
        assert_eq!(ping_pong(6).unwrap(), vec![0, 1, 2, 3, 4, 5, 4, 3, 2, 1]);
        assert_eq!(ping_pong(3).unwrap(), vec![0, 1, 2, 1]);
        assert_eq!(ping_pong(2).unwrap(), vec![0, 1]);
        assert_eq!(ping_pong(1).unwrap(), vec![0]);
        assert!(ping_pong(0).is_err());

        for n in 2..10 {
            assert_eq!(ping_pong(n).unwrap().len(), 2 * n - 2);
        }
    }

    #[test]
    fn test_run_writes_animations_and_removes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), 3);
        let pipeline = AnimationPipeline::new(&engine);

        let report = pipeline.run().unwrap();
        assert_eq!(report.frames_written, 3);
        assert_eq!(report.frames_removed, 3);
        assert_eq!(report.images, 4);
        assert_eq!(report.stage_times.len(), pipeline.stages().len());
        assert_eq!(
            files_in(dir.path()),
            vec![
                "calendar-of-life-dark-animated.gif".to_string(),
                "calendar-of-life-dark-animated.png".to_string(),
            ]
        );
        assert_eq!(report.outputs.len(), 2);
    }

    #[test]
    fn test_single_frame_animation() {
        let dir = tempfile::tempdir().unwrap();
        let report = AnimationPipeline::new(&engine(dir.path(), 1)).run().unwrap();

        assert_eq!(report.images, 1);
        assert_eq!(report.frames_written, 1);
        assert_eq!(files_in(dir.path()).len(), 2);
    }

    #[test]
    fn test_failed_run_leaves_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), 2);
        // A directory where the GIF should go makes encoding fail after the frames exist.
        std::fs::create_dir(dir.path().join("calendar-of-life-dark-animated.gif")).unwrap();

        assert!(AnimationPipeline::new(&engine).run().is_err());
        assert!(!files_in(dir.path()).iter().any(|name| name.starts_with("alpha-")));
    }

    #[test]
    fn test_default_animation_fades_current_week() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig::default().with_output_dir(dir.path()).with_dpi(40);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let engine =
            CalendarEngine::with_fonts(config, default_life(today).unwrap(), Arc::new(FontCache::empty())).unwrap();

        let report = AnimationPipeline::new(&engine).run().unwrap();
        assert_eq!(report.frames_written, 6);
        assert_eq!(report.frames_removed, 6);
        assert_eq!(report.images, 10);

        let center = engine.figure().cell_center(engine.grid().current_week().unwrap());
        let (x, y) = (center.x as usize, center.y as usize);

        let path = engine.config().animation_path(AnimationFormat::Apng);
        let decoder = png::Decoder::new(std::fs::File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];

        // Red channel of the current week, image by image: up, then back down.
        let mut reds = Vec::new();
        for _ in 0..report.images {
            let frame = reader.next_frame(&mut buf).unwrap();
            assert_eq!(frame.color_type, png::ColorType::Rgba);
            reds.push(buf[y * frame.line_size + x * 4]);
        }
        assert_eq!(reds, vec![0, 51, 102, 153, 204, 255, 204, 153, 102, 51]);
    }
}
