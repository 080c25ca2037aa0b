//! Calendar of life - renders every week of a life as a dot.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use calendar::{CalendarConfig, CalendarEngine};
use timeline::{default_life, load_stages};

/// Calendar of life - one dot per week of an 80-year life
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for the generated images
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Output resolution
    #[arg(long, default_value = "300")]
    dpi: u32,

    /// Number of highlight opacities in the animation
    #[arg(long, default_value = "6")]
    frames: usize,

    /// Delay between animation images in milliseconds
    #[arg(long, default_value = "50")]
    frame_delay: u16,

    /// Font file for labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON file with the life stages
    #[arg(long)]
    life: Option<PathBuf>,

    /// Open the images after saving
    #[arg(long)]
    show: bool,

    /// Skip the animation
    #[arg(long)]
    no_animation: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> CalendarConfig {
        let mut config = CalendarConfig::default()
            .with_output_dir(&self.output_dir)
            .with_dpi(self.dpi)
            .with_frames(self.frames)
            .with_frame_delay(self.frame_delay)
            .with_show(self.show)
            .with_animation(!self.no_animation);

        if let Some(font) = &self.font {
            config = config.with_font(font);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Calendar of life v{}", calendar::VERSION);

    let stages = match &args.life {
        Some(path) => {
            info!("Loading life stages from {}", path.display());
            load_stages(path)?
        }
        None => default_life(Local::now().date_naive())?,
    };

    let engine = CalendarEngine::new(args.config(), stages)?;
    let report = engine.run()?;

    for path in &report.stills {
        info!("Wrote {}", path.display());
    }
    if let Some(animation) = &report.animation {
        for path in &animation.outputs {
            info!("Wrote {} ({} images)", path.display(), animation.images);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["calendar-of-life"]);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.dpi, 300);
        assert_eq!(args.frames, 6);
        assert_eq!(args.frame_delay, 50);
        assert!(!args.show);
        assert!(!args.no_animation);

        assert_eq!(args.config(), CalendarConfig::default());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "calendar-of-life",
            "--output-dir",
            "out",
            "--dpi",
            "150",
            "--frames",
            "4",
            "--frame-delay",
            "100",
            "--font",
            "sans.ttf",
            "--no-animation",
            "-v",
        ]);
        assert!(args.verbose);

        let config = args.config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.dpi, 150);
        assert_eq!(config.frame_count, 4);
        assert_eq!(config.frame_delay_ms, 100);
        assert_eq!(config.font_path, Some(PathBuf::from("sans.ttf")));
        assert!(!config.animate);
    }

    #[test]
    fn test_args_life_file() {
        let args = Args::parse_from(["calendar-of-life", "--life", "me.json", "--show"]);
        assert_eq!(args.life, Some(PathBuf::from("me.json")));
        assert!(args.show);
        assert!(args.config().show);
    }
}
