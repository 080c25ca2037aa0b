//! Looping animations from a sequence of frames.
//!
//! A sequence lists indices into the frame set, so a frame may be shown
//! several times while being stored or quantized only once.

use crate::raster::{EncodeError, RasterImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// NeuQuant sampling factor for GIF palettes (1 = best, 30 = fastest).
const GIF_QUANTIZE_SPEED: i32 = 10;

/// Animated output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationFormat {
    /// Animated PNG.
    Apng,
    /// GIF89a.
    Gif,
}

impl AnimationFormat {
    /// File extension.
    pub fn extension(&self) -> &'static str {
        match self {
            AnimationFormat::Apng => "png",
            AnimationFormat::Gif => "gif",
        }
    }

    pub fn all() -> [AnimationFormat; 2] {
        [AnimationFormat::Apng, AnimationFormat::Gif]
    }
}

/// Encode `sequence` (indices into `frames`) as an infinitely looping animation.
pub fn write_animation(
    format: AnimationFormat,
    path: impl AsRef<Path>,
    frames: &[RasterImage],
    sequence: &[usize],
    delay_ms: u16,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let (width, height) = check_sequence(frames, sequence)?;

    match format {
        AnimationFormat::Apng => write_apng(path, frames, sequence, delay_ms, width, height)?,
        AnimationFormat::Gif => write_gif(path, frames, sequence, delay_ms, width, height)?,
    }

    info!(
        "Wrote {} animation with {} images to {}",
        format.extension(),
        sequence.len(),
        path.display()
    );
    Ok(())
}

/// Validate the sequence and return the common frame size.
fn check_sequence(frames: &[RasterImage], sequence: &[usize]) -> Result<(u32, u32), EncodeError> {
    let first = frames
        .first()
        .ok_or_else(|| EncodeError::InvalidSequence("no frames".to_string()))?;
    if sequence.is_empty() {
        return Err(EncodeError::InvalidSequence("empty sequence".to_string()));
    }

    if let Some(&index) = sequence.iter().find(|&&i| i >= frames.len()) {
        return Err(EncodeError::InvalidSequence(format!(
            "frame index {} out of range for {} frames",
            index,
            frames.len()
        )));
    }

    for (index, frame) in frames.iter().enumerate() {
        if frame.dimensions() != first.dimensions() {
            return Err(EncodeError::FrameSizeMismatch {
                index,
                width: frame.width,
                height: frame.height,
                expected_width: first.width,
                expected_height: first.height,
            });
        }
    }

    Ok(first.dimensions())
}

fn write_apng(
    path: &Path,
    frames: &[RasterImage],
    sequence: &[usize],
    delay_ms: u16,
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    let file = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    // Zero plays loops forever.
    encoder.set_animated(sequence.len() as u32, 0)?;
    encoder.set_frame_delay(delay_ms, 1000)?;

    let mut writer = encoder.write_header()?;
    for &index in sequence {
        writer.write_image_data(&frames[index].pixels)?;
    }
    writer.finish()?;
    Ok(())
}

fn write_gif(
    path: &Path,
    frames: &[RasterImage],
    sequence: &[usize],
    delay_ms: u16,
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    let too_large = || EncodeError::TooLargeForGif { width, height };
    let gif_width = u16::try_from(width).map_err(|_| too_large())?;
    let gif_height = u16::try_from(height).map_err(|_| too_large())?;

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = gif::Encoder::new(file, gif_width, gif_height, &[])?;
    encoder.set_repeat(gif::Repeat::Infinite)?;

    // GIF delays are in hundredths of a second.
    let delay = delay_ms.saturating_add(5) / 10;
    let mut quantized: Vec<Option<gif::Frame<'static>>> = vec![None; frames.len()];

    for &index in sequence {
        let frame = quantized[index].get_or_insert_with(|| {
            debug!("Quantizing GIF frame {}", index);
            let mut pixels = frames[index].pixels.clone();
            let mut frame = gif::Frame::from_rgba_speed(gif_width, gif_height, &mut pixels, GIF_QUANTIZE_SPEED);
            frame.delay = delay;
            frame
        });
        encoder.write_frame(frame)?;
    }

    Ok(())
}
