//! RGBA rasters and single-frame PNG files.

use common::CalendarError;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// An owned RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// RGBA pixel data, row-major.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw RGBA bytes, checking that they match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EncodeError> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(EncodeError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get pixel at coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Write an image as an 8-bit RGBA PNG, replacing any existing file.
pub fn save_png(path: impl AsRef<Path>, image: &RasterImage) -> Result<(), EncodeError> {
    let path = path.as_ref();
    image::save_buffer_with_format(
        path,
        &image.pixels,
        image.width,
        image.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    debug!("Wrote {}x{} PNG to {}", image.width, image.height, path.display());
    Ok(())
}

/// Read a PNG back as RGBA8.
pub fn load_png(path: impl AsRef<Path>) -> Result<RasterImage, EncodeError> {
    let rgba = image::open(path.as_ref())?.into_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::new(width, height, rgba.into_raw())
}

/// Image encoding error.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("Invalid dimensions: {width}x{height} with {len} bytes")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("Image too large for GIF: {width}x{height}")]
    TooLargeForGif { width: u32, height: u32 },

    #[error("Frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Invalid frame sequence: {0}")]
    InvalidSequence(String),
}

impl From<EncodeError> for CalendarError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::Io(e) => CalendarError::Io(e),
            other => CalendarError::encode(other.to_string()),
        }
    }
}
