//! Intermediate animation frames on disk.

use crate::raster::{load_png, save_png, EncodeError, RasterImage};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Directory-backed set of `alpha-<alpha>.png` frame files.
///
/// Files written through the store are removed by [`FrameStore::cleanup`], or
/// on drop if cleanup never ran.
#[derive(Debug)]
pub struct FrameStore {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FrameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// File name of the frame for a highlight opacity.
    pub fn frame_path(&self, alpha: f32) -> PathBuf {
        self.dir.join(format!("alpha-{}.png", alpha))
    }

    /// Write one frame and remember it for cleanup.
    pub fn write(&mut self, alpha: f32, image: &RasterImage) -> Result<PathBuf, EncodeError> {
        let path = self.frame_path(alpha);
        save_png(&path, image)?;
        if !self.written.contains(&path) {
            self.written.push(path.clone());
        }
        Ok(path)
    }

    /// Read every written frame back, in write order.
    pub fn load_all(&self) -> Result<Vec<RasterImage>, EncodeError> {
        self.written.iter().map(load_png).collect()
    }

    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Delete every written frame, returning how many were removed.
    pub fn cleanup(&mut self) -> Result<usize, EncodeError> {
        let mut removed = 0;
        for path in self.written.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            debug!("Removed {}", path.display());
        }
        Ok(removed)
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        for path in self.written.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove frame {}: {}", path.display(), e);
            }
        }
    }
}
