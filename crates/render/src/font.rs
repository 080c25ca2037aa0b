//! Font handling and text rasterization.

use common::{CalendarError, CalendarResult};
use fontdue::{Font, FontSettings};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rasterized glyph bitmap.
pub struct GlyphBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Glyph metrics.
    pub metrics: GlyphMetrics,
    /// Coverage values, row-major from the top.
    pub data: Vec<u8>,
}

/// Glyph metrics.
#[derive(Clone, Copy, Debug)]
pub struct GlyphMetrics {
    /// Advance width.
    pub advance_width: f32,
    /// Left side bearing.
    pub xmin: i32,
    /// Bottom of glyph relative to baseline.
    pub ymin: i32,
    /// Width of glyph.
    pub width: u32,
    /// Height of glyph.
    pub height: u32,
}

/// Vertical line metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to top of line.
    pub ascent: f32,
    /// Distance from baseline to bottom of line (negative below the baseline).
    pub descent: f32,
}

/// A loaded font with a glyph cache.
pub struct LoadedFont {
    font: Font,
    glyph_cache: RwLock<HashMap<(char, u32), Arc<GlyphBitmap>>>,
}

impl LoadedFont {
    pub fn from_bytes(data: &[u8]) -> CalendarResult<Self> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(CalendarError::font)?;
        Ok(Self {
            font,
            glyph_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Rasterize a glyph at a given size.
    pub fn rasterize(&self, ch: char, size: f32) -> Arc<GlyphBitmap> {
        let size_key = (size * 10.0) as u32; // Quantize to 0.1px
        let cache_key = (ch, size_key);

        if let Some(bitmap) = self.glyph_cache.read().get(&cache_key) {
            return bitmap.clone();
        }

        let (metrics, data) = self.font.rasterize(ch, size);
        let bitmap = Arc::new(GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            metrics: GlyphMetrics {
                advance_width: metrics.advance_width,
                xmin: metrics.xmin,
                ymin: metrics.ymin,
                width: metrics.width as u32,
                height: metrics.height as u32,
            },
            data,
        });

        self.glyph_cache.write().insert(cache_key, bitmap.clone());
        bitmap
    }

    /// Get glyph metrics without rasterizing.
    pub fn metrics(&self, ch: char, size: f32) -> GlyphMetrics {
        let metrics = self.font.metrics(ch, size);
        GlyphMetrics {
            advance_width: metrics.advance_width,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width as u32,
            height: metrics.height as u32,
        }
    }

    pub fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.font.horizontal_line_metrics(size) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
            },
            None => approximate_line_metrics(size),
        }
    }

    /// Width of a run of text.
    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.metrics(c, size).advance_width).sum()
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.read().len()
    }
}

fn approximate_line_metrics(size: f32) -> LineMetrics {
    LineMetrics {
        ascent: size * 0.8,
        descent: -size * 0.2,
    }
}

/// Source of the single font used for all figure text.
pub struct FontCache {
    font: Option<Arc<LoadedFont>>,
}

impl FontCache {
    /// Load the first usable system sans-serif font. The cache is empty when none is found.
    pub fn new() -> Self {
        for path in system_font_paths() {
            if let Ok(data) = std::fs::read(path) {
                match LoadedFont::from_bytes(&data) {
                    Ok(font) => {
                        debug!("Loaded font {}", path);
                        return Self::with_font(font);
                    }
                    Err(e) => warn!("Skipping font {}: {}", path, e),
                }
            }
        }

        warn!("No system font found; text will be omitted");
        Self::empty()
    }

    /// Load a specific font file.
    pub fn from_file(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| CalendarError::font(format!("{}: {}", path.display(), e)))?;
        let font = LoadedFont::from_bytes(&data)?;
        debug!("Loaded font {}", path.display());
        Ok(Self::with_font(font))
    }

    pub fn with_font(font: LoadedFont) -> Self {
        Self {
            font: Some(Arc::new(font)),
        }
    }

    /// A cache without any font; text is skipped when painting.
    pub fn empty() -> Self {
        Self { font: None }
    }

    pub fn font(&self) -> Option<Arc<LoadedFont>> {
        self.font.clone()
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Line metrics of the loaded font, or an approximation without one.
    pub fn line_metrics(&self, size: f32) -> LineMetrics {
        self.font
            .as_ref()
            .map_or_else(|| approximate_line_metrics(size), |font| font.line_metrics(size))
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Well-known locations of a sans-serif font.
fn system_font_paths() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut paths = vec![
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    ];

    #[cfg(target_os = "macos")]
    {
        paths.push("/System/Library/Fonts/Supplemental/Arial.ttf");
        paths.push("/Library/Fonts/Arial.ttf");
    }

    #[cfg(target_os = "windows")]
    {
        paths.push("C:\\Windows\\Fonts\\arial.ttf");
        paths.push("C:\\Windows\\Fonts\\segoeui.ttf");
    }

    paths
}
