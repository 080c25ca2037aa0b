//! Rasterizer for converting display lists to pixels.

use crate::display_list::{DisplayItem, DisplayItemType, DisplayList, FrameItem, MarkerItem, TextItem};
use crate::font::FontCache;
use common::color::Color;
use common::geometry::{Point, Rect};
use std::sync::Arc;
use tracing::trace;

/// Pixel buffer for rasterization output.
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            data: vec![0; size],
        }
    }

    /// Clear to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }

    /// Get pixel at position.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }

        let offset = self.offset(x, y);
        Color::rgba(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    /// Set pixel at position.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        let offset = self.offset(x, y);
        self.data[offset] = color.r;
        self.data[offset + 1] = color.g;
        self.data[offset + 2] = color.b;
        self.data[offset + 3] = color.a;
    }

    /// Blend pixel at position.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height || color.a == 0 {
            return;
        }

        let existing = self.get_pixel(x, y);
        self.set_pixel(x, y, color.blend_over(existing));
    }

    /// Get as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Coverage of a pixel whose center lies `signed_distance` inside an edge.
#[inline]
fn coverage(signed_distance: f32) -> f32 {
    (signed_distance + 0.5).clamp(0.0, 1.0)
}

/// Software rasterizer.
pub struct Rasterizer {
    /// Font cache.
    font_cache: Arc<FontCache>,
}

impl Rasterizer {
    pub fn new(font_cache: Arc<FontCache>) -> Self {
        Self { font_cache }
    }

    /// Rasterize a display list to a pixel buffer.
    pub fn rasterize(&self, display_list: &DisplayList, buffer: &mut PixelBuffer) {
        buffer.clear();

        for item in display_list.items() {
            self.rasterize_item(item, buffer);
        }
    }

    /// Rasterize a display list into a fresh buffer.
    pub fn render(&self, display_list: &DisplayList, width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        self.rasterize(display_list, &mut buffer);
        buffer
    }

    /// Rasterize a single display item.
    fn rasterize_item(&self, item: &DisplayItem, buffer: &mut PixelBuffer) {
        let opacity = item.opacity;
        if opacity <= 0.0 {
            trace!("Skipping invisible item at {:?}", item.bounds);
            return;
        }

        match &item.item_type {
            DisplayItemType::SolidColor(solid) => {
                self.fill_rect(&item.bounds, solid.color.with_opacity(opacity), buffer);
            }
            DisplayItemType::Frame(frame) => {
                self.rasterize_frame(frame, &item.bounds, opacity, buffer);
            }
            DisplayItemType::Marker(marker) => {
                self.rasterize_marker(marker, opacity, buffer);
            }
            DisplayItemType::Text(text) => {
                self.rasterize_text(text, opacity, buffer);
            }
        }
    }

    fn fill_rect(&self, rect: &Rect, color: Color, buffer: &mut PixelBuffer) {
        let (x_start, y_start, x_end, y_end) = rect.pixel_span(buffer.width, buffer.height);
        for y in y_start..y_end {
            for x in x_start..x_end {
                buffer.blend_pixel(x, y, color);
            }
        }
    }

    /// Rasterize a rectangle outline, drawn inside the bounds.
    fn rasterize_frame(&self, frame: &FrameItem, bounds: &Rect, opacity: f32, buffer: &mut PixelBuffer) {
        let color = frame.color.with_opacity(opacity);
        let w = frame.width.min(bounds.width / 2.0).min(bounds.height / 2.0);

        let sides = [
            Rect::new(bounds.x, bounds.y, bounds.width, w),
            Rect::new(bounds.x, bounds.bottom() - w, bounds.width, w),
            Rect::new(bounds.x, bounds.y + w, w, bounds.height - 2.0 * w),
            Rect::new(bounds.right() - w, bounds.y + w, w, bounds.height - 2.0 * w),
        ];

        for side in sides.iter().filter(|side| !side.is_empty()) {
            self.fill_rect(side, color, buffer);
        }
    }

    /// Rasterize an anti-aliased circle: face inside, outline centered on the radius.
    fn rasterize_marker(&self, marker: &MarkerItem, opacity: f32, buffer: &mut PixelBuffer) {
        let outer = marker.radius + marker.edge_width / 2.0;
        let inner = (marker.radius - marker.edge_width / 2.0).max(0.0);
        let bounds = Rect::around(marker.center, outer + 1.0, outer + 1.0);
        let (x_start, y_start, x_end, y_end) = bounds.pixel_span(buffer.width, buffer.height);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let pixel_center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = pixel_center.distance(marker.center);

                let face = coverage(inner - d);
                let ring = coverage(outer - d) - face;

                if face > 0.0 {
                    buffer.blend_pixel(x, y, marker.fill.with_opacity(face * opacity));
                }
                if ring > 0.0 {
                    buffer.blend_pixel(x, y, marker.edge.with_opacity(ring * opacity));
                }
            }
        }
    }

    /// Rasterize text.
    fn rasterize_text(&self, text: &TextItem, opacity: f32, buffer: &mut PixelBuffer) {
        let color = text.color.with_opacity(opacity);

        let font = match self.font_cache.font() {
            Some(f) => f,
            None => return,
        };

        for glyph in &text.glyphs {
            let bitmap = font.rasterize(glyph.ch, text.font_size);
            if bitmap.width == 0 || bitmap.height == 0 {
                continue;
            }

            // Bitmap rows run top-down; ymin is the bottom edge relative to the baseline.
            let x_start = glyph.point.x.round() as i32 + bitmap.metrics.xmin;
            let y_start = glyph.point.y.round() as i32 - (bitmap.height as i32 + bitmap.metrics.ymin);

            for gy in 0..bitmap.height {
                for gx in 0..bitmap.width {
                    let alpha = bitmap.data[(gy * bitmap.width + gx) as usize];
                    if alpha == 0 {
                        continue;
                    }

                    let px = x_start + gx as i32;
                    let py = y_start + gy as i32;
                    if px < 0 || py < 0 {
                        continue;
                    }

                    let glyph_color = Color::rgba(
                        color.r,
                        color.g,
                        color.b,
                        ((color.a as u32 * alpha as u32) / 255) as u8,
                    );
                    buffer.blend_pixel(px as u32, py as u32, glyph_color);
                }
            }
        }
    }
}
