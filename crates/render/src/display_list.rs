//! Display list for rendering.
//!
//! The display list sits between the painter and the rasterizer. It holds
//! every drawing command of one calendar image in paint order.

use common::color::Color;
use common::geometry::{Point, Rect};
use smallvec::SmallVec;

/// A display list containing all items to be painted.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    /// Display items in paint order.
    items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a display item.
    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    /// Add multiple display items.
    pub fn extend(&mut self, items: impl IntoIterator<Item = DisplayItem>) {
        self.items.extend(items);
    }

    /// Get all items.
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Get number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count the markers, optionally restricted to one fill color.
    pub fn marker_count(&self, fill: Option<Color>) -> usize {
        self.items
            .iter()
            .filter(|item| match &item.item_type {
                DisplayItemType::Marker(marker) => fill.map_or(true, |f| marker.fill == f),
                _ => false,
            })
            .count()
    }
}

/// A single display item.
#[derive(Clone, Debug)]
pub struct DisplayItem {
    /// The type of item.
    pub item_type: DisplayItemType,
    /// Bounding rectangle.
    pub bounds: Rect,
    /// Opacity (0.0 - 1.0).
    pub opacity: f32,
}

impl DisplayItem {
    pub fn new(item_type: DisplayItemType, bounds: Rect) -> Self {
        Self {
            item_type,
            bounds,
            opacity: 1.0,
        }
    }

    /// Solid rectangle fill.
    pub fn solid(rect: Rect, color: Color) -> Self {
        Self::new(DisplayItemType::SolidColor(SolidColorItem { color }), rect)
    }

    /// Circular marker with an outline.
    pub fn marker(marker: MarkerItem) -> Self {
        let extent = marker.radius + marker.edge_width / 2.0;
        let bounds = Rect::around(marker.center, extent, extent);
        Self::new(DisplayItemType::Marker(marker), bounds)
    }

    /// Set opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Types of display items.
#[derive(Clone, Debug)]
pub enum DisplayItemType {
    /// Solid color rectangle.
    SolidColor(SolidColorItem),
    /// Outlined rectangle.
    Frame(FrameItem),
    /// Outlined circle.
    Marker(MarkerItem),
    /// Text run.
    Text(TextItem),
}

/// Solid color rectangle.
#[derive(Clone, Debug)]
pub struct SolidColorItem {
    pub color: Color,
}

/// Rectangle outline of uniform width, drawn inside the item bounds.
#[derive(Clone, Debug)]
pub struct FrameItem {
    pub color: Color,
    pub width: f32,
}

/// Circular scatter marker.
#[derive(Clone, Debug)]
pub struct MarkerItem {
    /// Center of the circle.
    pub center: Point,
    /// Radius to the middle of the outline.
    pub radius: f32,
    /// Face color.
    pub fill: Color,
    /// Outline color.
    pub edge: Color,
    /// Outline width in pixels.
    pub edge_width: f32,
}

/// Text display item.
#[derive(Clone, Debug)]
pub struct TextItem {
    /// The text to render.
    pub text: String,
    /// Glyph positions on the baseline.
    pub glyphs: SmallVec<[GlyphInstance; 16]>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color.
    pub color: Color,
}

/// A single glyph instance.
#[derive(Clone, Copy, Debug)]
pub struct GlyphInstance {
    /// Character to rasterize.
    pub ch: char,
    /// Pen position on the baseline.
    pub point: Point,
}
