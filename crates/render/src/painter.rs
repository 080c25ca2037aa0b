//! Painter - generates display lists from a classified calendar grid.

use crate::display_list::{
    DisplayItem, DisplayItemType, DisplayList, FrameItem, GlyphInstance, MarkerItem, TextItem,
};
use crate::figure::Figure;
use crate::font::FontCache;
use crate::theme::Theme;
use common::color::Color;
use common::geometry::{Point, Rect};
use smallvec::SmallVec;
use std::sync::Arc;
use timeline::{CalendarGrid, Cell, Timeline, YEARS};
use tracing::{debug, warn};

/// Figure title.
pub const TITLE: &str = "Calendar of life";
/// Legend name of the highlighted week.
pub const NOW_LABEL: &str = "now";
/// Year labels every this many rows.
pub const YEAR_LABEL_STEP: usize = 10;

const TITLE_SIZE_PT: f32 = 12.0;
const LABEL_SIZE_PT: f32 = 9.0;
const LEGEND_SIZE_PT: f32 = 10.0;
const LEGEND_FRAME_PT: f32 = 0.8;

/// Horizontal text alignment relative to the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
}

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub fill: Color,
    pub opacity: f32,
}

/// Painter for generating calendar display lists.
pub struct CalendarPainter {
    figure: Figure,
    theme: Theme,
    fonts: Arc<FontCache>,
}

impl CalendarPainter {
    pub fn new(figure: Figure, theme: Theme, fonts: Arc<FontCache>) -> Self {
        Self { figure, theme, fonts }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Paint the grid and generate a display list.
    ///
    /// With `highlight` set, the current week is taken out of the future weeks
    /// and drawn as a "now" marker at that opacity.
    pub fn paint(&self, grid: &CalendarGrid, timeline: &Timeline, highlight: Option<f32>) -> DisplayList {
        let mut display_list = DisplayList::new();
        let (width, height) = self.figure.pixel_size();
        display_list.push(DisplayItem::solid(
            Rect::new(0.0, 0.0, width as f32, height as f32),
            self.theme.face,
        ));

        let now = match highlight {
            Some(_) => {
                let current = grid.current_week();
                if current.is_none() {
                    warn!("Every week of the grid is lived; nothing to highlight");
                }
                current
            }
            None => None,
        };

        let mut legend = Vec::new();

        // 1. Paint one marker per week, grouped by stage
        for (label, cells) in grid.groups() {
            let fill = timeline.color_of(label, self.theme.face);
            let mut drawn = 0;
            for cell in cells.iter().filter(|cell| Some(**cell) != now) {
                display_list.push(self.week_marker(*cell, fill));
                drawn += 1;
            }

            if drawn > 0 {
                legend.push(LegendEntry {
                    name: timeline.name_of(label).to_string(),
                    fill,
                    opacity: 1.0,
                });
            }
        }

        // 2. Paint the highlighted week on top
        if let (Some(cell), Some(alpha)) = (now, highlight) {
            display_list.push(self.week_marker(cell, self.theme.highlight).with_opacity(alpha));
            legend.push(LegendEntry {
                name: NOW_LABEL.to_string(),
                fill: self.theme.highlight,
                opacity: alpha,
            });
        }

        // 3. Paint text and legend
        self.paint_year_labels(&mut display_list);
        self.paint_title(&mut display_list);
        self.paint_legend(&legend, &mut display_list);

        debug!(
            "Painted {} items ({} markers, highlight {:?})",
            display_list.len(),
            display_list.marker_count(None),
            highlight
        );

        display_list
    }

    fn week_marker(&self, cell: Cell, fill: Color) -> DisplayItem {
        self.marker_at(self.figure.cell_center(cell), fill)
    }

    fn marker_at(&self, center: Point, fill: Color) -> DisplayItem {
        DisplayItem::marker(MarkerItem {
            center,
            radius: self.figure.marker_radius(),
            fill,
            edge: self.theme.edge,
            edge_width: self.figure.marker_edge_width(),
        })
    }

    /// `10y` .. `70y` to the left of the grid.
    fn paint_year_labels(&self, display_list: &mut DisplayList) {
        let size = self.figure.points(LABEL_SIZE_PT);
        let x = self.figure.year_label_x();

        for year in (YEAR_LABEL_STEP..YEARS).step_by(YEAR_LABEL_STEP) {
            let anchor = Point::new(x, self.figure.row_y(year));
            if let Some(item) = self.text(&format!("{year}y"), size, anchor, HAlign::Right, VAlign::Center) {
                display_list.push(item);
            }
        }
    }

    fn paint_title(&self, display_list: &mut DisplayList) {
        let size = self.figure.points(TITLE_SIZE_PT);
        if let Some(item) = self.text(TITLE, size, self.figure.title_anchor(), HAlign::Center, VAlign::Top) {
            display_list.push(item);
        }
    }

    /// Legend box in the upper right corner of the plot area.
    fn paint_legend(&self, entries: &[LegendEntry], display_list: &mut DisplayList) {
        if entries.is_empty() {
            return;
        }

        let em = self.figure.points(LEGEND_SIZE_PT);
        let pad = 0.4 * em;
        let handle = 2.0 * em;
        let handle_pad = 0.8 * em;
        let spacing = 0.5 * em;
        let inset = 0.5 * em;

        let text_width = entries
            .iter()
            .map(|entry| self.measure(&entry.name, em))
            .fold(0.0f32, f32::max);
        let rows = entries.len() as f32;
        let box_width = 2.0 * pad + handle + handle_pad + text_width;
        let box_height = 2.0 * pad + rows * em + (rows - 1.0) * spacing;

        let axes = self.figure.axes_rect();
        let frame = Rect::new(axes.right() - inset - box_width, axes.y + inset, box_width, box_height);

        display_list.push(DisplayItem::solid(frame, self.theme.legend_face()));
        display_list.push(DisplayItem::new(
            DisplayItemType::Frame(FrameItem {
                color: self.theme.legend_edge,
                width: self.figure.points(LEGEND_FRAME_PT).max(1.0),
            }),
            frame,
        ));

        for (row, entry) in entries.iter().enumerate() {
            let center_y = frame.y + pad + em / 2.0 + row as f32 * (em + spacing);
            let handle_center = Point::new(frame.x + pad + handle / 2.0, center_y);
            display_list.push(self.marker_at(handle_center, entry.fill).with_opacity(entry.opacity));

            let text_anchor = Point::new(frame.x + pad + handle + handle_pad, center_y);
            if let Some(item) = self.text(&entry.name, em, text_anchor, HAlign::Left, VAlign::Center) {
                display_list.push(item);
            }
        }
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        match self.fonts.font() {
            Some(font) => font.measure_width(text, size),
            None => text.len() as f32 * size * 0.5,
        }
    }

    /// Lay out a run of text. Returns `None` when no font is loaded.
    fn text(&self, text: &str, size: f32, anchor: Point, h_align: HAlign, v_align: VAlign) -> Option<DisplayItem> {
        let font = self.fonts.font()?;
        let width = font.measure_width(text, size);
        let line = font.line_metrics(size);

        let x = match h_align {
            HAlign::Left => anchor.x,
            HAlign::Center => anchor.x - width / 2.0,
            HAlign::Right => anchor.x - width,
        };
        let baseline = match v_align {
            VAlign::Top => anchor.y + line.ascent,
            VAlign::Center => anchor.y + (line.ascent + line.descent) / 2.0,
        };

        let mut glyphs = SmallVec::new();
        let mut pen = x;
        for ch in text.chars() {
            glyphs.push(GlyphInstance {
                ch,
                point: Point::new(pen, baseline),
            });
            pen += font.metrics(ch, size).advance_width;
        }

        let bounds = Rect::new(x, baseline - line.ascent, width, line.ascent - line.descent);
        Some(DisplayItem::new(
            DisplayItemType::Text(TextItem {
                text: text.to_string(),
                glyphs,
                font_size: size,
                color: self.theme.text,
            }),
            bounds,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use timeline::{LifeStage, StageLabel};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timeline() -> Timeline {
        Timeline::new(vec![
            LifeStage::born(date(2000, 1, 1)),
            LifeStage::new("first", date(2001, 1, 1), Color::from_cycle("C0")),
            LifeStage::new("second", date(2002, 1, 1), Color::from_cycle("C1")),
        ])
        .unwrap()
    }

    fn painter(theme: Theme) -> CalendarPainter {
        CalendarPainter::new(Figure::new(50), theme, Arc::new(FontCache::empty()))
    }

    #[test]
    fn test_paint_without_highlight() {
        let timeline = timeline();
        let grid = CalendarGrid::build(&timeline).unwrap();
        let painter = painter(Theme::dark());

        let list = painter.paint(&grid, &timeline, None);

        // Background first, one marker per week plus three legend handles.
        assert!(matches!(list.items()[0].item_type, DisplayItemType::SolidColor(_)));
        assert_eq!(list.marker_count(None), 52 * 80 + 3);
        assert_eq!(list.marker_count(Some(Color::from_cycle("C0").unwrap())), 52 + 1);
        assert_eq!(list.marker_count(Some(Color::WHITE)), 0);
    }

    #[test]
    fn test_highlight_replaces_first_future_week() {
        let timeline = timeline();
        let grid = CalendarGrid::build(&timeline).unwrap();
        let painter = painter(Theme::dark());

        let list = painter.paint(&grid, &timeline, Some(0.4));
        let future = grid.cells_of(StageLabel::Future).len();

        // Future markers lose one week; the "now" marker and its legend handle are added.
        assert_eq!(list.marker_count(Some(Color::BLACK)), future - 1 + 1);
        let now: Vec<_> = list
            .items()
            .iter()
            .filter(|item| matches!(&item.item_type, DisplayItemType::Marker(m) if m.fill == Color::WHITE))
            .collect();
        assert_eq!(now.len(), 2);
        assert!(now.iter().all(|item| item.opacity == 0.4));

        let center = painter.figure().cell_center(grid.current_week().unwrap());
        assert!(now[0].bounds.center().distance(center) < 1e-3);
    }

    #[test]
    fn test_fully_lived_grid_ignores_highlight() {
        let timeline = Timeline::new(vec![
            LifeStage::born(date(1900, 1, 1)),
            LifeStage::new("all of it", date(1990, 1, 1), None),
        ])
        .unwrap();
        let grid = CalendarGrid::build(&timeline).unwrap();
        let painter = painter(Theme::light());

        // Every week plus a single legend handle; no "now" marker.
        let list = painter.paint(&grid, &timeline, Some(1.0));
        assert_eq!(list.marker_count(None), 52 * 80 + 1);
        assert_eq!(list.marker_count(Some(Color::WHITE)), 0);
    }

    #[test]
    fn test_no_font_means_no_text() {
        let timeline = timeline();
        let grid = CalendarGrid::build(&timeline).unwrap();
        let list = painter(Theme::dark()).paint(&grid, &timeline, None);

        assert!(!list
            .items()
            .iter()
            .any(|item| matches!(item.item_type, DisplayItemType::Text(_))));
    }

    #[test]
    fn test_text_with_system_font() {
        let fonts = Arc::new(FontCache::new());
        if !fonts.has_font() {
            return;
        }
        let timeline = timeline();
        let grid = CalendarGrid::build(&timeline).unwrap();
        let painter = CalendarPainter::new(Figure::new(50), Theme::dark(), fonts);

        let list = painter.paint(&grid, &timeline, Some(1.0));
        let texts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|item| match &item.item_type {
                DisplayItemType::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect();

        // Seven year labels, the title, and one legend row per entry.
        assert_eq!(&texts[..7], &["10y", "20y", "30y", "40y", "50y", "60y", "70y"]);
        assert_eq!(texts[7], TITLE);
        assert_eq!(&texts[8..], &["first", "second", "future", NOW_LABEL]);
    }
}
