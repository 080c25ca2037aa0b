//! Figure geometry: where every part of the calendar lands in pixels.

use common::geometry::{Point, Rect, Size};
use timeline::{Cell, WEEKS_PER_YEAR, YEARS};

/// Figure width in inches.
pub const FIGURE_WIDTH_IN: f32 = 9.0;
/// Figure height in inches.
pub const FIGURE_HEIGHT_IN: f32 = 13.0;

/// Axes placement as fractions of the figure (left, right, top, bottom from the top edge).
const AXES_LEFT: f32 = 0.125;
const AXES_RIGHT: f32 = 0.9;
const AXES_TOP: f32 = 0.12;
const AXES_BOTTOM: f32 = 0.89;
/// Autoscale margin on each side of the data, as a fraction of the data span.
const DATA_MARGIN: f32 = 0.05;
/// Top of the title, as a fraction of the figure height.
const TITLE_TOP: f32 = 0.11;

/// Weeks span this many data units horizontally; year labels sit 0.2 units left of week 0.
const WEEK_SPAN_UNITS: f32 = FIGURE_HEIGHT_IN;
const YEAR_LABEL_OFFSET_UNITS: f32 = 0.2;

const POINTS_PER_INCH: f32 = 72.0;

/// Pixel geometry of one calendar figure at a given DPI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Figure {
    dpi: f32,
    size: Size,
    axes: Rect,
    grid: Rect,
}

impl Figure {
    pub fn new(dpi: u32) -> Self {
        let dpi = dpi.max(1) as f32;
        let size = Size::new(FIGURE_WIDTH_IN * dpi, FIGURE_HEIGHT_IN * dpi);

        let axes = Rect::new(
            AXES_LEFT * size.width,
            AXES_TOP * size.height,
            (AXES_RIGHT - AXES_LEFT) * size.width,
            (AXES_BOTTOM - AXES_TOP) * size.height,
        );

        // Data occupies the axes minus the autoscale margins.
        let inset = DATA_MARGIN / (1.0 + 2.0 * DATA_MARGIN);
        let grid = Rect::new(
            axes.x + axes.width * inset,
            axes.y + axes.height * inset,
            axes.width * (1.0 - 2.0 * inset),
            axes.height * (1.0 - 2.0 * inset),
        );

        Self { dpi, size, axes, grid }
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Canvas size in whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.size.width.round() as u32, self.size.height.round() as u32)
    }

    /// Plot area, including the autoscale margins around the grid.
    pub fn axes_rect(&self) -> Rect {
        self.axes
    }

    /// Rect spanned by the marker centers.
    pub fn grid_rect(&self) -> Rect {
        self.grid
    }

    /// Convert typographic points to pixels.
    pub fn points(&self, pt: f32) -> f32 {
        pt * self.dpi / POINTS_PER_INCH
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        Point::new(self.column_x(cell.week), self.row_y(cell.year))
    }

    fn column_x(&self, week: usize) -> f32 {
        self.grid.x + self.grid.width * week as f32 / (WEEKS_PER_YEAR - 1) as f32
    }

    pub fn row_y(&self, year: usize) -> f32 {
        self.grid.y + self.grid.height * year as f32 / (YEARS - 1) as f32
    }

    /// Right edge of the year labels.
    pub fn year_label_x(&self) -> f32 {
        self.grid.x - YEAR_LABEL_OFFSET_UNITS * self.grid.width / WEEK_SPAN_UNITS
    }

    /// Top of the title text, centered horizontally.
    pub fn title_anchor(&self) -> Point {
        Point::new(self.size.width / 2.0, TITLE_TOP * self.size.height)
    }

    /// Marker radius for a scatter size of 36 pt^2.
    pub fn marker_radius(&self) -> f32 {
        self.points(3.0)
    }

    pub fn marker_edge_width(&self) -> f32 {
        self.points(1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_scales_with_dpi() {
        assert_eq!(Figure::new(100).pixel_size(), (900, 1300));
        assert_eq!(Figure::new(300).pixel_size(), (2700, 3900));
    }

    #[test]
    fn test_grid_corners() {
        let figure = Figure::new(100);
        let grid = figure.grid_rect();

        assert_eq!(figure.cell_center(Cell::new(0, 0)), Point::new(grid.x, grid.y));
        let last = figure.cell_center(Cell::new(WEEKS_PER_YEAR - 1, YEARS - 1));
        assert!((last.x - grid.right()).abs() < 1e-3);
        assert!((last.y - grid.bottom()).abs() < 1e-3);
    }

    #[test]
    fn test_grid_inside_canvas() {
        let figure = Figure::new(72);
        let (width, height) = figure.pixel_size();
        let grid = figure.grid_rect();
        let radius = figure.marker_radius() + figure.marker_edge_width();

        assert!(grid.x - radius > 0.0);
        assert!(grid.y - radius > figure.title_anchor().y);
        assert!(grid.right() + radius < width as f32);
        assert!(grid.bottom() + radius < height as f32);
        assert!(figure.year_label_x() < grid.x);
        assert!(figure.axes_rect().x < grid.x && figure.axes_rect().right() > grid.right());
    }

    #[test]
    fn test_markers_do_not_overlap() {
        let figure = Figure::new(300);
        let a = figure.cell_center(Cell::new(0, 0));
        let right = figure.cell_center(Cell::new(1, 0));
        let below = figure.cell_center(Cell::new(0, 1));
        let diameter = 2.0 * figure.marker_radius() + figure.marker_edge_width();

        assert!(a.distance(right) > diameter);
        assert!(a.distance(below) > diameter);
    }

    #[test]
    fn test_points_to_pixels() {
        let figure = Figure::new(144);
        assert_eq!(figure.points(9.0), 18.0);
        assert_eq!(figure.dpi(), 144.0);
    }
}
