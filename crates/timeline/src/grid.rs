//! The fixed week x year calendar grid.

use crate::classifier::StageLabel;
use crate::timeline::Timeline;
use common::CalendarResult;
use indexmap::IndexMap;
use tracing::debug;

/// Columns of the grid.
pub const WEEKS_PER_YEAR: usize = 52;
/// Rows of the grid.
pub const YEARS: usize = 80;

/// One week of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column, `0..WEEKS_PER_YEAR`.
    pub week: usize,
    /// Row, `0..YEARS`.
    pub year: usize,
}

impl Cell {
    pub const fn new(week: usize, year: usize) -> Self {
        Self { week, year }
    }

    /// Sequential 1-indexed week counter, year-major then week-minor.
    pub const fn counter(&self) -> usize {
        self.year * WEEKS_PER_YEAR + self.week + 1
    }
}

/// Every cell of the 52 x 80 grid, labeled with its stage.
#[derive(Clone, Debug)]
pub struct CalendarGrid {
    /// Labels in traversal order.
    labels: Vec<StageLabel>,
    /// Cells per label, in first-appearance order of the labels.
    groups: IndexMap<StageLabel, Vec<Cell>>,
}

impl CalendarGrid {
    /// Classify every cell of the grid against the timeline's boundaries.
    pub fn build(timeline: &Timeline) -> CalendarResult<Self> {
        let classifier = timeline.classifier();
        let mut labels = Vec::with_capacity(WEEKS_PER_YEAR * YEARS);
        let mut groups: IndexMap<StageLabel, Vec<Cell>> = IndexMap::new();

        for cell in Self::cells() {
            let label = classifier.classify(cell.counter())?;
            labels.push(label);
            groups.entry(label).or_default().push(cell);
        }

        debug!(
            "Classified {} cells into {} groups ({} future)",
            labels.len(),
            groups.len(),
            groups.get(&StageLabel::Future).map_or(0, Vec::len)
        );

        Ok(Self { labels, groups })
    }

    /// All cells in traversal order.
    pub fn cells() -> impl Iterator<Item = Cell> {
        (0..YEARS).flat_map(|year| (0..WEEKS_PER_YEAR).map(move |week| Cell::new(week, year)))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_at(&self, cell: Cell) -> Option<StageLabel> {
        if cell.week >= WEEKS_PER_YEAR || cell.year >= YEARS {
            return None;
        }
        self.labels.get(cell.counter() - 1).copied()
    }

    /// Label groups in first-appearance order.
    pub fn groups(&self) -> impl Iterator<Item = (StageLabel, &[Cell])> {
        self.groups.iter().map(|(label, cells)| (*label, cells.as_slice()))
    }

    pub fn cells_of(&self, label: StageLabel) -> &[Cell] {
        self.groups.get(&label).map_or(&[], Vec::as_slice)
    }

    /// The week to highlight as "now": the first future cell, if the grid has one.
    pub fn current_week(&self) -> Option<Cell> {
        self.cells_of(StageLabel::Future).first().copied()
    }
}
