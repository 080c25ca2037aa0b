//! Validated life timeline and its week-of-life boundaries.

use crate::classifier::{StageClassifier, StageLabel};
use crate::stage::LifeStage;
use chrono::NaiveDate;
use common::{CalendarError, CalendarResult, Color};
use tracing::debug;

/// Approximate week length in days.
///
/// 52 weeks is not exactly one year, so a week is stretched to 365.25 / 52
/// (about 7.024) days and every grid row lines up with a calendar year.
pub const DAYS_PER_WEEK: f64 = 365.25 / 52.0;

/// An ordered list of life stages with precomputed boundaries.
#[derive(Clone, Debug)]
pub struct Timeline {
    stages: Vec<LifeStage>,
    /// `boundaries[i]` is the number of weeks from birth to `stages[i + 1].date`.
    boundaries: Vec<f64>,
}

impl Timeline {
    /// Build a timeline. The first stage is the birth entry and dates must be
    /// strictly increasing.
    pub fn new(stages: Vec<LifeStage>) -> CalendarResult<Self> {
        if stages.is_empty() {
            return Err(CalendarError::stages("a life needs at least a birth entry"));
        }

        for pair in stages.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CalendarError::stages(format!(
                    "'{}' ({}) does not come after '{}' ({})",
                    pair[1].name, pair[1].date, pair[0].name, pair[0].date
                )));
            }
        }

        let boundaries = stages
            .windows(2)
            .map(|pair| Self::weeks_between(pair[0].date, pair[1].date))
            .scan(0.0, |elapsed, weeks| {
                *elapsed += weeks;
                Some(*elapsed)
            })
            .collect::<Vec<_>>();

        debug!(
            "Timeline with {} stages, last boundary at week {:.1}",
            stages.len(),
            boundaries.last().copied().unwrap_or(0.0)
        );

        Ok(Self { stages, boundaries })
    }

    /// Number of approximate weeks between two dates.
    pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> f64 {
        (to - from).num_days() as f64 / DAYS_PER_WEEK
    }

    pub fn stages(&self) -> &[LifeStage] {
        &self.stages
    }

    /// Cumulative week-of-life boundaries, one per stage after birth.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn birth(&self) -> &LifeStage {
        &self.stages[0]
    }

    pub fn classifier(&self) -> StageClassifier<'_> {
        StageClassifier::new(&self.boundaries)
    }

    /// Display name for a label.
    pub fn name_of(&self, label: StageLabel) -> &str {
        match label {
            StageLabel::Stage(index) => self
                .stages
                .get(index)
                .map(|stage| stage.name.as_str())
                .unwrap_or("unknown"),
            StageLabel::Future => "future",
        }
    }

    /// Marker color for a label. Future weeks take `future` (the background);
    /// stages without a color take the next entry of the property cycle.
    pub fn color_of(&self, label: StageLabel, future: Color) -> Color {
        match label {
            StageLabel::Stage(index) => self
                .stages
                .get(index)
                .and_then(|stage| stage.color)
                .unwrap_or_else(|| Color::cycle(index.saturating_sub(1))),
            StageLabel::Future => future,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<LifeStage> {
        vec![
            LifeStage::born(date(2000, 1, 1)),
            LifeStage::new("first", date(2001, 1, 1), Color::from_cycle("C0")),
            LifeStage::new("second", date(2002, 1, 1), None),
        ]
    }

    #[test]
    fn test_weeks_between() {
        let weeks = Timeline::weeks_between(date(2000, 1, 1), date(2001, 1, 1));
        assert!((weeks - 366.0 / DAYS_PER_WEEK).abs() < 1e-9);
        assert!((Timeline::weeks_between(date(2001, 1, 1), date(2002, 1, 1)) - 51.9644).abs() < 1e-3);
    }

    #[test]
    fn test_boundaries_are_cumulative() {
        let timeline = Timeline::new(sample()).unwrap();
        let boundaries = timeline.boundaries();

        assert_eq!(boundaries.len(), 2);
        assert!((boundaries[0] - 52.107).abs() < 1e-3);
        assert!((boundaries[1] - 731.0 / DAYS_PER_WEEK).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_empty_and_unordered() {
        assert!(matches!(Timeline::new(vec![]), Err(CalendarError::InvalidStages(_))));

        let mut stages = sample();
        stages[2].date = stages[1].date;
        assert!(matches!(Timeline::new(stages), Err(CalendarError::InvalidStages(_))));

        let mut stages = sample();
        stages.swap(1, 2);
        assert!(Timeline::new(stages).is_err());
    }

    #[test]
    fn test_birth_only_has_no_boundaries() {
        let timeline = Timeline::new(vec![LifeStage::born(date(2000, 1, 1))]).unwrap();
        assert!(timeline.boundaries().is_empty());
        assert_eq!(timeline.birth().name, "born");
    }

    #[test]
    fn test_names_and_colors() {
        let timeline = Timeline::new(sample()).unwrap();

        assert_eq!(timeline.name_of(StageLabel::Stage(1)), "first");
        assert_eq!(timeline.name_of(StageLabel::Future), "future");

        assert_eq!(timeline.color_of(StageLabel::Stage(1), Color::BLACK), Color::from_cycle("C0").unwrap());
        // Missing colors fall back to the property cycle.
        assert_eq!(timeline.color_of(StageLabel::Stage(2), Color::BLACK), Color::from_cycle("C1").unwrap());
        assert_eq!(timeline.color_of(StageLabel::Future, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_uncolored_stages_never_take_future_color() {
        let mut stages = vec![LifeStage::born(date(2000, 1, 1))];
        for year in 1..=12 {
            stages.push(LifeStage::new(format!("stage {year}"), date(2000 + year, 1, 1), None));
        }
        let timeline = Timeline::new(stages).unwrap();
        let future = Color::BLACK;

        for index in 1..=12 {
            let color = timeline.color_of(StageLabel::Stage(index), future);
            assert_eq!(color, Color::cycle(index - 1));
            assert_ne!(color, future);
        }
        // The cycle wraps after ten entries.
        assert_eq!(timeline.color_of(StageLabel::Stage(11), future), Color::cycle(0));
    }
}
