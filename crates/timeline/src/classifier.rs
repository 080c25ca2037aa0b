//! Week-of-life stage classification.

use common::{CalendarError, CalendarResult};

/// Stage assigned to a week of life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageLabel {
    /// Index into the timeline's stages. Always at least 1; birth labels nothing.
    Stage(usize),
    /// Past the last boundary.
    Future,
}

impl StageLabel {
    pub fn is_future(&self) -> bool {
        matches!(self, StageLabel::Future)
    }
}

/// Binary-search lookup of week counters against sorted cumulative boundaries.
#[derive(Clone, Copy, Debug)]
pub struct StageClassifier<'a> {
    boundaries: &'a [f64],
}

impl<'a> StageClassifier<'a> {
    pub fn new(boundaries: &'a [f64]) -> Self {
        Self { boundaries }
    }

    /// Classify a 1-indexed week counter.
    ///
    /// The label is the stage whose boundary is the first one `>=` the counter.
    /// Counters past the last boundary are [`StageLabel::Future`]. Counter 0 is
    /// the birth week itself and is rejected.
    pub fn classify(&self, week_counter: usize) -> CalendarResult<StageLabel> {
        if week_counter == 0 {
            return Err(CalendarError::invalid("week counters start at 1; week 0 is birth"));
        }

        let week = week_counter as f64;
        let index = self.boundaries.partition_point(|&boundary| boundary < week);

        if index == self.boundaries.len() {
            Ok(StageLabel::Future)
        } else {
            Ok(StageLabel::Stage(index + 1))
        }
    }

    pub fn boundaries(&self) -> &[f64] {
        self.boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_nearest_greater_or_equal() {
        let boundaries = [10.0, 20.0, 30.5];
        let classifier = StageClassifier::new(&boundaries);

        assert_eq!(classifier.classify(1).unwrap(), StageLabel::Stage(1));
        assert_eq!(classifier.classify(10).unwrap(), StageLabel::Stage(1));
        assert_eq!(classifier.classify(11).unwrap(), StageLabel::Stage(2));
        assert_eq!(classifier.classify(20).unwrap(), StageLabel::Stage(2));
        assert_eq!(classifier.classify(30).unwrap(), StageLabel::Stage(3));
    }

    #[test]
    fn test_past_last_boundary_is_future() {
        let boundaries = [10.0, 20.0, 30.5];
        let classifier = StageClassifier::new(&boundaries);

        assert_eq!(classifier.classify(31).unwrap(), StageLabel::Future);
        assert_eq!(classifier.classify(4160).unwrap(), StageLabel::Future);
        assert!(classifier.classify(31).unwrap().is_future());
    }

    #[test]
    fn test_birth_week_is_rejected() {
        let boundaries = [10.0];
        let classifier = StageClassifier::new(&boundaries);
        assert!(matches!(classifier.classify(0), Err(CalendarError::InvalidOperation(_))));
    }

    #[test]
    fn test_no_boundaries_means_all_future() {
        let classifier = StageClassifier::new(&[]);
        assert_eq!(classifier.classify(1).unwrap(), StageLabel::Future);
    }

    #[test]
    fn test_labels_are_monotone() {
        let boundaries = [3.2, 3.9, 7.0, 50.0];
        let classifier = StageClassifier::new(&boundaries);

        let labels: Vec<_> = (1..=60).map(|week| classifier.classify(week).unwrap()).collect();
        assert!(labels.windows(2).all(|pair| pair[0] <= pair[1]));
        // A boundary with no integer counter in its range labels nothing.
        assert!(!labels.contains(&StageLabel::Stage(2)));
    }
}
