//! Orientation change reporting.
//!
//! Wraps a [`Dice`] and reports only genuine face transitions, so the
//! gateway sees one line per flip instead of one per sample.

use crate::dice::{Dice, Face, Sample};
use crate::report::Report;

pub struct OrientationReporter {
    dice: Dice,
    last_reported: Face,
}

impl OrientationReporter {
    /// Creates a reporter; the first confirmed face is always reported.
    pub fn new(dice: Dice) -> Self {
        Self {
            dice,
            last_reported: Face::Unknown,
        }
    }

    /// Feeds one accelerometer sample.
    pub fn update(&mut self, sample: Sample) -> Option<Report> {
        let face = self.dice.feed(sample);
        if face == self.last_reported {
            return None;
        }
        self.last_reported = face;
        Some(Report::Orientation(face))
    }
}

impl Default for OrientationReporter {
    fn default() -> Self {
        Self::new(Dice::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_transitions_only() {
        let mut reporter = OrientationReporter::default();
        assert_eq!(
            reporter.update(Sample::new(0.0, 0.0, 1.0)),
            Some(Report::Orientation(Face::Top))
        );
        assert_eq!(reporter.update(Sample::new(0.0, 0.02, 0.99)), None);
        assert_eq!(reporter.update(Sample::new(0.4, 0.4, 0.4)), None);
        assert_eq!(
            reporter.update(Sample::new(-1.0, 0.0, 0.0)),
            Some(Report::Orientation(Face::Back))
        );
        assert_eq!(reporter.dice.face(), Face::Back);
    }

    #[test]
    fn test_ambiguous_start_reports_nothing() {
        let mut reporter = OrientationReporter::default();
        assert_eq!(reporter.update(Sample::new(0.3, 0.3, 0.3)), None);
        assert_eq!(reporter.dice.face(), Face::Unknown);
    }

    #[test]
    fn test_preset_face_is_reported_once() {
        let mut reporter = OrientationReporter::new(Dice::new(Face::Left));
        assert_eq!(
            reporter.update(Sample::new(0.0, 0.0, 0.0)),
            Some(Report::Orientation(Face::Left))
        );
        assert_eq!(reporter.update(Sample::new(0.0, 0.9, 0.0)), None);
    }
}
