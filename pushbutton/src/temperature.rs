//! Temperature publish policy.
//!
//! The thermometer is read every sampling tick, but a value is only
//! published when the regular report is due or when it moved far enough
//! from the last published value.

use embassy_time::{Duration, Instant};

use crate::config::{TEMPERATURE_PUB_DIFFERENCE, TEMPERATURE_PUB_INTERVAL};
use crate::report::Report;

/// Decides which temperature readings get published.
#[derive(Debug)]
pub struct TemperatureReporter {
    interval: Duration,
    difference: f32,
    /// Next time a report is due regardless of change
    next_report: Instant,
    last_published: Option<f32>,
}

impl TemperatureReporter {
    /// Creates a reporter that publishes the first reading right away.
    ///
    /// # Arguments
    ///
    /// * `interval` - Longest time between two published values
    /// * `difference` - Change in °C that forces an early publish
    pub fn new(interval: Duration, difference: f32) -> Self {
        Self {
            interval,
            difference,
            next_report: Instant::from_ticks(0),
            last_published: None,
        }
    }

    /// Offers one reading taken at `now`.
    ///
    /// Returns the report to send, if any. Non-finite readings are dropped.
    pub fn update(&mut self, celsius: f32, now: Instant) -> Option<Report> {
        if !celsius.is_finite() {
            return None;
        }

        let due = now >= self.next_report;
        let changed = self
            .last_published
            .is_some_and(|last| (celsius - last).abs() >= self.difference);

        if !(due || changed) {
            return None;
        }

        self.next_report = now + self.interval;
        self.last_published = Some(celsius);
        Some(Report::Temperature(celsius))
    }
}

impl Default for TemperatureReporter {
    fn default() -> Self {
        Self::new(TEMPERATURE_PUB_INTERVAL, TEMPERATURE_PUB_DIFFERENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_secs(secs: u64) -> Instant {
        Instant::from_secs(secs)
    }

    #[test]
    fn test_first_reading_is_published() {
        let mut reporter = TemperatureReporter::default();
        assert_eq!(reporter.update(21.5, at_secs(1)), Some(Report::Temperature(21.5)));
        assert_eq!(reporter.last_published, Some(21.5));
    }

    #[test]
    fn test_small_changes_wait_for_interval() {
        let mut reporter = TemperatureReporter::default();
        reporter.update(21.5, at_secs(1));
        assert_eq!(reporter.update(21.6, at_secs(2)), None);
        assert_eq!(reporter.update(21.4, at_secs(600)), None);
        assert_eq!(
            reporter.update(21.6, at_secs(1 + 15 * 60)),
            Some(Report::Temperature(21.6))
        );
    }

    #[test]
    fn test_large_change_is_published_early() {
        let mut reporter = TemperatureReporter::default();
        reporter.update(20.0, at_secs(1));
        assert_eq!(reporter.update(20.25, at_secs(11)), Some(Report::Temperature(20.25)));
        assert_eq!(reporter.update(19.75, at_secs(21)), Some(Report::Temperature(19.75)));
    }

    #[test]
    fn test_change_is_measured_from_last_published() {
        let mut reporter = TemperatureReporter::default();
        reporter.update(20.0, at_secs(1));
        // Slow drift is not reported until it adds up.
        assert_eq!(reporter.update(20.125, at_secs(11)), None);
        assert_eq!(reporter.update(20.25, at_secs(21)), Some(Report::Temperature(20.25)));
    }

    #[test]
    fn test_publish_moves_deadline() {
        let mut reporter = TemperatureReporter::default();
        reporter.update(20.0, at_secs(1));
        reporter.update(25.0, at_secs(500));
        // Due relative to the early publish, not the first one.
        assert_eq!(reporter.update(25.0, at_secs(1 + 15 * 60)), None);
        assert_eq!(
            reporter.update(25.0, at_secs(500 + 15 * 60)),
            Some(Report::Temperature(25.0))
        );
    }

    #[test]
    fn test_nan_is_dropped() {
        let mut reporter = TemperatureReporter::default();
        assert_eq!(reporter.update(f32::NAN, at_secs(1)), None);
        assert_eq!(reporter.last_published, None);
    }
}
