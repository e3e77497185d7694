use rolling_stats::Stats;
use serde::Serialize;

use crate::sample::RecordedReading;

/// Aggregate statistics over a set of recorded readings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub count: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub duration_ms: i64,
    pub max_magnitude: f32,
    pub mean_magnitude: f32,
    pub std_dev_magnitude: f32,
}

impl SessionSummary {
    /// Summarize readings in chronological order; `None` when empty
    pub fn from_readings(readings: &[RecordedReading]) -> Option<Self> {
        let first = readings.first()?;
        let last = readings.last()?;

        let mut stats: Stats<f32> = Stats::new();
        for reading in readings {
            stats.update(reading.magnitude);
        }

        Some(Self {
            count: stats.count,
            start_ms: first.timestamp_ms,
            end_ms: last.timestamp_ms,
            duration_ms: last.timestamp_ms - first.timestamp_ms,
            max_magnitude: stats.max,
            mean_magnitude: stats.mean,
            std_dev_magnitude: stats.std_dev,
        })
    }

    /// Duration as `MM:SS`
    pub fn formatted_duration(&self) -> String {
        let total_secs = self.duration_ms.max(0) / 1000;
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Vector3;

    #[test]
    fn test_empty_has_no_summary() {
        assert!(SessionSummary::from_readings(&[]).is_none());
    }

    #[test]
    fn test_summary_values() {
        let readings = [
            RecordedReading::new(1_000, Vector3::new(3.0, 4.0, 0.0)),
            RecordedReading::new(2_000, Vector3::new(0.0, 0.0, 1.0)),
            RecordedReading::new(66_000, Vector3::new(0.0, 0.0, 3.0)),
        ];
        let summary = SessionSummary::from_readings(&readings).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.duration_ms, 65_000);
        assert!((summary.max_magnitude - 5.0).abs() < 1e-5);
        assert!((summary.mean_magnitude - 3.0).abs() < 1e-5);
        assert_eq!(summary.formatted_duration(), "01:05");
    }
}
