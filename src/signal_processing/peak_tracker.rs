/// Running maximum of the calibrated vector magnitude
///
/// The maximum only grows between resets. The session resets it when
/// sensing (re)starts and when the user calibrates.
#[derive(Debug, Clone, Default)]
pub struct PeakTracker {
    max: f32,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one magnitude and return the updated maximum
    ///
    /// NaN magnitudes are ignored.
    pub fn observe(&mut self, magnitude: f32) -> f32 {
        if magnitude > self.max {
            self.max = magnitude;
        }
        self.max
    }

    pub fn current(&self) -> f32 {
        self.max
    }

    pub fn reset(&mut self) {
        self.max = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_is_monotonic() {
        let mut tracker = PeakTracker::new();
        let magnitudes = [0.5, 2.0, 1.0, 3.5, 0.0, 3.4, f32::NAN, 1.2];

        let mut previous = 0.0;
        for m in magnitudes {
            let max = tracker.observe(m);
            assert!(max >= previous);
            previous = max;
        }
        assert!((tracker.current() - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset_allows_smaller_peak() {
        let mut tracker = PeakTracker::new();
        tracker.observe(9.0);
        tracker.reset();
        assert_eq!(tracker.current(), 0.0);
        assert!((tracker.observe(0.25) - 0.25).abs() < 1e-6);
    }
}
