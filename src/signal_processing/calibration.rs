use crate::sample::Vector3;

/// Zero-offset baseline subtracted from filtered samples
///
/// The baseline is a snapshot of the filtered estimate taken when the user
/// calibrates; it is never updated by the sample stream itself.
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    offset: Vector3,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `last_filtered` as the new zero baseline
    pub fn calibrate(&mut self, last_filtered: Vector3) {
        self.offset = last_filtered;
    }

    /// Subtract the baseline from a filtered sample
    pub fn apply(&self, filtered: Vector3) -> Vector3 {
        filtered - self.offset
    }

    pub fn offset(&self) -> Vector3 {
        self.offset
    }

    /// Return to the uncalibrated zero baseline
    pub fn reset(&mut self) {
        self.offset = Vector3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncalibrated_is_identity() {
        let calibrator = Calibrator::new();
        let v = Vector3::new(0.3, -9.8, 1.2);
        assert_eq!(calibrator.apply(v), v);
    }

    #[test]
    fn test_calibration_zeroes_baseline() {
        let mut calibrator = Calibrator::new();
        let rest = Vector3::new(0.12, -0.05, 9.81);
        calibrator.calibrate(rest);
        assert_eq!(calibrator.apply(rest), Vector3::ZERO);

        let moved = calibrator.apply(Vector3::new(1.12, -0.05, 9.81));
        assert!((moved.x - 1.0).abs() < 1e-6);
        assert!(moved.y.abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_zero_offset() {
        let mut calibrator = Calibrator::new();
        calibrator.calibrate(Vector3::new(1.0, 2.0, 3.0));
        calibrator.reset();
        assert_eq!(calibrator.offset(), Vector3::ZERO);
    }
}
