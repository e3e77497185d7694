use crate::sample::Vector3;

/// Common trait for per-axis sample filters
pub trait Filter {
    /// Filter one three-axis sample
    fn apply(&mut self, raw: Vector3) -> Vector3;

    /// Forget all history so the next sample starts a fresh estimate
    fn reset(&mut self);
}

/// Exponential moving average applied independently to each axis
///
/// The first sample after construction or [`Filter::reset`] seeds the
/// estimate directly; every later sample moves the estimate by `alpha` of
/// the difference:
///
/// `filtered = alpha * raw + (1 - alpha) * previous`
pub struct ExponentialFilter {
    alpha: f32,
    estimate: Vector3,
    initialized: bool,
}

impl ExponentialFilter {
    /// Create a new filter
    ///
    /// # Arguments
    /// * `alpha` - Weight of the newest sample in (0, 1]; smaller is smoother
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            estimate: Vector3::ZERO,
            initialized: false,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Most recent estimate, or `None` before the first sample
    pub fn last(&self) -> Option<Vector3> {
        self.initialized.then_some(self.estimate)
    }

    fn smooth(&self, previous: f32, raw: f32) -> f32 {
        self.alpha * raw + (1.0 - self.alpha) * previous
    }
}

impl Filter for ExponentialFilter {
    fn apply(&mut self, raw: Vector3) -> Vector3 {
        if !self.initialized {
            self.estimate = raw;
            self.initialized = true;
            return self.estimate;
        }

        self.estimate = Vector3::new(
            self.smooth(self.estimate.x, raw.x),
            self.smooth(self.estimate.y, raw.y),
            self.smooth(self.estimate.z, raw.z),
        );
        self.estimate
    }

    fn reset(&mut self) {
        self.estimate = Vector3::ZERO;
        self.initialized = false;
    }
}
