pub mod calibration;
pub mod coordinates;
pub mod filter;
pub mod math;
pub mod peak_tracker;

pub use calibration::Calibrator;
pub use coordinates::{DisplayValues, to_display};
pub use filter::{ExponentialFilter, Filter};
pub use math::{normalize_degrees, planar_angle_degrees, planar_radius};
pub use peak_tracker::PeakTracker;
