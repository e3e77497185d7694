use super::math::{planar_angle_degrees, planar_radius};
use crate::config::CoordinateMode;
use crate::sample::Vector3;

/// The three displayed values for one sample, before a timestamp is attached
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayValues {
    pub v1: f32,
    pub v2: f32,
    pub v3: f32,
}

/// Express a calibrated Cartesian sample in the given coordinate mode
///
/// * Cartesian: `(x, y, z)` unchanged
/// * Polar: `(sqrt(x² + y²), atan2(y, x) in degrees, z)`
///
/// The z axis passes through in both modes. A zero planar vector maps to
/// radius 0 and angle 0.
pub fn to_display(mode: CoordinateMode, calibrated: Vector3) -> DisplayValues {
    match mode {
        CoordinateMode::Cartesian => DisplayValues {
            v1: calibrated.x,
            v2: calibrated.y,
            v3: calibrated.z,
        },
        CoordinateMode::Polar => DisplayValues {
            v1: planar_radius(calibrated.x, calibrated.y),
            v2: planar_angle_degrees(calibrated.x, calibrated.y),
            v3: calibrated.z,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartesian_is_identity() {
        let v = Vector3::new(1.5, -2.5, 9.0);
        let out = to_display(CoordinateMode::Cartesian, v);
        assert_eq!(out, DisplayValues { v1: 1.5, v2: -2.5, v3: 9.0 });
    }

    #[test]
    fn test_polar_round_trip() {
        for &(x, y) in &[(3.0_f32, 4.0_f32), (-1.0, 2.0), (-0.5, -0.25), (7.0, -0.1)] {
            let out = to_display(CoordinateMode::Polar, Vector3::new(x, y, 1.0));
            assert!(out.v1 >= 0.0);
            assert!(out.v2 > -180.0 && out.v2 <= 180.0);

            let angle = out.v2.to_radians();
            assert!((out.v1 * angle.cos() - x).abs() < 1e-4);
            assert!((out.v1 * angle.sin() - y).abs() < 1e-4);
            assert_eq!(out.v3, 1.0);
        }
    }

    #[test]
    fn test_polar_zero_vector_is_defined() {
        let out = to_display(CoordinateMode::Polar, Vector3::new(0.0, 0.0, -3.0));
        assert_eq!(out.v1, 0.0);
        assert_eq!(out.v2, 0.0);
        assert_eq!(out.v3, -3.0);
        assert!(!out.v1.is_nan() && !out.v2.is_nan());
    }
}
