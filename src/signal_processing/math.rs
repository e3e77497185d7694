use crate::constants::ZERO_VECTOR_EPSILON;

/// Angle of the vector (x, y) in degrees, in the range (-180, 180]
///
/// A zero vector has angle 0.
pub fn planar_angle_degrees(x: f32, y: f32) -> f32 {
    if x.abs() < ZERO_VECTOR_EPSILON && y.abs() < ZERO_VECTOR_EPSILON {
        return 0.0;
    }
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wrap an angle in degrees into (-180, 180]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped <= -180.0 {
        wrapped += 360.0;
    } else if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Length of the vector (x, y)
pub fn planar_radius(x: f32, y: f32) -> f32 {
    x.hypot(y)
}
