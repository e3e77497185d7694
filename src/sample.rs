//! Sample records passed between pipeline stages.

use serde::{Deserialize, Serialize};

/// Three-axis value in sensor coordinates (m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// One instantaneous reading delivered by a sensor source
///
/// `timestamp` is wall-clock time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp: i64,
}

impl RawSample {
    pub fn new(x: f32, y: f32, z: f32, timestamp: i64) -> Self {
        Self { x, y, z, timestamp }
    }

    pub fn vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Value shown to the user for one sample
///
/// In Cartesian mode `v1, v2` are x and y; in polar mode they are the
/// radius and the angle in degrees. `v3` is always the z axis.
/// `time` is seconds since the session started.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DisplaySample {
    pub v1: f32,
    pub v2: f32,
    pub v3: f32,
    pub time: f32,
}

/// Calibrated Cartesian reading as kept by the session recorder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedReading {
    pub timestamp_ms: i64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub magnitude: f32,
}

impl RecordedReading {
    pub fn new(timestamp_ms: i64, calibrated: Vector3) -> Self {
        Self {
            timestamp_ms,
            x: calibrated.x,
            y: calibrated.y,
            z: calibrated.z,
            magnitude: calibrated.magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert!((Vector3::new(3.0, 4.0, 0.0).magnitude() - 5.0).abs() < 1e-6);
        assert_eq!(Vector3::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_recorded_reading_derives_magnitude() {
        let reading = RecordedReading::new(1000, Vector3::new(1.0, 2.0, 2.0));
        assert_eq!(reading.timestamp_ms, 1000);
        assert!((reading.magnitude - 3.0).abs() < 1e-6);
    }
}
