#![allow(dead_code)]

use std::path::PathBuf;

use vibrolab::RawSample;

/// `count` identical samples spaced `step_ms` apart starting at `start_ms`
pub fn constant_samples(
    value: (f32, f32, f32),
    count: usize,
    start_ms: i64,
    step_ms: i64,
) -> Vec<RawSample> {
    (0..count)
        .map(|i| RawSample::new(value.0, value.1, value.2, start_ms + i as i64 * step_ms))
        .collect()
}

/// Samples whose x axis ramps linearly from 0
pub fn ramp_samples(count: usize, slope: f32, start_ms: i64) -> Vec<RawSample> {
    (0..count)
        .map(|i| RawSample::new(i as f32 * slope, 0.0, 0.0, start_ms + i as i64 * 10))
        .collect()
}

/// Fresh, empty scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vibrolab-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
