//! Fixed values shared across the pipeline
//!
//! Capacities and the smoothing factor are the defaults used by
//! [`crate::config::PipelineConfig`]; the CSV layout values are not
//! configurable.

/// Default exponential smoothing factor applied to each axis.
/// Small values mean heavier smoothing and slower response.
pub const DEFAULT_FILTER_ALPHA: f32 = 0.1;

/// Number of points kept per axis for live charting.
pub const CHART_WINDOW_CAPACITY: usize = 100;

/// Maximum number of readings held by the session recorder.
pub const RECORDER_CAPACITY: usize = 10_000;

/// Header line of every exported session file.
pub const CSV_HEADER: &str = "Timestamp,X,Y,Z,Magnitude";

/// File name prefix of exported sessions, followed by epoch milliseconds.
pub const EXPORT_FILE_PREFIX: &str = "accelerometer_data_";

/// File extension of exported sessions.
pub const EXPORT_FILE_EXTENSION: &str = "csv";

/// Magnitudes below this are treated as a zero vector by the polar transform.
pub const ZERO_VECTOR_EPSILON: f32 = 1e-12;
