//! Configuration for the vibrolab sensor pipeline.
//!
//! All sections have sensible defaults and can be overridden from a TOML
//! file; missing keys fall back to the defaults:
//!
//! ```toml
//! [filter]
//! alpha = 0.2
//!
//! [recorder]
//! export_dir = "exports"
//!
//! [sensor]
//! delay = "game"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{CHART_WINDOW_CAPACITY, DEFAULT_FILTER_ALPHA, RECORDER_CAPACITY};
use crate::error::{Result, VibroError};

/// Coordinate system used for displayed values
///
/// Only the display branch depends on the mode; recorded readings and the
/// peak magnitude are always Cartesian.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    /// x, y, z
    #[default]
    Cartesian,
    /// radius, angle (degrees), z
    Polar,
}

impl CoordinateMode {
    pub fn toggled(self) -> Self {
        match self {
            CoordinateMode::Cartesian => CoordinateMode::Polar,
            CoordinateMode::Polar => CoordinateMode::Cartesian,
        }
    }

    /// Labels for the three displayed axes
    pub fn axis_labels(self) -> [&'static str; 3] {
        match self {
            CoordinateMode::Cartesian => ["X", "Y", "Z"],
            CoordinateMode::Polar => ["R", "θ", "Z"],
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateMode::Cartesian => write!(f, "cartesian"),
            CoordinateMode::Polar => write!(f, "polar"),
        }
    }
}

impl FromStr for CoordinateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cartesian" => Ok(CoordinateMode::Cartesian),
            "polar" => Ok(CoordinateMode::Polar),
            other => Err(format!("invalid coordinate mode: {}", other)),
        }
    }
}

/// Sensor sampling tier
///
/// The pipeline never interprets the cadence; sources use it to pace
/// delivery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SensorDelay {
    /// As fast as the hardware delivers
    Fastest,
    /// ~50 Hz
    Game,
    /// ~15 Hz
    #[default]
    Ui,
    /// ~5 Hz
    Normal,
}

impl SensorDelay {
    /// Nominal interval between samples
    pub fn interval(self) -> Duration {
        match self {
            SensorDelay::Fastest => Duration::ZERO,
            SensorDelay::Game => Duration::from_millis(20),
            SensorDelay::Ui => Duration::from_millis(66),
            SensorDelay::Normal => Duration::from_millis(200),
        }
    }
}

impl fmt::Display for SensorDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorDelay::Fastest => "fastest",
            SensorDelay::Game => "game",
            SensorDelay::Ui => "ui",
            SensorDelay::Normal => "normal",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SensorDelay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(SensorDelay::Fastest),
            "game" => Ok(SensorDelay::Game),
            "ui" => Ok(SensorDelay::Ui),
            "normal" => Ok(SensorDelay::Normal),
            other => Err(format!("invalid sensor delay: {}", other)),
        }
    }
}

/// System-wide pipeline configuration
///
/// # Example
/// ```
/// use vibrolab::config::PipelineConfig;
///
/// let mut config = PipelineConfig::default();
/// config.filter.alpha = 0.25;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Noise filter configuration
    pub filter: FilterConfig,
    /// Live chart configuration
    pub chart: ChartConfig,
    /// Session recorder and export configuration
    pub recorder: RecorderConfig,
    /// Sensor source configuration
    pub sensor: SensorConfig,
}

/// Exponential smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Weight of the newest sample, in (0, 1]
    pub alpha: f32,
}

/// Chart window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Points kept per axis
    pub capacity: usize,
}

/// Recorder and export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Maximum readings kept before the oldest is evicted
    pub capacity: usize,
    /// Directory exported session files are written to
    pub export_dir: PathBuf,
}

/// Sensor source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Sampling tier requested from the source
    pub delay: SensorDelay,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_FILTER_ALPHA,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            capacity: CHART_WINDOW_CAPACITY,
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            capacity: RECORDER_CAPACITY,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)
            .map_err(|e| VibroError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let alpha = self.filter.alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(VibroError::Config(format!(
                "filter alpha must be in (0, 1], got {}",
                alpha
            )));
        }
        if self.chart.capacity == 0 {
            return Err(VibroError::Config("chart capacity must be positive".into()));
        }
        if self.recorder.capacity == 0 {
            return Err(VibroError::Config(
                "recorder capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}
