pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod output;
pub mod processing;
pub mod sample;
pub mod sensor;
pub mod session;
pub mod settings;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{CoordinateMode, PipelineConfig, SensorDelay};
pub use error::{Result, VibroError};
pub use processing::{ProcessedSample, SignalPipeline};
pub use sample::{DisplaySample, RawSample, RecordedReading, Vector3};
pub use session::{SensorSession, SessionEvent};
pub use settings::Settings;
