use thiserror::Error;

#[derive(Error, Debug)]
pub enum VibroError {
    #[error("Accelerometer not available: {0}")]
    SensorUnavailable(String),

    #[error("Nothing to export: no readings recorded")]
    NothingToExport,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Session state error: {0}")]
    SessionState(String),
}

impl VibroError {
    /// True for conditions the caller reports to the user without treating
    /// them as failures.
    pub fn is_nothing_to_export(&self) -> bool {
        matches!(self, VibroError::NothingToExport)
    }
}

pub type Result<T> = std::result::Result<T, VibroError>;
