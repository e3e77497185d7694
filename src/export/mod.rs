pub mod csv;
pub mod history;
pub mod summary;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, VibroError};
use crate::sample::RecordedReading;

pub use self::history::{
    RecordedSession, clear_all, export_file_name, list_sessions, write_export,
};
pub use self::summary::SessionSummary;

/// Serialize readings to CSV bytes, header first
///
/// An empty set yields [`VibroError::NothingToExport`] rather than a
/// header-only file.
pub fn export_readings<'a, I>(readings: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a RecordedReading>,
    I::IntoIter: ExactSizeIterator,
{
    let readings = readings.into_iter();
    if readings.len() == 0 {
        return Err(VibroError::NothingToExport);
    }
    let mut out = Vec::with_capacity(32 * (readings.len() + 1));
    csv::write_readings(&mut out, readings)?;
    Ok(out)
}

/// Read an exported session file
pub fn read_export(path: &Path) -> Result<Vec<RecordedReading>> {
    let file = File::open(path)?;
    csv::read_readings(BufReader::new(file))
}
