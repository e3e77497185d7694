//! Exported session files on disk.
//!
//! Exports are named `accelerometer_data_<epoch_ms>.csv` and live in a
//! single directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::constants::{EXPORT_FILE_EXTENSION, EXPORT_FILE_PREFIX};
use crate::error::Result;

/// File name for an export taken at `timestamp_ms`
pub fn export_file_name(timestamp_ms: i64) -> String {
    format!(
        "{}{}.{}",
        EXPORT_FILE_PREFIX, timestamp_ms, EXPORT_FILE_EXTENSION
    )
}

/// Timestamp encoded in an export file name, if it follows the convention
pub fn parse_export_timestamp(file_name: &str) -> Option<i64> {
    file_name
        .strip_prefix(EXPORT_FILE_PREFIX)?
        .strip_suffix(EXPORT_FILE_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

/// Write an export into `dir`, creating it if needed
pub fn write_export(dir: &Path, timestamp_ms: i64, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(timestamp_ms));
    fs::write(&path, contents)?;
    log::info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

/// Metadata for one exported session file
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSession {
    pub file_name: String,
    pub path: PathBuf,
    pub timestamp_ms: i64,
    pub size_bytes: u64,
}

impl RecordedSession {
    /// Read metadata for an export file
    ///
    /// The timestamp comes from the file name and falls back to the file's
    /// modification time.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let timestamp_ms = match parse_export_timestamp(&file_name) {
            Some(ts) => ts,
            None => {
                let modified: DateTime<Utc> = metadata.modified()?.into();
                modified.timestamp_millis()
            }
        };

        Ok(Self {
            file_name,
            path: path.to_path_buf(),
            timestamp_ms,
            size_bytes: metadata.len(),
        })
    }

    /// Size as `B`, `KB` or `MB`
    pub fn formatted_size(&self) -> String {
        format_size(self.size_bytes)
    }

    /// Local date of the export, e.g. `Mar 04, 2025 14:30`
    pub fn formatted_date(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp_ms).single() {
            Some(date) => date.format("%b %d, %Y %H:%M").to_string(),
            None => "Unknown".to_string(),
        }
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{}B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.2} MB", b / MB)
    }
}

fn is_export_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    path.is_file()
        && name.starts_with(EXPORT_FILE_PREFIX)
        && path.extension().and_then(|e| e.to_str()) == Some(EXPORT_FILE_EXTENSION)
}

/// List exported sessions in `dir`, newest first
///
/// A missing directory has no sessions.
pub fn list_sessions(dir: &Path) -> Result<Vec<RecordedSession>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_export_file(&path) {
            sessions.push(RecordedSession::from_path(&path)?);
        }
    }
    sessions.sort_by(|a, b| {
        b.timestamp_ms
            .cmp(&a.timestamp_ms)
            .then_with(|| b.file_name.cmp(&a.file_name))
    });
    Ok(sessions)
}

/// Delete every exported session in `dir`, returning how many were removed
///
/// Only files following the export naming convention are touched.
pub fn clear_all(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_export_file(&path) {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    log::info!("Cleared {} exported sessions from {}", removed, dir.display());
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_round_trip() {
        let name = export_file_name(1_700_000_000_123);
        assert_eq!(name, "accelerometer_data_1700000000123.csv");
        assert_eq!(parse_export_timestamp(&name), Some(1_700_000_000_123));
    }

    #[test]
    fn test_parse_rejects_other_names() {
        assert_eq!(parse_export_timestamp("sensor_data_20240101.csv"), None);
        assert_eq!(parse_export_timestamp("accelerometer_data_abc.csv"), None);
        assert_eq!(parse_export_timestamp("accelerometer_data_123.txt"), None);
    }

    #[test]
    fn test_clear_all_keeps_unrelated_csv_files() {
        let dir = std::env::temp_dir().join(format!("vibrolab_clear_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        write_export(&dir, 1_000, b"Timestamp,X,Y,Z,Magnitude\n").unwrap();
        write_export(&dir, 2_000, b"Timestamp,X,Y,Z,Magnitude\n").unwrap();
        fs::write(dir.join("replay_input.csv"), "keep me").unwrap();

        assert_eq!(clear_all(&dir).unwrap(), 2);
        assert!(list_sessions(&dir).unwrap().is_empty());
        assert!(dir.join("replay_input.csv").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
