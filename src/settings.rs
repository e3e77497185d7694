//! User settings persisted between runs.
//!
//! The pipeline only consumes the current coordinate mode; keeping it across
//! restarts is the job of this store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{CoordinateMode, SensorDelay};
use crate::error::{Result, VibroError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub coordinate_mode: CoordinateMode,
    pub sensor_delay: SensorDelay,
    pub auto_calibration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coordinate_mode: CoordinateMode::Cartesian,
            sensor_delay: SensorDelay::Ui,
            auto_calibration: true,
        }
    }
}

impl Settings {
    /// Load settings, returning defaults when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| VibroError::Config(format!("failed to parse settings: {}", e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string(self)
            .map_err(|e| VibroError::Config(format!("failed to serialize settings: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "vibrolab_settings_{}_{}.toml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_mode_survives_restart() {
        let path = temp_path("persist");
        let settings = Settings {
            coordinate_mode: CoordinateMode::Polar,
            sensor_delay: SensorDelay::Game,
            auto_calibration: false,
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.coordinate_mode, CoordinateMode::Polar);
        assert_eq!(loaded.sensor_delay, SensorDelay::Game);
        assert!(!loaded.auto_calibration);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_settings_rejected() {
        let path = temp_path("malformed");
        std::fs::write(&path, "coordinate_mode = \"spherical\"\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(VibroError::Config(_))));
        std::fs::remove_file(&path).unwrap();
    }
}
