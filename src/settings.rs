//! Host settings
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) works.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ScreenSize;
use crate::consts::*;

/// Smallest usable screen. The gap range needs `height > GAP_RANGE_MARGIN`,
/// and the HUD needs a few columns.
pub const MIN_SCREEN_WIDTH: i32 = 16;
pub const MIN_SCREEN_HEIGHT: i32 = GAP_RANGE_MARGIN + 3;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "screen {width}x{height} is too small (minimum {}x{})",
        MIN_SCREEN_WIDTH,
        MIN_SCREEN_HEIGHT
    )]
    InvalidScreen { width: i32, height: i32 },

    #[error("target_fps must be between 1 and 240, got {0}")]
    InvalidFrameRate(u32),
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in cells
    pub screen_width: i32,
    /// Playfield height in cells
    pub screen_height: i32,
    /// Gate RNG seed; a fresh one is picked per process when absent
    pub seed: Option<u64>,
    /// Frame pacing target
    pub target_fps: u32,
    /// Write log output here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            seed: None,
            target_fps: 60,
            log_file: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width < MIN_SCREEN_WIDTH || self.screen_height < MIN_SCREEN_HEIGHT {
            return Err(SettingsError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !(1..=240).contains(&self.target_fps) {
            return Err(SettingsError::InvalidFrameRate(self.target_fps));
        }
        Ok(())
    }

    pub fn screen(&self) -> ScreenSize {
        ScreenSize::new(self.screen_width, self.screen_height)
    }

    /// Seconds per frame at the target rate
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.screen(), ScreenSize::new(80, 48));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "target_fps": 30 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.target_fps, 30);
        assert_eq!(settings.screen_width, 80);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_rejects_tiny_screen() {
        let err = Settings::from_json(r#"{ "screen_height": 20 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidScreen { width: 80, height: 20 }
        ));
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        let err = Settings::from_json(r#"{ "target_fps": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidFrameRate(0)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ screen_width: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("/nonexistent/gate-runner/settings.json");
        let err = Settings::load(path).unwrap_err();
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = Settings {
            seed: Some(7),
            log_file: Some(PathBuf::from("gate-runner.log")),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
