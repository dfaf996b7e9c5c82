//! Configuration file handling for ec-placer.
//!
//! Loads configuration from `<config dir>/ec-placer/config.toml` or a custom
//! path. Every field is optional; missing ones fall back to the defaults
//! below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::camera::{CameraSettings, Resolution};

/// Configuration file structure for ec-placer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub cameras: CamerasConfig,
    pub window: WindowConfig,
}

/// Size of the screen the composite is laid out for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: Resolution::FULL_HD.width,
            height: Resolution::FULL_HD.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CamerasConfig {
    /// Device indices, shown left to right in this order
    pub devices: Vec<i32>,
    pub capture_width: u32,
    pub capture_height: u32,
}

impl Default for CamerasConfig {
    fn default() -> Self {
        Self {
            devices: vec![1, 2],
            capture_width: Resolution::QHD.width,
            capture_height: Resolution::QHD.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub poll_interval_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ecPlacer".to_string(),
            poll_interval_ms: 20,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Reject values the preview cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(
                "display width and height must be greater than 0".to_string(),
            ));
        }
        if self.cameras.devices.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one camera device is required".to_string(),
            ));
        }
        if self.cameras.capture_width == 0 || self.cameras.capture_height == 0 {
            return Err(ConfigError::Invalid(
                "capture width and height must be greater than 0".to_string(),
            ));
        }
        if self.window.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn display_resolution(&self) -> Resolution {
        Resolution::new(self.display.width, self.display.height)
    }

    pub fn capture_resolution(&self) -> Resolution {
        Resolution::new(self.cameras.capture_width, self.cameras.capture_height)
    }

    /// One `CameraSettings` per configured device, in display order.
    pub fn camera_settings(&self) -> Vec<CameraSettings> {
        let resolution = self.capture_resolution();
        self.cameras
            .devices
            .iter()
            .map(|&device_index| CameraSettings {
                device_index,
                resolution,
            })
            .collect()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.window.poll_interval_ms)
    }

    /// Render as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ec-placer").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ec-placer/config.toml")
        })
}

/// Commented template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ec-placer configuration

[display]
# Screen the composite is laid out for; each camera gets width / N columns
width = 1920
height = 1080

[cameras]
# Device indices, shown left to right
devices = [1, 2]
# Resolution requested from each camera (it may deliver less)
capture_width = 2560
capture_height = 1440

[window]
title = "ecPlacer"
# Key poll timeout; also limits the refresh rate
poll_interval_ms = 20
"#;
