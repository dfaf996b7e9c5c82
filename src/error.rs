//! Top-level error type for the preview application.

use std::path::PathBuf;

use thiserror::Error;

use crate::camera::CameraError;
use crate::config::ConfigError;
use crate::display::DisplayError;
use crate::layout::LayoutError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),
    #[error("Failed to write config file '{}': {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
