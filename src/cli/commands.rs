//! Subcommand handlers for list-cameras and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera::CameraInfo;
use crate::config::{Config, DEFAULT_CONFIG};
use crate::error::AppError;

/// Print probed cameras to stdout.
pub fn print_cameras(devices: &[CameraInfo]) {
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your cameras are connected and not in use by another program.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --cameras <index,index,...> to choose which ones to preview.");
    }
}

/// Handle config subcommand actions.
///
/// `config` is the effective configuration (file plus command-line
/// overrides); `path` is the config file location.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    path: &Path,
) -> Result<(), AppError> {
    match action {
        ConfigAction::Show => {
            if path.exists() {
                println!("# Config file: {} (exists)", path.display());
            } else {
                println!("# Config file: {} (not found, using defaults)", path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init => {
            init_config_file(path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the default config template to `path`, refusing to overwrite.
pub fn init_config_file(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        return Err(AppError::ConfigExists(path.to_path_buf()));
    }

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG).map_err(|e| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
