//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::camera::Resolution;
use crate::config::Config;

/// Side-by-side live camera preview for aligning camera placement
#[derive(Parser, Debug)]
#[command(name = "ec-placer")]
#[command(version, about = "Live multi-camera preview for camera placement", long_about = None)]
#[command(after_help = "KEYS (while running):
    s        Select next camera (cycles through none)
    z        Toggle 2x zoom on the selected camera
    arrows   Move the selected camera's crop by one pixel
    Esc      Quit")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Display width the composite is laid out for
    #[arg(long)]
    pub width: Option<u32>,

    /// Display height the composite is laid out for
    #[arg(long)]
    pub height: Option<u32>,

    /// Camera device indices, left to right (e.g. 1,2)
    #[arg(long, value_delimiter = ',')]
    pub cameras: Option<Vec<i32>>,

    /// Resolution requested from each camera (WIDTHxHEIGHT)
    #[arg(long)]
    pub capture: Option<Resolution>,

    /// Preview window title
    #[arg(long)]
    pub title: Option<String>,

    /// Key poll timeout in milliseconds
    #[arg(long = "poll-ms")]
    pub poll_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe device indices and list the cameras that open
    ListCameras {
        /// Number of device indices to probe, starting at 0
        #[arg(long, default_value = "10")]
        probe: i32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Layer command-line values over a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.display.width = width;
        }
        if let Some(height) = self.height {
            config.display.height = height;
        }
        if let Some(cameras) = &self.cameras {
            config.cameras.devices = cameras.clone();
        }
        if let Some(capture) = self.capture {
            config.cameras.capture_width = capture.width;
            config.cameras.capture_height = capture.height;
        }
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        if let Some(poll_ms) = self.poll_ms {
            config.window.poll_interval_ms = poll_ms;
        }
    }
}
