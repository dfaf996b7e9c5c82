//! Camera frames and video sources.
//!
//! This module provides:
//! - The [`Frame`] image type and its pixel helpers
//! - Crop, resample, drawing and concatenation in [`frame_utils`]
//! - The [`VideoSource`] trait implemented by capture backends

pub mod frame_utils;
mod source;
mod types;

pub use source::{CameraSettings, VideoSource};
pub use types::{CameraError, CameraInfo, Color, Frame, FrameFormat, Resolution};
