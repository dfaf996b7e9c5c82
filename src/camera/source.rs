//! Video source abstraction.

use super::types::{CameraError, Frame, Resolution};

/// Settings used when opening a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: i32,
    /// Requested capture resolution (actual may be lower)
    pub resolution: Resolution,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::QHD,
        }
    }
}

/// A live source of 3-channel frames.
///
/// Reads are blocking and synchronous. The source is owned by exactly one
/// camera view and released once at shutdown.
pub trait VideoSource {
    /// Read the next frame.
    ///
    /// # Errors
    /// * `CameraError::ReadFailed` - end of stream or device error
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Release the underlying device. Further reads fail.
    fn release(&mut self) -> Result<(), CameraError>;

    /// Human-readable label for log messages.
    fn label(&self) -> String;
}
