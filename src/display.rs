//! Preview window abstraction.

use std::time::Duration;

use crate::camera::Frame;

/// Errors raised by the preview window backend.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to create window '{title}': {message}")]
    CreateFailed { title: String, message: String },
    #[error("Failed to show frame: {0}")]
    ShowFailed(String),
    #[error("Failed to poll keyboard: {0}")]
    PollFailed(String),
    #[error("Failed to close window: {0}")]
    CloseFailed(String),
}

/// A single named window that shows frames and reports key presses.
pub trait PreviewWindow {
    /// Replace the window contents with `frame`.
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Wait up to `timeout` for a key press.
    ///
    /// Returns the raw key code, or `None` if no key was pressed.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<i32>, DisplayError>;

    /// Destroy the window.
    fn close(&mut self) -> Result<(), DisplayError>;
}
