//! Platform capture and display backends.

#[cfg(feature = "opencv")]
mod cv;

#[cfg(feature = "opencv")]
pub use cv::{list_devices, HighGuiWindow, OpenCvCamera};
