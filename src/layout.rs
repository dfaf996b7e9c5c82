//! Setup-time tile sizing.
//!
//! The display is split into equal-width columns, one per camera. Each
//! camera's crop size is its column, limited to what the camera delivers,
//! rounded down to even numbers so zoom can halve it exactly.

use thiserror::Error;

use crate::camera::Resolution;
use crate::geometry::Vec2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no camera available")]
    NoCameras,
}

/// Crop size for one of `camera_count` cameras whose frames are `raw_size`.
///
/// # Errors
/// * `LayoutError::NoCameras` - `camera_count` is zero
pub fn crop_size_for(
    display: Resolution,
    camera_count: usize,
    raw_size: Vec2,
) -> Result<Vec2, LayoutError> {
    if camera_count == 0 {
        return Err(LayoutError::NoCameras);
    }
    let column = Vec2::new(
        (display.width as usize / camera_count) as i32,
        display.height as i32,
    );
    Ok(column.min(raw_size).max(Vec2::ZERO).floor_even())
}

/// Crop sizes for every camera, given each camera's first-frame size.
pub fn crop_sizes(display: Resolution, raw_sizes: &[Vec2]) -> Result<Vec<Vec2>, LayoutError> {
    raw_sizes
        .iter()
        .map(|&raw| crop_size_for(display, raw_sizes.len(), raw))
        .collect()
}
