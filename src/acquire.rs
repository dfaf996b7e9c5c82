//! Camera acquisition at startup.

use crate::camera::{CameraError, CameraSettings, Resolution, VideoSource};
use crate::compositor::CameraView;
use crate::geometry::Vec2;
use crate::layout::{crop_sizes, LayoutError};

/// Open every requested camera and build one view per usable camera.
///
/// A camera is usable when it opens and delivers a first frame. Cameras
/// that fail either step are logged and skipped. Crop sizes are derived from
/// `display` and each camera's first frame.
///
/// # Errors
/// * `LayoutError::NoCameras` - none of the requested cameras is usable
pub fn acquire_views<F>(
    requested: &[CameraSettings],
    display: Resolution,
    mut open: F,
) -> Result<Vec<CameraView>, LayoutError>
where
    F: FnMut(&CameraSettings) -> Result<Box<dyn VideoSource>, CameraError>,
{
    let mut usable = Vec::new();

    for settings in requested {
        let mut source = match open(settings) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Skipping camera {}: {}", settings.device_index, e);
                continue;
            }
        };

        match source.read_frame() {
            Ok(first) => {
                log::info!(
                    "{} delivers {}x{} (requested {})",
                    source.label(),
                    first.width,
                    first.height,
                    settings.resolution
                );
                usable.push((source, first.size(), first.format));
            }
            Err(e) => {
                log::warn!(
                    "Skipping camera {}: no initial frame: {}",
                    settings.device_index,
                    e
                );
                if let Err(e) = source.release() {
                    log::warn!("{}", e);
                }
            }
        }
    }

    if usable.is_empty() {
        return Err(LayoutError::NoCameras);
    }

    let raw_sizes: Vec<Vec2> = usable.iter().map(|(_, size, _)| *size).collect();
    let sizes = crop_sizes(display, &raw_sizes)?;

    Ok(usable
        .into_iter()
        .zip(sizes)
        .map(|((source, _, format), crop)| {
            log::info!("{} tile size {}", source.label(), crop);
            CameraView::new(source, crop, format)
        })
        .collect())
}
