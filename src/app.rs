//! Startup, preview loop and teardown wired together.

use std::sync::atomic::AtomicBool;

use crate::acquire::acquire_views;
use crate::camera::{CameraError, CameraSettings, VideoSource};
use crate::config::Config;
use crate::display::{DisplayError, PreviewWindow};
use crate::error::AppError;
use crate::event_loop::{self, ExitReason};
use crate::session::Session;

/// Acquire cameras, open the window, run the preview and tear down.
///
/// The window is only created once at least one camera is usable. After
/// the loop ends, for any reason, the window is closed and then every
/// camera is released.
pub fn run_preview<O, W, C>(
    config: &Config,
    open_camera: O,
    create_window: C,
    stop: &AtomicBool,
) -> Result<ExitReason, AppError>
where
    O: FnMut(&CameraSettings) -> Result<Box<dyn VideoSource>, CameraError>,
    W: PreviewWindow,
    C: FnOnce(&str) -> Result<W, DisplayError>,
{
    config.validate()?;

    let views = acquire_views(
        &config.camera_settings(),
        config.display_resolution(),
        open_camera,
    )?;
    let mut session = Session::new(views)?;
    log::info!(
        "Previewing {} camera(s) on a {} display",
        session.views().len(),
        config.display_resolution()
    );

    let mut window = match create_window(&config.window.title) {
        Ok(window) => window,
        Err(e) => {
            session.shutdown();
            return Err(e.into());
        }
    };

    let result = event_loop::run(&mut session, &mut window, config.poll_interval(), stop);

    if let Err(e) = window.close() {
        log::warn!("{}", e);
    }
    session.shutdown();

    Ok(result?)
}
