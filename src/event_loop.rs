//! The preview loop.
//!
//! Single-threaded and synchronous: every iteration reads all cameras,
//! shows the composite, then blocks on the window's key poll. The poll
//! timeout doubles as the refresh throttle (20 ms gives roughly 50 Hz).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::display::{DisplayError, PreviewWindow};
use crate::input::Key;
use crate::session::{Control, Session};

/// Set by the Ctrl+C handler; checked once per iteration.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The quit key was pressed
    QuitKey,
    /// The stop flag was raised (Ctrl+C)
    Interrupted,
}

/// The flag raised by [`setup_ctrlc_handler`].
pub fn ctrlc_flag() -> &'static AtomicBool {
    &CTRLC_RECEIVED
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
        eprintln!("\nReceived Ctrl+C, shutting down...");
    })
}

/// Run until the quit key is pressed or `stop` is raised.
///
/// Teardown (closing the window, releasing cameras) is left to the caller
/// so it happens on every exit path, including errors.
pub fn run(
    session: &mut Session,
    window: &mut dyn PreviewWindow,
    poll_interval: Duration,
    stop: &AtomicBool,
) -> Result<ExitReason, DisplayError> {
    let mut frames: u64 = 0;

    let reason = loop {
        if stop.load(Ordering::SeqCst) {
            break ExitReason::Interrupted;
        }

        let composite = session.compose();
        window.show(&composite)?;
        frames += 1;

        let Some(code) = window.poll_key(poll_interval)? else {
            continue;
        };
        match Key::from_code(code) {
            Some(key) => {
                if session.handle_key(key) == Control::Quit {
                    break ExitReason::QuitKey;
                }
            }
            None => log::trace!("Ignoring key code {}", code),
        }
    };

    log::info!("Preview stopped after {} frames ({:?})", frames, reason);
    Ok(reason)
}
