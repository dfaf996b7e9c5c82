//! Preview session state: the camera views and which one is selected.

use crate::camera::frame_utils::hconcat;
use crate::camera::{Frame, FrameFormat};
use crate::compositor::CameraView;
use crate::geometry::Vec2;
use crate::input::Key;
use crate::layout::LayoutError;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns all camera views and the selection.
///
/// The selection is a single index in `0..=N`, where `N` (the number of
/// views) means nothing is selected. Only the selected view's offset and
/// zoom can be changed.
#[derive(Debug)]
pub struct Session {
    views: Vec<CameraView>,
    selected: usize,
}

impl Session {
    /// Start a session with nothing selected.
    ///
    /// # Errors
    /// * `LayoutError::NoCameras` - `views` is empty
    pub fn new(views: Vec<CameraView>) -> Result<Self, LayoutError> {
        if views.is_empty() {
            return Err(LayoutError::NoCameras);
        }
        let selected = views.len();
        Ok(Self { views, selected })
    }

    pub fn views(&self) -> &[CameraView] {
        &self.views
    }

    /// Index of the selected view, if any.
    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.views.len()).then_some(self.selected)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected() == Some(index)
    }

    /// Advance the selection: 0, 1, .., N-1, none, 0, ..
    pub fn select_next(&mut self) {
        self.selected = if self.selected < self.views.len() {
            self.selected + 1
        } else {
            0
        };
        match self.selected() {
            Some(i) => log::debug!("Selected {}", self.views[i].label()),
            None => log::debug!("Selection cleared"),
        }
    }

    /// Flip zoom on the selected view. No-op when nothing is selected.
    pub fn toggle_zoom(&mut self) {
        if let Some(view) = self.selected_view_mut() {
            view.toggle_zoom();
            log::debug!("{} zoom {}", view.label(), view.zoom());
        }
    }

    /// Shift the selected view's crop. No-op when nothing is selected.
    pub fn move_selected(&mut self, delta: Vec2) {
        if let Some(view) = self.selected_view_mut() {
            view.nudge(delta);
            log::debug!("{} offset {}", view.label(), view.offset());
        }
    }

    fn selected_view_mut(&mut self) -> Option<&mut CameraView> {
        self.views.get_mut(self.selected)
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key) -> Control {
        match key {
            Key::Quit => return Control::Quit,
            Key::SelectNext => self.select_next(),
            Key::ToggleZoom => self.toggle_zoom(),
            Key::Move(direction) => self.move_selected(direction.delta()),
        }
        Control::Continue
    }

    /// Read every camera in order and place the tiles side by side.
    ///
    /// A camera whose read fails contributes a black placeholder tile, so
    /// the composite keeps its width.
    pub fn compose(&mut self) -> Frame {
        let selected = self.selected();
        let tiles: Vec<Frame> = self
            .views
            .iter_mut()
            .enumerate()
            .map(|(i, view)| {
                let is_selected = selected == Some(i);
                view.produce_display_frame(is_selected)
                    .unwrap_or_else(|| view.placeholder(is_selected))
            })
            .collect();

        hconcat(&tiles).unwrap_or_else(|| Frame::blank(0, 0, FrameFormat::Bgr))
    }

    /// Release every capture device. Consumes the session so each device is
    /// released exactly once.
    pub fn shutdown(mut self) {
        for view in self.views.iter_mut() {
            match view.release() {
                Ok(()) => log::info!("Released {}", view.label()),
                Err(e) => log::warn!("{}: {}", view.label(), e),
            }
        }
    }
}
