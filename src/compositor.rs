//! Per-camera frame transform: crop, zoom and overlay.
//!
//! Each [`CameraView`] owns one video source and turns its raw frames into
//! fixed-size preview tiles:
//! 1. Crop a `crop_size` rectangle centered on the raw frame center plus the
//!    view's offset (half that size when zoomed)
//! 2. When zoomed, resample the crop back up to `crop_size`
//! 3. Draw a green crosshair through the tile center
//! 4. Draw a red border when the view is selected

use crate::camera::frame_utils::{crop_clamped, draw_hline, draw_rect, draw_vline, resize_area};
use crate::camera::{CameraError, Color, Frame, FrameFormat, VideoSource};
use crate::geometry::{half_round_even, Rect, Vec2};

/// Offset every view starts with.
pub const INITIAL_OFFSET: Vec2 = Vec2::new(30, 30);

/// Linear magnification applied when zoom is on.
pub const ZOOM_FACTOR: i32 = 2;

const CROSSHAIR_COLOR: Color = Color::GREEN;
const BORDER_COLOR: Color = Color::RED;
const BORDER_INSET: i32 = 3;
const BORDER_THICKNESS: i32 = 3;

/// One live camera and its preview state.
pub struct CameraView {
    source: Box<dyn VideoSource>,
    crop_size: Vec2,
    offset: Vec2,
    zoom: bool,
    format: FrameFormat,
    /// Set while reads keep failing, so only the first failure is logged
    failing: bool,
}

impl std::fmt::Debug for CameraView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraView")
            .field("source", &self.source.label())
            .field("crop_size", &self.crop_size)
            .field("offset", &self.offset)
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

impl CameraView {
    /// Wrap a source whose tiles will be `crop_size` large.
    ///
    /// `format` is the channel order of the source's frames; placeholders
    /// for failed reads are produced in the same order.
    pub fn new(source: Box<dyn VideoSource>, crop_size: Vec2, format: FrameFormat) -> Self {
        Self {
            source,
            crop_size,
            offset: INITIAL_OFFSET,
            zoom: false,
            format,
            failing: false,
        }
    }

    pub fn crop_size(&self) -> Vec2 {
        self.crop_size
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> bool {
        self.zoom
    }

    pub fn label(&self) -> String {
        self.source.label()
    }

    pub(crate) fn nudge(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub(crate) fn toggle_zoom(&mut self) {
        self.zoom = !self.zoom;
    }

    /// The region of a `raw_size` frame that ends up in the tile.
    ///
    /// Not clamped: with a large enough offset it extends past the frame.
    pub fn crop_rect(&self, raw_size: Vec2) -> Rect {
        let divisor = if self.zoom { ZOOM_FACTOR } else { 1 };
        let center = Vec2::new(
            half_round_even(raw_size.x + 2 * self.offset.x),
            half_round_even(raw_size.y + 2 * self.offset.y),
        );
        let extent = self.crop_size / divisor;
        let top_left = Vec2::new(
            truncated_half_below(center.x, extent.x),
            truncated_half_below(center.y, extent.y),
        );
        Rect::new(top_left, extent)
    }

    /// Read one frame and turn it into a tile.
    ///
    /// Returns `None` when the read fails; the caller decides what fills the
    /// slot (see [`CameraView::placeholder`]).
    pub fn produce_display_frame(&mut self, selected: bool) -> Option<Frame> {
        match self.source.read_frame() {
            Ok(raw) => {
                if self.failing {
                    log::info!("{} recovered", self.source.label());
                    self.failing = false;
                }
                Some(self.render(&raw, selected))
            }
            Err(e) => {
                if !self.failing {
                    log::warn!("{}: {}", self.source.label(), e);
                    self.failing = true;
                }
                None
            }
        }
    }

    /// Apply crop, zoom and overlays to an already captured frame.
    pub fn render(&self, raw: &Frame, selected: bool) -> Frame {
        let rect = self.crop_rect(raw.size());
        let cropped = crop_clamped(raw, rect);

        let mut tile = if self.zoom {
            resize_area(&cropped, self.crop_size.x as u32, self.crop_size.y as u32)
        } else {
            cropped
        };

        self.draw_overlay(&mut tile, selected);
        tile
    }

    /// A black tile with the usual overlays, shown when a read fails.
    pub fn placeholder(&self, selected: bool) -> Frame {
        let mut tile = Frame::blank(
            self.crop_size.x as u32,
            self.crop_size.y as u32,
            self.format,
        );
        self.draw_overlay(&mut tile, selected);
        tile
    }

    // Crosshair first so the border stays on top.
    fn draw_overlay(&self, tile: &mut Frame, selected: bool) {
        let center = self.crop_size / 2;
        draw_hline(tile, center.y, CROSSHAIR_COLOR);
        draw_vline(tile, center.x, CROSSHAIR_COLOR);

        if selected {
            let inset = Vec2::new(BORDER_INSET, BORDER_INSET);
            draw_rect(
                tile,
                inset,
                self.crop_size - inset,
                BORDER_THICKNESS,
                BORDER_COLOR,
            );
        }
    }

    /// Release the capture device.
    pub fn release(&mut self) -> Result<(), CameraError> {
        self.source.release()
    }
}

/// `trunc(center - extent / 2)` without losing the half when `extent` is odd.
fn truncated_half_below(center: i32, extent: i32) -> i32 {
    (center as f64 - extent as f64 / 2.0).trunc() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StillSource {
        frame: Option<Frame>,
    }

    impl VideoSource for StillSource {
        fn read_frame(&mut self) -> Result<Frame, CameraError> {
            self.frame
                .clone()
                .ok_or_else(|| CameraError::ReadFailed("end of stream".to_string()))
        }

        fn release(&mut self) -> Result<(), CameraError> {
            Ok(())
        }

        fn label(&self) -> String {
            "still".to_string()
        }
    }

    /// Frame whose red channel encodes `x % 256` and blue `y % 256`.
    fn coordinate_frame(width: u32, height: u32) -> Frame {
        let mut frame = Frame::blank(width, height, FrameFormat::Rgb);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                frame.put_pixel(x, y, Color::rgb((x % 256) as u8, 0, (y % 256) as u8));
            }
        }
        frame
    }

    fn view(crop: Vec2, frame: Option<Frame>) -> CameraView {
        CameraView::new(Box::new(StillSource { frame }), crop, FrameFormat::Rgb)
    }

    #[test]
    fn test_new_view_defaults() {
        let v = view(Vec2::new(10, 10), None);
        assert_eq!(v.offset(), Vec2::new(30, 30));
        assert!(!v.zoom());
    }

    #[test]
    fn test_crop_rect_centered_with_initial_offset() {
        let v = view(Vec2::new(960, 1080), None);
        let rect = v.crop_rect(Vec2::new(2560, 1440));
        // center = (1280 + 30, 720 + 30)
        assert_eq!(rect.top_left, Vec2::new(1310 - 480, 750 - 540));
        assert_eq!(rect.size, Vec2::new(960, 1080));
    }

    #[test]
    fn test_crop_rect_zoom_halves_extent() {
        let mut v = view(Vec2::new(960, 1080), None);
        v.nudge(Vec2::new(-30, -30));
        v.toggle_zoom();
        let rect = v.crop_rect(Vec2::new(960, 1080));
        assert_eq!(rect.top_left, Vec2::new(240, 270));
        assert_eq!(rect.size, Vec2::new(480, 540));
        assert_eq!(rect.bottom_right(), Vec2::new(720, 810));
    }

    #[test]
    fn test_crop_rect_odd_raw_rounds_half_even() {
        let mut v = view(Vec2::new(4, 4), None);
        v.nudge(Vec2::new(-30, -30));
        // 641 / 2 = 320.5 rounds to 320
        let rect = v.crop_rect(Vec2::new(641, 643));
        assert_eq!(rect.top_left, Vec2::new(318, 320));
    }

    #[test]
    fn test_crop_rect_odd_extent_truncates() {
        let mut v = view(Vec2::new(1078, 6), None);
        v.nudge(Vec2::new(-30, -30));
        v.toggle_zoom();
        // extent 539, center 600: trunc(600 - 269.5) = 330
        let rect = v.crop_rect(Vec2::new(1200, 6));
        assert_eq!(rect.top_left.x, 330);
        assert_eq!(rect.size.x, 539);
    }

    #[test]
    fn test_render_size_matches_crop_with_and_without_zoom() {
        let raw = coordinate_frame(64, 48);
        let mut v = view(Vec2::new(32, 24), None);
        let plain = v.render(&raw, false);
        assert_eq!((plain.width, plain.height), (32, 24));

        v.toggle_zoom();
        let zoomed = v.render(&raw, true);
        assert_eq!((zoomed.width, zoomed.height), (32, 24));
    }

    #[test]
    fn test_render_zoom_magnifies_center() {
        let raw = coordinate_frame(64, 48);
        let mut v = view(Vec2::new(64, 48), None);
        v.nudge(Vec2::new(-30, -30));
        v.toggle_zoom();
        let tile = v.render(&raw, false);

        // Central (32, 24) region starting at (16, 12), each pixel doubled.
        for &(x, y) in &[(0u32, 0u32), (5, 3), (63, 47), (40, 10)] {
            if x as i32 == 32 || y as i32 == 24 {
                continue;
            }
            let px = tile.pixel(x, y);
            assert_eq!(px.r as u32, 16 + x / 2, "x at ({}, {})", x, y);
            assert_eq!(px.b as u32, 12 + y / 2, "y at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_render_draws_crosshair() {
        let raw = Frame::blank(40, 30, FrameFormat::Rgb);
        let v = view(Vec2::new(20, 10), None);
        let tile = v.render(&raw, false);
        for x in 0..20 {
            assert_eq!(tile.pixel(x, 5), Color::GREEN);
        }
        for y in 0..10 {
            assert_eq!(tile.pixel(10, y), Color::GREEN);
        }
        assert_eq!(tile.pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn test_render_border_only_when_selected() {
        let raw = Frame::blank(100, 100, FrameFormat::Rgb);
        let v = view(Vec2::new(40, 40), None);

        let unselected = v.render(&raw, false);
        assert_eq!(unselected.pixel(3, 10), Color::BLACK);

        let selected = v.render(&raw, true);
        assert_eq!(selected.pixel(3, 10), Color::RED);
        assert_eq!(selected.pixel(37, 10), Color::RED);
        assert_eq!(selected.pixel(10, 2), Color::RED);
        assert_eq!(selected.pixel(10, 38), Color::RED);
        assert_eq!(selected.pixel(1, 10), Color::BLACK);
        // Border drawn over the crosshair
        assert_eq!(selected.pixel(20, 3), Color::RED);
        assert_eq!(selected.pixel(20, 10), Color::GREEN);
    }

    #[test]
    fn test_render_far_offset_is_black_but_sized() {
        let raw = Frame::filled(40, 40, FrameFormat::Rgb, Color::rgb(7, 7, 7));
        let mut v = view(Vec2::new(20, 20), None);
        v.nudge(Vec2::new(1000, 1000));
        let tile = v.render(&raw, false);
        assert_eq!((tile.width, tile.height), (20, 20));
        assert_eq!(tile.pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn test_produce_display_frame_read_failure() {
        let mut v = view(Vec2::new(8, 8), None);
        assert!(v.produce_display_frame(false).is_none());
        assert!(v.produce_display_frame(true).is_none());
    }

    #[test]
    fn test_produce_display_frame_success() {
        let mut v = view(Vec2::new(8, 6), Some(coordinate_frame(16, 12)));
        let tile = v.produce_display_frame(false).unwrap();
        assert_eq!((tile.width, tile.height), (8, 6));
    }

    #[test]
    fn test_placeholder_has_overlays() {
        let v = view(Vec2::new(20, 20), None);
        let tile = v.placeholder(true);
        assert_eq!((tile.width, tile.height), (20, 20));
        assert_eq!(tile.pixel(15, 10), Color::GREEN);
        assert_eq!(tile.pixel(3, 15), Color::RED);
        assert_eq!(tile.pixel(12, 15), Color::BLACK);
    }
}
