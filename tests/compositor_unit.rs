//! Unit tests for the per-camera frame transform through the public API.
//!
//! These tests cover:
//! - Tile size invariance with zoom on and off
//! - 2x zoom magnifying the central sub-region
//! - Crosshair and border placement
//! - Behaviour with offsets that walk the crop out of the frame

mod common;

use common::{coordinate_frame, FakeCamera};
use ec_placer::acquire::acquire_views;
use ec_placer::camera::{CameraSettings, Color, Frame, FrameFormat, Resolution, VideoSource};
use ec_placer::compositor::{CameraView, INITIAL_OFFSET};
use ec_placer::geometry::Vec2;
use ec_placer::input::{Direction, Key};
use ec_placer::session::Session;

fn single_view_session(display: Resolution, raw: Frame) -> Session {
    let settings = [CameraSettings {
        device_index: 0,
        resolution: Resolution::QHD,
    }];
    let mut raw = Some(raw);
    let views = acquire_views(&settings, display, |_| {
        let (camera, _) = FakeCamera::steady("cam", raw.take().unwrap());
        Ok(Box::new(camera) as Box<dyn VideoSource>)
    })
    .unwrap();
    Session::new(views).unwrap()
}

/// Walk the selected view's offset from its initial value to `target`.
fn move_to(session: &mut Session, target: Vec2) {
    let delta = target - INITIAL_OFFSET;
    let (hx, vx) = if delta.x >= 0 {
        (Direction::Right, delta.x)
    } else {
        (Direction::Left, -delta.x)
    };
    let (hy, vy) = if delta.y >= 0 {
        (Direction::Down, delta.y)
    } else {
        (Direction::Up, -delta.y)
    };
    for _ in 0..vx {
        session.handle_key(Key::Move(hx));
    }
    for _ in 0..vy {
        session.handle_key(Key::Move(hy));
    }
}

// ==================== Size invariant ====================

#[test]
fn test_tile_size_independent_of_zoom() {
    for &(w, h) in &[(960, 1080), (640, 480), (274, 1080), (2, 2)] {
        let raw = Frame::blank(1280, 1440, FrameFormat::Bgr);
        let mut session = single_view_session(Resolution::new(w, h), raw);
        session.select_next();

        let plain = session.compose();
        session.toggle_zoom();
        let zoomed = session.compose();

        let crop = session.views()[0].crop_size();
        assert_eq!((plain.width as i32, plain.height as i32), (crop.x, crop.y));
        assert_eq!((zoomed.width as i32, zoomed.height as i32), (crop.x, crop.y));
    }
}

#[test]
fn test_tile_size_with_extreme_offsets() {
    for &target in &[Vec2::new(-5000, 0), Vec2::new(400, -700), Vec2::new(2000, 2000)] {
        let raw = Frame::filled(640, 480, FrameFormat::Bgr, Color::rgb(50, 60, 70));
        let mut session = single_view_session(Resolution::new(320, 240), raw);
        session.select_next();
        move_to(&mut session, target);
        assert_eq!(session.views()[0].offset(), target);

        for _ in 0..2 {
            let tile = session.compose();
            assert_eq!((tile.width, tile.height), (320, 240));
            session.toggle_zoom();
        }
    }
}

// ==================== Zoom ====================

#[test]
fn test_zoom_magnifies_central_region() {
    // Red encodes x % 256 and blue y % 256.
    let raw = coordinate_frame(960, 1080);
    let mut session = single_view_session(Resolution::new(960, 1080), raw.clone());
    session.select_next();
    move_to(&mut session, Vec2::ZERO);
    session.toggle_zoom();

    let view: &CameraView = &session.views()[0];
    assert_eq!(view.crop_size(), Vec2::new(960, 1080));
    let rect = view.crop_rect(raw.size());
    assert_eq!(rect.top_left, Vec2::new(240, 270));
    assert_eq!(rect.size, Vec2::new(480, 540));

    let tile = view.render(&raw, false);
    for &(x, y) in &[(0u32, 0u32), (1, 1), (100, 333), (959, 1079), (700, 900)] {
        let expected = raw.pixel(240 + x / 2, 270 + y / 2);
        assert_eq!(tile.pixel(x, y), expected, "at ({}, {})", x, y);
    }
}

#[test]
fn test_unzoomed_tile_is_plain_crop() {
    let raw = coordinate_frame(200, 100);
    let mut session = single_view_session(Resolution::new(100, 50), raw.clone());
    session.select_next();
    move_to(&mut session, Vec2::new(10, -5));

    let view = &session.views()[0];
    let tile = view.render(&raw, false);
    // center (110, 45), extent (100, 50) -> top-left (60, 20)
    assert_eq!(tile.pixel(0, 0), raw.pixel(60, 20));
    assert_eq!(tile.pixel(99, 49), raw.pixel(159, 69));
}

// ==================== Overlays ====================

#[test]
fn test_crosshair_at_tile_center() {
    let raw = Frame::blank(800, 600, FrameFormat::Bgr);
    let mut session = single_view_session(Resolution::new(300, 200), raw);
    let tile = session.compose();
    assert_eq!(tile.pixel(0, 100), Color::GREEN);
    assert_eq!(tile.pixel(299, 100), Color::GREEN);
    assert_eq!(tile.pixel(150, 0), Color::GREEN);
    assert_eq!(tile.pixel(150, 199), Color::GREEN);
    assert_eq!(tile.pixel(149, 99), Color::BLACK);
}

#[test]
fn test_border_follows_selection() {
    let raw = Frame::blank(800, 600, FrameFormat::Bgr);
    let mut session = single_view_session(Resolution::new(300, 200), raw);

    let tile = session.compose();
    assert_eq!(tile.pixel(3, 50), Color::BLACK);

    session.select_next();
    let tile = session.compose();
    for &(x, y) in &[(2, 50), (3, 50), (4, 50), (297, 50), (50, 3), (50, 197)] {
        assert_eq!(tile.pixel(x, y), Color::RED, "at ({}, {})", x, y);
    }
    assert_eq!(tile.pixel(1, 50), Color::BLACK);
    assert_eq!(tile.pixel(5, 50), Color::BLACK);
    // Border wins where it crosses the crosshair
    assert_eq!(tile.pixel(150, 3), Color::RED);
    assert_eq!(tile.pixel(3, 100), Color::RED);

    session.select_next();
    let tile = session.compose();
    assert_eq!(tile.pixel(3, 50), Color::BLACK);
}
