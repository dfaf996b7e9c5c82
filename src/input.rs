//! Keyboard input decoding.
//!
//! The preview window reports raw key codes whose values for arrow keys
//! differ per platform backend. This module folds them into [`Key`]s:
//! - Escape: quit
//! - `s`: select the next camera (cycling through "none")
//! - `z`: toggle zoom on the selected camera
//! - Arrow keys: move the selected camera's crop

use crate::geometry::Vec2;

/// Direction of a one-pixel crop move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in image coordinates (y grows downwards).
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::UP,
            Direction::Down => Vec2::DOWN,
            Direction::Left => Vec2::LEFT,
            Direction::Right => Vec2::RIGHT,
        }
    }
}

/// A recognised key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    SelectNext,
    ToggleZoom,
    Move(Direction),
}

const ESCAPE: i32 = 27;

// (up, down, left, right) as reported by each highgui backend
const ARROW_CODES: [[i32; 4]; 4] = [
    // Cocoa waitKey
    [0, 1, 2, 3],
    // GTK / Qt on X11 and Wayland
    [65362, 65364, 65361, 65363],
    // Win32
    [2490368, 2621440, 2424832, 2555904],
    // Cocoa waitKeyEx
    [63232, 63233, 63234, 63235],
];

impl Key {
    /// Decode a key code returned by the window's key poll.
    ///
    /// Returns `None` for "no key" (negative codes) and for keys without a
    /// binding.
    pub fn from_code(code: i32) -> Option<Key> {
        if code < 0 {
            return None;
        }

        for table in ARROW_CODES.iter() {
            if let Some(pos) = table.iter().position(|&c| c == code) {
                return Some(Key::Move(Direction::ALL[pos]));
            }
        }

        // Some backends set modifier bits above the low byte.
        match code & 0xFF {
            ESCAPE => Some(Key::Quit),
            c if c == b's' as i32 => Some(Key::SelectNext),
            c if c == b'z' as i32 => Some(Key::ToggleZoom),
            _ => None,
        }
    }
}
