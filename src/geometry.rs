//! Integer 2D geometry used for offsets, centers, sizes and crop rectangles.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Sub};

/// A 2D integer vector.
///
/// Used for points (crop corners, centers), sizes (crop extents) and
/// displacements (offsets, movement steps) alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };
    pub const UP: Vec2 = Vec2 { x: 0, y: -1 };
    pub const DOWN: Vec2 = Vec2 { x: 0, y: 1 };
    pub const LEFT: Vec2 = Vec2 { x: -1, y: 0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Round both components down to an even number.
    pub fn floor_even(self) -> Vec2 {
        Vec2::new((self.x >> 1) << 1, (self.y >> 1) << 1)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scalar division, truncating towards zero.
impl Div<i32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: i32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Half of `v`, rounded to the nearest integer with ties going to the even
/// neighbour (so `7 / 2` becomes 4 and `5 / 2` becomes 2).
pub fn half_round_even(v: i32) -> i32 {
    let q = v.div_euclid(2);
    if v.rem_euclid(2) == 0 || q % 2 == 0 {
        q
    } else {
        q + 1
    }
}

/// An axis-aligned rectangle `[top_left, top_left + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    /// Exclusive bottom-right corner.
    pub fn bottom_right(&self) -> Vec2 {
        self.top_left + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Intersect with `[0, 0]..bounds`. Returns `None` when nothing overlaps.
    pub fn clamp_to(&self, bounds: Vec2) -> Option<Rect> {
        let tl = self.top_left.max(Vec2::ZERO);
        let br = self.bottom_right().min(bounds);
        let clamped = Rect::new(tl, br - tl);
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }
}
