//! Geometry and randomness helpers shared by the whole sim

use glam::Vec2;
use rand::Rng;

/// Axis-aligned bounding box in world coordinates.
///
/// Always derived on demand from an entity's position and image extent,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rect of `size` centered on `pos`
    pub fn centered_on(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x - size.x / 2.0,
            top: pos.y - size.y / 2.0,
            right: pos.x + size.x / 2.0,
            bottom: pos.y + size.y / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Grow the rect outward by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Separating-axis overlap test for two axis-aligned rects.
///
/// Touching edges count as an intersection.
pub fn intersect_two_rects(a: &Rect, b: &Rect) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}

/// Inclusive uniform random integer in `[min, max]`
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `Vec2::ZERO` when the points coincide rather than propagating NaN.
pub fn direction_vector(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
