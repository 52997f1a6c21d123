//! Plain geometric value types shared by the state, overlay, and renderer.

use serde::{Deserialize, Serialize};

/// A 2D vector or point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`.
    pub fn centered_square(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Scale the rectangle about `pivot`.
    pub fn scaled_about(&self, pivot: Vec2, factor: f32) -> Self {
        Self::new(
            pivot.x + (self.x - pivot.x) * factor,
            pivot.y + (self.y - pivot.y) * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_square() {
        let r = Rect::centered_square(Vec2::new(200.0, 400.0), 340.0);
        assert_eq!(r, Rect::new(30.0, 230.0, 340.0, 340.0));
        assert_eq!(r.center(), Vec2::new(200.0, 400.0));
    }

    #[test]
    fn test_scaled_about_pivot_keeps_pivot() {
        let pivot = Vec2::new(50.0, 50.0);
        let r = Rect::new(0.0, 0.0, 100.0, 100.0).scaled_about(pivot, 2.0);
        assert_eq!(r, Rect::new(-50.0, -50.0, 200.0, 200.0));
        assert_eq!(r.center(), pivot);
    }

    #[test]
    fn test_vec2_finite() {
        assert!(Vec2::new(1.0, -2.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f32::INFINITY).is_finite());
    }
}
