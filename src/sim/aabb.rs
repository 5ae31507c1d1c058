//! Axis-aligned bounding boxes
//!
//! Screen space: x grows to the right, y grows downward, so `top` is the
//! smaller y value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// All four components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Aabb::new(10.0, 590.0, 40.0, 50.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 50.0);
        assert_eq!(b.top(), 590.0);
        assert_eq!(b.bottom(), 640.0);
        assert_eq!(b.size(), Vec2::new(40.0, 50.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Aabb::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Aabb::new(f32::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!Aabb::new(0.0, f32::INFINITY, 1.0, 1.0).is_finite());
    }
}
