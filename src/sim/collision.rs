//! Overlap tests for fragments and debris
//!
//! Triangle containment drives fragment masking; box overlap drives the
//! "has everything left the screen" check at the end of a cinematic.

use glam::Vec2;

use crate::rotate_screen;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored at the origin (e.g. a viewport)
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Bounds of a `size` rectangle centered at `center`, rotated by `degrees`
    pub fn rotated_rect(center: Vec2, size: Vec2, degrees: f32) -> Self {
        let half = size * 0.5;
        let ex = rotate_screen(Vec2::new(half.x, 0.0), degrees).abs();
        let ey = rotate_screen(Vec2::new(0.0, half.y), degrees).abs();
        Self::from_center(center, ex + ey)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only touch along an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Twice the signed area of triangle (a, b, c)
#[inline]
pub fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Point-in-triangle test, inclusive of edges (either winding)
pub fn point_in_triangle(p: Vec2, tri: &[Vec2; 3]) -> bool {
    const EPS: f32 = 1e-4;
    let d1 = cross(tri[0], tri[1], p);
    let d2 = cross(tri[1], tri[2], p);
    let d3 = cross(tri[2], tri[0], p);
    let has_neg = d1 < -EPS || d2 < -EPS || d3 < -EPS;
    let has_pos = d1 > EPS || d2 > EPS || d3 > EPS;
    !(has_neg && has_pos)
}
