//! Signed distance functions for procedural silhouettes
//!
//! Negative inside, positive outside. Used by [`super::silhouette`] to turn
//! analytic shapes into opacity tests.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to a simple polygon (any winding)
pub fn sd_polygon(p: Vec2, vertices: &[Vec2]) -> f32 {
    let Some(&first) = vertices.first() else {
        return f32::MAX;
    };
    let mut d = (p - first).length_squared();
    let mut sign = 1.0;

    let n = vertices.len();
    let mut j = n - 1;
    for i in 0..n {
        let e = vertices[j] - vertices[i];
        let w = p - vertices[i];
        let len2 = e.length_squared();
        let t = if len2 > 0.0 {
            (w.dot(e) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let b = w - e * t;
        d = d.min(b.length_squared());

        // Crossing-number parity, folded into the sign
        let c1 = p.y >= vertices[i].y;
        let c2 = p.y < vertices[j].y;
        let c3 = e.x * w.y > e.y * w.x;
        if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
            sign = -sign;
        }
        j = i;
    }
    sign * d.sqrt()
}
