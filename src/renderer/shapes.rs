//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::Color;
use super::vertex::{SpriteVertex, Vertex};
use crate::rotate_screen;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick open polyline (one quad per segment)
pub fn polyline(points: &[Vec2], width: f32, color: Color) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        // Direction from p1 to p2
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        // Perpendicular for width
        let perp = dir.perp() * half;

        // Quad corners
        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: Color) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate a textured quad of `size` centered at `center`, turned
/// `rotation` degrees counter-clockwise on screen
pub fn sprite_quad(center: Vec2, size: Vec2, rotation: f32, tint: Color) -> [SpriteVertex; 6] {
    let half = size * 0.5;
    let corner = |x: f32, y: f32, u: f32, v: f32| {
        let p = center + rotate_screen(Vec2::new(x, y), rotation);
        SpriteVertex::new(p.x, p.y, u, v, tint)
    };
    let tl = corner(-half.x, -half.y, 0.0, 0.0);
    let tr = corner(half.x, -half.y, 1.0, 0.0);
    let bl = corner(-half.x, half.y, 0.0, 1.0);
    let br = corner(half.x, half.y, 1.0, 1.0);
    [tl, tr, bl, bl, tr, br]
}
