//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::Color;

/// Flat-shaded 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Textured vertex for sprite quads
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub tint: Color,
}

impl SpriteVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, tint: Color) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            tint,
        }
    }
}

/// Raw bytes for a vertex buffer upload
pub fn as_bytes<V: Pod>(vertices: &[V]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
