//! Rendering module
//!
//! The simulation draws through the [`DrawSurface`] capability and never
//! talks to a graphics API directly. Two adapters ship with the crate:
//! - [`RecordingSurface`]: keeps the draw calls (tests, headless runs)
//! - [`MeshSurface`]: tessellates into GPU-ready vertex lists

pub mod mesh;
pub mod recorder;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

use std::sync::Arc;

use glam::Vec2;

use crate::image::Image;

pub use mesh::{Batch, MeshSurface};
pub use recorder::{DrawCommand, RecordingSurface};
pub use sprites::{GlowSprites, NoSprites, ResourceProvider, SpriteKey};

/// Straight-alpha RGBA, each channel 0..1
pub type Color = [f32; 4];

/// Anything the destruction effects can be drawn onto
pub trait DrawSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Open polyline through `points`
    fn draw_polyline(&mut self, points: &[Vec2], width: f32, color: Color);

    /// Sprite centered at `center`, turned `rotation` degrees counter-clockwise
    /// on screen and multiplied by `tint`
    fn draw_image(&mut self, image: &Arc<Image>, center: Vec2, rotation: f32, scale: f32, tint: Color);

    /// Full-screen color wash
    fn fill_overlay(&mut self, color: Color);
}

/// Scale the alpha channel by `alpha`
#[inline]
pub fn fade(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Colors for destruction elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const VORTEX: Color = [0.49, 0.98, 1.0, 1.0];
}
