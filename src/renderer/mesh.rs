//! Tessellating draw surface
//!
//! Turns draw calls into flat-colored triangles plus textured sprite quads,
//! ready for upload to whatever GPU backend the host runs. `batches` keeps
//! the order the calls were made in; draw them front to back of that list.

use std::ops::Range;
use std::sync::Arc;

use glam::Vec2;

use super::shapes;
use super::vertex::{self, SpriteVertex, Vertex};
use super::{Color, DrawSurface};
use crate::image::Image;

/// Circles below this radius use the minimum segment count
const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 48;

/// A textured quad and the sprite it samples
#[derive(Debug, Clone)]
pub struct SpriteQuad {
    pub image: Arc<Image>,
    pub vertices: [SpriteVertex; 6],
}

/// One run of geometry sharing a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// Range into `vertices`
    Flat(Range<usize>),
    /// Index into `sprites`
    Sprite(usize),
}

/// One frame of geometry
#[derive(Debug, Clone)]
pub struct MeshSurface {
    pub viewport: Vec2,
    /// Flat-colored triangles
    pub vertices: Vec<Vertex>,
    /// Sprite quads
    pub sprites: Vec<SpriteQuad>,
    /// Draw order across both lists
    pub batches: Vec<Batch>,
}

impl MeshSurface {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
            sprites: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.sprites.clear();
        self.batches.clear();
    }

    /// Flat-colored geometry as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3 + self.sprites.len() * 2
    }

    /// Append flat triangles, merging with a flat batch right before them
    fn push_flat(&mut self, vertices: impl IntoIterator<Item = Vertex>) {
        let start = self.vertices.len();
        self.vertices.extend(vertices);
        let end = self.vertices.len();
        if end == start {
            return;
        }
        match self.batches.last_mut() {
            Some(Batch::Flat(range)) if range.end == start => range.end = end,
            _ => self.batches.push(Batch::Flat(start..end)),
        }
    }
}

/// Segment count scaled with radius so small sparks stay cheap
fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

impl DrawSurface for MeshSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.push_flat(shapes::circle(center, radius, color, circle_segments(radius)));
    }

    fn draw_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if color[3] <= 0.0 {
            return;
        }
        self.push_flat(shapes::polyline(points, width, color));
    }

    fn draw_image(&mut self, image: &Arc<Image>, center: Vec2, rotation: f32, scale: f32, tint: Color) {
        if image.is_empty() || tint[3] <= 0.0 || scale <= 0.0 {
            return;
        }
        self.batches.push(Batch::Sprite(self.sprites.len()));
        self.sprites.push(SpriteQuad {
            image: Arc::clone(image),
            vertices: shapes::sprite_quad(center, image.size() * scale, rotation, tint),
        });
    }

    fn fill_overlay(&mut self, color: Color) {
        if color[3] <= 0.0 {
            return;
        }
        self.push_flat(shapes::rect(Vec2::ZERO, self.viewport, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::image::Rgba;
    use crate::sim::state::{ExplosionSequencer, Stage};
    use crate::tuning::DestructionConfig;

    #[test]
    fn test_tessellates_each_call() {
        let mut mesh = MeshSurface::new(Vec2::new(100.0, 80.0));
        mesh.fill_circle(Vec2::ZERO, 2.0, [1.0; 4]);
        assert_eq!(mesh.vertices.len(), MIN_CIRCLE_SEGMENTS as usize * 3);

        mesh.clear();
        mesh.fill_overlay([1.0, 1.0, 1.0, 0.5]);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.vertices[5].position, [100.0, 80.0]);
        assert_eq!(mesh.vertex_bytes().len(), 6 * std::mem::size_of::<Vertex>());

        let sprite = Arc::new(Image::filled(4, 4, Rgba::WHITE));
        mesh.draw_image(&sprite, Vec2::new(50.0, 40.0), 0.0, 2.0, [1.0; 4]);
        assert_eq!(mesh.sprites.len(), 1);
        assert_eq!(mesh.sprites[0].vertices[0].position, [46.0, 36.0]);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_skips_invisible_calls() {
        let mut mesh = MeshSurface::new(Vec2::ONE);
        mesh.fill_circle(Vec2::ZERO, 0.0, [1.0; 4]);
        mesh.fill_overlay([1.0, 1.0, 1.0, 0.0]);
        mesh.draw_image(&Arc::new(Image::new(0, 0)), Vec2::ZERO, 0.0, 1.0, [1.0; 4]);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.sprites.is_empty());
        assert!(mesh.batches.is_empty());
    }

    #[test]
    fn test_batches_keep_call_order() {
        let mut mesh = MeshSurface::new(Vec2::new(100.0, 80.0));
        let hull = Arc::new(Image::filled(8, 8, Rgba::WHITE));
        mesh.draw_image(&hull, Vec2::new(50.0, 40.0), 0.0, 1.0, [1.0; 4]);
        mesh.fill_overlay([1.0, 1.0, 1.0, 0.5]);
        mesh.draw_image(&hull, Vec2::new(20.0, 20.0), 0.0, 1.0, [1.0; 4]);
        assert_eq!(mesh.batches, vec![Batch::Sprite(0), Batch::Flat(0..6), Batch::Sprite(1)]);

        // Consecutive flat calls share one batch
        mesh.fill_circle(Vec2::ZERO, 2.0, [1.0; 4]);
        mesh.draw_polyline(&[Vec2::ZERO, Vec2::ONE], 1.0, [1.0; 4]);
        let end = mesh.vertices.len();
        assert_eq!(mesh.batches.last(), Some(&Batch::Flat(6..end)));
        assert_eq!(mesh.batches.len(), 4);
    }

    #[test]
    fn test_flash_overlay_follows_the_intact_object() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), Vec2::new(1000.0, 800.0)).with_seed(31);
        seq.start(Image::filled(24, 24, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        while seq.stage() != Stage::Flash {
            seq.update(FRAME_DT);
        }
        let mut mesh = MeshSurface::new(seq.viewport());
        seq.draw(&mut mesh);
        assert_eq!(mesh.batches.first(), Some(&Batch::Sprite(0)));
        let overlay_start = mesh.vertices.len() - 6;
        assert!(matches!(mesh.batches.last(), Some(Batch::Flat(r)) if r.end == mesh.vertices.len() && r.start <= overlay_start));
    }
}
