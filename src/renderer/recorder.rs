//! Draw-call recorder
//!
//! Keeps every call made against it so headless runs and tests can inspect
//! what a frame would have drawn.

use std::sync::Arc;

use glam::Vec2;

use super::{Color, DrawSurface};
use crate::image::Image;

/// One recorded draw call
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: Color,
    },
    Image {
        image: Arc<Image>,
        center: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    },
    Overlay {
        color: Color,
    },
}

/// Per-kind totals for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub circles: usize,
    pub polylines: usize,
    pub images: usize,
    pub overlays: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn stats(&self) -> DrawStats {
        let mut stats = DrawStats::default();
        for command in &self.commands {
            match command {
                DrawCommand::Circle { .. } => stats.circles += 1,
                DrawCommand::Polyline { .. } => stats.polylines += 1,
                DrawCommand::Image { .. } => stats.images += 1,
                DrawCommand::Overlay { .. } => stats.overlays += 1,
            }
        }
        stats
    }

    /// Every image drawn this frame, in draw order
    pub fn images(&self) -> impl Iterator<Item = &Arc<Image>> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { image, .. } => Some(image),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn draw_image(&mut self, image: &Arc<Image>, center: Vec2, rotation: f32, scale: f32, tint: Color) {
        self.commands.push(DrawCommand::Image {
            image: Arc::clone(image),
            center,
            rotation,
            scale,
            tint,
        });
    }

    fn fill_overlay(&mut self, color: Color) {
        self.commands.push(DrawCommand::Overlay { color });
    }
}
