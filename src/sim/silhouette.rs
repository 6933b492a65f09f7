//! Silhouette capability
//!
//! Anything with a size and an opacity test can be shattered: bitmaps,
//! polygons, or signed distance fields.

use glam::Vec2;

use super::sdf::sd_polygon;
use crate::image::{Image, OPACITY_THRESHOLD, Rgba};

/// A 2D raster region eligible for shattering
pub trait Silhouette {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Whether pixel (x, y) belongs to the shape
    fn is_opaque(&self, x: u32, y: u32) -> bool;

    /// Color of pixel (x, y); shapes without texture read as white
    fn sample(&self, x: u32, y: u32) -> Rgba {
        if self.is_opaque(x, y) {
            Rgba::WHITE
        } else {
            Rgba::TRANSPARENT
        }
    }

    /// Center of the raster in local pixel space
    fn center(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32) * 0.5
    }
}

impl Silhouette for Image {
    fn width(&self) -> u32 {
        Image::width(self)
    }

    fn height(&self) -> u32 {
        Image::height(self)
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.get(x, y).a >= OPACITY_THRESHOLD
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        self.get(x, y)
    }
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// A filled polygon in local pixel coordinates
#[derive(Debug, Clone)]
pub struct PolygonSilhouette {
    pub width: u32,
    pub height: u32,
    pub vertices: Vec<Vec2>,
    pub fill: Rgba,
}

impl PolygonSilhouette {
    pub fn new(width: u32, height: u32, vertices: Vec<Vec2>, fill: Rgba) -> Self {
        Self {
            width,
            height,
            vertices,
            fill,
        }
    }
}

impl Silhouette for PolygonSilhouette {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && sd_polygon(pixel_center(x, y), &self.vertices) <= 0.0
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        if self.is_opaque(x, y) {
            self.fill
        } else {
            Rgba::TRANSPARENT
        }
    }
}

/// A shape described by a signed distance function over pixel centers
pub struct SdfSilhouette<F>
where
    F: Fn(Vec2) -> f32,
{
    pub width: u32,
    pub height: u32,
    pub sdf: F,
    pub fill: Rgba,
}

impl<F> SdfSilhouette<F>
where
    F: Fn(Vec2) -> f32,
{
    pub fn new(width: u32, height: u32, sdf: F, fill: Rgba) -> Self {
        Self {
            width,
            height,
            sdf,
            fill,
        }
    }
}

impl<F> Silhouette for SdfSilhouette<F>
where
    F: Fn(Vec2) -> f32,
{
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && (self.sdf)(pixel_center(x, y)) <= 0.0
    }

    fn sample(&self, x: u32, y: u32) -> Rgba {
        if self.is_opaque(x, y) {
            self.fill
        } else {
            Rgba::TRANSPARENT
        }
    }
}
