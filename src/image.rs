//! RGBA rasters
//!
//! Source silhouettes and fragment sprites are plain straight-alpha RGBA8
//! buffers. Pixels are `Pod` so a renderer can upload them untouched.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::rotate_screen;
use crate::sim::silhouette::Silhouette;

/// Alpha at or above which a pixel counts as part of the silhouette
pub const OPACITY_THRESHOLD: u8 = 1;

/// One straight-alpha pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// An owned RGBA raster, row-major, origin top-left
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Image where every pixel is `color`
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Rasterize any silhouette into an owned image
    pub fn from_silhouette(shape: &dyn Silhouette) -> Self {
        let (width, height) = (shape.width(), shape.height());
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, shape.sample(x, y));
            }
        }
        image
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as floats
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at (x, y); transparent outside the raster
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        if x < self.width && y < self.height {
            self.pixels[self.index(x, y)]
        } else {
            Rgba::TRANSPARENT
        }
    }

    /// Write a pixel; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels with non-zero alpha
    pub fn opaque_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a >= OPACITY_THRESHOLD).count()
    }

    /// Copy of this image rotated by `degrees` (counter-clockwise on screen).
    ///
    /// The canvas grows to the rotated bounding box and the content stays
    /// centered, so the image center maps to the output center.
    pub fn rotated(&self, degrees: f32) -> Image {
        if self.is_empty() || degrees.rem_euclid(360.0) == 0.0 {
            return self.clone();
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Shave float noise so 90° turns don't gain a stray pixel
        let out_w = ((w * cos.abs() + h * sin.abs()) - 1e-3).ceil().max(1.0) as u32;
        let out_h = ((w * sin.abs() + h * cos.abs()) - 1e-3).ceil().max(1.0) as u32;

        let src_center = self.size() * 0.5;
        let dst_center = Vec2::new(out_w as f32, out_h as f32) * 0.5;
        let mut out = Image::new(out_w, out_h);

        for y in 0..out_h {
            for x in 0..out_w {
                let q = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
                let p = rotate_screen(q, -degrees) + src_center;
                if p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h {
                    out.set(x, y, self.get(p.x as u32, p.y as u32));
                }
            }
        }
        out
    }
}
