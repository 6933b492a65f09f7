//! Fragment generation
//!
//! Shatters a silhouette into triangular, pixel-masked pieces:
//! 1. Scatter sample points (corners, center, interior, jittered outer ring)
//! 2. Delaunay-triangulate them
//! 3. Crop each triangle's bounding box and mask out everything but the
//!    triangle itself
//!
//! Every call produces a different pattern; that's the point.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;

use super::collision::point_in_triangle;
use super::delaunay::triangulate;
use super::silhouette::Silhouette;
use crate::image::Image;
use crate::{polar_to_cartesian, rand_between};

/// Angular jitter applied to each outer-ring point (radians)
pub const OUTER_ANGLE_JITTER: f32 = 0.1;
/// Outer ring radius range as a fraction of [`max_radius`]
pub const OUTER_RADIUS_RANGE: (f32, f32) = (0.9, 1.1);

/// Integer pixel rectangle inside the source silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 * 0.5,
            self.y as f32 + self.height as f32 * 0.5,
        )
    }
}

/// One triangular piece of a shattered silhouette
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Cropped sprite; pixels outside the triangle are transparent
    pub image: Arc<Image>,
    /// Triangle corners in sprite-local coordinates
    pub triangle: [Vec2; 3],
    /// Where the sprite was cut from
    pub bbox: PixelRect,
    /// Sprite center relative to the silhouette center
    pub offset: Vec2,
}

/// Half the larger silhouette dimension; scales outward debris speed
#[inline]
pub fn max_radius(width: u32, height: u32) -> f32 {
    width.max(height) as f32 / 2.0
}

/// Build the point set a shatter is triangulated from
pub fn sample_points<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    num_outer: usize,
    num_inner: usize,
    rng: &mut R,
) -> Vec<Vec2> {
    let (w, h) = (width as f32, height as f32);
    let center = Vec2::new(w, h) * 0.5;
    let radius = max_radius(width, height);

    let mut points = Vec::with_capacity(5 + num_inner + num_outer);
    points.extend([Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(0.0, h), Vec2::new(w, h)]);
    points.push(center);

    for _ in 0..num_inner {
        points.push(Vec2::new(rand_between(rng, 0.0, w), rand_between(rng, 0.0, h)));
    }

    if num_outer > 0 {
        let step = TAU / num_outer as f32;
        for i in 0..num_outer {
            let angle = step * i as f32 + rand_between(rng, -OUTER_ANGLE_JITTER, OUTER_ANGLE_JITTER);
            let dist = radius * rand_between(rng, OUTER_RADIUS_RANGE.0, OUTER_RADIUS_RANGE.1);
            points.push(center + polar_to_cartesian(dist, angle));
        }
    }
    points
}

/// Shatter `shape` with a freshly sampled point set
pub fn shatter<S, R>(shape: &S, num_outer: usize, num_inner: usize, rng: &mut R) -> Vec<Fragment>
where
    S: Silhouette + ?Sized,
    R: Rng + ?Sized,
{
    let points = sample_points(shape.width(), shape.height(), num_outer, num_inner, rng);
    let fragments = fragments_from_points(shape, &points);
    if fragments.is_empty() {
        log::warn!(
            "Shatter of {}x{} silhouette produced no fragments ({} sample points)",
            shape.width(),
            shape.height(),
            points.len()
        );
    }
    fragments
}

/// Triangulate the given points and cut one fragment per usable triangle
pub fn fragments_from_points<S>(shape: &S, points: &[Vec2]) -> Vec<Fragment>
where
    S: Silhouette + ?Sized,
{
    let (w, h) = (shape.width(), shape.height());
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let center = shape.center();

    triangulate(points)
        .into_iter()
        .filter_map(|[a, b, c]| {
            let tri = [points[a], points[b], points[c]];

            let lo = tri[0].min(tri[1]).min(tri[2]).floor();
            let hi = tri[0].max(tri[1]).max(tri[2]).ceil();
            let min_x = lo.x.clamp(0.0, w as f32) as u32;
            let min_y = lo.y.clamp(0.0, h as f32) as u32;
            let max_x = hi.x.clamp(0.0, w as f32) as u32;
            let max_y = hi.y.clamp(0.0, h as f32) as u32;

            let bbox = PixelRect {
                x: min_x,
                y: min_y,
                width: max_x.saturating_sub(min_x),
                height: max_y.saturating_sub(min_y),
            };
            if bbox.width < 1 || bbox.height < 1 {
                return None;
            }

            let origin = Vec2::new(min_x as f32, min_y as f32);
            let mut image = Image::new(bbox.width, bbox.height);
            for py in 0..bbox.height {
                for px in 0..bbox.width {
                    let (sx, sy) = (min_x + px, min_y + py);
                    let p = Vec2::new(sx as f32 + 0.5, sy as f32 + 0.5);
                    if point_in_triangle(p, &tri) {
                        image.set(px, py, shape.sample(sx, sy));
                    }
                }
            }

            Some(Fragment {
                image: Arc::new(image),
                triangle: tri.map(|v| v - origin),
                offset: bbox.center() - center,
                bbox,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rgba;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sample_point_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pts = sample_points(100, 60, 8, 10, &mut rng);
        assert_eq!(pts.len(), 4 + 1 + 10 + 8);
        assert_eq!(pts[4], Vec2::new(50.0, 30.0));
        for p in &pts[5..15] {
            assert!(p.x >= 0.0 && p.x <= 100.0 && p.y >= 0.0 && p.y <= 60.0);
        }
        for p in &pts[15..] {
            let r = p.distance(pts[4]);
            assert!(r >= 50.0 * 0.9 - 1e-3 && r <= 50.0 * 1.1 + 1e-3);
        }
    }

    #[test]
    fn test_square_scenario_fragment_count() {
        let square = Image::filled(100, 100, Rgba::WHITE);
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let fragments = shatter(&square, 8, 10, &mut rng);
            assert!(fragments.len() >= 15, "seed {seed}: only {} fragments", fragments.len());
            for f in &fragments {
                assert!(f.bbox.width >= 1 && f.bbox.height >= 1);
                assert_eq!(f.image.width(), f.bbox.width);
                assert!(f.bbox.x + f.bbox.width <= 100 && f.bbox.y + f.bbox.height <= 100);
            }
        }
    }

    #[test]
    fn test_fragments_cover_opaque_region() {
        let disc = crate::sim::silhouette::SdfSilhouette::new(
            64,
            48,
            |p| crate::sim::sdf::sd_circle(p, Vec2::new(32.0, 24.0), 22.0),
            Rgba::WHITE,
        );
        let mut rng = Pcg32::seed_from_u64(42);
        let fragments = shatter(&disc, 12, 15, &mut rng);
        assert!(!fragments.is_empty());

        for y in 0..48 {
            for x in 0..64 {
                if !disc.is_opaque(x, y) {
                    continue;
                }
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let covered = fragments.iter().any(|f| {
                    let min = Vec2::new(f.bbox.x as f32, f.bbox.y as f32);
                    let max = min + Vec2::new(f.bbox.width as f32, f.bbox.height as f32);
                    p.cmpge(min).all() && p.cmple(max).all()
                });
                assert!(covered, "opaque pixel ({x}, {y}) not covered");
            }
        }
    }

    #[test]
    fn test_masks_partition_pixels() {
        // Every opaque pixel ends up in at least one fragment mask
        let square = Image::filled(40, 40, Rgba::new(9, 9, 9, 255));
        let mut rng = Pcg32::seed_from_u64(3);
        let fragments = shatter(&square, 6, 6, &mut rng);
        let mut hits = vec![0u32; 40 * 40];
        for f in &fragments {
            for py in 0..f.bbox.height {
                for px in 0..f.bbox.width {
                    if f.image.get(px, py).a > 0 {
                        hits[((f.bbox.y + py) * 40 + f.bbox.x + px) as usize] += 1;
                    }
                }
            }
        }
        assert!(hits.iter().all(|&n| n >= 1));
        // Only pixels sitting on shared edges may be counted twice
        let doubled = hits.iter().filter(|&&n| n > 1).count();
        assert!(doubled < 40 * 40 / 4);
    }

    #[test]
    fn test_offsets_are_relative_to_center() {
        let square = Image::filled(10, 10, Rgba::WHITE);
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
        ];
        let fragments = fragments_from_points(&square, &pts);
        assert_eq!(fragments.len(), 2);
        for f in &fragments {
            // Both halves span the whole square, so their bbox center is the image center
            assert_eq!(f.offset, Vec2::ZERO);
        }
    }

    #[test]
    fn test_degenerate_silhouette_yields_nothing() {
        let empty = Image::new(0, 0);
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(shatter(&empty, 8, 10, &mut rng).is_empty());
        // All four corners and the center collapse onto one point
        let pts = [Vec2::ZERO; 5];
        assert!(fragments_from_points(&Image::filled(1, 1, Rgba::WHITE), &pts).is_empty());
    }
}
