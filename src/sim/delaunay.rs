//! 2D Delaunay triangulation (Bowyer–Watson)
//!
//! Point counts here are tiny (a few dozen per shatter), so the simple
//! incremental algorithm with a linear bad-triangle scan is plenty. Math runs
//! in f64 to keep the circumcircle tests stable for near-cocircular input
//! (the four image corners always are).

use glam::{DVec2, Vec2};

/// Relative tolerance for the all-collinear check
const AREA_EPS: f64 = 1e-9;

/// Index of the vertex at infinity that closes every hull edge
const GHOST: usize = usize::MAX;

/// Twice the signed area of (a, b, c); positive when counter-clockwise
#[inline]
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Positive when `p` is strictly inside the circumcircle of CCW (a, b, c)
fn in_circle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> f64 {
    let (ad, bd, cd) = (a - p, b - p, c - p);
    ad.length_squared() * bd.perp_dot(cd) + bd.length_squared() * cd.perp_dot(ad)
        + cd.length_squared() * ad.perp_dot(bd)
}

/// Counter-clockwise vertex triple. A ghost triangle keeps [`GHOST`] in the
/// last slot; its first two vertices are a hull edge with the hull on the right.
#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
}

impl Triangle {
    /// Orders an edge plus a new point so a ghost vertex lands last
    fn from_edge(a: usize, b: usize, p: usize) -> Self {
        let v = if a == GHOST {
            [b, p, GHOST]
        } else if b == GHOST {
            [p, a, GHOST]
        } else {
            [a, b, p]
        };
        Self { v }
    }

    fn is_ghost(&self) -> bool {
        self.v[2] == GHOST
    }

    /// Whether `p` lies in the triangle's circumcircle. For a ghost triangle
    /// that is the open half-plane outside its hull edge, plus the edge's
    /// open segment.
    fn conflicts(&self, p: DVec2, pts: &[DVec2]) -> bool {
        let [a, b, c] = self.v;
        if self.is_ghost() {
            let (u, v) = (pts[a], pts[b]);
            let side = orient(u, v, p);
            side > 0.0 || (side == 0.0 && (p - u).dot(v - u) > 0.0 && (p - v).dot(u - v) > 0.0)
        } else {
            in_circle(pts[a], pts[b], pts[c], p) > 0.0
        }
    }

    fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.v[0], self.v[1]),
            (self.v[1], self.v[2]),
            (self.v[2], self.v[0]),
        ]
    }
}

/// Triangulate `points`, returning index triples into the input slice.
///
/// Duplicate points are merged (the first occurrence is used). Fewer than
/// three distinct points, or input that is entirely collinear, yields an
/// empty list. The result covers the convex hull exactly.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    // Dedupe while remembering the original index of each kept point
    let mut pts: Vec<DVec2> = Vec::with_capacity(points.len());
    let mut original: Vec<usize> = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            continue;
        }
        let p = p.as_dvec2();
        if pts.iter().any(|q| q.distance_squared(p) < 1e-12) {
            continue;
        }
        pts.push(p);
        original.push(i);
    }
    let n = pts.len();
    if n < 3 {
        return Vec::new();
    }

    let min = pts.iter().fold(DVec2::splat(f64::MAX), |m, p| m.min(*p));
    let max = pts.iter().fold(DVec2::splat(f64::MIN), |m, p| m.max(*p));
    let span = (max - min).max_element().max(1.0);

    // pts[0] != pts[1] after dedupe, so they fix a line; seed with the
    // point furthest from it
    let Some((k, area)) = (2..n)
        .map(|k| (k, orient(pts[0], pts[1], pts[k])))
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    else {
        return Vec::new();
    };
    if area.abs() <= AREA_EPS * span * span {
        return Vec::new();
    }

    let seed = if area > 0.0 { [0, 1, k] } else { [0, k, 1] };
    let mut triangles = vec![Triangle { v: seed }];
    for (a, b) in (Triangle { v: seed }).edges() {
        triangles.push(Triangle { v: [b, a, GHOST] });
    }

    let mut cavity: Vec<(usize, usize)> = Vec::new();
    for i in (0..n).filter(|i| !seed.contains(i)) {
        let p = pts[i];
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| t.conflicts(p, &pts));
        triangles = good;

        // Cavity boundary: directed edges whose reverse no other bad triangle has
        cavity.clear();
        for t in &bad {
            for (a, b) in t.edges() {
                if !bad.iter().any(|o| o.edges().contains(&(b, a))) {
                    cavity.push((a, b));
                }
            }
        }
        triangles.extend(cavity.iter().map(|&(a, b)| Triangle::from_edge(a, b, i)));
    }

    triangles
        .into_iter()
        .filter(|t| !t.is_ghost())
        .map(|t| [original[t.v[0]], original[t.v[1]], original[t.v[2]]])
        .collect()
}
