//! Electrical arcs
//!
//! A jagged polyline between two points that may fork into shorter, less
//! jagged child bolts. The whole tree shares one lifetime and fades out
//! together.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::tuning::ArcConfig;
use crate::{polar_to_cartesian, rand_between};

/// Child bolts are this fraction of their parent's length
pub const BRANCH_LENGTH_SCALE: f32 = 0.5;
/// Child bolts are this fraction of their parent's jitter
pub const BRANCH_JITTER_SCALE: f32 = 0.7;

/// One polyline of an arc tree
#[derive(Debug, Clone)]
pub struct ArcBolt {
    pub points: Vec<Vec2>,
    /// 0 for the root bolt
    pub depth: u32,
}

/// A root bolt plus every branch it spawned
#[derive(Debug, Clone)]
pub struct ElectricalArc {
    pub bolts: Vec<ArcBolt>,
    lifetime: f32,
    max_lifetime: f32,
}

struct PendingBolt {
    start: Vec2,
    end: Vec2,
    length: f32,
    jitter: f32,
    depth: u32,
}

impl ElectricalArc {
    /// Generate an arc tree from `start` to `end`.
    ///
    /// Branches are grown from a worklist, so depth is bounded by
    /// `config.max_depth` without recursion. `branching = false` yields a
    /// single bolt.
    pub fn generate<R: Rng + ?Sized>(
        start: Vec2,
        end: Vec2,
        config: &ArcConfig,
        branching: bool,
        rng: &mut R,
    ) -> Self {
        let segments = config.segments.max(1);
        let mut bolts = Vec::new();
        let mut pending = vec![PendingBolt {
            start,
            end,
            length: config.length,
            jitter: config.jitter,
            depth: 0,
        }];

        while let Some(bolt) = pending.pop() {
            let step = (bolt.end - bolt.start) / segments as f32;
            let mut points = Vec::with_capacity(segments as usize + 1);
            let mut current = bolt.start;
            points.push(current);

            for _ in 0..segments {
                current += step
                    + Vec2::new(
                        rand_between(rng, -bolt.jitter, bolt.jitter),
                        rand_between(rng, -bolt.jitter, bolt.jitter),
                    );
                points.push(current);

                if branching
                    && bolt.depth < config.max_depth
                    && rng.random_bool(config.branch_chance.clamp(0.0, 1.0))
                {
                    let length = bolt.length * BRANCH_LENGTH_SCALE;
                    let angle = rng.random_range(0.0..TAU);
                    pending.push(PendingBolt {
                        start: current,
                        end: current + polar_to_cartesian(length, angle),
                        length,
                        jitter: bolt.jitter * BRANCH_JITTER_SCALE,
                        depth: bolt.depth + 1,
                    });
                }
            }

            // Jitter never moves the terminal point
            if let Some(last) = points.last_mut() {
                *last = bolt.end;
            }
            bolts.push(ArcBolt {
                points,
                depth: bolt.depth,
            });
        }

        Self {
            bolts,
            lifetime: config.lifetime,
            max_lifetime: config.lifetime,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime = (self.lifetime - dt).max(0.0);
    }

    /// Remaining brightness in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    pub fn max_depth(&self) -> u32 {
        self.bolts.iter().map(|b| b.depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_root_bolt_shape() {
        let config = ArcConfig {
            branch_chance: 0.0,
            ..ArcConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let (start, end) = (Vec2::new(10.0, 10.0), Vec2::new(60.0, 30.0));
        let arc = ElectricalArc::generate(start, end, &config, true, &mut rng);
        assert_eq!(arc.bolts.len(), 1);
        let root = &arc.bolts[0];
        assert_eq!(root.points.len(), config.segments as usize + 1);
        assert_eq!(root.points[0], start);
        assert_eq!(*root.points.last().unwrap(), end);
    }

    #[test]
    fn test_branch_depth_is_bounded() {
        let config = ArcConfig {
            branch_chance: 1.0,
            max_depth: 2,
            ..ArcConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let arc = ElectricalArc::generate(Vec2::ZERO, Vec2::new(50.0, 0.0), &config, true, &mut rng);
        assert_eq!(arc.max_depth(), 2);
        // Full fan-out: 1 + 5 + 25 bolts
        assert_eq!(arc.bolts.len(), 31);
        for bolt in arc.bolts.iter().filter(|b| b.depth > 0) {
            let start = bolt.points[0];
            let end = *bolt.points.last().unwrap();
            let expected = config.length * BRANCH_LENGTH_SCALE.powi(bolt.depth as i32);
            assert!((start.distance(end) - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_branching_disabled() {
        let config = ArcConfig {
            branch_chance: 1.0,
            ..ArcConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let arc = ElectricalArc::generate(Vec2::ZERO, Vec2::ONE, &config, false, &mut rng);
        assert_eq!(arc.bolts.len(), 1);
    }

    #[test]
    fn test_arc_fades_out() {
        let config = ArcConfig::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut arc = ElectricalArc::generate(Vec2::ZERO, Vec2::X, &config, true, &mut rng);
        assert_eq!(arc.alpha(), 1.0);
        arc.update(5.0);
        assert!((arc.alpha() - 0.5).abs() < 1e-6);
        arc.update(5.0);
        assert!(!arc.is_alive());
        assert_eq!(arc.alpha(), 0.0);
    }
}
