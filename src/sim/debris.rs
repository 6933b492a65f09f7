//! Simulated debris pieces
//!
//! One `Debris` type covers every shatter in the game; a small
//! [`DebrisProfile`] decides whether a piece collapses into the black hole or
//! flies off and fades.
//!
//! Phases only move forward:
//! - Floating → Attracting → Done (collapsing)
//! - Floating → Done (exploding)

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::attractor::{displace, orbit_floor};
use super::collision::Aabb;
use super::fragment::Fragment;
use crate::tuning::{DebrisMode, DestructionConfig};
use crate::{polar_to_cartesian, rand_between, rotate_screen};

/// Lifecycle phase of a debris piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisPhase {
    /// Ballistic flight
    Floating,
    /// Spiralling into the attractor
    Attracting,
    /// Finished; ready for removal
    Done,
}

/// Behavior knobs shared by every piece of one shatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisProfile {
    pub mode: DebrisMode,
    pub attraction_speed: f32,
    pub tangential_multiplier: f32,
    /// Alpha ramps down inside this distance of the attractor
    pub fade_distance: f32,
    /// Captured inside 1.2x this distance
    pub capture_radius: f32,
    /// Exploding pieces fade over their last N frames
    pub fade_frames: f32,
}

impl DebrisProfile {
    pub fn from_config(config: &DestructionConfig) -> Self {
        Self {
            mode: config.mode,
            attraction_speed: config.attraction_speed,
            tangential_multiplier: config.tangential_multiplier,
            fade_distance: config.fade_distance,
            capture_radius: config.capture_radius,
            fade_frames: config.fade_frames,
        }
    }

    /// Distance at which an attracting piece counts as swallowed.
    ///
    /// Never below the orbit floor for this step size, otherwise strongly
    /// swirling pieces could circle forever just outside the capture ring.
    pub fn capture_distance(&self, swirl_strength: f32, dt: f32) -> f32 {
        let radial = self.attraction_speed * dt;
        let tangential = radial * self.tangential_multiplier * swirl_strength;
        (self.capture_radius * 1.2).max(orbit_floor(radial, tangential) * 1.1)
    }
}

/// A simulated fragment
#[derive(Debug, Clone)]
pub struct Debris {
    pub fragment: Fragment,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, counter-clockwise on screen
    pub rotation: f32,
    /// Degrees per frame
    pub angular_vel: f32,
    pub swirl_strength: f32,
    pub attractor: Vec2,
    pub profile: DebrisProfile,
    /// 0 = invisible, 255 = opaque
    pub alpha: u8,
    lifetime: f32,
    initial_lifetime: f32,
    phase: DebrisPhase,
}

impl Debris {
    /// Piece with explicit kinematics
    pub fn new(
        fragment: Fragment,
        pos: Vec2,
        vel: Vec2,
        angular_vel: f32,
        lifetime: f32,
        profile: DebrisProfile,
    ) -> Self {
        let lifetime = lifetime.max(0.0);
        Self {
            fragment,
            pos,
            vel,
            rotation: 0.0,
            angular_vel,
            swirl_strength: 1.0,
            attractor: Vec2::ZERO,
            profile,
            alpha: 255,
            lifetime,
            initial_lifetime: lifetime,
            phase: DebrisPhase::Floating,
        }
    }

    /// Launch a fragment outward from a shattered object.
    ///
    /// `center` and `rotation` describe the object at the moment it broke;
    /// `max_radius` is half its larger dimension. Pieces farther from the
    /// center are thrown faster.
    pub fn launch<R: Rng + ?Sized>(
        fragment: Fragment,
        center: Vec2,
        rotation: f32,
        max_radius: f32,
        attractor: Vec2,
        config: &DestructionConfig,
        rng: &mut R,
    ) -> Self {
        let offset = rotate_screen(fragment.offset, rotation);
        let base_dir = if offset.length_squared() > 1e-6 {
            offset.normalize()
        } else {
            polar_to_cartesian(1.0, rng.random_range(0.0..TAU))
        };
        let jitter = rand_between(rng, -config.direction_jitter, config.direction_jitter);
        let dir = Vec2::from_angle(jitter).rotate(base_dir);

        let speed_modifier = 0.5 + offset.length() / max_radius.max(1.0);
        let speed = rand_between(rng, config.min_speed, config.max_speed) * speed_modifier;
        let lifetime = rand_between(rng, config.min_lifetime, config.max_lifetime);
        let angular_vel = rand_between(rng, config.min_rotation_speed, config.max_rotation_speed);
        let (swirl_lo, swirl_hi) = config.swirl_strength_range;

        let mut debris = Self::new(
            fragment,
            center + offset,
            dir * speed,
            angular_vel,
            lifetime,
            DebrisProfile::from_config(config),
        );
        debris.rotation = rotation;
        debris.swirl_strength = rand_between(rng, swirl_lo, swirl_hi);
        debris.attractor = attractor;
        debris
    }

    #[inline]
    pub fn phase(&self) -> DebrisPhase {
        self.phase
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    #[inline]
    pub fn initial_lifetime(&self) -> f32 {
        self.initial_lifetime
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == DebrisPhase::Done
    }

    /// Advance one tick. `drag` (per-frame velocity factor) only applies
    /// while floating.
    pub fn update(&mut self, dt: f32, drag: Option<f32>) {
        if dt <= 0.0 {
            return;
        }
        match self.phase {
            DebrisPhase::Done => {}
            DebrisPhase::Floating => self.update_floating(dt, drag),
            DebrisPhase::Attracting => self.update_attracting(dt),
        }
    }

    fn update_floating(&mut self, dt: f32, drag: Option<f32>) {
        self.pos += self.vel * dt;
        self.rotation += self.angular_vel * dt;
        self.lifetime = (self.lifetime - dt).max(0.0);
        if let Some(drag) = drag {
            self.vel *= drag.powf(dt);
        }

        match self.profile.mode {
            DebrisMode::Collapsing => {
                if self.lifetime <= self.initial_lifetime / 2.0 {
                    // Ballistic motion is dropped outright; the pull takes over
                    self.vel = Vec2::ZERO;
                    self.phase = DebrisPhase::Attracting;
                }
            }
            DebrisMode::Exploding => {
                let fade = self.profile.fade_frames;
                if self.lifetime <= fade && fade > 0.0 {
                    self.alpha = alpha_from_ratio(self.lifetime / fade);
                }
                if self.lifetime <= 0.0 {
                    self.alpha = 0;
                    self.phase = DebrisPhase::Done;
                }
            }
        }
    }

    fn update_attracting(&mut self, dt: f32) {
        let profile = self.profile;
        self.pos += displace(
            self.pos,
            self.attractor,
            profile.attraction_speed,
            self.swirl_strength,
            profile.tangential_multiplier,
        ) * dt;

        let distance = self.pos.distance(self.attractor);
        if distance < profile.fade_distance {
            self.alpha = alpha_from_ratio(distance / profile.fade_distance);
        }
        if distance < profile.capture_distance(self.swirl_strength, dt) {
            self.alpha = 0;
            self.phase = DebrisPhase::Done;
        }
    }

    /// Pre-expansion separation while the hull cracks apart
    pub fn nudge(&mut self, fracture_speed: f32, dt: f32) {
        if self.phase != DebrisPhase::Done {
            self.pos += self.vel * fracture_speed * dt;
        }
    }

    /// Screen-space bounds of the rotated sprite
    pub fn bounds(&self) -> Aabb {
        Aabb::rotated_rect(self.pos, self.fragment.image.size(), self.rotation)
    }
}

#[inline]
fn alpha_from_ratio(ratio: f32) -> u8 {
    (255.0 * ratio.clamp(0.0, 1.0)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, Rgba};
    use crate::sim::fragment::PixelRect;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::sync::Arc;

    fn fragment(offset: Vec2) -> Fragment {
        Fragment {
            image: Arc::new(Image::filled(4, 4, Rgba::WHITE)),
            triangle: [Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)],
            bbox: PixelRect {
                x: 0,
                y: 0,
                width: 4,
                height: 4,
            },
            offset,
        }
    }

    fn profile(mode: DebrisMode) -> DebrisProfile {
        let mut config = DestructionConfig::asteroid();
        config.mode = mode;
        DebrisProfile::from_config(&config)
    }

    #[test]
    fn test_asteroid_capture_is_black_hole_radius_scaled() {
        let config = DestructionConfig::asteroid();
        let profile = DebrisProfile::from_config(&config);
        let (lo, hi) = config.swirl_strength_range;
        for swirl in [lo, (lo + hi) * 0.5, hi] {
            assert_eq!(profile.capture_distance(swirl, 1.0), config.capture_radius * 1.2);
        }
        assert!((profile.capture_distance(hi, 1.0) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_floating_scenario_sixty_ticks() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::new(10.0, 20.0),
            Vec2::new(1.0, 0.0),
            0.0,
            120.0,
            profile(DebrisMode::Exploding),
        );
        for _ in 0..60 {
            d.update(1.0, None);
        }
        assert_eq!(d.pos.x, 70.0);
        assert_eq!(d.pos.y, 20.0);
        assert_eq!(d.lifetime(), 60.0);
        assert_eq!(d.rotation, 0.0);
        assert_eq!(d.phase(), DebrisPhase::Floating);
    }

    #[test]
    fn test_collapsing_switches_at_half_life() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::new(400.0, 0.0),
            Vec2::new(1.0, 0.0),
            2.0,
            100.0,
            profile(DebrisMode::Collapsing),
        );
        for _ in 0..49 {
            d.update(1.0, None);
        }
        assert_eq!(d.phase(), DebrisPhase::Floating);
        d.update(1.0, None);
        assert_eq!(d.phase(), DebrisPhase::Attracting);
        assert_eq!(d.vel, Vec2::ZERO);
    }

    #[test]
    fn test_attracting_reaches_attractor() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::new(900.0, 700.0),
            Vec2::ZERO,
            0.0,
            0.0,
            profile(DebrisMode::Collapsing),
        );
        d.swirl_strength = 1.5;
        d.attractor = Vec2::new(500.0, 400.0);
        let start = d.pos.distance(d.attractor);
        let mut last = start;
        let mut ticks = 0;
        while !d.is_done() {
            d.update(1.0, None);
            ticks += 1;
            let dist = d.pos.distance(d.attractor);
            // Once attracting, distance never grows
            assert!(dist <= last + 1e-3);
            last = dist;
            assert!(ticks < 1000, "never captured, stuck at {dist}");
        }
        assert_eq!(d.alpha, 0);
        assert!(last < start);
    }

    #[test]
    fn test_attracting_fades_near_attractor() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::new(90.0, 0.0),
            Vec2::ZERO,
            0.0,
            0.0,
            profile(DebrisMode::Collapsing),
        );
        d.update(1.0, None); // floating -> attracting immediately (lifetime 0)
        assert_eq!(d.phase(), DebrisPhase::Attracting);
        d.update(1.0, None);
        assert!(d.alpha < 255);
    }

    #[test]
    fn test_exploding_fades_then_done() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::ZERO,
            Vec2::new(0.0, 2.0),
            1.0,
            90.0,
            profile(DebrisMode::Exploding),
        );
        for _ in 0..30 {
            d.update(1.0, None);
        }
        assert_eq!(d.alpha, 255);
        for _ in 0..30 {
            d.update(1.0, None);
        }
        assert_eq!(d.alpha, 127);
        for _ in 0..40 {
            d.update(1.0, None);
        }
        assert!(d.is_done());
        assert_eq!(d.alpha, 0);
        assert_eq!(d.lifetime(), 0.0);
        // Done is terminal
        let pos = d.pos;
        d.update(1.0, None);
        assert_eq!(d.pos, pos);
    }

    #[test]
    fn test_drag_and_nudge() {
        let mut d = Debris::new(
            fragment(Vec2::ZERO),
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            0.0,
            500.0,
            profile(DebrisMode::Exploding),
        );
        d.nudge(0.02, 1.0);
        assert!((d.pos.x - 0.2).abs() < 1e-6);
        d.update(1.0, Some(0.5));
        assert!((d.vel.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_launch_throws_outward() {
        let config = DestructionConfig::cinematic();
        let mut rng = Pcg32::seed_from_u64(11);
        let d = Debris::launch(
            fragment(Vec2::new(20.0, 0.0)),
            Vec2::new(300.0, 300.0),
            0.0,
            40.0,
            Vec2::ZERO,
            &config,
            &mut rng,
        );
        assert_eq!(d.pos, Vec2::new(320.0, 300.0));
        // No direction jitter in the cinematic preset
        assert!(d.vel.y.abs() < 1e-4);
        // speed in [3, 5] * (0.5 + 20/40)
        assert!(d.vel.x >= 3.0 - 1e-4 && d.vel.x <= 5.0 + 1e-4);
        assert!(d.lifetime() >= config.min_lifetime && d.lifetime() <= config.max_lifetime);
    }

    #[test]
    fn test_launch_applies_trigger_rotation() {
        let config = DestructionConfig::cinematic();
        let mut rng = Pcg32::seed_from_u64(12);
        let d = Debris::launch(
            fragment(Vec2::new(20.0, 0.0)),
            Vec2::ZERO,
            90.0,
            40.0,
            Vec2::ZERO,
            &config,
            &mut rng,
        );
        // +x offset turned counter-clockwise on screen points up (-y)
        assert!((d.pos - Vec2::new(0.0, -20.0)).length() < 1e-3);
        assert!(d.vel.y < 0.0);
        assert_eq!(d.rotation, 90.0);
    }

    proptest! {
        #[test]
        fn prop_lifetime_never_increases_or_goes_negative(
            lifetime in 0.0f32..300.0,
            dts in proptest::collection::vec(0.0f32..3.0, 1..200),
            collapsing in any::<bool>(),
        ) {
            let mode = if collapsing { DebrisMode::Collapsing } else { DebrisMode::Exploding };
            let mut d = Debris::new(
                fragment(Vec2::ONE),
                Vec2::new(700.0, 100.0),
                Vec2::new(-1.0, 0.5),
                3.0,
                lifetime,
                profile(mode),
            );
            d.attractor = Vec2::new(500.0, 400.0);
            let mut last = d.lifetime();
            for dt in dts {
                d.update(dt, Some(0.99));
                prop_assert!(d.lifetime() >= 0.0);
                prop_assert!(d.lifetime() <= last);
                last = d.lifetime();
            }
        }
    }
}
