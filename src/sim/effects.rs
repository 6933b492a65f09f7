//! Secondary explosion effects
//!
//! Sparks, smoke puffs, hull mini-explosions, the central fireball and the
//! vortex particle burst. All of them are plain data stepped by the owner and
//! dropped once `is_alive()` turns false.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec4};
use rand::Rng;

use super::attractor::displace;
use crate::tuning::{FireballConfig, SmokeConfig, SparkConfig};
use crate::{polar_to_cartesian, rand_between};

/// Linear blend between two RGBA colours
#[inline]
pub fn lerp_color(from: [f32; 4], to: [f32; 4], t: f32) -> [f32; 4] {
    Vec4::from_array(from)
        .lerp(Vec4::from_array(to), t.clamp(0.0, 1.0))
        .to_array()
}

/// Rise-and-fall envelope over `progress` in `[0, 1]`
#[inline]
fn swell(max_radius: f32, progress: f32) -> f32 {
    max_radius * (progress.clamp(0.0, 1.0) * PI).sin()
}

// ============================================================================
// Sparks
// ============================================================================

#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    lifetime: f32,
    max_lifetime: f32,
}

impl Spark {
    /// Random direction, speed in `[speed / 2, speed]`
    pub fn spawn<R: Rng + ?Sized>(center: Vec2, config: &SparkConfig, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rand_between(rng, config.speed * 0.5, config.speed);
        Self {
            pos: center,
            vel: polar_to_cartesian(speed, angle),
            lifetime: config.lifetime,
            max_lifetime: config.lifetime,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.lifetime = (self.lifetime - dt).max(0.0);
    }

    pub fn alpha(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}

// ============================================================================
// Smoke
// ============================================================================

#[derive(Debug, Clone)]
pub struct SmokePuff {
    pub pos: Vec2,
    /// Unit drift direction
    pub direction: Vec2,
    pub radius: f32,
    age: f32,
    lifetime: f32,
    min_radius: f32,
    max_radius: f32,
    speed: f32,
    jitter: f32,
}

impl SmokePuff {
    pub fn spawn<R: Rng + ?Sized>(center: Vec2, config: &SmokeConfig, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..TAU);
        Self {
            pos: center,
            direction: Vec2::from_angle(angle),
            radius: config.min_radius,
            age: 0.0,
            lifetime: config.lifetime,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            speed: config.speed,
            jitter: config.jitter,
        }
    }

    /// Grow, fade and drift outward with a random wobble
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.age += dt;
        if !self.is_alive() {
            return;
        }
        let progress = self.progress();
        self.radius = self.min_radius + (self.max_radius - self.min_radius) * progress;

        let wobble = Vec2::new(
            rand_between(rng, -self.jitter, self.jitter),
            rand_between(rng, -self.jitter, self.jitter),
        );
        self.pos += (self.direction * self.speed + wobble) * dt;
    }

    fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).clamp(0.0, 1.0)
        }
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age <= self.lifetime
    }
}

// ============================================================================
// Mini explosions
// ============================================================================

/// Small short-lived blast on the hull before detonation
#[derive(Debug, Clone)]
pub struct MiniExplosion {
    pub pos: Vec2,
    pub radius: f32,
    timer: f32,
    duration: f32,
    max_radius: f32,
}

impl MiniExplosion {
    pub fn new(pos: Vec2, duration: f32, max_radius: f32) -> Self {
        Self {
            pos,
            radius: 0.0,
            timer: 0.0,
            duration,
            max_radius,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        self.radius = swell(self.max_radius, self.progress());
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.timer / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.timer < self.duration
    }
}

// ============================================================================
// Fireball
// ============================================================================

/// Central fireball; driven by the sequencer's expand progress
#[derive(Debug, Clone)]
pub struct Fireball {
    pub pos: Vec2,
    pub radius: f32,
    /// 0..1
    pub alpha: f32,
    pub color: [f32; 4],
    config: FireballConfig,
}

impl Fireball {
    pub fn new(pos: Vec2, config: &FireballConfig) -> Self {
        Self {
            pos,
            radius: 0.0,
            alpha: 1.0,
            color: config.start_color,
            config: config.clone(),
        }
    }

    /// Expand then contract over `progress` 0..1, fading and cooling
    pub fn update(&mut self, progress: f32) {
        let t = progress.clamp(0.0, 1.0);
        self.radius = swell(self.config.max_radius, t);
        self.alpha = 1.0 - t;
        self.color = lerp_color(self.config.start_color, self.config.end_color, t);
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.radius > 0.0
    }
}

// ============================================================================
// Vortex particles
// ============================================================================

pub const VORTEX_PARTICLE_COUNT: usize = 20;
pub const VORTEX_INITIAL_SPEED: f32 = 2.0;
pub const VORTEX_LIFESPAN: f32 = 60.0;
/// Particles start spiralling once their lifespan drops to this
pub const VORTEX_ATTRACT_AT: f32 = 30.0;
pub const VORTEX_SIZE_RANGE: (f32, f32) = (2.0, 5.0);
const VORTEX_ATTRACTION_SPEED: f32 = 4.0;
const VORTEX_TANGENTIAL_MULTIPLIER: f32 = 1.9;

#[derive(Debug, Clone)]
pub struct VortexParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub swirl_strength: f32,
    lifespan: f32,
    attracting: bool,
}

impl VortexParticle {
    #[inline]
    pub fn is_attracting(&self) -> bool {
        self.attracting
    }

    #[inline]
    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }
}

/// Burst of particles that drift, then spiral into the attractor
#[derive(Debug, Clone)]
pub struct VortexSystem {
    pub particles: Vec<VortexParticle>,
    pub attractor: Vec2,
    pub color: [f32; 4],
    /// Particles closer than this to the attractor are removed
    pub capture_radius: f32,
}

impl VortexSystem {
    pub fn new<R: Rng + ?Sized>(
        origin: Vec2,
        attractor: Vec2,
        color: [f32; 4],
        capture_radius: f32,
        rng: &mut R,
    ) -> Self {
        let particles = (0..VORTEX_PARTICLE_COUNT)
            .map(|_| VortexParticle {
                pos: origin,
                vel: Vec2::new(
                    rand_between(rng, -VORTEX_INITIAL_SPEED, VORTEX_INITIAL_SPEED),
                    rand_between(rng, -VORTEX_INITIAL_SPEED, VORTEX_INITIAL_SPEED),
                ),
                size: rand_between(rng, VORTEX_SIZE_RANGE.0, VORTEX_SIZE_RANGE.1).round(),
                swirl_strength: rand_between(rng, 0.5, 1.5),
                lifespan: VORTEX_LIFESPAN,
                attracting: false,
            })
            .collect();
        Self {
            particles,
            attractor,
            color,
            capture_radius,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let attractor = self.attractor;
        let capture = self.capture_radius;
        self.particles.retain_mut(|p| {
            if p.attracting {
                p.pos += displace(
                    p.pos,
                    attractor,
                    VORTEX_ATTRACTION_SPEED,
                    p.swirl_strength,
                    VORTEX_TANGENTIAL_MULTIPLIER,
                ) * dt;
            } else {
                p.pos += p.vel * dt;
                p.lifespan = (p.lifespan - dt).max(0.0);
                if p.lifespan <= VORTEX_ATTRACT_AT {
                    p.attracting = true;
                }
            }
            p.pos.distance(attractor) >= capture && (p.attracting || p.lifespan > 0.0)
        });
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
