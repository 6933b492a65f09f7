//! Free-standing shatters
//!
//! Asteroids and in-game ship kills break apart without the cinematic
//! director: the pieces are launched once and then either collapse into the
//! black hole or drift off and fade, depending on the profile.

use glam::Vec2;
use rand::Rng;

use super::debris::Debris;
use super::fragment::{max_radius, shatter};
use super::silhouette::Silhouette;
use crate::tuning::DestructionConfig;

/// A set of debris from one shattered object
#[derive(Debug, Clone)]
pub struct DebrisField {
    pub debris: Vec<Debris>,
    /// Multiplied into every piece when drawn
    pub tint: [f32; 4],
}

impl DebrisField {
    /// Shatter `shape` centered at `center`, already turned by `rotation` degrees
    pub fn shatter<S, R>(
        shape: &S,
        center: Vec2,
        rotation: f32,
        attractor: Vec2,
        config: &DestructionConfig,
        rng: &mut R,
    ) -> Self
    where
        S: Silhouette + ?Sized,
        R: Rng + ?Sized,
    {
        let radius = max_radius(shape.width(), shape.height());
        let debris: Vec<Debris> = shatter(shape, config.num_outer_points, config.num_inner_points, rng)
            .into_iter()
            .map(|fragment| Debris::launch(fragment, center, rotation, radius, attractor, config, rng))
            .collect();
        log::debug!(
            "Shattered {}x{} object at ({:.0}, {:.0}) into {} pieces ({:?})",
            shape.width(),
            shape.height(),
            center.x,
            center.y,
            debris.len(),
            config.mode
        );
        Self {
            debris,
            tint: [1.0; 4],
        }
    }

    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }

    /// Move the pull point (e.g. when the camera re-centres the black hole)
    pub fn set_attractor(&mut self, attractor: Vec2) {
        for d in &mut self.debris {
            d.attractor = attractor;
        }
    }

    /// Step every piece and drop the finished ones
    pub fn update(&mut self, dt: f32) {
        self.debris.retain_mut(|d| {
            d.update(dt, None);
            !d.is_done()
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.debris.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.debris.is_empty()
    }
}
