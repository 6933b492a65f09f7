//! Explosion sequencer state
//!
//! The cinematic director for a full destruction: shake, flash, shatter,
//! expand, coast. Types, construction and accessors live here; stepping lives
//! in `tick.rs` and drawing in `renderer::scene`.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::ElectricalArc;
use super::debris::Debris;
use super::effects::{Fireball, MiniExplosion, SmokePuff, Spark};
use crate::consts::STAGE_COUNT;
use crate::image::Image;
use crate::rand_between;
use crate::renderer::sprites::{NoSprites, ResourceProvider};
use crate::settings::Settings;
use crate::tuning::DestructionConfig;

/// Sequencer stage, in the only order they can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    PreShake1,
    Delay1,
    PreShake2,
    Delay2,
    Flash,
    Fracture,
    Expand,
    Coast,
    Finished,
}

impl Stage {
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::PreShake1,
        Stage::Delay1,
        Stage::PreShake2,
        Stage::Delay2,
        Stage::Flash,
        Stage::Fracture,
        Stage::Expand,
        Stage::Coast,
        Stage::Finished,
    ];

    /// Position in [`Stage::ALL`] (and in `state_durations`)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Following stage; `Finished` is terminal
    pub fn next(self) -> Stage {
        Stage::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Stage::Finished)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::PreShake1 => "pre_shake_1",
            Stage::Delay1 => "delay_1",
            Stage::PreShake2 => "pre_shake_2",
            Stage::Delay2 => "delay_2",
            Stage::Flash => "flash",
            Stage::Fracture => "fracture",
            Stage::Expand => "expand",
            Stage::Coast => "coast",
            Stage::Finished => "finished",
        }
    }

    /// Intact object drifting, crackling with arcs
    #[inline]
    pub fn is_pre_flash(self) -> bool {
        self < Stage::Flash
    }

    /// Mini explosions burst on the hull
    #[inline]
    pub fn is_shaking(self) -> bool {
        matches!(self, Stage::PreShake1 | Stage::PreShake2)
    }

    /// The object has broken apart
    #[inline]
    pub fn is_shattered(self) -> bool {
        matches!(self, Stage::Fracture | Stage::Expand | Stage::Coast)
    }
}

/// Notifications for the host (sound cues, camera effects)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplosionEvent {
    StageEntered(Stage),
    /// A burst of hull mini explosions
    MiniExplosions { position: Vec2, count: u32 },
    /// The object shattered
    MainExplosion { position: Vec2, pieces: usize },
    Finished,
}

/// Drives one cinematic destruction from trigger to completion
pub struct ExplosionSequencer {
    pub(super) config: DestructionConfig,
    pub(super) settings: Settings,
    pub(super) resources: Arc<dyn ResourceProvider>,
    pub(super) viewport: Vec2,
    pub(super) attractor: Vec2,
    pub(super) rng: Pcg32,

    /// Source object snapshot (None until started)
    pub(super) image: Option<Arc<Image>>,
    pub(super) position: Vec2,
    /// Degrees, counter-clockwise on screen
    pub(super) rotation: f32,
    pub(super) drift: Vec2,
    pub(super) spin: f32,

    pub(super) stage: Stage,
    pub(super) stage_counter: u32,
    pub(super) shake: Vec2,

    pub(super) debris: Vec<Debris>,
    pub(super) sparks: Vec<Spark>,
    pub(super) smoke: Vec<SmokePuff>,
    pub(super) mini_explosions: Vec<MiniExplosion>,
    pub(super) arcs: Vec<ElectricalArc>,
    pub(super) fireball: Option<Fireball>,

    pub(super) events: Vec<ExplosionEvent>,
}

impl ExplosionSequencer {
    /// Idle sequencer for a `viewport`-sized screen; call [`start`](Self::start) to trigger
    pub fn new(config: DestructionConfig, viewport: Vec2) -> Self {
        Self {
            config,
            settings: Settings::default(),
            resources: Arc::new(NoSprites),
            viewport,
            attractor: viewport * 0.5,
            rng: Pcg32::from_rng(&mut rand::rng()),
            image: None,
            position: Vec2::ZERO,
            rotation: 0.0,
            drift: Vec2::ZERO,
            spin: 0.0,
            stage: Stage::PreShake1,
            stage_counter: 0,
            shake: Vec2::ZERO,
            debris: Vec::new(),
            sparks: Vec::new(),
            smoke: Vec::new(),
            mini_explosions: Vec::new(),
            arcs: Vec::new(),
            fireball: None,
            events: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sprite source used when drawing effects
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = resources;
        self
    }

    /// Fixed RNG seed (tests, replays)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self
    }

    /// Pull point for collapsing profiles; defaults to the viewport center
    pub fn with_attractor(mut self, attractor: Vec2) -> Self {
        self.attractor = attractor;
        self
    }

    /// Trigger the destruction of `image` centered at `position`, turned by
    /// `rotation` degrees. Restarting discards any sequence in progress.
    pub fn start(&mut self, image: impl Into<Arc<Image>>, position: Vec2, rotation: f32) {
        let image = image.into();
        let max_drift = self.config.max_drift_speed;
        let max_spin = self.config.max_spin_speed;

        self.drift = Vec2::new(
            rand_between(&mut self.rng, -max_drift, max_drift),
            rand_between(&mut self.rng, -max_drift, max_drift),
        );
        self.spin = rand_between(&mut self.rng, -max_spin, max_spin);
        self.position = position;
        self.rotation = rotation;
        self.stage = Stage::PreShake1;
        self.stage_counter = 0;
        self.shake = Vec2::ZERO;
        self.debris.clear();
        self.sparks.clear();
        self.smoke.clear();
        self.mini_explosions.clear();
        self.arcs.clear();
        self.fireball = None;
        self.events.clear();

        log::info!(
            "Explosion sequence started: {}x{} object at ({:.0}, {:.0}), rotation {:.1}°",
            image.width(),
            image.height(),
            position.x,
            position.y,
            rotation
        );
        self.image = Some(image);
        self.events.push(ExplosionEvent::StageEntered(Stage::PreShake1));
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.image.is_some()
    }

    /// True once the terminal hold has elapsed
    pub fn is_done(&self) -> bool {
        self.is_started()
            && self.stage == Stage::Finished
            && self.stage_counter >= self.duration(Stage::Finished)
    }

    /// Configured frames for `stage`
    #[inline]
    pub fn duration(&self, stage: Stage) -> u32 {
        self.config.state_durations[stage.index()]
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Updates spent in the current stage
    #[inline]
    pub fn stage_counter(&self) -> u32 {
        self.stage_counter
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn image(&self) -> Option<&Arc<Image>> {
        self.image.as_ref()
    }

    pub fn config(&self) -> &DestructionConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn resources(&self) -> &Arc<dyn ResourceProvider> {
        &self.resources
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn smoke(&self) -> &[SmokePuff] {
        &self.smoke
    }

    pub fn mini_explosions(&self) -> &[MiniExplosion] {
        &self.mini_explosions
    }

    pub fn arcs(&self) -> &[ElectricalArc] {
        &self.arcs
    }

    pub fn fireball(&self) -> Option<&Fireball> {
        self.fireball.as_ref()
    }

    /// Screen offset the host should apply this frame (zero when not shaking)
    #[inline]
    pub fn shake_offset(&self) -> Vec2 {
        self.shake
    }

    /// Flash overlay opacity in `[0, 1]`; zero outside the flash stage
    pub fn flash_alpha(&self) -> f32 {
        if self.stage != Stage::Flash {
            return 0.0;
        }
        let duration = self.duration(Stage::Flash).max(1) as f32;
        (1.0 - self.stage_counter as f32 / duration).clamp(0.0, 1.0)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<ExplosionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl std::fmt::Debug for ExplosionSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplosionSequencer")
            .field("stage", &self.stage)
            .field("stage_counter", &self.stage_counter)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("debris", &self.debris.len())
            .field("sparks", &self.sparks.len())
            .field("smoke", &self.smoke.len())
            .field("arcs", &self.arcs.len())
            .finish_non_exhaustive()
    }
}
