//! Explosion sequencer stepping
//!
//! One `update` per rendered frame. Order within a frame:
//! 1. Advance the stage counter
//! 2. Step every live effect and compact the dead ones
//! 3. Run the current stage's behavior
//! 4. Move to the next stage once the counter reaches its duration
//! 5. Roll the screen shake for the stage now showing

use glam::Vec2;
use rand::Rng;

use super::arc::ElectricalArc;
use super::collision::Aabb;
use super::debris::Debris;
use super::effects::{Fireball, MiniExplosion, SmokePuff, Spark};
use super::fragment::{max_radius, shatter};
use super::state::{ExplosionEvent, ExplosionSequencer, Stage};
use crate::rand_between;

/// Uniform integer in `[lo, hi]`; `lo` for inverted ranges
fn rand_count<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

impl ExplosionSequencer {
    /// Advance the sequence by one frame (`dt` in frames).
    ///
    /// A no-op before [`start`](Self::start).
    pub fn update(&mut self, dt: f32) {
        if !self.is_started() {
            return;
        }
        self.stage_counter = self.stage_counter.saturating_add(1);
        if self.stage == Stage::Finished {
            return;
        }
        self.update_effects(dt);

        match self.stage {
            Stage::PreShake1 | Stage::PreShake2 => {
                self.drift_and_spin(dt);
                self.spawn_mini_explosions();
                self.spawn_arcs();
            }
            Stage::Delay1 | Stage::Delay2 => {
                self.drift_and_spin(dt);
                self.spawn_arcs();
            }
            Stage::Flash => {}
            Stage::Fracture => {
                let fracture_speed = self.config.fracture_speed;
                for d in &mut self.debris {
                    d.nudge(fracture_speed, dt);
                }
            }
            Stage::Expand => {
                let progress = self.stage_counter as f32 / self.duration(Stage::Expand).max(1) as f32;
                if let Some(fireball) = &mut self.fireball {
                    fireball.update(progress);
                }
                self.update_debris(dt, None);
            }
            Stage::Coast => {
                self.update_debris(dt, Some(self.config.coast_drag));
            }
            Stage::Finished => {}
        }

        if self.stage_complete() {
            self.advance();
        }
        self.update_shake();
    }

    fn stage_complete(&self) -> bool {
        let duration = self.duration(self.stage);
        if self.stage_counter < duration {
            return false;
        }
        if self.stage != Stage::Coast {
            return true;
        }
        // Coast waits for the debris to leave the screen, up to a hard limit
        let overrun = self.stage_counter - duration;
        if self.all_debris_off_screen() {
            true
        } else if overrun >= self.config.coast_timeout {
            log::warn!(
                "Coast timed out with {} debris still on screen",
                self.debris.len()
            );
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        let from = self.stage;
        let to = from.next();
        log::debug!(
            "Explosion stage {} -> {} after {} frames",
            from.as_str(),
            to.as_str(),
            self.stage_counter
        );
        self.stage = to;
        self.stage_counter = 0;
        self.events.push(ExplosionEvent::StageEntered(to));

        match to {
            Stage::Fracture => self.detonate(),
            Stage::Coast => self.fireball = None,
            Stage::Finished => self.events.push(ExplosionEvent::Finished),
            _ => {}
        }
    }

    /// Shatter the object and spawn the main blast
    fn detonate(&mut self) {
        let Some(image) = self.image.clone() else {
            return;
        };
        let rotated = image.rotated(self.rotation);
        let radius = max_radius(rotated.width(), rotated.height());
        let fragments = shatter(
            &rotated,
            self.config.num_outer_points,
            self.config.num_inner_points,
            &mut self.rng,
        );

        // The sprite is already turned, so pieces start unrotated
        let (center, attractor) = (self.position, self.attractor);
        self.debris = fragments
            .into_iter()
            .map(|f| Debris::launch(f, center, 0.0, radius, attractor, &self.config, &mut self.rng))
            .collect();

        let effects = &self.config.effects;
        self.fireball = Some(Fireball::new(center, &effects.fireball));
        let spark_count = self.settings.scaled_count(effects.sparks.count);
        self.sparks = (0..spark_count)
            .map(|_| Spark::spawn(center, &effects.sparks, &mut self.rng))
            .collect();
        let smoke_count = self.settings.scaled_count(effects.smoke.count);
        self.smoke = (0..smoke_count)
            .map(|_| SmokePuff::spawn(center, &effects.smoke, &mut self.rng))
            .collect();

        log::info!(
            "Detonation at ({:.0}, {:.0}): {} debris, {} sparks, {} smoke puffs",
            center.x,
            center.y,
            self.debris.len(),
            self.sparks.len(),
            self.smoke.len()
        );
        self.events.push(ExplosionEvent::MainExplosion {
            position: center,
            pieces: self.debris.len(),
        });
    }

    fn drift_and_spin(&mut self, dt: f32) {
        self.position += self.drift * dt;
        self.rotation += self.spin * dt;
    }

    fn update_shake(&mut self) {
        let shaking = matches!(self.stage, Stage::PreShake1 | Stage::PreShake2 | Stage::Flash);
        self.shake = if shaking && self.settings.effective_screen_shake() {
            let intensity = self.config.effects.shake_intensity;
            Vec2::new(
                rand_between(&mut self.rng, -intensity, intensity).round(),
                rand_between(&mut self.rng, -intensity, intensity).round(),
            )
        } else {
            Vec2::ZERO
        };
    }

    /// Step the short-lived effects; they keep running across stages once spawned
    fn update_effects(&mut self, dt: f32) {
        self.mini_explosions.retain_mut(|m| {
            m.update(dt);
            m.is_alive()
        });
        self.arcs.retain_mut(|a| {
            a.update(dt);
            a.is_alive()
        });
        self.sparks.retain_mut(|s| {
            s.update(dt);
            s.is_alive()
        });
        let rng = &mut self.rng;
        self.smoke.retain_mut(|p| {
            p.update(dt, rng);
            p.is_alive()
        });
    }

    fn update_debris(&mut self, dt: f32, drag: Option<f32>) {
        self.debris.retain_mut(|d| {
            d.update(dt, drag);
            !d.is_done()
        });
    }

    fn all_debris_off_screen(&self) -> bool {
        let screen = Aabb::from_size(self.viewport);
        self.debris.iter().all(|d| !d.bounds().intersects(&screen))
    }

    fn object_size(&self) -> Vec2 {
        self.image.as_ref().map(|i| i.size()).unwrap_or(Vec2::ZERO)
    }

    fn spawn_mini_explosions(&mut self) {
        let config = &self.config.effects.mini_explosions;
        if !config.burst_frames.contains(&self.stage_counter) {
            return;
        }
        let count = self
            .settings
            .scaled_count(rand_count(&mut self.rng, config.min_count, config.max_count));
        let half = self.object_size() / 4.0;
        for _ in 0..count {
            let offset = Vec2::new(
                rand_between(&mut self.rng, -half.x, half.x),
                rand_between(&mut self.rng, -half.y, half.y),
            );
            self.mini_explosions.push(MiniExplosion::new(
                self.position + offset,
                config.duration,
                config.max_radius,
            ));
        }
        self.events.push(ExplosionEvent::MiniExplosions {
            position: self.position,
            count,
        });
    }

    fn spawn_arcs(&mut self) {
        let config = &self.config.effects.arcs;
        if config.spawn_interval == 0 || self.stage_counter % config.spawn_interval != 0 {
            return;
        }
        let count = self
            .settings
            .scaled_count(rand_count(&mut self.rng, config.min_per_spawn, config.max_per_spawn));
        let third = self.object_size() / 3.0;
        let branching = self.settings.quality.arc_branching();
        for _ in 0..count {
            let start = Vec2::new(
                rand_between(&mut self.rng, -third.x, third.x),
                rand_between(&mut self.rng, -third.y, third.y),
            );
            let end = start
                + Vec2::new(
                    rand_between(&mut self.rng, -config.length, config.length),
                    rand_between(&mut self.rng, -config.length, config.length),
                );
            self.arcs.push(ElectricalArc::generate(
                self.position + start,
                self.position + end,
                config,
                branching,
                &mut self.rng,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, STAGE_COUNT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
    use crate::image::{Image, Rgba};
    use crate::settings::Settings;
    use crate::tuning::DestructionConfig;

    fn viewport() -> Vec2 {
        Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    fn run_to_completion(seq: &mut ExplosionSequencer, limit: u32) -> u32 {
        let mut updates = 0;
        while !seq.is_done() {
            seq.update(FRAME_DT);
            updates += 1;
            assert!(updates <= limit, "stuck in {:?} after {updates} updates", seq.stage());
        }
        updates
    }

    #[test]
    fn test_update_before_start_is_noop() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport());
        for _ in 0..10 {
            seq.update(FRAME_DT);
        }
        assert_eq!(seq.stage(), Stage::PreShake1);
        assert_eq!(seq.stage_counter(), 0);
        assert!(!seq.is_done());
    }

    #[test]
    fn test_unit_durations_empty_object_takes_nine_updates() {
        let mut config = DestructionConfig::cinematic();
        config.state_durations = [1; STAGE_COUNT];
        let mut seq = ExplosionSequencer::new(config, viewport()).with_seed(3);
        seq.start(Image::new(0, 0), Vec2::new(500.0, 400.0), 0.0);

        for i in 0..8 {
            seq.update(FRAME_DT);
            assert!(!seq.is_done(), "done early after {} updates", i + 1);
        }
        assert_eq!(seq.stage(), Stage::Finished);
        seq.update(FRAME_DT);
        assert!(seq.is_done());
        assert!(seq.debris().is_empty());
    }

    #[test]
    fn test_cinematic_terminates_for_many_seeds() {
        let config = DestructionConfig::cinematic();
        let limit = config.scripted_frames() + config.coast_timeout + 2;
        let ship = Image::filled(48, 32, Rgba::new(180, 180, 200, 255));
        for seed in 0..12 {
            let mut seq = ExplosionSequencer::new(config.clone(), viewport()).with_seed(seed);
            seq.start(ship.clone(), Vec2::new(500.0, 400.0), seed as f32 * 30.0);
            run_to_completion(&mut seq, limit);
        }
    }

    #[test]
    fn test_coast_timeout_bounds_stuck_debris() {
        let mut config = DestructionConfig::cinematic();
        config.state_durations = [1, 1, 1, 1, 1, 1, 1, 1, 0];
        // Debris barely move and never leave the screen
        config.min_speed = 0.0;
        config.max_speed = 0.0;
        config.min_lifetime = 5000.0;
        config.max_lifetime = 5000.0;
        config.coast_timeout = 50;
        let mut seq = ExplosionSequencer::new(config.clone(), viewport()).with_seed(4);
        seq.start(Image::filled(40, 40, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        let updates = run_to_completion(&mut seq, 1000);
        assert_eq!(updates, config.scripted_frames() + config.coast_timeout);
        assert!(!seq.debris().is_empty());
    }

    #[test]
    fn test_stages_only_move_forward() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport()).with_seed(5);
        seq.start(Image::filled(30, 30, Rgba::WHITE), Vec2::new(500.0, 400.0), 10.0);
        let mut last = seq.stage();
        let mut entered = vec![last];
        while !seq.is_done() {
            seq.update(FRAME_DT);
            assert!(seq.stage() >= last);
            if seq.stage() != last {
                assert_eq!(seq.stage(), last.next());
                entered.push(seq.stage());
            }
            last = seq.stage();
        }
        assert_eq!(entered, Stage::ALL.to_vec());
    }

    #[test]
    fn test_event_stream() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport()).with_seed(6);
        seq.start(Image::filled(40, 24, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        let mut events = Vec::new();
        while !seq.is_done() {
            seq.update(FRAME_DT);
            events.extend(seq.drain_events());
        }
        // Two bursts per shake stage
        let bursts = events
            .iter()
            .filter(|e| matches!(e, ExplosionEvent::MiniExplosions { .. }))
            .count();
        assert_eq!(bursts, 4);
        let mains: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ExplosionEvent::MainExplosion { pieces, .. } => Some(*pieces),
                _ => None,
            })
            .collect();
        assert_eq!(mains.len(), 1);
        assert!(mains[0] > 0);
        assert_eq!(events.last(), Some(&ExplosionEvent::Finished));
    }

    #[test]
    fn test_fracture_spawns_blast_and_drift_stops() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport()).with_seed(7);
        seq.start(Image::filled(40, 40, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        while seq.stage() != Stage::Fracture {
            seq.update(FRAME_DT);
        }
        assert!(!seq.debris().is_empty());
        assert!(seq.fireball().is_some());
        assert_eq!(seq.sparks().len(), 50);
        assert_eq!(seq.smoke().len(), 30);

        let frozen = seq.position();
        seq.update(FRAME_DT);
        assert_eq!(seq.position(), frozen);
    }

    #[test]
    fn test_pre_flash_arcs_and_shake() {
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport()).with_seed(8);
        seq.start(Image::filled(60, 40, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        let mut saw_arcs = false;
        let mut saw_shake = false;
        while seq.stage().is_pre_flash() {
            seq.update(FRAME_DT);
            saw_arcs |= !seq.arcs().is_empty();
            saw_shake |= seq.shake_offset() != Vec2::ZERO;
            if seq.stage() == Stage::Delay1 || seq.stage() == Stage::Delay2 {
                assert_eq!(seq.shake_offset(), Vec2::ZERO);
            }
        }
        assert!(saw_arcs);
        assert!(saw_shake);
    }

    #[test]
    fn test_reduced_motion_and_particles_off() {
        let settings = Settings {
            reduced_motion: true,
            particles: false,
            ..Settings::default()
        };
        let mut seq = ExplosionSequencer::new(DestructionConfig::cinematic(), viewport())
            .with_settings(settings)
            .with_seed(9);
        seq.start(Image::filled(40, 40, Rgba::WHITE), Vec2::new(500.0, 400.0), 0.0);
        while seq.stage() != Stage::Expand {
            seq.update(FRAME_DT);
            assert_eq!(seq.shake_offset(), Vec2::ZERO);
            assert!(seq.arcs().is_empty());
            assert!(seq.mini_explosions().is_empty());
        }
        assert!(seq.sparks().is_empty());
        assert!(!seq.debris().is_empty());
    }
}
