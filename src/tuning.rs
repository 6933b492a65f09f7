//! Data-driven destruction profiles
//!
//! One [`DestructionConfig`] drives a whole shatter: how many fracture points,
//! how debris launches and dies, how long each cinematic stage lasts, and the
//! look of the secondary effects. Presets reproduce the game's three uses
//! (asteroid, ship, cinematic ship destruction); JSON overrides ride on top of
//! the cinematic defaults.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{BLACK_HOLE_FADE_DISTANCE, BLACK_HOLE_RADIUS, STAGE_COUNT};
use crate::error::ConfigError;

/// How debris behaves once launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebrisMode {
    /// Float, then spiral into the attractor
    Collapsing,
    /// Fly outward and fade as lifetime runs out
    #[default]
    Exploding,
}

/// Central fireball envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballConfig {
    pub max_radius: f32,
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            max_radius: 80.0,
            start_color: [1.0, 1.0, 0.78, 1.0], // yellow-white
            end_color: [1.0, 0.39, 0.0, 1.0],   // fiery orange
        }
    }
}

/// Small fast sparks thrown from the explosion center
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    pub count: u32,
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            count: 50,
            speed: 5.0,
            lifetime: 20.0,
            radius: 1.0,
            color: [1.0, 1.0, 0.59, 1.0],
        }
    }
}

/// Slow expanding smoke puffs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    pub count: u32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub lifetime: f32,
    pub speed: f32,
    /// Random per-frame wobble added to the drift
    pub jitter: f32,
    pub color: [f32; 4],
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            count: 30,
            min_radius: 5.0,
            max_radius: 60.0,
            lifetime: 120.0,
            speed: 1.0,
            jitter: 0.5,
            color: [0.39, 0.39, 0.39, 0.59],
        }
    }
}

/// Pre-detonation mini explosions on the hull
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiniExplosionConfig {
    pub duration: f32,
    pub max_radius: f32,
    pub min_count: u32,
    pub max_count: u32,
    /// Frame offsets within each shake stage at which a burst fires
    pub burst_frames: [u32; 2],
    pub color: [f32; 4],
}

impl Default for MiniExplosionConfig {
    fn default() -> Self {
        Self {
            duration: 15.0,
            max_radius: 20.0,
            min_count: 2,
            max_count: 4,
            burst_frames: [5, 15],
            color: [1.0, 0.59, 0.0, 1.0],
        }
    }
}

/// Branching electrical arcs crawling over the hull before detonation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    pub lifetime: f32,
    /// Max end-point offset of a root arc; children get half per level
    pub length: f32,
    pub jitter: f32,
    pub segments: u32,
    pub branch_chance: f64,
    pub max_depth: u32,
    /// Spawn every N frames
    pub spawn_interval: u32,
    pub min_per_spawn: u32,
    pub max_per_spawn: u32,
    pub color: [f32; 4],
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            lifetime: 10.0,
            length: 50.0,
            jitter: 9.0,
            segments: 5,
            branch_chance: 0.2,
            max_depth: 2,
            spawn_interval: 3,
            min_per_spawn: 1,
            max_per_spawn: 2,
            color: [0.59, 0.78, 1.0, 1.0],
        }
    }
}

/// Everything the sequencer spawns besides debris
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub flash_color: [f32; 4],
    /// Max screen shake offset in pixels
    pub shake_intensity: f32,
    pub fireball: FireballConfig,
    pub sparks: SparkConfig,
    pub smoke: SmokeConfig,
    pub mini_explosions: MiniExplosionConfig,
    pub arcs: ArcConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            flash_color: [1.0, 1.0, 1.0, 1.0],
            shake_intensity: 8.0,
            fireball: FireballConfig::default(),
            sparks: SparkConfig::default(),
            smoke: SmokeConfig::default(),
            mini_explosions: MiniExplosionConfig::default(),
            arcs: ArcConfig::default(),
        }
    }
}

/// A complete destruction profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructionConfig {
    pub mode: DebrisMode,

    // === Fragmentation ===
    pub num_outer_points: usize,
    pub num_inner_points: usize,

    // === Debris launch (per-frame units) ===
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Degrees per frame
    pub min_rotation_speed: f32,
    pub max_rotation_speed: f32,
    /// Max random turn of the launch direction (radians)
    pub direction_jitter: f32,
    /// Exploding debris fade over their last N frames
    pub fade_frames: f32,

    // === Collapse into the attractor ===
    pub attraction_speed: f32,
    pub tangential_multiplier: f32,
    pub swirl_strength_range: (f32, f32),
    /// Start fading inside this distance of the attractor
    pub fade_distance: f32,
    /// Captured inside 1.2x this distance
    pub capture_radius: f32,

    // === Cinematic ===
    /// Velocity fraction applied per frame while fracturing
    pub fracture_speed: f32,
    /// Multiplicative velocity decay per frame while coasting
    pub coast_drag: f32,
    /// Frames per stage, in stage order (last entry: terminal hold)
    pub state_durations: [u32; STAGE_COUNT],
    /// Extra coast frames allowed before giving up on off-screen debris
    pub coast_timeout: u32,
    /// Drift before detonation, px/frame per axis
    pub max_drift_speed: f32,
    /// Spin before detonation, degrees/frame
    pub max_spin_speed: f32,

    pub effects: EffectsConfig,
}

impl Default for DestructionConfig {
    fn default() -> Self {
        Self::cinematic()
    }
}

impl DestructionConfig {
    /// Full ship-destruction cinematic
    pub fn cinematic() -> Self {
        Self {
            mode: DebrisMode::Exploding,
            num_outer_points: 12,
            num_inner_points: 15,
            min_lifetime: 400.0,
            max_lifetime: 600.0,
            min_speed: 3.0,
            max_speed: 5.0,
            min_rotation_speed: -5.0,
            max_rotation_speed: 5.0,
            direction_jitter: 0.0,
            fade_frames: 60.0,
            attraction_speed: 4.0,
            tangential_multiplier: 1.9,
            swirl_strength_range: (0.5, 1.5),
            fade_distance: BLACK_HOLE_FADE_DISTANCE,
            capture_radius: BLACK_HOLE_RADIUS,
            fracture_speed: 0.02,
            coast_drag: 0.995,
            state_durations: [15, 60, 20, 60, 8, 15, 80, 90, 0],
            coast_timeout: 600,
            max_drift_speed: 1.0,
            max_spin_speed: 0.5,
            effects: EffectsConfig::default(),
        }
    }

    /// Asteroid shattered near the black hole: pieces float, then get sucked in
    pub fn asteroid() -> Self {
        Self {
            mode: DebrisMode::Collapsing,
            num_outer_points: 8,
            num_inner_points: 10,
            min_lifetime: 120.0,
            max_lifetime: 240.0,
            min_speed: 0.5,
            max_speed: 1.5,
            direction_jitter: PI / 8.0,
            ..Self::cinematic()
        }
    }

    /// Player ship blown apart in-game (no cinematic)
    pub fn ship() -> Self {
        Self {
            mode: DebrisMode::Exploding,
            num_outer_points: 12,
            num_inner_points: 15,
            min_lifetime: 240.0,
            max_lifetime: 400.0,
            min_speed: 0.15,
            max_speed: 0.6,
            min_rotation_speed: -2.0,
            max_rotation_speed: 2.0,
            direction_jitter: PI / 16.0,
            ..Self::cinematic()
        }
    }

    /// Parse a JSON profile (missing fields fall back to the cinematic preset)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject inverted ranges and values that would stall or explode the sim
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("lifetime", self.min_lifetime, self.max_lifetime),
            ("speed", self.min_speed, self.max_speed),
            ("rotation_speed", self.min_rotation_speed, self.max_rotation_speed),
            (
                "swirl_strength_range",
                self.swirl_strength_range.0,
                self.swirl_strength_range.1,
            ),
            (
                "mini_explosions.count",
                self.effects.mini_explosions.min_count as f32,
                self.effects.mini_explosions.max_count as f32,
            ),
            (
                "arcs.per_spawn",
                self.effects.arcs.min_per_spawn as f32,
                self.effects.arcs.max_per_spawn as f32,
            ),
            (
                "smoke.radius",
                self.effects.smoke.min_radius,
                self.effects.smoke.max_radius,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvalidRange { field, min, max });
            }
        }

        let positives = [
            ("max_lifetime", self.max_lifetime),
            ("fade_frames", self.fade_frames),
            ("fade_distance", self.fade_distance),
            ("capture_radius", self.capture_radius),
            ("sparks.lifetime", self.effects.sparks.lifetime),
            ("smoke.lifetime", self.effects.smoke.lifetime),
            ("mini_explosions.duration", self.effects.mini_explosions.duration),
            ("arcs.lifetime", self.effects.arcs.lifetime),
        ];
        for (field, value) in positives {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.min_lifetime < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "min_lifetime",
                value: self.min_lifetime,
            });
        }
        if self.mode == DebrisMode::Collapsing && self.attraction_speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "attraction_speed",
                value: self.attraction_speed,
            });
        }

        if !(self.coast_drag > 0.0 && self.coast_drag <= 1.0) {
            return Err(ConfigError::InvalidDrag(self.coast_drag));
        }
        Ok(())
    }

    /// Total scripted frames, excluding the open-ended part of coasting
    pub fn scripted_frames(&self) -> u32 {
        // Every active stage lasts at least one update; the terminal hold may be zero
        let active: u32 = self.state_durations[..STAGE_COUNT - 1]
            .iter()
            .map(|&d| d.max(1))
            .sum();
        active + self.state_durations[STAGE_COUNT - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        DestructionConfig::cinematic().validate().unwrap();
        DestructionConfig::asteroid().validate().unwrap();
        DestructionConfig::ship().validate().unwrap();
        assert_eq!(DestructionConfig::asteroid().mode, DebrisMode::Collapsing);
        assert_eq!(DestructionConfig::asteroid().num_outer_points, 8);
        assert_eq!(DestructionConfig::ship().num_inner_points, 15);
    }

    #[test]
    fn test_from_json_partial_override() {
        let json = r#"{ "mode": "collapsing", "num_inner_points": 3, "effects": { "sparks": { "count": 7 } } }"#;
        let config = DestructionConfig::from_json(json).unwrap();
        assert_eq!(config.mode, DebrisMode::Collapsing);
        assert_eq!(config.num_inner_points, 3);
        assert_eq!(config.effects.sparks.count, 7);
        // Untouched fields keep cinematic defaults
        assert_eq!(config.num_outer_points, 12);
        assert_eq!(config.state_durations[6], 80);
        assert_eq!(config.effects.sparks.lifetime, 20.0);
    }

    #[test]
    fn test_json_round_trip_keeps_durations() {
        let original = DestructionConfig::asteroid();
        let json = original.to_json().unwrap();
        let parsed = DestructionConfig::from_json(&json).unwrap();
        assert_eq!(parsed.state_durations, original.state_durations);
        assert_eq!(parsed.swirl_strength_range, original.swirl_strength_range);
    }

    #[test]
    fn test_validation_errors() {
        let bad = r#"{ "min_speed": 5.0, "max_speed": 1.0 }"#;
        assert!(matches!(
            DestructionConfig::from_json(bad),
            Err(ConfigError::InvalidRange { field: "speed", .. })
        ));

        let bad = r#"{ "coast_drag": 1.5 }"#;
        assert!(matches!(
            DestructionConfig::from_json(bad),
            Err(ConfigError::InvalidDrag(_))
        ));

        let bad = r#"{ "fade_frames": 0.0 }"#;
        assert!(matches!(
            DestructionConfig::from_json(bad),
            Err(ConfigError::NonPositive { field: "fade_frames", .. })
        ));

        assert!(matches!(
            DestructionConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_scripted_frames() {
        let mut config = DestructionConfig::cinematic();
        config.state_durations = [1; STAGE_COUNT];
        assert_eq!(config.scripted_frames(), 9);
    }
}
