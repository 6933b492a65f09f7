//! Player-facing effect settings
//!
//! Quality scales how many secondary particles a destruction spawns;
//! accessibility toggles suppress shake and the white-out flash.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Fraction of configured sparks/smoke/arcs to actually spawn
    pub fn effect_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether electrical arcs branch at all (every preset but Low)
    pub fn arc_branching(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Destruction effect settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake during the pre-detonation stages
    pub screen_shake: bool,
    /// White-out flash before fracture
    pub flash: bool,
    /// Sparks, smoke, arcs and mini explosions
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            screen_shake: true,
            flash: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the full-screen flash for performance
        if preset == QualityPreset::Low {
            self.flash = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flash overlay (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.flash && !self.reduced_motion
    }

    /// Scale a configured particle count by quality; zero when particles are off
    pub fn scaled_count(&self, configured: u32) -> u32 {
        if !self.particles || configured == 0 {
            0
        } else {
            ((configured as f32 * self.quality.effect_scale()).round() as u32).max(1)
        }
    }
}
