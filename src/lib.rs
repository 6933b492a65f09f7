//! Shatter - procedural destruction for a black-hole arcade game
//!
//! Core modules:
//! - `sim`: Fragmentation, debris physics and the cinematic explosion director
//! - `renderer`: Drawing-surface capability plus recording/mesh adapters
//! - `image`: RGBA rasters used as silhouettes and fragment sprites
//! - `tuning`: Data-driven destruction profiles
//! - `settings`: Player-facing quality / accessibility toggles

pub mod error;
pub mod image;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use image::{Image, Rgba};
pub use settings::{QualityPreset, Settings};
pub use tuning::DestructionConfig;

use glam::Vec2;
use rand::Rng;

/// Engine-wide constants
pub mod consts {
    /// One simulation step, measured in frames (all speeds are per-frame)
    pub const FRAME_DT: f32 = 1.0;

    /// Default viewport used by the demo and the presets
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Black hole radius; collapsing debris is captured at 1.2x this
    pub const BLACK_HOLE_RADIUS: f32 = 50.0;
    /// Distance at which collapsing debris starts fading
    pub const BLACK_HOLE_FADE_DISTANCE: f32 = 100.0;

    /// Number of sequencer stages (including the terminal one)
    pub const STAGE_COUNT: usize = 9;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a screen-space vector (y pointing down) by `degrees`.
///
/// Positive angles turn counter-clockwise as seen on screen, matching how
/// sprites are rotated by [`Image::rotated`].
#[inline]
pub fn rotate_screen(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

/// Uniform sample in `[lo, hi]`; returns `lo` for empty or inverted ranges.
#[inline]
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rotate_screen_quarter_turn() {
        // Counter-clockwise on screen: +x turns toward -y (up)
        let v = rotate_screen(Vec2::X, 90.0);
        assert!((v - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_rand_between_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(rand_between(&mut rng, 3.0, 3.0), 3.0);
        assert_eq!(rand_between(&mut rng, 5.0, 1.0), 5.0);
        let x = rand_between(&mut rng, -1.0, 1.0);
        assert!((-1.0..=1.0).contains(&x));
    }
}
