//! Swirling approach toward a point
//!
//! Shared by collapsing debris and the ambient vortex particles so that
//! everything falling into the black hole spirals the same way.

use glam::Vec2;

/// Per-tick displacement pulling `position` toward `target` with a swirl.
///
/// The radial part moves `attraction_speed` straight at the target; the
/// tangential part is the radial direction turned 90° counter-clockwise,
/// scaled by `attraction_speed * tangential_multiplier * swirl_strength`.
/// Returns zero when already at the target.
pub fn displace(
    position: Vec2,
    target: Vec2,
    attraction_speed: f32,
    swirl_strength: f32,
    tangential_multiplier: f32,
) -> Vec2 {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    let radial = to_target / distance;
    let tangential = radial.perp();
    radial * attraction_speed + tangential * (attraction_speed * tangential_multiplier * swirl_strength)
}

/// Distance at which repeated displacement stops gaining ground.
///
/// A step of `radial` toward the target plus `tangential` sideways leaves the
/// distance unchanged at `(radial² + tangential²) / (2 · radial)`; anything
/// farther out keeps shrinking toward it.
pub fn orbit_floor(radial: f32, tangential: f32) -> f32 {
    if radial <= 0.0 {
        return f32::INFINITY;
    }
    (radial * radial + tangential * tangential) / (2.0 * radial)
}
