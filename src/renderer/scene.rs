//! Drawing the destruction
//!
//! Before the fracture only the intact object and its hull effects are
//! drawn; from the fracture on only the debris and the blast. Nothing is
//! drawn once the sequence has finished. Screen shake is left to the host
//! (see [`ExplosionSequencer::shake_offset`]).

use glam::Vec2;

use super::sprites::{ResourceProvider, SpriteKey};
use super::{Color, DrawSurface, colors, fade};
use crate::sim::arc::ElectricalArc;
use crate::sim::debris::Debris;
use crate::sim::effects::VortexSystem;
use crate::sim::field::DebrisField;
use crate::sim::state::{ExplosionSequencer, Stage};

/// Arc polyline width in pixels
const ARC_WIDTH: f32 = 1.0;

/// Glow sprite when the provider has one, flat circle otherwise
fn draw_glow<S: DrawSurface + ?Sized>(
    surface: &mut S,
    resources: &dyn ResourceProvider,
    key: SpriteKey,
    center: Vec2,
    radius: f32,
    color: Color,
) {
    if radius <= 0.0 || color[3] <= 0.0 {
        return;
    }
    match resources.sprite(key) {
        Some(sprite) if !sprite.is_empty() => {
            let scale = radius * 2.0 / sprite.width() as f32;
            surface.draw_image(&sprite, center, 0.0, scale, color);
        }
        _ => surface.fill_circle(center, radius, color),
    }
}

fn draw_debris<S: DrawSurface + ?Sized>(surface: &mut S, debris: &Debris, tint: Color) {
    if debris.is_done() || debris.alpha == 0 {
        return;
    }
    let tint = fade(tint, debris.alpha as f32 / 255.0);
    surface.draw_image(&debris.fragment.image, debris.pos, debris.rotation, 1.0, tint);
}

fn draw_arc<S: DrawSurface + ?Sized>(surface: &mut S, arc: &ElectricalArc, color: Color) {
    let color = fade(color, arc.alpha());
    if color[3] <= 0.0 {
        return;
    }
    for bolt in &arc.bolts {
        surface.draw_polyline(&bolt.points, ARC_WIDTH, color);
    }
}

impl ExplosionSequencer {
    /// Draw the current frame. Call after [`update`](Self::update).
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let Some(image) = self.image() else {
            return;
        };
        let stage = self.stage();
        if stage == Stage::Finished {
            return;
        }
        let effects = &self.config().effects;
        let resources = self.resources().as_ref();

        if !stage.is_shattered() {
            surface.draw_image(image, self.position(), self.rotation(), 1.0, colors::WHITE);
            for mini in self.mini_explosions() {
                let color = fade(effects.mini_explosions.color, mini.alpha());
                draw_glow(surface, resources, SpriteKey::Glow, mini.pos, mini.radius, color);
            }
            for arc in self.arcs() {
                draw_arc(surface, arc, effects.arcs.color);
            }
            if stage == Stage::Flash && self.settings().effective_flash() {
                surface.fill_overlay(fade(effects.flash_color, self.flash_alpha()));
            }
            return;
        }

        if let Some(fireball) = self.fireball().filter(|f| f.is_visible()) {
            let color = fade(fireball.color, fireball.alpha);
            draw_glow(surface, resources, SpriteKey::Glow, fireball.pos, fireball.radius, color);
        }
        for debris in self.debris() {
            draw_debris(surface, debris, colors::WHITE);
        }
        for spark in self.sparks() {
            let color = fade(effects.sparks.color, spark.alpha());
            draw_glow(surface, resources, SpriteKey::Glow, spark.pos, effects.sparks.radius, color);
        }
        for mini in self.mini_explosions() {
            let color = fade(effects.mini_explosions.color, mini.alpha());
            draw_glow(surface, resources, SpriteKey::Glow, mini.pos, mini.radius, color);
        }
        for puff in self.smoke() {
            let color = fade(effects.smoke.color, puff.alpha());
            draw_glow(surface, resources, SpriteKey::Puff, puff.pos, puff.radius, color);
        }
    }
}

impl DebrisField {
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for debris in &self.debris {
            draw_debris(surface, debris, self.tint);
        }
    }
}

impl VortexSystem {
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size * 0.5, self.color);
        }
    }
}
