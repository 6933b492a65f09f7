//! Sprite lookup for effects
//!
//! Effects ask a [`ResourceProvider`] for a sprite by key and fall back to
//! flat circles when none is supplied. Providers are plain lookups with no
//! hidden caches; build the sprites once and share them through `Arc`.

use std::sync::Arc;

use crate::image::{Image, Rgba};

/// Effect sprites a provider may supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Bright radial glow (fireball, mini explosions, sparks)
    Glow,
    /// Soft wide puff (smoke)
    Puff,
}

/// Key → sprite lookup injected into the sequencer
pub trait ResourceProvider {
    fn sprite(&self, key: SpriteKey) -> Option<Arc<Image>>;
}

/// Provider with no sprites; everything draws as flat circles
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl ResourceProvider for NoSprites {
    fn sprite(&self, _key: SpriteKey) -> Option<Arc<Image>> {
        None
    }
}

impl<F> ResourceProvider for F
where
    F: Fn(SpriteKey) -> Option<Arc<Image>>,
{
    fn sprite(&self, key: SpriteKey) -> Option<Arc<Image>> {
        self(key)
    }
}

/// Procedurally generated white radial sprites, tinted at draw time
#[derive(Debug, Clone)]
pub struct GlowSprites {
    glow: Arc<Image>,
    puff: Arc<Image>,
}

impl GlowSprites {
    /// Sprites of `size` x `size` pixels
    pub fn new(size: u32) -> Self {
        Self {
            glow: Arc::new(radial(size, 2.0)),
            puff: Arc::new(radial(size, 0.6)),
        }
    }
}

impl Default for GlowSprites {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ResourceProvider for GlowSprites {
    fn sprite(&self, key: SpriteKey) -> Option<Arc<Image>> {
        Some(match key {
            SpriteKey::Glow => Arc::clone(&self.glow),
            SpriteKey::Puff => Arc::clone(&self.puff),
        })
    }
}

/// White disc whose alpha falls off as `(1 - r)^falloff`
fn radial(size: u32, falloff: f32) -> Image {
    let mut image = Image::new(size, size);
    let half = size as f32 * 0.5;
    if half <= 0.0 {
        return image;
    }
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let r = (dx * dx + dy * dy).sqrt() / half;
            if r < 1.0 {
                let a = (1.0 - r).powf(falloff);
                image.set(x, y, Rgba::new(255, 255, 255, (a * 255.0) as u8));
            }
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_glow_falls_off_from_center() {
        let sprites = GlowSprites::new(32);
        let glow = sprites.sprite(SpriteKey::Glow).unwrap();
        assert_eq!(glow.width(), 32);
        let center = glow.get(16, 16).a;
        let edge = glow.get(30, 16).a;
        assert!(center > 200);
        assert!(edge < center);
        assert_eq!(glow.get(0, 0).a, 0);
        // The puff stays brighter toward its rim
        let puff = sprites.sprite(SpriteKey::Puff).unwrap();
        assert!(puff.get(28, 16).a > glow.get(28, 16).a);
    }

    #[test]
    fn test_closure_provider() {
        let dot = Arc::new(Image::filled(1, 1, Rgba::WHITE));
        let mut map = HashMap::new();
        map.insert(SpriteKey::Puff, dot);
        let provider = move |key: SpriteKey| map.get(&key).cloned();
        assert!(provider.sprite(SpriteKey::Puff).is_some());
        assert!(provider.sprite(SpriteKey::Glow).is_none());
        assert!(NoSprites.sprite(SpriteKey::Glow).is_none());
    }
}
