//! Particle model
//!
//! Size and color are fixed at spawn; position and velocity change every
//! frame.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::renderer::Rgba;
use crate::settings::{DEFAULT_PALETTE, FieldSettings};

/// A single point in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    size: f32,
    color: Rgba,
}

impl Particle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: f32, color: Rgba) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            color,
        }
    }

    /// Spawn with randomized attributes inside a `width` x `height` surface
    ///
    /// Both extents must be positive.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        rng: &mut R,
        width: f32,
        height: f32,
        settings: &FieldSettings,
    ) -> Self {
        let pos = Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
        let max = settings.max_start_speed;
        let vel = Vec2::new(rng.random_range(-max..=max), rng.random_range(-max..=max));
        let size = rng.random_range(settings.min_size..settings.max_size);
        let color = settings
            .palette
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_PALETTE[0]);

        Self::new(id, pos, vel, size, color)
    }

    /// Radius
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Current speed (px/frame)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_ranges() {
        let settings = FieldSettings::default();
        let mut rng = Pcg32::seed_from_u64(7);

        for id in 0..500 {
            let p = Particle::spawn(id, &mut rng, 640.0, 480.0, &settings);
            assert!(p.pos.x >= 0.0 && p.pos.x < 640.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 480.0);
            assert!(p.size() >= 1.0 && p.size() < 3.0);
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
            assert!(settings.palette.contains(&p.color()));
        }
    }

    #[test]
    fn test_spawn_uses_whole_palette() {
        let settings = FieldSettings::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 5];

        for id in 0..200 {
            let p = Particle::spawn(id, &mut rng, 100.0, 100.0, &settings);
            let idx = settings.palette.iter().position(|c| *c == p.color()).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
