//! Field state
//!
//! The particle collection bound to the current surface size. The collection
//! is rebuilt from scratch whenever the size changes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::Particle;
use super::pointer::Pointer;
use crate::error::Result;
use crate::particle_count;
use crate::settings::FieldSettings;

/// Everything the per-frame step reads and writes
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Validated on construction; `tick` reads it directly
    pub(super) settings: FieldSettings,
    /// Surface size in pixels
    width: u32,
    height: u32,
    /// Particles in draw order (links go from each particle to later ones)
    pub particles: Vec<Particle>,
    pub pointer: Pointer,
    /// Frames stepped since the last rebuild
    pub frame_ticks: u64,
    rng: Pcg32,
    /// Next particle ID; never reused across rebuilds
    next_id: u32,
}

impl FieldState {
    /// Empty field (0x0) with the given settings and RNG seed
    ///
    /// Fails if the settings don't validate, since spawning samples from the
    /// configured ranges.
    pub fn new(settings: FieldSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            width: 0,
            height: 0,
            particles: Vec::new(),
            pointer: Pointer::new(),
            frame_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface size as floats
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Adopt a new surface size and rebuild every particle
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.populate();
    }

    /// Discard all particles and spawn a fresh set for the current size
    pub fn populate(&mut self) {
        let count = particle_count(
            self.width,
            self.height,
            self.settings.area_per_particle,
            self.settings.max_particles,
        );
        let extent = self.extent();

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let id = self.next_entity_id();
            let particle = Particle::spawn(id, &mut self.rng, extent.x, extent.y, &self.settings);
            self.particles.push(particle);
        }
        self.frame_ticks = 0;

        log::debug!(
            "Populated {} particles for {}x{} surface",
            count,
            self.width,
            self.height
        );
    }

    /// Record a pointer move at host time `now_ms`
    pub fn pointer_moved(&mut self, pos: Vec2, now_ms: f64) {
        self.pointer.moved(pos, now_ms, self.settings.pointer_quiet_ms);
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    #[test]
    fn test_new_field_is_empty() {
        let state = FieldState::new(FieldSettings::default(), 1).unwrap();
        assert!(state.particles.is_empty());
        assert_eq!((state.width(), state.height()), (0, 0));
    }

    #[test]
    fn test_resize_populates_by_area() {
        let mut state = FieldState::new(FieldSettings::default(), 1).unwrap();
        state.resize(600, 300);
        assert_eq!(state.particles.len(), 20);

        state.resize(1920, 1080);
        assert_eq!(state.particles.len(), 100);

        state.resize(0, 1080);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_resize_replaces_every_particle() {
        let mut state = FieldState::new(FieldSettings::default(), 3).unwrap();
        state.resize(800, 600);
        let old_ids: Vec<u32> = state.particles.iter().map(|p| p.id).collect();

        state.resize(800, 600);
        assert_eq!(state.particles.len(), old_ids.len());
        assert!(state.particles.iter().all(|p| !old_ids.contains(&p.id)));
    }

    #[test]
    fn test_respects_max_particles_setting() {
        let settings = FieldSettings {
            max_particles: 12,
            ..Default::default()
        };
        let mut state = FieldState::new(settings, 1).unwrap();
        state.resize(1920, 1080);
        assert_eq!(state.particles.len(), 12);
    }

    #[test]
    fn test_rejects_empty_size_range() {
        let settings = FieldSettings {
            min_size: 3.0,
            max_size: 3.0,
            ..Default::default()
        };
        let err = FieldState::new(settings, 1).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSetting { field: "min_size", .. }));
    }

    #[test]
    fn test_rejects_nan_size() {
        let settings = FieldSettings {
            max_size: f32::NAN,
            ..Default::default()
        };
        assert!(FieldState::new(settings, 1).is_err());
    }
}
