//! Particle Field - animated network background for the portfolio site
//!
//! Core modules:
//! - `sim`: Particle model, pointer tracking and the per-frame update step
//! - `renderer`: 2D drawing surface abstraction
//! - `platform`: Host abstraction (viewport, listeners, frame scheduling)
//! - `engine`: Attach/detach lifecycle driving the simulation
//! - `settings`: Tunable constants

pub mod engine;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, EnginePhase};
pub use error::{FieldError, Result};
pub use settings::FieldSettings;

#[cfg(target_arch = "wasm32")]
pub use platform::web::ParticleBackground;

/// Default tuning constants (see `FieldSettings` for the runtime copy)
pub mod consts {
    /// Surface area (px²) granted to each particle
    pub const AREA_PER_PARTICLE: f32 = 9000.0;
    /// Hard cap on particle count regardless of surface size
    pub const MAX_PARTICLES: usize = 100;

    /// Particle radius range [min, max)
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_MAX_SIZE: f32 = 3.0;
    /// Initial velocity components are drawn from [-MAX, MAX]
    pub const PARTICLE_MAX_START_SPEED: f32 = 0.25;

    /// Pairs closer than this get a connecting line (px)
    pub const LINK_DISTANCE: f32 = 120.0;
    /// Opacity of a line between coincident particles
    pub const LINK_MAX_OPACITY: f32 = 0.2;
    pub const LINK_WIDTH: f32 = 0.5;

    /// Pointer attraction radius (px)
    pub const POINTER_RADIUS: f32 = 100.0;
    /// Impulse = (radius - distance) * scale
    pub const POINTER_FORCE_SCALE: f32 = 1.0 / 1000.0;
    /// Pointer counts as moving for this long after the last event (ms)
    pub const POINTER_QUIET_MS: f64 = 100.0;

    /// Per-frame velocity multiplier
    pub const FRICTION: f32 = 0.99;

    /// Overall canvas opacity applied by the host page
    pub const CANVAS_OPACITY: f32 = 0.6;
}

/// Particle count for a `width` x `height` surface
#[inline]
pub fn particle_count(width: u32, height: u32, area_per_particle: f32, max: usize) -> usize {
    let area = width as f64 * height as f64;
    let count = (area / area_per_particle as f64).floor() as usize;
    count.min(max)
}

/// Wrap a coordinate toroidally into [0, extent)
///
/// Past the far edge resets to 0, below 0 resets to the far edge (pulled in
/// to the largest float below it so the half-open range holds).
#[inline]
pub fn wrap_coord(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 || v >= extent {
        0.0
    } else if v < 0.0 {
        below(extent)
    } else {
        v
    }
}

/// Largest f32 strictly below a positive finite `x`
#[inline]
fn below(x: f32) -> f32 {
    f32::from_bits(x.to_bits() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_caps_at_max() {
        assert_eq!(particle_count(1920, 1080, 9000.0, 100), 100);
        assert_eq!(particle_count(300, 300, 9000.0, 100), 10);
        assert_eq!(particle_count(100, 89, 9000.0, 100), 0);
        assert_eq!(particle_count(0, 1080, 9000.0, 100), 0);
    }

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(50.0, 100.0), 50.0);
        assert_eq!(wrap_coord(100.0, 100.0), 0.0);
        assert_eq!(wrap_coord(100.05, 100.0), 0.0);
        let w = wrap_coord(-0.1, 100.0);
        assert!(w < 100.0 && w > 99.99);
        assert_eq!(wrap_coord(5.0, 0.0), 0.0);
    }
}
