//! Field settings
//!
//! Tunables for the background. Defaults reproduce the site's look; a JSON
//! override may be stored in LocalStorage to experiment without rebuilding.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{FieldError, Result};
use crate::renderer::Rgba;

/// Particle colors: purple/pink, all at 0.7 alpha
pub const DEFAULT_PALETTE: [Rgba; 5] = [
    Rgba::new(168, 85, 247, 0.7),
    Rgba::new(217, 70, 239, 0.7),
    Rgba::new(236, 72, 153, 0.7),
    Rgba::new(124, 58, 237, 0.7),
    Rgba::new(139, 92, 246, 0.7),
];

/// Field settings/tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    // === Population ===
    /// Surface area (px²) per particle
    pub area_per_particle: f32,
    /// Upper bound on particle count
    pub max_particles: usize,
    /// Radius range [min, max)
    pub min_size: f32,
    pub max_size: f32,
    /// Initial velocity component bound
    pub max_start_speed: f32,
    /// Colors particles are drawn from
    pub palette: Vec<Rgba>,

    // === Connections ===
    pub link_distance: f32,
    pub link_max_opacity: f32,
    pub link_width: f32,

    // === Pointer ===
    pub pointer_radius: f32,
    pub pointer_force_scale: f32,
    /// Quiet window after the last pointer move (ms)
    pub pointer_quiet_ms: f64,

    // === Motion ===
    /// Per-frame velocity multiplier, in (0, 1]
    pub friction: f32,
    /// Optional speed cap (px/frame). `None` leaves velocity unbounded.
    pub max_speed: Option<f32>,

    // === Host compositing ===
    /// Opacity the host applies to the whole canvas
    pub canvas_opacity: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            max_particles: MAX_PARTICLES,
            min_size: PARTICLE_MIN_SIZE,
            max_size: PARTICLE_MAX_SIZE,
            max_start_speed: PARTICLE_MAX_START_SPEED,
            palette: DEFAULT_PALETTE.to_vec(),

            link_distance: LINK_DISTANCE,
            link_max_opacity: LINK_MAX_OPACITY,
            link_width: LINK_WIDTH,

            pointer_radius: POINTER_RADIUS,
            pointer_force_scale: POINTER_FORCE_SCALE,
            pointer_quiet_ms: POINTER_QUIET_MS,

            friction: FRICTION,
            max_speed: None,

            canvas_opacity: CANVAS_OPACITY,
        }
    }
}

impl FieldSettings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> FieldError {
            FieldError::InvalidSetting {
                field,
                reason: reason.into(),
            }
        }

        if !(self.area_per_particle > 0.0) {
            return Err(invalid("area_per_particle", "must be positive"));
        }
        if !(self.min_size > 0.0 && self.min_size < self.max_size && self.max_size.is_finite()) {
            return Err(invalid("min_size", "need 0 < min_size < max_size < inf"));
        }
        if !(self.max_start_speed >= 0.0 && self.max_start_speed.is_finite()) {
            return Err(invalid("max_start_speed", "must be finite and non-negative"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette", "needs at least one color"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction", format!("{} not in (0, 1]", self.friction)));
        }
        if let Some(cap) = self.max_speed {
            if !(cap > 0.0) {
                return Err(invalid("max_speed", "must be positive when set"));
            }
        }
        if !(0.0..=1.0).contains(&self.canvas_opacity) {
            return Err(invalid("canvas_opacity", "must be within [0, 1]"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "particle_field_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded field settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored field settings: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = FieldSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.palette.len(), 5);
        assert_eq!(settings.max_speed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = FieldSettings::from_json(r#"{ "max_particles": 40, "max_speed": 3.0 }"#)
            .expect("valid json");
        assert_eq!(settings.max_particles, 40);
        assert_eq!(settings.max_speed, Some(3.0));
        assert_eq!(settings.link_distance, LINK_DISTANCE);
        assert_eq!(settings.friction, FRICTION);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = FieldSettings::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSetting { field: "friction", .. }));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = FieldSettings::from_json(r#"{ "palette": [] }"#).unwrap_err();
        assert!(matches!(err, FieldError::InvalidSetting { field: "palette", .. }));
    }

    #[test]
    fn test_rejects_non_finite_ranges() {
        let settings = FieldSettings {
            max_size: f32::INFINITY,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = FieldSettings {
            max_start_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(FieldError::InvalidSetting { field: "max_start_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FieldSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FieldError::SettingsJson(_)));
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = FieldSettings {
            max_speed: Some(2.5),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(FieldSettings::from_json(&json).unwrap(), settings);
    }
}
