//! Pointer tracking and attraction
//!
//! The pointer only pulls particles while it is moving. Each move pushes a
//! quiet deadline forward (latest wins); once the deadline passes with no
//! further movement the pointer goes inactive.

use glam::Vec2;

/// Last pointer position plus its quiet deadline
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    pos: Vec2,
    /// Host timestamp (ms) at which the pointer stops counting as active
    active_until: Option<f64>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move at `now_ms` and restart the quiet window
    pub fn moved(&mut self, pos: Vec2, now_ms: f64, quiet_ms: f64) {
        self.pos = pos;
        self.active_until = Some(now_ms + quiet_ms);
    }

    /// Whether a move happened within the quiet window before `now_ms`
    pub fn is_active(&self, now_ms: f64) -> bool {
        self.active_until.is_some_and(|until| now_ms < until)
    }

    /// Position, if the pointer is active at `now_ms`
    pub fn active_position(&self, now_ms: f64) -> Option<Vec2> {
        self.is_active(now_ms).then_some(self.pos)
    }

    /// Last recorded position, active or not
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Forget any pending activity
    pub fn reset(&mut self) {
        self.active_until = None;
    }
}

/// Velocity impulse pulling a particle at `pos` toward `target`
///
/// Zero outside `radius`; grows linearly to `radius * scale` as the distance
/// shrinks to zero.
pub fn attraction_impulse(pos: Vec2, target: Vec2, radius: f32, scale: f32) -> Vec2 {
    let delta = target - pos;
    let distance = delta.length();
    if distance >= radius {
        return Vec2::ZERO;
    }

    let angle = delta.y.atan2(delta.x);
    Vec2::from_angle(angle) * ((radius - distance) * scale)
}
