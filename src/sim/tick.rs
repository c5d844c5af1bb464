//! Per-frame step
//!
//! Moves, draws, links and steers every particle once. There is no fixed
//! timestep: one call per animation frame, velocities are in px/frame.

use glam::Vec2;

use super::pointer::attraction_impulse;
use super::state::FieldState;
use crate::renderer::{Surface, colors};
use crate::wrap_coord;

/// What a frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub circles: usize,
    pub links: usize,
    /// Whether the pointer was pulling particles this frame
    pub pointer_active: bool,
}

/// Opacity of the line joining two particles `distance` apart
///
/// `None` at or beyond `link_distance`.
#[inline]
pub fn link_opacity(distance: f32, link_distance: f32, max_opacity: f32) -> Option<f32> {
    (distance < link_distance).then(|| (link_distance - distance) / link_distance * max_opacity)
}

/// Advance the field by one frame and draw it to `surface`
///
/// `now_ms` is the host timestamp, used only to decide whether the pointer
/// is still active.
pub fn tick<S: Surface + ?Sized>(state: &mut FieldState, surface: &mut S, now_ms: f64) -> FrameStats {
    let extent = state.extent();
    surface.clear(extent.x, extent.y);
    state.frame_ticks += 1;

    let FieldState {
        settings,
        particles,
        pointer,
        ..
    } = state;
    let target = pointer.active_position(now_ms);
    let mut stats = FrameStats {
        pointer_active: target.is_some(),
        ..Default::default()
    };

    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let particle = &mut head[i];

        particle.pos += particle.vel;
        particle.pos = Vec2::new(
            wrap_coord(particle.pos.x, extent.x),
            wrap_coord(particle.pos.y, extent.y),
        );

        surface.fill_circle(particle.pos, particle.size(), particle.color());
        stats.circles += 1;

        // Later particles haven't moved yet this frame
        for other in tail.iter() {
            let distance = particle.pos.distance(other.pos);
            if let Some(opacity) =
                link_opacity(distance, settings.link_distance, settings.link_max_opacity)
            {
                surface.stroke_line(
                    particle.pos,
                    other.pos,
                    colors::LINK.with_alpha(opacity),
                    settings.link_width,
                );
                stats.links += 1;
            }
        }

        if let Some(target) = target {
            particle.vel += attraction_impulse(
                particle.pos,
                target,
                settings.pointer_radius,
                settings.pointer_force_scale,
            );
        }

        particle.vel *= settings.friction;
        if let Some(cap) = settings.max_speed {
            particle.vel = particle.vel.clamp_length_max(cap);
        }
    }

    stats
}
