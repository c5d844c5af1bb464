//! Engine lifecycle
//!
//! Binds a `FieldState` to a `Host`. Two phases: `Inactive` (no listeners,
//! no frame pending) and `Running` (listeners registered, exactly one frame
//! pending). Host callbacks that arrive while inactive are ignored.

use glam::Vec2;

use crate::error::Result;
use crate::platform::{FrameHandle, Host};
use crate::settings::FieldSettings;
use crate::sim::{FieldState, FrameStats, tick};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Not attached: nothing registered, nothing scheduled
    Inactive,
    /// Attached; `frame` is the pending animation-frame request, if the host
    /// accepted one
    Running { frame: Option<FrameHandle> },
}

/// The particle field engine
pub struct Engine<H: Host> {
    host: H,
    field: FieldState,
    phase: EnginePhase,
    last_stats: FrameStats,
}

impl<H: Host> Engine<H> {
    /// Build an inactive engine; fails on invalid settings
    pub fn new(host: H, settings: FieldSettings, seed: u64) -> Result<Self> {
        Ok(Self::with_field(host, FieldState::new(settings, seed)?))
    }

    /// Build an inactive engine around an already constructed field
    pub fn with_field(host: H, field: FieldState) -> Self {
        Self {
            host,
            field,
            phase: EnginePhase::Inactive,
            last_stats: FrameStats::default(),
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, EnginePhase::Running { .. })
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Stats from the most recent frame
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// Start running: size the surface, populate, listen, schedule a frame
    ///
    /// Returns whether the engine is running afterwards. Without a drawing
    /// surface nothing is set up and the engine stays inactive.
    pub fn attach(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Particle field already attached");
            return true;
        }
        if self.host.surface().is_none() {
            log::warn!("Drawing surface unavailable, particle field not started");
            return false;
        }

        self.fit_to_viewport();
        self.host.add_listeners();
        let frame = self.host.request_frame();
        self.phase = EnginePhase::Running { frame };

        log::info!(
            "Particle field attached ({}x{}, {} particles)",
            self.field.width(),
            self.field.height(),
            self.field.particles.len()
        );
        true
    }

    /// Stop running: drop listeners and cancel the pending frame
    ///
    /// No-op when already inactive.
    pub fn detach(&mut self) {
        let phase = std::mem::replace(&mut self.phase, EnginePhase::Inactive);
        if let EnginePhase::Running { frame } = phase {
            self.host.remove_listeners();
            if let Some(frame) = frame {
                self.host.cancel_frame(frame);
            }
            self.field.pointer.reset();
            log::info!("Particle field detached");
        }
    }

    /// Host viewport changed: resize the surface and rebuild all particles
    pub fn handle_resize(&mut self) {
        if !self.is_running() {
            return;
        }
        self.fit_to_viewport();
    }

    /// Pointer moved to viewport coordinates (`x`, `y`) at host time `now_ms`
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        if !self.is_running() {
            return;
        }
        self.field.pointer_moved(Vec2::new(x, y), now_ms);
    }

    /// Animation-frame callback: step, draw, then schedule the next frame
    pub fn frame(&mut self, now_ms: f64) {
        // A callback can still fire after a detach that raced it
        if !self.is_running() {
            return;
        }

        if let Some(surface) = self.host.surface() {
            self.last_stats = tick(&mut self.field, surface, now_ms);
        }

        let frame = self.host.request_frame();
        if frame.is_none() {
            log::warn!("Host refused to schedule the next frame");
        }
        self.phase = EnginePhase::Running { frame };
    }

    fn fit_to_viewport(&mut self) {
        let (width, height) = self.host.viewport_size();
        self.host.resize_surface(width, height);
        self.field.resize(width, height);
    }
}
