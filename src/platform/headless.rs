//! Headless host
//!
//! No window and no event loop: the caller decides when frames fire and
//! what the viewport is. Draws to a `RecordingSurface`.

use super::{FrameHandle, Host};
use crate::engine::Engine;
use crate::renderer::RecordingSurface;

/// Number of listeners a running engine registers (resize + pointer move)
const LISTENER_KINDS: usize = 2;

/// Manually driven host
#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: (u32, u32),
    surface: RecordingSurface,
    surface_size: (u32, u32),
    surface_unavailable: bool,
    listeners: usize,
    pending: Vec<FrameHandle>,
    next_frame: i32,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            next_frame: 1,
            ..Default::default()
        }
    }

    /// Change the viewport (call `Engine::handle_resize` afterwards)
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Simulate a surface that can't produce a drawing context
    pub fn set_surface_available(&mut self, available: bool) {
        self.surface_unavailable = !available;
    }

    /// Draw calls of the latest frame
    pub fn recording(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Size the surface was last resized to
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Consume the oldest pending frame request, as a browser would when
    /// it invokes the callback
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Host for HeadlessHost {
    type Surface = RecordingSurface;

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn surface(&mut self) -> Option<&mut RecordingSurface> {
        if self.surface_unavailable {
            None
        } else {
            Some(&mut self.surface)
        }
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
    }

    fn add_listeners(&mut self) {
        self.listeners = LISTENER_KINDS;
    }

    fn remove_listeners(&mut self) {
        self.listeners = 0;
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        self.pending.retain(|&h| h != frame);
    }
}

impl Engine<HeadlessHost> {
    /// Fire the pending frame callback, if any, at host time `now_ms`
    ///
    /// Returns whether a frame ran.
    pub fn step_headless(&mut self, now_ms: f64) -> bool {
        if self.host_mut().take_pending_frame().is_none() {
            return false;
        }
        self.frame(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_removes_pending() {
        let mut host = HeadlessHost::new(10, 10);
        let a = host.request_frame().unwrap();
        let b = host.request_frame().unwrap();
        assert_ne!(a, b);

        host.cancel_frame(a);
        assert_eq!(host.pending_frames(), 1);
        host.cancel_frame(a);
        assert_eq!(host.take_pending_frame(), Some(b));
        assert_eq!(host.take_pending_frame(), None);
    }

    #[test]
    fn test_remove_listeners_without_any() {
        let mut host = HeadlessHost::new(10, 10);
        host.remove_listeners();
        assert_eq!(host.listener_count(), 0);
    }
}
