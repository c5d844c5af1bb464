//! Platform abstraction layer
//!
//! The engine talks to its environment through `Host`:
//! - Viewport size and the drawing surface
//! - Resize / pointer-move listener registration
//! - Animation-frame scheduling and cancellation
//!
//! `web` implements it on top of the browser window and a canvas;
//! `headless` drives the engine by hand for the native binary and tests.

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessHost;

use crate::renderer::Surface;

/// Handle of a pending animation-frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The environment an `Engine` runs in
pub trait Host {
    type Surface: Surface;

    /// Current viewport size in pixels
    fn viewport_size(&self) -> (u32, u32);

    /// The drawing surface, or `None` if it can't be drawn to
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Resize the drawing surface's backing store
    fn resize_surface(&mut self, width: u32, height: u32);

    /// Start delivering resize and pointer-move events to the engine
    fn add_listeners(&mut self);

    /// Stop delivering events. Must tolerate being called with nothing
    /// registered.
    fn remove_listeners(&mut self);

    /// Ask for the engine's `frame` to run at the next paint opportunity
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a pending frame request
    fn cancel_frame(&mut self, frame: FrameHandle);
}
