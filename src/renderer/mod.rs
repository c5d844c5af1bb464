//! 2D drawing surface abstraction
//!
//! The simulation only needs three primitives, so it draws through the
//! `Surface` trait: a Canvas 2D context in the browser, a recorder in tests
//! and headless runs.

pub mod color;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::{Rgba, colors};
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

/// A 2D drawing target in surface pixel space
pub trait Surface {
    /// Clear the `width` x `height` region anchored at the origin
    fn clear(&mut self, width: f32, height: f32);

    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a straight line
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
}
