//! Particle simulation
//!
//! Pure simulation and draw logic, independent of the browser:
//! - `particle`: particle model and randomized spawn
//! - `pointer`: pointer debounce and attraction force
//! - `state`: particle collection bound to the surface size
//! - `tick`: per-frame update + render

pub mod particle;
pub mod pointer;
pub mod state;
pub mod tick;

pub use particle::Particle;
pub use pointer::{Pointer, attraction_impulse};
pub use state::FieldState;
pub use tick::{FrameStats, link_opacity, tick};
