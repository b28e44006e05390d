//! Core types for the flurry snowfall effect.
//!
//! Geometry primitives, the point-mass integrator, colors, and the host
//! capabilities (drawing surface, frame scheduling, viewport) that an
//! animation runs against.

mod color;
mod error;
mod particle;
mod surface;
mod vector;

pub use color::Rgb;
pub use error::{ColorParseError, InitError};
pub use particle::{ForceName, Particle, ParticleConfig};
pub use surface::{FrameHandle, FrameScheduler, Surface, Viewport};
pub use vector::{Point, Vec2, Vector2, grid_cell};
