//! 2D vector and point types.
//!
//! Both are `glam::Vec2`. The aliases only say which role a value plays.

pub use glam::Vec2;

/// A 2D displacement, velocity or force.
pub type Vector2 = Vec2;

/// A position on the drawing surface, in pixels. `y` grows downward.
pub type Point = Vec2;

/// Nearest integer grid cell for a surface position.
pub fn grid_cell(position: Point) -> (i64, i64) {
    let cell = position.round().as_i64vec2();
    (cell.x, cell.y)
}
