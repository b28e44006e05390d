//! Optional pointer interaction plugged into the simulation.

use flurry_core::{Point, Vector2};

use crate::flake::Flake;

/// A module that turns pointer motion into forces on flakes.
///
/// Whatever it asserts on a flake it must retract itself when it has
/// nothing to assert.
pub trait PointerInteraction {
    /// Resize internal state for a new surface size, dropping pending forces.
    fn reset(&mut self, width: u32, height: u32);

    /// Apply pending forces to `flakes` and clear them. Called once per frame
    /// before the flakes are integrated.
    fn apply_to(&mut self, flakes: &mut [Flake]);

    /// Record one rate-limited pointer sample with non-zero velocity.
    fn on_pointer_sample(&mut self, position: Point, velocity: Vector2);

    /// Drop pending forces and retract any force still held by `flakes`.
    fn release(&mut self, flakes: &mut [Flake]);
}
