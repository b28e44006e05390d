//! Point-mass integrator with named forces.
//!
//! Forces fall into two categories. Frame-local forces (weight and friction)
//! are recomputed on every integration step and never survive it. External
//! forces are asserted by another component (a force field, for example) and
//! stay on the particle until that component retracts them.

use std::collections::BTreeMap;

use crate::vector::{Point, Vector2};

/// Name of a force acting on a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ForceName {
    /// Gravity, `(0, mass)`. Frame-local.
    Weight,
    /// Velocity-proportional deceleration. Frame-local.
    Friction,
    /// A force asserted by an outside source until it is retracted.
    External(&'static str),
}

impl ForceName {
    /// Whether this force is recomputed on every integration step.
    pub fn is_frame_local(self) -> bool {
        matches!(self, ForceName::Weight | ForceName::Friction)
    }
}

/// Physical parameters for a new particle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticleConfig {
    /// Mass, applied as a downward force each step.
    pub mass: f32,
    /// Friction coefficient.
    pub friction: f32,
    /// Velocity at creation.
    pub initial_velocity: Vector2,
}

impl ParticleConfig {
    /// Mass that makes `target_velocity` the terminal velocity under `friction`.
    pub fn deduce_mass(target_velocity: Vector2, friction: f32) -> f32 {
        target_velocity.y * friction
    }
}

/// A point mass with accumulated named forces.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Point,
    mass: f32,
    friction: f32,
    velocity: Vector2,
    forces: BTreeMap<ForceName, Vector2>,
}

impl Particle {
    pub fn new(position: Point, config: ParticleConfig) -> Self {
        Self {
            position,
            mass: config.mass.max(0.0),
            friction: config.friction.max(0.0),
            velocity: config.initial_velocity,
            forces: BTreeMap::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Offset the position without touching velocity or forces.
    pub fn nudge(&mut self, offset: Vector2) {
        self.position += offset;
    }

    /// Assert an external force under `name`, replacing any previous value.
    pub fn set_external_force(&mut self, name: &'static str, force: Vector2) {
        self.forces.insert(ForceName::External(name), force);
    }

    /// Retract the external force under `name`, if any.
    pub fn retract_external_force(&mut self, name: &'static str) -> Option<Vector2> {
        self.forces.remove(&ForceName::External(name))
    }

    /// Current value of the external force under `name`.
    pub fn external_force(&self, name: &'static str) -> Option<Vector2> {
        self.forces.get(&ForceName::External(name)).copied()
    }

    /// Whether a force with this name is currently stored.
    pub fn has_force(&self, name: ForceName) -> bool {
        self.forces.contains_key(&name)
    }

    /// All forces currently stored.
    pub fn forces(&self) -> impl Iterator<Item = (ForceName, Vector2)> + '_ {
        self.forces.iter().map(|(name, force)| (*name, *force))
    }

    /// Advance one step.
    ///
    /// Weight and friction are computed from the current velocity and stored,
    /// every stored force is summed into the acceleration, then the frame-local
    /// entries are dropped before velocity and position are updated.
    pub fn integrate(&mut self) {
        self.forces.insert(ForceName::Weight, Vector2::new(0.0, self.mass));
        self.forces.insert(ForceName::Friction, -self.velocity * self.friction);

        let acceleration: Vector2 = self.forces.values().sum();

        self.forces.retain(|name, _| !name.is_frame_local());

        self.velocity += acceleration;
        self.position += self.velocity;
    }
}

impl AsMut<Particle> for Particle {
    fn as_mut(&mut self) -> &mut Particle {
        self
    }
}
