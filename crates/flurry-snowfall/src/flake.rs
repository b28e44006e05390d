//! A single falling snowflake.

use flurry_core::{Particle, ParticleConfig, Point, Rgb, Surface, Vector2};
use rand::Rng;

use crate::random::percent;
use crate::settings::FlakeSettings;

/// How a flake looks when drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualProfile {
    /// Circle radius in pixels.
    pub size: f32,
    pub color: Rgb,
}

/// A particle with a fixed depth that drives its size, speed and jitter.
#[derive(Debug, Clone)]
pub struct Flake {
    particle: Particle,
    depth: f32,
    profile: VisualProfile,
    /// Jitter amplitude, already scaled by depth.
    jitter: Vector2,
}

impl Flake {
    /// Create a flake at `position` with a random depth.
    pub fn spawn<R: Rng + ?Sized>(
        position: Point,
        settings: &FlakeSettings,
        fps: f32,
        rng: &mut R,
    ) -> Self {
        let depth = percent(rng, 0, 100);
        let size_noise = percent(rng, -100, 100);
        Self::with_depth(position, settings, fps, depth, size_noise)
    }

    /// Create a flake with an explicit depth and size noise factor in `[-1, 1]`.
    pub fn with_depth(
        position: Point,
        settings: &FlakeSettings,
        fps: f32,
        depth: f32,
        size_noise: f32,
    ) -> Self {
        let depth = depth.clamp(0.0, 1.0);
        let fps = if fps > 0.0 { fps } else { 60.0 };

        let speed = settings.min_speed + depth * (settings.max_speed - settings.min_speed);
        let initial_velocity = Vector2::new(0.0, speed / fps);
        let mass = ParticleConfig::deduce_mass(initial_velocity, settings.friction);

        let base_size = settings.min_size + depth * (settings.max_size - settings.min_size);
        let size = base_size * (1.0 + settings.size_noise * size_noise.clamp(-1.0, 1.0));

        Self {
            particle: Particle::new(
                position,
                ParticleConfig {
                    mass,
                    friction: settings.friction,
                    initial_velocity,
                },
            ),
            depth,
            profile: VisualProfile {
                size,
                color: settings.color,
            },
            jitter: Vector2::new(settings.noise_x * depth, settings.noise_y * depth),
        }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn size(&self) -> f32 {
        self.profile.size
    }

    pub fn profile(&self) -> VisualProfile {
        self.profile
    }

    pub fn position(&self) -> Point {
        self.particle.position()
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }

    /// Integrate one step, then jitter the position.
    ///
    /// Jitter is a position offset, not a force, so it never feeds back into
    /// velocity.
    pub fn evolve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.particle.integrate();
        let offset = Vector2::new(
            percent(rng, -100, 100) * self.jitter.x,
            percent(rng, -100, 100) * self.jitter.y,
        );
        self.particle.nudge(offset);
    }

    /// Draw as a filled circle.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position(), self.profile.size, self.profile.color);
    }
}

impl AsMut<Particle> for Flake {
    fn as_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }
}
