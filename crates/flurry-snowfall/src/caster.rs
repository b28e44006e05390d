//! Pointer-driven force field.

use flurry_core::{Point, Vector2};

use crate::field::ForceField;
use crate::flake::Flake;
use crate::interaction::PointerInteraction;
use crate::settings::CastSettings;

/// Name under which cast forces are asserted on particles.
pub const CAST_FORCE: &str = "cast";

/// Paints pointer motion into a [`ForceField`] with a linear radial falloff.
#[derive(Debug, Clone)]
pub struct FlakeCaster {
    field: ForceField,
    settings: CastSettings,
    radius: f32,
}

impl FlakeCaster {
    pub fn new(settings: &CastSettings) -> Self {
        Self {
            field: ForceField::new(CAST_FORCE, 0, 0),
            settings: settings.clone(),
            radius: 0.0,
        }
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ForceField {
        &mut self.field
    }

    /// Influence radius for the current surface size.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Add `force` scaled by `settings.force * (1 - d / radius)` to every cell
    /// closer than `radius` to `origin`.
    ///
    /// Contributions accumulate with whatever the cells already hold. A
    /// non-positive radius does nothing.
    pub fn calculate_field(&mut self, origin: Point, force: Vector2, radius: f32) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }

        let boundary = radius.ceil();
        let i_min = (origin.x - boundary).floor().max(0.0) as i64;
        let i_max = ((origin.x + boundary).ceil() as i64).min(self.field.width() as i64);
        let j_min = (origin.y - boundary).floor().max(0.0) as i64;
        let j_max = ((origin.y + boundary).ceil() as i64).min(self.field.height() as i64);

        for i in i_min..i_max {
            for j in j_min..j_max {
                let distance = origin.distance(Point::new(i as f32, j as f32));
                if distance >= radius {
                    continue;
                }
                let intensity = (self.settings.force * (1.0 - distance / radius)).max(0.0);
                let existing = self.field.get_force_at(i, j).unwrap_or_default();
                self.field.set_force_at(i, j, existing + force * intensity);
            }
        }
    }
}

impl PointerInteraction for FlakeCaster {
    fn reset(&mut self, width: u32, height: u32) {
        self.radius = self.settings.radius_for(width, height);
        self.field.reset(width, height);
    }

    fn apply_to(&mut self, flakes: &mut [Flake]) {
        self.field.apply_field(flakes);
    }

    fn on_pointer_sample(&mut self, position: Point, velocity: Vector2) {
        self.calculate_field(position, velocity, self.radius);
    }

    fn release(&mut self, flakes: &mut [Flake]) {
        self.field.release(flakes);
    }
}
