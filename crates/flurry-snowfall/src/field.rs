//! Spatial grid of transient forces.

use flurry_core::{Particle, Vector2, grid_cell};
use tracing::warn;

/// Largest width or height a force field will allocate.
pub const MAX_FIELD_DIMENSION: u32 = 4096;

/// A `width × height` grid of optional force vectors, one cell per pixel.
///
/// Forces written into the grid are applied to particles once by
/// [`ForceField::apply_field`] and then cleared.
#[derive(Debug, Clone)]
pub struct ForceField {
    name: &'static str,
    width: usize,
    height: usize,
    /// Column-major: cell `(i, j)` lives at `i * height + j`.
    cells: Vec<Option<Vector2>>,
    is_empty: bool,
}

impl ForceField {
    /// Create a field whose forces are applied to particles under `name`.
    pub fn new(name: &'static str, width: u32, height: u32) -> Self {
        let mut field = Self {
            name,
            width: 0,
            height: 0,
            cells: Vec::new(),
            is_empty: true,
        };
        field.reset(width, height);
        field
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when no cell holds a force.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Reallocate the grid for a new surface size and clear it.
    ///
    /// Dimensions above [`MAX_FIELD_DIMENSION`] are clamped.
    pub fn reset(&mut self, width: u32, height: u32) {
        if width > MAX_FIELD_DIMENSION || height > MAX_FIELD_DIMENSION {
            warn!(
                field = self.name,
                width,
                height,
                "force field size exceeds {}, clamping",
                MAX_FIELD_DIMENSION
            );
        }
        self.width = width.min(MAX_FIELD_DIMENSION) as usize;
        self.height = height.min(MAX_FIELD_DIMENSION) as usize;
        self.cells = vec![None; self.width * self.height];
        self.is_empty = true;
    }

    /// Remove every force while keeping the current dimensions.
    pub fn clear(&mut self) {
        if !self.is_empty {
            self.cells.fill(None);
            self.is_empty = true;
        }
    }

    fn index(&self, i: i64, j: i64) -> Option<usize> {
        let (i, j) = (usize::try_from(i).ok()?, usize::try_from(j).ok()?);
        (i < self.width && j < self.height).then(|| i * self.height + j)
    }

    /// Force stored at cell `(i, j)`. Out-of-range cells are absent.
    pub fn get_force_at(&self, i: i64, j: i64) -> Option<Vector2> {
        if self.is_empty {
            return None;
        }
        self.index(i, j).and_then(|idx| self.cells[idx])
    }

    /// Store `force` at cell `(i, j)`, replacing any previous value.
    ///
    /// Out-of-range cells and non-finite forces are ignored. Returns whether
    /// the force was stored.
    pub fn set_force_at(&mut self, i: i64, j: i64, force: Vector2) -> bool {
        let Some(idx) = self.index(i, j) else {
            return false;
        };
        if !force.is_finite() {
            warn!(field = self.name, i, j, ?force, "ignoring non-finite force");
            return false;
        }
        self.cells[idx] = Some(force);
        self.is_empty = false;
        true
    }

    /// Assert each particle's cell force under this field's name, then clear.
    ///
    /// Particles on an empty cell have the force retracted, so a force set in
    /// an earlier frame never lingers. The pass runs even when the whole field
    /// is empty.
    pub fn apply_field<P: AsMut<Particle>>(&mut self, particles: &mut [P]) {
        for particle in particles.iter_mut() {
            let particle = particle.as_mut();
            let (i, j) = grid_cell(particle.position());
            match self.get_force_at(i, j) {
                Some(force) => particle.set_external_force(self.name, force),
                None => {
                    particle.retract_external_force(self.name);
                }
            }
        }
        self.clear();
    }

    /// Retract this field's force from every particle without applying anything.
    pub fn release<P: AsMut<Particle>>(&mut self, particles: &mut [P]) {
        self.clear();
        for particle in particles.iter_mut() {
            particle.as_mut().retract_external_force(self.name);
        }
    }
}
