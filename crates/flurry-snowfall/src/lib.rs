//! Snowfall particle simulation.
//!
//! Flakes fall under gravity and friction with a little positional jitter.
//! An optional pointer interaction paints pointer motion into a force field
//! that pushes nearby flakes for one frame. The [`Snowfall`] controller owns
//! the flake population and runs against host-provided capabilities from
//! `flurry-core`.

mod caster;
mod field;
mod flake;
mod interaction;
mod pointer;
mod random;
mod settings;
mod simulation;
mod throttle;

pub use caster::{CAST_FORCE, FlakeCaster};
pub use field::{ForceField, MAX_FIELD_DIMENSION};
pub use flake::{Flake, VisualProfile};
pub use interaction::PointerInteraction;
pub use pointer::{PointerEvent, PointerTracker};
pub use settings::{CastSettings, FlakeSettings, MAX_FLAKES_PER_FRAME, SnowfallSettings};
pub use simulation::{FrameReport, Lifecycle, Snowfall};
pub use throttle::{RateLimiter, Throttle};
