//! Error types shared across flurry crates.

use thiserror::Error;

/// Reasons a simulation can fail to initialize.
///
/// Callers must not start a simulation whose initialization failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("no drawing surface was provided")]
    SurfaceMissing,

    #[error("the drawing surface is not usable")]
    SurfaceUnusable,

    #[error("pointer interaction requires a rate limiter")]
    RateLimiterMissing,
}

/// A color string that is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);
