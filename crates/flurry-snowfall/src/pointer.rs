//! Pointer input samples and velocity tracking.

use flurry_core::{Point, Vector2};

/// A pointer-related input event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse or pen moved.
    Move { x: f32, y: f32 },
    /// Touch contacts moved. Only the first contact is used.
    Touch { touches: Vec<Point> },
    /// Anything else the host forwards; ignored.
    Other,
}

impl PointerEvent {
    /// Position this event reports, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Move { x, y } => Some(Point::new(*x, *y)),
            PointerEvent::Touch { touches } => touches.first().copied(),
            PointerEvent::Other => None,
        }
    }
}

/// Current and previous pointer positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    current: Point,
    previous: Point,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the current position to previous and record `position`.
    pub fn record(&mut self, position: Point) {
        self.previous = self.current;
        self.current = position;
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn previous(&self) -> Point {
        self.previous
    }

    /// Displacement between the last two samples.
    pub fn velocity(&self) -> Vector2 {
        self.current - self.previous
    }
}
