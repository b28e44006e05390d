//! Capabilities a host provides to a running animation.

use crate::color::Rgb;
use crate::vector::Point;

/// A 2D drawing target addressed in pixels, `y` growing downward.
pub trait Surface {
    /// Whether the surface can still be drawn to.
    fn is_usable(&self) -> bool;

    /// Resize the drawable area.
    fn set_size(&mut self, width: u32, height: u32);

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);

    /// Clear the region `(0, 0)..(width, height)`.
    fn clear(&mut self, width: u32, height: u32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb);
}

/// Identifies a requested frame so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Schedules the next animation frame in step with the display refresh.
///
/// The host calls back into the animation when a requested frame is due.
pub trait FrameScheduler {
    /// Request a frame before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Source of the current display area size, in pixels.
pub trait Viewport {
    fn size(&self) -> (u32, u32);
}
