use std::time::{Duration, Instant};

use flurry_core::{FrameHandle, FrameScheduler};

/// Frame scheduler driven by the event loop.
///
/// At most one frame is outstanding. The loop waits on terminal events until
/// [`time_until_due`](Self::time_until_due) runs out, then fires the frame
/// returned by [`take_due`](Self::take_due).
#[derive(Debug)]
pub struct FrameTicker {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl FrameTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending frame is due, if any frame is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let (_, due) = self.pending?;
        Some(due.saturating_duration_since(now))
    }

    /// Consume the pending frame if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, due)) if due <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn schedule_at(&mut self, now: Instant) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, now + self.interval));
        handle
    }
}

impl FrameScheduler for FrameTicker {
    fn request_frame(&mut self) -> FrameHandle {
        self.schedule_at(Instant::now())
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.is_some_and(|(pending, _)| pending == handle) {
            self.pending = None;
        }
    }
}
