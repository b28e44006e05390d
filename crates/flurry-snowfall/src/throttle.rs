//! Rate limiting for input samples.

use std::time::{Duration, Instant};

/// Lets through at most one item per interval.
pub trait RateLimiter<T> {
    /// Offer an item that arrived at `now`. Returns it if it should be
    /// processed right away; otherwise the limiter may hold it back.
    fn offer(&mut self, now: Instant, item: T) -> Option<T>;

    /// Release a held-back item once its interval has elapsed.
    fn poll(&mut self, now: Instant) -> Option<T>;

    /// Drop any held-back item.
    fn cancel(&mut self);
}

/// Leading and trailing edge throttle.
///
/// The first item after a quiet period passes immediately. Items arriving
/// within the interval replace a single pending item, which [`poll`] releases
/// when the interval is up.
///
/// [`poll`]: RateLimiter::poll
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}

impl<T> RateLimiter<T> for Throttle<T> {
    fn offer(&mut self, now: Instant, item: T) -> Option<T> {
        if self.ready(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(item)
        } else {
            self.pending = Some(item);
            None
        }
    }

    fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}
