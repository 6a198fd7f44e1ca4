//! Frame-aligned throttling and trailing-edge debouncing.

use std::time::{Duration, Instant};

/// Coalesces bursts of events into at most one frame-aligned callback.
///
/// The first event while idle requests a frame callback and sets the
/// in-flight flag; further events until the frame fires are absorbed.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    /// Create an idle throttle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Returns true when a frame callback should be
    /// scheduled, false when one is already in flight.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            false
        } else {
            self.ticking = true;
            true
        }
    }

    /// The frame callback ran; clear the in-flight flag.
    pub fn on_frame(&mut self) {
        self.ticking = false;
    }

    /// Whether a frame callback is in flight.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
}

/// Trailing-edge debouncer: an action fires once input has been quiet for
/// the whole window. Clock-explicit so callers control time.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record an input; the deadline moves to `now + window`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Cancel any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed. Returns true at most once per
    /// trigger.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
