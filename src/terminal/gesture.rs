//! Rapid-tap gesture on the page title
//!
//! Modelled as a counter plus one deadline. Every tap pushes the deadline
//! out by the tap window; once the deadline passes the streak is over.

use std::time::{Duration, Instant};

/// Counts taps that arrive within `window` of each other
#[derive(Debug, Clone)]
pub struct TapGesture {
    count: u32,
    deadline: Option<Instant>,
    threshold: u32,
    window: Duration,
}

impl TapGesture {
    /// `threshold` taps, each at most `window` after the previous one
    pub fn new(threshold: u32, window: Duration) -> Self {
        Self {
            count: 0,
            deadline: None,
            threshold: threshold.max(1),
            window,
        }
    }

    /// Register a tap. Returns `true` when it completes the gesture, after
    /// which counting starts over.
    pub fn tap(&mut self, now: Instant) -> bool {
        self.expire(now);

        self.count += 1;
        self.deadline = Some(now + self.window);

        if self.count >= self.threshold {
            self.reset();
            return true;
        }
        false
    }

    /// Drop the streak if its deadline has passed
    pub fn expire(&mut self, now: Instant) {
        if self.deadline.is_some_and(|deadline| now > deadline) {
            self.reset();
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn reset(&mut self) {
        self.count = 0;
        self.deadline = None;
    }
}
