//! Frame throttle for the 3D loop.
//!
//! A frame is drawn when something changed or the view is animating, and no
//! sooner than the configured interval after the previous frame. Time is
//! passed in so the loop can be driven by the host's frame clock.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    interval: Duration,
    last_frame: Option<Instant>,
    dirty: bool,
    animating: bool,
    frames: u64,
}

impl RenderThrottle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_frame: None, dirty: true, animating: false, frames: 0 }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Decide whether to draw at `now`, recording the frame if so.
    pub fn should_render(&mut self, now: Instant) -> bool {
        if !self.dirty && !self.animating {
            return false;
        }
        if let Some(last) = self.last_frame {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_frame = Some(now);
        self.dirty = false;
        self.frames += 1;
        true
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
