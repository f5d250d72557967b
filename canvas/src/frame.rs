//! Frame coalescing for the render loop.
//!
//! The host owns the actual animation-frame callback. The engine only asks
//! for one: [`FrameScheduler::invalidate`] returns `true` the first time it is
//! called after a frame ran, so the engine emits at most one
//! `RenderRequested` per frame no matter how many mutations happen.
//!
//! Pointer moves are throttled the same way. A move only overwrites the
//! [`PendingPointer`] slot; the latest position is processed at frame time and
//! earlier ones are dropped, never queued.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use plan_geom::Point;

use crate::input::Modifiers;

/// Tracks whether a frame request is outstanding.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScheduler {
    requested: bool,
    frames: u64,
}

impl FrameScheduler {
    /// Mark the scene dirty. Returns `true` if the host must request a frame.
    pub fn invalidate(&mut self) -> bool {
        if self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    /// Called at the start of a frame callback. Returns whether a render is due.
    pub fn begin_frame(&mut self) -> bool {
        let due = self.requested;
        self.requested = false;
        if due {
            self.frames += 1;
        }
        due
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Number of frames that rendered since construction.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

/// One-slot buffer holding the latest unprocessed pointer move.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingPointer {
    slot: Option<(Point, Modifiers)>,
}

impl PendingPointer {
    /// Store a move, replacing any unprocessed one. Returns `true` if the slot was empty.
    pub fn set(&mut self, screen: Point, modifiers: Modifiers) -> bool {
        self.slot.replace((screen, modifiers)).is_none()
    }

    /// Take the pending move, leaving the slot empty.
    pub fn take(&mut self) -> Option<(Point, Modifiers)> {
        self.slot.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}
