//! Linear undo/redo over full snapshots of the element collection.
//!
//! `snapshots[index]` always equals the live collection after a commit. A
//! commit drops any redo future before appending. The list is capped; the
//! oldest snapshot is dropped first.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::consts::HISTORY_LIMIT;
use crate::doc::EditElement;

#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: Vec<Vec<EditElement>>,
    index: usize,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl EditHistory {
    /// Start a history whose only snapshot is `initial`.
    #[must_use]
    pub fn new(initial: Vec<EditElement>) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    /// Like [`EditHistory::new`] with an explicit cap (at least one snapshot).
    #[must_use]
    pub fn with_limit(initial: Vec<EditElement>, limit: usize) -> Self {
        Self { snapshots: vec![initial], index: 0, limit: limit.max(1) }
    }

    /// Discard all history and restart from `state`.
    pub fn reset(&mut self, state: Vec<EditElement>) {
        self.snapshots.clear();
        self.snapshots.push(state);
        self.index = 0;
    }

    /// Record `state` as the new present.
    pub fn commit(&mut self, state: &[EditElement]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(state.to_vec());
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&[EditElement]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<&[EditElement]> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot matching the live collection.
    #[must_use]
    pub fn current(&self) -> &[EditElement] {
        &self.snapshots[self.index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}
