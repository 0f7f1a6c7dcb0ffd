//! Room snapshot history: the shared linear undo/redo timeline.
//!
//! DESIGN
//! ======
//! One `RoomHistory` per room. `history[0]` is always the empty initial
//! snapshot; `index` points at the currently active snapshot. Undo and redo
//! move the index without deleting future snapshots; a commit truncates
//! everything past the index before appending, so redo after a fresh commit
//! is a no-op.
//!
//! `Element` owns all of its data, so `Clone` here is a deep copy — snapshots
//! returned to callers can never alias stored history.

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use crate::element::Element;

/// A complete, ordered canvas state at one point in history.
pub type Snapshot = Vec<Element>;

/// Ordered snapshot sequence plus the current position in it.
#[derive(Debug, Clone)]
pub struct RoomHistory {
    history: Vec<Snapshot>,
    index: usize,
}

impl RoomHistory {
    /// A fresh room: one empty snapshot, index 0.
    #[must_use]
    pub fn new() -> Self {
        Self { history: vec![Vec::new()], index: 0 }
    }

    /// The currently active snapshot.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.history[self.index]
    }

    /// Current position in the timeline.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of snapshots, including the initial empty one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false: the initial empty snapshot is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append `elements` as the new tip, discarding any redo-able future
    /// beyond the current index first.
    pub fn commit(&mut self, elements: Snapshot) {
        self.history.truncate(self.index + 1);
        self.history.push(elements);
        self.index = self.history.len() - 1;
    }

    /// Step back one snapshot. At index 0 this is a no-op returning `None`.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.history[self.index])
    }

    /// Step forward one snapshot. At the tip this is a no-op returning `None`.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.history.len() {
            return None;
        }
        self.index += 1;
        Some(&self.history[self.index])
    }
}

impl Default for RoomHistory {
    fn default() -> Self {
        Self::new()
    }
}
