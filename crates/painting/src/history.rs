//! Bounded undo/redo history of full drawing snapshots

use std::collections::VecDeque;

use tracing::debug;

use crate::surface::{PixelSurface, Snapshot};

/// Linear undo/redo history
///
/// Holds at most `capacity` snapshots and an index into them. The drawing
/// surface always equals the snapshot at `index` after push, undo and redo.
/// Pushing discards the redo branch; overflowing capacity evicts the oldest
/// snapshot.
#[derive(Debug)]
pub struct HistoryManager {
    entries: VecDeque<Snapshot>,
    index: usize,
    capacity: usize,
}

impl HistoryManager {
    /// Create an empty history. Capacity is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            index: 0,
            capacity,
        }
    }

    /// Record a new state
    pub fn push(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            let discarded = self.entries.len() - (self.index + 1);
            if discarded > 0 {
                debug!("History: discarding {} redo entries", discarded);
            }
            self.entries.truncate(self.index + 1);
        }

        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;

        debug!("History: pushed, index={} len={}", self.index, self.entries.len());
    }

    /// Step back and restore `drawing`. Returns false at the oldest entry.
    pub fn undo(&mut self, drawing: &mut PixelSurface) -> bool {
        if !self.can_undo() {
            debug!("Undo: no entries available");
            return false;
        }
        self.index -= 1;
        drawing.restore(&self.entries[self.index]);
        debug!("Undo: index={} len={}", self.index, self.entries.len());
        true
    }

    /// Step forward and restore `drawing`. Returns false at the newest entry.
    pub fn redo(&mut self, drawing: &mut PixelSurface) -> bool {
        if !self.can_redo() {
            debug!("Redo: no entries available");
            return false;
        }
        self.index += 1;
        drawing.restore(&self.entries[self.index]);
        debug!("Redo: index={} len={}", self.index, self.entries.len());
        true
    }

    /// Drop everything and start over from `baseline`
    pub fn reset(&mut self, baseline: Snapshot) {
        self.entries.clear();
        self.index = 0;
        self.push(baseline);
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Snapshot the drawing currently mirrors
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
