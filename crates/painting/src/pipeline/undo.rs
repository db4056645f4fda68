//! Undo functionality for the painting pipeline

use tracing::debug;

use super::PaintingPipeline;

impl PaintingPipeline {
    /// Snapshot the drawing into history after a committed action
    pub(crate) fn commit(&mut self) {
        self.history.push(self.drawing.snapshot());
        debug!(
            "Committed history entry {} of {}",
            self.history.index() + 1,
            self.history.len()
        );
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last committed action
    ///
    /// A stroke in progress is committed first so it can be undone as a unit.
    /// Returns true if an undo was performed.
    pub fn undo(&mut self) -> bool {
        self.finish_interrupted_stroke();
        self.history.undo(&mut self.drawing)
    }

    /// Redo the last undone action
    ///
    /// Returns true if a redo was performed.
    pub fn redo(&mut self) -> bool {
        self.finish_interrupted_stroke();
        self.history.redo(&mut self.drawing)
    }

    /// Commit a stroke still in progress
    pub(crate) fn finish_interrupted_stroke(&mut self) {
        if self.stroke.is_active() {
            debug!("Finishing interrupted stroke");
            self.end_stroke();
        }
    }
}
