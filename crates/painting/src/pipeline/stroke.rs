//! Stroke handling for the painting pipeline

use tracing::debug;

use super::PaintingPipeline;

impl PaintingPipeline {
    /// Begin a stroke with the active tool at `(x, y)` in canvas pixels
    ///
    /// Ignored unless the active tool is pencil or eraser. A stroke already in
    /// progress is committed first.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        let Some(mode) = self.tools.active_tool().blend_mode() else {
            debug!("begin_stroke: {:?} does not stroke, ignoring", self.tools.active_tool());
            return;
        };
        if self.stroke.is_active() {
            self.end_stroke();
        }

        let ink = self.brush.ink(mode);
        let region = self
            .stroke
            .begin(&mut self.drawing, ink, self.brush.size(), x, y);
        debug!("begin_stroke: ({:.1}, {:.1}) mode={:?} region={:?}", x, y, mode, region);
    }

    /// Continue the stroke to `(x, y)`
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        if let Some((rx, ry, rw, rh)) = self.stroke.extend(&mut self.drawing, x, y) {
            debug!("  extend_stroke: affected region ({}, {}) {}x{}", rx, ry, rw, rh);
        }
    }

    /// End the current stroke, committing it to history
    ///
    /// Returns true if a stroke was in progress.
    pub fn end_stroke(&mut self) -> bool {
        if !self.stroke.end() {
            return false;
        }
        self.commit();
        true
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_active()
    }
}
