//! Pointer input events for the paint canvas.

use serde::{Deserialize, Serialize};

/// Pointer (mouse or touch) input, in element-relative coordinates.
///
/// Touch start/move/end arrive here already mapped onto the same variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerInput {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

impl PointerInput {
    /// Position carried by the event, if any
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::Down { x, y } | Self::Move { x, y } => Some((x, y)),
            Self::Up | Self::Leave => None,
        }
    }
}

/// Displayed size of the canvas element, in CSS/logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}
