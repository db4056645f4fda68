//! Paint command types for the painting system.

use serde::{Deserialize, Serialize};

use crate::input::PointerInput;

/// Tool selectable from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Eyedropper,
}

/// Commands for controlling the painting system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PaintCommand {
    /// Switch the active tool
    SetTool(ToolKind),
    /// Set brush color as `#rrggbb`
    SetColor(String),
    /// Set brush diameter in pixels
    SetBrushSize(u32),
    /// Set brush opacity (0.0-1.0)
    SetOpacity(f32),
    /// Pointer input routed through the active tool
    Pointer(PointerInput),
    /// Flood fill at a canvas pixel regardless of the active tool
    Fill { x: u32, y: u32 },
    /// Sample the visible color at a canvas pixel
    Pick { x: u32, y: u32 },
    /// Undo the last committed action
    Undo,
    /// Redo the last undone action
    Redo,
    /// Clear the drawing layer (undoable)
    Clear,
    /// Clear the drawing layer and start a fresh history
    Reset,
    /// Export the current composite
    Export,
}

impl PaintCommand {
    /// Whether the command can change the drawing layer
    pub fn mutates_drawing(&self) -> bool {
        matches!(
            self,
            Self::Pointer(_) | Self::Fill { .. } | Self::Undo | Self::Redo | Self::Clear | Self::Reset
        )
    }
}
