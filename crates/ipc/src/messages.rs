//! Session scripts and engine notifications.

use serde::{Deserialize, Serialize};

use crate::commands::{PaintCommand, ToolKind};
use crate::error::IpcError;
use crate::input::DisplaySize;

/// A recorded paint session: an ordered list of commands.
///
/// When `display` is present, pointer coordinates are element-relative and
/// must be scaled onto the canvas before they reach the tool controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub display: Option<DisplaySize>,
    pub commands: Vec<PaintCommand>,
}

impl Session {
    /// Parse a session from JSON
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let session: Self = serde_json::from_str(json)?;
        if let Some(display) = session.display {
            if !(display.width > 0.0 && display.height > 0.0) {
                return Err(IpcError::InvalidFormat(format!(
                    "display size must be positive, got {}x{}",
                    display.width, display.height
                )));
            }
        }
        Ok(session)
    }

    /// Serialize the session to JSON
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Notifications from the engine to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EngineToUi {
    /// The eyedropper picked a color; the UI should update its palette
    ColorPicked { color: String, tool: ToolKind },
    /// Undo/redo availability changed
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// The composite was exported; the viewer should reload from `url`
    Exported { bytes: usize, version: u64, url: Option<String> },
    /// Error notification
    Error { code: String, message: String },
}

impl EngineToUi {
    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
