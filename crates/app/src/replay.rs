//! Session replay
//!
//! Translates IPC commands into pipeline calls and collects the
//! notifications a UI would receive in response.

use tracing::{debug, warn};
use uvpaint_ipc::{EngineToUi, PaintCommand, PointerInput, Session, ToolKind};
use uvpaint_painting::{
    CanvasScale, Color, ExportTransport, PaintingPipeline, PointerEvent, Tool, ToolEffect,
    cache_busted_url,
};

pub fn tool_from_kind(kind: ToolKind) -> Tool {
    match kind {
        ToolKind::Pencil => Tool::Pencil,
        ToolKind::Eraser => Tool::Eraser,
        ToolKind::Fill => Tool::Fill,
        ToolKind::Eyedropper => Tool::Eyedropper,
    }
}

pub fn kind_from_tool(tool: Tool) -> ToolKind {
    match tool {
        Tool::Pencil => ToolKind::Pencil,
        Tool::Eraser => ToolKind::Eraser,
        Tool::Fill => ToolKind::Fill,
        Tool::Eyedropper => ToolKind::Eyedropper,
    }
}

pub fn pointer_event(input: PointerInput) -> PointerEvent {
    match input {
        PointerInput::Down { x, y } => PointerEvent::Down { x, y },
        PointerInput::Move { x, y } => PointerEvent::Move { x, y },
        PointerInput::Up => PointerEvent::Up,
        PointerInput::Leave => PointerEvent::Leave,
    }
}

/// Out-of-range pixel coordinates become an out-of-bounds seed
fn pixel_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Drives a [`PaintingPipeline`] from [`PaintCommand`]s
pub struct SessionRunner<'a> {
    pipeline: PaintingPipeline,
    scale: CanvasScale,
    transport: &'a mut dyn ExportTransport,
    resource: Option<String>,
    history_state: (bool, bool),
}

impl<'a> SessionRunner<'a> {
    pub fn new(pipeline: PaintingPipeline, transport: &'a mut dyn ExportTransport) -> Self {
        let history_state = (pipeline.can_undo(), pipeline.can_redo());
        Self {
            pipeline,
            scale: CanvasScale::IDENTITY,
            transport,
            resource: None,
            history_state,
        }
    }

    /// Viewer URL attached to export notifications
    pub fn with_resource(mut self, resource: Option<String>) -> Self {
        self.resource = resource;
        self
    }

    pub fn pipeline(&self) -> &PaintingPipeline {
        &self.pipeline
    }

    /// Run every command in the session, returning all notifications in order
    pub fn replay(&mut self, session: &Session) -> Vec<EngineToUi> {
        self.scale = match session.display {
            Some(display) => CanvasScale::from_sizes(
                self.pipeline.width(),
                self.pipeline.height(),
                display.width,
                display.height,
            ),
            None => CanvasScale::IDENTITY,
        };
        debug!(
            "Replaying {} commands with scale ({:.3}, {:.3})",
            session.commands.len(),
            self.scale.x,
            self.scale.y
        );

        session
            .commands
            .iter()
            .flat_map(|command| self.apply(command))
            .collect()
    }

    /// Apply a single command
    pub fn apply(&mut self, command: &PaintCommand) -> Vec<EngineToUi> {
        let mut events = Vec::new();

        match command {
            PaintCommand::SetTool(kind) => self.pipeline.set_tool(tool_from_kind(*kind)),
            PaintCommand::SetColor(hex) => match hex.parse::<Color>() {
                Ok(color) => self.pipeline.set_color(color),
                Err(err) => {
                    warn!("Ignoring color {:?}: {}", hex, err);
                    events.push(EngineToUi::Error {
                        code: "invalid_color".to_string(),
                        message: err.to_string(),
                    });
                }
            },
            PaintCommand::SetBrushSize(size) => self.pipeline.set_brush_size(*size),
            PaintCommand::SetOpacity(opacity) => self.pipeline.set_opacity(*opacity),
            PaintCommand::Pointer(input) => {
                let event = self.scale.apply(pointer_event(*input));
                if let ToolEffect::Picked(Some(color)) = self.pipeline.handle_pointer(event) {
                    events.push(self.color_picked(color));
                }
            }
            PaintCommand::Fill { x, y } => {
                self.pipeline.fill(pixel_coord(*x), pixel_coord(*y));
            }
            PaintCommand::Pick { x, y } => {
                if let Some(color) = self.pipeline.pick(pixel_coord(*x), pixel_coord(*y)) {
                    events.push(self.color_picked(color));
                }
            }
            PaintCommand::Undo => {
                self.pipeline.undo();
            }
            PaintCommand::Redo => {
                self.pipeline.redo();
            }
            PaintCommand::Clear => self.pipeline.clear(),
            PaintCommand::Reset => self.pipeline.reset(),
            PaintCommand::Export => events.push(self.export()),
        }

        // Tool switches can commit a stroke too, so every command is checked
        events.extend(self.history_changed());
        events
    }

    /// Export the composite through the transport
    pub fn export(&mut self) -> EngineToUi {
        match self.pipeline.export_to(&mut *self.transport) {
            Ok(receipt) => EngineToUi::Exported {
                bytes: receipt.bytes,
                version: receipt.version,
                url: self
                    .resource
                    .as_deref()
                    .map(|resource| cache_busted_url(resource, receipt.version)),
            },
            Err(err) => EngineToUi::Error {
                code: "export_failed".to_string(),
                message: err.to_string(),
            },
        }
    }

    fn color_picked(&self, color: Color) -> EngineToUi {
        EngineToUi::ColorPicked {
            color: color.to_hex(),
            tool: kind_from_tool(self.pipeline.tool()),
        }
    }

    fn history_changed(&mut self) -> Option<EngineToUi> {
        let state = (self.pipeline.can_undo(), self.pipeline.can_redo());
        if state == self.history_state {
            return None;
        }
        self.history_state = state;
        Some(EngineToUi::HistoryChanged {
            can_undo: state.0,
            can_redo: state.1,
        })
    }
}
