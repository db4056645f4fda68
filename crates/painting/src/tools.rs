//! Tool selection and pointer dispatch
//!
//! The tool set is closed, so the controller is a small state machine that
//! turns pointer events into [`ToolAction`]s for the pipeline to execute.

use tracing::debug;

use crate::input::PointerEvent;
use crate::types::Tool;

/// What the pipeline should do in response to a pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// Start a pencil/eraser stroke at the point
    BeginStroke { x: f32, y: f32 },
    /// Continue the stroke in progress to the point
    ExtendStroke { x: f32, y: f32 },
    /// Finish the stroke in progress and commit it to history
    EndStroke,
    /// Flood fill from the pixel
    Fill { x: i32, y: i32 },
    /// Sample the composite color at the pixel
    Sample { x: i32, y: i32 },
    /// Nothing to do
    None,
}

/// Finite-state selector over the paint tools
///
/// Whether a stroke is in progress belongs to the
/// [`StrokeRenderer`](crate::brush::StrokeRenderer); callers pass it in as
/// `stroking` so the two can never disagree.
#[derive(Debug, Default)]
pub struct ToolController {
    active_tool: Tool,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Switch tools. Returns [`ToolAction::EndStroke`] when this interrupts a stroke.
    pub fn set_tool(&mut self, tool: Tool, stroking: bool) -> ToolAction {
        if tool != self.active_tool {
            debug!("ToolController: {:?} -> {:?}", self.active_tool, tool);
        }
        self.active_tool = tool;
        Self::finish_stroke(stroking)
    }

    /// Back to pencil
    pub fn reset(&mut self) {
        self.active_tool = Tool::Pencil;
    }

    /// Route a pointer event according to the active tool
    pub fn handle(&self, event: PointerEvent, stroking: bool) -> ToolAction {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(x, y),
            PointerEvent::Move { x, y } => self.pointer_move(x, y, stroking),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(stroking),
        }
    }

    /// Pencil and eraser begin a stroke; fill and eyedropper act on the
    /// pixel containing the pointer.
    ///
    /// The eyedropper does not switch tools here: a successful sample
    /// switches to the pencil, an off-canvas one leaves the tool alone.
    pub fn pointer_down(&self, x: f32, y: f32) -> ToolAction {
        match self.active_tool {
            Tool::Pencil | Tool::Eraser => ToolAction::BeginStroke { x, y },
            Tool::Fill => ToolAction::Fill {
                x: x.floor() as i32,
                y: y.floor() as i32,
            },
            Tool::Eyedropper => ToolAction::Sample {
                x: x.floor() as i32,
                y: y.floor() as i32,
            },
        }
    }

    pub fn pointer_move(&self, x: f32, y: f32, stroking: bool) -> ToolAction {
        if stroking && self.active_tool.blend_mode().is_some() {
            ToolAction::ExtendStroke { x, y }
        } else {
            ToolAction::None
        }
    }

    pub fn pointer_up(&self, stroking: bool) -> ToolAction {
        Self::finish_stroke(stroking)
    }

    fn finish_stroke(stroking: bool) -> ToolAction {
        if stroking {
            ToolAction::EndStroke
        } else {
            ToolAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pencil_stroke_sequence() {
        let tools = ToolController::new();
        assert_eq!(tools.active_tool(), Tool::Pencil);

        assert_eq!(tools.handle(PointerEvent::Move { x: 1.0, y: 1.0 }, false), ToolAction::None);
        assert_eq!(
            tools.handle(PointerEvent::Down { x: 2.0, y: 3.0 }, false),
            ToolAction::BeginStroke { x: 2.0, y: 3.0 }
        );
        assert_eq!(
            tools.handle(PointerEvent::Move { x: 4.0, y: 5.0 }, true),
            ToolAction::ExtendStroke { x: 4.0, y: 5.0 }
        );
        assert_eq!(tools.handle(PointerEvent::Up, true), ToolAction::EndStroke);
        assert_eq!(tools.handle(PointerEvent::Up, false), ToolAction::None);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut tools = ToolController::new();
        tools.set_tool(Tool::Eraser, false);
        assert_eq!(tools.handle(PointerEvent::Leave, true), ToolAction::EndStroke);
        assert_eq!(tools.handle(PointerEvent::Leave, false), ToolAction::None);
    }

    #[test]
    fn test_fill_dispatch() {
        let mut tools = ToolController::new();
        tools.set_tool(Tool::Fill, false);
        assert_eq!(
            tools.handle(PointerEvent::Down { x: 7.9, y: 2.2 }, false),
            ToolAction::Fill { x: 7, y: 2 }
        );
        assert_eq!(tools.handle(PointerEvent::Move { x: 8.0, y: 2.0 }, false), ToolAction::None);
        assert_eq!(tools.handle(PointerEvent::Up, false), ToolAction::None);
        assert_eq!(tools.active_tool(), Tool::Fill);
    }

    #[test]
    fn test_eyedropper_samples_containing_pixel() {
        let mut tools = ToolController::new();
        tools.set_tool(Tool::Eyedropper, false);
        assert_eq!(
            tools.handle(PointerEvent::Down { x: 5.7, y: 6.2 }, false),
            ToolAction::Sample { x: 5, y: 6 }
        );
        // Switching back to pencil is up to whoever performs the sample
        assert_eq!(tools.active_tool(), Tool::Eyedropper);
        assert_eq!(
            tools.handle(PointerEvent::Down { x: -0.5, y: 1.0 }, false),
            ToolAction::Sample { x: -1, y: 1 }
        );
    }

    #[test]
    fn test_switching_tool_mid_stroke_ends_it() {
        let mut tools = ToolController::new();
        assert_eq!(tools.set_tool(Tool::Fill, true), ToolAction::EndStroke);
        assert_eq!(tools.handle(PointerEvent::Move { x: 1.0, y: 1.0 }, true), ToolAction::None);
        assert_eq!(tools.set_tool(Tool::Pencil, false), ToolAction::None);
    }

    #[test]
    fn test_reset_selects_pencil() {
        let mut tools = ToolController::new();
        tools.set_tool(Tool::Eraser, false);
        tools.reset();
        assert_eq!(tools.active_tool(), Tool::Pencil);
    }
}
