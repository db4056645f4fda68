//! Pointer and tool dispatch for the painting pipeline

use tracing::{debug, info};

use super::{PaintingPipeline, ToolEffect};
use crate::fill::FillOutcome;
use crate::input::PointerEvent;
use crate::tools::ToolAction;
use crate::types::{Color, Tool};

impl PaintingPipeline {
    /// Handle a pointer event in canvas pixel coordinates
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ToolEffect {
        let action = self.tools.handle(event, self.stroke.is_active());
        self.run_action(action)
    }

    /// Switch the active tool, committing a stroke the switch interrupts
    pub fn set_tool(&mut self, tool: Tool) {
        let action = self.tools.set_tool(tool, self.stroke.is_active());
        self.run_action(action);
    }

    /// Flood fill from pixel `(x, y)` with the brush color
    ///
    /// History only grows when the fill changed the drawing.
    pub fn fill(&mut self, x: i32, y: i32) -> FillOutcome {
        let outcome = self
            .fill
            .fill(&self.background, &mut self.drawing, x, y, self.brush.color);
        if outcome.changed() {
            self.commit();
        }
        outcome
    }

    /// Sample the composite at `(x, y)` into the brush color
    ///
    /// A successful pick switches back to the pencil. Off the canvas nothing
    /// is sampled and the tool stays as it was, whether the pick came from a
    /// pointer event or a direct call.
    pub fn pick(&mut self, x: i32, y: i32) -> Option<Color> {
        let color = self.sampler.pick(&self.background, &self.drawing, x, y)?;
        self.brush.color = color;
        if self.tools.active_tool() != Tool::Pencil {
            self.set_tool(Tool::Pencil);
        }
        info!("Picked color {}", color);
        Some(color)
    }

    fn run_action(&mut self, action: ToolAction) -> ToolEffect {
        match action {
            ToolAction::BeginStroke { x, y } => {
                self.begin_stroke(x, y);
                ToolEffect::Stroking
            }
            ToolAction::ExtendStroke { x, y } => {
                self.extend_stroke(x, y);
                ToolEffect::Stroking
            }
            ToolAction::EndStroke => {
                if self.end_stroke() {
                    ToolEffect::StrokeCommitted
                } else {
                    ToolEffect::None
                }
            }
            ToolAction::Fill { x, y } => ToolEffect::Filled(self.fill(x, y)),
            ToolAction::Sample { x, y } => ToolEffect::Picked(self.pick(x, y)),
            ToolAction::None => {
                debug!("run_action: nothing to do");
                ToolEffect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uvpaint_config::PaintConfig;

    use super::*;
    use crate::constants::TRANSPARENT;
    use crate::surface::PixelSurface;

    fn pipeline(size: u32) -> PaintingPipeline {
        PaintingPipeline::new(PaintConfig::new(size, size))
    }

    #[test]
    fn test_pointer_stroke_effects() {
        let mut pipeline = pipeline(16);
        assert_eq!(
            pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y: 2.0 }),
            ToolEffect::Stroking
        );
        assert_eq!(
            pipeline.handle_pointer(PointerEvent::Move { x: 10.0, y: 2.0 }),
            ToolEffect::Stroking
        );
        assert_eq!(pipeline.handle_pointer(PointerEvent::Up), ToolEffect::StrokeCommitted);
        assert_eq!(pipeline.handle_pointer(PointerEvent::Up), ToolEffect::None);
        assert_eq!(pipeline.history().len(), 2);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut pipeline = pipeline(16);
        pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y: 2.0 });
        assert_eq!(pipeline.handle_pointer(PointerEvent::Leave), ToolEffect::StrokeCommitted);
        assert_eq!(
            pipeline.handle_pointer(PointerEvent::Move { x: 12.0, y: 12.0 }),
            ToolEffect::None
        );
        assert_eq!(pipeline.drawing().read_pixel(12, 12), TRANSPARENT);
    }

    #[test]
    fn test_tool_switch_commits_stroke() {
        let mut pipeline = pipeline(16);
        pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y: 2.0 });
        pipeline.set_tool(Tool::Fill);
        assert!(!pipeline.is_stroking());
        assert_eq!(pipeline.history().len(), 2);
        assert_eq!(pipeline.tool(), Tool::Fill);
    }

    #[test]
    fn test_fill_through_pointer() {
        let mut pipeline = pipeline(8);
        pipeline.set_tool(Tool::Fill);
        pipeline.set_color(Color::new(0, 0, 255));

        let effect = pipeline.handle_pointer(PointerEvent::Down { x: 3.7, y: 4.2 });
        assert_eq!(
            effect,
            ToolEffect::Filled(FillOutcome::Filled {
                pixels: 64,
                bounds: (0, 0, 8, 8)
            })
        );
        assert_eq!(pipeline.history().len(), 2);
        // Fill stays active and nothing strokes on move
        assert_eq!(pipeline.tool(), Tool::Fill);
        assert_eq!(pipeline.handle_pointer(PointerEvent::Up), ToolEffect::None);
    }

    #[test]
    fn test_repeat_fill_is_idempotent() {
        let mut pipeline = pipeline(8);
        pipeline.set_color(Color::new(0, 200, 0));
        assert!(pipeline.fill(1, 1).changed());
        let after_first = pipeline.drawing().clone();

        assert_eq!(pipeline.fill(1, 1), FillOutcome::AlreadyFilled);
        assert_eq!(pipeline.drawing(), &after_first);
        assert_eq!(pipeline.history().len(), 2);
    }

    #[test]
    fn test_fill_out_of_bounds_keeps_history() {
        let mut pipeline = pipeline(8);
        assert_eq!(pipeline.fill(8, 0), FillOutcome::OutOfBounds);
        assert_eq!(pipeline.history().len(), 1);
    }

    #[test]
    fn test_eyedropper_sets_color_and_returns_to_pencil() {
        let mut background = PixelSurface::new(8, 8);
        background.fill([10, 120, 30, 255]);
        let mut pipeline = PaintingPipeline::with_background(PaintConfig::new(8, 8), background);
        pipeline.set_tool(Tool::Eyedropper);

        let effect = pipeline.handle_pointer(PointerEvent::Down { x: 5.0, y: 5.0 });
        assert_eq!(effect, ToolEffect::Picked(Some(Color::new(10, 120, 30))));
        assert_eq!(pipeline.brush().color, Color::new(10, 120, 30));
        assert_eq!(pipeline.tool(), Tool::Pencil);
        // Sampling never mutates history
        assert_eq!(pipeline.history().len(), 1);
    }

    #[test]
    fn test_pick_then_paint_round_trip() {
        let mut pipeline = pipeline(8);
        pipeline.set_color(Color::new(200, 50, 25));
        pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y: 2.0 });
        pipeline.handle_pointer(PointerEvent::Up);
        pipeline.set_color(Color::BLACK);

        assert_eq!(pipeline.pick(2, 2), Some(Color::new(200, 50, 25)));
        pipeline.handle_pointer(PointerEvent::Down { x: 6.0, y: 6.0 });
        pipeline.handle_pointer(PointerEvent::Up);
        assert_eq!(pipeline.drawing().read_pixel(6, 6), [200, 50, 25, 255]);
    }

    #[test]
    fn test_pick_off_canvas() {
        let mut pipeline = pipeline(8);
        pipeline.set_tool(Tool::Eyedropper);
        assert_eq!(pipeline.pick(-1, 3), None);
        assert_eq!(pipeline.tool(), Tool::Eyedropper);
        assert_eq!(pipeline.brush().color, Color::BLACK);

        // The pointer path behaves the same
        let effect = pipeline.handle_pointer(PointerEvent::Down { x: 8.5, y: 2.0 });
        assert_eq!(effect, ToolEffect::Picked(None));
        assert_eq!(pipeline.tool(), Tool::Eyedropper);
        assert_eq!(pipeline.brush().color, Color::BLACK);
    }

    #[test]
    fn test_pick_at_fractional_tap_position() {
        let mut pipeline = pipeline(8);
        pipeline.set_color(Color::new(200, 50, 25));
        pipeline.set_brush_size(1);
        pipeline.handle_pointer(PointerEvent::Down { x: 2.6, y: 2.6 });
        pipeline.handle_pointer(PointerEvent::Up);
        assert_eq!(pipeline.drawing().read_pixel(2, 2), [200, 50, 25, 255]);

        pipeline.set_color(Color::BLACK);
        pipeline.set_tool(Tool::Eyedropper);
        let effect = pipeline.handle_pointer(PointerEvent::Down { x: 2.6, y: 2.6 });
        assert_eq!(effect, ToolEffect::Picked(Some(Color::new(200, 50, 25))));
        assert_eq!(pipeline.tool(), Tool::Pencil);
    }

    #[test]
    fn test_direct_stroke_ends_on_pointer_up() {
        let mut pipeline = pipeline(16);
        pipeline.begin_stroke(4.0, 4.0);
        assert_eq!(pipeline.handle_pointer(PointerEvent::Up), ToolEffect::StrokeCommitted);
        assert!(!pipeline.is_stroking());
        assert_eq!(pipeline.history().len(), 2);
    }

    #[test]
    fn test_direct_stroke_ends_on_tool_switch() {
        let mut pipeline = pipeline(16);
        pipeline.begin_stroke(4.0, 4.0);
        pipeline.set_tool(Tool::Fill);
        assert!(!pipeline.is_stroking());
        assert_eq!(pipeline.history().len(), 2);

        // The fill commits after the stroke, not before it
        assert!(pipeline.fill(12, 12).changed());
        assert_eq!(pipeline.history().len(), 3);
        assert!(pipeline.undo());
        assert_ne!(pipeline.drawing().read_pixel(4, 4), TRANSPARENT);
        assert_eq!(pipeline.drawing().read_pixel(12, 12), TRANSPARENT);
    }
}
