//! Complete painting pipeline
//!
//! This module provides the main painting pipeline that connects:
//! - Pointer input (routed through the tool controller)
//! - Stroke rendering, flood fill and color sampling
//! - The background and drawing surfaces
//! - Undo/redo history
//! - Export of the composited texture
//!
//! Every operation runs to completion synchronously; the pipeline holds the
//! only mutable reference to the drawing surface.

mod dispatch;
mod stroke;
mod surface_ops;
mod undo;

use tracing::info;
use uvpaint_config::PaintConfig;

use crate::brush::{BrushState, StrokeRenderer};
use crate::fill::{FillOutcome, FloodFill};
use crate::history::HistoryManager;
use crate::sampler::ColorSampler;
use crate::surface::PixelSurface;
use crate::tools::ToolController;
use crate::types::{Color, Tool};

/// Observable result of a pointer event or direct tool operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEffect {
    /// Nothing happened
    None,
    /// A stroke started or grew; history is untouched until it ends
    Stroking,
    /// A stroke ended and was committed to history
    StrokeCommitted,
    /// A fill ran (or was rejected as a no-op)
    Filled(FillOutcome),
    /// The eyedropper sampled a color (None when off the canvas)
    Picked(Option<Color>),
}

/// Complete painting pipeline for one texture
///
/// This struct manages the full painting workflow:
/// 1. Pointer events come in via `handle_pointer`
/// 2. The tool controller decides what they mean
/// 3. Strokes and fills are applied to the drawing surface
/// 4. Committed actions are snapshotted into history
/// 5. The composite is exported on request
pub struct PaintingPipeline {
    /// Base texture, read-only after load
    pub(crate) background: PixelSurface,
    /// Layer every paint operation writes to
    pub(crate) drawing: PixelSurface,
    /// Current brush color, size and opacity
    pub(crate) brush: BrushState,
    /// Stroke in progress, if any
    pub(crate) stroke: StrokeRenderer,
    /// Flood fill engine with configured tolerances
    pub(crate) fill: FloodFill,
    /// Eyedropper
    pub(crate) sampler: ColorSampler,
    /// Active tool state machine
    pub(crate) tools: ToolController,
    /// Undo/redo snapshots of the drawing surface
    pub(crate) history: HistoryManager,
    /// Configuration the pipeline was created with
    pub(crate) config: PaintConfig,
    /// Successful export count
    pub(crate) export_version: u64,
}

impl PaintingPipeline {
    /// Create a pipeline with a transparent background
    pub fn new(config: PaintConfig) -> Self {
        let background = PixelSurface::new(config.canvas.width, config.canvas.height);
        Self::with_background(config, background)
    }

    /// Create a pipeline over an already-decoded background.
    ///
    /// The background must match the configured canvas size; the drawing
    /// layer always does.
    pub fn with_background(config: PaintConfig, background: PixelSurface) -> Self {
        let drawing = PixelSurface::new(config.canvas.width, config.canvas.height);
        let mut history = HistoryManager::new(config.history.capacity);
        // Baseline so the first committed action can be undone
        history.push(drawing.snapshot());

        info!(
            "PaintingPipeline: {}x{} canvas, fill tolerance {}, history capacity {}",
            config.canvas.width,
            config.canvas.height,
            config.fill.tolerance,
            history.capacity()
        );

        Self {
            background,
            drawing,
            brush: BrushState::from_config(&config.brush),
            stroke: StrokeRenderer::new(),
            fill: FloodFill::from_config(&config.fill),
            sampler: ColorSampler,
            tools: ToolController::new(),
            history,
            config,
            export_version: 0,
        }
    }

    /// Get the surface width
    pub fn width(&self) -> u32 {
        self.drawing.width
    }

    /// Get the surface height
    pub fn height(&self) -> u32 {
        self.drawing.height
    }

    /// Configuration the pipeline was created with
    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    /// The drawing layer
    pub fn drawing(&self) -> &PixelSurface {
        &self.drawing
    }

    /// The background layer
    pub fn background(&self) -> &PixelSurface {
        &self.background
    }

    /// Current brush settings
    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    /// Set the brush color
    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
    }

    /// Set the brush diameter (clamped to at least 1)
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.set_size(size);
    }

    /// Set the brush opacity (clamped to 0.0-1.0)
    pub fn set_opacity(&mut self, opacity: f32) {
        self.brush.set_opacity(opacity);
    }

    /// Get the active tool
    pub fn tool(&self) -> Tool {
        self.tools.active_tool()
    }

    /// Borrow the history
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Number of successful exports so far
    pub fn export_version(&self) -> u64 {
        self.export_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TRANSPARENT;
    use crate::input::PointerEvent;

    fn pipeline(size: u32) -> PaintingPipeline {
        PaintingPipeline::new(PaintConfig::new(size, size))
    }

    #[test]
    fn test_new_pipeline() {
        let pipeline = pipeline(32);
        assert_eq!(pipeline.width(), 32);
        assert_eq!(pipeline.height(), 32);
        assert_eq!(pipeline.tool(), Tool::Pencil);
        assert_eq!(pipeline.history().len(), 1);
        assert!(!pipeline.can_undo());
        assert!(pipeline.drawing().pixels().iter().all(|p| *p == TRANSPARENT));
        assert_eq!(pipeline.brush().color, Color::BLACK);
    }

    #[test]
    fn test_brush_setters_clamp() {
        let mut pipeline = pipeline(8);
        pipeline.set_brush_size(0);
        pipeline.set_opacity(7.0);
        pipeline.set_color(Color::new(1, 2, 3));
        assert_eq!(pipeline.brush().size(), 1);
        assert_eq!(pipeline.brush().opacity(), 1.0);
        assert_eq!(pipeline.brush().color, Color::new(1, 2, 3));
    }

    #[test]
    fn test_undo_redo_inverse_law() {
        let mut pipeline = pipeline(32);
        pipeline.set_brush_size(3);
        for n in 0..20 {
            let y = n as f32 + 5.0;
            pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y });
            pipeline.handle_pointer(PointerEvent::Move { x: 28.0, y });
            pipeline.handle_pointer(PointerEvent::Up);
        }
        let after_last = pipeline.drawing().clone();

        assert!(pipeline.undo());
        assert_ne!(pipeline.drawing(), &after_last);
        assert!(pipeline.redo());
        assert_eq!(pipeline.drawing(), &after_last);
    }

    #[test]
    fn test_history_bound_through_pipeline() {
        let mut pipeline = pipeline(32);
        for n in 0..25 {
            pipeline.handle_pointer(PointerEvent::Down { x: n as f32, y: 1.0 });
            pipeline.handle_pointer(PointerEvent::Up);
            assert!(pipeline.history().len() <= 20);
        }
        for _ in 0..19 {
            assert!(pipeline.undo());
        }
        assert!(!pipeline.undo());
    }

    #[test]
    fn test_redo_branch_truncation() {
        let mut pipeline = pipeline(16);
        pipeline.handle_pointer(PointerEvent::Down { x: 2.0, y: 2.0 });
        pipeline.handle_pointer(PointerEvent::Up);
        pipeline.handle_pointer(PointerEvent::Down { x: 8.0, y: 8.0 });
        pipeline.handle_pointer(PointerEvent::Up);

        assert!(pipeline.undo());
        assert!(pipeline.can_redo());

        pipeline.handle_pointer(PointerEvent::Down { x: 12.0, y: 12.0 });
        pipeline.handle_pointer(PointerEvent::Up);
        let latest = pipeline.drawing().clone();

        assert!(!pipeline.can_redo());
        assert!(!pipeline.redo());
        assert_eq!(pipeline.drawing(), &latest);
        assert_eq!(pipeline.drawing().read_pixel(8, 8), TRANSPARENT);
    }
}
