//! uvpaint painting engine - surfaces, tools and history for texture painting
//!
//! This crate provides the CPU side of painting onto a model texture:
//! - [`surface`] - RGBA8 pixel surface with snapshots and region access
//! - [`composite`] - Background-over-drawing compositing
//! - [`brush`] - Brush state and hard-edged stroke rendering
//! - [`fill`] - Tolerance-based flood fill
//! - [`sampler`] - Eyedropper color sampling
//! - [`history`] - Bounded undo/redo of drawing snapshots
//! - [`tools`] - Tool selection and pointer dispatch
//! - [`export`] - PNG encode/decode and export transports
//! - [`pipeline`] - Complete painting pipeline

pub mod brush;
pub mod composite;
pub mod constants;
pub mod error;
pub mod export;
pub mod fill;
pub mod history;
pub mod input;
pub mod pipeline;
pub mod sampler;
pub mod surface;
pub mod tools;
pub mod types;

pub use brush::{BrushState, Ink, StrokeRenderer};
pub use composite::composite;
pub use constants::TRANSPARENT;
pub use error::PaintError;
pub use export::{
    ExportReceipt, ExportTransport, FileTransport, MemoryTransport, cache_busted_url,
    decode_image, decode_png_data_url, encode_png, png_data_url,
};
pub use fill::{FillOutcome, FloodFill};
pub use history::HistoryManager;
pub use input::{CanvasScale, PointerEvent};
pub use pipeline::{PaintingPipeline, ToolEffect};
pub use sampler::ColorSampler;
pub use surface::{PixelSurface, Snapshot};
pub use tools::{ToolAction, ToolController};
pub use types::{BlendMode, Color, Rgba, Tool};
