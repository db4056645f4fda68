//! Eyedropper color sampling

use tracing::debug;

use crate::composite::composite_pixel;
use crate::surface::PixelSurface;
use crate::types::Color;

/// Samples what the user currently sees at a pixel
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSampler;

impl ColorSampler {
    /// Composite color at `(x, y)` as a brush color, or None off the surface.
    ///
    /// Only the requested pixel is composited; the result is identical to
    /// reading the full composite.
    pub fn pick(&self, background: &PixelSurface, drawing: &PixelSurface, x: i32, y: i32) -> Option<Color> {
        if !drawing.contains(x, y) {
            debug!("ColorSampler::pick: ({}, {}) out of bounds", x, y);
            return None;
        }
        let pixel = composite_pixel(background, drawing, x, y);
        let color = Color::from_rgba(pixel);
        debug!("ColorSampler::pick: ({}, {}) -> {} (alpha {})", x, y, color, pixel[3]);
        Some(color)
    }
}
