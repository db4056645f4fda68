//! Background-over-drawing compositing
//!
//! The composite is what the user currently sees. Flood fill and the
//! eyedropper make their decisions against it while writes land only in the
//! drawing layer.

use tracing::debug;

use crate::surface::{PixelSurface, blend_over};
use crate::types::Rgba;

/// Composite `drawing` over `background` into a new surface.
///
/// Neither input is modified. The result has the drawing's dimensions; any
/// part of the drawing not covered by the background composites over
/// transparent.
pub fn composite(background: &PixelSurface, drawing: &PixelSurface) -> PixelSurface {
    let mut out = PixelSurface::new(drawing.width, drawing.height);

    if background.width == drawing.width && background.height == drawing.height {
        for ((dst, bg), fg) in out
            .pixels_mut()
            .iter_mut()
            .zip(background.pixels())
            .zip(drawing.pixels())
        {
            *dst = blend_over(*bg, *fg, 1.0);
        }
    } else {
        debug!(
            "composite: background {}x{} does not match drawing {}x{}",
            background.width, background.height, drawing.width, drawing.height
        );
        let width = drawing.width as usize;
        for (i, dst) in out.pixels_mut().iter_mut().enumerate() {
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            *dst = composite_pixel(background, drawing, x, y);
        }
    }

    out
}

/// Composite a single pixel; out of bounds on both layers reads transparent
#[inline]
pub fn composite_pixel(background: &PixelSurface, drawing: &PixelSurface, x: i32, y: i32) -> Rgba {
    blend_over(background.read_pixel(x, y), drawing.read_pixel(x, y), 1.0)
}
