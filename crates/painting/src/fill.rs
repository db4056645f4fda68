//! Tolerance-based flood fill
//!
//! Boundaries are detected against the composite (background under drawing)
//! so the unpainted base texture's outlines contain the fill, but accepted
//! pixels are written only into the drawing layer.

use tracing::debug;
use uvpaint_config::FillConfig;

use crate::composite::composite;
use crate::surface::PixelSurface;
use crate::types::{Color, Rgba};

/// Result of a fill request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Seed was outside the surface
    OutOfBounds,
    /// The seed already shows the fill color; nothing was written
    AlreadyFilled,
    /// `pixels` were written inside `bounds` (`x, y, width, height`)
    Filled {
        pixels: usize,
        bounds: (u32, u32, u32, u32),
    },
}

impl FillOutcome {
    /// Whether the drawing layer changed
    pub fn changed(&self) -> bool {
        matches!(self, FillOutcome::Filled { .. })
    }
}

/// 4-connected flood fill with per-channel tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodFill {
    /// Max per-channel (RGBA) difference from the seed inside the region
    pub tolerance: u8,
    /// RGB difference below which the target counts as already filled
    pub match_threshold: u8,
    /// Seed alpha must exceed this for the already-filled shortcut
    pub match_min_alpha: u8,
}

impl Default for FloodFill {
    fn default() -> Self {
        Self::from_config(&FillConfig::default())
    }
}

impl FloodFill {
    pub fn from_config(config: &FillConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            match_threshold: config.match_threshold,
            match_min_alpha: config.match_min_alpha,
        }
    }

    /// Whether filling `seed` with `target` would change nothing visible
    pub fn already_filled(&self, seed: Rgba, target: Color) -> bool {
        let close = |a: u8, b: u8| a.abs_diff(b) < self.match_threshold;
        close(seed[0], target.r)
            && close(seed[1], target.g)
            && close(seed[2], target.b)
            && seed[3] > self.match_min_alpha
    }

    /// Whether `pixel` belongs to the region grown from `seed`
    #[inline]
    pub fn within_tolerance(&self, pixel: Rgba, seed: Rgba) -> bool {
        pixel
            .iter()
            .zip(seed.iter())
            .all(|(p, s)| p.abs_diff(*s) <= self.tolerance)
    }

    /// Fill the region around `(seed_x, seed_y)` with opaque `color`.
    ///
    /// The traversal uses an explicit stack and a visited map the size of the
    /// surface, so every pixel is tested at most once and large regions cannot
    /// overflow the call stack.
    pub fn fill(
        &self,
        background: &PixelSurface,
        drawing: &mut PixelSurface,
        seed_x: i32,
        seed_y: i32,
        color: Color,
    ) -> FillOutcome {
        if !drawing.contains(seed_x, seed_y) {
            debug!("FloodFill::fill: seed ({}, {}) out of bounds", seed_x, seed_y);
            return FillOutcome::OutOfBounds;
        }

        let reference = composite(background, drawing);
        let seed = reference.read_pixel(seed_x, seed_y);
        if self.already_filled(seed, color) {
            debug!(
                "FloodFill::fill: seed {:?} already matches {}, skipping",
                seed, color
            );
            return FillOutcome::AlreadyFilled;
        }

        let width = drawing.width as usize;
        let height = drawing.height as usize;
        let source = reference.pixels();
        let target = color.opaque();

        let mut visited = vec![false; width * height];
        let mut stack: Vec<usize> = Vec::with_capacity(4096);
        let seed_idx = seed_y as usize * width + seed_x as usize;
        visited[seed_idx] = true;
        stack.push(seed_idx);

        let (mut min_x, mut min_y) = (seed_x as usize, seed_y as usize);
        let (mut max_x, mut max_y) = (min_x, min_y);
        let mut filled = 0usize;

        let out = drawing.pixels_mut();
        while let Some(idx) = stack.pop() {
            out[idx] = target;
            filled += 1;

            let x = idx % width;
            let y = idx / width;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            // Bounds are checked before a neighbor is pushed
            let mut visit = |ni: usize| {
                if !visited[ni] {
                    visited[ni] = true;
                    if self.within_tolerance(source[ni], seed) {
                        stack.push(ni);
                    }
                }
            };
            if x > 0 {
                visit(idx - 1);
            }
            if x + 1 < width {
                visit(idx + 1);
            }
            if y > 0 {
                visit(idx - width);
            }
            if y + 1 < height {
                visit(idx + width);
            }
        }

        let bounds = (
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        );
        debug!(
            "FloodFill::fill: seed ({}, {}) filled {} pixels in {:?}",
            seed_x, seed_y, filled, bounds
        );
        FillOutcome::Filled {
            pixels: filled,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{Ink, StrokeRenderer};
    use crate::constants::TRANSPARENT;

    const BLUE: Color = Color::new(0, 0, 255);
    const RED: Color = Color::new(255, 0, 0);

    /// Draw a closed square outline with corners (lo, lo) and (hi, hi)
    fn draw_box(drawing: &mut PixelSurface, lo: f32, hi: f32, size: u32) {
        let mut renderer = StrokeRenderer::new();
        let ink = Ink::Paint { color: RED, opacity: 1.0 };
        renderer.begin(drawing, ink, size, lo, lo);
        renderer.extend(drawing, hi, lo);
        renderer.extend(drawing, hi, hi);
        renderer.extend(drawing, lo, hi);
        renderer.extend(drawing, lo, lo);
        renderer.end();
    }

    #[test]
    fn test_fill_empty_canvas() {
        let background = PixelSurface::new(16, 16);
        let mut drawing = PixelSurface::new(16, 16);

        let outcome = FloodFill::default().fill(&background, &mut drawing, 3, 3, BLUE);
        assert_eq!(
            outcome,
            FillOutcome::Filled {
                pixels: 256,
                bounds: (0, 0, 16, 16)
            }
        );
        assert!(drawing.pixels().iter().all(|p| *p == BLUE.opaque()));
    }

    #[test]
    fn test_fill_out_of_bounds() {
        let background = PixelSurface::new(4, 4);
        let mut drawing = PixelSurface::new(4, 4);
        let engine = FloodFill::default();
        assert_eq!(engine.fill(&background, &mut drawing, -1, 0, BLUE), FillOutcome::OutOfBounds);
        assert_eq!(engine.fill(&background, &mut drawing, 0, 4, BLUE), FillOutcome::OutOfBounds);
        assert!(drawing.pixels().iter().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn test_fill_already_filled_is_noop() {
        let background = PixelSurface::new(8, 8);
        let mut drawing = PixelSurface::new(8, 8);
        drawing.fill([2, 1, 250, 255]);
        let before = drawing.clone();

        let outcome = FloodFill::default().fill(&background, &mut drawing, 4, 4, BLUE);
        assert_eq!(outcome, FillOutcome::AlreadyFilled);
        assert!(!outcome.changed());
        assert_eq!(drawing, before);
    }

    #[test]
    fn test_fill_contained_by_boundary() {
        let background = PixelSurface::new(64, 64);
        let mut drawing = PixelSurface::new(64, 64);
        draw_box(&mut drawing, 10.0, 50.0, 4);
        let outline = drawing.clone();

        let outcome = FloodFill::default().fill(&background, &mut drawing, 30, 30, BLUE);
        assert!(outcome.changed());

        for y in 0..64 {
            for x in 0..64 {
                let before = outline.read_pixel(x, y);
                let after = drawing.read_pixel(x, y);
                let inside = x > 12 && x < 48 && y > 12 && y < 48;
                if before != TRANSPARENT {
                    assert_eq!(after, before, "boundary pixel ({x}, {y}) changed");
                } else if inside {
                    assert_eq!(after, BLUE.opaque(), "interior pixel ({x}, {y}) not filled");
                } else if x < 8 || x > 52 || y < 8 || y > 52 {
                    assert_eq!(after, TRANSPARENT, "exterior pixel ({x}, {y}) filled");
                }
            }
        }
    }

    #[test]
    fn test_fill_uses_background_boundaries() {
        // Background has a vertical black line splitting the canvas
        let mut background = PixelSurface::new(20, 10);
        background.fill([255, 255, 255, 255]);
        for y in 0..10 {
            background.write_pixel(10, y, [0, 0, 0, 255]);
        }
        let mut drawing = PixelSurface::new(20, 10);

        let outcome = FloodFill::default().fill(&background, &mut drawing, 2, 5, BLUE);
        assert_eq!(
            outcome,
            FillOutcome::Filled {
                pixels: 100,
                bounds: (0, 0, 10, 10)
            }
        );
        assert_eq!(drawing.read_pixel(9, 9), BLUE.opaque());
        assert_eq!(drawing.read_pixel(10, 5), TRANSPARENT);
        assert_eq!(drawing.read_pixel(15, 5), TRANSPARENT);
        // Background is never written
        assert_eq!(background.read_pixel(2, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_tolerance_boundary() {
        let engine = FloodFill::default();
        let seed = [100, 100, 100, 255];
        assert!(engine.within_tolerance([135, 65, 100, 255], seed));
        assert!(!engine.within_tolerance([136, 100, 100, 255], seed));
        assert!(!engine.within_tolerance([100, 100, 100, 219], seed));
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let mut background = PixelSurface::new(10, 1);
        for x in 0..10 {
            background.write_pixel(x, 0, [(x * 10) as u8, 0, 0, 255]);
        }
        let strict = FloodFill {
            tolerance: 5,
            ..Default::default()
        };
        let mut drawing = PixelSurface::new(10, 1);
        let outcome = strict.fill(&background, &mut drawing, 0, 0, BLUE);
        assert_eq!(outcome, FillOutcome::Filled { pixels: 1, bounds: (0, 0, 1, 1) });

        let loose = FloodFill {
            tolerance: 100,
            ..Default::default()
        };
        let mut drawing = PixelSurface::new(10, 1);
        let outcome = loose.fill(&background, &mut drawing, 0, 0, BLUE);
        assert_eq!(outcome, FillOutcome::Filled { pixels: 10, bounds: (0, 0, 10, 1) });
    }

    #[test]
    fn test_fill_large_region_iterative() {
        let background = PixelSurface::new(1024, 1024);
        let mut drawing = PixelSurface::new(1024, 1024);
        let outcome = FloodFill::default().fill(&background, &mut drawing, 0, 0, RED);
        assert_eq!(
            outcome,
            FillOutcome::Filled {
                pixels: 1024 * 1024,
                bounds: (0, 0, 1024, 1024)
            }
        );
    }
}
