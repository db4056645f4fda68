//! CPU surface for painting - 8-bit RGBA storage

use std::sync::Arc;

use tracing::warn;

use crate::constants::{BYTES_PER_PIXEL, TRANSPARENT};
use crate::error::PaintError;
use crate::types::Rgba;

/// Immutable capture of a surface's pixels.
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[Rgba]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Captured pixel data in row-major order
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

/// A fixed-size 8-bit RGBA CPU surface
///
/// Coordinates are signed so callers can pass pointer positions that have
/// drifted off the canvas; anything out of bounds reads as transparent and
/// writes are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<Rgba>,
}

impl PixelSurface {
    /// Create a new surface with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; pixel_count],
        }
    }

    /// Create a surface from tightly packed RGBA bytes
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, PaintError> {
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(PaintError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytes
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|c| [c[0], c[1], c[2], c[3]])
                .collect(),
        })
    }

    /// Clear every pixel to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// Fill every pixel with a solid color
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Whether the coordinate lies on the surface
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Read a pixel; out of bounds reads as transparent black
    #[inline]
    pub fn read_pixel(&self, x: i32, y: i32) -> Rgba {
        self.get_pixel(x, y).unwrap_or(TRANSPARENT)
    }

    /// Set a pixel at the given coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend a color onto an existing pixel using source-over compositing
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, opacity: f32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = blend_over(self.pixels[i], color, opacity);
        }
    }

    /// Erase a pixel to full transparency
    #[inline]
    pub fn erase_pixel(&mut self, x: i32, y: i32) {
        self.write_pixel(x, y, TRANSPARENT);
    }

    /// Get pixel data for a rectangular region
    /// Returns pixels in row-major order, clamped to surface bounds
    pub fn read_region(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<Rgba> {
        let (x0, y0, x1, y1) = self.clip(x, y, width, height);
        let mut data = Vec::with_capacity((x1 - x0) * (y1 - y0));
        let stride = self.width as usize;
        for row in y0..y1 {
            data.extend_from_slice(&self.pixels[row * stride + x0..row * stride + x1]);
        }
        data
    }

    /// Write a row-major `width`×`height` block with its top-left at `(x, y)`.
    ///
    /// Parts of the block that fall outside the surface are skipped. A buffer
    /// shorter than `width * height` writes only the rows it fully covers.
    pub fn write_region(&mut self, buffer: &[Rgba], x: i32, y: i32, width: u32, height: u32) {
        let width = width as usize;
        let stride = self.width as usize;
        for row in 0..height as usize {
            let src_start = row * width;
            let Some(src_row) = buffer.get(src_start..src_start + width) else {
                break;
            };
            // i64 so blocks placed near i32::MAX cannot overflow
            let dst_y = y as i64 + row as i64;
            if dst_y < 0 || dst_y >= self.height as i64 {
                continue;
            }
            for (col, pixel) in src_row.iter().enumerate() {
                let dst_x = x as i64 + col as i64;
                if dst_x < 0 || dst_x >= self.width as i64 {
                    continue;
                }
                self.pixels[dst_y as usize * stride + dst_x as usize] = *pixel;
            }
        }
    }

    /// Clip a rectangle to the surface, returning `(x0, y0, x1, y1)` with exclusive ends
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> (usize, usize, usize, usize) {
        let clamp = |v: i64, max: u32| v.clamp(0, max as i64) as usize;
        let x0 = clamp(x as i64, self.width);
        let y0 = clamp(y as i64, self.height);
        let x1 = clamp(x as i64 + width as i64, self.width).max(x0);
        let y1 = clamp(y as i64 + height as i64, self.height).max(y0);
        (x0, y0, x1, y1)
    }

    /// Capture the full surface
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: Arc::from(self.pixels.as_slice()),
        }
    }

    /// Replace the full surface contents with a snapshot
    ///
    /// A snapshot of different dimensions is ignored.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width != self.width || snapshot.height != self.height {
            warn!(
                "PixelSurface::restore: snapshot is {}x{}, surface is {}x{}; ignoring",
                snapshot.width, snapshot.height, self.width, self.height
            );
            return;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
    }

    /// Get raw pixel data as RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get direct access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Get mutable access to pixel data (for advanced operations)
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }
}

/// Non-premultiplied source-over: `src` at `opacity` on top of `dst`.
#[inline]
pub fn blend_over(dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
    let src_alpha = (src[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return dst;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let dst_weight = dst_alpha * (1.0 - src_alpha);
    let out_alpha = src_alpha + dst_weight;

    let channel = |s: u8, d: u8| {
        let value = (s as f32 * src_alpha + d as f32 * dst_weight) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}
