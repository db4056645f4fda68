//! Brush state and stroke rendering
//!
//! Strokes are rendered as hard-edged round stamps joined by capsules: `begin`
//! stamps a circle, each `extend` draws a segment of the brush width with
//! round caps from the previous cursor to the new point. There is no
//! interpolation beyond the round joins, so the caller must feed pointer
//! samples often enough to avoid visible faceting.

use glam::Vec2;
use tracing::{debug, warn};
use uvpaint_config::BrushConfig;

use crate::surface::PixelSurface;
use crate::types::{BlendMode, Color};

/// Current brush settings
#[derive(Debug, Clone, PartialEq)]
pub struct BrushState {
    /// Paint color
    pub color: Color,
    /// Diameter in pixels, at least 1
    size: u32,
    /// Opacity 0.0-1.0 (ignored by the eraser)
    opacity: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self::from_config(&BrushConfig::default())
    }
}

impl BrushState {
    /// Create a brush state, clamping size and opacity into range
    pub fn new(color: Color, size: u32, opacity: f32) -> Self {
        Self {
            color,
            size: size.max(1),
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Brush defaults from config. An unparseable color falls back to black.
    pub fn from_config(config: &BrushConfig) -> Self {
        let color = config.color.parse().unwrap_or_else(|err| {
            warn!("Brush config color {:?} rejected ({}); using black", config.color, err);
            Color::BLACK
        });
        Self::new(color, config.size, config.opacity)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
    }

    /// Ink for a stroke drawn in the given mode
    pub fn ink(&self, mode: BlendMode) -> Ink {
        match mode {
            BlendMode::Normal => Ink::Paint {
                color: self.color,
                opacity: self.opacity,
            },
            BlendMode::Erase => Ink::Erase,
        }
    }
}

/// What a stroke puts down on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ink {
    /// Source-over with the color at the given opacity
    Paint { color: Color, opacity: f32 },
    /// Clear covered pixels to full transparency
    Erase,
}

/// Style captured when a stroke begins
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveStroke {
    ink: Ink,
    radius: f32,
    cursor: Vec2,
}

/// Draws pencil and eraser strokes onto a surface
///
/// Pixel `(i, j)` covers `[i, i + 1) x [j, j + 1)`, the same convention fill
/// and the eyedropper use when they floor pointer coordinates. Stroke points
/// snap to the centre of the pixel containing them, so every stamp covers at
/// least the pixel under the pointer.
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    active: Option<ActiveStroke>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current stroke cursor (a pixel centre), valid only while a stroke is in progress
    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.active.map(|s| (s.cursor.x, s.cursor.y))
    }

    /// Start a stroke: stamp a round cap of diameter `size` at `(x, y)`.
    ///
    /// Returns the affected region `(x, y, width, height)`, or None if the
    /// stamp missed the surface entirely.
    pub fn begin(
        &mut self,
        surface: &mut PixelSurface,
        ink: Ink,
        size: u32,
        x: f32,
        y: f32,
    ) -> Option<(u32, u32, u32, u32)> {
        let stroke = ActiveStroke {
            ink,
            radius: size.max(1) as f32 / 2.0,
            cursor: snap_to_pixel(x, y),
        };
        self.active = Some(stroke);
        debug!(
            "StrokeRenderer::begin at ({:.1}, {:.1}), radius={:.1}, ink={:?}",
            x, y, stroke.radius, ink
        );
        apply_capsule(surface, stroke.cursor, stroke.cursor, stroke.radius, ink)
    }

    /// Draw a round-capped segment from the cursor to `(x, y)` and move the cursor.
    ///
    /// Does nothing if no stroke is in progress.
    pub fn extend(&mut self, surface: &mut PixelSurface, x: f32, y: f32) -> Option<(u32, u32, u32, u32)> {
        let Some(stroke) = self.active.as_mut() else {
            debug!("StrokeRenderer::extend: no active stroke, ignoring");
            return None;
        };
        let from = stroke.cursor;
        let to = snap_to_pixel(x, y);
        stroke.cursor = to;
        apply_capsule(surface, from, to, stroke.radius, stroke.ink)
    }

    /// Finish the stroke. Returns true if one was in progress, meaning a
    /// history snapshot should be taken.
    pub fn end(&mut self) -> bool {
        self.active.take().is_some()
    }
}

/// Centre of the pixel containing `(x, y)`
#[inline]
fn snap_to_pixel(x: f32, y: f32) -> Vec2 {
    Vec2::new(x.floor() + 0.5, y.floor() + 0.5)
}

/// Stamp every pixel whose centre `(px + 0.5, py + 0.5)` lies within `radius`
/// of segment `a`-`b`.
///
/// Returns the clipped bounding box of the stamp, or None when it is
/// completely outside the surface.
pub fn apply_capsule(
    surface: &mut PixelSurface,
    a: Vec2,
    b: Vec2,
    radius: f32,
    ink: Ink,
) -> Option<(u32, u32, u32, u32)> {
    if !(radius > 0.0) || !a.is_finite() || !b.is_finite() {
        return None;
    }
    if let Ink::Paint { opacity, .. } = ink {
        if opacity <= 0.0 {
            return None;
        }
    }

    let min = a.min(b) - Vec2::splat(radius);
    let max = a.max(b) + Vec2::splat(radius);

    // Pixels whose centres fall inside the box, clamped to the surface
    let x_min = (min.x - 0.5).ceil().max(0.0) as i64;
    let y_min = (min.y - 0.5).ceil().max(0.0) as i64;
    let x_max = ((max.x - 0.5).floor() as i64).min(surface.width as i64 - 1);
    let y_max = ((max.y - 0.5).floor() as i64).min(surface.height as i64 - 1);

    if x_min > x_max || y_min > y_max {
        return None;
    }

    let radius_sq = radius * radius;
    for py in y_min..=y_max {
        for px in x_min..=x_max {
            let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            if distance_sq_to_segment(p, a, b) > radius_sq {
                continue;
            }
            match ink {
                Ink::Paint { color, opacity } => {
                    surface.blend_pixel(px as i32, py as i32, color.opaque(), opacity)
                }
                Ink::Erase => surface.erase_pixel(px as i32, py as i32),
            }
        }
    }

    Some((
        x_min as u32,
        y_min as u32,
        (x_max - x_min + 1) as u32,
        (y_max - y_min + 1) as u32,
    ))
}

/// Squared distance from `p` to the closed segment `a`-`b`
#[inline]
fn distance_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    p.distance_squared(a + ab * t)
}
