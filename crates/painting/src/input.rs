//! Pointer input in canvas pixel coordinates

/// Pointer event already normalized to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

/// Maps element-relative pointer positions onto canvas pixels.
///
/// The canvas backing store is a fixed size while the element showing it is
/// laid out by the page, so each axis scales by `canvas / displayed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    pub x: f32,
    pub y: f32,
}

impl Default for CanvasScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CanvasScale {
    pub const IDENTITY: CanvasScale = CanvasScale { x: 1.0, y: 1.0 };

    /// Scale for a canvas of `canvas_*` pixels displayed at `displayed_*`.
    ///
    /// A degenerate displayed size falls back to identity on that axis.
    pub fn from_sizes(canvas_width: u32, canvas_height: u32, displayed_width: f32, displayed_height: f32) -> Self {
        let axis = |canvas: u32, displayed: f32| {
            if displayed > 0.0 && displayed.is_finite() {
                canvas as f32 / displayed
            } else {
                1.0
            }
        };
        Self {
            x: axis(canvas_width, displayed_width),
            y: axis(canvas_height, displayed_height),
        }
    }

    /// Convert an element-relative position to canvas pixels
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.x, y * self.y)
    }

    /// Scale the position carried by an event
    pub fn apply(&self, event: PointerEvent) -> PointerEvent {
        match event {
            PointerEvent::Down { x, y } => {
                let (x, y) = self.to_canvas(x, y);
                PointerEvent::Down { x, y }
            }
            PointerEvent::Move { x, y } => {
                let (x, y) = self.to_canvas(x, y);
                PointerEvent::Move { x, y }
            }
            other => other,
        }
    }
}
