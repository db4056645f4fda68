use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::OPAQUE_ALPHA;
use crate::error::PaintError;

/// One 8-bit RGBA pixel, non-premultiplied
pub type Rgba = [u8; 4];

/// Paint tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Tool {
    #[default]
    Pencil = 0,
    Eraser = 1,
    Fill = 2,
    Eyedropper = 3,
}

impl Tool {
    /// Blend mode used when this tool draws a stroke, or None for
    /// tools that never stroke
    pub fn blend_mode(self) -> Option<BlendMode> {
        match self {
            Tool::Pencil => Some(BlendMode::Normal),
            Tool::Eraser => Some(BlendMode::Erase),
            Tool::Fill | Tool::Eyedropper => None,
        }
    }
}

/// Blend modes for painting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Erase = 1,
}

/// Canonical brush color (RGB, alpha comes from opacity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Drop the alpha channel of a pixel
    pub fn from_rgba(pixel: Rgba) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Pixel with the given alpha
    pub fn with_alpha(self, alpha: u8) -> Rgba {
        [self.r, self.g, self.b, alpha]
    }

    /// Fully opaque pixel
    pub fn opaque(self) -> Rgba {
        self.with_alpha(OPAQUE_ALPHA)
    }

    /// Format as `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PaintError;

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || PaintError::InvalidColor(s.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc -> #aabbcc
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}
