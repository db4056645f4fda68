use crate::types::Rgba;

/// Fully transparent black, the contents of a freshly cleared surface.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Alpha written by flood fill.
pub const OPAQUE_ALPHA: u8 = 255;

/// Prefix of a PNG data URL as accepted by the save endpoint.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;
