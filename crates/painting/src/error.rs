//! Error types for the painting engine.

use thiserror::Error;

/// Errors that can occur while decoding, encoding or exporting images.
///
/// Geometry never errors: out-of-bounds pixel access is a no-op.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Pixel buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Export transport failed: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
