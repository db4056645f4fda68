//! Image decode/encode and export transports
//!
//! Background images arrive as encoded bytes (PNG or JPEG) and are scaled to
//! the canvas. The export is a lossless PNG of the full composite, optionally
//! wrapped in a `data:image/png;base64,` URL for the save endpoint.

use std::io::Cursor;
use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage, imageops::FilterType};
use tracing::{debug, info};

use crate::constants::{BYTES_PER_PIXEL, PNG_DATA_URL_PREFIX};
use crate::error::PaintError;
use crate::surface::PixelSurface;

/// Something that persists an exported PNG
///
/// Implementations decide how the bytes travel (file, HTTP, IPC). A failed
/// delivery is reported back and never touches the canvas state.
pub trait ExportTransport {
    fn deliver(&mut self, png: &[u8]) -> Result<(), PaintError>;
}

/// Writes the export to a file, replacing any previous version
#[derive(Debug, Clone)]
pub struct FileTransport {
    pub path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportTransport for FileTransport {
    fn deliver(&mut self, png: &[u8]) -> Result<(), PaintError> {
        std::fs::write(&self.path, png)?;
        info!("Exported {} bytes to {}", png.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the most recent export in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    pub last: Option<Vec<u8>>,
    pub deliveries: usize,
}

impl ExportTransport for MemoryTransport {
    fn deliver(&mut self, png: &[u8]) -> Result<(), PaintError> {
        self.last = Some(png.to_vec());
        self.deliveries += 1;
        Ok(())
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Size of the encoded PNG
    pub bytes: usize,
    /// Monotonic export counter, used to bust viewer caches
    pub version: u64,
}

/// Decode an encoded image and scale it to `width`×`height`
pub fn decode_image(bytes: &[u8], width: u32, height: u32) -> Result<PixelSurface, PaintError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (src_w, src_h) = decoded.dimensions();
    let rgba = if (src_w, src_h) == (width, height) {
        decoded
    } else {
        debug!(
            "decode_image: scaling {}x{} to {}x{}",
            src_w, src_h, width, height
        );
        image::imageops::resize(&decoded, width, height, FilterType::Triangle)
    };
    PixelSurface::from_rgba_bytes(width, height, rgba.as_raw())
}

/// Encode a surface as PNG
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, PaintError> {
    let bytes = surface.as_bytes();
    let image = RgbaImage::from_raw(surface.width, surface.height, bytes.to_vec()).ok_or(
        PaintError::BufferSize {
            expected: surface.pixel_count() * BYTES_PER_PIXEL,
            actual: bytes.len(),
        },
    )?;
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes in a data URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// Extract the PNG bytes from a data URL produced by [`png_data_url`]
pub fn decode_png_data_url(url: &str) -> Result<Vec<u8>, PaintError> {
    let payload = url
        .trim()
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| PaintError::InvalidDataUrl(format!("expected {PNG_DATA_URL_PREFIX} prefix")))?;
    Ok(STANDARD.decode(payload)?)
}

/// Resource URL with a version query so a viewer reloads instead of using its cache
pub fn cache_busted_url(resource: &str, version: u64) -> String {
    let separator = if resource.contains('?') { '&' } else { '?' };
    format!("{resource}{separator}v={version}")
}
