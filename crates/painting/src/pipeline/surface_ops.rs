//! Surface operations for the painting pipeline

use tracing::{info, warn};

use super::PaintingPipeline;
use crate::brush::{BrushState, StrokeRenderer};
use crate::composite::composite;
use crate::error::PaintError;
use crate::export::{ExportReceipt, ExportTransport, decode_image, encode_png, png_data_url};
use crate::surface::PixelSurface;

impl PaintingPipeline {
    /// Erase the whole drawing layer as one undoable action
    pub fn clear(&mut self) {
        self.finish_interrupted_stroke();
        self.drawing.clear();
        self.commit();
        info!("Cleared drawing layer");
    }

    /// Start over: blank drawing, default brush, pencil, fresh history
    ///
    /// The background and export counter are kept.
    pub fn reset(&mut self) {
        self.stroke = StrokeRenderer::new();
        self.tools.reset();
        self.brush = BrushState::from_config(&self.config.brush);
        self.drawing.clear();
        self.history.reset(self.drawing.snapshot());
        info!("Reset painting session");
    }

    /// Decode and install an encoded background image, scaled to the canvas
    ///
    /// On a decode failure the background becomes transparent and painting
    /// stays usable. Returns whether the image loaded.
    pub fn load_background(&mut self, bytes: &[u8]) -> bool {
        match decode_image(bytes, self.width(), self.height()) {
            Ok(surface) => {
                self.background = surface;
                info!("Loaded {} byte background image", bytes.len());
                true
            }
            Err(err) => {
                warn!("Background image failed to decode ({}); using transparent", err);
                self.background = PixelSurface::new(self.width(), self.height());
                false
            }
        }
    }

    /// Replace the background with an already-decoded surface
    pub fn set_background(&mut self, background: PixelSurface) {
        if background.width != self.width() || background.height != self.height() {
            warn!(
                "set_background: {}x{} does not match canvas {}x{}",
                background.width,
                background.height,
                self.width(),
                self.height()
            );
        }
        self.background = background;
    }

    /// Background with the drawing on top, as the user sees it
    pub fn composite(&self) -> PixelSurface {
        composite(&self.background, &self.drawing)
    }

    /// Encode the composite as PNG
    pub fn export_png(&self) -> Result<Vec<u8>, PaintError> {
        encode_png(&self.composite())
    }

    /// Encode the composite as a `data:image/png;base64,` URL
    pub fn export_data_url(&self) -> Result<String, PaintError> {
        Ok(png_data_url(&self.export_png()?))
    }

    /// Encode the composite and hand it to `transport`
    ///
    /// The export version only advances when delivery succeeds. Canvas,
    /// history and tool state are never touched.
    pub fn export_to(&mut self, transport: &mut dyn ExportTransport) -> Result<ExportReceipt, PaintError> {
        let png = self.export_png()?;
        if let Err(err) = transport.deliver(&png) {
            warn!("Export delivery failed: {}", err);
            return Err(err);
        }
        self.export_version += 1;
        info!("Export {} delivered ({} bytes)", self.export_version, png.len());
        Ok(ExportReceipt {
            bytes: png.len(),
            version: self.export_version,
        })
    }
}
