//! Shared configuration for uvpaint
//!
//! This crate provides the single source of truth for canvas dimensions,
//! flood fill constants, history capacity and brush defaults, shared by the
//! painting core and the headless app.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 512;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 512;

/// Default per-channel flood fill tolerance
pub const DEFAULT_FILL_TOLERANCE: u8 = 35;

/// Default per-channel threshold below which a fill target counts as "already filled"
pub const DEFAULT_FILL_MATCH_THRESHOLD: u8 = 6;

/// Seed alpha must exceed this for the "already filled" shortcut to apply
pub const DEFAULT_FILL_MATCH_MIN_ALPHA: u8 = 200;

/// Default number of retained history snapshots
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Default brush diameter in pixels
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Default brush opacity
pub const DEFAULT_BRUSH_OPACITY: f32 = 1.0;

/// Default brush color as `#rrggbb`
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// Largest canvas edge accepted by [`PaintConfig::validate`]
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Errors produced while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Flood fill constants
///
/// Fill correctness is visibly sensitive to these values, which is why they
/// are configuration rather than constants baked into the fill engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Maximum per-channel difference from the seed still inside the region
    pub tolerance: u8,
    /// Channel difference below which the target already matches the seed
    pub match_threshold: u8,
    /// Minimum seed alpha for the already-filled shortcut
    pub match_min_alpha: u8,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_FILL_TOLERANCE,
            match_threshold: DEFAULT_FILL_MATCH_THRESHOLD,
            match_min_alpha: DEFAULT_FILL_MATCH_MIN_ALPHA,
        }
    }
}

/// Undo/redo history settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Brush defaults applied at startup and on reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Diameter in pixels
    pub size: u32,
    /// Opacity 0.0-1.0
    pub opacity: f32,
    /// Color as `#rrggbb`
    pub color: String,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            opacity: DEFAULT_BRUSH_OPACITY,
            color: DEFAULT_BRUSH_COLOR.to_string(),
        }
    }
}

/// Top-level paint configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub canvas: CanvasConfig,
    pub fill: FillConfig,
    pub history: HistoryConfig,
    pub brush: BrushConfig,
}

impl PaintConfig {
    /// Create a config with the given canvas dimensions and defaults elsewhere
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: CanvasConfig { width, height },
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading paint config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply `UVPAINT_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (env-shaped keys).
    ///
    /// Unparseable values are ignored with a warning.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = parse_override::<u8>(&lookup, "UVPAINT_FILL_TOLERANCE") {
            self.fill.tolerance = value;
        }
        if let Some(value) = parse_override::<u8>(&lookup, "UVPAINT_FILL_MATCH_THRESHOLD") {
            self.fill.match_threshold = value;
        }
        if let Some(value) = parse_override::<usize>(&lookup, "UVPAINT_HISTORY_CAPACITY") {
            self.history.capacity = value;
        }
        if let Some(value) = parse_override::<u32>(&lookup, "UVPAINT_CANVAS_SIZE") {
            self.canvas.width = value;
            self.canvas.height = value;
        }
        self
    }

    /// Check that every value is usable by the painting core
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasConfig { width, height } = self.canvas;
        if width == 0 || height == 0 || width > MAX_CANVAS_SIZE || height > MAX_CANVAS_SIZE {
            return Err(ConfigError::Invalid {
                field: "canvas",
                reason: format!("{width}x{height} is outside 1..={MAX_CANVAS_SIZE}"),
            });
        }
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history.capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.brush.size == 0 {
            return Err(ConfigError::Invalid {
                field: "brush.size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.brush.opacity) {
            return Err(ConfigError::Invalid {
                field: "brush.opacity",
                reason: format!("{} is outside 0.0..=1.0", self.brush.opacity),
            });
        }
        Ok(())
    }

    /// Total pixel count of the configured canvas
    pub fn pixel_count(&self) -> usize {
        (self.canvas.width as usize) * (self.canvas.height as usize)
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!("Config override {key}={raw}");
            Some(value)
        }
        Err(_) => {
            warn!("Ignoring unparseable config override {key}={raw}");
            None
        }
    }
}
