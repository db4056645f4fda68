//! Errors surfaced by the uvpaint binary

use std::path::PathBuf;

use thiserror::Error;
use uvpaint_config::ConfigError;
use uvpaint_ipc::IpcError;
use uvpaint_painting::PaintError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] IpcError),

    #[error("Paint error: {0}")]
    Paint(#[from] PaintError),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
