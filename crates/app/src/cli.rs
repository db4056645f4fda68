//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Paint onto a model texture without a UI.
///
/// Loads the background texture, replays a recorded session of paint
/// commands and writes the composite as PNG.
#[derive(Parser, Debug)]
#[command(
    name = "uvpaint",
    version,
    about = "Headless UV texture painter",
    long_about = "Replay a JSON session of paint commands (tool changes, pointer\n\
                  input, fills, undo/redo, exports) over a background texture and\n\
                  export the composite as a lossless PNG.\n\n\
                  Example:\n  \
                  uvpaint --background car.jpg --session strokes.json --output car.png"
)]
pub struct CliArgs {
    /// Background texture (PNG or JPEG), scaled to the canvas size.
    /// A missing or undecodable image leaves the background transparent.
    #[arg(short, long, value_name = "IMAGE")]
    pub background: Option<PathBuf>,

    /// Session script: `{ "display": {...}, "commands": [...] }`.
    #[arg(short, long, value_name = "SESSION.json")]
    pub session: Option<PathBuf>,

    /// Paint config JSON. UVPAINT_* environment variables override it.
    #[arg(short, long, value_name = "CONFIG.json")]
    pub config: Option<PathBuf>,

    /// Destination for every export, including the final one after replay.
    #[arg(short, long, value_name = "FILE.png")]
    pub output: Option<PathBuf>,

    /// Also write the final composite as a `data:image/png;base64,` URL.
    #[arg(long, value_name = "FILE")]
    pub data_url: Option<PathBuf>,

    /// Viewer resource URL; export notifications carry it with a `v=` cache buster.
    #[arg(short, long, value_name = "URL")]
    pub resource: Option<String>,
}
