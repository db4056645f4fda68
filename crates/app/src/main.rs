//! uvpaint - headless UV texture painter

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use uvpaint_config::PaintConfig;
use uvpaint_ipc::{EngineToUi, Session};
use uvpaint_painting::{ExportTransport, FileTransport, MemoryTransport, PaintError, PaintingPipeline};

mod cli;
mod error;
mod replay;

use cli::CliArgs;
use error::AppError;
use replay::SessionRunner;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let config = load_config(args.config.as_deref())?;
    info!(
        "Starting uvpaint with a {}x{} canvas",
        config.canvas.width, config.canvas.height
    );

    let mut pipeline = PaintingPipeline::new(config);
    if let Some(path) = &args.background {
        match std::fs::read(path) {
            Ok(bytes) => {
                pipeline.load_background(&bytes);
            }
            Err(err) => warn!("Background {} unreadable ({}); using transparent", path.display(), err),
        }
    }

    let session = match &args.session {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|err| AppError::io(path, err))?;
            Session::from_json(&json)?
        }
        None => Session::default(),
    };

    let mut file_transport = args.output.clone().map(FileTransport::new);
    let mut memory_transport = MemoryTransport::default();
    let transport: &mut dyn ExportTransport = match file_transport.as_mut() {
        Some(file) => file,
        None => &mut memory_transport,
    };

    let mut runner = SessionRunner::new(pipeline, transport).with_resource(args.resource.clone());
    for event in runner.replay(&session) {
        emit(&event)?;
    }

    if args.output.is_some() {
        let event = runner.export();
        emit(&event)?;
        if let EngineToUi::Error { message, .. } = event {
            return Err(AppError::Paint(PaintError::Transport(message)));
        }
    }

    if let Some(path) = &args.data_url {
        let url = runner.pipeline().export_data_url()?;
        std::fs::write(path, url).map_err(|err| AppError::io(path, err))?;
        info!("Wrote data URL to {}", path.display());
    }

    Ok(())
}

/// Config file (if any), then `UVPAINT_*` environment overrides
fn load_config(path: Option<&Path>) -> Result<PaintConfig, AppError> {
    let config = match path {
        Some(path) => PaintConfig::from_file(path)?,
        None => PaintConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Print a notification as one JSON line on stdout
fn emit(event: &EngineToUi) -> Result<(), AppError> {
    println!("{}", event.to_json()?);
    Ok(())
}
