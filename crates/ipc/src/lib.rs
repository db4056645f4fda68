//! IPC message protocol for uvpaint
//!
//! Defines the command, pointer input, and notification types exchanged
//! between a UI (or a recorded session script) and the painting engine.

pub mod commands;
pub mod error;
pub mod input;
pub mod messages;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;
