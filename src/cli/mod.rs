//! CLI command handlers
//!
//! This module bridges the clap argument parsing in `main` with the service
//! layer.

pub mod digest;
pub mod snapshot;

pub use digest::{handle_preview_command, handle_run_command};
pub use snapshot::handle_snapshot_command;
