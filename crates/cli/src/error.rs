//! CLI failures and their process exit codes.
//!
//! clap exits with 2 on bad arguments before `run` is reached; everything
//! after that maps onto one of the codes below.

use pattern_studio_core::StudioError;
use thiserror::Error;

/// Rejected config, grid, surface or pattern.
pub const EXIT_ENGINE: i32 = 10;
/// Snapshot could not be written.
pub const EXIT_IO: i32 = 11;
/// Malformed `--config` JSON or non-finite numeric flags.
pub const EXIT_INPUT: i32 = 12;
/// Output could not be serialized.
pub const EXIT_SERIALIZATION: i32 = 13;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(StudioError),

    #[error("write failed: {0}")]
    Io(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("could not serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => EXIT_ENGINE,
            CliError::Io(_) => EXIT_IO,
            CliError::Input(_) => EXIT_INPUT,
            CliError::Serialization(_) => EXIT_SERIALIZATION,
        }
    }

    /// Short tag for `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Engine(_) => "engine",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }
}

// Core I/O failures only come from snapshot writes, so they keep their own code.
impl From<StudioError> for CliError {
    fn from(e: StudioError) -> Self {
        match e {
            StudioError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}
