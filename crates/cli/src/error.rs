//! CLI errors with distinct exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (unknown color, bad thresholds, bad settings)
//! - 11: I/O error (reading a dataset or config file)
//! - 12: input error (malformed dataset, bad point, bad filter)
//! - 13: serialization error

use hue_knew_core::HueError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A core error (unknown color, inconsistent thresholds, bad settings).
    Core(HueError),
    /// A file could not be read.
    Io(String),
    /// User-supplied data could not be interpreted.
    Input(String),
    /// JSON output failure.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<HueError> for CliError {
    fn from(e: HueError) -> Self {
        match e {
            HueError::Dataset(msg) => CliError::Input(msg),
            other => CliError::Core(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
