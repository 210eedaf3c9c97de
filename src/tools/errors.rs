//! Error types for the external tool boundary.
//!
//! Deliberately a separate category from the transposition and parse
//! errors, so callers can tell "my request was invalid" apart from "the
//! OMR or rendering backend failed".

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures while driving an external subprocess.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The configured binary does not exist and was not found on PATH.
    #[error("{tool} binary not found at '{path}' (set the environment override or install it)")]
    BinaryNotFound { tool: &'static str, path: PathBuf },

    /// The subprocess ran but exited unsuccessfully.
    #[error("{tool} failed with {status}: {stderr}")]
    ExecutionFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    /// The subprocess succeeded but left no usable output file.
    #[error("{tool} produced no output file")]
    NoOutput { tool: &'static str },

    /// A compressed `.mxl` file could not be read as a ZIP archive, or
    /// contained no MusicXML document.
    #[error("'{path}' is not a usable MusicXML archive: {reason}")]
    InvalidArchive { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
