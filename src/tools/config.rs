//! Explicit configuration for the external binaries.

use std::env;
use std::path::{Path, PathBuf};

use super::errors::ToolError;

/// Environment variable overriding the OMR binary location.
pub const OMR_BIN_ENV: &str = "AUDIVERIS_BIN";
/// Environment variable overriding the renderer binary location.
pub const RENDERER_BIN_ENV: &str = "MUSESCORE_BIN";

/// Locations of the OMR and rendering binaries.
///
/// Built once by the caller and passed into the functions that spawn the
/// tools; the transposition engine itself needs none of this.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub omr_bin: PathBuf,
    pub renderer_bin: PathBuf,
}

impl ToolConfig {
    pub fn new(omr_bin: impl Into<PathBuf>, renderer_bin: impl Into<PathBuf>) -> Self {
        Self {
            omr_bin: omr_bin.into(),
            renderer_bin: renderer_bin.into(),
        }
    }

    /// Read the environment overrides, falling back to per-OS defaults.
    pub fn from_env() -> Self {
        Self {
            omr_bin: env::var_os(OMR_BIN_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_omr_bin),
            renderer_bin: env::var_os(RENDERER_BIN_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_renderer_bin),
        }
    }

    /// Resolve the OMR binary to an existing executable path.
    pub fn resolve_omr(&self) -> Result<PathBuf, ToolError> {
        resolve(&self.omr_bin, "OMR recognizer")
    }

    /// Resolve the renderer binary to an existing executable path.
    pub fn resolve_renderer(&self) -> Result<PathBuf, ToolError> {
        resolve(&self.renderer_bin, "PDF renderer")
    }
}

/// Accept either an absolute path that exists or a name found on PATH.
fn resolve(bin: &Path, tool: &'static str) -> Result<PathBuf, ToolError> {
    if bin.exists() {
        return Ok(bin.to_path_buf());
    }
    which::which(bin).map_err(|_| ToolError::BinaryNotFound {
        tool,
        path: bin.to_path_buf(),
    })
}

#[cfg(target_os = "macos")]
fn default_omr_bin() -> PathBuf {
    PathBuf::from("/Applications/Audiveris.app/Contents/MacOS/Audiveris")
}

#[cfg(target_os = "macos")]
fn default_renderer_bin() -> PathBuf {
    PathBuf::from("/Applications/MuseScore 4.app/Contents/MacOS/mscore")
}

#[cfg(target_os = "windows")]
fn default_omr_bin() -> PathBuf {
    PathBuf::from("C:\\Program Files\\Audiveris\\Audiveris.exe")
}

#[cfg(target_os = "windows")]
fn default_renderer_bin() -> PathBuf {
    PathBuf::from("C:\\Program Files\\MuseScore 4\\bin\\MuseScore4.exe")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_omr_bin() -> PathBuf {
    PathBuf::from("audiveris")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_renderer_bin() -> PathBuf {
    PathBuf::from("musescore3")
}
