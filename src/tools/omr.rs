//! Optical music recognition via the Audiveris batch CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use walkdir::WalkDir;

use super::config::ToolConfig;
use super::errors::ToolError;

const TOOL: &str = "OMR recognizer";

/// Extensions the recognizer may produce, in preference order. Compressed
/// `.mxl` archives come last; they are unpacked before being handed back.
const OUTPUT_EXTENSIONS: [&str; 3] = ["musicxml", "xml", "mxl"];

/// Run the OMR recognizer on a scanned score (PDF or image).
///
/// The tool works in a temporary directory; the first recognized MusicXML
/// output is copied next to the input file and its path returned. The
/// recognizer's default export is a compressed `.mxl` archive, so that
/// case is unpacked first and the contained document is what lands next
/// to the input.
pub fn recognize(config: &ToolConfig, input: &Path) -> Result<PathBuf, ToolError> {
    let binary = config.resolve_omr()?;
    let workdir = tempfile::Builder::new().prefix("keyshift-omr-").tempdir()?;

    info!("running {} on {}", binary.display(), input.display());
    let output = Command::new(&binary)
        .arg("-batch")
        .arg("-export")
        .arg("-output")
        .arg(workdir.path())
        .arg(input)
        .output()?;

    if !output.status.success() {
        return Err(ToolError::ExecutionFailed {
            tool: TOOL,
            status: output.status,
            stderr: pick_output(&output.stderr, &output.stdout),
        });
    }

    let mut produced = find_output(workdir.path()).ok_or(ToolError::NoOutput { tool: TOOL })?;
    debug!("recognizer output: {}", produced.display());

    if has_extension(&produced, "mxl") {
        produced = unpack_mxl(&produced)?;
        debug!("unpacked archive to {}", produced.display());
    }

    let extension = produced.extension().and_then(|ext| ext.to_str()).unwrap_or("xml");
    let target = input.with_extension(extension);
    fs::copy(&produced, &target)?;

    info!("recognized score written to {}", target.display());
    Ok(target)
}

/// Extract a compressed `.mxl` archive next to itself and return the path
/// of the MusicXML document inside.
///
/// The archive's `META-INF/` manifest is ignored; the first `.musicxml` or
/// `.xml` entry outside it is taken as the score.
pub fn unpack_mxl(archive: &Path) -> Result<PathBuf, ToolError> {
    let bad_archive = |reason: String| ToolError::InvalidArchive {
        path: archive.to_path_buf(),
        reason,
    };

    let stem = archive
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("score");
    let out_dir = archive.with_file_name(format!("{}_unzipped", stem));

    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|error| bad_archive(error.to_string()))?;
    zip.extract(&out_dir)
        .map_err(|error| bad_archive(error.to_string()))?;

    for wanted in ["musicxml", "xml"] {
        let found = WalkDir::new(&out_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(|entry| entry.into_path())
            .filter(|path| {
                !path
                    .components()
                    .any(|component| component.as_os_str() == "META-INF")
            })
            .find(|path| has_extension(path, wanted));
        if let Some(found) = found {
            return Ok(found);
        }
    }
    Err(bad_archive("no MusicXML document inside".to_string()))
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

/// Locate the first recognized output below `dir`, preferring uncompressed
/// MusicXML.
fn find_output(dir: &Path) -> Option<PathBuf> {
    for wanted in OUTPUT_EXTENSIONS {
        let found = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(|entry| entry.into_path())
            .find(|path| has_extension(path, wanted));
        if found.is_some() {
            return found;
        }
    }
    None
}

pub(crate) fn pick_output(stderr: &[u8], stdout: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}
