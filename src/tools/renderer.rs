//! PDF rendering via the MuseScore command line.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use super::config::ToolConfig;
use super::errors::ToolError;
use super::omr::pick_output;

const TOOL: &str = "PDF renderer";

/// Render a MusicXML file to PDF.
///
/// When `output` is `None` the PDF lands next to the input with a `.pdf`
/// extension.
pub fn render_pdf(
    config: &ToolConfig,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf, ToolError> {
    let binary = config.resolve_renderer()?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("pdf"));

    info!(
        "rendering {} to {} with {}",
        input.display(),
        output.display(),
        binary.display()
    );
    let result = Command::new(&binary)
        .arg("-o")
        .arg(&output)
        .arg(input)
        .output()?;

    if !result.status.success() {
        return Err(ToolError::ExecutionFailed {
            tool: TOOL,
            status: result.status,
            stderr: pick_output(&result.stderr, &result.stdout),
        });
    }
    if !output.exists() {
        return Err(ToolError::NoOutput { tool: TOOL });
    }

    info!("PDF created: {}", output.display());
    Ok(output)
}
