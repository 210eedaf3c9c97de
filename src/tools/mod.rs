//! External tool orchestration.
//!
//! The OMR recognizer (Audiveris) and the PDF renderer (MuseScore) are
//! opaque subprocesses: a file goes in, a file or a failure comes out.
//! Their locations are explicit configuration, never process-wide state.

pub mod config;
pub mod errors;
pub mod omr;
pub mod renderer;

pub use config::ToolConfig;
pub use errors::ToolError;
pub use omr::{recognize, unpack_mxl};
pub use renderer::render_pdf;
