//! Error types for MusicXML parsing.
//!
//! Serialization is total and has no error type: the engine only ever
//! produces well-formed scores.

use thiserror::Error;

/// Fatal parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("invalid XML: {0}")]
    InvalidXml(String),

    /// The document is XML but not a format we read (e.g. score-timewise).
    #[error("unsupported MusicXML format: {0}")]
    UnsupportedFormat(String),

    /// A required structural element is missing or carries a bad value.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}
