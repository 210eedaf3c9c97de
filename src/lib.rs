//! keyshift - MusicXML key transposition.
//!
//! Parses MusicXML scores, transposes them between major keys on the
//! circle of fifths, and serializes them back. The surrounding workflow
//! (optical music recognition of scanned scores, PDF rendering) is driven
//! through external binaries by the `tools` module.

pub mod models;
pub mod musicxml;
pub mod tools;
pub mod transposition;

pub use models::key::KeySignature;
pub use models::pitch::{Pitch, Step};
pub use musicxml::{parse, serialize, ParseError, Score, ScoreSummary};
pub use transposition::{transpose, TranspositionError};
