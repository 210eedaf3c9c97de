//! MusicXML document model: parse and serialize of partwise scores.
//!
//! The model keeps exactly the structure the transposition engine needs:
//! parts, measures, per-measure attributes (divisions, key, time) and note,
//! rest and unpitched events. Layout and engraving metadata outside that
//! scope is dropped on parse.

pub mod builder;
pub mod emitter;
pub mod errors;
pub mod parser;
pub mod types;

pub use emitter::serialize;
pub use errors::ParseError;
pub use parser::parse;
pub use types::{Score, ScoreSummary};
