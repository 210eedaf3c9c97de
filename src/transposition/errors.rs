//! Error types for the transposition engine.
//!
//! Both variants are terminal for the operation that raised them: they
//! signal bad input or a pitch outside the modeled accidental range, never
//! a transient condition. The engine fails without touching the caller's
//! document.

use thiserror::Error;

/// Failures the transposition engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspositionError {
    /// A requested or declared key signature falls outside the circle of
    /// fifths range.
    #[error("key signature {fifths} is out of range (must be between -7 and +7)")]
    InvalidKeyRange { fifths: i8 },

    /// A transposed note would need an alteration beyond double sharp or
    /// double flat.
    #[error("cannot spell transposed pitch {pitch} within double accidentals (part {part_id}, measure {measure})")]
    UnspellablePitch {
        part_id: String,
        measure: u32,
        pitch: String,
    },
}
