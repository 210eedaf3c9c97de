//! Key signatures on the circle of fifths.
//!
//! A key signature is a signed fifths count: negative for flats, positive
//! for sharps, zero for C major. Only major keys are modeled; minor and
//! modal signatures are out of scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most flats a key signature can carry (Cb major).
pub const MIN_FIFTHS: i8 = -7;
/// Most sharps a key signature can carry (C# major).
pub const MAX_FIFTHS: i8 = 7;

/// Major-key tonic names indexed by fifths + 7 (Cb major through C# major).
const TONIC_NAMES: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

/// A validated key signature in fifths notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeySignature(i8);

impl KeySignature {
    /// Create a key signature, rejecting fifths outside [-7, +7].
    pub fn new(fifths: i8) -> Option<KeySignature> {
        if (MIN_FIFTHS..=MAX_FIFTHS).contains(&fifths) {
            Some(KeySignature(fifths))
        } else {
            None
        }
    }

    /// The signed fifths count.
    pub fn fifths(&self) -> i8 {
        self.0
    }

    /// Major-key tonic name, e.g. "Eb" for three flats.
    pub fn tonic_name(&self) -> &'static str {
        TONIC_NAMES[(self.0 - MIN_FIFTHS) as usize]
    }

    /// Look up a key signature by its major tonic name ("D", "Bb", "F#").
    pub fn from_tonic_name(name: &str) -> Option<KeySignature> {
        TONIC_NAMES
            .iter()
            .position(|&tonic| tonic.eq_ignore_ascii_case(name))
            .map(|index| KeySignature(index as i8 + MIN_FIFTHS))
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} major", self.tonic_name())
    }
}

/// Failure to interpret a string as a key signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized key '{0}' (expected fifths between -7 and +7, or a tonic name like 'D' or 'Bb')")]
pub struct KeyParseError(String);

impl FromStr for KeySignature {
    type Err = KeyParseError;

    /// Accepts either a fifths integer ("-3", "2") or a tonic name ("Eb", "D").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(fifths) = trimmed.parse::<i8>() {
            return KeySignature::new(fifths).ok_or_else(|| KeyParseError(s.to_string()));
        }
        KeySignature::from_tonic_name(trimmed).ok_or_else(|| KeyParseError(s.to_string()))
    }
}
