//! Diatonic alteration lookup table.
//!
//! For each major key (fifths -7 through +7) and each letter, the table
//! gives the alteration that letter carries by default under the key
//! signature. Example: two sharps (D major) sharpen F and C, so that row
//! reads [1, 0, 0, 1, 0, 0, 0] across the letters C through B.

use crate::models::pitch::Step;

/// Rows indexed by fifths + 7, columns by letter (C=0 through B=6).
pub const DIATONIC_ALTERATIONS: [[i8; 7]; 15] = [
    [-1, -1, -1, -1, -1, -1, -1], // -7 Cb major
    [-1, -1, -1, 0, -1, -1, -1],  // -6 Gb major
    [0, -1, -1, 0, -1, -1, -1],   // -5 Db major
    [0, -1, -1, 0, 0, -1, -1],    // -4 Ab major
    [0, 0, -1, 0, 0, -1, -1],     // -3 Eb major
    [0, 0, -1, 0, 0, 0, -1],      // -2 Bb major
    [0, 0, 0, 0, 0, 0, -1],       // -1 F major
    [0, 0, 0, 0, 0, 0, 0],        //  0 C major
    [0, 0, 0, 1, 0, 0, 0],        // +1 G major
    [1, 0, 0, 1, 0, 0, 0],        // +2 D major
    [1, 0, 0, 1, 1, 0, 0],        // +3 A major
    [1, 1, 0, 1, 1, 0, 0],        // +4 E major
    [1, 1, 0, 1, 1, 1, 0],        // +5 B major
    [1, 1, 1, 1, 1, 1, 0],        // +6 F# major
    [1, 1, 1, 1, 1, 1, 1],        // +7 C# major
];

/// Default alteration carried by `step` under a key signature of `fifths`.
///
/// `fifths` must already be validated to [-7, +7]; the engine checks the
/// range before any lookup.
pub fn diatonic_alteration(fifths: i8, step: Step) -> i8 {
    DIATONIC_ALTERATIONS[(fifths + 7) as usize][step.index()]
}
