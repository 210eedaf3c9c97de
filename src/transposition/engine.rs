//! The transposition engine.
//!
//! Borrows a parsed score and produces a new one with every pitched note
//! and key declaration shifted from the source key to the target key. The
//! transformation is pure: no I/O, no state across calls, and the input
//! score is never mutated, so concurrent calls on independent scores need
//! no coordination.

use log::{debug, info};

use crate::models::key::{MAX_FIFTHS, MIN_FIFTHS};
use crate::models::pitch::{Pitch, Step, MAX_ALTER, MIN_ALTER};
use crate::musicxml::types::{MeasureEvent, Part, Score};

use super::errors::TranspositionError;
use super::lookup_table::diatonic_alteration;

/// Transpose `score` from `source_fifths` to `target_fifths`.
///
/// Each part uses its own declared key signature for the delta when it has
/// one; `source_fifths` only stands in for parts that declare none. Every
/// key declaration in the output is set to `target_fifths`. When source and
/// target are equal the output is structurally identical to the input.
pub fn transpose(
    score: &Score,
    source_fifths: i8,
    target_fifths: i8,
) -> Result<Score, TranspositionError> {
    check_range(source_fifths)?;
    check_range(target_fifths)?;

    if source_fifths == target_fifths {
        return Ok(score.clone());
    }

    let mut transposed = score.clone();
    for part in &mut transposed.parts {
        let part_source = part.declared_key().unwrap_or(source_fifths);
        check_range(part_source)?;
        transpose_part(part, part_source, target_fifths)?;
    }

    info!(
        "transposed {} part(s) from fifths {} to {}",
        transposed.parts.len(),
        source_fifths,
        target_fifths
    );
    Ok(transposed)
}

fn check_range(fifths: i8) -> Result<(), TranspositionError> {
    if (MIN_FIFTHS..=MAX_FIFTHS).contains(&fifths) {
        Ok(())
    } else {
        Err(TranspositionError::InvalidKeyRange { fifths })
    }
}

fn transpose_part(
    part: &mut Part,
    source_fifths: i8,
    target_fifths: i8,
) -> Result<(), TranspositionError> {
    let fifths_delta = i32::from(target_fifths) - i32::from(source_fifths);
    let semitone_delta = normalize_semitones(fifths_delta * 7);
    debug!(
        "part {}: fifths delta {} ({} semitones)",
        part.id, fifths_delta, semitone_delta
    );

    let part_id = part.id.clone();
    for measure in &mut part.measures {
        if let Some(attributes) = measure.attributes.as_mut() {
            if attributes.key.is_some() {
                attributes.key = Some(target_fifths);
            }
        }
        for event in &mut measure.events {
            // Rests and unpitched percussion notes pass through unchanged
            if let MeasureEvent::Note(note) = event {
                note.pitch = transpose_pitch(
                    note.pitch,
                    source_fifths,
                    target_fifths,
                    fifths_delta,
                    semitone_delta,
                )
                .ok_or_else(|| TranspositionError::UnspellablePitch {
                    part_id: part_id.clone(),
                    measure: measure.number,
                    pitch: note.pitch.to_string(),
                })?;
            }
        }
    }
    Ok(())
}

/// Respell one pitch across the key change.
///
/// The letter advances by the diatonic interval of the fifths delta (four
/// letter steps per fifth). The new alteration is the target key's default
/// for that letter plus the note's chromatic deviation from the source
/// key's default, so diatonic notes stay diatonic and explicit accidentals
/// keep their distance from the key signature. The octave follows the
/// shifted absolute semitone value. Returns `None` when the required
/// alteration exceeds double accidentals.
fn transpose_pitch(
    pitch: Pitch,
    source_fifths: i8,
    target_fifths: i8,
    fifths_delta: i32,
    semitone_delta: i32,
) -> Option<Pitch> {
    let letter_steps = (fifths_delta * 4).rem_euclid(7) as usize;
    let step = Step::from_index(pitch.step.index() + letter_steps);

    let deviation =
        i32::from(pitch.alter) - i32::from(diatonic_alteration(source_fifths, pitch.step));
    let alter = i32::from(diatonic_alteration(target_fifths, step)) + deviation;
    if alter < i32::from(MIN_ALTER) || alter > i32::from(MAX_ALTER) {
        return None;
    }

    // The spelled pitch class always agrees with the shifted semitone value
    // modulo 12, so this division is exact.
    let semitone = pitch.semitone() + semitone_delta;
    let octave = (semitone - step.natural_semitone() - alter).div_euclid(12) - 1;

    Pitch::new(step, alter as i8, octave as i8).ok()
}

/// Reduce a raw semitone shift to its smallest-magnitude equivalent in
/// (-6, +6], so pitches move by the shortest musical distance.
fn normalize_semitones(raw: i32) -> i32 {
    let reduced = raw.rem_euclid(12);
    if reduced > 6 {
        reduced - 12
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(step: Step, alter: i8, octave: i8) -> Pitch {
        Pitch::new(step, alter, octave).unwrap()
    }

    #[test]
    fn test_normalize_semitones() {
        assert_eq!(normalize_semitones(0), 0);
        assert_eq!(normalize_semitones(35), -1); // +5 fifths
        assert_eq!(normalize_semitones(-35), 1); // -5 fifths
        assert_eq!(normalize_semitones(42), 6); // +6 fifths, tritone up
        assert_eq!(normalize_semitones(7), -5); // one fifth up spells as a fourth down
    }

    #[test]
    fn test_eb_major_to_d_major_moves_eb_down_to_d() {
        // -3 -> +2 is +5 fifths, i.e. one semitone down
        let result = transpose_pitch(pitch(Step::E, -1, 4), -3, 2, 5, -1).unwrap();
        assert_eq!(result, pitch(Step::D, 0, 4));
    }

    #[test]
    fn test_diatonic_notes_stay_diatonic() {
        // G4 in C major up a whole step lands on A4 in D major
        let result = transpose_pitch(pitch(Step::G, 0, 4), 0, 2, 2, 2).unwrap();
        assert_eq!(result, pitch(Step::A, 0, 4));
        // F#4 is the leading tone of G major; a whole step down it becomes E4
        let result = transpose_pitch(pitch(Step::F, 1, 4), 1, -1, -2, -2).unwrap();
        assert_eq!(result, pitch(Step::E, 0, 4));
    }

    #[test]
    fn test_explicit_accidental_keeps_its_deviation() {
        // C#4 in C major (raised first degree) up to D major becomes D#4
        let result = transpose_pitch(pitch(Step::C, 1, 4), 0, 2, 2, 2).unwrap();
        assert_eq!(result, pitch(Step::D, 1, 4));
    }

    #[test]
    fn test_octave_boundary_crossing() {
        // B4 up a whole step crosses into octave 5
        let result = transpose_pitch(pitch(Step::B, 0, 4), 0, 2, 2, 2).unwrap();
        assert_eq!(result, pitch(Step::C, 1, 5));
    }

    #[test]
    fn test_unspellable_pitch_is_rejected() {
        // C##4 in C major shifted to C# major would need a triple sharp
        assert_eq!(transpose_pitch(pitch(Step::C, 2, 4), 0, 7, 7, 1), None);
    }

    #[test]
    fn test_sounding_interval_is_preserved() {
        for (step, alter, octave) in [
            (Step::C, 0, 4),
            (Step::E, -1, 4),
            (Step::F, 1, 3),
            (Step::B, 0, 5),
            (Step::A, -1, 2),
        ] {
            let input = pitch(step, alter, octave);
            let output = transpose_pitch(input, -3, 2, 5, -1).unwrap();
            assert_eq!(output.semitone(), input.semitone() - 1, "input {}", input);
        }
    }
}
