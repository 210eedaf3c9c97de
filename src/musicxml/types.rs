//! In-memory score structure and the load-time metadata summary.

use serde::Serialize;

use crate::models::key::KeySignature;
use crate::models::pitch::{Pitch, Step};

/// A parsed partwise score.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Work or movement title, when the document carries one.
    pub title: Option<String>,
    pub parts: Vec<Part>,
}

/// One part: an ordered sequence of measures.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// MusicXML part id ("P1").
    pub id: String,
    /// Part name from the part-list ("Piano").
    pub name: Option<String>,
    pub measures: Vec<Measure>,
}

/// One measure: optional attributes plus a sequence of events.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub number: u32,
    pub attributes: Option<Attributes>,
    pub events: Vec<MeasureEvent>,
}

/// The subset of MusicXML `<attributes>` the engine cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub divisions: Option<u32>,
    /// Key signature in fifths notation.
    pub key: Option<i8>,
    pub time: Option<TimeSignature>,
    /// Clef for the staff; carried through untouched so a bass-clef part
    /// does not come back in treble.
    pub clef: Option<Clef>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.divisions.is_none() && self.key.is_none() && self.time.is_none() && self.clef.is_none()
    }
}

/// A clef sign and staff line, e.g. G/2 (treble) or F/4 (bass). The line
/// is absent for line-independent signs like the percussion clef.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clef {
    pub sign: String,
    pub line: Option<u32>,
}

/// A beats / beat-type pair, e.g. 3/4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSignature {
    pub beats: u32,
    pub beat_type: u32,
}

/// One event inside a measure.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureEvent {
    /// A pitched note; the only event kind the engine rewrites.
    Note(NoteEvent),
    /// A rest; passed through unchanged.
    Rest(RestEvent),
    /// A percussion note with no definite pitch; passed through unchanged.
    Unpitched(UnpitchedEvent),
}

/// A pitched note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    /// Duration in divisions.
    pub duration: u32,
    /// MusicXML note type ("quarter", "half"), kept verbatim.
    pub note_type: Option<String>,
    /// True when the note sounds together with the previous one.
    pub chord: bool,
    /// First lyric syllable text, kept verbatim.
    pub lyric: Option<String>,
}

/// A rest.
#[derive(Debug, Clone, PartialEq)]
pub struct RestEvent {
    pub duration: u32,
    pub note_type: Option<String>,
}

/// An unpitched percussion note. Display position is notation-only and
/// never transposed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpitchedEvent {
    pub display_step: Option<Step>,
    pub display_octave: Option<i8>,
    pub duration: u32,
    pub note_type: Option<String>,
}

/// Read-only metadata derived from a score at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// First declared key signature, in fifths.
    pub key_fifths: Option<i8>,
    /// Major tonic name for the detected key ("Eb").
    pub key_name: Option<String>,
    pub time_signature: Option<TimeSignature>,
    /// Name of the first part.
    pub part_name: Option<String>,
    pub part_count: usize,
    pub measure_count: usize,
    pub note_count: usize,
}

impl Part {
    /// The part's own declared key signature: the first `<key>` fifths
    /// value found in its measures.
    pub fn declared_key(&self) -> Option<i8> {
        self.measures
            .iter()
            .find_map(|measure| measure.attributes.as_ref().and_then(|attrs| attrs.key))
    }
}

impl Score {
    /// First declared key signature across all parts.
    pub fn declared_key(&self) -> Option<i8> {
        self.parts.iter().find_map(|part| part.declared_key())
    }

    /// First declared time signature across all parts.
    pub fn declared_time(&self) -> Option<TimeSignature> {
        self.parts.iter().find_map(|part| {
            part.measures
                .iter()
                .find_map(|measure| measure.attributes.as_ref().and_then(|attrs| attrs.time))
        })
    }

    /// Build the load-time metadata summary.
    pub fn summary(&self) -> ScoreSummary {
        let key_fifths = self.declared_key();
        let key_name = key_fifths
            .and_then(KeySignature::new)
            .map(|key| key.tonic_name().to_string());
        ScoreSummary {
            key_fifths,
            key_name,
            time_signature: self.declared_time(),
            part_name: self.parts.first().and_then(|part| part.name.clone()),
            part_count: self.parts.len(),
            measure_count: self.parts.first().map_or(0, |part| part.measures.len()),
            note_count: self
                .parts
                .iter()
                .flat_map(|part| &part.measures)
                .flat_map(|measure| &measure.events)
                .filter(|event| matches!(event, MeasureEvent::Note(_)))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(step: Step, alter: i8, octave: i8) -> MeasureEvent {
        MeasureEvent::Note(NoteEvent {
            pitch: Pitch::new(step, alter, octave).unwrap(),
            duration: 4,
            note_type: Some("quarter".to_string()),
            chord: false,
            lyric: None,
        })
    }

    #[test]
    fn test_summary_reports_first_declared_key() {
        let score = Score {
            title: Some("Etude".to_string()),
            parts: vec![Part {
                id: "P1".to_string(),
                name: Some("Piano".to_string()),
                measures: vec![Measure {
                    number: 1,
                    attributes: Some(Attributes {
                        divisions: Some(1),
                        key: Some(-3),
                        time: Some(TimeSignature {
                            beats: 3,
                            beat_type: 4,
                        }),
                        clef: Some(Clef {
                            sign: "G".to_string(),
                            line: Some(2),
                        }),
                    }),
                    events: vec![note(Step::E, -1, 4), note(Step::G, 0, 4)],
                }],
            }],
        };

        let summary = score.summary();
        assert_eq!(summary.key_fifths, Some(-3));
        assert_eq!(summary.key_name.as_deref(), Some("Eb"));
        assert_eq!(
            summary.time_signature,
            Some(TimeSignature {
                beats: 3,
                beat_type: 4
            })
        );
        assert_eq!(summary.part_name.as_deref(), Some("Piano"));
        assert_eq!(summary.part_count, 1);
        assert_eq!(summary.measure_count, 1);
        assert_eq!(summary.note_count, 2);
    }

    #[test]
    fn test_declared_key_skips_parts_without_one() {
        let score = Score {
            title: None,
            parts: vec![
                Part {
                    id: "P1".to_string(),
                    name: None,
                    measures: vec![Measure {
                        number: 1,
                        attributes: None,
                        events: vec![],
                    }],
                },
                Part {
                    id: "P2".to_string(),
                    name: None,
                    measures: vec![Measure {
                        number: 1,
                        attributes: Some(Attributes {
                            divisions: None,
                            key: Some(2),
                            time: None,
                            clef: None,
                        }),
                        events: vec![],
                    }],
                },
            ],
        };
        assert_eq!(score.declared_key(), Some(2));
        assert_eq!(score.parts[0].declared_key(), None);
    }
}
