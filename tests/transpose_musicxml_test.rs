// End-to-end transposition through the document model:
// parse -> transpose -> serialize, checking the engine laws from the
// musical side (spelling, octaves, preservation of non-pitch content).

use pretty_assertions::assert_eq;

use keyshift::musicxml::types::MeasureEvent;
use keyshift::{parse, serialize, transpose, Pitch, Step, TranspositionError};

const EB_MAJOR_SCORE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<score-partwise version="3.1">
  <part-list>
    <score-part id="P1"><part-name>Clarinet</part-name></score-part>
  </part-list>
  <part id="P1">
    <measure number="1">
      <attributes>
        <divisions>2</divisions>
        <key><fifths>-3</fifths></key>
        <time><beats>3</beats><beat-type>4</beat-type></time>
      </attributes>
      <note>
        <pitch><step>E</step><alter>-1</alter><octave>4</octave></pitch>
        <duration>2</duration>
        <type>quarter</type>
      </note>
      <note>
        <pitch><step>G</step><octave>4</octave></pitch>
        <duration>2</duration>
        <type>quarter</type>
      </note>
      <note><rest/><duration>2</duration></note>
    </measure>
    <measure number="2">
      <note>
        <pitch><step>B</step><alter>-1</alter><octave>4</octave></pitch>
        <duration>4</duration>
        <type>half</type>
      </note>
      <note>
        <pitch><step>A</step><octave>4</octave></pitch>
        <duration>2</duration>
        <type>quarter</type>
      </note>
    </measure>
  </part>
</score-partwise>"#;

fn pitches(score: &keyshift::Score) -> Vec<Pitch> {
    score
        .parts
        .iter()
        .flat_map(|part| &part.measures)
        .flat_map(|measure| &measure.events)
        .filter_map(|event| match event {
            MeasureEvent::Note(note) => Some(note.pitch),
            _ => None,
        })
        .collect()
}

#[test]
fn test_eb_major_to_d_major_scenario() {
    // -3 -> +2 is +5 fifths; normalized semitone shift is -1
    let score = parse(EB_MAJOR_SCORE).unwrap();
    let transposed = transpose(&score, -3, 2).unwrap();

    assert_eq!(transposed.declared_key(), Some(2));
    assert_eq!(
        pitches(&transposed),
        vec![
            Pitch::new(Step::D, 0, 4).unwrap(),  // Eb4 -> D4
            Pitch::new(Step::F, 1, 4).unwrap(),  // G4  -> F#4
            Pitch::new(Step::A, 0, 4).unwrap(),  // Bb4 -> A4
            Pitch::new(Step::G, 1, 4).unwrap(),  // A4 (raised fourth) -> G#4
        ]
    );
}

#[test]
fn test_every_pitch_moves_by_the_same_interval() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    let transposed = transpose(&score, -3, 2).unwrap();

    for (before, after) in pitches(&score).iter().zip(pitches(&transposed).iter()) {
        assert_eq!(after.semitone(), before.semitone() - 1, "pitch {}", before);
    }
}

#[test]
fn test_identity_law() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    for fifths in -7i8..=7 {
        let result = transpose(&score, fifths, fifths).unwrap();
        assert_eq!(result, score, "identity failed for fifths {}", fifths);
    }
}

// Composition holds exactly for spelling, and for sound up to octave
// equivalence: each hop moves by its own shortest distance, so two hops
// can sum to a whole octave more or less than the direct shift. The
// (0, 6, -7) chain below lands one octave above the direct result
// (+6 and +5 semitones against a direct -1).
#[test]
fn test_composition_law_up_to_octave_equivalence() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    for (k1, k2, k3) in [
        (-3i8, 2i8, 5i8),
        (-3, -7, 7),
        (0, 4, -4),
        (-3, 0, 2),
        (0, 6, -7),
    ] {
        let chained = transpose(&transpose(&score, k1, k2).unwrap(), k2, k3).unwrap();
        let direct = transpose(&score, k1, k3).unwrap();

        for (chained_pitch, direct_pitch) in
            pitches(&chained).iter().zip(pitches(&direct).iter())
        {
            assert_eq!(chained_pitch.step, direct_pitch.step);
            assert_eq!(chained_pitch.alter, direct_pitch.alter);
            assert_eq!(
                (chained_pitch.semitone() - direct_pitch.semitone()).rem_euclid(12),
                0,
                "chain {} -> {} -> {} vs direct: {} vs {}",
                k1,
                k2,
                k3,
                chained_pitch,
                direct_pitch
            );
        }
    }
}

#[test]
fn test_non_pitch_content_is_preserved() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    let transposed = transpose(&score, -3, 2).unwrap();

    assert_eq!(transposed.parts.len(), score.parts.len());
    for (part_before, part_after) in score.parts.iter().zip(transposed.parts.iter()) {
        assert_eq!(part_after.id, part_before.id);
        assert_eq!(part_after.name, part_before.name);
        assert_eq!(part_after.measures.len(), part_before.measures.len());
        for (measure_before, measure_after) in
            part_before.measures.iter().zip(part_after.measures.iter())
        {
            assert_eq!(measure_after.number, measure_before.number);
            assert_eq!(measure_after.events.len(), measure_before.events.len());
            let time_before = measure_before.attributes.as_ref().and_then(|a| a.time);
            let time_after = measure_after.attributes.as_ref().and_then(|a| a.time);
            assert_eq!(time_after, time_before);
            for (event_before, event_after) in
                measure_before.events.iter().zip(measure_after.events.iter())
            {
                match (event_before, event_after) {
                    (MeasureEvent::Note(before), MeasureEvent::Note(after)) => {
                        assert_eq!(after.duration, before.duration);
                        assert_eq!(after.note_type, before.note_type);
                        assert_eq!(after.chord, before.chord);
                        assert_eq!(after.lyric, before.lyric);
                    }
                    (MeasureEvent::Rest(before), MeasureEvent::Rest(after)) => {
                        assert_eq!(after, before);
                    }
                    (before, after) => panic!("event kind changed: {:?} -> {:?}", before, after),
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_target_key_is_rejected() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    assert_eq!(
        transpose(&score, -3, 9),
        Err(TranspositionError::InvalidKeyRange { fifths: 9 })
    );
    assert_eq!(
        transpose(&score, -8, 2),
        Err(TranspositionError::InvalidKeyRange { fifths: -8 })
    );
}

#[test]
fn test_unspellable_pitch_fails_with_location() {
    // F##4 in G major pushed seven fifths up would need a triple sharp
    let xml = EB_MAJOR_SCORE
        .replace("<fifths>-3</fifths>", "<fifths>0</fifths>")
        .replace(
            "<pitch><step>G</step><octave>4</octave></pitch>",
            "<pitch><step>G</step><alter>2</alter><octave>4</octave></pitch>",
        );
    let score = parse(&xml).unwrap();

    match transpose(&score, 0, 7) {
        Err(TranspositionError::UnspellablePitch {
            part_id,
            measure,
            pitch,
        }) => {
            assert_eq!(part_id, "P1");
            assert_eq!(measure, 1);
            assert_eq!(pitch, "G##4");
        }
        other => panic!("expected UnspellablePitch, got {:?}", other),
    }
}

#[test]
fn test_transposed_score_serializes_and_reparses() {
    let score = parse(EB_MAJOR_SCORE).unwrap();
    let transposed = transpose(&score, -3, 2).unwrap();
    let reparsed = parse(&serialize(&transposed)).unwrap();
    assert_eq!(reparsed, transposed);
}
