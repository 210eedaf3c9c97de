//! Score to MusicXML serialization.
//!
//! Total by construction: any well-formed in-memory score serializes.

use super::builder::MusicXmlBuilder;
use super::types::{MeasureEvent, Score};

/// Serialize a score back to partwise MusicXML.
pub fn serialize(score: &Score) -> String {
    let mut builder = MusicXmlBuilder::new();

    if let Some(title) = &score.title {
        builder.write_title(title);
    }

    builder.start_part_list();
    for part in &score.parts {
        builder.write_score_part(&part.id, part.name.as_deref());
    }
    builder.end_part_list();

    for part in &score.parts {
        builder.start_part(&part.id);
        for measure in &part.measures {
            builder.start_measure(measure.number);
            if let Some(attributes) = &measure.attributes {
                builder.write_attributes(attributes);
            }
            for event in &measure.events {
                match event {
                    MeasureEvent::Note(note) => builder.write_note(note),
                    MeasureEvent::Rest(rest) => builder.write_rest(rest),
                    MeasureEvent::Unpitched(unpitched) => builder.write_unpitched(unpitched),
                }
            }
            builder.end_measure();
        }
        builder.end_part();
    }

    builder.finalize()
}
