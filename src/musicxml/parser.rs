//! MusicXML parser built on roxmltree.
//!
//! Reads partwise scores into the in-memory model. Elements outside the
//! modeled subset (directions, barlines, backup/forward, harmony, ...) are
//! skipped with a debug log, matching the scope of the document model.
//! Namespaced documents are handled by matching on local element names.

use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

use crate::models::pitch::{Pitch, Step};

use super::errors::ParseError;
use super::types::{
    Attributes, Clef, Measure, MeasureEvent, NoteEvent, Part, RestEvent, Score, TimeSignature,
    UnpitchedEvent,
};

/// Parse a MusicXML string into a [`Score`].
///
/// Fails with [`ParseError::MalformedDocument`] when the document has no
/// parts, no key signature, or no time signature; the engine never sees a
/// score missing those.
pub fn parse(xml: &str) -> Result<Score, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options)
        .map_err(|error| ParseError::InvalidXml(error.to_string()))?;
    let root = document.root_element();

    match root.tag_name().name() {
        "score-partwise" => parse_score_partwise(root),
        "score-timewise" => Err(ParseError::UnsupportedFormat(
            "score-timewise (export as score-partwise instead)".to_string(),
        )),
        other => Err(ParseError::UnsupportedFormat(format!(
            "unexpected root element <{}>",
            other
        ))),
    }
}

fn parse_score_partwise(root: Node) -> Result<Score, ParseError> {
    let title = find_title(root);
    let part_names = parse_part_list(root)?;

    let mut parts = Vec::new();
    for part_node in children_named(root, "part") {
        let id = part_node
            .attribute("id")
            .ok_or_else(|| ParseError::MalformedDocument("<part> missing id attribute".to_string()))?
            .to_string();
        let name = part_names
            .iter()
            .find(|(part_id, _)| *part_id == id)
            .and_then(|(_, name)| name.clone());

        let mut measures = Vec::new();
        for (index, measure_node) in children_named(part_node, "measure").enumerate() {
            measures.push(parse_measure(measure_node, index as u32 + 1, &id)?);
        }
        parts.push(Part { id, name, measures });
    }

    let score = Score { title, parts };
    if score.parts.is_empty() {
        return Err(ParseError::MalformedDocument(
            "document contains no parts".to_string(),
        ));
    }
    if score.declared_key().is_none() {
        return Err(ParseError::MalformedDocument(
            "document declares no key signature".to_string(),
        ));
    }
    if score.declared_time().is_none() {
        return Err(ParseError::MalformedDocument(
            "document declares no time signature".to_string(),
        ));
    }
    Ok(score)
}

fn find_title(root: Node) -> Option<String> {
    if let Some(work) = get_child(root, "work") {
        if let Some(title) = get_child_text(work, "work-title") {
            return Some(title);
        }
    }
    get_child_text(root, "movement-title")
}

/// Parse `<part-list>` into (id, name) pairs in document order.
fn parse_part_list(root: Node) -> Result<Vec<(String, Option<String>)>, ParseError> {
    let part_list = get_child(root, "part-list").ok_or_else(|| {
        ParseError::MalformedDocument("document has no <part-list>".to_string())
    })?;

    let mut names = Vec::new();
    for score_part in children_named(part_list, "score-part") {
        let id = score_part
            .attribute("id")
            .ok_or_else(|| {
                ParseError::MalformedDocument("<score-part> missing id attribute".to_string())
            })?
            .to_string();
        names.push((id, get_child_text(score_part, "part-name")));
    }
    Ok(names)
}

fn parse_measure(node: Node, fallback_number: u32, part_id: &str) -> Result<Measure, ParseError> {
    let number = node
        .attribute("number")
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback_number);

    let mut attributes = None;
    let mut events = Vec::new();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "attributes" => {
                let parsed = parse_attributes(child, number)?;
                if !parsed.is_empty() {
                    attributes = Some(merge_attributes(attributes.take(), parsed));
                }
            }
            "note" => events.push(parse_note(child, number, part_id)?),
            other => {
                debug!(
                    "skipping <{}> in part {} measure {}",
                    other, part_id, number
                );
            }
        }
    }

    Ok(Measure {
        number,
        attributes,
        events,
    })
}

// A measure may carry several <attributes> blocks; later values win.
fn merge_attributes(existing: Option<Attributes>, new: Attributes) -> Attributes {
    match existing {
        None => new,
        Some(old) => Attributes {
            divisions: new.divisions.or(old.divisions),
            key: new.key.or(old.key),
            time: new.time.or(old.time),
            clef: new.clef.or(old.clef),
        },
    }
}

fn parse_attributes(node: Node, measure: u32) -> Result<Attributes, ParseError> {
    let divisions = parse_int_child(node, "divisions", measure)?;

    let key = match get_child(node, "key") {
        Some(key_node) => parse_int_child(key_node, "fifths", measure)?,
        None => None,
    };

    let time = match get_child(node, "time") {
        Some(time_node) => {
            let beats = parse_int_child(time_node, "beats", measure)?;
            let beat_type = parse_int_child(time_node, "beat-type", measure)?;
            match (beats, beat_type) {
                (Some(beats), Some(beat_type)) => Some(TimeSignature { beats, beat_type }),
                _ => {
                    return Err(ParseError::MalformedDocument(format!(
                        "incomplete <time> in measure {}",
                        measure
                    )))
                }
            }
        }
        None => None,
    };

    let clef = match get_child(node, "clef") {
        Some(clef_node) => {
            let sign = get_child_text(clef_node, "sign").ok_or_else(|| {
                ParseError::MalformedDocument(format!(
                    "clef without <sign> in measure {}",
                    measure
                ))
            })?;
            Some(Clef {
                sign,
                line: parse_int_child(clef_node, "line", measure)?,
            })
        }
        None => None,
    };

    Ok(Attributes {
        divisions,
        key,
        time,
        clef,
    })
}

fn parse_note(node: Node, measure: u32, part_id: &str) -> Result<MeasureEvent, ParseError> {
    let duration = parse_int_child(node, "duration", measure)?.ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "note without <duration> in part {} measure {}",
            part_id, measure
        ))
    })?;
    let note_type = get_child_text(node, "type");

    if get_child(node, "rest").is_some() {
        return Ok(MeasureEvent::Rest(RestEvent {
            duration,
            note_type,
        }));
    }

    if let Some(unpitched) = get_child(node, "unpitched") {
        let display_step = get_child_text(unpitched, "display-step")
            .as_deref()
            .and_then(Step::from_name);
        let display_octave = parse_int_child(unpitched, "display-octave", measure)?;
        return Ok(MeasureEvent::Unpitched(UnpitchedEvent {
            display_step,
            display_octave,
            duration,
            note_type,
        }));
    }

    let pitch_node = get_child(node, "pitch").ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "note without <pitch>, <rest> or <unpitched> in part {} measure {}",
            part_id, measure
        ))
    })?;
    let pitch = parse_pitch(pitch_node, measure, part_id)?;

    let lyric = get_child(node, "lyric").and_then(|lyric| get_child_text(lyric, "text"));

    Ok(MeasureEvent::Note(NoteEvent {
        pitch,
        duration,
        note_type,
        chord: get_child(node, "chord").is_some(),
        lyric,
    }))
}

fn parse_pitch(node: Node, measure: u32, part_id: &str) -> Result<Pitch, ParseError> {
    let step_text = get_child_text(node, "step").ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "pitch without <step> in part {} measure {}",
            part_id, measure
        ))
    })?;
    let step = Step::from_name(&step_text).ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "invalid step '{}' in part {} measure {}",
            step_text, part_id, measure
        ))
    })?;

    let alter: i8 = parse_int_child(node, "alter", measure)?.unwrap_or(0);
    let octave: i8 = parse_int_child(node, "octave", measure)?.ok_or_else(|| {
        ParseError::MalformedDocument(format!(
            "pitch without <octave> in part {} measure {}",
            part_id, measure
        ))
    })?;

    Pitch::new(step, alter, octave).map_err(|reason| {
        ParseError::MalformedDocument(format!(
            "{} in part {} measure {}",
            reason, part_id, measure
        ))
    })
}

fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn get_child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

fn get_child_text(node: Node, name: &str) -> Option<String> {
    get_child(node, name)
        .and_then(|child| child.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_int_child<T: std::str::FromStr>(
    node: Node,
    name: &str,
    measure: u32,
) -> Result<Option<T>, ParseError> {
    match get_child_text(node, name) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            ParseError::MalformedDocument(format!(
                "invalid <{}> value '{}' in measure {}",
                name, text, measure
            ))
        }),
    }
}
