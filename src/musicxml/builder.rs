//! MusicXML string builder.
//!
//! Writes the partwise skeleton element by element into a string buffer.
//! Callers drive it in document order; the builder handles indentation,
//! escaping and the boilerplate header.

use super::types::{Attributes, NoteEvent, RestEvent, UnpitchedEvent};

/// Escape text content for XML.
pub fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Builder for a partwise MusicXML document.
pub struct MusicXmlBuilder {
    buffer: String,
}

impl MusicXmlBuilder {
    pub fn new() -> Self {
        let mut buffer = String::new();
        buffer.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        buffer.push_str("<!DOCTYPE score-partwise PUBLIC \"-//Recordare//DTD MusicXML 3.1 Partwise//EN\" \"http://www.musicxml.org/dtds/partwise.dtd\">\n");
        buffer.push_str("<score-partwise version=\"3.1\">\n");
        Self { buffer }
    }

    pub fn write_title(&mut self, title: &str) {
        self.buffer.push_str("  <movement-title>");
        self.buffer.push_str(&xml_escape(title));
        self.buffer.push_str("</movement-title>\n");
    }

    pub fn start_part_list(&mut self) {
        self.buffer.push_str("  <part-list>\n");
    }

    pub fn write_score_part(&mut self, id: &str, name: Option<&str>) {
        self.buffer
            .push_str(&format!("    <score-part id=\"{}\">\n", xml_escape(id)));
        self.buffer.push_str(&format!(
            "      <part-name>{}</part-name>\n",
            xml_escape(name.unwrap_or(""))
        ));
        self.buffer.push_str("    </score-part>\n");
    }

    pub fn end_part_list(&mut self) {
        self.buffer.push_str("  </part-list>\n");
    }

    pub fn start_part(&mut self, id: &str) {
        self.buffer
            .push_str(&format!("  <part id=\"{}\">\n", xml_escape(id)));
    }

    pub fn end_part(&mut self) {
        self.buffer.push_str("  </part>\n");
    }

    pub fn start_measure(&mut self, number: u32) {
        self.buffer
            .push_str(&format!("    <measure number=\"{}\">\n", number));
    }

    pub fn end_measure(&mut self) {
        self.buffer.push_str("    </measure>\n");
    }

    pub fn write_attributes(&mut self, attributes: &Attributes) {
        self.buffer.push_str("      <attributes>\n");
        if let Some(divisions) = attributes.divisions {
            self.buffer
                .push_str(&format!("        <divisions>{}</divisions>\n", divisions));
        }
        if let Some(fifths) = attributes.key {
            self.buffer.push_str("        <key>\n");
            self.buffer
                .push_str(&format!("          <fifths>{}</fifths>\n", fifths));
            self.buffer.push_str("        </key>\n");
        }
        if let Some(time) = attributes.time {
            self.buffer.push_str("        <time>\n");
            self.buffer
                .push_str(&format!("          <beats>{}</beats>\n", time.beats));
            self.buffer
                .push_str(&format!("          <beat-type>{}</beat-type>\n", time.beat_type));
            self.buffer.push_str("        </time>\n");
        }
        if let Some(clef) = &attributes.clef {
            self.buffer.push_str("        <clef>\n");
            self.buffer.push_str(&format!(
                "          <sign>{}</sign>\n",
                xml_escape(&clef.sign)
            ));
            if let Some(line) = clef.line {
                self.buffer
                    .push_str(&format!("          <line>{}</line>\n", line));
            }
            self.buffer.push_str("        </clef>\n");
        }
        self.buffer.push_str("      </attributes>\n");
    }

    pub fn write_note(&mut self, note: &NoteEvent) {
        self.buffer.push_str("      <note>\n");
        if note.chord {
            self.buffer.push_str("        <chord/>\n");
        }
        self.buffer.push_str("        <pitch>\n");
        self.buffer.push_str(&format!(
            "          <step>{}</step>\n",
            note.pitch.step.name()
        ));
        if note.pitch.alter != 0 {
            self.buffer
                .push_str(&format!("          <alter>{}</alter>\n", note.pitch.alter));
        }
        self.buffer
            .push_str(&format!("          <octave>{}</octave>\n", note.pitch.octave));
        self.buffer.push_str("        </pitch>\n");
        self.write_duration_and_type(note.duration, note.note_type.as_deref());
        if let Some(lyric) = &note.lyric {
            self.buffer.push_str("        <lyric>\n");
            self.buffer
                .push_str(&format!("          <text>{}</text>\n", xml_escape(lyric)));
            self.buffer.push_str("        </lyric>\n");
        }
        self.buffer.push_str("      </note>\n");
    }

    pub fn write_rest(&mut self, rest: &RestEvent) {
        self.buffer.push_str("      <note>\n");
        self.buffer.push_str("        <rest/>\n");
        self.write_duration_and_type(rest.duration, rest.note_type.as_deref());
        self.buffer.push_str("      </note>\n");
    }

    pub fn write_unpitched(&mut self, unpitched: &UnpitchedEvent) {
        self.buffer.push_str("      <note>\n");
        self.buffer.push_str("        <unpitched>\n");
        if let Some(step) = unpitched.display_step {
            self.buffer.push_str(&format!(
                "          <display-step>{}</display-step>\n",
                step.name()
            ));
        }
        if let Some(octave) = unpitched.display_octave {
            self.buffer.push_str(&format!(
                "          <display-octave>{}</display-octave>\n",
                octave
            ));
        }
        self.buffer.push_str("        </unpitched>\n");
        self.write_duration_and_type(unpitched.duration, unpitched.note_type.as_deref());
        self.buffer.push_str("      </note>\n");
    }

    fn write_duration_and_type(&mut self, duration: u32, note_type: Option<&str>) {
        self.buffer
            .push_str(&format!("        <duration>{}</duration>\n", duration));
        if let Some(note_type) = note_type {
            self.buffer.push_str(&format!(
                "        <type>{}</type>\n",
                xml_escape(note_type)
            ));
        }
    }

    /// Close the document and return the XML string.
    pub fn finalize(mut self) -> String {
        self.buffer.push_str("</score-partwise>\n");
        self.buffer
    }
}

impl Default for MusicXmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("Bach & Sons <arr.>"), "Bach &amp; Sons &lt;arr.&gt;");
    }

    #[test]
    fn test_empty_document_skeleton() {
        let xml = MusicXmlBuilder::new().finalize();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<score-partwise version=\"3.1\">"));
        assert!(xml.trim_end().ends_with("</score-partwise>"));
    }
}
