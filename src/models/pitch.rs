//! Western pitch representation.
//!
//! A pitch is a (step, alteration, octave) triple, matching the MusicXML
//! `<pitch>` element. Octave numbering follows scientific pitch notation:
//! octave 4 contains middle C.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest supported alteration (double flat).
pub const MIN_ALTER: i8 = -2;
/// Highest supported alteration (double sharp).
pub const MAX_ALTER: i8 = 2;

/// The seven letter names of the diatonic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    /// All steps in letter order, C through B.
    pub const ALL: [Step; 7] = [
        Step::C,
        Step::D,
        Step::E,
        Step::F,
        Step::G,
        Step::A,
        Step::B,
    ];

    /// Parse a MusicXML `<step>` value.
    pub fn from_name(name: &str) -> Option<Step> {
        match name {
            "C" => Some(Step::C),
            "D" => Some(Step::D),
            "E" => Some(Step::E),
            "F" => Some(Step::F),
            "G" => Some(Step::G),
            "A" => Some(Step::A),
            "B" => Some(Step::B),
            _ => None,
        }
    }

    /// The MusicXML `<step>` spelling of this letter.
    pub fn name(&self) -> &'static str {
        match self {
            Step::C => "C",
            Step::D => "D",
            Step::E => "E",
            Step::F => "F",
            Step::G => "G",
            Step::A => "A",
            Step::B => "B",
        }
    }

    /// Index within the letter cycle, C=0 through B=6.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Letter at `index` in the cycle; wraps modulo 7.
    pub fn from_index(index: usize) -> Step {
        Step::ALL[index % 7]
    }

    /// Semitone offset of the natural letter above C (C=0, D=2, ... B=11).
    pub fn natural_semitone(&self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    /// Position of the natural letter on the line of fifths, with C at 0
    /// (F=-1, C=0, G=1, D=2, A=3, E=4, B=5).
    pub fn fifths_position(&self) -> i32 {
        match self {
            Step::F => -1,
            Step::C => 0,
            Step::G => 1,
            Step::D => 2,
            Step::A => 3,
            Step::E => 4,
            Step::B => 5,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A spelled pitch: letter, chromatic alteration, octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    pub step: Step,
    /// -2 (double flat) through +2 (double sharp).
    pub alter: i8,
    /// MusicXML octave number; octave 4 contains middle C.
    pub octave: i8,
}

impl Pitch {
    /// Create a pitch, validating the alteration range.
    pub fn new(step: Step, alter: i8, octave: i8) -> Result<Self, String> {
        if !(MIN_ALTER..=MAX_ALTER).contains(&alter) {
            return Err(format!(
                "invalid alteration {} (must be {} to {})",
                alter, MIN_ALTER, MAX_ALTER
            ));
        }
        Ok(Self {
            step,
            alter,
            octave,
        })
    }

    /// Absolute semitone value in the MIDI convention (middle C = 60).
    pub fn semitone(&self) -> i32 {
        (i32::from(self.octave) + 1) * 12 + self.step.natural_semitone() + i32::from(self.alter)
    }

    /// Sounding pitch class 0-11, independent of spelling.
    pub fn pitch_class(&self) -> u8 {
        self.semitone().rem_euclid(12) as u8
    }

    /// Position on the line of fifths: each sharp moves +7, each flat -7.
    pub fn line_of_fifths(&self) -> i32 {
        self.step.fifths_position() + 7 * i32::from(self.alter)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.alter {
            -2 => "bb",
            -1 => "b",
            1 => "#",
            2 => "##",
            _ => "",
        };
        write!(f, "{}{}{}", self.step, accidental, self.octave)
    }
}
