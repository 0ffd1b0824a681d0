//! Data model for a tablature score.
//!
//! These structures are the read-only input of a layout pass. They are
//! produced by an external loader (or decoded from JSON with
//! [`crate::score_from_json`]) and never mutated by the layout engine.

use serde::{Deserialize, Serialize};

/// A complete tablature score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    /// Title of the piece
    #[serde(default)]
    pub title: Option<String>,
    /// Performing artist
    #[serde(default)]
    pub artist: Option<String>,
    /// Instrument parts, laid out one after the other
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One instrument (one tablature staff).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Part name (e.g., "Lead Guitar")
    pub name: String,
    /// Number of strings, which is also the number of staff lines
    #[serde(default = "default_strings")]
    pub strings: u8,
    /// Open-string names from the top line down (e.g., ["E", "B", "G", ...])
    #[serde(default)]
    pub tuning: Vec<String>,
    /// Ordered list of measures
    #[serde(default)]
    pub measures: Vec<Measure>,
}

fn default_strings() -> u8 {
    6
}

/// A single measure (bar).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measure {
    /// Time signature, only present where it changes
    #[serde(default)]
    pub time_signature: Option<TimeSignature>,
    /// Tempo in quarter notes per minute, only present where it changes
    #[serde(default)]
    pub tempo: Option<u32>,
    /// Chords and rests, left to right
    #[serde(default)]
    pub chords: Vec<Chord>,
}

/// Time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Numerator (e.g., 6 in 6/8)
    pub beats: u32,
    /// Denominator (e.g., 8 in 6/8)
    pub beat_type: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self { beats: 4, beat_type: 4 }
    }
}

/// A set of notes struck together, or a rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chord {
    pub duration: Duration,
    /// Whether this is a rest (notes are ignored)
    #[serde(default)]
    pub rest: bool,
    /// Notes, at most one per string
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Chord symbol shown above the staff (e.g., "Am7")
    #[serde(default)]
    pub name: Option<String>,
    /// Free text annotation shown above the staff
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub palm_mute: bool,
    #[serde(default)]
    pub let_ring: bool,
}

/// A fretted note on one string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Note {
    /// String number (1-based; 1 is the top staff line)
    pub string: u8,
    /// Fret number (0 = open string)
    #[serde(default)]
    pub fret: u8,
    /// Destination of an outgoing tie (a later chord, same string)
    #[serde(default)]
    pub tie: Option<NoteAddress>,
    #[serde(default)]
    pub slide: Option<SlideType>,
    #[serde(default)]
    pub bend: Option<Bend>,
    #[serde(default)]
    pub harmonic: Option<Harmonic>,
    /// Muted ("x") note
    #[serde(default)]
    pub dead: bool,
    /// Ghost note, shown in parentheses
    #[serde(default)]
    pub ghost: bool,
    #[serde(default)]
    pub vibrato: bool,
}

/// Position of a chord within a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteAddress {
    /// Measure index within the part
    pub measure: usize,
    /// Chord index within the measure
    pub chord: usize,
}

/// How a slide enters or leaves a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideType {
    /// Slide to the next note on the string, re-picked
    Shift,
    /// Slide to the next note on the string, not re-picked
    Legato,
    IntoFromAbove,
    IntoFromBelow,
    OutUpwards,
    OutDownwards,
}

/// A string bend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bend {
    pub kind: BendKind,
    /// Bend height in quarter tones (4 = "full")
    #[serde(default)]
    pub amount: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BendKind {
    Bend,
    BendRelease,
    PreBend,
    Release,
    /// Any bend shape the layout has no glyph for
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmonic {
    Natural,
    Artificial,
    Pinch,
}

/// Rhythmic value of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub value: NoteValue,
    #[serde(default)]
    pub dots: u8,
    #[serde(default)]
    pub tuplet: Option<Tuplet>,
}

impl Default for Duration {
    fn default() -> Self {
        Self { value: NoteValue::Quarter, dots: 0, tuplet: None }
    }
}

/// `actual` notes in the time of `normal` (3:2 for a triplet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuplet {
    pub actual: u32,
    pub normal: u32,
}

/// Undotted note value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteValue {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteValue {
    /// Fraction of a whole note.
    pub fn fraction(self) -> f64 {
        match self {
            NoteValue::Whole => 1.0,
            NoteValue::Half => 0.5,
            NoteValue::Quarter => 0.25,
            NoteValue::Eighth => 0.125,
            NoteValue::Sixteenth => 0.0625,
            NoteValue::ThirtySecond => 0.03125,
            NoteValue::SixtyFourth => 0.015625,
        }
    }

    /// Number of beam bars this value contributes to its beat group.
    /// Negative values mark notes longer than a quarter (no beam, shorter stem).
    pub fn beam_count(self) -> i32 {
        match self {
            NoteValue::Whole => -2,
            NoteValue::Half => -1,
            NoteValue::Quarter => 0,
            NoteValue::Eighth => 1,
            NoteValue::Sixteenth => 2,
            NoteValue::ThirtySecond => 3,
            NoteValue::SixtyFourth => 4,
        }
    }
}

impl Duration {
    pub fn new(value: NoteValue) -> Self {
        Self { value, dots: 0, tuplet: None }
    }

    pub fn dotted(value: NoteValue, dots: u8) -> Self {
        Self { value, dots, tuplet: None }
    }

    /// Length as a fraction of a whole note, including dots and tuplets.
    pub fn fraction(&self) -> f64 {
        let base = self.value.fraction();
        let mut total = base;
        let mut increment = base;
        for _ in 0..self.dots {
            increment /= 2.0;
            total += increment;
        }
        match self.tuplet {
            Some(t) if t.actual > 0 => total * t.normal as f64 / t.actual as f64,
            _ => total,
        }
    }
}

impl TimeSignature {
    /// Length of one metrical beat as a fraction of a whole note.
    ///
    /// Compound meters (x/8 with x a multiple of three) beat in dotted
    /// quarters; everything else beats in quarters.
    pub fn beat_length(&self) -> f64 {
        if self.beat_type == 8 && self.beats % 3 == 0 && self.beats > 0 {
            3.0 / 8.0
        } else {
            0.25
        }
    }
}

impl Note {
    /// The text shown on the staff line for this note.
    pub fn fret_text(&self) -> String {
        if self.dead {
            return "x".into();
        }
        match (self.ghost, self.harmonic) {
            (true, _) => format!("({})", self.fret),
            (false, Some(Harmonic::Natural)) => format!("<{}>", self.fret),
            _ => self.fret.to_string(),
        }
    }
}

impl Bend {
    /// Label shown above a bent note, or `None` when there is nothing to show.
    pub fn label(&self) -> Option<String> {
        let quarters = match (self.amount, self.kind) {
            (Some(a), _) => a,
            (None, BendKind::Other) => return None,
            (None, _) => 4,
        };
        let label = match (quarters / 4, quarters % 4) {
            (0, 0) => return None,
            (0, 1) => "¼".to_string(),
            (0, 2) => "½".to_string(),
            (0, _) => "¾".to_string(),
            (1, 0) => "full".to_string(),
            (n, 0) => n.to_string(),
            (n, 1) => format!("{n}¼"),
            (n, 2) => format!("{n}½"),
            (n, _) => format!("{n}¾"),
        };
        Some(label)
    }
}

impl Score {
    /// Number of measures in the first part.
    pub fn measure_count(&self) -> usize {
        self.parts.first().map_or(0, |p| p.measures.len())
    }
}

impl Part {
    pub fn new(name: impl Into<String>, strings: u8) -> Self {
        Self { name: name.into(), strings, tuning: Vec::new(), measures: Vec::new() }
    }

    /// Look up the chord a [`NoteAddress`] points at.
    pub fn chord_at(&self, address: NoteAddress) -> Option<&Chord> {
        self.measures.get(address.measure)?.chords.get(address.chord)
    }
}

impl Chord {
    /// A chord of the given duration holding `notes`.
    pub fn with_notes(duration: Duration, notes: Vec<Note>) -> Self {
        Self { duration, notes, ..Self::default() }
    }

    pub fn rest(duration: Duration) -> Self {
        Self { duration, rest: true, ..Self::default() }
    }
}

impl Note {
    pub fn new(string: u8, fret: u8) -> Self {
        Self { string, fret, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_and_tuplet_fractions() {
        assert_eq!(Duration::dotted(NoteValue::Quarter, 1).fraction(), 0.375);
        assert_eq!(Duration::dotted(NoteValue::Half, 2).fraction(), 0.875);
        let triplet = Duration {
            value: NoteValue::Eighth,
            dots: 0,
            tuplet: Some(Tuplet { actual: 3, normal: 2 }),
        };
        assert!((triplet.fraction() - 1.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn compound_meter_beats_in_dotted_quarters() {
        assert_eq!(TimeSignature { beats: 6, beat_type: 8 }.beat_length(), 0.375);
        assert_eq!(TimeSignature { beats: 12, beat_type: 8 }.beat_length(), 0.375);
        assert_eq!(TimeSignature { beats: 5, beat_type: 8 }.beat_length(), 0.25);
        assert_eq!(TimeSignature { beats: 9, beat_type: 16 }.beat_length(), 0.25);
    }

    #[test]
    fn fret_text_variants() {
        let mut note = Note::new(1, 12);
        assert_eq!(note.fret_text(), "12");
        note.harmonic = Some(Harmonic::Natural);
        assert_eq!(note.fret_text(), "<12>");
        note.ghost = true;
        assert_eq!(note.fret_text(), "(12)");
        note.dead = true;
        assert_eq!(note.fret_text(), "x");
    }

    #[test]
    fn bend_labels() {
        let full = Bend { kind: BendKind::Bend, amount: None };
        assert_eq!(full.label().as_deref(), Some("full"));
        let half = Bend { kind: BendKind::Bend, amount: Some(2) };
        assert_eq!(half.label().as_deref(), Some("½"));
        let one_half = Bend { kind: BendKind::PreBend, amount: Some(6) };
        assert_eq!(one_half.label().as_deref(), Some("1½"));
        let unknown = Bend { kind: BendKind::Other, amount: None };
        assert_eq!(unknown.label(), None);
    }
}
