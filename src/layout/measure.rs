//! Measure layout: one score measure becomes a horizontal run of chords,
//! rests and duration-proportional spacers.

use crate::model::*;
use super::constants::*;
use super::element::{Element, ElementKind, Group};
use super::flex::FlexGroup;
use super::geom::Rect;

/// Horizontal space a chord of this duration claims, before stretching.
pub(super) fn width_for_duration(duration: &Duration) -> f64 {
    (QUARTER_NOTE_WIDTH * 5.0 * duration.fraction()).max(MIN_NOTE_WIDTH)
}

/// Height of a staff with `strings` lines: one line spacing of padding
/// above the first string and below the last.
pub(super) fn staff_height(strings: u8, line_height: f64) -> f64 {
    (strings as f64 + 1.0) * line_height
}

/// Approximate text width; no shaping is attempted.
pub(super) fn note_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * NOTE_CHAR_WIDTH + NOTE_PADDING
}

/// Chord and rest elements of a laid-out measure, left to right.
pub fn measure_chords(measure: &Element) -> impl Iterator<Item = &Element> {
    measure.children().iter().filter(|child| {
        matches!(child.kind, ElementKind::Chord { .. } | ElementKind::Rest { .. })
    })
}

/// Build the element for `part.measures[index]`. `time_signature` is shown
/// at the start of the measure when present.
pub(super) fn layout_measure(
    part: &Part,
    part_index: usize,
    index: usize,
    time_signature: Option<TimeSignature>,
    line_height: f64,
) -> Element {
    let height = staff_height(part.strings, line_height);
    let mut flex = FlexGroup::horizontal(0.0, height);

    if let Some(ts) = time_signature {
        flex.add(time_signature_glyph(ts, height), None);
    }
    flex.add(Element::space(MEASURE_LEADING_SPACE, height), None);

    if let Some(measure) = part.measures.get(index) {
        for (ci, chord) in measure.chords.iter().enumerate() {
            let element = if chord.rest {
                Element::leaf(
                    ElementKind::Rest { measure: index, chord: ci },
                    Rect::from_size(REST_WIDTH, height),
                )
            } else {
                layout_chord(part, index, ci, chord, height, line_height)
            };
            flex.add(element, None);

            let spacing = width_for_duration(&chord.duration);
            flex.add(Element::space(spacing, height), Some(spacing));
        }
    }

    flex.fit_content();
    Element::flex(ElementKind::Measure { part: part_index, index }, flex)
}

fn layout_chord(
    part: &Part,
    measure: usize,
    index: usize,
    chord: &Chord,
    height: f64,
    line_height: f64,
) -> Element {
    let mut notes: Vec<&Note> = Vec::with_capacity(chord.notes.len());
    for note in &chord.notes {
        if note.string == 0 || note.string > part.strings {
            log::warn!(
                "measure {} chord {}: string {} outside a {}-string staff; skipped",
                measure + 1,
                index,
                note.string,
                part.strings
            );
            continue;
        }
        if notes.iter().any(|n| n.string == note.string) {
            log::warn!(
                "measure {} chord {}: second note on string {}; skipped",
                measure + 1,
                index,
                note.string
            );
            continue;
        }
        notes.push(note);
    }
    notes.sort_by_key(|n| n.string);

    let texts: Vec<String> = notes.iter().map(|n| n.fret_text()).collect();
    let mut width = texts
        .iter()
        .map(|t| note_text_width(t))
        .fold(NOTE_CHAR_WIDTH, f64::max);
    if notes.iter().any(|n| n.bend.is_some()) {
        width *= BEND_WIDTH_FACTOR;
    }

    let mut group = Group::new(Rect::from_size(width, height));
    for (note, text) in notes.iter().zip(texts) {
        let center_y = note.string as f64 * line_height;
        group.add(Element::leaf(
            ElementKind::Note { string: note.string, text },
            Rect::new(0.0, center_y - line_height / 2.0, width, line_height),
        ));
    }
    Element::group(ElementKind::Chord { measure, chord: index }, group)
}

fn time_signature_glyph(ts: TimeSignature, height: f64) -> Element {
    let mut group = Group::new(Rect::from_size(TIME_SIGNATURE_WIDTH, height));
    let half = height / 2.0;
    let digit_height = TIME_SIGNATURE_FONT_SIZE.min(half);
    group.add(Element::leaf(
        ElementKind::Text { text: ts.beats.to_string(), size: TIME_SIGNATURE_FONT_SIZE },
        Rect::new(0.0, half - digit_height, TIME_SIGNATURE_WIDTH, digit_height),
    ));
    group.add(Element::leaf(
        ElementKind::Text { text: ts.beat_type.to_string(), size: TIME_SIGNATURE_FONT_SIZE },
        Rect::new(0.0, half, TIME_SIGNATURE_WIDTH, digit_height),
    ));
    Element::group(ElementKind::Group, group)
}
