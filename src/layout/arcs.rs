//! Tie and slide routing across the chords of one finished line.
//!
//! Runs after the line's measures have their final offsets. Every connector
//! is wrapped in a group anchored at its start x, so the anchored container
//! only has to track the horizontal start while the vertical position stays
//! with the string the note is on.

use std::collections::HashMap;

use crate::model::*;
use super::anchored::AnchoredGroup;
use super::constants::*;
use super::element::{Element, ElementKind, Group};
use super::geom::Rect;

/// A chord or rest of the line with its box in the staff frame.
#[derive(Debug, Clone, Copy)]
pub(super) struct PlacedChord {
    pub(super) address: NoteAddress,
    pub(super) rect: Rect,
}

/// A validated tie between two chords of a part, on one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TieSpan {
    pub(super) string: u8,
    pub(super) from: NoteAddress,
    pub(super) to: NoteAddress,
}

/// Every tie of the part that starts at a drawn note and whose destination
/// exists and lies after its source.
pub(super) fn collect_ties(part: &Part) -> Vec<TieSpan> {
    let mut ties = Vec::new();
    for (mi, measure) in part.measures.iter().enumerate() {
        for (ci, chord) in measure.chords.iter().enumerate() {
            if chord.rest {
                continue;
            }
            let from = NoteAddress { measure: mi, chord: ci };
            let mut strings = Vec::with_capacity(chord.notes.len());
            for note in &chord.notes {
                // measure layout drops these notes, so their ties have nothing to start from
                let drawn = note.string != 0 && note.string <= part.strings && !strings.contains(&note.string);
                strings.push(note.string);
                let Some(to) = note.tie else { continue };
                if !drawn {
                    log::warn!(
                        "tie from measure {} chord {} string {} starts at a note that is not drawn; skipped",
                        mi + 1,
                        ci,
                        note.string
                    );
                    continue;
                }
                match part.chord_at(to) {
                    Some(target) if to > from && !target.rest => {
                        ties.push(TieSpan { string: note.string, from, to });
                    }
                    _ => log::warn!(
                        "tie from measure {} chord {} string {} points at {:?}, which is not a later chord; skipped",
                        mi + 1,
                        ci,
                        note.string,
                        to
                    ),
                }
            }
        }
    }
    ties
}

/// Add an arc for every tie that touches the line: closed when both ends
/// are on it, cut at the right edge when the tie continues on a later line,
/// and cut at the left edge when it started on an earlier one.
pub(super) fn route_ties(
    ties: &[TieSpan],
    chords: &[PlacedChord],
    line_width: f64,
    line_height: f64,
    group: &mut AnchoredGroup,
) {
    let (Some(first), Some(last)) = (chords.first(), chords.last()) else {
        return;
    };
    let index: HashMap<NoteAddress, Rect> = chords.iter().map(|c| (c.address, c.rect)).collect();

    for tie in ties {
        if tie.to < first.address || tie.from > last.address {
            continue;
        }
        let start = index.get(&tie.from).map(Rect::center_x);
        let end = index.get(&tie.to).map(Rect::center_x);
        let (x0, x1, open_start, open_end) = match (start, end) {
            (Some(a), Some(b)) => (a, b, false, false),
            (Some(a), None) => (a, line_width, false, true),
            (None, Some(b)) => (0.0, b, true, false),
            (None, None) => (0.0, line_width, true, true),
        };
        group.add(
            arc(x1 - x0, tie.string, line_height, open_start, open_end),
            Some(x0),
        );
    }
}

/// Add the slide connectors of every note on the line.
pub(super) fn route_slides(
    part: &Part,
    chords: &[PlacedChord],
    line_width: f64,
    line_height: f64,
    group: &mut AnchoredGroup,
) {
    let index: HashMap<NoteAddress, Rect> = chords.iter().map(|c| (c.address, c.rect)).collect();

    for placed in chords {
        let Some(chord) = part.chord_at(placed.address).filter(|c| !c.rest) else {
            continue;
        };
        let src = placed.rect;
        for note in &chord.notes {
            let Some(slide) = note.slide else { continue };
            let (x, width, rising) = match slide {
                SlideType::Shift | SlideType::Legato => {
                    let Some((to, target)) = next_on_string(part, placed.address, note.string)
                    else {
                        log::warn!(
                            "slide from measure {} chord {} on string {} has no following note; skipped",
                            placed.address.measure + 1,
                            placed.address.chord,
                            note.string
                        );
                        continue;
                    };
                    let dest = index.get(&to);
                    if slide == SlideType::Legato {
                        let (x1, open_end) = match dest {
                            Some(r) => (r.center_x(), false),
                            None => (line_width, true),
                        };
                        group.add(
                            arc(x1 - src.center_x(), note.string, line_height, false, open_end),
                            Some(src.center_x()),
                        );
                    }
                    let x1 = dest.map_or(line_width, |r| r.x);
                    (src.right(), x1 - src.right(), target.fret > note.fret)
                }
                SlideType::IntoFromAbove => (src.x - SLIDE_WIDTH, SLIDE_WIDTH, false),
                SlideType::IntoFromBelow => (src.x - SLIDE_WIDTH, SLIDE_WIDTH, true),
                SlideType::OutUpwards => (src.right(), SLIDE_WIDTH, true),
                SlideType::OutDownwards => (src.right(), SLIDE_WIDTH, false),
            };
            group.add(slide_element(width, note.string, line_height, rising), Some(x));
        }
    }
}

/// The next note on `string` after `from`, skipping rests and chords that
/// leave the string silent.
fn next_on_string(part: &Part, from: NoteAddress, string: u8) -> Option<(NoteAddress, &Note)> {
    part.measures
        .iter()
        .enumerate()
        .skip(from.measure)
        .flat_map(|(mi, measure)| {
            measure
                .chords
                .iter()
                .enumerate()
                .map(move |(ci, chord)| (NoteAddress { measure: mi, chord: ci }, chord))
        })
        .filter(|(address, chord)| *address > from && !chord.rest)
        .find_map(|(address, chord)| {
            chord.notes.iter().find(|n| n.string == string).map(|n| (address, n))
        })
}

fn arc(width: f64, string: u8, line_height: f64, open_start: bool, open_end: bool) -> Element {
    let width = width.max(0.0);
    let y = string as f64 * line_height;
    let mut wrapper = Group::new(Rect::from_size(width, y + ARC_HEIGHT));
    wrapper.add(Element::leaf(
        ElementKind::Arc { open_start, open_end },
        Rect::new(0.0, y, width, ARC_HEIGHT),
    ));
    Element::group(ElementKind::Group, wrapper)
}

fn slide_element(width: f64, string: u8, line_height: f64, rising: bool) -> Element {
    let width = width.max(0.0);
    let y = string as f64 * line_height - SLIDE_HEIGHT / 2.0;
    let mut wrapper = Group::new(Rect::from_size(width, y + SLIDE_HEIGHT));
    wrapper.add(Element::leaf(
        ElementKind::Slide { rising },
        Rect::new(0.0, y, width, SLIDE_HEIGHT),
    ));
    Element::group(ElementKind::Group, wrapper)
}
