//! Beat grouping and the stems, beams and duration dots drawn below the staff.
//!
//! Everything here is placed relative to a baseline at y = 0 with stems
//! growing upward (negative y); the caller normalizes the result.

use std::ops::Range;

use crate::model::NoteValue;
use super::constants::*;
use super::element::{Element, ElementKind};
use super::geom::{Rect, EPSILON};
use super::non_negative::NonNegativeGroup;

/// One chord or rest as seen by the beam algorithm.
#[derive(Debug, Clone, Copy)]
pub(super) struct BeatItem {
    /// x of the stem: the center of the first note's box, or of a rest
    pub(super) x: f64,
    pub(super) value: NoteValue,
    pub(super) dots: u8,
    /// Length as a fraction of a whole note
    pub(super) fraction: f64,
}

/// Split a measure's items into beats: consecutive runs whose durations
/// add up to at most `beat_length`. An item longer than a beat is a beat
/// of its own.
pub(super) fn group_into_beats(items: &[BeatItem], beat_length: f64) -> Vec<Range<usize>> {
    let mut beats = Vec::new();
    let mut start = 0;
    let mut filled = 0.0;

    for (i, item) in items.iter().enumerate() {
        if i > start && filled + item.fraction > beat_length + EPSILON {
            beats.push(start..i);
            start = i;
            filled = 0.0;
        }
        filled += item.fraction;
        if filled >= beat_length - EPSILON {
            beats.push(start..i + 1);
            start = i + 1;
            filled = 0.0;
        }
    }
    if start < items.len() {
        beats.push(start..items.len());
    }
    beats
}

/// Maximal runs of consecutive indices whose count is still positive.
fn positive_runs(counts: &[i32]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &count) in counts.iter().enumerate() {
        match (count > 0, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = run_start {
        runs.push(s..counts.len());
    }
    runs
}

/// Add stems, beams and dots for one beat to `group`. Rests take part
/// like chords, with the stem at their nominal x.
pub(super) fn add_beat_decorations(group: &mut NonNegativeGroup, beat: &[BeatItem]) {
    for item in beat {
        if item.value == NoteValue::Whole {
            continue;
        }
        let top = if item.value.beam_count() < 0 { SHORT_STEM_HEIGHT } else { STEM_HEIGHT };
        group.add(Element::leaf(
            ElementKind::Stem,
            Rect::new(item.x - STEM_WIDTH / 2.0, -top, STEM_WIDTH, top),
        ));
    }

    let mut counts: Vec<i32> = beat.iter().map(|item| item.value.beam_count()).collect();
    let mut levels = vec![0u32; beat.len()];
    let mut y = -BEAM_HEIGHT;
    loop {
        let runs = positive_runs(&counts);
        if runs.is_empty() {
            break;
        }
        for run in runs {
            let (left, right) = beam_extent(beat, &run);
            group.add(Element::leaf(
                ElementKind::Beam,
                Rect::new(left, y, right - left, BEAM_HEIGHT),
            ));
            log::trace!("beam {}..{} at y {:.1}", run.start, run.end, y);
            for level in &mut levels[run] {
                *level += 1;
            }
        }
        for count in &mut counts {
            *count -= 1;
        }
        y -= BEAM_LEVEL_STEP;
    }

    for (item, drawn) in beat.iter().zip(&levels) {
        if item.dots == 0 {
            continue;
        }
        let lift = *drawn as f64 * BEAM_LEVEL_STEP + DOT_GAP;
        for d in 0..item.dots {
            let x = item.x + STEM_WIDTH / 2.0 + DOT_GAP + d as f64 * (DOT_SIZE + DOT_GAP);
            group.add(Element::leaf(
                ElementKind::Dot,
                Rect::new(x, -lift - DOT_SIZE, DOT_SIZE, DOT_SIZE),
            ));
        }
    }
}

/// Horizontal extent of a beam over `run`. A run of a single item gets a
/// short stub pointing into the beat (to the left for the last item of a
/// multi-item beat, to the right otherwise).
fn beam_extent(beat: &[BeatItem], run: &Range<usize>) -> (f64, f64) {
    let first = beat[run.start].x;
    let last = beat[run.end - 1].x;
    if run.len() > 1 {
        return (first - STEM_WIDTH / 2.0, last + STEM_WIDTH / 2.0);
    }
    if run.start == beat.len() - 1 && beat.len() > 1 {
        (first - BEAM_STUB_WIDTH, first + STEM_WIDTH / 2.0)
    } else {
        (first - STEM_WIDTH / 2.0, first + BEAM_STUB_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Duration;
    use pretty_assertions::assert_eq;

    fn item(x: f64, value: NoteValue) -> BeatItem {
        BeatItem { x, value, dots: 0, fraction: Duration::new(value).fraction() }
    }

    fn kinds(group: &NonNegativeGroup, kind: &ElementKind) -> Vec<Rect> {
        group.children().iter().filter(|c| &c.kind == kind).map(|c| *c.rect()).collect()
    }

    #[test]
    fn beam_count_table() {
        let table = [
            (NoteValue::Whole, -2),
            (NoteValue::Half, -1),
            (NoteValue::Quarter, 0),
            (NoteValue::Eighth, 1),
            (NoteValue::Sixteenth, 2),
            (NoteValue::ThirtySecond, 3),
            (NoteValue::SixtyFourth, 4),
        ];
        for (value, expected) in table {
            assert_eq!(value.beam_count(), expected, "{value:?}");
        }
    }

    #[test]
    fn beats_in_common_time() {
        let items = [
            item(0.0, NoteValue::Eighth),
            item(10.0, NoteValue::Eighth),
            item(20.0, NoteValue::Quarter),
            item(30.0, NoteValue::Sixteenth),
            item(40.0, NoteValue::Sixteenth),
            item(50.0, NoteValue::Eighth),
            item(60.0, NoteValue::Half),
        ];
        assert_eq!(group_into_beats(&items, 0.25), vec![0..2, 2..3, 3..6, 6..7]);
    }

    #[test]
    fn compound_beats_take_three_eighths() {
        let items: Vec<BeatItem> = (0..6).map(|i| item(i as f64, NoteValue::Eighth)).collect();
        assert_eq!(group_into_beats(&items, 0.375), vec![0..3, 3..6]);
    }

    #[test]
    fn overflowing_note_starts_a_new_beat() {
        let items = [item(0.0, NoteValue::Eighth), item(1.0, NoteValue::Quarter)];
        assert_eq!(group_into_beats(&items, 0.25), vec![0..1, 1..2]);
    }

    #[test]
    fn pair_of_eighths_gets_one_beam() {
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &[item(10.0, NoteValue::Eighth), item(30.0, NoteValue::Eighth)]);
        let beams = kinds(&group, &ElementKind::Beam);
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].x, 10.0 - STEM_WIDTH / 2.0);
        assert_eq!(beams[0].right(), 30.0 + STEM_WIDTH / 2.0);
        assert_eq!(kinds(&group, &ElementKind::Stem).len(), 2);
    }

    #[test]
    fn whole_notes_get_no_stem_or_beam() {
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &[item(10.0, NoteValue::Whole)]);
        assert!(group.is_empty());
    }

    #[test]
    fn half_notes_get_short_stems() {
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &[item(10.0, NoteValue::Half)]);
        let stems = kinds(&group, &ElementKind::Stem);
        assert_eq!(stems.len(), 1);
        assert_eq!(stems[0].height, SHORT_STEM_HEIGHT);
        assert!(kinds(&group, &ElementKind::Beam).is_empty());
    }

    #[test]
    fn mixed_levels_stack_beams_and_stubs() {
        // eighth + two sixteenths... then a sixteenth alone at the end of a beat
        let beat = [
            item(0.0, NoteValue::Eighth),
            item(10.0, NoteValue::Sixteenth),
            item(20.0, NoteValue::Sixteenth),
        ];
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &beat);
        let beams = kinds(&group, &ElementKind::Beam);
        assert_eq!(beams.len(), 2);
        assert_eq!(beams[0].y, -BEAM_HEIGHT);
        assert_eq!(beams[1].y, -BEAM_HEIGHT - BEAM_LEVEL_STEP);
        assert_eq!(beams[1].x, 10.0 - STEM_WIDTH / 2.0);

        let lone = [item(0.0, NoteValue::Eighth), item(10.0, NoteValue::Sixteenth)];
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &lone);
        let beams = kinds(&group, &ElementKind::Beam);
        assert_eq!(beams.len(), 2);
        // the sixteenth's second beam is a stub reaching back into the beat
        assert_eq!(beams[1].x, 10.0 - BEAM_STUB_WIDTH);
        assert_eq!(beams[1].right(), 10.0 + STEM_WIDTH / 2.0);
    }

    #[test]
    fn rests_share_the_beat_beam() {
        // sixteenth, sixteenth rest, sixteenth, sixteenth: one run at two levels
        let beat = [
            item(0.0, NoteValue::Sixteenth),
            item(10.0, NoteValue::Sixteenth),
            item(20.0, NoteValue::Sixteenth),
            item(30.0, NoteValue::Sixteenth),
        ];
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &beat);
        let stems = kinds(&group, &ElementKind::Stem);
        assert_eq!(stems.len(), 4);
        assert_eq!(stems[1].center_x(), 10.0);
        let beams = kinds(&group, &ElementKind::Beam);
        assert_eq!(beams.len(), 2);
        for beam in beams {
            assert_eq!((beam.x, beam.right()), (0.0 - STEM_WIDTH / 2.0, 30.0 + STEM_WIDTH / 2.0));
        }
    }

    #[test]
    fn dots_clear_the_beams() {
        let mut dotted = item(0.0, NoteValue::Eighth);
        dotted.dots = 1;
        let beat = [dotted, item(20.0, NoteValue::Sixteenth)];
        let mut group = NonNegativeGroup::new();
        add_beat_decorations(&mut group, &beat);
        let dots = kinds(&group, &ElementKind::Dot);
        assert_eq!(dots.len(), 1);
        let beams = kinds(&group, &ElementKind::Beam);
        let lowest_beam_top = beams.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
        // one beam level was drawn under the dotted eighth
        assert!(dots[0].bottom() <= -BEAM_LEVEL_STEP);
        assert!(dots[0].x > 0.0);
        assert!(lowest_beam_top < 0.0);
    }
}
