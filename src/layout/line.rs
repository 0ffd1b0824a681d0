//! One system of a part: the measures that share a staff, plus everything
//! drawn above it (grid decorations), on it (ties, slides) and below it
//! (stems, beams, dots).

use crate::config::LayoutConfig;
use crate::model::*;
use super::anchored::{AnchoredGroup, VerticalAlign};
use super::arcs::{self, PlacedChord, TieSpan};
use super::beats::{self, BeatItem};
use super::constants::*;
use super::element::{Element, ElementKind, Group};
use super::flex::FlexGroup;
use super::geom::Rect;
use super::grid::{GridConstraint, GridGroup};
use super::measure::{measure_chords, staff_height};
use super::non_negative::NonNegativeGroup;

/// Per-part state shared by every line of the part.
pub(super) struct PartContext<'a> {
    pub(super) part: &'a Part,
    pub(super) line_width: f64,
    pub(super) line_height: f64,
    pub(super) show_measure_numbers: bool,
    /// Time signature in force at each measure
    time_signatures: Vec<TimeSignature>,
    /// Whether each measure starts with a time signature glyph
    signature_shown: Vec<bool>,
    ties: Vec<TieSpan>,
}

impl<'a> PartContext<'a> {
    pub(super) fn new(part: &'a Part, config: &LayoutConfig) -> Self {
        let mut time_signatures = Vec::with_capacity(part.measures.len());
        let mut signature_shown = Vec::with_capacity(part.measures.len());
        let mut current = TimeSignature::default();
        for (index, measure) in part.measures.iter().enumerate() {
            let changed = match measure.time_signature {
                Some(ts) => {
                    let changed = index == 0 || ts != current;
                    current = ts;
                    changed
                }
                None => index == 0,
            };
            time_signatures.push(current);
            signature_shown.push(changed);
        }

        Self {
            part,
            line_width: config.content_width(),
            line_height: config.staff_line_height,
            show_measure_numbers: config.show_measure_numbers,
            time_signatures,
            signature_shown,
            ties: arcs::collect_ties(part),
        }
    }

    /// The time signature to draw at the start of measure `index`, if any.
    pub(super) fn shown_time_signature(&self, index: usize) -> Option<TimeSignature> {
        match self.signature_shown.get(index) {
            Some(true) => self.time_signatures.get(index).copied(),
            _ => None,
        }
    }

    fn beat_length(&self, index: usize) -> f64 {
        self.time_signatures.get(index).copied().unwrap_or_default().beat_length()
    }

    pub(super) fn staff_height(&self) -> f64 {
        staff_height(self.part.strings, self.line_height)
    }
}

/// Measures accumulated for the line currently being filled.
pub(super) struct LineBuilder {
    measures: FlexGroup,
    indices: Vec<usize>,
    staff_height: f64,
}

impl LineBuilder {
    /// An empty line: just the opening bar line.
    pub(super) fn new(width: f64, staff_height: f64) -> Self {
        let mut measures = FlexGroup::horizontal(width, staff_height);
        measures.add(bar_line(staff_height), None);
        Self { measures, indices: Vec::new(), staff_height }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Measure indices on this line, left to right.
    #[cfg(test)]
    pub(super) fn measure_indices(&self) -> &[usize] {
        &self.indices
    }

    /// Append a measure and its closing bar line if both fit in the line
    /// width. A line without measures takes the first one regardless. On
    /// refusal the measure is handed back and the line is unchanged.
    pub(super) fn try_push_measure(&mut self, measure: Element, index: usize) -> Result<(), Element> {
        if self.is_empty() {
            self.push(measure, index);
            return Ok(());
        }

        let factor = stretch_factor(&measure);
        self.measures.try_add(measure, factor)?;
        if self.measures.try_add(bar_line(self.staff_height), None).is_err() {
            // The measure fit but its bar line does not; take it back.
            if let Some(measure) = self.measures.pop() {
                return Err(measure);
            }
        }
        self.indices.push(index);
        Ok(())
    }

    /// A line holding only `measure`, however wide it is.
    pub(super) fn starting_with(width: f64, staff_height: f64, measure: Element, index: usize) -> Self {
        let mut line = Self::new(width, staff_height);
        line.push(measure, index);
        line
    }

    fn push(&mut self, measure: Element, index: usize) {
        let factor = stretch_factor(&measure);
        self.measures.add(measure, factor);
        self.measures.add(bar_line(self.staff_height), None);
        self.indices.push(index);
    }

    /// Lay the line out and build its page-line element.
    pub(super) fn finish(mut self, ctx: &PartContext<'_>, stretch: bool) -> Element {
        self.measures.layout(stretch);
        let line_width = self.measures.extent();
        log::debug!(
            "line finished with measures {:?} (width {:.1}, stretched: {})",
            self.indices,
            line_width,
            stretch
        );

        let placed = self.placed_chords();

        let mut grid = GridGroup::new();
        add_decorations(&mut grid, ctx, &self.measures, &placed);
        let mut grid = Element::grid(ElementKind::Group, grid);
        grid.layout();

        let mut below = NonNegativeGroup::new();
        // Strut from the stem tops to the baseline, so every line's stems
        // hang from the same place whatever note values it holds. It also
        // keeps x = 0 in the bounds, so stems stay under their chords.
        below.add(Element::leaf(ElementKind::Space, Rect::new(0.0, -STEM_HEIGHT, 0.0, STEM_HEIGHT)));
        self.add_beats(&mut below, ctx, &placed);
        let mut below = Element::non_negative(ElementKind::Group, below);
        below.layout();

        let mut connectors = AnchoredGroup::new(VerticalAlign::Top);
        arcs::route_ties(&ctx.ties, &placed, line_width, ctx.line_height, &mut connectors);
        arcs::route_slides(ctx.part, &placed, line_width, ctx.line_height, &mut connectors);
        let mut connectors = Element::anchored(ElementKind::Group, connectors);
        connectors.layout();

        let mut staff = Group::new(Rect::from_size(line_width, self.staff_height));
        staff.add(staff_lines(ctx.part.strings, ctx.line_height, line_width));
        staff.add(connectors);
        staff.add(Element::flex(ElementKind::Group, self.measures));
        staff.fit();

        let mut line = FlexGroup::vertical(ctx.line_width, 0.0);
        line.add(grid, None);
        line.add(Element::group(ElementKind::Group, staff), None);
        line.add(below, None);
        line.fit_content();
        Element::flex(ElementKind::PageLine, line)
    }

    /// Every chord and rest of the line with its box in the staff frame.
    fn placed_chords(&self) -> Vec<PlacedChord> {
        let mut placed = Vec::new();
        for measure in self.measures.children() {
            let ElementKind::Measure { index, .. } = measure.kind else { continue };
            let origin = measure.rect();
            for chord in measure_chords(measure) {
                let chord_index = match chord.kind {
                    ElementKind::Chord { chord: c, .. } | ElementKind::Rest { chord: c, .. } => c,
                    _ => continue,
                };
                placed.push(PlacedChord {
                    address: NoteAddress { measure: index, chord: chord_index },
                    rect: chord.rect().translate(origin.x, origin.y),
                });
            }
        }
        placed
    }

    fn add_beats(&self, below: &mut NonNegativeGroup, ctx: &PartContext<'_>, placed: &[PlacedChord]) {
        for &index in &self.indices {
            let items: Vec<BeatItem> = placed
                .iter()
                .filter(|p| p.address.measure == index)
                .filter_map(|p| {
                    let chord = ctx.part.chord_at(p.address)?;
                    // notes span the chord box, so its center is the first note's
                    Some(BeatItem {
                        x: p.rect.center_x(),
                        value: chord.duration.value,
                        dots: chord.duration.dots,
                        fraction: chord.duration.fraction(),
                    })
                })
                .collect();
            for beat in beats::group_into_beats(&items, ctx.beat_length(index)) {
                beats::add_beat_decorations(below, &items[beat]);
            }
        }
    }
}

/// Measures with more chords take a larger share of a line's spare width.
fn stretch_factor(measure: &Element) -> Option<f64> {
    Some(measure_chords(measure).count() as f64)
}

fn bar_line(height: f64) -> Element {
    Element::leaf(ElementKind::BarLine, Rect::from_size(BAR_LINE_WIDTH, height))
}

fn staff_lines(strings: u8, line_height: f64, width: f64) -> Element {
    let mut backdrop = Group::new(Rect::from_size(width, staff_height(strings, line_height)));
    for string in 1..=strings {
        let y = string as f64 * line_height - STAFF_LINE_THICKNESS / 2.0;
        backdrop.add(Element::leaf(ElementKind::Line, Rect::new(0.0, y, width, STAFF_LINE_THICKNESS)));
    }
    Element::group(ElementKind::Group, backdrop)
}

// ── Above-staff decorations ─────────────────────────────────────────

/// Column layout of a line: a head column per measure (bar line, time
/// signature and leading space), then one column per chord reaching to the
/// next chord or the end of the measure.
struct Columns {
    edges: Vec<f64>,
    /// Head column of each measure on the line
    heads: Vec<(usize, usize)>,
    /// Column of each placed chord, parallel to the placed list
    chords: Vec<usize>,
}

fn columns(measures: &FlexGroup, placed: &[PlacedChord]) -> Columns {
    let mut edges = Vec::new();
    let mut heads = Vec::new();
    let mut chords = Vec::with_capacity(placed.len());

    for measure in measures.children() {
        let ElementKind::Measure { index, .. } = measure.kind else { continue };
        let right = measure.rect().right();
        let mine: Vec<&PlacedChord> =
            placed.iter().filter(|p| p.address.measure == index).collect();

        heads.push((index, edges.len()));
        edges.push(mine.first().map_or(right, |p| p.rect.x));
        for (i, _) in mine.iter().enumerate() {
            chords.push(edges.len());
            edges.push(mine.get(i + 1).map_or(right, |next| next.rect.x));
        }
    }
    Columns { edges, heads, chords }
}

fn text_leaf(text: String, size: f64, height: f64) -> Element {
    Element::leaf(ElementKind::Text { text, size }, Rect::from_size(0.0, height))
}

fn add_decorations(
    grid: &mut GridGroup,
    ctx: &PartContext<'_>,
    measures: &FlexGroup,
    placed: &[PlacedChord],
) {
    let columns = columns(measures, placed);
    grid.set_right_edges(&columns.edges);

    for &(index, column) in &columns.heads {
        if ctx.show_measure_numbers {
            grid.add(
                text_leaf((index + 1).to_string(), MEASURE_NUMBER_FONT_SIZE, TEXT_HEIGHT),
                GridConstraint::column(column),
            );
        }
        if let Some(tempo) = ctx.part.measures.get(index).and_then(|m| m.tempo) {
            grid.add(
                text_leaf(format!("♩ = {tempo}"), TEXT_FONT_SIZE, TEXT_HEIGHT),
                GridConstraint::column(column),
            );
        }
    }

    let chords: Vec<Option<&Chord>> = placed.iter().map(|p| ctx.part.chord_at(p.address)).collect();
    add_spans(grid, &chords, &columns.chords, "P.M.", |c| c.palm_mute);
    add_spans(grid, &chords, &columns.chords, "let ring", |c| c.let_ring);

    for (chord, &column) in chords.iter().zip(&columns.chords) {
        let Some(chord) = chord else { continue };
        if let Some(text) = &chord.text {
            grid.add(text_leaf(text.clone(), TEXT_FONT_SIZE, TEXT_HEIGHT), GridConstraint::column(column));
        }
        if chord.rest {
            continue;
        }
        if chord.notes.iter().any(|n| n.vibrato) {
            grid.add(
                Element::leaf(ElementKind::Vibrato, Rect::from_size(0.0, VIBRATO_HEIGHT)),
                GridConstraint::column(column),
            );
        }
        if let Some(bend) = chord.notes.iter().find_map(|n| n.bend) {
            match bend.label() {
                Some(label) => grid.add(
                    text_leaf(label, TEXT_FONT_SIZE, TEXT_HEIGHT),
                    GridConstraint::column(column),
                ),
                None => log::warn!("bend of kind {:?} without an amount has no label; skipped", bend.kind),
            }
        }
        if let Some(name) = &chord.name {
            grid.add(
                Element::leaf(
                    ElementKind::ChordDiagram { name: name.clone() },
                    Rect::from_size(0.0, CHORD_NAME_HEIGHT),
                ),
                GridConstraint::bottom_row(column, column),
            );
        }
    }
}

/// One dashed span per maximal run of consecutive chords matching `marked`.
fn add_spans(
    grid: &mut GridGroup,
    chords: &[Option<&Chord>],
    columns: &[usize],
    label: &str,
    marked: impl Fn(&Chord) -> bool,
) {
    let mut run: Option<(usize, usize)> = None;
    for (chord, &column) in chords.iter().zip(columns) {
        let on = chord.is_some_and(|c| !c.rest && marked(c));
        run = match (on, run) {
            (true, Some((start, _))) => Some((start, column)),
            (true, None) => Some((column, column)),
            (false, Some((start, end))) => {
                grid.add(dashed(label), GridConstraint::span(start, end));
                None
            }
            (false, None) => None,
        };
    }
    if let Some((start, end)) = run {
        grid.add(dashed(label), GridConstraint::span(start, end));
    }
}

fn dashed(label: &str) -> Element {
    Element::leaf(
        ElementKind::DashedLineText { text: label.to_string() },
        Rect::from_size(0.0, TEXT_HEIGHT),
    )
}
