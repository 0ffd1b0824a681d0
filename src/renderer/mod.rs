//! Score renderer: draws a finished [`LayoutTree`] as SVG.
//!
//! All geometry comes from the layout pass; the renderer only walks the
//! tree depth-first, translating into each child's frame, and draws one
//! primitive per element kind.

mod constants;
mod svg_builder;

use crate::config::LayoutConfig;
use crate::layout::{layout_score, ElementKind, ElementTag, LayoutTree, NodeId, Rect};
use crate::model::Score;
use constants::*;
use svg_builder::{empty_svg, SvgBuilder};

// ═══════════════════════════════════════════════════════════════════════
// Style
// ═══════════════════════════════════════════════════════════════════════

/// Caller-supplied rendering options.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    /// Outline every box in the color of its element kind
    pub debug: bool,
    /// Outline color per element kind, used in debug mode
    pub palette: fn(ElementTag) -> String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { debug: false, palette: default_palette }
    }
}

impl RenderStyle {
    pub fn debug() -> Self {
        Self { debug: true, ..Self::default() }
    }
}

/// Evenly spread hues, one per element kind. The same kind always gets
/// the same color.
pub fn default_palette(tag: ElementTag) -> String {
    let index = ElementTag::ALL.iter().position(|t| *t == tag).unwrap_or(0);
    format!("hsl({}, 70%, 45%)", (index * 137) % 360)
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a laid-out score into a complete SVG string.
pub fn render_svg(tree: &LayoutTree, config: &LayoutConfig, style: &RenderStyle) -> String {
    if tree.is_empty() || tree.pages().is_empty() {
        return empty_svg("No pages in score");
    }
    let root = tree.node(tree.root()).rect;
    let mut svg = SvgBuilder::new(root.right(), root.bottom());
    svg.rect(0.0, 0.0, root.right(), root.bottom(), BACKGROUND_COLOR, "none", 0.0);

    let mut painter = Painter { svg, tree, line_height: config.staff_line_height, style };
    painter.draw(tree.root(), 0.0, 0.0);
    painter.svg.build()
}

/// Lay out `score` and render it in one step.
pub fn render_score_to_svg(score: &Score, config: &LayoutConfig, style: &RenderStyle) -> String {
    let tree = layout_score(score, config);
    render_svg(&tree, config, style)
}

// ═══════════════════════════════════════════════════════════════════════
// Tree walk
// ═══════════════════════════════════════════════════════════════════════

struct Painter<'a> {
    svg: SvgBuilder,
    tree: &'a LayoutTree,
    line_height: f64,
    style: &'a RenderStyle,
}

impl Painter<'_> {
    fn draw(&mut self, id: NodeId, ox: f64, oy: f64) {
        let tree = self.tree;
        let node = tree.node(id);
        let r = node.rect.translate(ox, oy);
        self.primitive(&node.kind, r);
        if self.style.debug {
            let color = (self.style.palette)(node.kind.tag());
            self.svg.rect(r.x, r.y, r.width, r.height, "none", &color, DEBUG_OUTLINE_WIDTH);
        }
        for &child in tree.children(id) {
            self.draw(child, r.x, r.y);
        }
    }

    fn primitive(&mut self, kind: &ElementKind, r: Rect) {
        let svg = &mut self.svg;
        match kind {
            ElementKind::Space
            | ElementKind::Measure { .. }
            | ElementKind::Chord { .. }
            | ElementKind::Group
            | ElementKind::PageLine
            | ElementKind::Part { .. }
            | ElementKind::Score => {}
            ElementKind::Page { .. } => {
                svg.rect(r.x, r.y, r.width, r.height, PAGE_COLOR, PAGE_BORDER_COLOR, 1.0);
            }
            ElementKind::Text { text, size } => {
                let baseline = r.center_y() + size * TEXT_BASELINE_FACTOR;
                svg.text(r.x, baseline, text, *size, "normal", HEADER_COLOR, "start");
            }
            ElementKind::BarLine => {
                let x = r.center_x();
                svg.line(x, r.y + self.line_height, x, r.bottom() - self.line_height, BARLINE_COLOR, BARLINE_WIDTH);
            }
            ElementKind::Rest { .. } => {
                svg.rect(
                    r.center_x() - REST_GLYPH_WIDTH / 2.0,
                    r.center_y() - REST_GLYPH_HEIGHT / 2.0,
                    REST_GLYPH_WIDTH,
                    REST_GLYPH_HEIGHT,
                    REST_COLOR,
                    "none",
                    0.0,
                );
            }
            ElementKind::Note { text, .. } => {
                // Mask the staff line behind the fret number.
                svg.rect(r.x, r.y, r.width, r.height, PAGE_COLOR, "none", 0.0);
                let baseline = r.center_y() + NOTE_FONT_SIZE * TEXT_BASELINE_FACTOR;
                svg.text(r.center_x(), baseline, text, NOTE_FONT_SIZE, "normal", NOTE_COLOR, "middle");
            }
            ElementKind::Stem | ElementKind::Beam => {
                svg.rect(r.x, r.y, r.width, r.height, NOTE_COLOR, "none", 0.0);
            }
            ElementKind::Dot => {
                svg.circle(r.center_x(), r.center_y(), r.width / 2.0, NOTE_COLOR);
            }
            ElementKind::Arc { open_start, open_end } => {
                // Open ends leave the curve at half height, as if cut at the line edge.
                let start_y = if *open_start { r.center_y() } else { r.y };
                let end_y = if *open_end { r.center_y() } else { r.y };
                let d = format!(
                    "M{:.1},{:.1} Q{:.1},{:.1} {:.1},{:.1}",
                    r.x,
                    start_y,
                    r.center_x(),
                    r.bottom() + r.height,
                    r.right(),
                    end_y
                );
                svg.path(&d, "none", NOTE_COLOR, ARC_STROKE_WIDTH);
            }
            ElementKind::Slide { rising } => {
                let (y1, y2) = if *rising { (r.bottom(), r.y) } else { (r.y, r.bottom()) };
                svg.line(r.x, y1, r.right(), y2, NOTE_COLOR, SLIDE_STROKE_WIDTH);
            }
            ElementKind::Vibrato => {
                svg.path(&zigzag(r), "none", NOTE_COLOR, VIBRATO_STROKE_WIDTH);
            }
            ElementKind::DashedLineText { text } => {
                let baseline = r.center_y() + DASHED_LABEL_FONT_SIZE * TEXT_BASELINE_FACTOR;
                svg.text(r.x, baseline, text, DASHED_LABEL_FONT_SIZE, "normal", NOTE_COLOR, "start");
                let dash_start = r.x + text.chars().count() as f64 * DASHED_LABEL_CHAR_WIDTH;
                if dash_start < r.right() {
                    let y = r.center_y();
                    svg.dashed_line(dash_start, y, r.right(), NOTE_COLOR, DASHED_STROKE_WIDTH);
                    svg.line(r.right(), y - DASHED_END_TICK / 2.0, r.right(), y + DASHED_END_TICK / 2.0, NOTE_COLOR, DASHED_STROKE_WIDTH);
                }
            }
            ElementKind::ChordDiagram { name } => {
                let baseline = r.center_y() + CHORD_NAME_FONT_SIZE * TEXT_BASELINE_FACTOR;
                svg.chord_text(r.x, baseline, name, CHORD_NAME_FONT_SIZE, CHORD_COLOR);
            }
            ElementKind::Line => {
                let y = r.center_y();
                svg.line(r.x, y, r.right(), y, STAFF_COLOR, STAFF_LINE_WIDTH);
            }
        }
    }
}

/// Zigzag across the box, one peak per period.
fn zigzag(r: Rect) -> String {
    let mut d = format!("M{:.1},{:.1}", r.x, r.center_y());
    let half = VIBRATO_PERIOD / 2.0;
    let mut x = r.x;
    let mut up = true;
    while x + half <= r.right() {
        x += half;
        let y = if up { r.y } else { r.bottom() };
        d.push_str(&format!(" L{:.1},{:.1}", x, y));
        up = !up;
    }
    d
}
