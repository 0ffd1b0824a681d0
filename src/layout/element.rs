//! Layout elements: a closed set of visual variants, each owning a box in
//! its parent's frame and, for containers, its children.

use super::anchored::AnchoredGroup;
use super::flex::FlexGroup;
use super::geom::Rect;
use super::grid::GridGroup;
use super::non_negative::NonNegativeGroup;

/// What an element depicts. Renderers and hit-test consumers match on this
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Space,
    Text { text: String, size: f64 },
    BarLine,
    Measure { part: usize, index: usize },
    Chord { measure: usize, chord: usize },
    Rest { measure: usize, chord: usize },
    Note { string: u8, text: String },
    Stem,
    Beam,
    Dot,
    /// Tie arc; `open_start`/`open_end` mark arcs cut at a line edge
    Arc { open_start: bool, open_end: bool },
    Slide { rising: bool },
    Vibrato,
    DashedLineText { text: String },
    ChordDiagram { name: String },
    /// One horizontal staff line
    Line,
    Group,
    /// One system: decorations, staff and measures
    PageLine,
    Page { index: usize },
    Part { index: usize, name: String },
    Score,
}

/// Payload-free discriminant of [`ElementKind`], for lookups by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementTag {
    Space,
    Text,
    BarLine,
    Measure,
    Chord,
    Rest,
    Note,
    Stem,
    Beam,
    Dot,
    Arc,
    Slide,
    Vibrato,
    DashedLineText,
    ChordDiagram,
    Line,
    Group,
    PageLine,
    Page,
    Part,
    Score,
}

impl ElementKind {
    pub fn tag(&self) -> ElementTag {
        match self {
            ElementKind::Space => ElementTag::Space,
            ElementKind::Text { .. } => ElementTag::Text,
            ElementKind::BarLine => ElementTag::BarLine,
            ElementKind::Measure { .. } => ElementTag::Measure,
            ElementKind::Chord { .. } => ElementTag::Chord,
            ElementKind::Rest { .. } => ElementTag::Rest,
            ElementKind::Note { .. } => ElementTag::Note,
            ElementKind::Stem => ElementTag::Stem,
            ElementKind::Beam => ElementTag::Beam,
            ElementKind::Dot => ElementTag::Dot,
            ElementKind::Arc { .. } => ElementTag::Arc,
            ElementKind::Slide { .. } => ElementTag::Slide,
            ElementKind::Vibrato => ElementTag::Vibrato,
            ElementKind::DashedLineText { .. } => ElementTag::DashedLineText,
            ElementKind::ChordDiagram { .. } => ElementTag::ChordDiagram,
            ElementKind::Line => ElementTag::Line,
            ElementKind::Group => ElementTag::Group,
            ElementKind::PageLine => ElementTag::PageLine,
            ElementKind::Page { .. } => ElementTag::Page,
            ElementKind::Part { .. } => ElementTag::Part,
            ElementKind::Score => ElementTag::Score,
        }
    }
}

impl ElementTag {
    pub const ALL: [ElementTag; 21] = [
        ElementTag::Space,
        ElementTag::Text,
        ElementTag::BarLine,
        ElementTag::Measure,
        ElementTag::Chord,
        ElementTag::Rest,
        ElementTag::Note,
        ElementTag::Stem,
        ElementTag::Beam,
        ElementTag::Dot,
        ElementTag::Arc,
        ElementTag::Slide,
        ElementTag::Vibrato,
        ElementTag::DashedLineText,
        ElementTag::ChordDiagram,
        ElementTag::Line,
        ElementTag::Group,
        ElementTag::PageLine,
        ElementTag::Page,
        ElementTag::Part,
        ElementTag::Score,
    ];
}

/// Children whose positions the caller assigns directly.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub rect: Rect,
    children: Vec<Element>,
}

impl Group {
    pub fn new(rect: Rect) -> Self {
        Self { rect, children: Vec::new() }
    }

    pub fn add(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Grow the box to cover every child, seeded from the group's own
    /// origin-anchored zero box.
    pub fn fit(&mut self) {
        let bounds = self
            .children
            .iter()
            .fold(Rect::from_size(self.rect.width, self.rect.height), |acc, c| {
                acc.encompass(c.rect())
            });
        self.rect.width = bounds.right().max(0.0);
        self.rect.height = bounds.bottom().max(0.0);
    }

    fn into_children(self) -> Vec<Element> {
        self.children
    }
}

#[derive(Debug, Clone)]
enum Body {
    Leaf(Rect),
    Group(Group),
    Flex(FlexGroup),
    Grid(GridGroup),
    Anchored(AnchoredGroup),
    NonNegative(NonNegativeGroup),
}

/// A node of the layout tree under construction.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    body: Body,
}

impl Element {
    pub fn leaf(kind: ElementKind, rect: Rect) -> Self {
        Self { kind, body: Body::Leaf(rect) }
    }

    pub fn space(width: f64, height: f64) -> Self {
        Self::leaf(ElementKind::Space, Rect::from_size(width, height))
    }

    pub fn group(kind: ElementKind, group: Group) -> Self {
        Self { kind, body: Body::Group(group) }
    }

    pub fn flex(kind: ElementKind, flex: FlexGroup) -> Self {
        Self { kind, body: Body::Flex(flex) }
    }

    pub fn grid(kind: ElementKind, grid: GridGroup) -> Self {
        Self { kind, body: Body::Grid(grid) }
    }

    pub fn anchored(kind: ElementKind, anchored: AnchoredGroup) -> Self {
        Self { kind, body: Body::Anchored(anchored) }
    }

    pub fn non_negative(kind: ElementKind, group: NonNegativeGroup) -> Self {
        Self { kind, body: Body::NonNegative(group) }
    }

    pub fn rect(&self) -> &Rect {
        match &self.body {
            Body::Leaf(rect) => rect,
            Body::Group(g) => &g.rect,
            Body::Flex(f) => &f.rect,
            Body::Grid(g) => &g.rect,
            Body::Anchored(a) => &a.rect,
            Body::NonNegative(n) => &n.rect,
        }
    }

    pub fn rect_mut(&mut self) -> &mut Rect {
        match &mut self.body {
            Body::Leaf(rect) => rect,
            Body::Group(g) => &mut g.rect,
            Body::Flex(f) => &mut f.rect,
            Body::Grid(g) => &mut g.rect,
            Body::Anchored(a) => &mut a.rect,
            Body::NonNegative(n) => &mut n.rect,
        }
    }

    pub fn children(&self) -> &[Element] {
        match &self.body {
            Body::Leaf(_) => &[],
            Body::Group(g) => g.children(),
            Body::Flex(f) => f.children(),
            Body::Grid(g) => g.children(),
            Body::Anchored(a) => a.children(),
            Body::NonNegative(n) => n.children(),
        }
    }

    /// The flex body of a sequential container, if this element is one.
    pub fn as_flex(&self) -> Option<&FlexGroup> {
        match &self.body {
            Body::Flex(f) => Some(f),
            _ => None,
        }
    }

    /// Re-run this element's own container layout after its box changed.
    /// Leaves and plain groups have nothing to do.
    pub fn layout(&mut self) {
        match &mut self.body {
            Body::Leaf(_) | Body::Group(_) => {}
            Body::Flex(f) => f.layout(true),
            Body::Grid(g) => g.layout(),
            Body::Anchored(a) => a.layout(),
            Body::NonNegative(n) => {
                n.layout();
            }
        }
    }

    /// Depth-first visit of this element and its descendants, with each
    /// element's box translated into this element's parent frame.
    pub fn visit(&self, f: &mut impl FnMut(&Element, Rect)) {
        fn walk(element: &Element, dx: f64, dy: f64, f: &mut impl FnMut(&Element, Rect)) {
            let rect = element.rect().translate(dx, dy);
            f(element, rect);
            for child in element.children() {
                walk(child, rect.x, rect.y, f);
            }
        }
        walk(self, 0.0, 0.0, f);
    }

    pub(crate) fn into_parts(self) -> (ElementKind, Rect, Vec<Element>) {
        match self.body {
            Body::Leaf(rect) => (self.kind, rect, Vec::new()),
            Body::Group(g) => (self.kind, g.rect, g.into_children()),
            Body::Flex(f) => {
                let rect = f.rect;
                (self.kind, rect, f.into_children())
            }
            Body::Grid(g) => {
                let rect = g.rect;
                (self.kind, rect, g.into_children())
            }
            Body::Anchored(a) => {
                let rect = a.rect;
                (self.kind, rect, a.into_children())
            }
            Body::NonNegative(n) => {
                let rect = n.rect;
                (self.kind, rect, n.into_children())
            }
        }
    }
}
