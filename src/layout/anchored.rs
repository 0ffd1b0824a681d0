//! Children placed horizontally at the offset of an anchor laid out elsewhere.

use super::element::Element;
use super::geom::Rect;

/// Vertical alignment of anchored children within the group's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Bottom,
}

/// Children overlap freely; each takes the x of its anchor (or 0) and is
/// aligned to the top or bottom of the tallest child.
#[derive(Debug, Clone)]
pub struct AnchoredGroup {
    pub rect: Rect,
    align: VerticalAlign,
    children: Vec<Element>,
    anchors: Vec<Option<f64>>,
}

impl AnchoredGroup {
    pub fn new(align: VerticalAlign) -> Self {
        Self { rect: Rect::default(), align, children: Vec::new(), anchors: Vec::new() }
    }

    /// `anchor_x` is the anchor's x offset, already expressed in this
    /// group's frame.
    pub fn add(&mut self, element: Element, anchor_x: Option<f64>) {
        self.children.push(element);
        self.anchors.push(anchor_x);
    }

    /// Anchor on another element's box.
    pub fn add_anchored_to(&mut self, element: Element, anchor: Option<&Rect>) {
        self.add(element, anchor.map(|r| r.x));
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn layout(&mut self) {
        let mut height: f64 = 0.0;
        for child in &mut self.children {
            child.layout();
            height = height.max(child.rect().height);
        }

        let mut width: f64 = 0.0;
        for (child, anchor) in self.children.iter_mut().zip(&self.anchors) {
            let rect = child.rect_mut();
            rect.x = anchor.unwrap_or(0.0);
            rect.y = match self.align {
                VerticalAlign::Top => 0.0,
                VerticalAlign::Bottom => height - rect.height,
            };
            width = width.max(rect.right());
        }
        self.rect.width = width;
        self.rect.height = height;
    }

    pub(crate) fn into_children(self) -> Vec<Element> {
        self.children
    }
}
