//! A group whose contributors may draw at negative offsets, normalized so
//! that its box starts at the origin.

use super::element::Element;
use super::geom::{Point, Rect};

#[derive(Debug, Clone, Default)]
pub struct NonNegativeGroup {
    pub rect: Rect,
    children: Vec<Element>,
}

impl NonNegativeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element at its own (possibly negative) position.
    pub fn add(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Size the box over the children's own bounds, then move everything
    /// so the box starts at `(0, 0)`. Returns the translation. Without
    /// children the box is empty and nothing moves.
    pub fn layout(&mut self) -> Point {
        let bounds = self
            .children
            .iter()
            .fold(Rect::empty(), |acc, child| acc.encompass(child.rect()));
        if bounds.is_empty() {
            self.rect.width = 0.0;
            self.rect.height = 0.0;
            return Point::default();
        }

        let shift = Point::new(-bounds.x, -bounds.y);
        if shift.x != 0.0 || shift.y != 0.0 {
            for child in &mut self.children {
                let rect = child.rect_mut();
                *rect = rect.translate(shift.x, shift.y);
            }
        }
        self.rect.width = bounds.width;
        self.rect.height = bounds.height;
        shift
    }

    pub(crate) fn into_children(self) -> Vec<Element> {
        self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::element::ElementKind;
    use pretty_assertions::assert_eq;

    fn stem(x: f64, y: f64, h: f64) -> Element {
        Element::leaf(ElementKind::Stem, Rect::new(x, y, 1.0, h))
    }

    #[test]
    fn negative_children_are_moved_down() {
        let mut group = NonNegativeGroup::new();
        group.add(stem(10.0, -20.0, 20.0));
        group.add(stem(30.0, -12.0, 12.0));
        let shift = group.layout();
        assert_eq!(shift, Point::new(-10.0, 20.0));
        assert_eq!(group.children()[0].rect().y, 0.0);
        assert_eq!(group.children()[1].rect().y, 8.0);
        assert_eq!(group.children()[0].rect().x, 0.0);
        assert_eq!(group.children()[1].rect().x, 20.0);
        assert_eq!(group.rect, Rect::new(0.0, 0.0, 21.0, 20.0));
    }

    #[test]
    fn positive_children_are_moved_to_the_origin() {
        let mut group = NonNegativeGroup::new();
        group.add(stem(5.0, 3.0, 4.0));
        group.add(stem(9.0, 6.0, 4.0));
        assert_eq!(group.layout(), Point::new(-5.0, -3.0));
        assert_eq!(*group.children()[0].rect(), Rect::new(0.0, 0.0, 1.0, 4.0));
        assert_eq!(group.rect, Rect::new(0.0, 0.0, 5.0, 7.0));
    }

    #[test]
    fn already_normalized_is_untouched() {
        let mut group = NonNegativeGroup::new();
        group.add(stem(0.0, 0.0, 5.0));
        assert_eq!(group.layout(), Point::new(0.0, 0.0));
        assert_eq!(group.children()[0].rect().y, 0.0);
        // a second pass is a no-op
        assert_eq!(group.layout(), Point::new(0.0, 0.0));
    }

    #[test]
    fn empty_group_is_zero_box() {
        let mut group = NonNegativeGroup::new();
        group.layout();
        assert_eq!(group.rect, Rect::default());
    }
}
