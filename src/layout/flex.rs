//! Sequential packing along one axis, with speculative insertion and
//! proportional stretch of leftover space.

use super::element::Element;
use super::geom::{Axis, Rect, EPSILON};

/// Packs children end to end along `axis`.
///
/// The container's own size along the axis is its bound: [`FlexGroup::try_add`]
/// refuses children that would cross it, and [`FlexGroup::layout`] hands the
/// space left below it to the stretchable children. The cross-axis size
/// grows to cover the tallest (or widest) child.
#[derive(Debug, Clone)]
pub struct FlexGroup {
    pub rect: Rect,
    axis: Axis,
    /// Cross-axis size the group was created with; never shrunk below.
    base_cross: f64,
    children: Vec<Element>,
    /// `None` = never stretched, `Some(w)` = stretch weight `w`
    factors: Vec<Option<f64>>,
}

impl FlexGroup {
    pub fn new(axis: Axis, rect: Rect) -> Self {
        Self {
            rect,
            axis,
            base_cross: rect.size(axis.cross()),
            children: Vec::new(),
            factors: Vec::new(),
        }
    }

    pub fn horizontal(width: f64, height: f64) -> Self {
        Self::new(Axis::Horizontal, Rect::from_size(width, height))
    }

    pub fn vertical(width: f64, height: f64) -> Self {
        Self::new(Axis::Vertical, Rect::from_size(width, height))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn factors(&self) -> &[Option<f64>] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// End of the last child along the axis (0 when empty).
    pub fn extent(&self) -> f64 {
        self.children.last().map_or(0.0, |c| c.rect().end(self.axis))
    }

    /// The size the container may fill along its axis.
    pub fn bound(&self) -> f64 {
        self.rect.size(self.axis)
    }

    /// Append `element` after the last child. Always succeeds, even past
    /// the bound.
    pub fn add(&mut self, mut element: Element, factor: Option<f64>) {
        let start = self.extent();
        element.rect_mut().set_start(self.axis, start);
        let cross = self.axis.cross();
        let child_cross_end = element.rect().end(cross);
        if child_cross_end > self.rect.size(cross) {
            self.rect.set_size(cross, child_cross_end);
        }
        self.children.push(element);
        self.factors.push(factor);
    }

    /// Append `element` only if it fits within the bound. On refusal the
    /// element is handed back and the group is left untouched.
    ///
    /// An empty group accepts anything.
    pub fn try_add(&mut self, element: Element, factor: Option<f64>) -> Result<(), Element> {
        if !self.children.is_empty()
            && self.extent() + element.rect().size(self.axis) > self.bound() + EPSILON
        {
            return Err(element);
        }
        self.add(element, factor);
        Ok(())
    }

    /// Remove the last child and undo the cross-axis growth it caused.
    pub fn pop(&mut self) -> Option<Element> {
        let element = self.children.pop()?;
        self.factors.pop();
        let cross = self.axis.cross();
        let cross_size = self
            .children
            .iter()
            .map(|c| c.rect().end(cross))
            .fold(self.base_cross, f64::max);
        self.rect.set_size(cross, cross_size);
        Some(element)
    }

    /// Shrink or grow the bound to exactly the packed extent.
    pub fn fit_content(&mut self) {
        let extent = self.extent();
        self.rect.set_size(self.axis, extent);
    }

    /// Distribute the space left below the bound among stretchable children
    /// (when `stretch` is set) and re-pack every child end to end.
    pub fn layout(&mut self, stretch: bool) {
        let has_stretchable = self.factors.iter().any(Option::is_some);
        let extra = self.bound() - self.extent();
        if stretch && has_stretchable && extra > EPSILON {
            let mut factor_sum: f64 = self.factors.iter().flatten().sum();
            if factor_sum == 0.0 {
                factor_sum = 1.0;
            }
            for (child, factor) in self.children.iter_mut().zip(&self.factors) {
                if let Some(factor) = factor {
                    let grown = child.rect().size(self.axis) + extra * (factor / factor_sum);
                    child.rect_mut().set_size(self.axis, grown);
                    child.layout();
                }
            }
        }

        let mut position = 0.0;
        let cross = self.axis.cross();
        let mut cross_size = self.base_cross;
        for child in &mut self.children {
            child.rect_mut().set_start(self.axis, position);
            position = child.rect().end(self.axis);
            cross_size = cross_size.max(child.rect().end(cross));
        }
        self.rect.set_size(cross, cross_size);
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

    fn starts(group: &FlexGroup) -> Vec<f64> {
        group.children().iter().map(|c| c.rect().x).collect()
    }

    fn widths(group: &FlexGroup) -> Vec<f64> {
        group.children().iter().map(|c| c.rect().width).collect()
    }

    #[test]
    fn add_packs_end_to_end() {
        let mut group = FlexGroup::horizontal(100.0, 0.0);
        group.add(Element::space(10.0, 5.0), None);
        group.add(Element::space(20.0, 8.0), None);
        group.add(Element::space(5.0, 1.0), None);
        assert_eq!(starts(&group), vec![0.0, 10.0, 30.0]);
        assert_eq!(group.extent(), 35.0);
        assert_eq!(group.rect.height, 8.0);
    }

    #[test]
    fn try_add_refuses_overflow_and_leaves_group_unchanged() {
        let mut group = FlexGroup::horizontal(50.0, 4.0);
        assert!(group.try_add(Element::space(30.0, 4.0), None).is_ok());
        let before_rect = group.rect;
        let before_len = group.len();

        let rejected = group.try_add(Element::space(21.0, 9.0), Some(1.0));
        let rejected = rejected.expect_err("21 more units cannot fit in 20");
        assert_eq!(rejected.rect().width, 21.0);
        assert_eq!(group.rect, before_rect);
        assert_eq!(group.len(), before_len);
        assert_eq!(group.factors(), &[None]);

        // exactly filling the bound is fine
        assert!(group.try_add(Element::space(20.0, 4.0), None).is_ok());
        assert_eq!(group.extent(), 50.0);
    }

    #[test]
    fn try_add_on_empty_group_always_succeeds() {
        let mut group = FlexGroup::horizontal(10.0, 0.0);
        assert!(group.try_add(Element::space(500.0, 1.0), None).is_ok());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn pop_undoes_the_last_placement() {
        let mut group = FlexGroup::vertical(30.0, 200.0);
        group.add(Element::space(10.0, 20.0), None);
        group.add(Element::space(50.0, 20.0), None);
        assert_eq!(group.rect.width, 50.0);
        let popped = group.pop().unwrap();
        assert_eq!(popped.rect().y, 20.0);
        assert_eq!(group.rect.width, 30.0);
        assert_eq!(group.extent(), 20.0);
        assert!(group.pop().is_some());
        assert!(group.pop().is_none());
    }

    #[test]
    fn stretch_distributes_by_factor() {
        let mut group = FlexGroup::horizontal(100.0, 0.0);
        group.add(Element::space(10.0, 1.0), None);
        group.add(Element::space(10.0, 1.0), Some(1.0));
        group.add(Element::space(10.0, 1.0), None);
        group.add(Element::space(10.0, 1.0), Some(3.0));
        group.layout(true);
        // 60 spare units split 1:3
        assert_eq!(widths(&group), vec![10.0, 25.0, 10.0, 55.0]);
        assert_eq!(starts(&group), vec![0.0, 10.0, 35.0, 45.0]);
        assert_eq!(group.extent(), 100.0);
    }

    #[test]
    fn layout_without_stretch_only_repacks() {
        let mut group = FlexGroup::horizontal(100.0, 0.0);
        group.add(Element::space(10.0, 1.0), Some(1.0));
        group.add(Element::space(10.0, 1.0), Some(1.0));
        group.layout(false);
        assert_eq!(widths(&group), vec![10.0, 10.0]);
    }

    #[test]
    fn zero_factors_take_no_space() {
        let mut group = FlexGroup::horizontal(100.0, 0.0);
        group.add(Element::space(10.0, 1.0), Some(0.0));
        group.add(Element::space(10.0, 1.0), Some(0.0));
        group.layout(true);
        assert_eq!(widths(&group), vec![10.0, 10.0]);
    }

    #[test]
    fn empty_group_lays_out_as_zero_box() {
        let mut group = FlexGroup::horizontal(0.0, 0.0);
        group.layout(true);
        group.fit_content();
        assert_eq!(group.rect, Rect::default());
    }

    #[test]
    fn stretch_relays_out_nested_groups() {
        let mut inner = FlexGroup::horizontal(0.0, 4.0);
        inner.add(Element::space(5.0, 4.0), None);
        inner.add(Element::space(5.0, 4.0), Some(1.0));
        inner.fit_content();

        let mut outer = FlexGroup::horizontal(40.0, 4.0);
        outer.add(Element::flex(ElementKind::Group, inner), Some(1.0));
        outer.layout(true);

        let nested = &outer.children()[0];
        assert_eq!(nested.rect().width, 40.0);
        let inner_widths: Vec<f64> = nested.children().iter().map(|c| c.rect().width).collect();
        assert_eq!(inner_widths, vec![5.0, 35.0]);
    }
}
