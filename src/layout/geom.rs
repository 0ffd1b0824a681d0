//! Axis-aligned rectangles and points.
//!
//! A [`Rect`] is always expressed in its parent's coordinate frame. All
//! operations are pure and return new values.

use serde::Serialize;

/// Tolerance for floating point comparisons of layout coordinates.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Which coordinate a one-dimensional container packs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Field overrides for [`Rect::update`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Rect {
    /// Negative sizes are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width: width.max(0.0), height: height.max(0.0) }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Identity element of [`Rect::encompass`].
    pub fn empty() -> Self {
        Self { x: f64::INFINITY, y: f64::INFINITY, width: 0.0, height: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        !self.x.is_finite() || !self.y.is_finite()
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Grow (or, for negative `amount`, shrink) by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn encompass(&self, other: &Rect) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Interiors intersect; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }

    pub fn update(&self, patch: RectPatch) -> Self {
        Self::new(
            patch.x.unwrap_or(self.x),
            patch.y.unwrap_or(self.y),
            patch.width.unwrap_or(self.width),
            patch.height.unwrap_or(self.height),
        )
    }

    pub(crate) fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub(crate) fn size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub(crate) fn end(&self, axis: Axis) -> f64 {
        self.start(axis) + self.size(axis)
    }

    pub(crate) fn set_start(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    pub(crate) fn set_size(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value.max(0.0),
            Axis::Vertical => self.height = value.max(0.0),
        }
    }

    /// Approximate equality within [`EPSILON`].
    pub fn approx_eq(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.width - other.width).abs() < EPSILON
            && (self.height - other.height).abs() < EPSILON
    }
}

impl Axis {
    pub(crate) fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_is_identity_for_encompass() {
        let samples = [
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(-3.5, 2.0, 10.0, 1.0),
            Rect::new(100.0, -40.0, 0.5, 7.25),
        ];
        for b in samples {
            assert_eq!(Rect::empty().encompass(&b), b);
            assert_eq!(b.encompass(&Rect::empty()), b);
        }
    }

    #[test]
    fn translate_round_trips() {
        let b = Rect::new(1.25, -2.0, 3.0, 4.0);
        assert!(b.translate(7.5, -3.25).translate(-7.5, 3.25).approx_eq(&b));
    }

    #[test]
    fn encompass_covers_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 20.0, 5.0);
        assert_eq!(a.encompass(&b), Rect::new(0.0, -5.0, 25.0, 15.0));
    }

    #[test]
    fn expand_and_shrink() {
        let b = Rect::new(10.0, 10.0, 10.0, 4.0);
        assert_eq!(b.expand(2.0), Rect::new(8.0, 8.0, 14.0, 8.0));
        // shrinking past zero clamps the size instead of going negative
        let shrunk = b.expand(-3.0);
        assert_eq!(shrunk.width, 4.0);
        assert_eq!(shrunk.height, 0.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translate(-0.5, 0.0)));
        assert!(a.contains(Point::new(0.0, 0.0)));
        assert!(!a.contains(Point::new(10.0, 5.0)));
        assert!(a.contains_rect(&Rect::new(2.0, 2.0, 8.0, 8.0)));
    }

    #[test]
    fn update_replaces_only_named_fields() {
        let b = Rect::new(1.0, 2.0, 3.0, 4.0);
        let u = b.update(RectPatch { width: Some(9.0), ..RectPatch::default() });
        assert_eq!(u, Rect::new(1.0, 2.0, 9.0, 4.0));
    }
}
