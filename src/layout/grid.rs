//! Column-constrained placement with first-fit row packing.
//!
//! Used for the decorations above a staff: each element names the chord
//! columns it spans and is dropped into the first row where those columns
//! are still free. Elements pinned to the bottom row share one extra row
//! below all the packed ones.

use super::constants::GRID_ROW_SPACING;
use super::element::Element;
use super::geom::Rect;

/// Column range of a grid child. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConstraint {
    pub start_column: usize,
    pub end_column: usize,
    pub must_be_bottom_row: bool,
}

impl GridConstraint {
    pub fn span(start_column: usize, end_column: usize) -> Self {
        Self { start_column, end_column, must_be_bottom_row: false }
    }

    pub fn column(column: usize) -> Self {
        Self::span(column, column)
    }

    pub fn bottom_row(start_column: usize, end_column: usize) -> Self {
        Self { start_column, end_column, must_be_bottom_row: true }
    }
}

/// Row assigned to a child by the last [`GridGroup::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRow {
    Packed(usize),
    Bottom,
}

struct RowState {
    occupied: Vec<bool>,
    height: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GridGroup {
    pub rect: Rect,
    /// Column boundaries: column `i` spans `bounds[i]..bounds[i + 1]`.
    bounds: Vec<f64>,
    children: Vec<Element>,
    constraints: Vec<GridConstraint>,
    rows: Vec<GridRow>,
}

impl GridGroup {
    pub fn new() -> Self {
        Self { bounds: vec![0.0], ..Self::default() }
    }

    /// Replace the column table. `edges[i]` is the right edge of column `i`;
    /// the left edge of column 0 is 0. Edges must not decrease.
    pub fn set_right_edges(&mut self, edges: &[f64]) {
        self.bounds.clear();
        self.bounds.push(0.0);
        self.bounds.extend_from_slice(edges);
    }

    pub fn column_count(&self) -> usize {
        self.bounds.len().saturating_sub(1)
    }

    pub fn add(&mut self, element: Element, constraint: GridConstraint) {
        self.children.push(element);
        self.constraints.push(constraint);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn constraints(&self) -> &[GridConstraint] {
        &self.constraints
    }

    /// Row of each child, in insertion order. Empty before `layout`.
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Clamp a constraint into the column table. Out-of-range columns snap
    /// to the last column and reversed ranges are put in order.
    fn clamp(&self, constraint: GridConstraint) -> (usize, usize) {
        let columns = self.column_count();
        let (mut start, mut end) = (constraint.start_column, constraint.end_column);
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        if columns == 0 {
            if constraint.end_column > 0 || constraint.start_column > 0 {
                log::warn!("grid has no columns; placing element at x = 0 with zero width");
            }
            return (0, 0);
        }
        if end >= columns {
            log::warn!(
                "grid constraint {}..={} exceeds {} columns; clamping",
                constraint.start_column,
                constraint.end_column,
                columns
            );
            end = columns - 1;
            start = start.min(end);
        }
        (start, end)
    }

    /// `(x, width)` covered by the inclusive column range.
    fn span_of(&self, start: usize, end: usize) -> (f64, f64) {
        if self.column_count() == 0 {
            return (0.0, 0.0);
        }
        let x = self.bounds[start];
        (x, (self.bounds[end + 1] - x).max(0.0))
    }

    pub fn layout(&mut self) {
        let columns = self.column_count().max(1);
        let mut packed: Vec<RowState> = Vec::new();
        let mut rows = vec![GridRow::Bottom; self.children.len()];
        let spans: Vec<(usize, usize)> =
            self.constraints.iter().map(|c| self.clamp(*c)).collect();
        let extents: Vec<(f64, f64)> = spans.iter().map(|&(s, e)| self.span_of(s, e)).collect();

        for (i, child) in self.children.iter_mut().enumerate() {
            let (x, width) = extents[i];
            let rect = child.rect_mut();
            rect.x = x;
            rect.width = width;
            child.layout();
            if self.constraints[i].must_be_bottom_row {
                continue;
            }

            let (start, end) = spans[i];
            let row_index = match packed
                .iter()
                .position(|row| row.occupied[start..=end].iter().all(|taken| !taken))
            {
                Some(index) => index,
                None => {
                    packed.push(RowState { occupied: vec![false; columns], height: 0.0 });
                    packed.len() - 1
                }
            };
            let row = &mut packed[row_index];
            row.occupied[start..=end].iter_mut().for_each(|taken| *taken = true);
            row.height = row.height.max(child.rect().height);
            rows[i] = GridRow::Packed(row_index);
        }

        // Row offsets are only final once every row knows its tallest child.
        let mut row_tops = Vec::with_capacity(packed.len());
        let mut y = 0.0;
        for (index, row) in packed.iter().enumerate() {
            if index > 0 {
                y += GRID_ROW_SPACING;
            }
            row_tops.push(y);
            y += row.height;
        }
        let packed_height = y;
        let bottom_y = if packed.is_empty() { 0.0 } else { packed_height + GRID_ROW_SPACING };

        let mut bottom_height: Option<f64> = None;
        for (child, row) in self.children.iter_mut().zip(&rows) {
            match row {
                GridRow::Packed(index) => child.rect_mut().y = row_tops[*index],
                GridRow::Bottom => {
                    child.rect_mut().y = bottom_y;
                    let h = child.rect().height;
                    bottom_height = Some(bottom_height.map_or(h, |m: f64| m.max(h)));
                }
            }
        }

        self.rect.width = self.bounds.last().copied().unwrap_or(0.0);
        self.rect.height = match bottom_height {
            Some(h) => bottom_y + h,
            None => packed_height,
        };
        log::trace!(
            "grid laid out {} elements in {} rows (+bottom: {})",
            self.children.len(),
            packed.len(),
            bottom_height.is_some()
        );
        self.rows = rows;
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

    fn text(height: f64) -> Element {
        Element::leaf(
            ElementKind::Text { text: "x".into(), size: 10.0 },
            Rect::from_size(0.0, height),
        )
    }

    fn grid_with_edges(edges: &[f64]) -> GridGroup {
        let mut grid = GridGroup::new();
        grid.set_right_edges(edges);
        grid
    }

    #[test]
    fn width_comes_from_column_edges() {
        let mut grid = grid_with_edges(&[10.0, 25.0, 40.0, 70.0]);
        grid.add(text(8.0), GridConstraint::span(1, 2));
        grid.layout();
        let rect = grid.children()[0].rect();
        assert_eq!((rect.x, rect.width), (10.0, 30.0));
        assert_eq!(grid.rect.width, 70.0);
        assert_eq!(grid.rect.height, 8.0);
    }

    #[test]
    fn overlapping_spans_get_different_rows() {
        let mut grid = grid_with_edges(&[10.0, 20.0, 30.0, 40.0]);
        grid.add(text(8.0), GridConstraint::span(0, 1));
        grid.add(text(8.0), GridConstraint::span(1, 2));
        grid.add(text(8.0), GridConstraint::span(2, 3));
        grid.add(text(12.0), GridConstraint::column(3));
        grid.layout();
        assert_eq!(
            grid.rows(),
            &[GridRow::Packed(0), GridRow::Packed(1), GridRow::Packed(0), GridRow::Packed(1)]
        );

        for i in 0..grid.children().len() {
            for j in (i + 1)..grid.children().len() {
                let (a, b) = (grid.constraints()[i], grid.constraints()[j]);
                let overlap = a.start_column <= b.end_column && b.start_column <= a.end_column;
                if overlap {
                    assert_ne!(grid.rows()[i], grid.rows()[j], "children {i} and {j} collide");
                    assert!(!grid.children()[i].rect().overlaps(grid.children()[j].rect()));
                }
            }
        }
        // row 1 sits below row 0 (height 8) plus spacing, and is as tall as its tallest child
        assert_eq!(grid.children()[1].rect().y, 8.0 + GRID_ROW_SPACING);
        assert_eq!(grid.rect.height, 8.0 + GRID_ROW_SPACING + 12.0);
    }

    #[test]
    fn bottom_row_sits_below_packed_rows() {
        let mut grid = grid_with_edges(&[10.0, 20.0]);
        grid.add(text(8.0), GridConstraint::column(0));
        grid.add(text(6.0), GridConstraint::bottom_row(0, 0));
        grid.add(text(9.0), GridConstraint::bottom_row(0, 1));
        grid.layout();
        let bottom_y = 8.0 + GRID_ROW_SPACING;
        assert_eq!(grid.rows()[1], GridRow::Bottom);
        assert_eq!(grid.children()[1].rect().y, bottom_y);
        assert_eq!(grid.children()[2].rect().y, bottom_y);
        assert_eq!(grid.rect.height, bottom_y + 9.0);
    }

    #[test]
    fn bottom_row_alone_starts_at_top() {
        let mut grid = grid_with_edges(&[10.0]);
        grid.add(text(6.0), GridConstraint::bottom_row(0, 0));
        grid.layout();
        assert_eq!(grid.children()[0].rect().y, 0.0);
        assert_eq!(grid.rect.height, 6.0);
    }

    #[test]
    fn out_of_range_columns_are_clamped() {
        let mut grid = grid_with_edges(&[10.0, 20.0]);
        grid.add(text(5.0), GridConstraint::span(1, 7));
        grid.add(text(5.0), GridConstraint::span(9, 12));
        grid.add(text(5.0), GridConstraint::span(1, 0));
        grid.layout();
        let r0 = grid.children()[0].rect();
        assert_eq!((r0.x, r0.width), (10.0, 10.0));
        let r1 = grid.children()[1].rect();
        assert_eq!((r1.x, r1.width), (10.0, 10.0));
        let r2 = grid.children()[2].rect();
        assert_eq!((r2.x, r2.width), (0.0, 20.0));
    }

    #[test]
    fn empty_edge_table_gives_zero_width() {
        let mut grid = GridGroup::new();
        grid.add(text(5.0), GridConstraint::span(2, 3));
        grid.layout();
        assert_eq!(grid.children()[0].rect().width, 0.0);
        assert_eq!(grid.rect.width, 0.0);
    }

    #[test]
    fn empty_grid_is_zero_box() {
        let mut grid = grid_with_edges(&[10.0]);
        grid.layout();
        assert_eq!(grid.rect.height, 0.0);
    }
}
