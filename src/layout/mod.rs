//! Layout engine: turns a [`Score`] into a paginated tree of positioned
//! boxes.
//!
//! A pass builds owned [`Element`] values bottom-up (notes into chords,
//! chords into measures, measures into lines, lines into pages) using a
//! handful of container kinds, then freezes the result into a
//! [`LayoutTree`] arena for rendering and hit-testing. Every pass starts
//! from scratch; nothing is mutated in place between passes.

mod anchored;
mod arcs;
mod beats;
mod constants;
mod element;
mod flex;
mod geom;
mod grid;
mod line;
mod measure;
mod non_negative;
mod pagination;
mod tree;

use crate::config::LayoutConfig;
use crate::model::Score;

pub use anchored::{AnchoredGroup, VerticalAlign};
pub use element::{Element, ElementKind, ElementTag, Group};
pub use flex::FlexGroup;
pub use geom::{Axis, Point, Rect, RectPatch, EPSILON};
pub use grid::{GridConstraint, GridGroup, GridRow};
pub use measure::measure_chords;
pub use non_negative::NonNegativeGroup;
pub use tree::{LayoutTree, MeasurePosition, Node, NodeId};

/// Lay out every part of `score` on pages described by `config`.
///
/// Never fails: decorations the engine cannot draw are skipped with a
/// warning.
pub fn layout_score(score: &Score, config: &LayoutConfig) -> LayoutTree {
    log::debug!(
        "laying out {} parts on {}x{} pages",
        score.parts.len(),
        config.page_width,
        config.page_height
    );
    let root = pagination::paginate(score, config);
    let tree = LayoutTree::from_root(root);
    log::debug!("layout produced {} nodes on {} pages", tree.len(), tree.pages().len());
    tree
}
