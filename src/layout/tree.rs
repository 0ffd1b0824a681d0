//! The frozen result of a layout pass.
//!
//! Elements are moved into a flat arena in depth-first order. Parents are
//! plain indices, so walking up the tree never holds a borrow of anything
//! but the arena itself.

use serde::Serialize;

use super::element::{Element, ElementKind, ElementTag};
use super::geom::{Point, Rect};

/// Index of a node in its [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: ElementKind,
    /// Box in the parent's frame
    pub rect: Rect,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: Vec<Node>,
}

impl LayoutTree {
    pub fn from_root(root: Element) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push(root, None);
        tree
    }

    fn push(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (kind, rect, children) = element.into_parts();
        self.nodes.push(Node { kind, rect, parent, children: Vec::with_capacity(children.len()) });
        for child in children {
            let child_id = self.push(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Nearest ancestor of the given variant.
    pub fn ancestor(&self, id: NodeId, tag: ElementTag) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.node(a).kind.tag() == tag)
    }

    /// All nodes of a variant, in depth-first order.
    pub fn find_all(&self, tag: ElementTag) -> Vec<NodeId> {
        self.iter().filter(|(_, node)| node.kind.tag() == tag).map(|(id, _)| id).collect()
    }

    /// Descendants of `id` (excluding itself) of a variant, in depth-first order.
    pub fn find_within(&self, id: NodeId, tag: ElementTag) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.node(current).kind.tag() == tag {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev());
        }
        found
    }

    pub fn pages(&self) -> Vec<NodeId> {
        self.find_all(ElementTag::Page)
    }

    /// Box of `id` expressed in the frame of its nearest `ancestor`-tagged
    /// ancestor (the coordinates that ancestor's children use), or in the
    /// root's parent frame when `ancestor` is `None` or no such ancestor
    /// exists.
    pub fn to_ancestor_frame(&self, id: NodeId, ancestor: Option<ElementTag>) -> Rect {
        let mut rect = self.node(id).rect;
        for parent in self.ancestors(id) {
            let node = self.node(parent);
            if ancestor == Some(node.kind.tag()) {
                break;
            }
            rect = rect.translate(node.rect.x, node.rect.y);
        }
        rect
    }

    /// Box of `id` in absolute (root parent) coordinates.
    pub fn absolute_rect(&self, id: NodeId) -> Rect {
        self.to_ancestor_frame(id, None)
    }

    /// Deepest node whose box contains `point`, given in absolute
    /// coordinates. Where siblings overlap the later one wins, matching
    /// paint order.
    pub fn hit(&self, point: Point) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let root = self.root();
        if !self.node(root).rect.contains(point) {
            return None;
        }

        let mut current = root;
        let mut local = point;
        loop {
            let origin = self.node(current).rect.origin();
            local = local.translate(-origin.x, -origin.y);
            let next = self
                .children(current)
                .iter()
                .rev()
                .copied()
                .find(|&child| self.node(child).rect.contains(local));
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    /// Where every measure ended up, for hosts that follow playback.
    pub fn measure_positions(&self) -> Vec<MeasurePosition> {
        let mut positions = Vec::new();
        for page in self.pages() {
            let ElementKind::Page { index: page_index } = self.node(page).kind else { continue };
            for (line_index, line) in self.find_within(page, ElementTag::PageLine).into_iter().enumerate() {
                for measure in self.find_within(line, ElementTag::Measure) {
                    let ElementKind::Measure { part, index } = self.node(measure).kind else {
                        continue;
                    };
                    let rect = self.absolute_rect(measure);
                    positions.push(MeasurePosition {
                        part,
                        measure: index,
                        page: page_index,
                        line: line_index,
                        x: rect.x,
                        y: rect.y,
                        width: rect.width,
                        height: rect.height,
                    });
                }
            }
        }
        positions
    }
}

/// Absolute box of one laid-out measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurePosition {
    pub part: usize,
    pub measure: usize,
    pub page: usize,
    /// Line number within the page
    pub line: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::element::Group;
    use pretty_assertions::assert_eq;

    /// root(0,0 100x100) > page(10,20 80x60) > [chord(5,5 10x10) > note(0,2 10x4), stem(5,5 2x30)]
    fn sample() -> LayoutTree {
        let mut chord = Group::new(Rect::new(5.0, 5.0, 10.0, 10.0));
        chord.add(Element::leaf(
            ElementKind::Note { string: 1, text: "3".into() },
            Rect::new(0.0, 2.0, 10.0, 4.0),
        ));
        let mut page = Group::new(Rect::new(10.0, 20.0, 80.0, 60.0));
        page.add(Element::group(ElementKind::Chord { measure: 0, chord: 0 }, chord));
        page.add(Element::leaf(ElementKind::Stem, Rect::new(5.0, 5.0, 2.0, 30.0)));
        let mut root = Group::new(Rect::from_size(100.0, 100.0));
        root.add(Element::group(ElementKind::Page { index: 0 }, page));
        LayoutTree::from_root(Element::group(ElementKind::Score, root))
    }

    #[test]
    fn arena_keeps_depth_first_order_and_parents() {
        let tree = sample();
        let tags: Vec<ElementTag> = tree.iter().map(|(_, n)| n.kind.tag()).collect();
        assert_eq!(
            tags,
            vec![ElementTag::Score, ElementTag::Page, ElementTag::Chord, ElementTag::Note, ElementTag::Stem]
        );
        let note = tree.find_all(ElementTag::Note)[0];
        let chain: Vec<ElementTag> = tree.ancestors(note).map(|a| tree.node(a).kind.tag()).collect();
        assert_eq!(chain, vec![ElementTag::Chord, ElementTag::Page, ElementTag::Score]);
        assert_eq!(tree.pages(), vec![NodeId(1)]);
    }

    #[test]
    fn ancestor_frames_sum_offsets() {
        let tree = sample();
        let note = tree.find_all(ElementTag::Note)[0];
        assert_eq!(tree.absolute_rect(note), Rect::new(15.0, 27.0, 10.0, 4.0));
        assert_eq!(tree.to_ancestor_frame(note, Some(ElementTag::Page)), Rect::new(5.0, 7.0, 10.0, 4.0));
        assert_eq!(tree.to_ancestor_frame(note, Some(ElementTag::Chord)), Rect::new(0.0, 2.0, 10.0, 4.0));
        // no such ancestor: absolute
        assert_eq!(tree.to_ancestor_frame(note, Some(ElementTag::Beam)), tree.absolute_rect(note));
    }

    #[test]
    fn hit_returns_the_deepest_topmost_node() {
        let tree = sample();
        let kind_at = |x, y| tree.hit(Point::new(x, y)).map(|id| tree.node(id).kind.tag());
        assert_eq!(kind_at(16.0, 28.0), Some(ElementTag::Stem));
        assert_eq!(kind_at(20.0, 28.0), Some(ElementTag::Note));
        assert_eq!(kind_at(20.0, 26.0), Some(ElementTag::Chord));
        assert_eq!(kind_at(80.0, 70.0), Some(ElementTag::Page));
        assert_eq!(kind_at(95.0, 95.0), Some(ElementTag::Score));
        assert_eq!(kind_at(150.0, 10.0), None);
    }
}
