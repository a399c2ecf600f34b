use std::collections::HashMap;

use super::Rect;
use crate::tree::arena::ChildIter;
use crate::tree::{ColourTag, Domain, NodeId, Tree};

/// A positioned leaf in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub rect: Rect,
    pub colour: ColourTag,
    /// Levels below the node the layout started from
    pub depth: u16,
}

/// The full layout result (rects + fast lookup).
#[derive(Debug, Default, Clone)]
pub struct Layout {
    /// One entry per positive-weight leaf, depth-first in child order
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn rect_of(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }

    /// Rectangles and colours only, in drawing order.
    pub fn draw_list(&self) -> Vec<(Rect, ColourTag)> {
        self.rects.iter().map(|r| (r.rect, r.colour)).collect()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// The sub-rectangles a node hands to its children.
///
/// Children are laid edge-to-edge along the longer side of `rect` (the
/// height when the sides are equal). Each positive-weight child gets
/// `floor(side * weight / total)` units, except the last one, which takes
/// whatever is left so the slices cover `rect` exactly. Zero-weight children
/// are skipped and take no space. Iteration stops at the first slice whose
/// origin falls outside `i32`.
pub struct Slices<'a, D: Domain> {
    tree: &'a Tree<D>,
    children: ChildIter<'a, D::Name>,
    last: Option<NodeId>,
    total: u64,
    rect: Rect,
    horizontal: bool,
    extent: u32,
    used: u32,
}

/// Split `rect` among the children of `node`. Yields nothing for leaves and
/// weightless nodes.
pub fn slices<'a, D: Domain>(tree: &'a Tree<D>, node: NodeId, rect: Rect) -> Slices<'a, D> {
    let total = tree.total_weight(node);
    let mut last = None;
    let mut sum: u128 = 0;
    for child in tree.children(node) {
        let weight = tree.total_weight(child);
        sum += weight as u128;
        if weight > 0 {
            last = Some(child);
        }
    }
    debug_assert!(
        tree.get(node).is_leaf() || sum == total as u128,
        "node {} weighs {} but its children sum to {}",
        node,
        total,
        sum
    );

    let horizontal = rect.w > rect.h;
    Slices {
        tree,
        children: tree.children(node),
        last: if total == 0 { None } else { last },
        total,
        rect,
        horizontal,
        extent: if horizontal { rect.w } else { rect.h },
        used: 0,
    }
}

impl<'a, D: Domain> Iterator for Slices<'a, D> {
    type Item = (NodeId, Rect);

    fn next(&mut self) -> Option<(NodeId, Rect)> {
        self.last?;
        loop {
            let child = self.children.next()?;
            let weight = self.tree.total_weight(child);
            if weight == 0 {
                continue;
            }

            let span = if Some(child) == self.last {
                self.extent - self.used
            } else {
                (self.extent as u128 * weight as u128 / self.total as u128) as u32
            };
            let start = if self.horizontal { self.rect.x } else { self.rect.y };
            let origin = i32::try_from(start as i64 + self.used as i64).ok()?;
            let rect = if self.horizontal {
                Rect::new(origin, self.rect.y, span, self.rect.h)
            } else {
                Rect::new(self.rect.x, origin, self.rect.w, span)
            };
            self.used += span;
            return Some((child, rect));
        }
    }
}

/// Compute the treemap for the subtree at `root` inside `rect`.
pub fn compute_layout<D: Domain>(tree: &Tree<D>, root: NodeId, rect: Rect) -> Layout {
    let mut layout = Layout::default();
    if rect.is_degenerate() {
        tracing::debug!("Degenerate layout rect {:?}, nothing to place", rect);
        return layout;
    }
    if !rect.fits_coordinates() {
        tracing::warn!("Layout rect {:?} runs past i32 coordinates, nothing placed", rect);
        return layout;
    }
    if let Err(e) = tree.try_get(root) {
        tracing::warn!("Layout skipped: {}", e);
        return layout;
    }
    layout_node(tree, root, rect, 0, &mut layout);
    tracing::debug!(
        "Layout of node {} in {}x{}: {} rectangles",
        root,
        rect.w,
        rect.h,
        layout.rects.len()
    );
    layout
}

/// `(rect, colour)` for every positive-weight leaf under `node`.
pub fn layout<D: Domain>(tree: &Tree<D>, node: NodeId, rect: Rect) -> Vec<(Rect, ColourTag)> {
    compute_layout(tree, node, rect).draw_list()
}

fn layout_node<D: Domain>(
    tree: &Tree<D>,
    node: NodeId,
    rect: Rect,
    depth: u16,
    layout: &mut Layout,
) {
    let current = tree.get(node);
    if current.weight() == 0 {
        return;
    }

    if current.is_leaf() {
        layout.node_to_rect.insert(node, layout.rects.len());
        layout.rects.push(LayoutRect {
            node,
            rect,
            colour: current.colour(),
            depth,
        });
        return;
    }

    for (child, child_rect) in slices(tree, node, rect) {
        layout_node(tree, child, child_rect, depth + 1, layout);
    }
}
