use super::slice::slices;
use super::Rect;
use crate::tree::{Domain, NodeId, Tree};

/// The leaf under a point, plus its root-to-leaf path label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub node: NodeId,
    pub path: String,
}

/// Find the leaf whose treemap rectangle contains `(x, y)`.
///
/// Re-derives the same split `compute_layout` would, but only along the one
/// branch that contains the point. Returns `None` for weightless trees, for
/// roots that are not in `tree` and for points outside `rect`.
pub fn locate<D: Domain>(tree: &Tree<D>, root: NodeId, rect: Rect, x: i32, y: i32) -> Option<Hit> {
    if tree.try_get(root).ok()?.weight() == 0
        || !rect.fits_coordinates()
        || !rect.contains(x, y)
    {
        return None;
    }

    let mut path = tree.name(root)?.to_string();
    let mut node = root;
    let mut area = rect;
    while !tree.get(node).is_leaf() {
        let (child, child_rect) = slices(tree, node, area).find(|(_, r)| r.contains(x, y))?;
        if let Some(name) = tree.name(child) {
            path.push_str(D::SEPARATOR);
            path.push_str(&name.to_string());
        }
        node = child;
        area = child_rect;
    }

    tracing::trace!("locate ({}, {}) -> {} '{}'", x, y, node, path);
    Some(Hit { node, path })
}
