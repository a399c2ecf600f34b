use crate::tree::NodeId;

/// Selection state: at most one leaf is selected at a time.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    current: Option<NodeId>,
}

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(NodeId),
    Deselected,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Clicking the selected leaf again deselects it; any other leaf takes over.
    pub fn toggle(&mut self, node: NodeId) -> SelectionChange {
        if self.current == Some(node) {
            self.current = None;
            SelectionChange::Deselected
        } else {
            self.current = Some(node);
            SelectionChange::Selected(node)
        }
    }

    /// Drop the selection if it points at `node`.
    /// Returns true if it did.
    pub fn forget(&mut self, node: NodeId) -> bool {
        if self.current == Some(node) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// `ceil(weight * percent / 100)`: one arrow press moves a leaf by this much.
pub fn resize_step(weight: u64, percent: u64) -> u64 {
    let scaled = weight as u128 * percent as u128;
    scaled.div_ceil(100).min(u64::MAX as u128) as u64
}
