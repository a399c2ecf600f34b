use thiserror::Error;

use super::arena::NodeId;

/// Precondition failures raised by tree construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not belong to this tree's arena.
    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    /// The operation is only defined for nodes without children.
    #[error("{operation} requires a leaf, but node {node} has {children} children")]
    NotALeaf {
        operation: &'static str,
        node: NodeId,
        children: usize,
    },

    /// A node can only be attached under one parent.
    #[error("node {child} is already attached under node {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    /// The node chosen as a tree root is itself somebody's child.
    #[error("node {0} has a parent and cannot be used as a root")]
    NotARoot(NodeId),

    /// Increasing the weight would overflow the root's total.
    #[error("increasing node {node} by {delta} overflows the tree's total weight")]
    WeightOverflow { node: NodeId, delta: u64 },
}

/// A structural invariant found broken by `Tree::check_invariants`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("node {node} weighs {weight} but its children sum to {children_sum}")]
    WeightMismatch {
        node: NodeId,
        weight: u64,
        children_sum: u128,
    },

    #[error("node {child} is listed under {expected} but points at {actual:?}")]
    ParentMismatch {
        child: NodeId,
        expected: NodeId,
        actual: Option<NodeId>,
    },

    #[error("empty node {node} still has weight or children")]
    EmptyNotVacant { node: NodeId },

    #[error("root {root} has parent {parent}")]
    RootHasParent { root: NodeId, parent: NodeId },
}
