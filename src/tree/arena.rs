use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::colour::ColourTag;
use super::domain::Domain;
use super::error::{InvariantViolation, TreeError};

/// Index into the arena `Vec<Node>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way `adjust_weight` moves a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// A single node in the tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct Node<N> {
    /// Label; `None` marks an empty node (the sentinel, or a deleted leaf)
    name: Option<N>,
    /// Leaf: supplied weight. Internal: sum of the children's weights.
    weight: u64,
    colour: ColourTag,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl<N> Node<N> {
    fn new(name: Option<N>, weight: u64, colour: ColourTag) -> Self {
        Self {
            name,
            weight,
            colour,
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn name(&self) -> Option<&N> {
        self.name.as_ref()
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn colour(&self) -> ColourTag {
        self.colour
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True for the sentinel and for deleted leaves.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// A weighted tree stored as a flat arena of nodes.
///
/// Deleted leaves stay in the arena as empty nodes, so a `NodeId` handed out
/// earlier always resolves to something.
#[derive(Debug, Clone)]
pub struct Tree<D: Domain> {
    nodes: Vec<Node<D::Name>>,
    root: NodeId,
    _domain: PhantomData<D>,
}

impl<D: Domain> Tree<D> {
    /// The empty-tree sentinel: a single nameless root of weight 0.
    pub fn empty() -> Self {
        Self {
            nodes: vec![Node::new(None, 0, ColourTag::default())],
            root: NodeId(0),
            _domain: PhantomData,
        }
    }

    pub fn builder() -> TreeBuilder<D> {
        TreeBuilder::new()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    ///
    /// Panics if `id` was not issued for this tree; `try_get` reports it instead.
    pub fn get(&self, id: NodeId) -> &Node<D::Name> {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, failing for ids from another tree.
    pub fn try_get(&self, id: NodeId) -> Result<&Node<D::Name>, TreeError> {
        self.nodes.get(id.index()).ok_or(TreeError::UnknownNode(id))
    }

    /// Total number of nodes in the arena, including deleted ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root is the empty sentinel (or has itself been deleted).
    pub fn is_empty(&self) -> bool {
        self.get(self.root).is_empty()
    }

    pub fn name(&self, id: NodeId) -> Option<&D::Name> {
        self.get(id).name()
    }

    pub fn total_weight(&self, id: NodeId) -> u64 {
        self.get(id).weight
    }

    pub fn colour(&self, id: NodeId) -> ColourTag {
        self.get(id).colour
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Iterate over children of a node, in caller-supplied order.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_, D::Name> {
        ChildIter {
            nodes: &self.nodes,
            current: self.nodes[parent.index()].first_child,
        }
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Number of edges between the node and the top of its tree.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Walk from the node's parent up to the top of its tree.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, D::Name> {
        Ancestors {
            nodes: &self.nodes,
            current: self.nodes[id.index()].parent,
        }
    }

    /// Names from the top of the tree down to `id`, joined by the domain separator.
    pub fn path_label(&self, id: NodeId) -> String {
        let mut parts: Vec<String> = std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.name(n).map(|name| name.to_string()))
            .collect();
        parts.reverse();
        parts.join(D::SEPARATOR)
    }

    /// Grow or shrink a leaf and carry the change up through every ancestor.
    ///
    /// Shrinking never takes a positive weight below 1; only `delete_leaf`
    /// removes an item. The delta actually applied after clamping is what
    /// reaches the ancestors. Returns the leaf's new weight.
    pub fn adjust_weight(
        &mut self,
        id: NodeId,
        delta: u64,
        direction: Direction,
    ) -> Result<u64, TreeError> {
        let node = self.try_get(id)?;
        if node.is_empty() {
            tracing::debug!("adjust_weight on empty node {} ignored", id);
            return Ok(0);
        }
        if !node.is_leaf() {
            return Err(TreeError::NotALeaf {
                operation: "adjust_weight",
                node: id,
                children: self.child_count(id),
            });
        }

        let old = node.weight;
        let (new, applied) = match direction {
            Direction::Increase => {
                let top = self.ancestors(id).last().unwrap_or(id);
                if self.nodes[top.index()].weight.checked_add(delta).is_none() {
                    return Err(TreeError::WeightOverflow { node: id, delta });
                }
                (old + delta, delta)
            }
            Direction::Decrease => {
                let new = old.saturating_sub(delta).max(old.min(1));
                (new, old - new)
            }
        };

        self.nodes[id.index()].weight = new;
        self.propagate(id, applied, direction);
        tracing::debug!(
            "adjust_weight {} {:?} by {} (applied {}): {} -> {}",
            id,
            direction,
            delta,
            applied,
            old,
            new
        );
        Ok(new)
    }

    /// Remove a leaf from its parent, subtracting its weight from every ancestor.
    ///
    /// The node stays in the arena as an empty node. Deleting the root only
    /// empties it. Returns the weight that was removed.
    pub fn delete_leaf(&mut self, id: NodeId) -> Result<u64, TreeError> {
        let node = self.try_get(id)?;
        if node.is_empty() {
            tracing::debug!("delete_leaf on empty node {} ignored", id);
            return Ok(0);
        }
        if !node.is_leaf() {
            return Err(TreeError::NotALeaf {
                operation: "delete_leaf",
                node: id,
                children: self.child_count(id),
            });
        }

        let weight = node.weight;
        let parent = node.parent;
        self.propagate(id, weight, Direction::Decrease);
        if let Some(parent) = parent {
            self.unlink(parent, id);
        }

        let node = &mut self.nodes[id.index()];
        node.name = None;
        node.weight = 0;
        node.parent = None;
        node.next_sibling = None;

        tracing::debug!("deleted leaf {} (weight {}) from {:?}", id, weight, parent);
        Ok(weight)
    }

    /// Validate every structural invariant reachable from the root.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(parent) = self.get(self.root).parent {
            return Err(InvariantViolation::RootHasParent {
                root: self.root,
                parent,
            });
        }

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            if node.is_empty() && (node.weight != 0 || !node.is_leaf()) {
                return Err(InvariantViolation::EmptyNotVacant { node: id });
            }
            if node.is_leaf() {
                continue;
            }

            let mut sum: u128 = 0;
            for child in self.children(id) {
                let actual = self.get(child).parent;
                if actual != Some(id) {
                    return Err(InvariantViolation::ParentMismatch {
                        child,
                        expected: id,
                        actual,
                    });
                }
                sum += self.get(child).weight as u128;
                stack.push(child);
            }
            if sum != node.weight as u128 {
                return Err(InvariantViolation::WeightMismatch {
                    node: id,
                    weight: node.weight,
                    children_sum: sum,
                });
            }
        }
        Ok(())
    }

    fn propagate(&mut self, from: NodeId, delta: u64, direction: Direction) {
        let mut current = self.nodes[from.index()].parent;
        while let Some(id) = current {
            let node = &mut self.nodes[id.index()];
            node.weight = match direction {
                Direction::Increase => node.weight + delta,
                Direction::Decrease => node.weight.saturating_sub(delta),
            };
            current = node.parent;
        }
    }

    /// Splice `child` out of `parent`'s sibling list.
    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let next = self.nodes[child.index()].next_sibling;
        if self.nodes[parent.index()].first_child == Some(child) {
            self.nodes[parent.index()].first_child = next;
            return;
        }
        let mut cursor = self.nodes[parent.index()].first_child;
        while let Some(id) = cursor {
            if self.nodes[id.index()].next_sibling == Some(child) {
                self.nodes[id.index()].next_sibling = next;
                return;
            }
            cursor = self.nodes[id.index()].next_sibling;
        }
    }
}

/// Bottom-up constructor: leaves first, then internal nodes wrapping
/// already-built children.
pub struct TreeBuilder<D: Domain> {
    nodes: Vec<Node<D::Name>>,
    rng: StdRng,
    _domain: PhantomData<D>,
}

impl<D: Domain> Default for TreeBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> TreeBuilder<D> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Builder whose colour tags are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            rng,
            _domain: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a leaf with a fresh random colour.
    pub fn leaf(&mut self, name: impl Into<D::Name>, weight: u64) -> NodeId {
        let colour = ColourTag::random(&mut self.rng);
        self.leaf_with_colour(name, weight, colour)
    }

    pub fn leaf_with_colour(
        &mut self,
        name: impl Into<D::Name>,
        weight: u64,
        colour: ColourTag,
    ) -> NodeId {
        self.push(Node::new(Some(name.into()), weight, colour))
    }

    /// Add a node owning `children`, in the given order. Its weight is their sum.
    ///
    /// With no children the result is a zero-weight leaf (an empty folder).
    pub fn internal(
        &mut self,
        name: impl Into<D::Name>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, TreeError> {
        let children: Vec<NodeId> = children.into_iter().collect();
        let new_id = NodeId(self.nodes.len() as u32);

        let mut seen = HashSet::with_capacity(children.len());
        let mut weight: u64 = 0;
        for &child in &children {
            let node = self
                .nodes
                .get(child.index())
                .ok_or(TreeError::UnknownNode(child))?;
            if let Some(parent) = node.parent {
                return Err(TreeError::AlreadyAttached { child, parent });
            }
            if !seen.insert(child) {
                return Err(TreeError::AlreadyAttached {
                    child,
                    parent: new_id,
                });
            }
            weight = weight
                .checked_add(node.weight)
                .ok_or(TreeError::WeightOverflow {
                    node: child,
                    delta: node.weight,
                })?;
        }

        let colour = ColourTag::random(&mut self.rng);
        let mut node = Node::new(Some(name.into()), weight, colour);
        node.first_child = children.first().copied();
        let id = self.push(node);

        for pair in children.windows(2) {
            self.nodes[pair[0].index()].next_sibling = Some(pair[1]);
        }
        for &child in &children {
            self.nodes[child.index()].parent = Some(id);
        }
        Ok(id)
    }

    /// Seal the arena with `root` as the top of the tree.
    pub fn finish(self, root: NodeId) -> Result<Tree<D>, TreeError> {
        let node = self
            .nodes
            .get(root.index())
            .ok_or(TreeError::UnknownNode(root))?;
        if node.parent.is_some() {
            return Err(TreeError::NotARoot(root));
        }
        Ok(Tree {
            nodes: self.nodes,
            root,
            _domain: PhantomData,
        })
    }

    fn push(&mut self, node: Node<D::Name>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a, N> {
    nodes: &'a [Node<N>],
    current: Option<NodeId>,
}

impl<'a, N> Iterator for ChildIter<'a, N> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Iterator from a node's parent up to the top of its tree.
pub struct Ancestors<'a, N> {
    nodes: &'a [Node<N>],
    current: Option<NodeId>,
}

impl<'a, N> Iterator for Ancestors<'a, N> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.nodes[id.index()].parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::example_b;
    use crate::tree::{FileSystem, Population};
    use proptest::prelude::*;

    fn names(tree: &Tree<FileSystem>, id: NodeId) -> Vec<String> {
        tree.children(id)
            .map(|c| tree.name(c).map(|n| n.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn internal_weight_is_sum_of_children() {
        let (tree, ids) = example_b();
        assert_eq!(tree.total_weight(ids.b), 40);
        assert_eq!(tree.total_weight(ids.a), 30);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn children_keep_caller_order_and_parent_links() {
        let (tree, ids) = example_b();
        assert_eq!(names(&tree, ids.b), ["f4", "A"]);
        assert_eq!(names(&tree, ids.a), ["f2", "f3", "f1"]);
        for child in tree.children(ids.b) {
            assert_eq!(tree.parent(child), Some(ids.b));
        }
        assert_eq!(tree.parent(ids.b), None);
        assert_eq!(tree.depth(ids.f1), 2);
    }

    #[test]
    fn internal_without_children_is_a_zero_weight_leaf() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let dir = builder.internal("empty", std::iter::empty()).unwrap();
        let tree = builder.finish(dir).unwrap();
        assert!(tree.get(dir).is_leaf());
        assert_eq!(tree.total_weight(dir), 0);
    }

    #[test]
    fn builder_rejects_reattaching_a_child() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let leaf = builder.leaf("f", 3);
        let first = builder.internal("one", [leaf]).unwrap();
        let err = builder.internal("two", [leaf]).unwrap_err();
        assert_eq!(
            err,
            TreeError::AlreadyAttached {
                child: leaf,
                parent: first
            }
        );

        let other = builder.leaf("g", 1);
        assert!(matches!(
            builder.internal("dup", [other, other]),
            Err(TreeError::AlreadyAttached { .. })
        ));
        assert_eq!(
            builder.internal("ghost", [NodeId(99)]),
            Err(TreeError::UnknownNode(NodeId(99)))
        );
    }

    #[test]
    fn wide_directory_builds_in_one_pass() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(2);
        let leaves: Vec<NodeId> = (0..60_000)
            .map(|i| builder.leaf(format!("f{i}").as_str(), 1))
            .collect();

        let mut with_repeat = leaves.clone();
        with_repeat.push(leaves[0]);
        assert!(matches!(
            builder.internal("dup", with_repeat),
            Err(TreeError::AlreadyAttached { child, .. }) if child == leaves[0]
        ));
        assert!(leaves.iter().all(|l| builder.nodes[l.index()].parent.is_none()));

        let dir = builder.internal("dir", leaves.iter().copied()).unwrap();
        let tree = builder.finish(dir).unwrap();
        assert_eq!(tree.child_count(dir), 60_000);
        assert_eq!(tree.total_weight(dir), 60_000);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn finish_rejects_a_child_as_root() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let leaf = builder.leaf("f", 3);
        builder.internal("dir", [leaf]).unwrap();
        assert_eq!(builder.finish(leaf).unwrap_err(), TreeError::NotARoot(leaf));
    }

    #[test]
    fn path_label_uses_domain_separator() {
        let (tree, ids) = example_b();
        assert_eq!(tree.path_label(ids.f2), "B/A/f2");

        let mut builder = TreeBuilder::<Population>::with_seed(1);
        let peru = builder.leaf("Peru", 31_000_000);
        let region = builder.internal("Latin America & Caribbean", [peru]).unwrap();
        let world = builder.internal("World", [region]).unwrap();
        let tree = builder.finish(world).unwrap();
        assert_eq!(
            tree.path_label(peru),
            "World//Latin America & Caribbean//Peru"
        );
    }

    #[test]
    fn increase_then_decrease_restores_ancestors() {
        let (mut tree, ids) = example_b();
        assert_eq!(tree.adjust_weight(ids.f3, 7, Direction::Increase), Ok(17));
        assert_eq!(tree.total_weight(ids.a), 37);
        assert_eq!(tree.total_weight(ids.b), 47);
        assert_eq!(tree.total_weight(ids.f4), 10);

        assert_eq!(tree.adjust_weight(ids.f3, 7, Direction::Decrease), Ok(10));
        assert_eq!(tree.total_weight(ids.a), 30);
        assert_eq!(tree.total_weight(ids.b), 40);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn decrease_clamps_at_one_and_propagates_applied_delta() {
        let (mut tree, ids) = example_b();
        assert_eq!(tree.adjust_weight(ids.f2, 100, Direction::Decrease), Ok(1));
        assert_eq!(tree.total_weight(ids.a), 26);
        assert_eq!(tree.total_weight(ids.b), 36);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn decrease_keeps_zero_weight_leaf_at_zero() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let zero = builder.leaf("zero", 0);
        let one = builder.leaf("one", 4);
        let dir = builder.internal("dir", [zero, one]).unwrap();
        let mut tree = builder.finish(dir).unwrap();
        assert_eq!(tree.adjust_weight(zero, 5, Direction::Decrease), Ok(0));
        assert_eq!(tree.total_weight(dir), 4);
    }

    #[test]
    fn adjust_on_internal_node_is_rejected() {
        let (mut tree, ids) = example_b();
        let err = tree.adjust_weight(ids.a, 1, Direction::Increase).unwrap_err();
        assert_eq!(
            err,
            TreeError::NotALeaf {
                operation: "adjust_weight",
                node: ids.a,
                children: 3
            }
        );
        assert_eq!(tree.total_weight(ids.b), 40);
    }

    #[test]
    fn increase_overflow_is_reported_and_nothing_changes() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let big = builder.leaf("big", u64::MAX - 1);
        let small = builder.leaf("small", 1);
        let dir = builder.internal("dir", [big, small]).unwrap();
        let mut tree = builder.finish(dir).unwrap();
        assert!(matches!(
            tree.adjust_weight(small, 1, Direction::Increase),
            Err(TreeError::WeightOverflow { .. })
        ));
        assert_eq!(tree.total_weight(small), 1);
        assert_eq!(tree.total_weight(dir), u64::MAX);
    }

    #[test]
    fn delete_leaf_unlinks_and_subtracts_from_ancestors() {
        let (mut tree, ids) = example_b();
        assert_eq!(tree.delete_leaf(ids.f3), Ok(10));
        assert_eq!(names(&tree, ids.a), ["f2", "f1"]);
        assert_eq!(tree.total_weight(ids.a), 20);
        assert_eq!(tree.total_weight(ids.b), 30);

        let gone = tree.get(ids.f3);
        assert!(gone.is_empty());
        assert_eq!(gone.weight(), 0);
        assert_eq!(gone.parent(), None);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn delete_first_and_last_children() {
        let (mut tree, ids) = example_b();
        tree.delete_leaf(ids.f2).unwrap();
        tree.delete_leaf(ids.f1).unwrap();
        assert_eq!(names(&tree, ids.a), ["f3"]);
        tree.delete_leaf(ids.f3).unwrap();
        assert!(tree.get(ids.a).is_leaf());
        assert_eq!(tree.total_weight(ids.b), 10);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn delete_root_leaf_only_empties_it() {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(1);
        let leaf = builder.leaf("only", 12);
        let mut tree = builder.finish(leaf).unwrap();
        assert_eq!(tree.delete_leaf(leaf), Ok(12));
        assert!(tree.is_empty());
        assert_eq!(tree.total_weight(leaf), 0);
    }

    #[test]
    fn delete_internal_node_is_rejected() {
        let (mut tree, ids) = example_b();
        assert!(matches!(
            tree.delete_leaf(ids.a),
            Err(TreeError::NotALeaf {
                operation: "delete_leaf",
                ..
            })
        ));
    }

    #[test]
    fn sentinel_mutations_are_no_ops() {
        let mut tree = Tree::<FileSystem>::empty();
        let root = tree.root();
        assert!(tree.is_empty());
        assert_eq!(tree.adjust_weight(root, 5, Direction::Increase), Ok(0));
        assert_eq!(tree.delete_leaf(root), Ok(0));
        assert_eq!(tree.total_weight(root), 0);
        assert_eq!(tree.path_label(root), "");
    }

    #[test]
    fn repeated_delete_is_a_no_op() {
        let (mut tree, ids) = example_b();
        tree.delete_leaf(ids.f4).unwrap();
        assert_eq!(tree.delete_leaf(ids.f4), Ok(0));
        assert_eq!(tree.total_weight(ids.b), 30);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (mut tree, _) = example_b();
        let bogus = NodeId(1_000);
        assert_eq!(
            tree.delete_leaf(bogus),
            Err(TreeError::UnknownNode(bogus))
        );
        assert_eq!(
            tree.adjust_weight(bogus, 1, Direction::Decrease),
            Err(TreeError::UnknownNode(bogus))
        );
    }

    /// Random two-level trees: a list of folders, each a list of leaf weights.
    fn arb_shape() -> impl Strategy<Value = Vec<Vec<u64>>> {
        prop::collection::vec(prop::collection::vec(0u64..10_000, 0..6), 1..6)
    }

    fn build(shape: &[Vec<u64>]) -> (Tree<FileSystem>, Vec<NodeId>) {
        let mut builder = TreeBuilder::<FileSystem>::with_seed(3);
        let mut leaves = Vec::new();
        let mut folders = Vec::new();
        for (i, weights) in shape.iter().enumerate() {
            let ids: Vec<NodeId> = weights
                .iter()
                .enumerate()
                .map(|(j, &w)| builder.leaf(format!("f{i}_{j}").as_str(), w))
                .collect();
            leaves.extend(ids.iter().copied());
            folders.push(builder.internal(format!("d{i}").as_str(), ids).unwrap());
        }
        let root = builder.internal("root", folders).unwrap();
        (builder.finish(root).unwrap(), leaves)
    }

    proptest! {
        #[test]
        fn construction_sums_every_level(shape in arb_shape()) {
            let (tree, _) = build(&shape);
            let expected: u64 = shape.iter().flatten().sum();
            prop_assert_eq!(tree.total_weight(tree.root()), expected);
            prop_assert!(tree.check_invariants().is_ok());
        }

        #[test]
        fn increase_decrease_round_trip(shape in arb_shape(), pick in any::<prop::sample::Index>(), d in 0u64..500) {
            let (mut tree, leaves) = build(&shape);
            prop_assume!(!leaves.is_empty());
            let leaf = leaves[pick.index(leaves.len())];
            prop_assume!(tree.total_weight(leaf) > 0);
            let before: Vec<u64> = std::iter::once(leaf)
                .chain(tree.ancestors(leaf))
                .map(|n| tree.total_weight(n))
                .collect();
            tree.adjust_weight(leaf, d, Direction::Increase).unwrap();
            tree.adjust_weight(leaf, d, Direction::Decrease).unwrap();
            let after: Vec<u64> = std::iter::once(leaf)
                .chain(tree.ancestors(leaf))
                .map(|n| tree.total_weight(n))
                .collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn delete_subtracts_exactly_the_leaf_weight(shape in arb_shape(), pick in any::<prop::sample::Index>()) {
            let (mut tree, leaves) = build(&shape);
            prop_assume!(!leaves.is_empty());
            let leaf = leaves[pick.index(leaves.len())];
            let weight = tree.total_weight(leaf);
            let ancestors: Vec<NodeId> = tree.ancestors(leaf).collect();
            let before: Vec<u64> = ancestors.iter().map(|&n| tree.total_weight(n)).collect();

            prop_assert_eq!(tree.delete_leaf(leaf), Ok(weight));
            for (&n, w) in ancestors.iter().zip(before) {
                prop_assert_eq!(tree.total_weight(n), w - weight);
            }
            prop_assert!(tree.get(leaf).is_empty());
            prop_assert!(tree.check_invariants().is_ok());
        }
    }
}
