//! Parent, sibling, and child links of the nodes in a forest.

pub(crate) mod traverse;

use core::fmt;

use crate::id::NodeId;

/// Link storage for all nodes in a forest, indexed by node ID.
///
/// This type does no argument validation. Callers check that IDs are alive
/// and that the operation keeps the forest acyclic before calling in.
#[derive(Debug, Clone, Default)]
pub(crate) struct Hierarchy {
    /// Neighbors storage.
    neighbors: Vec<Neighbors>,
}

impl Hierarchy {
    /// Creates a new detached node.
    ///
    /// # Panics
    ///
    /// Panics if the node ID overflows.
    pub(crate) fn create_root(&mut self) -> NodeId {
        let new_id = NodeId::from_index(self.neighbors.len())
            .expect("[precondition] node ID overflowed presumably due to too many node creations");
        self.neighbors.push(Neighbors::default());

        new_id
    }

    /// Returns a reference to the neighbors of the node.
    ///
    /// Returns `None` if the node ID does not belong to this hierarchy.
    #[must_use]
    pub(crate) fn neighbors(&self, id: NodeId) -> Option<&Neighbors> {
        self.neighbors.get(id.index())
    }

    /// Returns a mutable reference to the neighbors of the node.
    #[must_use]
    fn neighbors_mut(&mut self, id: NodeId) -> Option<&mut Neighbors> {
        self.neighbors.get_mut(id.index())
    }

    /// Returns true if the ID is valid inside this hierarchy.
    #[must_use]
    pub(crate) fn is_valid(&self, id: NodeId) -> bool {
        id.index() < self.neighbors.len()
    }

    /// Returns true if `ancestor` is `node` itself or one of its ancestors.
    #[must_use]
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut ancestors = traverse::AncestorsTraverser::with_start(node);
        while let Some(current) = ancestors.next(self) {
            if current == ancestor {
                return true;
            }
        }
        false
    }

    /// Connects the given adjacent neighbors and updates fields properly.
    ///
    /// ```text
    ///    parent
    ///     /  \
    ///    /    \
    /// prev -> next
    /// ```
    ///
    /// The fields below will be updated:
    ///
    /// * `prev->parent` and `prev->next_sibling`,
    /// * `next->parent` and `next->previous_sibling`,
    /// * `parent->first_child` if `prev` is `None`, and
    /// * `parent->last_child` if `next` is `None`.
    ///
    /// Passing `None` for both siblings empties the child list of `parent`.
    ///
    /// # Panics
    ///
    /// * Panics if `parent` is `None` while both siblings are `Some`.
    /// * Panics if `prev` and `next` are identical.
    fn connect_triangle(
        &mut self,
        parent: Option<NodeId>,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    ) {
        if parent.is_none() && prev.is_some() && next.is_some() {
            panic!("[precondition] nodes cannot have siblings without having a parent");
        }
        if prev.zip(next).map_or(false, |(prev, next)| prev == next) {
            panic!("[precondition] a node cannot be adjacent sibling of itself");
        }

        if let Some(prev) = prev {
            let prev_nbs = self
                .neighbors_mut(prev)
                .expect("[precondition] the given `prev` node must be alive");
            prev_nbs.parent = parent;
            prev_nbs.next_sibling = next;
        }

        if let Some(next) = next {
            let next_nbs = self
                .neighbors_mut(next)
                .expect("[precondition] the given `next` node must be alive");
            next_nbs.parent = parent;
            next_nbs.previous_sibling = prev;
        }

        if let Some(parent) = parent {
            let parent_nbs = self
                .neighbors_mut(parent)
                .expect("[precondition] the given `parent` node must be alive");
            if prev.is_none() {
                parent_nbs.first_child = next;
            }
            if next.is_none() {
                parent_nbs.last_child = prev;
            }
        }
    }

    /// Detaches the subtree rooted at `node` from its parent and siblings.
    ///
    /// The structure under `node` is kept. A node without parent is left as is.
    ///
    /// ```text
    /// Before `detach(1)`:
    ///
    /// root
    /// |-- 0
    /// |-- 1
    /// |   `-- 1-0
    /// `-- 2
    ///
    /// After `detach(1)`:
    ///
    /// root
    /// |-- 0
    /// `-- 2
    ///
    /// 1
    /// `-- 1-0
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the node is not alive.
    pub(crate) fn detach(&mut self, node: NodeId) {
        let nbs = *self
            .neighbors(node)
            .expect("[precondition] the node must be alive");
        let parent = match nbs.parent {
            Some(v) => v,
            None => return,
        };

        // Connect the siblings before and after the node.
        self.connect_triangle(Some(parent), nbs.previous_sibling, nbs.next_sibling);

        let nbs = self
            .neighbors_mut(node)
            .expect("[precondition] the node must be alive");
        nbs.parent = None;
        nbs.previous_sibling = None;
        nbs.next_sibling = None;
    }

    /// Detaches `node` and appends it to `parent` as the last child.
    ///
    /// # Panics
    ///
    /// Panics if any of the given nodes are not alive, or if they are identical.
    pub(crate) fn append_child(&mut self, node: NodeId, parent: NodeId) {
        assert_ne!(node, parent, "[precondition] a node cannot be its own child");
        self.detach(node);

        let old_last_child = self
            .neighbors(parent)
            .expect("[precondition] the parent must be alive")
            .last_child;
        self.connect_triangle(Some(parent), old_last_child, Some(node));
        self.connect_triangle(Some(parent), Some(node), None);
    }

    /// Detaches `node` and inserts it as the previous sibling of `reference`.
    ///
    /// # Panics
    ///
    /// Panics if any of the given nodes are not alive, if `node` and
    /// `reference` are identical, or if `reference` has no parent.
    pub(crate) fn insert_before(&mut self, node: NodeId, reference: NodeId) {
        assert_ne!(
            node, reference,
            "[precondition] a node cannot be inserted before itself"
        );
        // Detach first: `node` may currently be the previous sibling of `reference`.
        self.detach(node);

        let reference_nbs = *self
            .neighbors(reference)
            .expect("[precondition] the reference node must be alive");
        let parent = reference_nbs
            .parent
            .expect("[precondition] the reference node must have a parent");
        self.connect_triangle(Some(parent), reference_nbs.previous_sibling, Some(node));
        self.connect_triangle(Some(parent), Some(node), Some(reference));
    }

    /// Detaches `new_child` and puts it at the place of `old_child`.
    ///
    /// `old_child` becomes a detached root. Its own children are kept.
    ///
    /// # Panics
    ///
    /// Panics if any of the given nodes are not alive, if they are identical,
    /// or if `old_child` has no parent.
    pub(crate) fn replace(&mut self, new_child: NodeId, old_child: NodeId) {
        assert_ne!(
            new_child, old_child,
            "[precondition] a node cannot replace itself"
        );
        // Detach first: `new_child` may currently be adjacent to `old_child`.
        self.detach(new_child);

        let old_nbs = *self
            .neighbors(old_child)
            .expect("[precondition] the old child must be alive");
        let parent = old_nbs
            .parent
            .expect("[precondition] the old child must have a parent");
        self.connect_triangle(Some(parent), old_nbs.previous_sibling, Some(new_child));
        self.connect_triangle(Some(parent), Some(new_child), old_nbs.next_sibling);

        let old_nbs = self
            .neighbors_mut(old_child)
            .expect("[precondition] the old child must be alive");
        old_nbs.parent = None;
        old_nbs.previous_sibling = None;
        old_nbs.next_sibling = None;
    }
}

/// Links of a single node.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Neighbors {
    /// Parent.
    parent: Option<NodeId>,
    /// Previous sibling.
    previous_sibling: Option<NodeId>,
    /// Next sibling.
    next_sibling: Option<NodeId>,
    /// First child.
    first_child: Option<NodeId>,
    /// Last child.
    last_child: Option<NodeId>,
}

impl Neighbors {
    /// Returns the node ID of the parent.
    #[inline]
    #[must_use]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the node ID of the previous sibling.
    #[inline]
    #[must_use]
    pub(crate) fn previous_sibling(&self) -> Option<NodeId> {
        self.previous_sibling
    }

    /// Returns the node ID of the next sibling.
    #[inline]
    #[must_use]
    pub(crate) fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Returns the node ID of the first child.
    #[inline]
    #[must_use]
    pub(crate) fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Returns the node ID of the last child.
    #[inline]
    #[must_use]
    pub(crate) fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }
}

// For compact printing.
impl fmt::Debug for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// A wrapper to print optional node ID in compact form.
        #[derive(Clone, Copy)]
        struct OptNodeId<'a>(&'a Option<NodeId>);
        impl fmt::Debug for OptNodeId<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(id) => id.fmt(f),
                    None => f.write_str("None"),
                }
            }
        }

        f.debug_struct("Neighbors")
            .field("parent", &OptNodeId(&self.parent))
            .field("previous_sibling", &OptNodeId(&self.previous_sibling))
            .field("next_sibling", &OptNodeId(&self.next_sibling))
            .field("first_child", &OptNodeId(&self.first_child))
            .field("last_child", &OptNodeId(&self.last_child))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts that the child list of `parent` is consistent in both directions.
    fn assert_chain(hier: &Hierarchy, parent: NodeId, expected: &[NodeId]) {
        let parent_nbs = hier.neighbors(parent).expect("parent must be alive");
        assert_eq!(parent_nbs.first_child(), expected.first().copied());
        assert_eq!(parent_nbs.last_child(), expected.last().copied());
        for (i, &child) in expected.iter().enumerate() {
            let nbs = hier.neighbors(child).expect("child must be alive");
            assert_eq!(nbs.parent(), Some(parent));
            let prev = i.checked_sub(1).map(|i| expected[i]);
            assert_eq!(nbs.previous_sibling(), prev);
            assert_eq!(nbs.next_sibling(), expected.get(i + 1).copied());
        }
    }

    fn assert_detached(hier: &Hierarchy, node: NodeId) {
        let nbs = hier.neighbors(node).expect("node must be alive");
        assert_eq!(nbs.parent(), None);
        assert_eq!(nbs.previous_sibling(), None);
        assert_eq!(nbs.next_sibling(), None);
    }

    #[test]
    fn append_and_detach() {
        let mut hier = Hierarchy::default();
        let root = hier.create_root();
        let a = hier.create_root();
        let b = hier.create_root();
        let c = hier.create_root();
        hier.append_child(a, root);
        hier.append_child(b, root);
        hier.append_child(c, root);
        assert_chain(&hier, root, &[a, b, c]);

        hier.detach(b);
        assert_chain(&hier, root, &[a, c]);
        assert_detached(&hier, b);

        hier.detach(a);
        hier.detach(c);
        assert_chain(&hier, root, &[]);
    }

    #[test]
    fn append_moves_existing_child_to_last() {
        let mut hier = Hierarchy::default();
        let root = hier.create_root();
        let a = hier.create_root();
        let b = hier.create_root();
        hier.append_child(a, root);
        hier.append_child(b, root);

        hier.append_child(a, root);
        assert_chain(&hier, root, &[b, a]);
    }

    #[test]
    fn insert_before_previous_sibling() {
        let mut hier = Hierarchy::default();
        let root = hier.create_root();
        let a = hier.create_root();
        let b = hier.create_root();
        let c = hier.create_root();
        hier.append_child(a, root);
        hier.append_child(b, root);
        hier.append_child(c, root);

        hier.insert_before(c, a);
        assert_chain(&hier, root, &[c, a, b]);
        // `a` is already right before `b`.
        hier.insert_before(a, b);
        assert_chain(&hier, root, &[c, a, b]);
    }

    #[test]
    fn replace_with_adjacent_sibling() {
        let mut hier = Hierarchy::default();
        let root = hier.create_root();
        let a = hier.create_root();
        let b = hier.create_root();
        let c = hier.create_root();
        hier.append_child(a, root);
        hier.append_child(b, root);
        hier.append_child(c, root);

        hier.replace(c, b);
        assert_chain(&hier, root, &[a, c]);
        assert_detached(&hier, b);

        hier.replace(b, a);
        assert_chain(&hier, root, &[b, c]);
        assert_detached(&hier, a);
    }

    #[test]
    fn ancestor_or_self() {
        let mut hier = Hierarchy::default();
        let root = hier.create_root();
        let child = hier.create_root();
        let grandchild = hier.create_root();
        hier.append_child(child, root);
        hier.append_child(grandchild, child);

        assert!(hier.is_ancestor_or_self(root, grandchild));
        assert!(hier.is_ancestor_or_self(grandchild, grandchild));
        assert!(!hier.is_ancestor_or_self(grandchild, root));
    }
}
