//! Link-level traversers.
//!
//! Traversers hold only the cursor state and borrow the hierarchy on each
//! call, so the public iterators can pair them with a forest reference.

use crate::hierarchy::Hierarchy;
use crate::id::NodeId;

/// Depth-first traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DftEvent {
    /// The node is entered.
    Open(NodeId),
    /// The node is left.
    Close(NodeId),
}

/// Forward depth-first traverser over a subtree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DepthFirstTraverser {
    /// Next event to emit, and the last event of the whole traversal.
    next: Option<(DftEvent, DftEvent)>,
}

impl DepthFirstTraverser {
    /// Creates a traverser from a toplevel node.
    ///
    /// The toplevel does not need to be the root of a tree.
    #[must_use]
    pub(crate) fn with_toplevel(id: NodeId) -> Self {
        Self {
            next: Some((DftEvent::Open(id), DftEvent::Close(id))),
        }
    }

    /// Traverses the tree forward and returns the next node event.
    pub(crate) fn next(&mut self, hier: &Hierarchy) -> Option<DftEvent> {
        let (next, last) = self.next?;
        self.next = Self::successor(hier, next, last).map(|succ| (succ, last));
        Some(next)
    }

    /// Returns the event following `current`, or `None` if `current` is `last`.
    fn successor(hier: &Hierarchy, current: DftEvent, last: DftEvent) -> Option<DftEvent> {
        if current == last {
            return None;
        }
        match current {
            DftEvent::Open(id) => {
                // Dive into the first child if available, or leave the node.
                let neighbors = hier
                    .neighbors(id)
                    .expect("[consistency] the node being traversed must be alive");
                Some(match neighbors.first_child() {
                    Some(first_child) => DftEvent::Open(first_child),
                    None => DftEvent::Close(id),
                })
            }
            DftEvent::Close(id) => {
                // Go to the next sibling if available, or leave the parent.
                let neighbors = hier
                    .neighbors(id)
                    .expect("[consistency] the node being traversed must be alive");
                Some(match neighbors.next_sibling() {
                    Some(next_sibling) => DftEvent::Open(next_sibling),
                    None => {
                        // Closing the toplevel has been handled above, so
                        // this node is strictly inside the subtree.
                        let parent = neighbors.parent().expect(
                            "[consistency] parent node must exist since the node is not the toplevel",
                        );
                        DftEvent::Close(parent)
                    }
                })
            }
        }
    }
}

/// Ancestors traverser.
///
/// Note that this returns the starting node first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AncestorsTraverser {
    /// Next node to emit.
    next: Option<NodeId>,
}

impl AncestorsTraverser {
    /// Creates a traverser starting from the node itself.
    #[must_use]
    pub(crate) fn with_start(id: NodeId) -> Self {
        Self { next: Some(id) }
    }

    /// Returns the next node and moves up to its parent.
    pub(crate) fn next(&mut self, hier: &Hierarchy) -> Option<NodeId> {
        let next = self.next?;
        self.next = hier
            .neighbors(next)
            .expect("[consistency] the node being traversed must be alive")
            .parent();

        Some(next)
    }
}

/// Forward siblings traverser.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SiblingsTraverser {
    /// Next node to emit.
    next: Option<NodeId>,
}

impl SiblingsTraverser {
    /// Creates a traverser over the children of the parent.
    #[must_use]
    pub(crate) fn with_parent(parent: NodeId, hier: &Hierarchy) -> Self {
        let next = hier
            .neighbors(parent)
            .expect("[consistency] the node being traversed must be alive")
            .first_child();

        Self { next }
    }

    /// Returns the next sibling.
    pub(crate) fn next(&mut self, hier: &Hierarchy) -> Option<NodeId> {
        let next = self.next?;
        self.next = hier
            .neighbors(next)
            .expect("[consistency] the node being traversed must be alive")
            .next_sibling();

        Some(next)
    }
}
