//! Tree traversal.

use core::fmt;
use core::iter;

use crate::forest::{Forest, Node};
use crate::hierarchy::traverse::{
    AncestorsTraverser, DepthFirstTraverser, DftEvent, SiblingsTraverser,
};
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::step::NodeStep;

/// Returns the proxy for a node reached by a traverser.
fn proxy<K: NodeKind>(forest: &Forest<K>, id: NodeId) -> Node<'_, K> {
    forest
        .node(id)
        .expect("[consistency] the node must be the part of the tree")
}

/// Depth-first enter/leave steps of a subtree.
///
/// Every node is entered before its children and left after them, so the
/// steps are strictly nested.
pub struct Nodes<'a, K: NodeKind> {
    /// Forest.
    forest: &'a Forest<K>,
    /// Traverser.
    traverser: DepthFirstTraverser,
}

impl<'a, K: NodeKind> Nodes<'a, K> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_toplevel(node: &Node<'a, K>) -> Self {
        Self {
            forest: node.forest(),
            traverser: DepthFirstTraverser::with_toplevel(node.id()),
        }
    }
}

impl<'a, K: NodeKind> Iterator for Nodes<'a, K> {
    type Item = NodeStep<Node<'a, K>>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.traverser.next(&self.forest.hierarchy)? {
            DftEvent::Open(id) => NodeStep::enter(proxy(self.forest, id)),
            DftEvent::Close(id) => NodeStep::leave(proxy(self.forest, id)),
        };
        Some(step)
    }
}

impl<K: NodeKind> iter::FusedIterator for Nodes<'_, K> {}

impl<K: NodeKind> Clone for Nodes<'_, K> {
    fn clone(&self) -> Self {
        Self {
            forest: self.forest,
            traverser: self.traverser,
        }
    }
}

impl<K: NodeKind> fmt::Debug for Nodes<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nodes")
            .field("traverser", &self.traverser)
            .finish_non_exhaustive()
    }
}

/// A node and its ancestors, nearest first.
pub struct Parents<'a, K: NodeKind> {
    /// Forest.
    forest: &'a Forest<K>,
    /// Traverser.
    traverser: AncestorsTraverser,
}

impl<'a, K: NodeKind> Parents<'a, K> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_start(node: &Node<'a, K>) -> Self {
        Self {
            forest: node.forest(),
            traverser: AncestorsTraverser::with_start(node.id()),
        }
    }
}

impl<'a, K: NodeKind> Iterator for Parents<'a, K> {
    type Item = Node<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.traverser.next(&self.forest.hierarchy)?;
        Some(proxy(self.forest, id))
    }
}

impl<K: NodeKind> iter::FusedIterator for Parents<'_, K> {}

impl<K: NodeKind> Clone for Parents<'_, K> {
    fn clone(&self) -> Self {
        Self {
            forest: self.forest,
            traverser: self.traverser,
        }
    }
}

impl<K: NodeKind> fmt::Debug for Parents<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parents")
            .field("traverser", &self.traverser)
            .finish_non_exhaustive()
    }
}

/// Direct children of a node in sibling order.
pub struct Children<'a, K: NodeKind> {
    /// Forest.
    forest: &'a Forest<K>,
    /// Traverser.
    traverser: SiblingsTraverser,
}

impl<'a, K: NodeKind> Children<'a, K> {
    /// Creates a new iterator.
    #[inline]
    #[must_use]
    pub(super) fn with_parent(parent: &Node<'a, K>) -> Self {
        Self {
            forest: parent.forest(),
            traverser: SiblingsTraverser::with_parent(parent.id(), parent.hierarchy()),
        }
    }
}

impl<'a, K: NodeKind> Iterator for Children<'a, K> {
    type Item = Node<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.traverser.next(&self.forest.hierarchy)?;
        Some(proxy(self.forest, id))
    }
}

impl<K: NodeKind> iter::FusedIterator for Children<'_, K> {}

impl<K: NodeKind> Clone for Children<'_, K> {
    fn clone(&self) -> Self {
        Self {
            forest: self.forest,
            traverser: self.traverser,
        }
    }
}

impl<K: NodeKind> fmt::Debug for Children<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("traverser", &self.traverser)
            .finish_non_exhaustive()
    }
}
