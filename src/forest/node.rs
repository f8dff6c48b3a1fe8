//! Node.

use core::fmt;

use crate::error::{Error, Result};
use crate::forest::traverse::{Children, Nodes, Parents};
use crate::forest::{DebugPrint, Forest};
use crate::hierarchy::{Hierarchy, Neighbors};
use crate::id::NodeId;
use crate::kind::NodeKind;

/// Immutable reference to a node.
///
/// This type guarantees that the node ID is present in the forest.
pub struct Node<'a, K: NodeKind> {
    /// Forest.
    forest: &'a Forest<K>,
    /// Node ID.
    id: NodeId,
}

impl<'a, K: NodeKind> Node<'a, K> {
    /// Creates a new `Node` object.
    #[must_use]
    pub(super) fn new(forest: &'a Forest<K>, id: NodeId) -> Option<Self> {
        if !forest.is_node(id) {
            return None;
        }
        Some(Self { forest, id })
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the forest the node belongs to.
    #[inline]
    #[must_use]
    pub fn forest(&self) -> &'a Forest<K> {
        self.forest
    }

    /// Returns the hierarchy of the forest.
    #[inline]
    #[must_use]
    pub(super) fn hierarchy(&self) -> &'a Hierarchy {
        &self.forest.hierarchy
    }

    /// Returns the links of the node.
    fn neighbors(&self) -> &'a Neighbors {
        self.forest
            .hierarchy
            .neighbors(self.id)
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns another node of the same forest.
    fn sibling_proxy(&self, id: NodeId) -> Self {
        Self::new(self.forest, id).expect("[consistency] linked nodes must be alive")
    }

    /// Returns a reference to the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a K::Name {
        self.forest
            .name(self.id)
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns a reference to the data.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &'a K::Data {
        self.forest
            .data(self.id)
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns the node ID of the parent.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        self.neighbors().parent()
    }

    /// Returns the node ID of the previous sibling.
    #[inline]
    #[must_use]
    pub fn previous_sibling_id(&self) -> Option<NodeId> {
        self.neighbors().previous_sibling()
    }

    /// Returns the node ID of the next sibling.
    #[inline]
    #[must_use]
    pub fn next_sibling_id(&self) -> Option<NodeId> {
        self.neighbors().next_sibling()
    }

    /// Returns the node ID of the first child.
    #[inline]
    #[must_use]
    pub fn first_child_id(&self) -> Option<NodeId> {
        self.neighbors().first_child()
    }

    /// Returns the node ID of the last child.
    #[inline]
    #[must_use]
    pub fn last_child_id(&self) -> Option<NodeId> {
        self.neighbors().last_child()
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.parent_id().map(|id| self.sibling_proxy(id))
    }

    /// Returns the previous sibling node.
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Self> {
        self.previous_sibling_id().map(|id| self.sibling_proxy(id))
    }

    /// Returns the next sibling node.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.next_sibling_id().map(|id| self.sibling_proxy(id))
    }

    /// Returns the first child node.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.first_child_id().map(|id| self.sibling_proxy(id))
    }

    /// Returns the last child node.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.last_child_id().map(|id| self.sibling_proxy(id))
    }

    /// Returns true if the node has at least one child.
    #[inline]
    #[must_use]
    pub fn has_child_nodes(&self) -> bool {
        self.first_child_id().is_some()
    }

    /// Returns true if a direct child has a name equal to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` fails the validator.
    pub fn has_child(&self, name: &K::Name) -> Result<bool> {
        let kind = self.forest.kind();
        if !kind.is_valid_name(name) {
            return Err(Error::invalid_argument("name", kind.name_description()));
        }
        Ok(self
            .children()
            .any(|child| kind.name_equal(child.name(), name)))
    }

    /// Returns an iterator of the node itself and its ancestors, nearest first.
    #[inline]
    #[must_use]
    pub fn parents(&self) -> Parents<'a, K> {
        Parents::with_start(self)
    }

    /// Returns an iterator of the direct children in sibling order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> Children<'a, K> {
        Children::with_parent(self)
    }

    /// Returns the depth-first enter/leave steps of the subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellulose::{Forest, NodeConfig, NodeStep, TreeBuilder};
    ///
    /// let kind = NodeConfig::<&'static str, ()>::builder()
    ///     .name_init(|| "")
    ///     .name_description("str")
    ///     .name_is_valid(|_| true)
    ///     .name_equal(|a, b| a == b)
    ///     .name_to_string(|name| name.to_string())
    ///     .data_init(|| ())
    ///     .data_description("unit")
    ///     .data_is_valid(|_| true)
    ///     .build()?;
    /// let mut forest = Forest::with_kind(kind);
    /// let root = TreeBuilder::new(&mut forest, "a")?
    ///     .child("aa")?
    ///     .sibling("ab")?
    ///     .root_id();
    ///
    /// let steps = forest
    ///     .nodes(root)?
    ///     .map(|step| step.map(|node| *node.name()))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(
    ///     steps,
    ///     [
    ///         NodeStep::enter("a"),
    ///         NodeStep::enter("aa"),
    ///         NodeStep::leave("aa"),
    ///         NodeStep::enter("ab"),
    ///         NodeStep::leave("ab"),
    ///         NodeStep::leave("a"),
    ///     ]
    /// );
    /// # Ok::<(), cellulose::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> Nodes<'a, K> {
        Nodes::with_toplevel(self)
    }

    /// Returns a tree printer for the subtree.
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'a, K> {
        DebugPrint::new(*self)
    }

    /// Fails unless `other` is a node of the same forest.
    fn other(&self, other: NodeId) -> Result<Self> {
        Self::new(self.forest, other).ok_or_else(|| Error::invalid_argument("other", "Node"))
    }

    /// Returns true if `other` is this node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `other` is not in the forest.
    pub fn is_same_node(&self, other: NodeId) -> Result<bool> {
        Ok(self.other(other)?.id == self.id)
    }

    /// Returns true if the names are equal under the kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `other` is not in the forest.
    pub fn is_name_equal_node(&self, other: NodeId) -> Result<bool> {
        let other = self.other(other)?;
        Ok(self.forest.kind().name_equal(other.name(), self.name()))
    }

    /// Returns true if `other` is this node or one of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `other` is not in the forest.
    pub fn contains(&self, other: NodeId) -> Result<bool> {
        let other = self.other(other)?;
        Ok(self
            .forest
            .hierarchy
            .is_ancestor_or_self(self.id, other.id))
    }
}

impl<K: NodeKind> Clone for Node<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: NodeKind> Copy for Node<'_, K> {}

impl<K: NodeKind> PartialEq for Node<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.forest, other.forest) && self.id == other.id
    }
}

impl<K: NodeKind> Eq for Node<'_, K> {}

impl<K: NodeKind> fmt::Debug for Node<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.forest.kind().name_to_string(self.name()))
            .finish()
    }
}
