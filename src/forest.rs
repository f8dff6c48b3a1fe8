//! Forest.

mod builder;
mod debug_print;
mod node;
mod traverse;

use core::fmt;

use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::hierarchy::Hierarchy;
use crate::id::NodeId;
use crate::kind::{Description, NodeKind};

pub use self::builder::TreeBuilder;
pub use self::debug_print::DebugPrint;
pub use self::node::Node;
pub use self::traverse::{Children, Nodes, Parents};

/// Name and data of a node.
struct Entry<N, D> {
    /// Name.
    name: N,
    /// Data.
    data: D,
}

/// Arena of nodes whose names and data are governed by the kind `K`.
///
/// Every node belongs to exactly one tree of the forest. A newly created node
/// is the root of its own tree, and so is every node detached by
/// [`remove_child`][`Self::remove_child`] or
/// [`replace_child`][`Self::replace_child`]. Nodes are never freed before the
/// forest is dropped, so their IDs stay valid.
///
/// All mutations validate their arguments before touching any link: on error
/// the forest is left unchanged.
pub struct Forest<K: NodeKind> {
    /// Validators.
    kind: K,
    /// Hierarchy.
    hierarchy: Hierarchy,
    /// Names and data, indexed by node ID.
    entries: Vec<Entry<K::Name, K::Data>>,
}

impl<K: NodeKind + Default> Forest<K> {
    /// Creates a new empty forest with the default kind.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(K::default())
    }
}

impl<K: NodeKind + Default> Default for Forest<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKind> Forest<K> {
    /// Creates a new empty forest governed by the given kind.
    #[must_use]
    pub fn with_kind(kind: K) -> Self {
        Self {
            kind,
            hierarchy: Hierarchy::default(),
            entries: Vec::new(),
        }
    }

    /// Returns a reference to the kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Returns the descriptions of valid names and data.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Description<'_> {
        Description::of(&self.kind)
    }

    /// Returns true if the value may be used as a name.
    #[inline]
    #[must_use]
    pub fn is_valid_name(&self, value: &K::Name) -> bool {
        self.kind.is_valid_name(value)
    }

    /// Returns true if the value may be used as data.
    #[inline]
    #[must_use]
    pub fn is_valid_data(&self, value: &K::Data) -> bool {
        self.kind.is_valid_data(value)
    }

    /// Returns true if the ID refers to a node of this forest.
    #[inline]
    #[must_use]
    pub fn is_node(&self, id: NodeId) -> bool {
        self.hierarchy.is_valid(id)
    }

    /// Returns the number of nodes ever created in this forest.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no node has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates a detached node with the initial name and data of the kind.
    ///
    /// # Panics
    ///
    /// Panics if the node ID overflows.
    pub fn create_node(&mut self) -> NodeId {
        let new_id = self.hierarchy.create_root();
        assert_eq!(
            self.entries.len(),
            new_id.index(),
            "[consistency] node ID must be able to be used as an index for the vec"
        );
        self.entries.push(Entry {
            name: self.kind.init_name(),
            data: self.kind.init_data(),
        });

        new_id
    }

    /// Returns a [proxy object][`Node`] to the node.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_, K>> {
        Node::new(self, id)
    }

    /// Returns the proxy, or an invalid argument error for the given role.
    fn node_as(&self, id: NodeId, role: &'static str) -> Result<Node<'_, K>> {
        self.node(id).ok_or_else(|| Error::invalid_argument(role, "Node"))
    }

    /// Fails unless the ID refers to a node of this forest.
    fn assert_node(&self, id: NodeId, role: &'static str) -> Result<()> {
        self.node_as(id, role).map(|_| ())
    }

    /// Returns a reference to the name of the node.
    #[inline]
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&K::Name> {
        self.entries.get(id.index()).map(|entry| &entry.name)
    }

    /// Returns a reference to the data of the node.
    #[inline]
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&K::Data> {
        self.entries.get(id.index()).map(|entry| &entry.data)
    }

    /// Returns the parent of a node known to be alive.
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.hierarchy
            .neighbors(id)
            .expect("[validity] the node has been checked to be alive")
            .parent()
    }

    /// Returns a reference to the entry of a node known to be alive.
    fn entry(&self, id: NodeId) -> &Entry<K::Name, K::Data> {
        self.entries
            .get(id.index())
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns a mutable reference to the entry of a node known to be alive.
    fn entry_mut(&mut self, id: NodeId) -> &mut Entry<K::Name, K::Data> {
        self.entries
            .get_mut(id.index())
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns true if a child of `parent` other than `except` has the name.
    fn child_has_name(&self, parent: NodeId, name: &K::Name, except: Option<NodeId>) -> bool {
        let mut children = self.children_unchecked(parent);
        children.any(|child| {
            Some(child.id()) != except && self.kind.name_equal(child.name(), name)
        })
    }

    /// Returns an iterator of the children of a node known to be alive.
    fn children_unchecked(&self, parent: NodeId) -> Children<'_, K> {
        Children::with_parent(
            &self
                .node(parent)
                .expect("[validity] the node has been checked to be alive"),
        )
    }

    /// Fails if giving `node` as a child to `parent` would create a cycle or
    /// a name collision.
    fn assert_adoptable(&self, parent: NodeId, node: NodeId) -> Result<()> {
        if self.hierarchy.is_ancestor_or_self(node, parent) {
            return Err(Error::Cycle);
        }
        let name = &self.entry(node).name;
        if self.child_has_name(parent, name, Some(node)) {
            return Err(Error::NameCollision {
                name: self.kind.name_to_string(name),
            });
        }
        Ok(())
    }

    /// Fails unless `node` is a direct child of `parent`.
    fn assert_child(&self, parent: NodeId, node: NodeId, role: &'static str) -> Result<()> {
        if self.parent_of(node) != Some(parent) {
            return Err(Error::NotChild { role });
        }
        Ok(())
    }

    /// Assigns a new name to the node.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if the node is not in this forest or the
    ///   name fails the validator.
    /// * [`Error::NameCollision`] if a sibling already has an equal name.
    #[instrument(level = "trace", skip(self, name))]
    pub fn set_name(&mut self, id: NodeId, name: K::Name) -> Result<()> {
        self.assert_node(id, "node")?;
        if !self.kind.is_valid_name(&name) {
            return Err(Error::invalid_argument(
                "assigned value",
                self.kind.name_description(),
            ));
        }
        if let Some(parent) = self.parent_of(id) {
            if self.child_has_name(parent, &name, Some(id)) {
                return Err(Error::NameCollision {
                    name: self.kind.name_to_string(&name),
                });
            }
        }

        self.entry_mut(id).name = name;
        Ok(())
    }

    /// Assigns new data to the node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest or
    /// the data fails the validator.
    #[instrument(level = "trace", skip(self, data))]
    pub fn set_data(&mut self, id: NodeId, data: K::Data) -> Result<()> {
        self.assert_node(id, "node")?;
        if !self.kind.is_valid_data(&data) {
            return Err(Error::invalid_argument(
                "assigned value",
                self.kind.data_description(),
            ));
        }

        self.entry_mut(id).data = data;
        Ok(())
    }

    /// Returns true if a direct child of the node has a name equal to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest or
    /// `name` fails the validator.
    pub fn has_child(&self, parent: NodeId, name: &K::Name) -> Result<bool> {
        self.node_as(parent, "parent")?.has_child(name)
    }

    /// Returns true if the node has at least one child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest.
    pub fn has_child_nodes(&self, id: NodeId) -> Result<bool> {
        Ok(self.node_as(id, "node")?.has_child_nodes())
    }

    /// Returns true if both IDs refer to the same node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either node is not in this forest.
    pub fn is_same_node(&self, id: NodeId, other: NodeId) -> Result<bool> {
        self.node_as(id, "node")?.is_same_node(other)
    }

    /// Returns true if the names of the nodes are equal under the kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either node is not in this forest.
    pub fn is_name_equal_node(&self, id: NodeId, other: NodeId) -> Result<bool> {
        self.node_as(id, "node")?.is_name_equal_node(other)
    }

    /// Returns true if `other` is the node itself or one of its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either node is not in this forest.
    pub fn contains(&self, id: NodeId, other: NodeId) -> Result<bool> {
        self.node_as(id, "node")?.contains(other)
    }

    /// Returns an iterator of the node and its ancestors, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest.
    pub fn parents(&self, id: NodeId) -> Result<Parents<'_, K>> {
        Ok(self.node_as(id, "node")?.parents())
    }

    /// Returns an iterator of the direct children in sibling order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest.
    pub fn children(&self, id: NodeId) -> Result<Children<'_, K>> {
        Ok(self.node_as(id, "node")?.children())
    }

    /// Returns the depth-first enter/leave steps of the subtree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node is not in this forest.
    pub fn nodes(&self, id: NodeId) -> Result<Nodes<'_, K>> {
        Ok(self.node_as(id, "node")?.nodes())
    }

    /// Returns a tree printer for the subtree rooted at the node.
    #[inline]
    #[must_use]
    pub fn debug_print(&self, id: NodeId) -> Option<DebugPrint<'_, K>> {
        self.node(id).map(|node| node.debug_print())
    }

    /// Detaches `node` from wherever it is and appends it as the last child
    /// of `parent`.
    ///
    /// A node which already is a child of `parent` is moved to the last
    /// position. Returns `node`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if a node is not in this forest.
    /// * [`Error::Cycle`] if `node` is `parent` or one of its ancestors.
    /// * [`Error::NameCollision`] if another child of `parent` has an equal name.
    #[instrument(level = "trace", skip(self))]
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId> {
        self.assert_node(parent, "parent")?;
        self.assert_node(node, "node")?;
        self.assert_adoptable(parent, node)?;

        self.hierarchy.append_child(node, parent);
        debug!(?parent, ?node, "appended child");
        Ok(node)
    }

    /// Detaches `node` from `parent` and returns it.
    ///
    /// The subtree under `node` is kept, with `node` as its detached root.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if a node is not in this forest.
    /// * [`Error::NotChild`] if `node` is not a direct child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId> {
        self.assert_node(parent, "parent")?;
        self.assert_node(node, "node")?;
        self.assert_child(parent, node, "to be removed")?;

        self.hierarchy.detach(node);
        debug!(?parent, ?node, "removed child");
        Ok(node)
    }

    /// Puts `new_child` at the place of `old_child` and returns `old_child`,
    /// which becomes a detached root.
    ///
    /// `new_child` is detached from its previous position first. Replacing a
    /// node with itself changes nothing.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if a node is not in this forest.
    /// * [`Error::Cycle`] if `new_child` is `parent` or one of its ancestors.
    /// * [`Error::NameCollision`] if a child of `parent` other than
    ///   `new_child` has an equal name.
    /// * [`Error::NotChild`] if `old_child` is not a direct child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<NodeId> {
        self.assert_node(parent, "parent")?;
        self.assert_node(new_child, "new_child")?;
        self.assert_node(old_child, "old_child")?;
        self.assert_adoptable(parent, new_child)?;
        self.assert_child(parent, old_child, "to be replaced")?;

        if new_child != old_child {
            self.hierarchy.replace(new_child, old_child);
            debug!(?parent, ?new_child, ?old_child, "replaced child");
        }
        Ok(old_child)
    }

    /// Puts `new_node` right before `reference_node` and returns `new_node`.
    ///
    /// `new_node` is detached from its previous position first. Inserting a
    /// node before itself changes nothing.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if a node is not in this forest.
    /// * [`Error::Cycle`] if `new_node` is `parent` or one of its ancestors.
    /// * [`Error::NameCollision`] if a child of `parent` other than
    ///   `new_node` has an equal name.
    /// * [`Error::NotChild`] if `reference_node` is not a direct child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        reference_node: NodeId,
    ) -> Result<NodeId> {
        self.assert_node(parent, "parent")?;
        self.assert_node(new_node, "new_node")?;
        self.assert_node(reference_node, "reference_node")?;
        self.assert_adoptable(parent, new_node)?;
        self.assert_child(parent, reference_node, "to insert before")?;

        if new_node != reference_node {
            self.hierarchy.insert_before(new_node, reference_node);
            debug!(?parent, ?new_node, ?reference_node, "inserted child");
        }
        Ok(new_node)
    }
}

impl<K> fmt::Debug for Forest<K>
where
    K: NodeKind + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Names rendered through the kind.
        struct Names<'a, K: NodeKind>(&'a Forest<K>);
        impl<K: NodeKind> fmt::Debug for Names<'_, K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list()
                    .entries(
                        self.0
                            .entries
                            .iter()
                            .map(|entry| self.0.kind.name_to_string(&entry.name)),
                    )
                    .finish()
            }
        }

        f.debug_struct("Forest")
            .field("kind", &self.kind)
            .field("hierarchy", &self.hierarchy)
            .field("names", &Names(self))
            .finish()
    }
}
