//! Tree builders.

use tracing::debug;

use crate::error::{Error, ProtocolViolation, Result};
use crate::forest::Forest;
use crate::id::NodeId;
use crate::kind::NodeKind;
use crate::step::{Action, NodeStep};

/// Tree builder.
///
/// `TreeBuilder` remembers "the current node".
///
/// * [`TreeBuilder::child()`][`TreeBuilder::child`] creates a new child node
///   (as the last child) of the current node.
/// * [`TreeBuilder::sibling()`][`TreeBuilder::sibling`] creates a new next
///   sibling of the current node.
/// * [`TreeBuilder::parent()`][`TreeBuilder::parent`] makes the parent the new current node.
///
/// Every created node gets its name validated, and a name already used by a
/// sibling is rejected, exactly as with [`Forest::set_name`] and
/// [`Forest::append_child`].
///
/// # Examples
///
/// ```
/// use cellulose::{Forest, NodeConfig, TreeBuilder};
///
/// let kind = NodeConfig::<String, ()>::builder()
///     .name_init(String::new)
///     .name_description("string")
///     .name_is_valid(|_| true)
///     .name_equal(|a, b| a == b)
///     .name_to_string(|name| name.clone())
///     .data_init(|| ())
///     .data_description("unit")
///     .data_is_valid(|_| true)
///     .build()?;
/// let mut forest = Forest::with_kind(kind);
/// let root = TreeBuilder::new(&mut forest, "a".into())?
///     .child("aa".into())?
///     .child("aaa".into())?
///     .parent()
///     .sibling("ab".into())?
///     .root_id();
///
/// let expected = "\
/// a
/// |-- aa
/// |   `-- aaa
/// `-- ab";
/// let printed = forest.debug_print(root).map(|p| p.to_string());
/// assert_eq!(printed.as_deref(), Some(expected));
/// # Ok::<(), cellulose::Error>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder<'a, K: NodeKind> {
    /// Target forest.
    forest: &'a mut Forest<K>,
    /// Node ID of the root node.
    root: NodeId,
    /// Current node.
    current: NodeId,
}

impl<'a, K: NodeKind> TreeBuilder<'a, K> {
    /// Creates a root node with the given name and the builder for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name fails the validator.
    pub fn new(forest: &'a mut Forest<K>, root_name: K::Name) -> Result<Self> {
        let root = create_named(forest, None, root_name)?;
        Ok(Self {
            forest,
            root,
            current: root,
        })
    }

    /// Returns a reference to the forest.
    #[inline]
    #[must_use]
    pub fn forest(&self) -> &Forest<K> {
        self.forest
    }

    /// Returns the node ID of the root node.
    #[inline]
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns the node ID of the current node.
    #[inline]
    #[must_use]
    pub fn current_id(&self) -> NodeId {
        self.current
    }

    /// Appends a child node to the current node, and changes the current node to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid name, or
    /// [`Error::NameCollision`] if a child with an equal name exists.
    pub fn child(&mut self, name: K::Name) -> Result<&mut Self> {
        let new = create_named(self.forest, Some(self.current), name)?;
        self.forest.append_child(self.current, new)?;
        self.current = new;
        Ok(self)
    }

    /// Adds a next sibling node to the current node, and changes the current node to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotChild`] if the current node is the root,
    /// [`Error::InvalidArgument`] for an invalid name, or
    /// [`Error::NameCollision`] if a sibling with an equal name exists.
    pub fn sibling(&mut self, name: K::Name) -> Result<&mut Self> {
        let current = self
            .forest
            .node(self.current)
            .expect("[consistency] nodes in the tree must be alive");
        let parent = current
            .parent_id()
            .ok_or(Error::NotChild { role: "to add a sibling to" })?;
        let next = current.next_sibling_id();

        let new = create_named(self.forest, Some(parent), name)?;
        match next {
            Some(next) => self.forest.insert_before(parent, new, next)?,
            None => self.forest.append_child(parent, new)?,
        };
        self.current = new;
        Ok(self)
    }

    /// Tries to change the current node to the parent of the current node.
    pub fn try_parent(&mut self) -> Option<&mut Self> {
        let parent = self
            .forest
            .node(self.current)
            .expect("[consistency] nodes in the tree must be alive")
            .parent_id()?;
        self.current = parent;
        Some(self)
    }

    /// Changes the current node to the parent of the current node.
    ///
    /// # Panics
    ///
    /// Panics if the current node is the root of a tree.
    pub fn parent(&mut self) -> &mut Self {
        self.try_parent()
            .expect("[precondition] the current node should not be the root")
    }
}

/// Creates a detached node carrying the validated name.
///
/// The name is checked against the children of `parent` before the node is
/// created, so a rejected name leaves the forest untouched.
fn create_named<K: NodeKind>(
    forest: &mut Forest<K>,
    parent: Option<NodeId>,
    name: K::Name,
) -> Result<NodeId> {
    if !forest.is_valid_name(&name) {
        return Err(Error::invalid_argument(
            "name",
            forest.kind().name_description(),
        ));
    }
    if let Some(parent) = parent {
        if forest.child_has_name(parent, &name, None) {
            return Err(Error::NameCollision {
                name: forest.kind().name_to_string(&name),
            });
        }
    }
    let id = forest.create_node();
    forest.entry_mut(id).name = name;
    Ok(id)
}

impl<K: NodeKind> Forest<K> {
    /// Builds a tree from a sequence of enter/leave steps.
    ///
    /// For every entered node `make` returns the name and data of a new node,
    /// which is appended to the node entered last and not yet left. Custom
    /// steps are ignored. Returns the root of the new tree, or `None` if the
    /// sequence is empty.
    ///
    /// Any error of the sequence is returned as is, which makes this suitable
    /// for mirroring a [`Seek`][`crate::Seek`] into the forest. Nodes created
    /// before an error are left in the forest, but a rejected name or data
    /// creates no node.
    ///
    /// # Errors
    ///
    /// * Errors from the sequence or from `make`.
    /// * [`Error::InvalidArgument`] if a name or data fails the validator.
    /// * [`Error::NameCollision`] if two entered siblings have equal names.
    /// * [`Error::ProtocolViolation`] if the sequence is not strictly nested,
    ///   or has more than one toplevel node.
    pub fn graft<T, I, F>(&mut self, steps: I, mut make: F) -> Result<Option<NodeId>>
    where
        I: IntoIterator<Item = Result<NodeStep<T>>>,
        F: FnMut(&T) -> Result<(K::Name, K::Data)>,
    {
        let mut root = None;
        let mut open: Vec<NodeId> = Vec::new();

        for step in steps {
            let step = step?;
            match step.action {
                Action::Enter => {
                    if root.is_some() && open.is_empty() {
                        return Err(ProtocolViolation::NotPaired.into());
                    }
                    let (name, data) = make(&step.node)?;
                    if !self.is_valid_data(&data) {
                        return Err(Error::invalid_argument(
                            "data",
                            self.kind().data_description(),
                        ));
                    }
                    let id = create_named(self, open.last().copied(), name)?;
                    self.entry_mut(id).data = data;
                    match open.last() {
                        Some(&parent) => {
                            self.append_child(parent, id)?;
                        }
                        None => root = Some(id),
                    }
                    open.push(id);
                }
                Action::Leave => {
                    if open.pop().is_none() {
                        return Err(ProtocolViolation::NotPaired.into());
                    }
                }
                Action::Custom(_) => {}
            }
        }
        if !open.is_empty() {
            return Err(ProtocolViolation::NotLeft.into());
        }

        debug!(?root, "grafted tree from steps");
        Ok(root)
    }
}
