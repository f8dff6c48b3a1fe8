//! Node ID.

use core::fmt;

use crate::nonmax::NonMaxUsize;

/// Handle to a node stored in a [`Forest`][`crate::Forest`].
///
/// A node ID is only meaningful for the forest that created it. Passing it to
/// another forest either refers to an unrelated node or is rejected as an
/// invalid argument.
///
/// The ordering (`PartialOrd` and `Ord`) is provided for use as keys of
/// ordered containers only. It has no relation to the tree order of nodes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonMaxUsize);

impl NodeId {
    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0.get()
    }

    /// Creates a node ID from an arena index.
    ///
    /// Returns `None` if the index is too large.
    #[inline]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        NonMaxUsize::new(index).map(Self)
    }
}

// Keep `{:#?}` output of neighbors on a single line per ID.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:?})", self.0)
    }
}
