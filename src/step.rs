//! Traversal steps.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

/// What happens to a node at a traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// The node is entered, before any of its descendants.
    Enter,
    /// The node is left, after all of its descendants.
    Leave,
    /// Provider-specific marker.
    ///
    /// Custom steps are passed through [`Seek`][`crate::Seek`] without
    /// affecting the enter/leave pairing.
    Custom(&'static str),
}

/// Snapshot of a step: a node and what happens to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeStep<T> {
    /// The node.
    pub node: T,
    /// The action.
    pub action: Action,
}

impl<T> NodeStep<T> {
    /// Creates an enter step.
    #[inline]
    #[must_use]
    pub fn enter(node: T) -> Self {
        Self {
            node,
            action: Action::Enter,
        }
    }

    /// Creates a leave step.
    #[inline]
    #[must_use]
    pub fn leave(node: T) -> Self {
        Self {
            node,
            action: Action::Leave,
        }
    }

    /// Returns true if the node is entered at this step.
    #[inline]
    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.action == Action::Enter
    }

    /// Returns true if the node is left at this step.
    #[inline]
    #[must_use]
    pub fn is_leave(&self) -> bool {
        self.action == Action::Leave
    }

    /// Converts the node.
    pub fn map<F, U>(self, f: F) -> NodeStep<U>
    where
        F: FnOnce(T) -> U,
    {
        NodeStep {
            node: f(self.node),
            action: self.action,
        }
    }
}

/// Identity of a [`Step`].
///
/// Copies of a step share its ID. This is what a leave step is matched
/// against when [`Seek`][`crate::Seek`] checks the pairing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(usize);

impl StepId {
    /// Allocates a fresh ID.
    fn next() -> Self {
        /// Counter shared by all providers. Wraps on overflow.
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

/// Mutable traversal step emitted by providers.
///
/// A provider creates one step per node with
/// [`Provider::create_step`][`crate::Provider::create_step`], emits it once
/// after [`enter`][`Self::enter`] and once more after
/// [`leave`][`Self::leave`].
///
/// ```
/// use cellulose::{Action, NodeStep, Step};
///
/// let mut step = Step::new("node");
/// let entered = step.enter().clone();
/// let left = step.leave().clone();
///
/// assert_eq!(entered.id(), left.id());
/// assert_eq!(entered.state(), Some(NodeStep::enter("node")));
/// assert_eq!(left.action_value(), Some(Action::Leave));
/// ```
#[derive(Debug, Clone)]
pub struct Step<T> {
    /// Step identity.
    id: StepId,
    /// The node.
    node: T,
    /// Current action, `None` until one is assigned.
    action: Option<Action>,
}

impl<T> Step<T> {
    /// Creates a step for the node without validating it.
    ///
    /// Providers should use
    /// [`Provider::create_step`][`crate::Provider::create_step`], which
    /// validates the node first.
    #[must_use]
    pub fn new(node: T) -> Self {
        Self {
            id: StepId::next(),
            node,
            action: None,
        }
    }

    /// Returns the step ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> StepId {
        self.id
    }

    /// Returns a reference to the node.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &T {
        &self.node
    }

    /// Returns the current action, if any was assigned.
    #[inline]
    #[must_use]
    pub fn action_value(&self) -> Option<Action> {
        self.action
    }

    /// Sets an arbitrary action.
    pub fn action(&mut self, action: Action) -> &mut Self {
        self.action = Some(action);
        self
    }

    /// Marks the step as entering the node.
    pub fn enter(&mut self) -> &mut Self {
        self.action(Action::Enter)
    }

    /// Marks the step as leaving the node.
    pub fn leave(&mut self) -> &mut Self {
        self.action(Action::Leave)
    }

    /// Returns a snapshot of the node and the action.
    ///
    /// Returns `None` if no action has been assigned yet.
    #[must_use]
    pub fn state(&self) -> Option<NodeStep<T>>
    where
        T: Clone,
    {
        self.action.map(|action| NodeStep {
            node: self.node.clone(),
            action,
        })
    }

    /// Consumes the step and returns the snapshot.
    pub(crate) fn into_state(self) -> Option<NodeStep<T>> {
        let node = self.node;
        self.action.map(|action| NodeStep { node, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = Step::new(1);
        let b = Step::new(1);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn state_requires_action() {
        let mut step = Step::new("x");
        assert_eq!(step.state(), None);
        step.action(Action::Custom("mark"));
        assert_eq!(
            step.state(),
            Some(NodeStep {
                node: "x",
                action: Action::Custom("mark"),
            })
        );
        assert_eq!(step.leave().clone().into_state(), Some(NodeStep::leave("x")));
    }

    #[test]
    fn node_step_map() {
        let step = NodeStep::enter(2).map(|n| n * 10);
        assert!(step.is_enter());
        assert!(!step.is_leave());
        assert_eq!(step.node, 20);
    }
}
