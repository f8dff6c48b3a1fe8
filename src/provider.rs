//! Traversal providers.
//!
//! A [`Provider`] turns an origin (a directory path, a nested value, ...) into
//! a sequence of [`Step`]s. Implementors only write
//! [`steps`][`Provider::steps`]; consumers call [`seek`][`Provider::seek`],
//! which validates the origin and checks that every leave step closes the
//! step entered last.

mod config;
#[cfg(feature = "fs")]
pub mod fs;

use core::iter::FusedIterator;

use tracing::{trace, warn};

use crate::error::{Error, ProtocolViolation, Result};
use crate::step::{Action, NodeStep, Step, StepId};

pub use self::config::{BoxedSteps, ConfiguredProvider, ProviderConfig, ProviderConfigBuilder};

/// Source of paired enter/leave steps.
///
/// # Examples
///
/// ```
/// use cellulose::{Action, Provider, Result, Step};
///
/// /// Counts down from the origin, nesting every number in the previous one.
/// struct Countdown;
///
/// impl Provider for Countdown {
///     type Origin = u32;
///     type Node = u32;
///     type Steps<'a> = std::vec::IntoIter<Result<Step<u32>>>;
///
///     fn origin_description(&self) -> &str {
///         "u32"
///     }
///     fn is_origin(&self, _: &u32) -> bool {
///         true
///     }
///     fn node_description(&self) -> &str {
///         "u32"
///     }
///     fn is_node(&self, _: &u32) -> bool {
///         true
///     }
///     fn steps(&self, origin: u32) -> Self::Steps<'_> {
///         let mut open = Vec::new();
///         let mut steps = Vec::new();
///         for n in (0..=origin).rev() {
///             match self.create_step(n) {
///                 Ok(mut step) => {
///                     steps.push(Ok(step.enter().clone()));
///                     open.push(step);
///                 }
///                 Err(e) => steps.push(Err(e)),
///             }
///         }
///         while let Some(mut step) = open.pop() {
///             steps.push(Ok(step.leave().clone()));
///         }
///         steps.into_iter()
///     }
/// }
///
/// let actions = Countdown
///     .seek(1)?
///     .map(|step| step.map(|step| (step.node, step.action)))
///     .collect::<Result<Vec<_>>>()?;
/// assert_eq!(
///     actions,
///     [(1, Action::Enter), (0, Action::Enter), (0, Action::Leave), (1, Action::Leave)]
/// );
/// # Ok::<(), cellulose::Error>(())
/// ```
pub trait Provider {
    /// Where a traversal starts.
    type Origin;
    /// What the steps carry.
    type Node;
    /// Raw step sequence.
    type Steps<'a>: Iterator<Item = Result<Step<Self::Node>>>
    where
        Self: 'a;

    /// Human-readable description of valid origins.
    fn origin_description(&self) -> &str;

    /// Returns true if the value may be used as an origin.
    fn is_origin(&self, value: &Self::Origin) -> bool;

    /// Human-readable description of valid nodes.
    fn node_description(&self) -> &str;

    /// Returns true if the value may be carried by a step.
    fn is_node(&self, value: &Self::Node) -> bool;

    /// Returns the raw steps for an origin already known to be valid.
    ///
    /// The sequence should enter the origin first, recursively emit the
    /// steps of each child, then leave the origin. Only
    /// [`seek`][`Self::seek`] checks this.
    fn steps(&self, origin: Self::Origin) -> Self::Steps<'_>;

    /// Creates a step for the node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the node fails
    /// [`is_node`][`Self::is_node`].
    fn create_step(&self, node: Self::Node) -> Result<Step<Self::Node>> {
        if !self.is_node(&node) {
            return Err(Error::invalid_argument("node", self.node_description()));
        }
        Ok(Step::new(node))
    }

    /// Starts a checked traversal from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the origin fails
    /// [`is_origin`][`Self::is_origin`]. Errors of the traversal itself are
    /// yielded by the returned iterator.
    fn seek(&self, origin: Self::Origin) -> Result<Seek<Self::Steps<'_>>> {
        if !self.is_origin(&origin) {
            return Err(Error::invalid_argument("origin", self.origin_description()));
        }
        Ok(Seek::new(self.steps(origin)))
    }
}

/// Iterator returned by [`Provider::seek`].
///
/// Yields the snapshot of every raw step. The first error, whether raised by
/// the provider or by a pairing check, is yielded once and ends the iteration.
#[derive(Debug)]
pub struct Seek<I> {
    /// Raw steps.
    source: I,
    /// IDs of the steps entered and not yet left, innermost last.
    visiting: Vec<StepId>,
    /// Whether the iteration has ended.
    finished: bool,
}

impl<I> Seek<I> {
    /// Wraps a raw step sequence.
    fn new(source: I) -> Self {
        Self {
            source,
            visiting: Vec::new(),
            finished: false,
        }
    }

    /// Returns the number of steps entered and not yet left.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.visiting.len()
    }

    /// Ends the iteration with the error.
    fn fail<T>(&mut self, e: impl Into<Error>) -> Option<Result<T>> {
        self.finished = true;
        Some(Err(e.into()))
    }
}

impl<I, N> Iterator for Seek<I>
where
    I: Iterator<Item = Result<Step<N>>>,
{
    type Item = Result<NodeStep<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let step = match self.source.next() {
            Some(Ok(step)) => step,
            Some(Err(e)) => return self.fail(e),
            None => {
                self.finished = true;
                if !self.visiting.is_empty() {
                    warn!(pending = self.visiting.len(), "step sequence ended inside a node");
                    return Some(Err(ProtocolViolation::NotLeft.into()));
                }
                return None;
            }
        };

        let id = step.id();
        let Some(state) = step.into_state() else {
            warn!(?id, "step emitted without action");
            return self.fail(ProtocolViolation::ActionNotSet);
        };
        match state.action {
            Action::Enter => self.visiting.push(id),
            Action::Leave => {
                let entered = self.visiting.pop();
                if entered != Some(id) {
                    warn!(?id, ?entered, "leave step does not close the innermost node");
                    return self.fail(ProtocolViolation::NotPaired);
                }
            }
            Action::Custom(_) => {}
        }
        trace!(?id, action = ?state.action, depth = self.visiting.len(), "step");

        Some(Ok(state))
    }
}

impl<I, N> FusedIterator for Seek<I> where I: Iterator<Item = Result<Step<N>>> {}
