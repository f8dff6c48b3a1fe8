//! Providers assembled at run time.

use core::fmt;

use crate::error::Result;
use crate::kind::config::required;
use crate::provider::Provider;
use crate::step::Step;

/// Boxed step sequence borrowing the provider.
pub type BoxedSteps<'p, N> = Box<dyn Iterator<Item = Result<Step<N>>> + 'p>;

/// Boxed predicate.
type IsValidFn<T> = Box<dyn Fn(&T) -> bool>;
/// Boxed step source.
type StepsFn<O, N> = Box<dyn for<'p> Fn(O, &'p ConfiguredProvider<O, N>) -> BoxedSteps<'p, N>>;

/// Namespace for [`ProviderConfigBuilder`].
///
/// # Examples
///
/// ```
/// use cellulose::{Provider, ProviderConfig};
///
/// let provider = ProviderConfig::<Vec<&str>, &str>::builder()
///     .origin_is_valid(|origin| !origin.is_empty())
///     .origin_description("non-empty list")
///     .node_is_valid(|_| true)
///     .node_description("string")
///     .steps(|origin, provider| {
///         Box::new(origin.into_iter().flat_map(move |node| {
///             let step = provider.create_step(node);
///             let pair = step.map(|mut step| {
///                 [step.enter().clone(), step.leave().clone()]
///             });
///             match pair {
///                 Ok(pair) => Vec::from(pair.map(Ok)),
///                 Err(e) => vec![Err(e)],
///             }
///         }))
///     })
///     .build()?;
///
/// let names = provider
///     .seek(vec!["a", "b"])?
///     .filter_map(|step| step.ok().filter(|s| s.is_enter()).map(|s| s.node))
///     .collect::<Vec<_>>();
/// assert_eq!(names, ["a", "b"]);
/// assert!(provider.seek(Vec::new()).is_err());
/// # Ok::<(), cellulose::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig<O, N> {
    /// Marker.
    _types: core::marker::PhantomData<fn() -> (O, N)>,
}

impl<O, N> ProviderConfig<O, N> {
    /// Returns an empty builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder<O, N> {
        ProviderConfigBuilder::default()
    }
}

/// Builder of [`ConfiguredProvider`].
///
/// Every field is required. [`build`][`Self::build`] reports the first
/// missing one by its path, e.g. `origin.is_valid`.
pub struct ProviderConfigBuilder<O, N> {
    /// `origin.is_valid`.
    origin_is_valid: Option<IsValidFn<O>>,
    /// `origin.description`.
    origin_description: Option<String>,
    /// `node.is_valid`.
    node_is_valid: Option<IsValidFn<N>>,
    /// `node.description`.
    node_description: Option<String>,
    /// `steps`.
    steps: Option<StepsFn<O, N>>,
}

impl<O, N> Default for ProviderConfigBuilder<O, N> {
    fn default() -> Self {
        Self {
            origin_is_valid: None,
            origin_description: None,
            node_is_valid: None,
            node_description: None,
            steps: None,
        }
    }
}

impl<O, N> fmt::Debug for ProviderConfigBuilder<O, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfigBuilder")
            .field("origin_is_valid", &self.origin_is_valid.is_some())
            .field("origin_description", &self.origin_description)
            .field("node_is_valid", &self.node_is_valid.is_some())
            .field("node_description", &self.node_description)
            .field("steps", &self.steps.is_some())
            .finish()
    }
}

impl<O, N> ProviderConfigBuilder<O, N> {
    /// Sets `origin.is_valid`.
    #[must_use]
    pub fn origin_is_valid(mut self, f: impl Fn(&O) -> bool + 'static) -> Self {
        self.origin_is_valid = Some(Box::new(f));
        self
    }

    /// Sets `origin.description`.
    #[must_use]
    pub fn origin_description(mut self, description: impl Into<String>) -> Self {
        self.origin_description = Some(description.into());
        self
    }

    /// Sets `node.is_valid`.
    #[must_use]
    pub fn node_is_valid(mut self, f: impl Fn(&N) -> bool + 'static) -> Self {
        self.node_is_valid = Some(Box::new(f));
        self
    }

    /// Sets `node.description`.
    #[must_use]
    pub fn node_description(mut self, description: impl Into<String>) -> Self {
        self.node_description = Some(description.into());
        self
    }

    /// Sets `steps`.
    ///
    /// The function receives the provider itself, for
    /// [`create_step`][`Provider::create_step`] and recursion through
    /// [`steps`][`Provider::steps`].
    #[must_use]
    pub fn steps<F>(mut self, f: F) -> Self
    where
        F: for<'p> Fn(O, &'p ConfiguredProvider<O, N>) -> BoxedSteps<'p, N> + 'static,
    {
        self.steps = Some(Box::new(f));
        self
    }

    /// Validates the configuration and builds the provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`][`crate::Error::InvalidArgument`]
    /// naming the first missing field.
    pub fn build(self) -> Result<ConfiguredProvider<O, N>> {
        Ok(ConfiguredProvider {
            origin_is_valid: required(self.origin_is_valid, "origin.is_valid", "function")?,
            origin_description: required(
                self.origin_description,
                "origin.description",
                "string",
            )?,
            node_is_valid: required(self.node_is_valid, "node.is_valid", "function")?,
            node_description: required(self.node_description, "node.description", "string")?,
            steps: required(self.steps, "steps", "function")?,
        })
    }
}

/// Provider whose validators and step source were supplied at run time.
pub struct ConfiguredProvider<O, N> {
    /// `origin.is_valid`.
    origin_is_valid: IsValidFn<O>,
    /// `origin.description`.
    origin_description: String,
    /// `node.is_valid`.
    node_is_valid: IsValidFn<N>,
    /// `node.description`.
    node_description: String,
    /// `steps`.
    steps: StepsFn<O, N>,
}

impl<O, N> fmt::Debug for ConfiguredProvider<O, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredProvider")
            .field("origin_description", &self.origin_description)
            .field("node_description", &self.node_description)
            .finish_non_exhaustive()
    }
}

impl<O, N> Provider for ConfiguredProvider<O, N> {
    type Origin = O;
    type Node = N;
    type Steps<'a> = BoxedSteps<'a, N> where Self: 'a;

    fn origin_description(&self) -> &str {
        &self.origin_description
    }

    fn is_origin(&self, value: &O) -> bool {
        (self.origin_is_valid)(value)
    }

    fn node_description(&self) -> &str {
        &self.node_description
    }

    fn is_node(&self, value: &N) -> bool {
        (self.node_is_valid)(value)
    }

    fn steps(&self, origin: O) -> Self::Steps<'_> {
        (self.steps)(origin, self)
    }
}
