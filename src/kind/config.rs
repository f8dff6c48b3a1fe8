//! Node kinds assembled at run time.

use core::fmt;

use crate::error::{Error, Result};
use crate::kind::NodeKind;

/// Boxed value factory.
type InitFn<T> = Box<dyn Fn() -> T>;
/// Boxed predicate.
type IsValidFn<T> = Box<dyn Fn(&T) -> bool>;
/// Boxed equality.
type EqualFn<T> = Box<dyn Fn(&T, &T) -> bool>;
/// Boxed stringification.
type ToStringFn<T> = Box<dyn Fn(&T) -> String>;

/// Namespace for [`NodeConfigBuilder`].
///
/// Use this when the validators come from outside the type system, for
/// example when they are chosen by configuration. Otherwise implement
/// [`NodeKind`] directly.
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig<N, D> {
    /// Marker.
    _types: core::marker::PhantomData<fn() -> (N, D)>,
}

impl<N, D> NodeConfig<N, D> {
    /// Returns an empty builder.
    #[inline]
    #[must_use]
    pub fn builder() -> NodeConfigBuilder<N, D> {
        NodeConfigBuilder::default()
    }
}

/// Builder of [`ConfiguredKind`].
///
/// Every field is required. [`build`][`Self::build`] reports the first
/// missing one by its path, e.g. `name.is_valid`.
pub struct NodeConfigBuilder<N, D> {
    /// `name.init`.
    name_init: Option<InitFn<N>>,
    /// `name.description`.
    name_description: Option<String>,
    /// `name.is_valid`.
    name_is_valid: Option<IsValidFn<N>>,
    /// `name.equal`.
    name_equal: Option<EqualFn<N>>,
    /// `name.to_string`.
    name_to_string: Option<ToStringFn<N>>,
    /// `data.init`.
    data_init: Option<InitFn<D>>,
    /// `data.description`.
    data_description: Option<String>,
    /// `data.is_valid`.
    data_is_valid: Option<IsValidFn<D>>,
}

impl<N, D> Default for NodeConfigBuilder<N, D> {
    fn default() -> Self {
        Self {
            name_init: None,
            name_description: None,
            name_is_valid: None,
            name_equal: None,
            name_to_string: None,
            data_init: None,
            data_description: None,
            data_is_valid: None,
        }
    }
}

impl<N, D> fmt::Debug for NodeConfigBuilder<N, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfigBuilder")
            .field("name_init", &self.name_init.is_some())
            .field("name_description", &self.name_description)
            .field("name_is_valid", &self.name_is_valid.is_some())
            .field("name_equal", &self.name_equal.is_some())
            .field("name_to_string", &self.name_to_string.is_some())
            .field("data_init", &self.data_init.is_some())
            .field("data_description", &self.data_description)
            .field("data_is_valid", &self.data_is_valid.is_some())
            .finish()
    }
}

impl<N, D> NodeConfigBuilder<N, D> {
    /// Sets `name.init`.
    #[must_use]
    pub fn name_init(mut self, f: impl Fn() -> N + 'static) -> Self {
        self.name_init = Some(Box::new(f));
        self
    }

    /// Sets `name.description`.
    #[must_use]
    pub fn name_description(mut self, description: impl Into<String>) -> Self {
        self.name_description = Some(description.into());
        self
    }

    /// Sets `name.is_valid`.
    #[must_use]
    pub fn name_is_valid(mut self, f: impl Fn(&N) -> bool + 'static) -> Self {
        self.name_is_valid = Some(Box::new(f));
        self
    }

    /// Sets `name.equal`.
    #[must_use]
    pub fn name_equal(mut self, f: impl Fn(&N, &N) -> bool + 'static) -> Self {
        self.name_equal = Some(Box::new(f));
        self
    }

    /// Sets `name.to_string`.
    #[must_use]
    pub fn name_to_string(mut self, f: impl Fn(&N) -> String + 'static) -> Self {
        self.name_to_string = Some(Box::new(f));
        self
    }

    /// Sets `data.init`.
    #[must_use]
    pub fn data_init(mut self, f: impl Fn() -> D + 'static) -> Self {
        self.data_init = Some(Box::new(f));
        self
    }

    /// Sets `data.description`.
    #[must_use]
    pub fn data_description(mut self, description: impl Into<String>) -> Self {
        self.data_description = Some(description.into());
        self
    }

    /// Sets `data.is_valid`.
    #[must_use]
    pub fn data_is_valid(mut self, f: impl Fn(&D) -> bool + 'static) -> Self {
        self.data_is_valid = Some(Box::new(f));
        self
    }

    /// Validates the configuration and builds the kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] naming the first missing field.
    pub fn build(self) -> Result<ConfiguredKind<N, D>> {
        Ok(ConfiguredKind {
            name_init: required(self.name_init, "name.init", "function")?,
            name_description: required(self.name_description, "name.description", "string")?,
            name_is_valid: required(self.name_is_valid, "name.is_valid", "function")?,
            name_equal: required(self.name_equal, "name.equal", "function")?,
            name_to_string: required(self.name_to_string, "name.to_string", "function")?,
            data_init: required(self.data_init, "data.init", "function")?,
            data_description: required(self.data_description, "data.description", "string")?,
            data_is_valid: required(self.data_is_valid, "data.is_valid", "function")?,
        })
    }
}

/// Unwraps a configuration field or reports it by path.
pub(crate) fn required<T>(field: Option<T>, path: &'static str, expected: &str) -> Result<T> {
    field.ok_or_else(|| Error::invalid_argument(path, expected))
}

/// Node kind whose validators were supplied at run time.
pub struct ConfiguredKind<N, D> {
    /// `name.init`.
    name_init: InitFn<N>,
    /// `name.description`.
    name_description: String,
    /// `name.is_valid`.
    name_is_valid: IsValidFn<N>,
    /// `name.equal`.
    name_equal: EqualFn<N>,
    /// `name.to_string`.
    name_to_string: ToStringFn<N>,
    /// `data.init`.
    data_init: InitFn<D>,
    /// `data.description`.
    data_description: String,
    /// `data.is_valid`.
    data_is_valid: IsValidFn<D>,
}

impl<N, D> fmt::Debug for ConfiguredKind<N, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredKind")
            .field("name_description", &self.name_description)
            .field("data_description", &self.data_description)
            .finish_non_exhaustive()
    }
}

impl<N, D> NodeKind for ConfiguredKind<N, D> {
    type Name = N;
    type Data = D;

    fn init_name(&self) -> N {
        (self.name_init)()
    }

    fn name_description(&self) -> &str {
        &self.name_description
    }

    fn is_valid_name(&self, value: &N) -> bool {
        (self.name_is_valid)(value)
    }

    fn name_equal(&self, a: &N, b: &N) -> bool {
        (self.name_equal)(a, b)
    }

    fn name_to_string(&self, name: &N) -> String {
        (self.name_to_string)(name)
    }

    fn init_data(&self) -> D {
        (self.data_init)()
    }

    fn data_description(&self) -> &str {
        &self.data_description
    }

    fn is_valid_data(&self, value: &D) -> bool {
        (self.data_is_valid)(value)
    }
}
