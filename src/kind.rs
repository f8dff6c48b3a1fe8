//! Name and data validators of nodes.

pub(crate) mod config;

pub use self::config::{ConfiguredKind, NodeConfig, NodeConfigBuilder};

/// Validator contract for the names and data of nodes.
///
/// A forest calls these synchronously on every relevant read, write, or
/// comparison. Implementations should be pure.
///
/// # Examples
///
/// ```
/// use cellulose::{Forest, NodeKind};
///
/// /// Case-insensitive names, with any `i64` as data.
/// #[derive(Debug, Default)]
/// struct Labels;
///
/// impl NodeKind for Labels {
///     type Name = String;
///     type Data = i64;
///
///     fn init_name(&self) -> String {
///         String::new()
///     }
///     fn name_description(&self) -> &str {
///         "string"
///     }
///     fn is_valid_name(&self, _value: &String) -> bool {
///         true
///     }
///     fn name_equal(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
///     fn name_to_string(&self, name: &String) -> String {
///         name.clone()
///     }
///     fn init_data(&self) -> i64 {
///         0
///     }
///     fn data_description(&self) -> &str {
///         "i64"
///     }
///     fn is_valid_data(&self, _value: &i64) -> bool {
///         true
///     }
/// }
///
/// let mut forest = Forest::<Labels>::new();
/// let root = forest.create_node();
/// let a = forest.create_node();
/// let b = forest.create_node();
/// forest.set_name(a, "Foo".to_owned())?;
/// forest.set_name(b, "FOO".to_owned())?;
/// forest.append_child(root, a)?;
/// assert!(forest.append_child(root, b).is_err());
/// # Ok::<(), cellulose::Error>(())
/// ```
pub trait NodeKind {
    /// Name type.
    type Name;
    /// Data type.
    type Data;

    /// Returns the name of a newly created node.
    fn init_name(&self) -> Self::Name;
    /// Returns a human-readable description of valid names.
    fn name_description(&self) -> &str;
    /// Returns true if the value may be assigned as a name.
    fn is_valid_name(&self, value: &Self::Name) -> bool;
    /// Returns true if the two names must not be used by siblings together.
    fn name_equal(&self, a: &Self::Name, b: &Self::Name) -> bool;
    /// Renders the name for error messages and debug printing.
    fn name_to_string(&self, name: &Self::Name) -> String;

    /// Returns the data of a newly created node.
    fn init_data(&self) -> Self::Data;
    /// Returns a human-readable description of valid data.
    fn data_description(&self) -> &str;
    /// Returns true if the value may be assigned as data.
    fn is_valid_data(&self, value: &Self::Data) -> bool;
}

/// Human-readable descriptions of the name and data types of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Description<'a> {
    /// Description of valid names.
    pub name: &'a str,
    /// Description of valid data.
    pub data: &'a str,
}

impl<'a> Description<'a> {
    /// Collects the descriptions from the kind.
    #[must_use]
    pub fn of<K: NodeKind + ?Sized>(kind: &'a K) -> Self {
        Self {
            name: kind.name_description(),
            data: kind.data_description(),
        }
    }
}
