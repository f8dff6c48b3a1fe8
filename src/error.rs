//! Errors.

#[cfg(feature = "fs")]
use std::io;
#[cfg(feature = "fs")]
use std::path::PathBuf;

use thiserror::Error;

/// Result type with [`Error`] as the default error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from tree mutations, validation, and traversal providers.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument has the wrong shape or fails the validator.
    #[error("Invalid \"{role}\", one \"{expected}\" expected.")]
    InvalidArgument {
        /// Role of the offending argument, or the path of a configuration field.
        role: &'static str,
        /// Human-readable description of the expected value.
        expected: String,
    },

    /// Two siblings would have equal names.
    #[error("A child named \"{name}\" already exists.")]
    NameCollision {
        /// Readable form of the colliding name.
        name: String,
    },

    /// Attempt to make a node a descendant of itself.
    #[error("The new child is an ancestor of the parent")]
    Cycle,

    /// The node is not a direct child of the node operated on.
    #[error("The node {role} is not a child of this node.")]
    NotChild {
        /// What the node was supposed to be used for.
        role: &'static str,
    },

    /// A provider emitted a badly nested step sequence.
    #[error(transparent)]
    ProtocolViolation(#[from] ProtocolViolation),

    /// The origin of a filesystem traversal is not a directory.
    #[cfg(feature = "fs")]
    #[error("Stat of \"{}\" MUST be a directory.", .path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Filesystem access failed.
    #[cfg(feature = "fs")]
    #[error("Failed to access \"{}\"", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Directory walking failed.
    #[cfg(feature = "fs")]
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    #[must_use]
    pub(crate) fn invalid_argument(role: &'static str, expected: impl Into<String>) -> Self {
        Self::InvalidArgument {
            role,
            expected: expected.into(),
        }
    }
}

/// Step sequence nesting violation.
///
/// This always indicates a bug in the provider, not bad user input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolViolation {
    /// A leave step does not close the most recently entered step.
    #[error("Bad Implementation, NOT paired.")]
    NotPaired,
    /// The sequence ended while some steps were still entered.
    #[error("Bad Implementation, steps NOT leave.")]
    NotLeft,
    /// A step was emitted before any action was assigned to it.
    #[error("Bad Implementation, step action NOT set.")]
    ActionNotSet,
}
