//! Doubly linked trees with validated names, and paired depth-first traversal.
//!
//! A [`Forest`] stores nodes whose names and data are checked by a
//! [`NodeKind`]. Siblings with equal names are rejected, and so is any
//! mutation that would make a node its own ancestor.
//!
//! Traversal is expressed as a sequence of [`NodeStep`]s: every
//! [`Action::Enter`] is matched by an [`Action::Leave`] for the same node.
//! The tree produces such sequences with [`Node::nodes`], and external
//! sources produce them through the [`Provider`] trait, whose
//! [`seek`][`Provider::seek`] verifies the pairing.
//!
//! # Examples
//!
//! ```
//! use cellulose::{Action, Forest, NodeConfig};
//!
//! let kind = NodeConfig::<String, u32>::builder()
//!     .name_init(String::new)
//!     .name_description("string")
//!     .name_is_valid(|_| true)
//!     .name_equal(|a, b| a == b)
//!     .name_to_string(|name| name.clone())
//!     .data_init(|| 0)
//!     .data_description("u32")
//!     .data_is_valid(|_| true)
//!     .build()?;
//!
//! let mut forest = Forest::with_kind(kind);
//! let root = forest.create_node();
//! forest.set_name(root, "root".to_owned())?;
//! let child = forest.create_node();
//! forest.set_name(child, "child".to_owned())?;
//! forest.append_child(root, child)?;
//!
//! let actions = forest
//!     .nodes(root)?
//!     .map(|step| (step.node.name().clone(), step.action))
//!     .collect::<Vec<_>>();
//! assert_eq!(
//!     actions,
//!     [
//!         ("root".to_owned(), Action::Enter),
//!         ("child".to_owned(), Action::Enter),
//!         ("child".to_owned(), Action::Leave),
//!         ("root".to_owned(), Action::Leave),
//!     ]
//! );
//! # Ok::<(), cellulose::Error>(())
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

mod error;
pub mod forest;
mod hierarchy;
mod id;
pub mod kind;
mod nonmax;
pub mod provider;
mod step;

pub use self::error::{Error, ProtocolViolation, Result};
pub use self::forest::{DebugPrint, Forest, Node, TreeBuilder};
pub use self::id::NodeId;
pub use self::kind::{ConfiguredKind, Description, NodeConfig, NodeKind};
#[cfg(feature = "fs")]
pub use self::provider::fs::{FsDirectoryProvider, FsNode};
pub use self::provider::{ConfiguredProvider, Provider, ProviderConfig, Seek};
pub use self::step::{Action, NodeStep, Step, StepId};
