//! # ramus-core
//!
//! Core data model and traits for the Ramus operation dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! tree builders and handler authors that don't need the full `ramus-std`
//! implementation.
//!
//! # Two Open Axes
//!
//! Ramus applies a growable set of *operations* to a growable set of *node
//! kinds* arranged in a tree, without either side knowing the other:
//!
//! - **Kinds** ([`NodeKind`], [`KindRegistry`]) are runtime identities, not
//!   types. Adding a kind never touches existing handlers.
//! - **Nodes** ([`Node`]) carry a kind, an optional payload and ordered
//!   children. One struct serves every kind.
//! - **Handlers** ([`Handler`]) are bound to one (operation, kind) pair and
//!   steer traversal through the [`Visit`] handle they receive.
//! - **Resolution** ([`Resolver`]) maps a pair to a handler, exact match
//!   first, then the operation's default.
//!
//! # Error Types
//!
//! - [`RamusError`] - Top-level error type
//! - [`StructureError`] - Broken tree invariants
//! - [`DispatchError`] - Errors that halt a traversal

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod kind;
mod node;
mod outcome;
mod resolver;
mod visit;

// Re-exports
pub use error::{BoxError, DispatchError, RamusError, StructureError};
pub use handler::{Handler, from_fn};
pub use kind::{KindRegistry, NodeKind};
pub use node::{Children, ChildrenMut, Node, NodeId};
pub use outcome::{Outcome, Status, TraversalResult, Verdict};
pub use resolver::{Resolved, Resolver};
pub use visit::{Directive, Visit};
