//! Error types for Ramus.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RamusError`] - Top-level error type for all Ramus operations
//! - [`StructureError`] - Broken tree invariants (unknown kinds, cycles, second parents)
//! - [`DispatchError`] - Errors that terminate a traversal

use crate::{kind::NodeKind, node::NodeId};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Ramus operations.
#[derive(Error, Debug)]
pub enum RamusError {
    /// The tree structure violated an invariant.
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// A traversal failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Violations of the tree's structural invariants.
///
/// These are never recovered silently: they indicate a broken invariant,
/// not a normal branch of control flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A node was constructed with a kind its registry never issued.
    #[error("node kind {kind} was not registered")]
    InvalidKind {
        /// The offending kind.
        kind: NodeKind,
    },

    /// A node is reachable from itself.
    #[error("cycle detected at node {node}")]
    CycleDetected {
        /// The node that closes the cycle.
        node: NodeId,
    },

    /// A node was attached while it still belonged to a parent.
    #[error("node {node} is already a child of node {parent}")]
    AlreadyAttached {
        /// The node being attached.
        node: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
}

/// Errors that terminate a traversal with a `Failed` status.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The tree being traversed is structurally broken.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// No handler resolved and the run was strict.
    #[error("no handler for operation `{operation}` on kind `{kind}`")]
    Unhandled {
        /// The operation being dispatched.
        operation: String,
        /// Name of the node kind nothing was registered for.
        kind: String,
    },

    /// A handler reported failure.
    #[error("handler for kind `{kind}` failed at node {node}")]
    HandlerFailure {
        /// Name of the kind whose handler failed.
        kind: String,
        /// The node being visited.
        node: NodeId,
        /// The handler's own error.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Returns `true` if traversal stopped because of a cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            DispatchError::Structure(StructureError::CycleDetected { .. })
        )
    }

    /// Returns `true` if traversal stopped on an unhandled pair in strict mode.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchError::Unhandled { .. })
    }
}

// Convenience conversions
impl From<BoxError> for RamusError {
    fn from(err: BoxError) -> Self {
        RamusError::Custom(err)
    }
}
