//! Traversal outcomes.

use crate::{error::DispatchError, kind::NodeKind, node::NodeId};
use std::sync::Arc;

/// What happened at one visited node.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<T> {
    /// A handler ran and produced a value.
    Handled(T),
    /// Nothing was registered for the pair and the run was lenient.
    Unhandled,
}

/// One recorded entry in a traversal, in visitation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// The visited node.
    pub node: NodeId,
    /// The node's kind.
    pub kind: NodeKind,
    /// Registered name of the node's kind.
    pub kind_name: Arc<str>,
    /// Distance from the root of the run.
    pub depth: usize,
    /// What the node produced.
    pub verdict: Verdict<T>,
}

impl<T> Outcome<T> {
    /// The handler's value, or `None` if the node was unhandled.
    pub fn value(&self) -> Option<&T> {
        match &self.verdict {
            Verdict::Handled(value) => Some(value),
            Verdict::Unhandled => None,
        }
    }

    /// Returns `true` if no handler resolved for this node.
    pub fn is_unhandled(&self) -> bool {
        matches!(self.verdict, Verdict::Unhandled)
    }
}

/// How a traversal ended.
#[derive(Debug)]
pub enum Status {
    /// Every reachable, non-skipped node was visited.
    Completed,
    /// A handler returned `Abort` at this node.
    AbortedAt(NodeId),
    /// Traversal halted on an error.
    Failed(DispatchError),
}

/// The result of running one operation over a tree.
#[derive(Debug)]
pub struct TraversalResult<T> {
    /// Per-node outcomes in visitation order.
    pub outcomes: Vec<Outcome<T>>,
    /// Terminal status.
    pub status: Status,
}

impl<T> TraversalResult<T> {
    /// Returns `true` if the traversal ran to completion.
    pub fn is_completed(&self) -> bool {
        matches!(self.status, Status::Completed)
    }

    /// The node a handler aborted at, if any.
    pub fn aborted_at(&self) -> Option<NodeId> {
        match self.status {
            Status::AbortedAt(node) => Some(node),
            _ => None,
        }
    }

    /// The error the traversal failed with, if any.
    pub fn error(&self) -> Option<&DispatchError> {
        match &self.status {
            Status::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Visited node ids in visitation order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.outcomes.iter().map(|o| o.node).collect()
    }

    /// Handler values in visitation order, skipping unhandled nodes.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.outcomes.iter().filter_map(Outcome::value)
    }

    /// Convert into a `Result`, treating an abort as success.
    pub fn into_result(self) -> Result<Vec<Outcome<T>>, DispatchError> {
        match self.status {
            Status::Completed | Status::AbortedAt(_) => Ok(self.outcomes),
            Status::Failed(err) => Err(err),
        }
    }
}
