//! Per-node invocation context.

use crate::{
    kind::NodeKind,
    node::{Node, NodeId},
};

/// A handler's instruction to the engine about how traversal proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    /// Descend into this node's children before moving on.
    #[default]
    Continue,
    /// Do not descend; move on to the next sibling.
    SkipChildren,
    /// Stop the whole traversal after this node.
    Abort,
}

/// The context a [`Handler`] is invoked with.
///
/// Gives access to the node being visited and the operation being run, and
/// doubles as the traversal-control handle: the directive starts out as
/// [`Directive::Continue`] and the handler may change it.
///
/// [`Handler`]: crate::Handler
pub struct Visit<'a, P> {
    node: &'a Node<P>,
    operation: &'a str,
    depth: usize,
    directive: Directive,
}

impl<'a, P> Visit<'a, P> {
    /// Create a visit of `node` at `depth` (the root is at depth 0).
    pub fn new(node: &'a Node<P>, operation: &'a str, depth: usize) -> Self {
        Self {
            node,
            operation,
            depth,
            directive: Directive::Continue,
        }
    }

    /// The node being visited.
    pub fn node(&self) -> &'a Node<P> {
        self.node
    }

    /// Identity of the node being visited.
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Kind of the node being visited.
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Registered name of the node's kind.
    pub fn kind_name(&self) -> &'a str {
        self.node.kind_name()
    }

    /// The node's payload, if any.
    pub fn payload(&self) -> Option<&'a P> {
        self.node.payload()
    }

    /// Name of the operation being dispatched.
    pub fn operation(&self) -> &'a str {
        self.operation
    }

    /// Distance from the root of the run.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of children the engine would descend into.
    pub fn child_count(&self) -> usize {
        self.node.child_count()
    }

    /// The directive the engine will act on.
    pub fn directive(&self) -> Directive {
        self.directive
    }

    /// Replace the directive.
    pub fn set_directive(&mut self, directive: Directive) {
        self.directive = directive;
    }

    /// Do not descend into this node's children.
    pub fn skip_children(&mut self) {
        self.directive = Directive::SkipChildren;
    }

    /// Stop the traversal once this handler returns.
    pub fn abort(&mut self) {
        self.directive = Directive::Abort;
    }
}
