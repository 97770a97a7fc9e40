//! # Dispatch Engine
//!
//! Walks a [`Node`] tree depth-first, resolves a handler for each node's
//! kind and invokes it, honoring the directive the handler leaves on its
//! [`Visit`].
//!
//! # Ordering
//!
//! Visitation is deterministic pre-order: a node before its children,
//! children in insertion order, a subtree before the next sibling.
//!
//! # Termination
//!
//! | Event | Effect |
//! |-------|--------|
//! | `Directive::Continue` | descend into children |
//! | `Directive::SkipChildren` | move on to the next sibling |
//! | `Directive::Abort` | stop, status `AbortedAt(node)` |
//! | no handler, lenient | record `Unhandled`, skip children |
//! | no handler, strict | stop, status `Failed(Unhandled)` |
//! | handler error | stop, status `Failed(HandlerFailure)` |
//! | node already on the active path | stop, status `Failed(CycleDetected)` |
//!
//! A run is synchronous and occupies the calling thread until it finishes.
//! Cancellation from outside is expressed by a handler returning `Abort`.

use crate::accumulate::{Accumulator, Discard, Folded};
use ramus_core::{
    Directive, DispatchError, Node, NodeId, Outcome, Resolver, Status, StructureError,
    TraversalResult, Verdict, Visit,
};
use std::collections::HashSet;

/// Policy for nodes no handler resolves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Record an `Unhandled` outcome, skip the node's children, carry on.
    #[default]
    Lenient,
    /// Fail the traversal.
    Strict,
}

enum Step<P> {
    Enter(Node<P>, usize),
    Leave(NodeId),
}

/// Runs named operations over trees using handlers from a [`Resolver`].
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(&table);
/// let result = dispatcher.run(&root, "display", Mode::Strict);
/// assert!(result.is_completed());
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    resolver: R,
}

impl<R> Dispatcher<R> {
    /// Create a dispatcher over `resolver`, usually `&OperationTable`.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The resolver handlers are looked up in.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Take the resolver back.
    pub fn into_inner(self) -> R {
        self.resolver
    }

    /// Run `operation` over the tree rooted at `root`.
    pub fn run<P, T>(&self, root: &Node<P>, operation: &str, mode: Mode) -> TraversalResult<T>
    where
        R: Resolver<P, T>,
        P: 'static,
        T: 'static,
    {
        self.run_with(root, operation, mode, Discard)
    }

    /// Run `operation`, folding outcomes with `f` in visitation order.
    ///
    /// `f` is called exactly once per recorded outcome, `Unhandled` ones
    /// included, after the traversal has ended.
    pub fn fold<P, T, A, F>(
        &self,
        root: &Node<P>,
        operation: &str,
        mode: Mode,
        init: A,
        f: F,
    ) -> Folded<A, T>
    where
        R: Resolver<P, T>,
        P: 'static,
        T: 'static,
        F: FnMut(A, &Outcome<T>) -> A,
    {
        let result = self.run(root, operation, mode);
        let value = result.outcomes.iter().fold(init, f);
        Folded { value, result }
    }

    /// Run `operation`, feeding each recorded outcome to `acc`.
    pub fn run_with<P, T, A>(
        &self,
        root: &Node<P>,
        operation: &str,
        mode: Mode,
        mut acc: A,
    ) -> TraversalResult<T>
    where
        R: Resolver<P, T>,
        P: 'static,
        T: 'static,
        A: Accumulator<T>,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("dispatch", operation, ?mode, root = %root.id()).entered();

        let mut outcomes = Vec::new();
        let mut record = |outcome: Outcome<T>| {
            acc.accumulate(&outcome);
            outcomes.push(outcome);
        };

        let mut active = HashSet::new();
        let mut stack = vec![Step::Enter(root.clone(), 0)];

        let status = loop {
            let (node, depth) = match stack.pop() {
                None => break Status::Completed,
                Some(Step::Leave(id)) => {
                    active.remove(&id);
                    continue;
                }
                Some(Step::Enter(node, depth)) => (node, depth),
            };
            let id = node.id();

            if active.contains(&id) {
                #[cfg(feature = "tracing")]
                tracing::warn!(node = %id, "cycle detected");
                break Status::Failed(StructureError::CycleDetected { node: id }.into());
            }

            let Some(resolved) = self.resolver.resolve(operation, node.kind()) else {
                match mode {
                    Mode::Strict => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(node = %id, kind = node.kind_name(), "unhandled in strict mode");
                        break Status::Failed(DispatchError::Unhandled {
                            operation: operation.to_string(),
                            kind: node.kind_name().to_string(),
                        });
                    }
                    Mode::Lenient => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(node = %id, kind = node.kind_name(), "unhandled");
                        record(outcome(&node, depth, Verdict::Unhandled));
                        continue;
                    }
                }
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(node = %id, depth, default = resolved.is_default(), "visit");

            let mut visit = Visit::new(&node, operation, depth);
            let value = match resolved.handler().handle(&mut visit) {
                Ok(value) => value,
                Err(source) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(node = %id, error = %source, "handler failed");
                    break Status::Failed(DispatchError::HandlerFailure {
                        kind: node.kind_name().to_string(),
                        node: id,
                        source,
                    });
                }
            };
            let directive = visit.directive();
            record(outcome(&node, depth, Verdict::Handled(value)));

            match directive {
                Directive::Continue => {
                    let children = node.children().to_vec();
                    if !children.is_empty() {
                        active.insert(id);
                        stack.push(Step::Leave(id));
                        stack.extend(
                            children
                                .into_iter()
                                .rev()
                                .map(|child| Step::Enter(child, depth + 1)),
                        );
                    }
                }
                Directive::SkipChildren => {}
                Directive::Abort => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(node = %id, "aborted");
                    break Status::AbortedAt(id);
                }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(visited = outcomes.len(), ?status, "dispatch finished");

        TraversalResult { outcomes, status }
    }
}

fn outcome<P, T>(node: &Node<P>, depth: usize, verdict: Verdict<T>) -> Outcome<T> {
    Outcome {
        node: node.id(),
        kind: node.kind(),
        kind_name: node.kind_name().into(),
        depth,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OperationTable, testing::RecordingHandler};
    use ramus_core::{KindRegistry, NodeKind};

    struct Fixture {
        kinds: KindRegistry,
        folder: NodeKind,
        file: NodeKind,
    }

    impl Fixture {
        fn new() -> Self {
            let mut kinds = KindRegistry::new();
            let folder = kinds.register("folder");
            let file = kinds.register("file");
            Self {
                kinds,
                folder,
                file,
            }
        }

        fn node(&self, kind: NodeKind) -> Node<()> {
            Node::new(&self.kinds, kind, None).unwrap()
        }
    }

    #[test]
    fn test_depth_is_tracked() {
        let fx = Fixture::new();
        let root = fx.node(fx.folder);
        let mid = fx.node(fx.folder);
        let leaf = fx.node(fx.file);
        root.add_child(mid.clone()).unwrap();
        mid.add_child(leaf.clone()).unwrap();

        let mut table = OperationTable::new();
        table.register_default("depth", ramus_core::from_fn(|v| Ok(v.depth())));

        let result = Dispatcher::new(&table).run(&root, "depth", Mode::Strict);
        let depths: Vec<_> = result.values().copied().collect();
        assert_eq!(depths, vec![0, 1, 2]);
        assert!(result.is_completed());
    }

    #[test]
    fn test_lenient_unhandled_skips_children() {
        let fx = Fixture::new();
        let root = fx.node(fx.folder);
        let inner = fx.node(fx.folder);
        root.add_child(inner.clone()).unwrap();
        inner.add_child(fx.node(fx.file)).unwrap();

        let recorder = RecordingHandler::new();
        let mut table = OperationTable::new();
        table.register("op", fx.file, recorder.clone());

        let result = Dispatcher::new(&table).run(&root, "op", Mode::Lenient);
        assert_eq!(result.outcomes.len(), 1);
        assert!(result.outcomes[0].is_unhandled());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_moved_node_is_visited_once() {
        let fx = Fixture::new();
        let root = fx.node(fx.folder);
        let left = fx.node(fx.folder);
        let right = fx.node(fx.folder);
        let moved = fx.node(fx.file);
        root.add_child(left.clone()).unwrap();
        root.add_child(right.clone()).unwrap();
        left.add_child(moved.clone()).unwrap();

        assert!(right.add_child(moved.clone()).is_err());
        assert!(left.remove_child(&moved));
        right.add_child(moved.clone()).unwrap();

        let mut table = OperationTable::new();
        table.register_default("op", RecordingHandler::new());

        let result = Dispatcher::new(&table).run(&root, "op", Mode::Strict);
        assert!(result.is_completed());
        assert_eq!(
            result.node_ids(),
            vec![root.id(), left.id(), right.id(), moved.id()]
        );
    }

    #[test]
    fn test_self_loop_is_detected() {
        let fx = Fixture::new();
        let root = fx.node(fx.folder);
        root.attach_unchecked(root.clone());

        let mut table = OperationTable::new();
        table.register_default("op", RecordingHandler::new());

        let result = Dispatcher::new(&table).run(&root, "op", Mode::Lenient);
        assert!(result.error().is_some_and(DispatchError::is_cycle));
        assert_eq!(result.node_ids(), vec![root.id()]);
        root.edit().clear();
    }
}
