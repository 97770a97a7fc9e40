//! Testing utilities for Ramus.
//!
//! This module provides handler doubles that make traversal behavior easy to
//! assert on.
//!
//! # Features
//!
//! - [`RecordingHandler`]: records every node it visits, with per-node directives
//! - [`CountingHandler`]: counts invocations
//! - [`FailingHandler`]: always reports failure

use ramus_core::{BoxError, Directive, Handler, NodeId, Visit};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records the nodes it visits and returns their ids.
///
/// Clones share the same record, so a clone can be registered while the
/// original is kept for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new().directive_at(b.id(), Directive::SkipChildren);
/// table.register_default("display", recorder.clone());
///
/// dispatcher.run(&root, "display", Mode::Strict);
/// assert_eq!(recorder.visits(), vec![root.id(), a.id(), b.id()]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    visits: Arc<Mutex<Vec<NodeId>>>,
    directive: Directive,
    overrides: HashMap<NodeId, Directive>,
}

impl RecordingHandler {
    /// Create a recording handler that always continues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording handler that leaves `directive` on every node.
    pub fn with_directive(directive: Directive) -> Self {
        Self {
            directive,
            ..Self::default()
        }
    }

    /// Leave `directive` on `node` instead of the default one.
    pub fn directive_at(mut self, node: NodeId, directive: Directive) -> Self {
        self.overrides.insert(node, directive);
        self
    }

    /// Get a copy of the visited node ids, in visitation order.
    pub fn visits(&self) -> Vec<NodeId> {
        self.lock().clone()
    }

    /// Get the number of recorded visits.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Clear all recorded visits.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<NodeId>> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P> Handler<P, NodeId> for RecordingHandler {
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<NodeId, BoxError> {
        let id = visit.id();
        self.lock().push(id);
        visit.set_directive(self.overrides.get(&id).copied().unwrap_or(self.directive));
        Ok(id)
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and returns the running count.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<P> Handler<P, usize> for CountingHandler {
    fn handle(&self, _visit: &mut Visit<'_, P>) -> Result<usize, BoxError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with the given message.
#[derive(Clone, Debug)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a failing handler.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<P, T> Handler<P, T> for FailingHandler {
    fn handle(&self, _visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        Err(self.message.clone().into())
    }
}
