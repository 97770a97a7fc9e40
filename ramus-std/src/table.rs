//! # Operation Table
//!
//! A two-key map from (operation name, node kind) to a [`Handler`], plus an
//! optional default handler per operation.
//!
//! Adding a kind is strictly additive: register handlers only for the
//! operations that need kind-specific behavior, and everything else falls
//! through to the operation's default or is explicitly unhandled.
//!
//! # Example
//!
//! ```rust
//! use ramus_core::{KindRegistry, from_fn};
//! use ramus_std::OperationTable;
//!
//! let mut kinds = KindRegistry::new();
//! let file = kinds.register("file");
//!
//! let mut table: OperationTable<(), String> = OperationTable::new();
//! table
//!     .register("display", file, from_fn(|v| Ok(format!("file at {}", v.depth()))))
//!     .register_default("display", from_fn(|v| Ok(v.kind_name().to_string())));
//!
//! assert!(table.resolve("display", file).is_some());
//! ```

use ramus_core::{Handler, NodeKind, Resolved, Resolver};
use std::{collections::HashMap, sync::Arc};

struct OperationEntry<P, T> {
    by_kind: HashMap<NodeKind, Arc<dyn Handler<P, T>>>,
    fallback: Option<Arc<dyn Handler<P, T>>>,
}

impl<P, T> Default for OperationEntry<P, T> {
    fn default() -> Self {
        Self {
            by_kind: HashMap::new(),
            fallback: None,
        }
    }
}

impl<P, T> OperationEntry<P, T> {
    fn is_empty(&self) -> bool {
        self.by_kind.is_empty() && self.fallback.is_none()
    }
}

/// Handlers keyed by (operation, kind), with per-operation defaults.
///
/// At most one handler exists per exact pair: registering again replaces
/// the earlier handler. Registration takes `&mut self`, so a table cannot be
/// edited while a dispatcher is borrowing it.
pub struct OperationTable<P, T> {
    operations: HashMap<String, OperationEntry<P, T>>,
}

impl<P: 'static, T: 'static> OperationTable<P, T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register `handler` for `(operation, kind)`, replacing any existing one.
    pub fn register<H: Handler<P, T>>(
        &mut self,
        operation: impl Into<String>,
        kind: NodeKind,
        handler: H,
    ) -> &mut Self {
        let operation = operation.into();
        let entry = self.operations.entry(operation).or_default();
        let replaced = entry.by_kind.insert(kind, Arc::new(handler)).is_some();

        #[cfg(feature = "tracing")]
        tracing::debug!(?kind, replaced, "handler registered");
        #[cfg(not(feature = "tracing"))]
        let _ = replaced;

        self
    }

    /// Register the fallback used when `operation` has no entry for a kind.
    pub fn register_default<H: Handler<P, T>>(
        &mut self,
        operation: impl Into<String>,
        handler: H,
    ) -> &mut Self {
        let operation = operation.into();
        let entry = self.operations.entry(operation).or_default();
        let replaced = entry.fallback.replace(Arc::new(handler)).is_some();

        #[cfg(feature = "tracing")]
        tracing::debug!(replaced, "default handler registered");
        #[cfg(not(feature = "tracing"))]
        let _ = replaced;

        self
    }

    /// Remove the handler for an exact pair. Returns `true` if one existed.
    pub fn unregister(&mut self, operation: &str, kind: NodeKind) -> bool {
        let Some(entry) = self.operations.get_mut(operation) else {
            return false;
        };
        let removed = entry.by_kind.remove(&kind).is_some();
        if entry.is_empty() {
            self.operations.remove(operation);
        }
        removed
    }

    /// Remove an operation's default handler. Returns `true` if one existed.
    pub fn unregister_default(&mut self, operation: &str) -> bool {
        let Some(entry) = self.operations.get_mut(operation) else {
            return false;
        };
        let removed = entry.fallback.take().is_some();
        if entry.is_empty() {
            self.operations.remove(operation);
        }
        removed
    }

    /// Returns `true` if an exact handler is registered for the pair.
    pub fn contains(&self, operation: &str, kind: NodeKind) -> bool {
        self.operations
            .get(operation)
            .is_some_and(|entry| entry.by_kind.contains_key(&kind))
    }

    /// Returns `true` if `operation` has a default handler.
    pub fn has_default(&self, operation: &str) -> bool {
        self.operations
            .get(operation)
            .is_some_and(|entry| entry.fallback.is_some())
    }

    /// Names of operations with at least one handler, in no particular order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Number of registered handlers, defaults included.
    pub fn len(&self) -> usize {
        self.operations
            .values()
            .map(|entry| entry.by_kind.len() + usize::from(entry.fallback.is_some()))
            .sum()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Exact match first, then the operation's default, else `None`.
    pub fn resolve(&self, operation: &str, kind: NodeKind) -> Option<Resolved<'_, P, T>> {
        let entry = self.operations.get(operation)?;
        if let Some(handler) = entry.by_kind.get(&kind) {
            return Some(Resolved::Exact(&**handler));
        }
        let fallback = entry.fallback.as_deref()?;
        Some(Resolved::Default(fallback))
    }
}

impl<P: 'static, T: 'static> Default for OperationTable<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static, T: 'static> Resolver<P, T> for OperationTable<P, T> {
    fn resolve(&self, operation: &str, kind: NodeKind) -> Option<Resolved<'_, P, T>> {
        OperationTable::resolve(self, operation, kind)
    }
}

impl<P, T> std::fmt::Debug for OperationTable<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (operation, entry) in &self.operations {
            map.entry(
                operation,
                &format_args!(
                    "{} kinds, default: {}",
                    entry.by_kind.len(),
                    entry.fallback.is_some()
                ),
            );
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramus_core::{KindRegistry, Node, Visit, from_fn};

    fn constant(value: &'static str) -> impl Handler<(), &'static str> {
        from_fn(move |_| Ok(value))
    }

    fn call(
        table: &OperationTable<(), &'static str>,
        node: &Node<()>,
        op: &str,
    ) -> Option<&'static str> {
        let resolved = table.resolve(op, node.kind())?;
        let mut visit = Visit::new(node, op, 0);
        resolved.handler().handle(&mut visit).ok()
    }

    #[test]
    fn test_exact_then_default_then_none() {
        let mut kinds = KindRegistry::new();
        let file = kinds.register("file");
        let folder = kinds.register("folder");
        let file_node = Node::new(&kinds, file, None).unwrap();
        let folder_node = Node::new(&kinds, folder, None).unwrap();

        let mut table = OperationTable::new();
        table
            .register("display", file, constant("exact"))
            .register_default("display", constant("default"));

        assert!(matches!(table.resolve("display", file), Some(Resolved::Exact(_))));
        assert!(table.resolve("display", folder).unwrap().is_default());
        assert!(table.resolve("size", file).is_none());

        assert_eq!(call(&table, &file_node, "display"), Some("exact"));
        assert_eq!(call(&table, &folder_node, "display"), Some("default"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut kinds = KindRegistry::new();
        let file = kinds.register("file");
        let node = Node::new(&kinds, file, None).unwrap();

        let mut table = OperationTable::new();
        table.register("display", file, constant("first"));
        table.register("display", file, constant("second"));

        assert_eq!(table.len(), 1);
        assert_eq!(call(&table, &node, "display"), Some("second"));
    }

    #[test]
    fn test_unregister() {
        let mut kinds = KindRegistry::new();
        let file = kinds.register("file");

        let mut table = OperationTable::new();
        table
            .register("display", file, constant("exact"))
            .register_default("display", constant("default"));

        assert!(table.unregister("display", file));
        assert!(!table.unregister("display", file));
        assert!(!table.contains("display", file));
        assert!(table.resolve("display", file).unwrap().is_default());

        assert!(table.unregister_default("display"));
        assert!(table.is_empty());
        assert_eq!(table.operations().count(), 0);
    }
}
