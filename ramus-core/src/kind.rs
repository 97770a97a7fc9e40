//! # Node Kinds
//!
//! A [`NodeKind`] names a category of node ("folder", "file",
//! "roller-coaster"). Kinds are minted by a [`KindRegistry`] and compare by
//! identity, so operation lookups never touch strings.
//!
//! Registries are explicitly constructed and passed around; there is no
//! process-wide kind table. Each registry carries its own identity, so a
//! kind minted by one registry is never mistaken for a kind of another.

use crate::node::NodeId;
use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU32, AtomicU64, Ordering},
    },
};

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(1);

/// An opaque, comparable identity for a category of node.
///
/// `NodeKind` is `Copy` and hashes in O(1); its human-readable name lives in
/// the [`KindRegistry`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKind {
    registry: u32,
    index: usize,
}

impl NodeKind {
    /// Position of this kind within its registry, in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind#{}.{}", self.registry, self.index)
    }
}

/// Assigns stable identities to node kinds.
///
/// # Example
///
/// ```rust
/// use ramus_core::KindRegistry;
///
/// let mut kinds = KindRegistry::new();
/// let folder = kinds.register("folder");
/// assert_eq!(kinds.register("folder"), folder);
/// assert!(kinds.exists(folder));
/// ```
#[derive(Debug)]
pub struct KindRegistry {
    id: u32,
    names: Vec<Arc<str>>,
    index: HashMap<Arc<str>, NodeKind>,
    next_node: AtomicU64,
}

impl KindRegistry {
    /// Create an empty registry with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            names: Vec::new(),
            index: HashMap::new(),
            next_node: AtomicU64::new(0),
        }
    }

    /// Register a kind by name.
    ///
    /// Idempotent: registering the same name again returns the same kind.
    pub fn register(&mut self, name: &str) -> NodeKind {
        if let Some(kind) = self.index.get(name) {
            return *kind;
        }
        let kind = NodeKind {
            registry: self.id,
            index: self.names.len(),
        };
        let name: Arc<str> = Arc::from(name);
        self.names.push(name.clone());
        self.index.insert(name, kind);
        kind
    }

    /// Look up a previously registered kind.
    pub fn get(&self, name: &str) -> Option<NodeKind> {
        self.index.get(name).copied()
    }

    /// Returns `true` if `kind` was issued by this registry.
    pub fn exists(&self, kind: NodeKind) -> bool {
        kind.registry == self.id && kind.index < self.names.len()
    }

    /// The name a kind was registered under.
    pub fn name(&self, kind: NodeKind) -> Option<&str> {
        self.shared_name(kind).map(|n| &**n)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no kinds have been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, &str)> + '_ {
        self.names.iter().enumerate().map(|(i, name)| {
            (
                NodeKind {
                    registry: self.id,
                    index: i,
                },
                &**name,
            )
        })
    }

    pub(crate) fn shared_name(&self, kind: NodeKind) -> Option<&Arc<str>> {
        if kind.registry != self.id {
            return None;
        }
        self.names.get(kind.index)
    }

    pub(crate) fn next_node_id(&self) -> NodeId {
        NodeId::new(self.id, self.next_node.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut kinds = KindRegistry::new();
        let a = kinds.register("folder");
        let b = kinds.register("file");
        assert_ne!(a, b);
        assert_eq!(kinds.register("folder"), a);
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_names_and_lookup() {
        let mut kinds = KindRegistry::new();
        let coaster = kinds.register("roller-coaster");
        assert_eq!(kinds.name(coaster), Some("roller-coaster"));
        assert_eq!(kinds.get("roller-coaster"), Some(coaster));
        assert_eq!(kinds.get("ferris-wheel"), None);
    }

    #[test]
    fn test_kinds_do_not_cross_registries() {
        let mut first = KindRegistry::new();
        let mut second = KindRegistry::new();
        let a = first.register("folder");
        let b = second.register("folder");

        assert_ne!(a, b);
        assert!(first.exists(a));
        assert!(!first.exists(b));
        assert_eq!(first.name(b), None);
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut kinds = KindRegistry::new();
        kinds.register("b");
        kinds.register("a");
        let names: Vec<_> = kinds.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_index_follows_registration_order() {
        let mut kinds = KindRegistry::new();
        let park = kinds.register("park");
        let coaster = kinds.register("roller-coaster");
        assert_eq!((park.index(), coaster.index()), (0, 1));
        assert_eq!(kinds.iter().map(|(k, _)| k.index()).collect::<Vec<_>>(), vec![0, 1]);
    }
}
