#![allow(dead_code)]

use ramus::{BoxError, KindRegistry, Node, NodeKind, Visit};

// ============================================================================
// Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub name: String,
    pub size: u64,
}

impl Entry {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

// ============================================================================
// File System Fixture
// ============================================================================

/// `root(folder) -> [a(file), b(folder) -> [c(file)]]`
pub struct FileTree {
    pub kinds: KindRegistry,
    pub folder: NodeKind,
    pub file: NodeKind,
    pub root: Node<Entry>,
    pub a: Node<Entry>,
    pub b: Node<Entry>,
    pub c: Node<Entry>,
}

impl FileTree {
    pub fn new() -> Self {
        let mut kinds = KindRegistry::new();
        let folder = kinds.register("folder");
        let file = kinds.register("file");

        let root = Node::with_payload(&kinds, folder, Entry::new("root", 0)).unwrap();
        let a = Node::with_payload(&kinds, file, Entry::new("a.txt", 10)).unwrap();
        let b = Node::with_payload(&kinds, folder, Entry::new("sub", 0)).unwrap();
        let c = Node::with_payload(&kinds, file, Entry::new("c.doc", 32)).unwrap();

        root.add_child(a.clone()).unwrap();
        root.add_child(b.clone()).unwrap();
        b.add_child(c.clone()).unwrap();

        Self {
            kinds,
            folder,
            file,
            root,
            a,
            b,
            c,
        }
    }

    pub fn node(&self, kind: NodeKind, name: &str) -> Node<Entry> {
        Node::with_payload(&self.kinds, kind, Entry::new(name, 0)).unwrap()
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn name(visit: &mut Visit<'_, Entry>) -> Result<String, BoxError> {
    Ok(visit
        .payload()
        .map(|entry| entry.name.clone())
        .unwrap_or_default())
}

pub fn size(visit: &mut Visit<'_, Entry>) -> Result<u64, BoxError> {
    Ok(visit.payload().map_or(0, |entry| entry.size))
}

/// Names in outcome order, with `?` for unhandled nodes.
pub fn names(outcomes: &[ramus::Outcome<String>]) -> Vec<String> {
    outcomes
        .iter()
        .map(|o| o.value().cloned().unwrap_or_else(|| "?".to_string()))
        .collect()
}
