//! # Nodes
//!
//! A [`Node`] is one element of a recursive hierarchy: a kind tag, an
//! optional payload, and an ordered list of children. Children are appended
//! in insertion order and that order is the order they are visited in.
//!
//! `Node` is a handle. Cloning it is O(1) and yields another reference to the
//! same node, which is how a tree is shared read-only across several runs.
//! The child list sits behind a lock so structural edits can be serialized
//! against traversal; see [`Node::edit`].
//!
//! # Ownership
//!
//! Nodes form a strict tree. Each node records a weak link to the parent it
//! was attached to, and a node that already has a live parent cannot be
//! attached a second time, under another parent or the same one. Detach it
//! with [`Node::remove_child`] first to move it. Dropping the last handle to
//! a node frees its whole subtree, iteratively, so deep trees are safe to
//! drop.

use crate::{
    error::StructureError,
    kind::{KindRegistry, NodeKind},
};
use std::{
    collections::HashSet,
    fmt, mem,
    ops::Deref,
    sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak},
};

/// Identity of a node, unique among nodes created through one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    registry: u32,
    serial: u64,
}

impl NodeId {
    pub(crate) fn new(registry: u32, serial: u64) -> Self {
        Self { registry, serial }
    }

    /// Creation order of the node within its registry.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.serial)
    }
}

struct NodeInner<P> {
    id: NodeId,
    kind: NodeKind,
    kind_name: Arc<str>,
    payload: Option<P>,
    parent: Mutex<Weak<NodeInner<P>>>,
    children: RwLock<Vec<Node<P>>>,
}

impl<P> NodeInner<P> {
    fn parent(&self) -> Option<Arc<NodeInner<P>>> {
        self.parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }
}

impl<P> Drop for NodeInner<P> {
    // Children whose last handle is this node are unlinked onto a work stack
    // instead of being dropped recursively.
    fn drop(&mut self) {
        let children = self
            .children
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        let mut stack = mem::take(children);
        while let Some(node) = stack.pop() {
            if let Some(mut inner) = Arc::into_inner(node.inner) {
                let grandchildren = inner
                    .children
                    .get_mut()
                    .unwrap_or_else(PoisonError::into_inner);
                stack.append(grandchildren);
            }
        }
    }
}

/// A node in a dispatchable tree.
///
/// # Example
///
/// ```rust
/// use ramus_core::{KindRegistry, Node};
///
/// let mut kinds = KindRegistry::new();
/// let folder = kinds.register("folder");
/// let file = kinds.register("file");
///
/// let root = Node::with_payload(&kinds, folder, "root").unwrap();
/// root.add_child(Node::with_payload(&kinds, file, "a.txt").unwrap()).unwrap();
/// assert_eq!(root.child_count(), 1);
/// ```
pub struct Node<P> {
    inner: Arc<NodeInner<P>>,
}

impl<P> Node<P> {
    /// Create a node of `kind`.
    ///
    /// Fails with [`StructureError::InvalidKind`] if `registry` never issued
    /// `kind`.
    pub fn new(
        registry: &KindRegistry,
        kind: NodeKind,
        payload: Option<P>,
    ) -> Result<Self, StructureError> {
        let kind_name = registry
            .shared_name(kind)
            .ok_or(StructureError::InvalidKind { kind })?
            .clone();
        Ok(Self {
            inner: Arc::new(NodeInner {
                id: registry.next_node_id(),
                kind,
                kind_name,
                payload,
                parent: Mutex::new(Weak::new()),
                children: RwLock::new(Vec::new()),
            }),
        })
    }

    /// Create a node carrying `payload`.
    pub fn with_payload(
        registry: &KindRegistry,
        kind: NodeKind,
        payload: P,
    ) -> Result<Self, StructureError> {
        Self::new(registry, kind, Some(payload))
    }

    /// This node's identity.
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// The kind fixed at construction.
    pub fn kind(&self) -> NodeKind {
        self.inner.kind
    }

    /// The name the kind was registered under.
    pub fn kind_name(&self) -> &str {
        &self.inner.kind_name
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&P> {
        self.inner.payload.as_ref()
    }

    /// The node this one is attached under, if it is still alive.
    pub fn parent(&self) -> Option<Node<P>> {
        self.inner.parent().map(|inner| Node { inner })
    }

    /// A read-only view of the children, in insertion order.
    ///
    /// The view holds a shared lock; drop it before editing this node.
    pub fn children(&self) -> Children<'_, P> {
        Children {
            guard: self
                .inner
                .children
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Acquire exclusive access to the child list.
    ///
    /// The lock is released when the guard drops, on every exit path.
    pub fn edit(&self) -> ChildrenMut<'_, P> {
        ChildrenMut {
            owner: self,
            guard: self
                .inner
                .children
                .write()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Append `child`.
    ///
    /// Fails with [`StructureError::CycleDetected`] if `child` is `self` or
    /// one of its ancestors, and with [`StructureError::AlreadyAttached`] if
    /// `child` already has a parent. The check walks up from `self`, so its
    /// cost is the depth of `self`.
    pub fn add_child(&self, child: Node<P>) -> Result<(), StructureError> {
        self.edit().push(child)
    }

    /// Append `child` and return `self`, for building trees top-down.
    pub fn with_child(self, child: Node<P>) -> Result<Self, StructureError> {
        self.add_child(child)?;
        Ok(self)
    }

    /// Append `child` without any ownership or cycle checks.
    ///
    /// The parent link is not recorded, so `child` can still be attached
    /// elsewhere. A cycle introduced here is caught when a traversal reaches
    /// it; break it with [`ChildrenMut::clear`] before dropping the tree.
    pub fn attach_unchecked(&self, child: Node<P>) {
        self.edit().push_unchecked(child);
    }

    /// Remove the first child that is `child` (by identity) and detach it.
    ///
    /// Returns `false` and leaves the list untouched if it is not present.
    pub fn remove_child(&self, child: &Node<P>) -> bool {
        self.edit().remove(child).is_some()
    }

    /// Returns `true` if `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Node<P>) -> bool {
        reaches(self, other.id())
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Node<P>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // Self, then each recorded ancestor. Parent links are only set by checked
    // attachment, so the chain always ends.
    fn lineage_contains(&self, target: NodeId) -> bool {
        let mut current = Some(Arc::clone(&self.inner));
        while let Some(inner) = current {
            if inner.id == target {
                return true;
            }
            current = inner.parent();
        }
        false
    }

    fn adopt(&self, child: &Node<P>) -> Result<(), StructureError> {
        if self.lineage_contains(child.id()) {
            return Err(StructureError::CycleDetected { node: self.id() });
        }
        let mut parent = child
            .inner
            .parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = parent.upgrade() {
            return Err(StructureError::AlreadyAttached {
                node: child.id(),
                parent: current.id,
            });
        }
        *parent = Arc::downgrade(&self.inner);
        Ok(())
    }

    fn release(&self, child: &Node<P>) {
        let mut parent = child
            .inner
            .parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if parent.upgrade().is_some_and(|p| Arc::ptr_eq(&p, &self.inner)) {
            *parent = Weak::new();
        }
    }
}

// Downward scan with a visited set, so a subtree made cyclic through
// `attach_unchecked` cannot loop forever.
fn reaches<P>(from: &Node<P>, target: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![from.clone()];
    while let Some(node) = stack.pop() {
        if node.id() == target {
            return true;
        }
        if !seen.insert(node.id()) {
            continue;
        }
        stack.extend(node.children().iter().cloned());
    }
    false
}

impl<P> Clone for Node<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> fmt::Debug for Node<P> {
    // Children are summarized so a cyclic graph still prints.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind_name)
            .field("children", &self.child_count())
            .finish()
    }
}

/// Shared, read-only view of a node's children.
pub struct Children<'a, P> {
    guard: RwLockReadGuard<'a, Vec<Node<P>>>,
}

impl<P> Deref for Children<'_, P> {
    type Target = [Node<P>];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Exclusive access to a node's children.
///
/// Obtained from [`Node::edit`]. Mutations through the guard keep the same
/// ownership and cycle checks as the methods on [`Node`]. Reordering is
/// allowed, replacing a child in place is not.
pub struct ChildrenMut<'a, P> {
    owner: &'a Node<P>,
    guard: RwLockWriteGuard<'a, Vec<Node<P>>>,
}

impl<P> ChildrenMut<'_, P> {
    /// Append `child`, attaching it to the owner.
    pub fn push(&mut self, child: Node<P>) -> Result<(), StructureError> {
        self.owner.adopt(&child)?;
        self.guard.push(child);
        Ok(())
    }

    /// Append `child` without ownership or cycle checks.
    pub fn push_unchecked(&mut self, child: Node<P>) {
        self.guard.push(child);
    }

    /// Remove the first occurrence of `child`, detach it and return it.
    pub fn remove(&mut self, child: &Node<P>) -> Option<Node<P>> {
        let position = self.guard.iter().position(|c| c.ptr_eq(child))?;
        let removed = self.guard.remove(position);
        self.owner.release(&removed);
        Some(removed)
    }

    /// Remove and detach every child.
    pub fn clear(&mut self) {
        for child in self.guard.drain(..) {
            self.owner.release(&child);
        }
    }

    /// Swap the children at positions `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.guard.swap(a, b);
    }

    /// Reverse the visiting order of the children.
    pub fn reverse(&mut self) {
        self.guard.reverse();
    }
}

impl<P> Deref for ChildrenMut<'_, P> {
    type Target = [Node<P>];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}
