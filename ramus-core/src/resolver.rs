//! # Handler Resolution
//!
//! The seam between the dispatch engine and whatever stores handlers. The
//! engine only ever asks one question, "who handles this operation on this
//! kind?", and a [`Resolver`] answers it.
//!
//! Resolution is two-tier: an exact (operation, kind) entry wins, then the
//! operation's default. Kinds have no hierarchy, so there is nothing else to
//! fall back to.

use crate::{handler::Handler, kind::NodeKind};

/// A resolved handler and which tier it came from.
pub enum Resolved<'a, P, T> {
    /// Registered for this exact (operation, kind) pair.
    Exact(&'a dyn Handler<P, T>),
    /// The operation's default handler.
    Default(&'a dyn Handler<P, T>),
}

impl<'a, P, T> Resolved<'a, P, T> {
    /// The handler to invoke.
    pub fn handler(&self) -> &'a dyn Handler<P, T> {
        match *self {
            Resolved::Exact(handler) | Resolved::Default(handler) => handler,
        }
    }

    /// Returns `true` if this came from the default tier.
    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Default(_))
    }
}

impl<P, T> Clone for Resolved<'_, P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, T> Copy for Resolved<'_, P, T> {}

impl<P, T> std::fmt::Debug for Resolved<'_, P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Exact(_) => f.write_str("Resolved::Exact"),
            Resolved::Default(_) => f.write_str("Resolved::Default"),
        }
    }
}

/// Looks up the handler for an (operation, kind) pair.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot resolve handlers for payload `{P}` and output `{T}`",
    label = "missing `Resolver` implementation",
    note = "Implement `Resolver<{P}, {T}>` or use an `OperationTable`."
)]
pub trait Resolver<P, T> {
    /// Exact match first, then the operation's default, else `None`.
    fn resolve(&self, operation: &str, kind: NodeKind) -> Option<Resolved<'_, P, T>>;
}

impl<P, T, R: Resolver<P, T> + ?Sized> Resolver<P, T> for &R {
    fn resolve(&self, operation: &str, kind: NodeKind) -> Option<Resolved<'_, P, T>> {
        (**self).resolve(operation, kind)
    }
}
