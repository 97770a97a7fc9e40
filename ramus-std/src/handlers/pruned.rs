//! Pruned Handler - Never descend below a node.

use ramus_core::{BoxError, Directive, Handler, Visit};

/// Runs the inner handler, then forces [`Directive::SkipChildren`].
///
/// An `Abort` left by the inner handler is kept; pruning never turns a stop
/// into a continue.
pub struct Pruned<H> {
    inner: H,
}

impl<H> Pruned<H> {
    /// Wrap `inner`.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<P, T, H: Handler<P, T>> Handler<P, T> for Pruned<H> {
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        let value = self.inner.handle(visit)?;
        if visit.directive() != Directive::Abort {
            visit.skip_children();
        }
        Ok(value)
    }
}
