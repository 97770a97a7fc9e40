//! Traced Handler - Instrument a handler with a `tracing` span.

use ramus_core::{BoxError, Handler, Visit};

/// A handler wrapper that instruments execution with a `tracing` span.
///
/// The span records the handler name, the operation, the node and its kind.
/// Without the `tracing` feature this is a transparent passthrough.
pub struct Traced<H> {
    inner: H,
    name: &'static str,
}

impl<H> Traced<H> {
    /// Create a new `Traced` wrapper around a handler.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The name recorded on the span.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H: Clone> Clone for Traced<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<P, T, H: Handler<P, T>> Handler<P, T> for Traced<H> {
    #[cfg(feature = "tracing")]
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        let span = tracing::info_span!(
            "handle",
            handler = %self.name,
            operation = %visit.operation(),
            node = %visit.id(),
            kind = %visit.kind_name(),
            depth = visit.depth(),
        );
        let _entered = span.enter();
        let result = self.inner.handle(visit);
        if let Err(err) = &result {
            tracing::error!(error = %err, "handler failed");
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        self.inner.handle(visit)
    }
}
