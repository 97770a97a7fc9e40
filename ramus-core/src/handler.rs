//! # Handlers
//!
//! A [`Handler`] is the behavior bound to one (operation, kind) pair. It is
//! invoked once per visited node and returns that node's outcome value; the
//! traversal directive travels through the [`Visit`] handle.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|visit: &mut Visit<'_, P>| Ok(...)`
//! 2. **Pinned closure**: `from_fn(|visit| Ok(...))`, when the closure's
//!    argument type cannot be inferred at the registration site
//! 3. **Struct implementation**: `impl Handler<P, T> for MyHandler`

use crate::{error::BoxError, visit::Visit};

/// Behavior registered for an (operation, kind) pair.
///
/// Returning `Err` halts the traversal with a handler failure.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle nodes with payload `{P}`",
    label = "missing `Handler<{P}, {T}>` implementation",
    note = "Handlers must implement `handle` returning `Result<{T}, BoxError>`."
)]
pub trait Handler<P, T>: Send + Sync + 'static {
    /// Process one node.
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError>;
}

// Blanket impl for closures
impl<P, T, F> Handler<P, T> for F
where
    F: Fn(&mut Visit<'_, P>) -> Result<T, BoxError> + Send + Sync + 'static,
{
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        (self)(visit)
    }
}

/// Pin a closure's signature so it can be passed where a [`Handler`] is
/// expected without annotating the argument.
///
/// ```rust
/// use ramus_core::{from_fn, Handler};
///
/// fn register<H: Handler<(), usize>>(_handler: H) {}
///
/// register(from_fn(|visit| Ok(visit.depth())));
/// ```
pub fn from_fn<P, T, F>(f: F) -> F
where
    F: Fn(&mut Visit<'_, P>) -> Result<T, BoxError> + Send + Sync + 'static,
{
    f
}
