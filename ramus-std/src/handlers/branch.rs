//! Branch Handler - Choose between two handlers per visit.

use ramus_core::{BoxError, Handler, Visit};

/// A handler that delegates to one of two inner handlers.
///
/// When `condition(visit)` is `true`, `then_handler` runs, otherwise
/// `else_handler` does. The condition sees the same visit the chosen handler
/// will, so it can branch on payload, depth or child count.
///
/// # Example
///
/// ```rust,ignore
/// use ramus_std::handlers::Branch;
///
/// // Only descend into the first two levels
/// let shallow = Branch::new(
///     |visit: &Visit<'_, Entry>| visit.depth() < 2,
///     describe,
///     Pruned::new(describe),
/// );
/// ```
pub struct Branch<C, A, B> {
    condition: C,
    then_handler: A,
    else_handler: B,
}

impl<C, A, B> Branch<C, A, B> {
    /// Create a new `Branch`.
    pub fn new<P>(condition: C, then_handler: A, else_handler: B) -> Self
    where
        C: Fn(&Visit<'_, P>) -> bool,
    {
        Self {
            condition,
            then_handler,
            else_handler,
        }
    }
}

impl<P, T, C, A, B> Handler<P, T> for Branch<C, A, B>
where
    C: Fn(&Visit<'_, P>) -> bool + Send + Sync + 'static,
    A: Handler<P, T>,
    B: Handler<P, T>,
{
    fn handle(&self, visit: &mut Visit<'_, P>) -> Result<T, BoxError> {
        if (self.condition)(visit) {
            self.then_handler.handle(visit)
        } else {
            self.else_handler.handle(visit)
        }
    }
}
