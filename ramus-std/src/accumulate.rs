//! # Result Accumulation
//!
//! Folds per-node outcomes into one value for the whole traversal. The
//! dispatcher feeds an [`Accumulator`] every outcome it records, in
//! visitation order, `Unhandled` outcomes included. Nothing that was
//! recorded is ever skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! let folded = dispatcher.fold(&root, "size", Mode::Lenient, 0u64, |total, outcome| {
//!     total + outcome.value().copied().unwrap_or(0)
//! });
//! assert!(folded.result.is_completed());
//! ```

use ramus_core::{Outcome, TraversalResult};

/// Receives each recorded outcome as the traversal produces it.
pub trait Accumulator<T> {
    /// Observe one outcome.
    fn accumulate(&mut self, outcome: &Outcome<T>);
}

impl<T, A: Accumulator<T> + ?Sized> Accumulator<T> for &mut A {
    fn accumulate(&mut self, outcome: &Outcome<T>) {
        (**self).accumulate(outcome);
    }
}

/// An accumulator that ignores every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<T> Accumulator<T> for Discard {
    fn accumulate(&mut self, _outcome: &Outcome<T>) {}
}

/// Folds outcomes with `(accumulator, outcome) -> accumulator`.
pub struct Fold<A, F> {
    acc: Option<A>,
    f: F,
}

impl<A, F> Fold<A, F> {
    /// Start a fold from `init`.
    pub fn new(init: A, f: F) -> Self {
        Self { acc: Some(init), f }
    }

    /// The value folded so far.
    ///
    /// `None` only if the fold function panicked mid-step and the panic was
    /// caught by the caller.
    pub fn get(&self) -> Option<&A> {
        self.acc.as_ref()
    }

    /// Finish the fold.
    pub fn into_inner(self) -> Option<A> {
        self.acc
    }
}

impl<A, T, F> Accumulator<T> for Fold<A, F>
where
    F: FnMut(A, &Outcome<T>) -> A,
{
    fn accumulate(&mut self, outcome: &Outcome<T>) {
        if let Some(acc) = self.acc.take() {
            self.acc = Some((self.f)(acc, outcome));
        }
    }
}

/// Calls `f` for each outcome, for side effects such as printing.
pub struct Inspect<F>(pub F);

impl<T, F> Accumulator<T> for Inspect<F>
where
    F: FnMut(&Outcome<T>),
{
    fn accumulate(&mut self, outcome: &Outcome<T>) {
        (self.0)(outcome);
    }
}

/// A folded value together with the traversal that produced it.
#[derive(Debug)]
pub struct Folded<A, T> {
    /// The folded value.
    pub value: A,
    /// The traversal's outcomes and status.
    pub result: TraversalResult<T>,
}
