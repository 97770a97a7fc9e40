//! # ramus-std
//!
//! Standard implementations for the Ramus operation dispatch engine.
//!
//! This crate provides:
//! - **Operation table**: [`OperationTable`], handlers keyed by (operation, kind)
//! - **Dispatch engine**: [`Dispatcher`], pre-order traversal with [`Mode`] policies
//! - **Accumulation**: [`Accumulator`], [`Fold`], [`Inspect`]
//! - **Handler combinators**: Branch, Pruned, Traced
//! - **Testing utilities**: recording, counting and failing handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use ramus_core;

// Modules
pub mod accumulate;
pub mod engine;
pub mod handlers;
pub mod table;
pub mod testing;

pub use accumulate::{Accumulator, Discard, Fold, Folded, Inspect};
pub use engine::{Dispatcher, Mode};
pub use table::OperationTable;
