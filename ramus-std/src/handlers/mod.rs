//! Handler combinators.
//!
//! Small wrappers that build new handlers out of existing ones, so common
//! traversal policies don't have to be re-implemented per kind.

pub mod branch;
pub mod pruned;
pub mod traced;

pub use branch::Branch;
pub use pruned::Pruned;
pub use traced::Traced;
