//! # ramus - Open-Ended Operation Dispatch over Trees
//!
//! `ramus` applies a growable set of named operations to a growable set of
//! node kinds arranged in a tree. Both axes stay open: a new kind never
//! forces a change to existing operations, and a new operation never forces
//! a change to existing kinds.
//!
//! ## Quick Start
//!
//! ```rust
//! use ramus::prelude::*;
//!
//! let mut kinds = KindRegistry::new();
//! let folder = kinds.register("folder");
//! let file = kinds.register("file");
//!
//! let root = Node::with_payload(&kinds, folder, "root")?;
//! root.add_child(Node::with_payload(&kinds, file, "a.txt")?)?;
//!
//! let mut table: OperationTable<&str, String> = OperationTable::new();
//! table.register_default(
//!     "display",
//!     from_fn(|v| {
//!         let name = v.payload().copied().unwrap_or("?");
//!         Ok(format!("{}{name}", "-".repeat(v.depth())))
//!     }),
//! );
//!
//! let lines = Dispatcher::new(&table)
//!     .run(&root, "display", Mode::Strict)
//!     .into_result()?;
//! let lines: Vec<_> = lines.iter().filter_map(Outcome::value).cloned().collect();
//! assert_eq!(lines, vec!["root", "-a.txt"]);
//! # Ok::<(), ramus::RamusError>(())
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use ramus_core::{
    // Errors
    BoxError,
    // Node model
    Children,
    ChildrenMut,
    // Traversal control
    Directive,
    DispatchError,
    // Handler
    Handler,
    KindRegistry,
    Node,
    NodeId,
    NodeKind,
    // Outcomes
    Outcome,
    RamusError,
    // Resolution
    Resolved,
    Resolver,
    Status,
    StructureError,
    TraversalResult,
    Verdict,
    Visit,
    from_fn,
};

pub use ramus_std::{
    Accumulator, Discard, Dispatcher, Fold, Folded, Inspect, Mode, OperationTable,
};

/// Handler combinators.
pub mod handlers {
    pub use ramus_std::handlers::{Branch, Pruned, Traced};
}

/// Testing utilities.
pub mod testing {
    pub use ramus_std::testing::{CountingHandler, FailingHandler, RecordingHandler};
}

/// Prelude module - common imports for Ramus.
///
/// # Usage
///
/// ```rust,ignore
/// use ramus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Traversal control
        Directive,
        // Engine
        Dispatcher,
        // Errors
        DispatchError,
        // Core traits
        Handler,
        KindRegistry,
        Mode,
        Node,
        NodeId,
        NodeKind,
        OperationTable,
        Outcome,
        RamusError,
        Resolver,
        Status,
        StructureError,
        TraversalResult,
        Verdict,
        Visit,
        from_fn,
    };
}
