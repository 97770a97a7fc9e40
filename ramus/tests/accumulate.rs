//! Result accumulation tests.

use ramus::{Dispatcher, Fold, Inspect, Mode, OperationTable, Outcome, Verdict};

mod common;
use common::{FileTree, size};

#[test]
fn test_fold_total_size() {
    let tree = FileTree::new();
    let mut table = OperationTable::new();
    table.register_default("size", size);

    let folded = Dispatcher::new(&table).fold(
        &tree.root,
        "size",
        Mode::Strict,
        0,
        |total, outcome| total + outcome.value().copied().unwrap_or(0),
    );

    assert!(folded.result.is_completed());
    assert_eq!(folded.value, 42);
}

#[test]
fn test_fold_sees_unhandled_outcomes() {
    let tree = FileTree::new();
    let mut table = OperationTable::new();
    table.register("size", tree.file, size);

    // Root is unhandled, so lenient mode skips everything below it.
    let folded = Dispatcher::new(&table).fold(
        &tree.root,
        "size",
        Mode::Lenient,
        Vec::new(),
        |mut seen, outcome: &Outcome<u64>| {
            seen.push(matches!(outcome.verdict, Verdict::Unhandled));
            seen
        },
    );
    assert_eq!(folded.value, vec![true]);
    assert_eq!(folded.result.outcomes.len(), 1);

    table.register("size", tree.folder, size);
    let folded =
        Dispatcher::new(&table).fold(&tree.root, "size", Mode::Lenient, 0, |n, _| n + 1);
    assert_eq!(folded.value, 4);
}

#[test]
fn test_fold_stops_with_abort() {
    let tree = FileTree::new();
    let abort_at_a = tree.a.id();
    let mut table = OperationTable::new();
    table.register_default(
        "size",
        ramus::from_fn(move |visit| {
            if visit.id() == abort_at_a {
                visit.abort();
            }
            size(visit)
        }),
    );

    let folded = Dispatcher::new(&table).fold(
        &tree.root,
        "size",
        Mode::Strict,
        0,
        |total, outcome| total + outcome.value().copied().unwrap_or(0),
    );

    assert_eq!(folded.value, 10);
    assert_eq!(folded.result.aborted_at(), Some(tree.a.id()));
}

#[test]
fn test_inspect_renders_lines() {
    let tree = FileTree::new();
    let mut table = OperationTable::new();
    table.register_default("display", common::name);

    let mut lines = Vec::new();
    let result = Dispatcher::new(&table).run_with(
        &tree.root,
        "display",
        Mode::Strict,
        Inspect(|outcome: &Outcome<String>| {
            let name = outcome.value().map_or("", String::as_str);
            lines.push(format!("{}{name}", "  ".repeat(outcome.depth)));
        }),
    );

    assert!(result.is_completed());
    assert_eq!(lines, vec!["root", "  a.txt", "  sub", "    c.doc"]);
}

#[test]
fn test_reusable_fold_across_runs() {
    let tree = FileTree::new();
    let mut table = OperationTable::new();
    table.register_default("size", size);
    let dispatcher = Dispatcher::new(&table);

    let mut fold = Fold::new(0, |total: u64, outcome: &Outcome<u64>| {
        total + outcome.value().copied().unwrap_or(0)
    });
    dispatcher.run_with(&tree.root, "size", Mode::Strict, &mut fold);
    dispatcher.run_with(&tree.b, "size", Mode::Strict, &mut fold);

    assert_eq!(fold.into_inner(), Some(42 + 32));
}
