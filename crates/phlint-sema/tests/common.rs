//! Shared helpers for diagnostics tests.
#![allow(dead_code, unused_imports)]

use std::path::Path;

pub use phlint_sema::Report;

const FIXTURE: &str = "/fixtures/input.php";
const EXTERN: &str = "/fixtures/extern.php";

/// Lints a snippet against an index seeded with the built-ins plus
/// the snippet's own declarations.
pub fn check(source: &str) -> Report {
    check_with("<?php\n", source)
}

/// Like [`check`], with a second snippet indexed first so the main
/// one can reference symbols declared elsewhere.
pub fn check_with(declarations: &str, source: &str) -> Report {
    let mut index = phlint_index::SymbolIndex::with_builtins();
    let extern_parse = phlint_syntax::parse(declarations);
    phlint_index::index_file(&mut index, Path::new(EXTERN), &extern_parse);
    let parse = phlint_syntax::parse(source);
    phlint_index::index_file(&mut index, Path::new(FIXTURE), &parse);
    phlint_sema::lint(&index, Path::new(FIXTURE), source).expect("fixture file is indexed")
}

/// Asserts a report with no findings at all.
pub fn check_clean(source: &str) {
    let report = check(source);
    assert!(
        report.is_empty(),
        "expected a clean report, got: {}",
        serde_json::to_string_pretty(&report).unwrap()
    );
}

/// The unknown-class names, in report order.
pub fn unknown_names(report: &Report) -> Vec<String> {
    report
        .errors
        .unknown_classes
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

/// The unused-import aliases, in report order.
pub fn unused_aliases(report: &Report) -> Vec<String> {
    report
        .warnings
        .unused_use_statements
        .iter()
        .map(|entry| entry.alias.clone())
        .collect()
}
