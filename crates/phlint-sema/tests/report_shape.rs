//! The report contract: JSON shape, determinism, ordering, and the
//! refusal to lint unindexed files.

use std::path::Path;

use serde_json::json;

mod common;
use common::*;

#[test]
fn test_report_serializes_with_camel_case_buckets() {
    let report = check("<?php\nnew Missing();\n");
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({
            "errors": {
                "unknownClasses": [
                    { "name": "Missing", "namespace": null, "start": 10, "end": 17 }
                ]
            },
            "warnings": {
                "unusedUseStatements": [],
                "docblockIssues": {
                    "missingDocumentation": [],
                    "parameterMissing": [],
                    "parameterTypeMismatch": [],
                    "superfluousParameters": []
                }
            }
        })
    );
}

#[test]
fn test_linting_twice_is_byte_identical() {
    let source = "<?php\nnamespace App;\nuse Vendor\\Gone;\nnew Missing();\nfunction f($x) {\n}\n";
    let first = serde_json::to_string(&check(source)).unwrap();
    let second = serde_json::to_string(&check(source)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_files_without_imports_or_docblocks_only_report_unknowns() {
    let report = check("<?php\nnew Missing();\n");
    assert!(report.has_errors());
    assert!(report.warnings.unused_use_statements.is_empty());
    assert!(report.warnings.docblock_issues.is_empty());
}

#[test]
fn test_findings_keep_source_order_per_bucket() {
    let report = check(
        "<?php\nuse Vendor\\One;\nuse Vendor\\Two;\nnew First();\nnew Second();\n",
    );
    assert_eq!(unknown_names(&report), ["First", "Second"]);
    assert_eq!(unused_aliases(&report), ["One", "Two"]);
}

#[test]
fn test_unindexed_files_are_refused() {
    let index = phlint_index::SymbolIndex::with_builtins();
    let err = phlint_sema::lint(&index, Path::new("/missing.php"), "<?php\n")
        .expect_err("file was never indexed");
    assert!(err.to_string().contains("/missing.php"));
}

#[test]
fn test_parse_errors_do_not_abort_the_pass() {
    // A malformed declaration before a clean reference still yields
    // the finding.
    let report = check("<?php\nclass Broken\nnew Missing();\n");
    assert_eq!(unknown_names(&report), ["Missing"]);
}
