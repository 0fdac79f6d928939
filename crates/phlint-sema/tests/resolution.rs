//! Name resolution against the index: which references produce
//! unknown-class errors and which resolve cleanly.

mod common;
use common::*;

#[test]
fn test_unknown_class_spans_the_reference() {
    let source = "<?php\nnew Mailer();\n";
    let report = check(source);
    assert_eq!(report.errors.unknown_classes.len(), 1);
    let entry = &report.errors.unknown_classes[0];
    assert_eq!(entry.name, "Mailer");
    assert_eq!(entry.namespace, None);
    let at = source.find("Mailer").unwrap() as u32;
    assert_eq!(entry.start, at);
    assert_eq!(entry.end, at + 6);
}

#[test]
fn test_unqualified_path_reports_the_written_name() {
    let report = check("<?php\nnamespace App;\nnew A\\B();\n");
    assert_eq!(unknown_names(&report), ["A\\B"]);
    assert_eq!(
        report.errors.unknown_classes[0].namespace.as_deref(),
        Some("App")
    );
}

#[test]
fn test_declarations_in_the_same_file_resolve() {
    check_clean("<?php\nnamespace App;\nclass Widget {}\nnew Widget();\n");
}

#[test]
fn test_resolution_is_case_insensitive() {
    // PHP compares class and function names case-insensitively.
    check_clean("<?php\nclass Widget {}\nnew WIDGET();\n");
}

#[test]
fn test_builtins_resolve_from_inside_a_namespace() {
    // Unqualified class names fall back to the global namespace.
    check_clean(
        "<?php\nnamespace App;\nnew DateTime();\nnew \\DateTimeZone();\n$x instanceof Traversable;\n",
    );
}

#[test]
fn test_namespaces_resolve_independently() {
    let source = "<?php\nnamespace A;\nclass Widget {}\nnew Widget();\nnamespace B;\nnew Widget();\n";
    let report = check(source);
    assert_eq!(unknown_names(&report), ["Widget"]);
    assert_eq!(
        report.errors.unknown_classes[0].namespace.as_deref(),
        Some("B")
    );
}

#[test]
fn test_instanceof_and_catch_types_are_checked() {
    let report = check("<?php\n$x instanceof Foo;\ntry {} catch (Bar | Baz $e) {}\n");
    assert_eq!(unknown_names(&report), ["Foo", "Bar", "Baz"]);
}

#[test]
fn test_declaration_clauses_are_checked() {
    let report = check(
        "<?php\nclass C extends MissingBase implements MissingContract {\n    use MissingTrait;\n}\n",
    );
    assert_eq!(
        unknown_names(&report),
        ["MissingBase", "MissingContract", "MissingTrait"]
    );
}

#[test]
fn test_parameter_and_return_hints_are_checked() {
    let report = check("<?php\nfunction f(Widget $w): Gadget {}\n");
    assert_eq!(unknown_names(&report), ["Widget", "Gadget"]);
}

#[test]
fn test_docblock_types_are_checked_inside_the_comment() {
    let source = "<?php\n/** @var Widget\\Missing */\n$x = 1;\n";
    let report = check(source);
    assert_eq!(unknown_names(&report), ["Widget\\Missing"]);
    let at = source.find("Widget").unwrap() as u32;
    let entry = &report.errors.unknown_classes[0];
    assert_eq!(entry.start, at);
    assert_eq!(entry.end, at + "Widget\\Missing".len() as u32);
}

#[test]
fn test_union_docblock_members_are_checked_individually() {
    let report = check("<?php\nclass Bar {}\n/** @var Foo|Bar */\n$x = 1;\n");
    assert_eq!(unknown_names(&report), ["Foo"]);
}

#[test]
fn test_reserved_type_names_need_no_lookup() {
    check_clean(
        "<?php\n/**\n * @param int|string $x\n * @return self\n */\nfunction f($x) {}\n",
    );
}

#[test]
fn test_unknown_function_calls_are_not_reported() {
    check_clean("<?php\nundefined_helper();\nstrlen('x');\n");
}

#[test]
fn test_findings_appear_in_source_order() {
    let report = check("<?php\nnew Zeta();\nnew Alpha();\n");
    assert_eq!(unknown_names(&report), ["Zeta", "Alpha"]);
}
