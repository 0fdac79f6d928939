//! Docblock-versus-signature checks on functions and methods.

mod common;
use common::*;

#[test]
fn test_undocumented_function_is_reported() {
    let source = "<?php\nfunction greet(string $name) {\n    return $name;\n}\n";
    let report = check(source);
    let issues = &report.warnings.docblock_issues.missing_documentation;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "greet");
    assert_eq!(issues[0].line, 2);
    // The span covers the header, not the body.
    assert_eq!(issues[0].start, source.find("function").unwrap() as u32);
    assert_eq!(issues[0].end, source.find(')').unwrap() as u32 + 1);
}

#[test]
fn test_documented_function_is_clean() {
    check_clean(
        "<?php\n/**\n * Greets the caller.\n *\n * @param string $name\n */\nfunction greet(string $name) {\n}\n",
    );
}

#[test]
fn test_missing_param_tag_names_the_parameter() {
    let report = check(
        "<?php\n/**\n * @param string $name\n */\nfunction greet(string $name, int $times) {\n}\n",
    );
    let issues = &report.warnings.docblock_issues.parameter_missing;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "greet");
    assert_eq!(issues[0].parameter, "times");
    assert!(report.warnings.docblock_issues.parameter_type_mismatch.is_empty());
}

#[test]
fn test_defaulted_parameters_need_no_tag() {
    check_clean(
        "<?php\n/**\n * @param string $name\n */\nfunction f(string $name, int $depth = 0) {\n}\n",
    );
}

#[test]
fn test_conflicting_param_type_is_reported() {
    let report = check("<?php\n/**\n * @param int $count\n */\nfunction tally(string $count) {\n}\n");
    let issues = &report.warnings.docblock_issues.parameter_type_mismatch;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "tally");
    assert_eq!(issues[0].line, 5);
    assert!(report.warnings.docblock_issues.parameter_missing.is_empty());
}

#[test]
fn test_nullable_and_union_spellings_agree() {
    check_clean("<?php\n/**\n * @param int|null $x\n */\nfunction f(?int $x) {\n}\n");
}

#[test]
fn test_imported_alias_agrees_with_its_qualified_name() {
    let report = check_with(
        "<?php\nnamespace Vendor;\nclass Widget {}\n",
        "<?php\nuse Vendor\\Widget;\n/**\n * @param Vendor\\Widget $widget\n */\nfunction handle(Widget $widget) {\n}\n",
    );
    assert!(
        report.is_empty(),
        "got: {}",
        serde_json::to_string_pretty(&report).unwrap()
    );
}

#[test]
fn test_array_suffix_agrees_with_an_array_hint() {
    check_clean("<?php\n/**\n * @param DateTime[] $dates\n */\nfunction plan(array $dates) {\n}\n");
}

#[test]
fn test_extra_param_tag_is_reported() {
    let report = check(
        "<?php\n/**\n * @param string $name\n * @param int $extra\n */\nfunction f(string $name) {\n}\n",
    );
    let issues = &report.warnings.docblock_issues.superfluous_parameters;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "f");
}

#[test]
fn test_inherited_documentation_is_not_checked() {
    check_clean(
        "<?php\nclass Base {\n    /**\n     * @param string $x\n     */\n    public function run(string $x) {\n    }\n}\nclass Sub extends Base {\n    /** {@inheritDoc} */\n    public function run(string $x) {\n    }\n}\n",
    );
}

#[test]
fn test_private_methods_are_not_checked() {
    let report = check(
        "<?php\nclass C {\n    private function helper() {\n    }\n    public function run() {\n    }\n}\n",
    );
    let issues = &report.warnings.docblock_issues.missing_documentation;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "run");
    assert_eq!(issues[0].line, 5);
}
