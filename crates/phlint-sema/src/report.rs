//! The diagnostics report and its JSON shape.
//!
//! Findings are split into errors (code that cannot work) and
//! warnings (code that works but smells). Every collection is always
//! serialized, empty or not, so consumers can index into the report
//! without probing for keys.

use serde::Serialize;
use text_size::TextRange;

/// A reference to a class-like name the symbol index does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownClass {
    /// The name as written at the reference site.
    pub name: String,
    /// The enclosing namespace, `None` in the global namespace.
    pub namespace: Option<String>,
    /// Byte offset where the reference starts.
    pub start: u32,
    /// Byte offset one past the reference's end.
    pub end: u32,
}

/// An import no code or comment ever referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedUse {
    /// The imported fully qualified name.
    pub name: String,
    /// The local name the import binds; equals the last path segment
    /// unless renamed with `as`.
    pub alias: String,
    /// Byte offset where the use item starts.
    pub start: u32,
    /// Byte offset one past the use item's end.
    pub end: u32,
}

/// A docblock finding anchored to the callable it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocblockIssue {
    /// The callable's name.
    pub name: String,
    /// One-based line of the declaration.
    pub line: u32,
    /// Byte offset where the declaration header starts.
    pub start: u32,
    /// Byte offset one past the declaration header's end.
    pub end: u32,
}

impl DocblockIssue {
    /// Builds an issue anchored to a callable's declaration header.
    #[must_use]
    pub fn new(name: &str, line: u32, range: TextRange) -> Self {
        Self {
            name: name.to_string(),
            line,
            start: range.start().into(),
            end: range.end().into(),
        }
    }
}

/// A required parameter the docblock fails to document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingParameter {
    /// The callable's name.
    pub name: String,
    /// One-based line of the declaration.
    pub line: u32,
    /// Byte offset where the declaration header starts.
    pub start: u32,
    /// Byte offset one past the declaration header's end.
    pub end: u32,
    /// The undocumented parameter's name, without the `$` sigil.
    pub parameter: String,
}

impl MissingParameter {
    /// Builds a missing-parameter finding.
    #[must_use]
    pub fn new(name: &str, line: u32, range: TextRange, parameter: &str) -> Self {
        Self {
            name: name.to_string(),
            line,
            start: range.start().into(),
            end: range.end().into(),
            parameter: parameter.to_string(),
        }
    }
}

/// Docblock findings bucketed by check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocblockIssues {
    /// Public or protected callables with no docblock at all.
    pub missing_documentation: Vec<DocblockIssue>,
    /// Required parameters the docblock does not document.
    pub parameter_missing: Vec<MissingParameter>,
    /// Parameters whose documented type disagrees with the declared
    /// hint.
    pub parameter_type_mismatch: Vec<DocblockIssue>,
    /// Docblock parameter tags naming no declared parameter.
    pub superfluous_parameters: Vec<DocblockIssue>,
}

impl DocblockIssues {
    /// Returns `true` when no check produced a finding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing_documentation.is_empty()
            && self.parameter_missing.is_empty()
            && self.parameter_type_mismatch.is_empty()
            && self.superfluous_parameters.is_empty()
    }
}

/// Findings that indicate broken code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Errors {
    /// References to class-likes the index does not know.
    pub unknown_classes: Vec<UnknownClass>,
}

/// Findings that indicate questionable but working code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warnings {
    /// Imports nothing references.
    pub unused_use_statements: Vec<UnusedUse>,
    /// Docblocks that disagree with the signatures they document.
    pub docblock_issues: DocblockIssues,
}

/// The complete diagnostics report for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Error-severity findings.
    pub errors: Errors,
    /// Warning-severity findings.
    pub warnings: Warnings,
}

impl Report {
    /// Returns `true` when the report contains at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.unknown_classes.is_empty()
    }

    /// Returns `true` when the report contains no findings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_errors()
            && self.warnings.unused_use_statements.is_empty()
            && self.warnings.docblock_issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use text_size::{TextRange, TextSize};

    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[test]
    fn empty_report_serializes_every_bucket() {
        let value = serde_json::to_value(Report::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "errors": { "unknownClasses": [] },
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
    fn unknown_class_serializes_null_namespace_for_global_code() {
        let mut report = Report::default();
        report.errors.unknown_classes.push(UnknownClass {
            name: "A\\B".to_string(),
            namespace: None,
            start: 16,
            end: 19,
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["errors"]["unknownClasses"][0],
            json!({ "name": "A\\B", "namespace": null, "start": 16, "end": 19 })
        );
    }

    #[test]
    fn missing_parameter_carries_the_parameter_name() {
        let finding = MissingParameter::new("some_function", 5, range(21, 49), "param2");
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "some_function",
                "line": 5,
                "start": 21,
                "end": 49,
                "parameter": "param2"
            })
        );
    }

    #[test]
    fn report_emptiness_tracks_all_buckets() {
        let mut report = Report::default();
        assert!(report.is_empty());
        assert!(!report.has_errors());

        report
            .warnings
            .docblock_issues
            .missing_documentation
            .push(DocblockIssue::new("f", 1, range(0, 10)));
        assert!(!report.is_empty());
        assert!(!report.has_errors());

        let mut broken = Report::default();
        broken.errors.unknown_classes.push(UnknownClass {
            name: "Missing".to_string(),
            namespace: Some("App".to_string()),
            start: 0,
            end: 7,
        });
        assert!(broken.has_errors());
    }
}
