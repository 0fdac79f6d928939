//! Docblock-versus-signature checking.
//!
//! Free functions and public or protected methods are expected to
//! carry documentation that agrees with their declared shape. Four
//! checks run per callable: documentation present at all, every
//! required parameter documented, documented types agreeing with
//! declared hints, and no documented parameter that the declaration
//! lacks.

use std::collections::BTreeSet;

use phlint_index::{normalize_fqn, SymbolIndex};
use phlint_syntax::{compact_text, SyntaxKind, SyntaxNode};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::docblock::{self, Docblock, TypeExpr};
use crate::imports::NamespaceScope;
use crate::report::{DocblockIssue, DocblockIssues, MissingParameter};
use crate::resolve::{
    expand_unchecked, is_reserved_type, resolve, type_members, NamePosition, ResolutionResult,
    Resolved,
};

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name, without the `$` sigil.
    pub name: SmolStr,
    /// The declared type hint text, when one is written.
    pub type_hint: Option<SmolStr>,
    /// Whether the parameter declares a default value.
    pub has_default: bool,
}

/// The declared shape of a function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSignature {
    /// The callable's name.
    pub name: SmolStr,
    /// The declared parameters, in order.
    pub parameters: Vec<Parameter>,
    /// The docblock directly preceding the declaration, if any.
    pub docblock: Option<Docblock>,
    /// The declaration header's range, modifiers through parameter
    /// list and return type.
    pub range: TextRange,
}

/// Returns `true` for the callables the docblock checks cover: free
/// functions and public or protected methods. Visibility defaults
/// to public when no modifier is written.
#[must_use]
pub fn is_checkable(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::FunctionDecl => true,
        SyntaxKind::MethodDecl => !node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .any(|token| token.kind() == SyntaxKind::KwPrivate),
        _ => false,
    }
}

/// Extracts the declared shape of a function or method, along with
/// the docblock directly preceding it.
#[must_use]
pub fn signature_of(node: &SyntaxNode) -> Option<CallableSignature> {
    let name = node
        .children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .map(|name| SmolStr::new(compact_text(&name)))?;
    let parameters = node
        .children()
        .find(|child| child.kind() == SyntaxKind::ParamList)
        .map(|list| parameters_of(&list))
        .unwrap_or_default();
    Some(CallableSignature {
        name,
        parameters,
        docblock: attached_docblock(node),
        range: header_range(node),
    })
}

fn parameters_of(list: &SyntaxNode) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    for param in list
        .children()
        .filter(|child| child.kind() == SyntaxKind::Param)
    {
        let Some(variable) = param
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::Variable)
        else {
            continue;
        };
        let type_hint = param
            .children()
            .find(|child| child.kind() == SyntaxKind::TypeHint)
            .map(|hint| SmolStr::new(compact_text(&hint)));
        let has_default = param
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .any(|token| token.kind() == SyntaxKind::Eq);
        parameters.push(Parameter {
            name: SmolStr::new(variable.text().trim_start_matches('$')),
            type_hint,
            has_default,
        });
    }
    parameters
}

/// The doc comment directly above a declaration, with only blank
/// space or attributes in between.
fn attached_docblock(node: &SyntaxNode) -> Option<Docblock> {
    let mut previous = node.prev_sibling_or_token();
    while let Some(element) = previous {
        let token = element.into_token()?;
        match token.kind() {
            SyntaxKind::Whitespace | SyntaxKind::LineComment => {
                previous = token.prev_sibling_or_token();
            }
            SyntaxKind::DocComment => {
                return Some(docblock::parse(token.text(), token.text_range()));
            }
            _ => return None,
        }
    }
    None
}

/// The declaration header: modifiers through the parameter list and
/// return type, excluding the body.
fn header_range(node: &SyntaxNode) -> TextRange {
    let end = node
        .children()
        .filter(|child| {
            matches!(
                child.kind(),
                SyntaxKind::Name | SyntaxKind::ParamList | SyntaxKind::ReturnType
            )
        })
        .map(|child| child.text_range().end())
        .max()
        .unwrap_or_else(|| node.text_range().end());
    TextRange::new(node.text_range().start(), end)
}

/// Runs the docblock checks for one callable, extending the issue
/// buckets. `line` is the declaration's one-based line.
pub fn check(
    index: &SymbolIndex,
    scope: &mut NamespaceScope,
    signature: &CallableSignature,
    line: u32,
    issues: &mut DocblockIssues,
) {
    let Some(doc) = &signature.docblock else {
        issues
            .missing_documentation
            .push(DocblockIssue::new(&signature.name, line, signature.range));
        return;
    };
    if doc.inherits_only() {
        return;
    }
    let tags: Vec<(&str, &TypeExpr)> = doc.param_tags().collect();

    for parameter in &signature.parameters {
        if parameter.has_default {
            continue;
        }
        if !tags.iter().any(|(name, _)| *name == parameter.name) {
            issues.parameter_missing.push(MissingParameter::new(
                &signature.name,
                line,
                signature.range,
                &parameter.name,
            ));
        }
    }

    for parameter in &signature.parameters {
        let Some(hint) = &parameter.type_hint else {
            continue;
        };
        let Some((_, documented)) = tags.iter().find(|(name, _)| *name == parameter.name) else {
            continue;
        };
        if !types_agree(index, scope, hint, &documented.text) {
            issues.parameter_type_mismatch.push(DocblockIssue::new(
                &signature.name,
                line,
                signature.range,
            ));
        }
    }

    for (name, _) in &tags {
        if !signature
            .parameters
            .iter()
            .any(|parameter| parameter.name == *name)
        {
            issues.superfluous_parameters.push(DocblockIssue::new(
                &signature.name,
                line,
                signature.range,
            ));
        }
    }
}

/// Compares a declared type hint against a documented type. Both are
/// reduced to canonical name sets: nullable markers become an
/// explicit `null`, array suffixes collapse to `array`, and
/// class-like members resolve through the scope, so `?Foo` agrees
/// with `Foo|null` and an imported alias with its qualified form.
fn types_agree(
    index: &SymbolIndex,
    scope: &mut NamespaceScope,
    declared: &str,
    documented: &str,
) -> bool {
    canonical_set(index, scope, declared) == canonical_set(index, scope, documented)
}

fn canonical_set(index: &SymbolIndex, scope: &mut NamespaceScope, text: &str) -> BTreeSet<SmolStr> {
    let mut set = BTreeSet::new();
    for member in type_members(text) {
        if member.nullable {
            set.insert(SmolStr::new("null"));
        }
        if member.is_array {
            set.insert(SmolStr::new("array"));
            continue;
        }
        set.insert(canonical_name(index, scope, &member.name));
    }
    set
}

fn canonical_name(index: &SymbolIndex, scope: &mut NamespaceScope, name: &str) -> SmolStr {
    if is_reserved_type(name) {
        return scalar_alias(&name.to_ascii_lowercase());
    }
    let range = TextRange::empty(TextSize::from(0));
    match resolve(index, scope, name, range, NamePosition::ClassLike) {
        ResolutionResult::Resolved(Resolved::Symbol(symbol)) => normalize_fqn(&symbol.fqn),
        ResolutionResult::Resolved(Resolved::Reserved(word)) => {
            scalar_alias(&word.to_ascii_lowercase())
        }
        ResolutionResult::Unresolved(_) => normalize_fqn(&expand_unchecked(scope, name)),
    }
}

/// Long-form scalar spellings collapse onto the canonical one.
fn scalar_alias(name: &str) -> SmolStr {
    match name {
        "integer" => SmolStr::new("int"),
        "boolean" => SmolStr::new("bool"),
        "double" => SmolStr::new("float"),
        other => SmolStr::new(other),
    }
}

#[cfg(test)]
mod tests {
    use phlint_index::index_file;
    use phlint_syntax::parse;

    use crate::imports::collect_scopes;

    use super::*;

    fn first_callable(source: &str) -> (SymbolIndex, NamespaceScope, CallableSignature) {
        let parsed = parse(source);
        let mut index = SymbolIndex::with_builtins();
        index_file(&mut index, std::path::Path::new("/t.php"), &parsed);
        let root = parsed.syntax();
        let scope = collect_scopes(&root).remove(0);
        let node = root
            .descendants()
            .find(|node| is_checkable(node) && signature_of(node).is_some())
            .expect("fixture declares a callable");
        let signature = signature_of(&node).expect("fixture callable has a name");
        (index, scope, signature)
    }

    fn run_check(source: &str) -> DocblockIssues {
        let (index, mut scope, signature) = first_callable(source);
        let mut issues = DocblockIssues::default();
        check(&index, &mut scope, &signature, 1, &mut issues);
        issues
    }

    #[test]
    fn extracts_parameters_with_hints_and_defaults() {
        let (_, _, signature) = first_callable(
            "<?php\nfunction f(int $a, ?string $b = null, DateTime ...$rest) {}\n",
        );
        assert_eq!(signature.name, "f");
        assert_eq!(signature.parameters.len(), 3);
        assert_eq!(signature.parameters[0].name, "a");
        assert_eq!(signature.parameters[0].type_hint.as_deref(), Some("int"));
        assert!(!signature.parameters[0].has_default);
        assert_eq!(signature.parameters[1].name, "b");
        assert_eq!(signature.parameters[1].type_hint.as_deref(), Some("?string"));
        assert!(signature.parameters[1].has_default);
        assert_eq!(signature.parameters[2].name, "rest");
        assert!(!signature.parameters[2].has_default);
    }

    #[test]
    fn header_range_stops_before_the_body() {
        let source = "<?php\nfunction f($x): int\n{\n    return 1;\n}\n";
        let (_, _, signature) = first_callable(source);
        let header = &source[usize::from(signature.range.start())..usize::from(signature.range.end())];
        assert_eq!(header, "function f($x): int");
    }

    #[test]
    fn docblock_attaches_across_blank_space() {
        let (_, _, signature) =
            first_callable("<?php\n/** @param int $x */\n\nfunction f($x) {}\n");
        assert!(signature.docblock.is_some());
    }

    #[test]
    fn private_methods_are_not_checkable() {
        let parsed = parse(
            "<?php\nclass C {\n    private function hidden() {}\n    protected function shown() {}\n}\n",
        );
        let checkable: Vec<String> = parsed
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::MethodDecl && is_checkable(node))
            .filter_map(|node| signature_of(&node).map(|s| s.name.to_string()))
            .collect();
        assert_eq!(checkable, ["shown"]);
    }

    #[test]
    fn undocumented_function_is_reported_once() {
        let issues = run_check("<?php\nfunction f($x) {}\n");
        assert_eq!(issues.missing_documentation.len(), 1);
        assert_eq!(issues.missing_documentation[0].name, "f");
        assert!(issues.parameter_missing.is_empty());
    }

    #[test]
    fn required_parameters_must_be_documented() {
        let issues = run_check(
            "<?php\n/**\n * @param int $a\n */\nfunction f($a, $b, $c = 1) {}\n",
        );
        let missing: Vec<&str> = issues
            .parameter_missing
            .iter()
            .map(|finding| finding.parameter.as_str())
            .collect();
        assert_eq!(missing, ["b"]);
        assert!(issues.missing_documentation.is_empty());
    }

    #[test]
    fn documented_type_must_agree_with_the_hint() {
        let issues = run_check(
            "<?php\n/**\n * @param string $a\n */\nfunction f(int $a) {}\n",
        );
        assert_eq!(issues.parameter_type_mismatch.len(), 1);

        let agreeing = run_check(
            "<?php\n/**\n * @param int|null $a\n */\nfunction f(?int $a) {}\n",
        );
        assert!(agreeing.parameter_type_mismatch.is_empty());
    }

    #[test]
    fn alias_and_qualified_spellings_agree() {
        let issues = run_check(
            "<?php\nnamespace App;\nuse Lib\\Widget;\n/**\n * @param \\Lib\\Widget $w\n */\nfunction f(Widget $w) {}\n",
        );
        assert!(issues.parameter_type_mismatch.is_empty());
    }

    #[test]
    fn array_suffix_agrees_with_an_array_hint() {
        let issues = run_check(
            "<?php\n/**\n * @param DateTime[] $items\n */\nfunction f(array $items) {}\n",
        );
        assert!(issues.parameter_type_mismatch.is_empty());
    }

    #[test]
    fn extra_tags_are_superfluous() {
        let issues = run_check(
            "<?php\n/**\n * @param int $a\n * @param int $ghost\n */\nfunction f($a) {}\n",
        );
        assert_eq!(issues.superfluous_parameters.len(), 1);
        assert_eq!(issues.superfluous_parameters[0].name, "f");
    }

    #[test]
    fn inherit_doc_suppresses_structure_checks() {
        let issues = run_check(
            "<?php\nclass C {\n    /** {@inheritDoc} */\n    public function m($a, $b) {}\n}\n",
        );
        assert!(issues.parameter_missing.is_empty());
        assert!(issues.missing_documentation.is_empty());
    }
}
