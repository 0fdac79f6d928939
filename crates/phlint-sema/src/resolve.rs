//! Name resolution against the symbol index.
//!
//! Implements the resolution order PHP applies to names: fully
//! qualified references go straight to the index, the head segment
//! of a relative reference is tried against the enclosing scope's
//! imports, and what remains is qualified with the enclosing
//! namespace. Class-like names additionally fall back to the global
//! namespace when the qualified lookup finds nothing.

use once_cell::sync::Lazy;
use phlint_index::{Symbol, SymbolIndex};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::imports::{ImportKind, NamespaceScope};

/// Where a name appeared, deciding which symbol spaces are
/// consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePosition {
    /// A type reference: `new`, static access, `instanceof`, catch
    /// and declaration clauses, type hints, docblock types.
    ClassLike,
    /// A bare name directly invoked as a function.
    FunctionCall,
}

/// A textual reference to a symbol, as found in code or a docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// The reference text as written.
    pub text: SmolStr,
    /// The enclosing namespace at the reference site.
    pub namespace: Option<SmolStr>,
    /// The reference's range in the source file.
    pub range: TextRange,
}

/// What a successful resolution landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A symbol the index knows.
    Symbol(Symbol),
    /// A reserved type name that needs no lookup: scalars,
    /// pseudo-types, self-references, template placeholders.
    Reserved(SmolStr),
}

/// The outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The reference names something known.
    Resolved(Resolved),
    /// The reference matches nothing the index knows.
    Unresolved(TypeReference),
}

impl ResolutionResult {
    /// Returns `true` for the resolved case.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

static RESERVED_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "$this", "array", "bool", "boolean", "callable", "double", "false", "float", "int",
        "integer", "iterable", "mixed", "never", "null", "numeric", "object", "parent",
        "resource", "scalar", "self", "static", "string", "this", "true", "void",
    ]
    .into_iter()
    .collect()
});

/// Returns `true` for names that never need an index lookup: scalar
/// and pseudo-types, self-reference keywords, and single-letter
/// template placeholders.
#[must_use]
pub fn is_reserved_type(name: &str) -> bool {
    if name.len() == 1 && name.as_bytes()[0].is_ascii_uppercase() {
        return true;
    }
    RESERVED_TYPES.contains(name.to_ascii_lowercase().as_str())
}

/// Resolves one name as written at a reference site. A resolution
/// that succeeds through an import marks that alias used.
pub fn resolve(
    index: &SymbolIndex,
    scope: &mut NamespaceScope,
    raw: &str,
    range: TextRange,
    position: NamePosition,
) -> ResolutionResult {
    // Fully qualified names bypass imports and namespace entirely.
    if let Some(rooted) = raw.strip_prefix('\\') {
        return match lookup(index, rooted, position) {
            Some(symbol) => ResolutionResult::Resolved(Resolved::Symbol(symbol)),
            None => unresolved(scope, raw, range),
        };
    }
    if is_reserved_type(raw) {
        return ResolutionResult::Resolved(Resolved::Reserved(SmolStr::new(raw)));
    }

    let (head, rest) = match raw.split_once('\\') {
        Some((head, rest)) => (head, Some(rest)),
        None => (raw, None),
    };
    // A qualified tail always goes through the type table: after
    // `use A\B;` the call `B\helper()` reaches `A\B\helper`.
    let alias_kind = match (position, rest) {
        (NamePosition::FunctionCall, None) => ImportKind::Function,
        _ => ImportKind::Type,
    };
    if let Some(target) = scope
        .alias(head, alias_kind)
        .map(|alias| alias.name.clone())
    {
        let fqn = match rest {
            Some(rest) => format!("{target}\\{rest}"),
            None => target.to_string(),
        };
        return match lookup(index, &fqn, position) {
            Some(symbol) => {
                if let Some(alias) = scope.alias_mut(head, alias_kind) {
                    alias.used = true;
                }
                ResolutionResult::Resolved(Resolved::Symbol(symbol))
            }
            None => unresolved(scope, raw, range),
        };
    }

    if let Some(namespace) = scope.name.clone() {
        let qualified = format!("{namespace}\\{raw}");
        if let Some(symbol) = lookup(index, &qualified, position) {
            return ResolutionResult::Resolved(Resolved::Symbol(symbol));
        }
        // Class-like names fall back to the global namespace.
        if position == NamePosition::ClassLike {
            if let Some(symbol) = lookup(index, raw, position) {
                return ResolutionResult::Resolved(Resolved::Symbol(symbol));
            }
        }
        return unresolved(scope, raw, range);
    }
    match lookup(index, raw, position) {
        Some(symbol) => ResolutionResult::Resolved(Resolved::Symbol(symbol)),
        None => unresolved(scope, raw, range),
    }
}

fn lookup(index: &SymbolIndex, fqn: &str, position: NamePosition) -> Option<Symbol> {
    match position {
        NamePosition::ClassLike => index.classlike(fqn).cloned(),
        NamePosition::FunctionCall => index
            .function(fqn)
            .or_else(|| index.classlike(fqn))
            .cloned(),
    }
}

fn unresolved(scope: &NamespaceScope, raw: &str, range: TextRange) -> ResolutionResult {
    ResolutionResult::Unresolved(TypeReference {
        text: SmolStr::new(raw),
        namespace: scope.name.clone(),
        range,
    })
}

/// Expands a name the way resolution would, without consulting the
/// index: root markers are trimmed, the head segment goes through
/// the import table, and relative names are qualified with the
/// enclosing namespace. Lets two spellings of a name be compared
/// even when neither resolves.
#[must_use]
pub fn expand_unchecked(scope: &NamespaceScope, raw: &str) -> String {
    if let Some(rooted) = raw.strip_prefix('\\') {
        return rooted.to_string();
    }
    let (head, rest) = match raw.split_once('\\') {
        Some((head, rest)) => (head, Some(rest)),
        None => (raw, None),
    };
    if let Some(alias) = scope.alias(head, ImportKind::Type) {
        return match rest {
            Some(rest) => format!("{}\\{rest}", alias.name),
            None => alias.name.to_string(),
        };
    }
    match &scope.name {
        Some(namespace) => format!("{namespace}\\{raw}"),
        None => raw.to_string(),
    }
}

/// One member of a possibly-compound docblock type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMember {
    /// The member's name with decorations stripped.
    pub name: SmolStr,
    /// Byte offset of the name within the expression text.
    pub offset: usize,
    /// Whether the member was written with an `[]` suffix.
    pub is_array: bool,
    /// Whether the member carried a `?` nullable marker.
    pub nullable: bool,
}

/// Splits a docblock type expression on union and intersection
/// markers: `?A|B[]` yields members `A` (nullable) and `B` (array).
/// Empty members from stray separators are dropped.
#[must_use]
pub fn type_members(text: &str) -> Vec<TypeMember> {
    let mut members = Vec::new();
    let mut start = 0usize;
    for (at, ch) in text.char_indices() {
        if ch == '|' || ch == '&' {
            push_member(&text[start..at], start, &mut members);
            start = at + ch.len_utf8();
        }
    }
    push_member(&text[start..], start, &mut members);
    members
}

fn push_member(raw: &str, base: usize, members: &mut Vec<TypeMember>) {
    let mut offset = base + (raw.len() - raw.trim_start().len());
    let mut name = raw.trim();
    let mut nullable = false;
    loop {
        if let Some(rest) = name.strip_prefix('?') {
            name = rest;
            offset += 1;
            nullable = true;
        } else if let Some(rest) = name.strip_prefix('(') {
            name = rest;
            offset += 1;
        } else {
            break;
        }
    }
    while let Some(rest) = name.strip_suffix(')') {
        name = rest;
    }
    let mut is_array = false;
    while let Some(rest) = name.strip_suffix("[]") {
        name = rest;
        is_array = true;
    }
    // Generic arguments reference the base name: `Collection<int>`.
    if let Some(open) = name.find('<') {
        name = &name[..open];
    }
    if name.is_empty() {
        return;
    }
    members.push(TypeMember {
        name: SmolStr::new(name),
        offset,
        is_array,
        nullable,
    });
}

#[cfg(test)]
mod tests {
    use phlint_index::{index_file, SymbolIndex};
    use text_size::TextSize;

    use crate::imports::collect_scopes;

    use super::*;

    fn span() -> TextRange {
        TextRange::empty(TextSize::from(0))
    }

    fn scope_for(source: &str, index: &mut SymbolIndex) -> NamespaceScope {
        let parse = phlint_syntax::parse(source);
        index_file(index, std::path::Path::new("/t.php"), &parse);
        let mut scopes = collect_scopes(&parse.syntax());
        scopes.remove(0)
    }

    #[test]
    fn rooted_names_skip_imports_and_namespace() {
        let mut index = SymbolIndex::with_builtins();
        let mut scope = scope_for("<?php\nnamespace App;\nuse X\\DateTime;\n", &mut index);
        let result = resolve(
            &index,
            &mut scope,
            "\\DateTime",
            span(),
            NamePosition::ClassLike,
        );
        assert!(matches!(
            result,
            ResolutionResult::Resolved(Resolved::Symbol(ref symbol)) if symbol.fqn == "DateTime"
        ));
        assert!(!scope.imports[0].used);
    }

    #[test]
    fn alias_is_marked_used_on_successful_resolution_only() {
        let mut index = SymbolIndex::new();
        let mut scope = scope_for(
            "<?php\nnamespace App;\nuse Lib\\Widget;\nuse Lib\\Phantom;\nclass C {}\n",
            &mut index,
        );
        index.add_symbol(phlint_index::Symbol::new(
            "Lib\\Widget",
            phlint_index::SymbolKind::Class,
            span(),
        ));

        let hit = resolve(&index, &mut scope, "Widget", span(), NamePosition::ClassLike);
        assert!(hit.is_resolved());
        assert!(scope.imports[0].used);

        let miss = resolve(&index, &mut scope, "Phantom", span(), NamePosition::ClassLike);
        assert!(!miss.is_resolved());
        assert!(!scope.imports[1].used);
    }

    #[test]
    fn alias_head_carries_a_qualified_tail() {
        let mut index = SymbolIndex::new();
        let mut scope = scope_for("<?php\nnamespace App;\nuse Vendor\\Pkg;\n", &mut index);
        index.add_symbol(phlint_index::Symbol::new(
            "Vendor\\Pkg\\Model",
            phlint_index::SymbolKind::Class,
            span(),
        ));
        let result = resolve(
            &index,
            &mut scope,
            "Pkg\\Model",
            span(),
            NamePosition::ClassLike,
        );
        assert!(result.is_resolved());
        assert!(scope.imports[0].used);
    }

    #[test]
    fn relative_names_qualify_with_the_namespace_then_fall_back() {
        let mut index = SymbolIndex::new();
        let mut scope = scope_for("<?php\nnamespace App;\nclass Local {}\n", &mut index);
        index.add_symbol(phlint_index::Symbol::new(
            "Global",
            phlint_index::SymbolKind::Class,
            span(),
        ));

        let local = resolve(&index, &mut scope, "Local", span(), NamePosition::ClassLike);
        assert!(
            matches!(local, ResolutionResult::Resolved(Resolved::Symbol(ref s)) if s.fqn == "App\\Local")
        );
        let fallback = resolve(&index, &mut scope, "Global", span(), NamePosition::ClassLike);
        assert!(fallback.is_resolved());
    }

    #[test]
    fn functions_do_not_get_the_global_fallback() {
        let mut index = SymbolIndex::with_builtins();
        let mut scope = scope_for("<?php\nnamespace App;\n", &mut index);
        let result = resolve(
            &index,
            &mut scope,
            "strlen",
            span(),
            NamePosition::FunctionCall,
        );
        assert!(!result.is_resolved());
    }

    #[test]
    fn unresolved_references_carry_text_and_namespace() {
        let mut index = SymbolIndex::new();
        let mut scope = scope_for("<?php\nnamespace App;\n", &mut index);
        let range = TextRange::new(TextSize::from(20), TextSize::from(27));
        match resolve(&index, &mut scope, "Missing", range, NamePosition::ClassLike) {
            ResolutionResult::Unresolved(reference) => {
                assert_eq!(reference.text, "Missing");
                assert_eq!(reference.namespace.as_deref(), Some("App"));
                assert_eq!(reference.range, range);
            }
            ResolutionResult::Resolved(_) => panic!("expected an unresolved reference"),
        }
    }

    #[test]
    fn reserved_types_never_reach_the_index() {
        let index = SymbolIndex::new();
        let mut scope = NamespaceScope {
            name: None,
            imports: Vec::new(),
            range: span(),
        };
        for name in ["int", "STRING", "self", "static", "$this", "T"] {
            let result = resolve(&index, &mut scope, name, span(), NamePosition::ClassLike);
            assert!(result.is_resolved(), "{name} should be reserved");
        }
        assert!(!is_reserved_type("DateTime"));
        assert!(!is_reserved_type("Tx"));
    }

    #[test]
    fn type_members_strip_decorations() {
        let members = type_members("?Foo|Bar[]|null");
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name, "Foo");
        assert!(members[0].nullable);
        assert_eq!(members[1].name, "Bar");
        assert!(members[1].is_array);
        assert_eq!(members[2].name, "null");

        let generic = type_members("array<int, string>");
        assert_eq!(generic.len(), 1);
        assert_eq!(generic[0].name, "array");

        assert!(type_members("|").is_empty());
    }

    #[test]
    fn type_member_offsets_index_into_the_expression() {
        let text = "?A\\B|C[]";
        for member in type_members(text) {
            let found = &text[member.offset..member.offset + member.name.len()];
            assert_eq!(found, member.name.as_str());
        }
    }

    #[test]
    fn expansion_matches_resolution_spelling() {
        let mut index = SymbolIndex::new();
        let scope = scope_for("<?php\nnamespace App;\nuse Lib\\Widget;\n", &mut index);
        assert_eq!(expand_unchecked(&scope, "\\A\\B"), "A\\B");
        assert_eq!(expand_unchecked(&scope, "Widget"), "Lib\\Widget");
        assert_eq!(expand_unchecked(&scope, "Widget\\Part"), "Lib\\Widget\\Part");
        assert_eq!(expand_unchecked(&scope, "Other"), "App\\Other");
    }
}
