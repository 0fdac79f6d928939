//! Import and namespace-scope tracking.
//!
//! Each namespace block carries its own import table; a file with no
//! namespace declaration gets one global scope. Aliases start out
//! unused and are marked as references resolve through them, which
//! is what the unused-import warning is computed from at the end of
//! a pass.

use phlint_syntax::{compact_text, SyntaxKind, SyntaxNode};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// Which symbol space a use statement imports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `use Foo\Bar;` imports a class-like or namespace path.
    Type,
    /// `use function foo\bar;`.
    Function,
    /// `use const Foo\BAR;`.
    Const,
}

/// One name bound by a use statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias {
    /// The imported fully qualified name, without a leading
    /// separator.
    pub name: SmolStr,
    /// The local name the import binds; the last path segment unless
    /// renamed with `as`.
    pub alias: SmolStr,
    /// The import's symbol space.
    pub kind: ImportKind,
    /// The use item's own range.
    pub range: TextRange,
    /// Whether any reference resolved through this alias.
    pub used: bool,
}

/// A namespace block and the imports visible inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    /// The namespace name, `None` for the global namespace.
    pub name: Option<SmolStr>,
    /// The imports declared in this scope, in source order.
    pub imports: Vec<ImportAlias>,
    /// The text range the scope spans.
    pub range: TextRange,
}

impl NamespaceScope {
    /// Looks up the alias a reference's head segment binds to.
    /// Class and function names compare case-insensitively, constant
    /// names exactly.
    pub fn alias_mut(&mut self, head: &str, kind: ImportKind) -> Option<&mut ImportAlias> {
        self.imports
            .iter_mut()
            .find(|alias| alias.kind == kind && heads_match(kind, &alias.alias, head))
    }

    /// Read-only variant of [`NamespaceScope::alias_mut`].
    #[must_use]
    pub fn alias(&self, head: &str, kind: ImportKind) -> Option<&ImportAlias> {
        self.imports
            .iter()
            .find(|alias| alias.kind == kind && heads_match(kind, &alias.alias, head))
    }
}

fn heads_match(kind: ImportKind, alias: &str, head: &str) -> bool {
    match kind {
        ImportKind::Const => alias == head,
        ImportKind::Type | ImportKind::Function => alias.eq_ignore_ascii_case(head),
    }
}

/// Collects the file's namespace scopes in source order. Use
/// statements that precede the first namespace keyword are tolerated
/// in an implicit global scope.
#[must_use]
pub fn collect_scopes(root: &SyntaxNode) -> Vec<NamespaceScope> {
    let namespaces: Vec<SyntaxNode> = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::NamespaceDef)
        .collect();
    if namespaces.is_empty() {
        let mut imports = Vec::new();
        for decl in root
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::UseDecl)
        {
            collect_imports(&decl, &mut imports);
        }
        return vec![NamespaceScope {
            name: None,
            imports,
            range: root.text_range(),
        }];
    }

    let mut scopes = Vec::with_capacity(namespaces.len() + 1);
    let first = namespaces[0].text_range().start();
    let mut leading = Vec::new();
    for decl in root
        .children()
        .filter(|node| node.kind() == SyntaxKind::UseDecl && node.text_range().end() <= first)
    {
        collect_imports(&decl, &mut leading);
    }
    if !leading.is_empty() {
        scopes.push(NamespaceScope {
            name: None,
            imports: leading,
            range: TextRange::new(TextSize::from(0), first),
        });
    }
    for namespace in &namespaces {
        scopes.push(namespace_scope(namespace));
    }
    scopes
}

fn namespace_scope(node: &SyntaxNode) -> NamespaceScope {
    let name = node
        .children()
        .find(|child| child.kind() == SyntaxKind::QualifiedName)
        .map(|qualified| SmolStr::new(path_text(&qualified)));
    let mut imports = Vec::new();
    for decl in node
        .descendants()
        .filter(|child| child.kind() == SyntaxKind::UseDecl)
    {
        collect_imports(&decl, &mut imports);
    }
    NamespaceScope {
        name,
        imports,
        range: node.text_range(),
    }
}

fn collect_imports(decl: &SyntaxNode, out: &mut Vec<ImportAlias>) {
    let decl_kind = declared_kind(decl);
    // Grouped imports keep the shared path prefix outside the braces.
    let prefix = decl
        .children()
        .find(|child| child.kind() == SyntaxKind::QualifiedName)
        .map(|qualified| path_text(&qualified));
    for item in decl
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::UseItem)
    {
        if let Some(alias) = import_from_item(&item, decl_kind, prefix.as_deref()) {
            out.push(alias);
        }
    }
}

fn import_from_item(
    item: &SyntaxNode,
    decl_kind: ImportKind,
    prefix: Option<&str>,
) -> Option<ImportAlias> {
    let kind = item_kind(item).unwrap_or(decl_kind);
    let path_node = item
        .children()
        .find(|child| child.kind() == SyntaxKind::QualifiedName)?;
    let path = path_text(&path_node);
    if path.is_empty() {
        return None;
    }
    let name = match prefix {
        Some(prefix) => SmolStr::new(format!("{prefix}\\{path}")),
        None => SmolStr::new(&path),
    };
    let alias = explicit_alias(item).unwrap_or_else(|| last_segment(&name));
    Some(ImportAlias {
        name,
        alias,
        kind,
        range: item.text_range(),
        used: false,
    })
}

fn declared_kind(decl: &SyntaxNode) -> ImportKind {
    token_kind_marker(decl).unwrap_or(ImportKind::Type)
}

fn item_kind(item: &SyntaxNode) -> Option<ImportKind> {
    token_kind_marker(item)
}

fn token_kind_marker(node: &SyntaxNode) -> Option<ImportKind> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find_map(|token| match token.kind() {
            SyntaxKind::KwFunction => Some(ImportKind::Function),
            SyntaxKind::KwConst => Some(ImportKind::Const),
            _ => None,
        })
}

fn explicit_alias(item: &SyntaxNode) -> Option<SmolStr> {
    let mut saw_as = false;
    for token in item
        .children_with_tokens()
        .filter_map(|element| element.into_token())
    {
        if token.kind() == SyntaxKind::KwAs {
            saw_as = true;
        } else if saw_as && token.kind() == SyntaxKind::Ident {
            return Some(SmolStr::new(token.text()));
        }
    }
    None
}

fn last_segment(name: &str) -> SmolStr {
    SmolStr::new(name.rsplit('\\').next().unwrap_or(name))
}

/// A qualified name's text with any leading separator trimmed; use
/// paths are rooted by definition.
fn path_text(node: &SyntaxNode) -> String {
    let text = compact_text(node);
    match text.strip_prefix('\\') {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

/// Marks aliases mentioned by name inside doc comments. The scan is
/// file-wide: prose like `{@see Widget}` keeps a `use App\Widget;`
/// alive even when no code references it.
pub fn mark_doc_comment_mentions(scopes: &mut [NamespaceScope], root: &SyntaxNode) {
    let comments: Vec<String> = root
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::DocComment)
        .map(|token| token.text().to_string())
        .collect();
    if comments.is_empty() {
        return;
    }
    for scope in scopes.iter_mut() {
        for alias in scope.imports.iter_mut().filter(|alias| !alias.used) {
            if comments
                .iter()
                .any(|comment| mentions_word(comment, &alias.alias))
            {
                alias.used = true;
            }
        }
    }
}

/// Whole-word, case-insensitive containment. Word characters are
/// ASCII alphanumerics and underscores, matching PHP identifiers.
fn mentions_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let lowered_text = text.to_ascii_lowercase();
    let lowered_word = word.to_ascii_lowercase();
    let bytes = text.as_bytes();
    let mut from = 0usize;
    while let Some(found) = lowered_text[from..].find(&lowered_word) {
        let start = from + found;
        let end = start + lowered_word.len();
        let left_bounded = start == 0 || !is_word_byte(bytes[start - 1]);
        let right_bounded = end >= bytes.len() || !is_word_byte(bytes[end]);
        if left_bounded && right_bounded {
            return true;
        }
        from = start + 1;
    }
    false
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
