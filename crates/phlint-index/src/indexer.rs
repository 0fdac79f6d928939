//! Registers a parsed file's declarations into the index.

use std::path::Path;

use phlint_syntax::{compact_text, Parse, SyntaxKind, SyntaxNode};
use smol_str::SmolStr;
use tracing::debug;

use crate::defs::{Symbol, SymbolKind};
use crate::index::SymbolIndex;

/// Walks a parsed file and registers every class-like, function, and
/// method declaration under its namespace-qualified name, then marks
/// the file as indexed.
pub fn index_file(index: &mut SymbolIndex, path: &Path, parse: &Parse) {
    let root = parse.syntax();
    let mut registered = 0usize;
    collect_items(index, &root, None, &mut registered);
    index.add_file(path);
    debug!(path = %path.display(), symbols = registered, "indexed file");
}

fn collect_items(
    index: &mut SymbolIndex,
    node: &SyntaxNode,
    namespace: Option<&str>,
    registered: &mut usize,
) {
    for child in node.children() {
        match child.kind() {
            SyntaxKind::NamespaceDef => {
                let name = namespace_name(&child);
                collect_items(index, &child, name.as_deref(), registered);
            }
            SyntaxKind::ClassDecl | SyntaxKind::InterfaceDecl | SyntaxKind::TraitDecl => {
                if let Some(fqn) = qualified_decl_name(&child, namespace) {
                    let kind = match child.kind() {
                        SyntaxKind::InterfaceDecl => SymbolKind::Interface,
                        SyntaxKind::TraitDecl => SymbolKind::Trait,
                        _ => SymbolKind::Class,
                    };
                    index.add_symbol(Symbol::new(fqn.clone(), kind, child.text_range()));
                    *registered += 1;
                    register_methods(index, &child, &fqn, registered);
                }
                // Conditional declarations can nest further down.
                collect_items(index, &child, namespace, registered);
            }
            SyntaxKind::FunctionDecl => {
                if let Some(fqn) = qualified_decl_name(&child, namespace) {
                    index.add_symbol(Symbol::new(fqn, SymbolKind::Function, child.text_range()));
                    *registered += 1;
                }
                collect_items(index, &child, namespace, registered);
            }
            _ => collect_items(index, &child, namespace, registered),
        }
    }
}

fn register_methods(
    index: &mut SymbolIndex,
    class: &SyntaxNode,
    class_fqn: &str,
    registered: &mut usize,
) {
    let Some(body) = class
        .children()
        .find(|child| child.kind() == SyntaxKind::Block)
    else {
        return;
    };
    for member in body.children() {
        if member.kind() == SyntaxKind::MethodDecl {
            if let Some(name) = decl_name(&member) {
                let fqn = format!("{class_fqn}::{name}");
                index.add_symbol(Symbol::new(fqn, SymbolKind::Method, member.text_range()));
                *registered += 1;
            }
        }
    }
}

fn qualified_decl_name(node: &SyntaxNode, namespace: Option<&str>) -> Option<SmolStr> {
    let name = decl_name(node)?;
    Some(match namespace {
        Some(ns) => SmolStr::new(format!("{ns}\\{name}")),
        None => name,
    })
}

fn decl_name(node: &SyntaxNode) -> Option<SmolStr> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .map(|name| SmolStr::new(compact_text(&name)))
}

fn namespace_name(node: &SyntaxNode) -> Option<String> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::QualifiedName)
        .map(|name| compact_text(&name))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use phlint_syntax::parse;

    use super::index_file;
    use crate::defs::SymbolKind;
    use crate::index::SymbolIndex;

    fn indexed(text: &str) -> SymbolIndex {
        let mut index = SymbolIndex::new();
        let parse = parse(text);
        index_file(&mut index, Path::new("/tmp/fixture.php"), &parse);
        index
    }

    #[test]
    fn registers_namespaced_class_likes() {
        let index = indexed(
            "<?php\nnamespace App\\Service;\n\nclass Mailer {}\ninterface Transport {}\ntrait LogsCalls {}\n",
        );
        assert!(index.classlike_exists("App\\Service\\Mailer"));
        assert!(index.classlike_exists("app\\service\\transport"));
        assert!(index.classlike_exists("App\\Service\\LogsCalls"));
        assert!(!index.classlike_exists("Mailer"));
    }

    #[test]
    fn registers_global_declarations() {
        let index = indexed("<?php\nclass Legacy {}\nfunction helper() {}\n");
        assert!(index.classlike_exists("Legacy"));
        assert!(index.function_exists("helper"));
    }

    #[test]
    fn registers_methods_under_their_class() {
        let index = indexed(
            "<?php\nnamespace App;\nclass Mailer {\n    public function send() {}\n}\n",
        );
        assert!(index
            .symbols()
            .any(|s| s.kind == SymbolKind::Method && s.fqn == "App\\Mailer::send"));
    }

    #[test]
    fn braced_namespaces_qualify_their_contents() {
        let index = indexed("<?php\nnamespace A {\n    class X {}\n}\nnamespace B {\n    class X {}\n}\n");
        assert!(index.classlike_exists("A\\X"));
        assert!(index.classlike_exists("B\\X"));
        assert!(!index.classlike_exists("X"));
    }

    #[test]
    fn marks_the_file_indexed() {
        let index = indexed("<?php\n");
        assert!(index.is_file_indexed(Path::new("/tmp/fixture.php")));
        assert!(!index.is_file_indexed(Path::new("/tmp/other.php")));
    }
}
