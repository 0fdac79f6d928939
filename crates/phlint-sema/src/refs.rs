//! Reference-site collection.
//!
//! One preorder walk gathers, in source order, every place a file
//! mentions a symbol by name: instantiations, static accesses,
//! `instanceof` tests, catch clauses, declared type hints, extends
//! and implements clauses, trait uses, bare calls, and doc comments.
//! Declaration machinery (namespace names, use paths) is not a
//! reference and is left out.

use phlint_syntax::{compact_text, SyntaxElement, SyntaxKind, SyntaxNode};
use smol_str::SmolStr;
use text_size::TextRange;

/// A site that mentions a symbol by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefSite {
    /// A class-like name in code, checked against the index.
    Class {
        /// The name as written.
        name: SmolStr,
        /// The name's range.
        range: TextRange,
    },
    /// A bare name invoked as a function, consulted for import
    /// tracking only.
    Call {
        /// The name as written.
        name: SmolStr,
        /// The name's range.
        range: TextRange,
    },
    /// A bare name in plain expression position, the shape constant
    /// reads take; consulted for import tracking only.
    Bare {
        /// The name as written.
        name: SmolStr,
        /// The name's range.
        range: TextRange,
    },
    /// A doc comment to mine for type tags.
    Doc {
        /// The comment text, fences included.
        text: String,
        /// The comment's range.
        range: TextRange,
    },
}

/// Collects every reference site under `root` in source order.
#[must_use]
pub fn collect_sites(root: &SyntaxNode) -> Vec<RefSite> {
    let mut sites = Vec::new();
    for element in root.descendants_with_tokens() {
        match element {
            SyntaxElement::Node(node) => collect_node(&node, &mut sites),
            SyntaxElement::Token(token) => {
                if token.kind() == SyntaxKind::DocComment {
                    sites.push(RefSite::Doc {
                        text: token.text().to_string(),
                        range: token.text_range(),
                    });
                }
            }
        }
    }
    sites
}

fn collect_node(node: &SyntaxNode, sites: &mut Vec<RefSite>) {
    match node.kind() {
        SyntaxKind::NewExpr | SyntaxKind::StaticAccess | SyntaxKind::InstanceofExpr => {
            if let Some(name) = first_qualified_name(node) {
                sites.push(class_site(&name));
            }
        }
        SyntaxKind::CatchClause
        | SyntaxKind::ExtendsClause
        | SyntaxKind::ImplementsClause
        | SyntaxKind::TraitUseClause => {
            for name in node
                .children()
                .filter(|child| child.kind() == SyntaxKind::QualifiedName)
            {
                sites.push(class_site(&name));
            }
        }
        // Type hints hold their names at arbitrary depth once
        // parenthesized forms come into play.
        SyntaxKind::TypeHint => {
            for name in node
                .descendants()
                .filter(|child| child.kind() == SyntaxKind::QualifiedName)
            {
                sites.push(class_site(&name));
            }
        }
        SyntaxKind::CallExpr => {
            // Only a directly-named call: `Foo::bar()` keeps its name
            // inside the static access.
            if let Some(name) = first_qualified_name(node) {
                sites.push(RefSite::Call {
                    name: SmolStr::new(compact_text(&name)),
                    range: name.text_range(),
                });
            }
        }
        SyntaxKind::QualifiedName => {
            if in_bare_position(node) {
                sites.push(RefSite::Bare {
                    name: SmolStr::new(compact_text(node)),
                    range: node.text_range(),
                });
            }
        }
        _ => {}
    }
}

fn first_qualified_name(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::QualifiedName)
}

fn class_site(name: &SyntaxNode) -> RefSite {
    RefSite::Class {
        name: SmolStr::new(compact_text(name)),
        range: name.text_range(),
    }
}

/// A qualified name is bare when no construct above it claims it as
/// its own.
fn in_bare_position(node: &SyntaxNode) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    !matches!(
        parent.kind(),
        SyntaxKind::NewExpr
            | SyntaxKind::StaticAccess
            | SyntaxKind::InstanceofExpr
            | SyntaxKind::CatchClause
            | SyntaxKind::ExtendsClause
            | SyntaxKind::ImplementsClause
            | SyntaxKind::TraitUseClause
            | SyntaxKind::TypeHint
            | SyntaxKind::CallExpr
            | SyntaxKind::UseDecl
            | SyntaxKind::UseItem
            | SyntaxKind::UseGroup
            | SyntaxKind::NamespaceDef
    )
}
