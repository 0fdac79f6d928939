//! Shared helpers for parser tests.

#![allow(dead_code, unused_imports)]

use phlint_syntax::{compact_text, parse, SyntaxKind, SyntaxNode};

/// Parses the source and asserts the parse produced no errors.
pub fn parse_ok(source: &str) -> SyntaxNode {
    let parsed = parse(source);
    assert!(parsed.ok(), "unexpected errors: {:?}", parsed.errors());
    parsed.syntax()
}

/// Collects every descendant of the given kind, in source order.
pub fn find_all(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    node.descendants().filter(|n| n.kind() == kind).collect()
}

/// Returns the trivia-free text of every descendant of the given kind.
pub fn texts_of(node: &SyntaxNode, kind: SyntaxKind) -> Vec<String> {
    find_all(node, kind).iter().map(compact_text).collect()
}
