//! The parser proper: token cursor, markers, and event emission.

use drop_bomb::DropBomb;

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;

/// Parses PHP source text into a lossless syntax tree.
///
/// Parsing never fails. Malformed input yields a tree that still covers
/// every byte of the input, plus a list of [`ParseError`]s.
#[must_use]
pub fn parse(text: &str) -> Parse {
    let tokens = lex(text);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    let (events, errors) = parser.finish();
    let green = Sink::new(&tokens, text, events).finish();
    Parse { green, errors }
}

/// A cursor over the non-trivia token stream that records tree-shaping
/// events.
pub(crate) struct Parser<'t> {
    source: Source<'t>,
    events: Vec<Event>,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            source: Source::new(tokens),
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> (Vec<Event>, Vec<ParseError>) {
        (self.events, self.errors)
    }

    /// Parses a whole source file.
    fn parse_source_file(&mut self) {
        let marker = self.start();
        while !self.at_end() {
            self.parse_item();
        }
        marker.complete(self, SyntaxKind::SourceFile);
    }

    /// Returns the kind of the current token.
    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    /// Returns the kind of the `n`th token ahead (0 is the current one).
    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    /// Returns `true` if the current token is `kind`.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    /// Returns `true` if the token stream is exhausted.
    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    /// Adds the current token to the current node and advances.
    pub(crate) fn bump(&mut self) {
        let kind = self.current();
        if kind == TokenKind::Eof {
            return;
        }
        self.source.bump();
        self.events.push(Event::token(kind.into()));
    }

    /// Consumes the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is `kind`, or records an error.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) {
        if !self.eat(kind) {
            self.error(message);
        }
    }

    /// Consumes a statement terminator. A closing `?>` tag ends a
    /// statement just like a semicolon does.
    pub(crate) fn expect_semicolon(&mut self) {
        if self.at(TokenKind::Semicolon) || self.at(TokenKind::CloseTag) {
            self.bump();
        } else {
            self.error("expected ';'");
        }
    }

    /// Records an error spanning the current token.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let (start, end) = match self.source.current_token() {
            Some(token) => (token.range.start().into(), token.range.end().into()),
            None => {
                let end = self.source.end_offset();
                (end, end)
            }
        };
        self.errors.push(ParseError {
            message: message.into(),
            start,
            end,
        });
    }

    /// Starts a new node. The marker must be completed or abandoned.
    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker::new(pos)
    }
}

/// Marks the start of a node that has not been finished yet.
///
/// Dropping a marker without completing or abandoning it is a parser
/// bug, and the embedded bomb makes it loud.
pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: usize) -> Self {
        Self {
            pos,
            bomb: DropBomb::new("markers must be completed or abandoned"),
        }
    }

    /// Finishes the node, wrapping everything recorded since the marker
    /// into a node of the given kind.
    pub(crate) fn complete(mut self, parser: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        match &mut parser.events[self.pos] {
            slot @ Event::Placeholder => *slot = Event::start(kind),
            _ => unreachable!("marker points at a non-placeholder event"),
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandons the node. Anything recorded since the marker is adopted
    /// by the enclosing node.
    pub(crate) fn abandon(mut self, parser: &mut Parser<'_>) {
        self.bomb.defuse();
        if self.pos == parser.events.len() - 1 {
            parser.events.pop();
        }
        // Otherwise the placeholder stays behind and the sink skips it.
    }
}

/// A node that has been parsed to completion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker {
    pos: usize,
}

impl CompletedMarker {
    /// Starts a new node that will become the parent of this one.
    pub(crate) fn precede(self, parser: &mut Parser<'_>) -> Marker {
        let marker = parser.start();
        match &mut parser.events[self.pos] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((marker.pos - self.pos) as u32);
            }
            _ => unreachable!("completed marker points at a non-start event"),
        }
        marker
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax::{SyntaxKind, SyntaxNode};

    fn root(text: &str) -> SyntaxNode {
        parse(text).syntax()
    }

    fn find_all(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        node.descendants().filter(|n| n.kind() == kind).collect()
    }

    #[test]
    fn parses_empty_input() {
        let parsed = parse("");
        assert!(parsed.ok());
        assert_eq!(parsed.syntax().kind(), SyntaxKind::SourceFile);
    }

    #[test]
    fn tree_is_lossless() {
        let text = "<?php\n\nnamespace A;\n\nuse B\\C;\n\nclass D extends C\n{\n    public function f(int $x): ?C\n    {\n        return new C($x);\n    }\n}\n";
        let parsed = parse(text);
        assert!(parsed.ok(), "unexpected errors: {:?}", parsed.errors());
        assert_eq!(parsed.syntax().text().to_string(), text);
    }

    #[test]
    fn garbage_is_still_lossless() {
        let text = "<?php class { $$$ ??? function ) } ]";
        let parsed = parse(text);
        assert!(!parsed.ok());
        assert_eq!(parsed.syntax().text().to_string(), text);
    }

    #[test]
    fn semicolon_namespace_wraps_following_items() {
        let node = root("<?php\nnamespace A;\n\nuse X\\Y;\n\nclass B {}\n");
        let namespaces = find_all(&node, SyntaxKind::NamespaceDef);
        assert_eq!(namespaces.len(), 1);
        let classes = find_all(&namespaces[0], SyntaxKind::ClassDecl);
        assert_eq!(classes.len(), 1);
        let uses = find_all(&namespaces[0], SyntaxKind::UseDecl);
        assert_eq!(uses.len(), 1);
    }

    #[test]
    fn second_namespace_ends_the_first() {
        let node = root("<?php\nnamespace A;\nclass B {}\nnamespace C;\nclass D {}\n");
        let namespaces = find_all(&node, SyntaxKind::NamespaceDef);
        assert_eq!(namespaces.len(), 2);
        assert_eq!(find_all(&namespaces[0], SyntaxKind::ClassDecl).len(), 1);
        assert_eq!(find_all(&namespaces[1], SyntaxKind::ClassDecl).len(), 1);
    }

    #[test]
    fn use_declarations_produce_items() {
        let node = root("<?php\nuse A\\B;\nuse C\\D as E;\nuse F\\{G, H as I};\n");
        assert_eq!(find_all(&node, SyntaxKind::UseDecl).len(), 3);
        assert_eq!(find_all(&node, SyntaxKind::UseItem).len(), 4);
        assert_eq!(find_all(&node, SyntaxKind::UseGroup).len(), 1);
    }

    #[test]
    fn use_item_range_is_trimmed() {
        let text = "<?php\nuse A\\B;\n";
        let node = root(text);
        let items = find_all(&node, SyntaxKind::UseItem);
        assert_eq!(items.len(), 1);
        let range = items[0].text_range();
        assert_eq!(&text[range.start().into()..range.end().into()], "A\\B");
    }

    #[test]
    fn class_members_get_nodes() {
        let node = root(
            "<?php\nclass A\n{\n    public const B = 1;\n    protected int $c = 2;\n    public function d(): void {}\n}\n",
        );
        assert_eq!(find_all(&node, SyntaxKind::ConstDecl).len(), 1);
        assert_eq!(find_all(&node, SyntaxKind::PropertyDecl).len(), 1);
        assert_eq!(find_all(&node, SyntaxKind::MethodDecl).len(), 1);
    }

    #[test]
    fn new_expression_carries_its_name() {
        let node = root("<?php\nfunction f() { $x = new \\DateTime(); }\n");
        let news = find_all(&node, SyntaxKind::NewExpr);
        assert_eq!(news.len(), 1);
        let name = find_all(&news[0], SyntaxKind::QualifiedName);
        assert_eq!(name.len(), 1);
        assert_eq!(name[0].text().to_string(), "\\DateTime");
    }

    #[test]
    fn static_access_and_call_get_nodes() {
        let node = root("<?php\nfunction f() { A\\B::make(); strlen('x'); }\n");
        assert_eq!(find_all(&node, SyntaxKind::StaticAccess).len(), 1);
        // One call wrapping the static access, one plain function call.
        assert_eq!(find_all(&node, SyntaxKind::CallExpr).len(), 2);
    }

    #[test]
    fn catch_clause_lists_exception_types() {
        let node = root("<?php\nfunction f() { try { g(); } catch (A | \\B\\C $e) { } }\n");
        let catches = find_all(&node, SyntaxKind::CatchClause);
        assert_eq!(catches.len(), 1);
        assert_eq!(find_all(&catches[0], SyntaxKind::QualifiedName).len(), 2);
    }

    #[test]
    fn doc_comment_is_a_sibling_of_the_declaration() {
        let text = "<?php\n\n/**\n * Does things.\n */\nclass A {}\n";
        let node = root(text);
        let class = find_all(&node, SyntaxKind::ClassDecl).remove(0);
        let mut cursor = class.prev_sibling_or_token();
        let mut saw_doc = false;
        while let Some(element) = cursor {
            if element.kind() == SyntaxKind::DocComment {
                saw_doc = true;
                break;
            }
            if !matches!(element.kind(), SyntaxKind::Whitespace) {
                break;
            }
            cursor = element.prev_sibling_or_token();
        }
        assert!(saw_doc, "doc comment should precede the class node");
        // The class node itself must not swallow the comment.
        let range = class.text_range();
        assert_eq!(&text[range.start().into()..range.end().into()], "class A {}");
    }

    #[test]
    fn trailing_trivia_stays_outside_the_last_declaration() {
        let text = "<?php\nclass A {}\n// tail\n";
        let node = root(text);
        let class = find_all(&node, SyntaxKind::ClassDecl).remove(0);
        let range = class.text_range();
        assert_eq!(&text[range.start().into()..range.end().into()], "class A {}");
        assert_eq!(node.text().to_string(), text);
    }

    #[test]
    fn errors_carry_offsets() {
        let parsed = parse("<?php\nuse ;\n");
        assert!(!parsed.ok());
        let error = &parsed.errors()[0];
        assert!(error.start >= 10);
        assert!(error.to_string().contains("at"));
    }
}
