//! Type references: qualified names, hints, and return types.

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax::SyntaxKind;

impl Parser<'_> {
    /// Parses a possibly-qualified name into a single node. A leading
    /// separator is part of the name; the resolver treats it as the
    /// fully-qualified marker.
    pub(crate) fn parse_qualified_name(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.eat(TokenKind::Backslash);
        self.expect(TokenKind::Ident, "expected a name");
        while self.at(TokenKind::Backslash) && self.nth(1) == TokenKind::Ident {
            self.bump();
            self.bump();
        }
        marker.complete(self, SyntaxKind::QualifiedName)
    }

    /// Parses a type hint: nullable markers, union and intersection
    /// members, and parenthesized DNF groups.
    pub(crate) fn parse_type_hint(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.parse_type_atom();
        loop {
            match self.current() {
                TokenKind::Pipe => {
                    self.bump();
                    self.parse_type_atom();
                }
                // A bare `&` is also the by-reference marker, so only
                // treat it as an intersection when a type follows.
                TokenKind::Ampersand
                    if self.nth(1).can_start_type() || self.nth(1) == TokenKind::LParen =>
                {
                    self.bump();
                    self.parse_type_atom();
                }
                _ => break,
            }
        }
        marker.complete(self, SyntaxKind::TypeHint)
    }

    pub(crate) fn parse_type_atom(&mut self) {
        self.eat(TokenKind::Question);
        match self.current() {
            kind if kind.can_start_name() => {
                self.parse_qualified_name();
            }
            TokenKind::KwStatic => self.bump(),
            TokenKind::LParen => {
                self.bump();
                while !self.at_end() && !self.at(TokenKind::RParen) {
                    match self.current() {
                        kind if kind.can_start_type() => self.parse_type_atom(),
                        TokenKind::Ampersand | TokenKind::Pipe => self.bump(),
                        _ => break,
                    }
                }
                self.expect(TokenKind::RParen, "expected ')'");
            }
            _ => self.error("expected a type"),
        }
    }

    /// Parses `: Type` after a parameter list.
    pub(crate) fn parse_return_type(&mut self) {
        let marker = self.start();
        self.bump(); // :
        if self.current().can_start_type() || self.at(TokenKind::LParen) {
            self.parse_type_hint();
        } else {
            self.error("expected a return type");
        }
        marker.complete(self, SyntaxKind::ReturnType);
    }
}
