//! Statement-level scanning.
//!
//! Function bodies are not parsed into full expression trees. The
//! scanner walks tokens tolerantly and carves out only the nodes the
//! semantic layer cares about: name references, object creations,
//! static accesses, `instanceof` tests, catch clauses, and nested
//! function-like declarations.

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::syntax::SyntaxKind;

impl Parser<'_> {
    /// Parses a run of tokens up to a statement boundary.
    pub(crate) fn parse_statement(&mut self) {
        while !self.at_end() {
            match self.current() {
                TokenKind::Semicolon | TokenKind::CloseTag => {
                    self.bump();
                    return;
                }
                TokenKind::LBrace => {
                    self.parse_block();
                    return;
                }
                // A stray closer belongs to the enclosing construct.
                TokenKind::RBrace => return,
                _ => self.scan_expr_step(),
            }
        }
    }

    /// Parses a braced statement block.
    pub(crate) fn parse_block(&mut self) {
        let marker = self.start();
        self.bump(); // {
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            self.parse_statement();
        }
        self.expect(TokenKind::RBrace, "expected '}'");
        marker.complete(self, SyntaxKind::Block);
    }

    /// Consumes at least one token in expression position, carving out
    /// reference nodes along the way.
    pub(crate) fn scan_expr_step(&mut self) {
        match self.current() {
            kind if kind.can_start_name() => self.parse_name_ref(),
            TokenKind::KwNew => self.parse_new_expr(),
            TokenKind::KwInstanceof => self.parse_instanceof(),
            TokenKind::KwCatch => self.parse_catch_clause(),
            TokenKind::KwFunction => self.parse_function_like(),
            TokenKind::KwFn => self.parse_arrow_fn(),
            TokenKind::KwClass | TokenKind::KwInterface | TokenKind::KwTrait => {
                self.parse_class_like();
            }
            TokenKind::KwAbstract | TokenKind::KwFinal
                if self.nth(1) == TokenKind::KwClass =>
            {
                self.parse_class_like();
            }
            TokenKind::KwNamespace => {
                // The `namespace\Name` relative-name operator. Swallow
                // it without carving out a reference node.
                self.bump();
                while self.at(TokenKind::Backslash) {
                    self.bump();
                    if self.at(TokenKind::Ident) {
                        self.bump();
                    }
                }
            }
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.scan_group(),
            _ => self.bump(),
        }
    }

    /// Parses a name in expression position, wrapping it into a call or
    /// static access depending on what follows.
    pub(crate) fn parse_name_ref(&mut self) {
        let name = self.parse_qualified_name();
        match self.current() {
            TokenKind::ColonColon => {
                let marker = name.precede(self);
                self.bump(); // ::
                if matches!(
                    self.current(),
                    TokenKind::Ident | TokenKind::Variable | TokenKind::KwClass
                ) {
                    self.bump();
                }
                let access = marker.complete(self, SyntaxKind::StaticAccess);
                if self.at(TokenKind::LParen) {
                    let call = access.precede(self);
                    self.scan_group();
                    call.complete(self, SyntaxKind::CallExpr);
                }
            }
            TokenKind::LParen => {
                let marker = name.precede(self);
                self.scan_group();
                marker.complete(self, SyntaxKind::CallExpr);
            }
            _ => {}
        }
    }

    /// Parses `new`, its class name or anonymous class, and arguments.
    pub(crate) fn parse_new_expr(&mut self) {
        let marker = self.start();
        self.bump(); // new
        match self.current() {
            TokenKind::KwClass => self.parse_anon_class(),
            kind if kind.can_start_name() => {
                self.parse_qualified_name();
                if self.at(TokenKind::LParen) {
                    self.scan_group();
                }
            }
            TokenKind::Variable | TokenKind::KwStatic => {
                self.bump();
                if self.at(TokenKind::LParen) {
                    self.scan_group();
                }
            }
            TokenKind::LParen => self.scan_group(),
            _ => self.error("expected a class name"),
        }
        marker.complete(self, SyntaxKind::NewExpr);
    }

    /// Parses an anonymous class from the `class` keyword onward.
    pub(crate) fn parse_anon_class(&mut self) {
        let marker = self.start();
        self.bump(); // class
        if self.at(TokenKind::LParen) {
            self.scan_group();
        }
        if self.at(TokenKind::KwExtends) {
            self.parse_extends_clause();
        }
        if self.at(TokenKind::KwImplements) {
            self.parse_implements_clause();
        }
        self.parse_class_body();
        marker.complete(self, SyntaxKind::AnonClass);
    }

    /// Parses `instanceof` plus the class it tests against.
    pub(crate) fn parse_instanceof(&mut self) {
        let marker = self.start();
        self.bump(); // instanceof
        match self.current() {
            kind if kind.can_start_name() => {
                self.parse_qualified_name();
            }
            TokenKind::Variable | TokenKind::KwStatic => self.bump(),
            _ => {}
        }
        marker.complete(self, SyntaxKind::InstanceofExpr);
    }

    /// Parses a catch clause with its union of exception types.
    pub(crate) fn parse_catch_clause(&mut self) {
        let marker = self.start();
        self.bump(); // catch
        if self.at(TokenKind::LParen) {
            self.bump();
            while !self.at_end() && !self.at(TokenKind::RParen) {
                match self.current() {
                    kind if kind.can_start_name() => {
                        self.parse_qualified_name();
                    }
                    TokenKind::Pipe | TokenKind::Variable => self.bump(),
                    _ => {
                        self.error("expected an exception type");
                        self.bump();
                    }
                }
            }
            self.expect(TokenKind::RParen, "expected ')'");
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        }
        marker.complete(self, SyntaxKind::CatchClause);
    }

    /// Disambiguates a named function declaration from a closure.
    pub(crate) fn parse_function_like(&mut self) {
        if self.at_named_function() {
            self.parse_function_decl();
        } else {
            self.parse_closure();
        }
    }

    /// Parses an anonymous function, including its capture list.
    pub(crate) fn parse_closure(&mut self) {
        let marker = self.start();
        self.bump(); // function
        self.eat(TokenKind::Ampersand);
        self.parse_param_list();
        if self.at(TokenKind::KwUse) {
            self.bump();
            if self.at(TokenKind::LParen) {
                self.scan_group();
            }
        }
        if self.at(TokenKind::Colon) {
            self.parse_return_type();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        }
        marker.complete(self, SyntaxKind::ClosureExpr);
    }

    /// Parses an arrow function. The body expression runs to the next
    /// boundary that is not nested inside a group.
    pub(crate) fn parse_arrow_fn(&mut self) {
        let marker = self.start();
        self.bump(); // fn
        self.eat(TokenKind::Ampersand);
        self.parse_param_list();
        if self.at(TokenKind::Colon) {
            self.parse_return_type();
        }
        if self.eat(TokenKind::FatArrow) {
            self.scan_value();
        }
        marker.complete(self, SyntaxKind::ArrowFnExpr);
    }

    /// Scans a value expression, stopping at a comma, terminator, or
    /// closer that does not belong to a nested group.
    pub(crate) fn scan_value(&mut self) {
        while !self.at_end() {
            match self.current() {
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::CloseTag => return,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.scan_group(),
                _ => self.scan_expr_step(),
            }
        }
    }

    /// Consumes a bracketed group, scanning nested expressions. Bails
    /// at a closer that belongs to an enclosing group.
    pub(crate) fn scan_group(&mut self) {
        let close = match self.current() {
            TokenKind::LParen => TokenKind::RParen,
            TokenKind::LBracket => TokenKind::RBracket,
            TokenKind::LBrace => TokenKind::RBrace,
            _ => return,
        };
        self.bump();
        while !self.at_end() {
            let kind = self.current();
            if kind == close {
                self.bump();
                return;
            }
            match kind {
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    self.error("unmatched closing bracket");
                    return;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.scan_group(),
                TokenKind::Semicolon | TokenKind::Comma => self.bump(),
                _ => self.scan_expr_step(),
            }
        }
        self.error("unclosed bracket");
    }
}
