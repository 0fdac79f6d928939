//! Top-level items: namespaces, imports, declarations, and members.

use crate::lexer::TokenKind;
use crate::parser::{CompletedMarker, Marker, Parser};
use crate::syntax::SyntaxKind;

impl Parser<'_> {
    /// Parses one top-level item.
    pub(crate) fn parse_item(&mut self) {
        match self.current() {
            TokenKind::OpenTag | TokenKind::CloseTag => self.bump(),
            TokenKind::KwNamespace if self.at_namespace_decl() => self.parse_namespace(),
            TokenKind::KwUse => self.parse_use_decl(),
            TokenKind::KwClass
            | TokenKind::KwInterface
            | TokenKind::KwTrait
            | TokenKind::KwAbstract
            | TokenKind::KwFinal
            | TokenKind::KwReadonly => self.parse_class_like(),
            TokenKind::KwFunction if self.at_named_function() => self.parse_function_decl(),
            TokenKind::KwConst => {
                let marker = self.start();
                self.parse_const_tail(marker);
            }
            TokenKind::RBrace => {
                self.error("unexpected '}'");
                self.bump();
            }
            _ => self.parse_statement(),
        }
    }

    /// Returns `true` if the cursor sits on a namespace declaration, as
    /// opposed to the `namespace\Name` relative-name operator.
    pub(crate) fn at_namespace_decl(&self) -> bool {
        self.at(TokenKind::KwNamespace) && self.nth(1) != TokenKind::Backslash
    }

    /// Returns `true` if `function` here introduces a named declaration
    /// rather than a closure.
    pub(crate) fn at_named_function(&self) -> bool {
        match self.nth(1) {
            TokenKind::Ident => true,
            TokenKind::Ampersand => self.nth(2) == TokenKind::Ident,
            _ => false,
        }
    }

    /// Parses a namespace declaration. The semicolon form wraps every
    /// item up to the next namespace declaration, so the node range
    /// doubles as the scope range.
    pub(crate) fn parse_namespace(&mut self) {
        let marker = self.start();
        self.bump(); // namespace
        if self.current().can_start_name() {
            self.parse_qualified_name();
        }
        if self.at(TokenKind::LBrace) {
            let body = self.start();
            self.bump();
            while !self.at_end() && !self.at(TokenKind::RBrace) {
                self.parse_item();
            }
            self.expect(TokenKind::RBrace, "expected '}'");
            body.complete(self, SyntaxKind::Block);
        } else {
            self.expect_semicolon();
            while !self.at_end() && !self.at_namespace_decl() {
                self.parse_item();
            }
        }
        marker.complete(self, SyntaxKind::NamespaceDef);
    }

    /// Parses a `use` import at file or namespace level.
    pub(crate) fn parse_use_decl(&mut self) {
        let marker = self.start();
        self.bump(); // use
        if self.at(TokenKind::KwFunction) || self.at(TokenKind::KwConst) {
            self.bump();
        }
        if self.current().can_start_name() {
            let path = self.parse_qualified_name();
            if self.at(TokenKind::Backslash) && self.nth(1) == TokenKind::LBrace {
                self.bump(); // the separator ahead of the group
                self.parse_use_group();
            } else {
                self.finish_use_item(path);
                while self.eat(TokenKind::Comma) {
                    if self.current().can_start_name() {
                        let path = self.parse_qualified_name();
                        self.finish_use_item(path);
                    } else {
                        self.error("expected an import path");
                        break;
                    }
                }
            }
        } else {
            self.error("expected an import path");
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::UseDecl);
    }

    /// Wraps an already-parsed path and its optional alias into an item.
    pub(crate) fn finish_use_item(&mut self, path: CompletedMarker) {
        let marker = path.precede(self);
        if self.at(TokenKind::KwAs) {
            self.bump();
            self.expect(TokenKind::Ident, "expected an alias name");
        }
        marker.complete(self, SyntaxKind::UseItem);
    }

    /// Parses the braced list of a grouped import.
    pub(crate) fn parse_use_group(&mut self) {
        let marker = self.start();
        self.bump(); // {
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            if self.current().can_start_name()
                || self.at(TokenKind::KwFunction)
                || self.at(TokenKind::KwConst)
            {
                let item = self.start();
                if self.at(TokenKind::KwFunction) || self.at(TokenKind::KwConst) {
                    self.bump();
                }
                self.parse_qualified_name();
                if self.at(TokenKind::KwAs) {
                    self.bump();
                    self.expect(TokenKind::Ident, "expected an alias name");
                }
                item.complete(self, SyntaxKind::UseItem);
            } else {
                self.error("expected an import path");
                self.bump();
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "expected '}'");
        marker.complete(self, SyntaxKind::UseGroup);
    }

    /// Parses a class, interface, or trait declaration, including any
    /// leading modifiers.
    pub(crate) fn parse_class_like(&mut self) {
        let marker = self.start();
        while self.current().is_modifier() {
            self.bump();
        }
        let kind = match self.current() {
            TokenKind::KwInterface => SyntaxKind::InterfaceDecl,
            TokenKind::KwTrait => SyntaxKind::TraitDecl,
            _ => SyntaxKind::ClassDecl,
        };
        if matches!(
            self.current(),
            TokenKind::KwClass | TokenKind::KwInterface | TokenKind::KwTrait
        ) {
            self.bump();
        } else {
            self.error("expected 'class', 'interface', or 'trait'");
        }
        self.parse_decl_name();
        if self.at(TokenKind::KwExtends) {
            self.parse_extends_clause();
        }
        if self.at(TokenKind::KwImplements) {
            self.parse_implements_clause();
        }
        self.parse_class_body();
        marker.complete(self, kind);
    }

    /// Parses the name of a declaration.
    pub(crate) fn parse_decl_name(&mut self) {
        let marker = self.start();
        self.expect(TokenKind::Ident, "expected a name");
        marker.complete(self, SyntaxKind::Name);
    }

    /// Parses `extends` plus its comma-separated parent list.
    pub(crate) fn parse_extends_clause(&mut self) {
        let marker = self.start();
        self.bump(); // extends
        loop {
            if self.current().can_start_name() {
                self.parse_qualified_name();
            } else {
                self.error("expected a type name");
                break;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        marker.complete(self, SyntaxKind::ExtendsClause);
    }

    /// Parses `implements` plus its comma-separated interface list.
    pub(crate) fn parse_implements_clause(&mut self) {
        let marker = self.start();
        self.bump(); // implements
        loop {
            if self.current().can_start_name() {
                self.parse_qualified_name();
            } else {
                self.error("expected a type name");
                break;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        marker.complete(self, SyntaxKind::ImplementsClause);
    }

    /// Parses a brace-delimited member list.
    pub(crate) fn parse_class_body(&mut self) {
        if !self.at(TokenKind::LBrace) {
            self.error("expected '{'");
            return;
        }
        let marker = self.start();
        self.bump();
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            self.parse_member();
        }
        self.expect(TokenKind::RBrace, "expected '}'");
        marker.complete(self, SyntaxKind::Block);
    }

    /// Parses one class member.
    pub(crate) fn parse_member(&mut self) {
        if self.at(TokenKind::KwUse) {
            self.parse_trait_use();
            return;
        }
        let marker = self.start();
        while self.current().is_modifier() {
            self.bump();
        }
        match self.current() {
            TokenKind::KwFunction => self.parse_callable_tail(marker, SyntaxKind::MethodDecl),
            TokenKind::KwConst => self.parse_const_tail(marker),
            TokenKind::Variable => self.parse_property_tail(marker),
            kind if kind.can_start_type() => self.parse_property_tail(marker),
            _ => {
                self.error("expected a class member");
                if !self.at_end() && !self.at(TokenKind::RBrace) {
                    self.bump();
                }
                marker.abandon(self);
            }
        }
    }

    /// Parses a named function at file scope.
    pub(crate) fn parse_function_decl(&mut self) {
        let marker = self.start();
        self.parse_callable_tail(marker, SyntaxKind::FunctionDecl);
    }

    /// Parses a function or method from the `function` keyword onward.
    /// Leading modifiers, if any, are already inside the marker.
    pub(crate) fn parse_callable_tail(&mut self, marker: Marker, kind: SyntaxKind) {
        self.bump(); // function
        self.eat(TokenKind::Ampersand);
        if self.at(TokenKind::Ident) || self.current().is_keyword() {
            // Method names are allowed to shadow keywords.
            let name = self.start();
            self.bump();
            name.complete(self, SyntaxKind::Name);
        } else {
            self.error("expected a function name");
        }
        self.parse_param_list();
        if self.at(TokenKind::Colon) {
            self.parse_return_type();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            // Abstract and interface methods end at the semicolon.
            self.expect_semicolon();
        }
        marker.complete(self, kind);
    }

    /// Parses a constant declaration from the `const` keyword onward.
    pub(crate) fn parse_const_tail(&mut self, marker: Marker) {
        self.bump(); // const
        if self.current().can_start_type() && self.nth(1) != TokenKind::Eq {
            self.parse_type_hint();
        }
        loop {
            if self.at(TokenKind::Ident) || self.current().is_keyword() {
                self.bump();
            } else {
                self.error("expected a constant name");
                break;
            }
            if self.eat(TokenKind::Eq) {
                self.scan_value();
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::ConstDecl);
    }

    /// Parses a property declaration from its optional type onward.
    pub(crate) fn parse_property_tail(&mut self, marker: Marker) {
        if !self.at(TokenKind::Variable) {
            self.parse_type_hint();
        }
        loop {
            if self.at(TokenKind::Variable) {
                self.bump();
            } else {
                self.error("expected a property name");
                break;
            }
            if self.eat(TokenKind::Eq) {
                self.scan_value();
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::PropertyDecl);
    }

    /// Parses a `use Trait;` clause inside a class body.
    pub(crate) fn parse_trait_use(&mut self) {
        let marker = self.start();
        self.bump(); // use
        loop {
            if self.current().can_start_name() {
                self.parse_qualified_name();
            } else {
                self.error("expected a trait name");
                break;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.at(TokenKind::LBrace) {
            // Conflict-resolution block.
            self.scan_group();
        } else {
            self.expect_semicolon();
        }
        marker.complete(self, SyntaxKind::TraitUseClause);
    }

    /// Parses a parenthesized parameter list.
    pub(crate) fn parse_param_list(&mut self) {
        if !self.at(TokenKind::LParen) {
            self.error("expected '('");
            return;
        }
        let marker = self.start();
        self.bump();
        while !self.at_end() && !self.at(TokenKind::RParen) {
            self.parse_param();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "expected ')'");
        marker.complete(self, SyntaxKind::ParamList);
    }

    /// Parses a single parameter, including promotion modifiers, type,
    /// by-reference and variadic markers, and a default value.
    pub(crate) fn parse_param(&mut self) {
        let marker = self.start();
        while self.current().is_modifier() {
            self.bump();
        }
        if self.current().can_start_type() || self.at(TokenKind::LParen) {
            self.parse_type_hint();
        }
        self.eat(TokenKind::Ampersand);
        self.eat(TokenKind::Ellipsis);
        if self.at(TokenKind::Variable) {
            self.bump();
        } else {
            self.error("expected a parameter variable");
            if !self.at_end() && !self.at(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                self.bump();
            }
        }
        if self.eat(TokenKind::Eq) {
            self.scan_value();
        }
        marker.complete(self, SyntaxKind::Param);
    }
}
