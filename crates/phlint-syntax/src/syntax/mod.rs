//! Syntax tree types for PHP source files.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        /// All syntax node and token kinds in the PHP syntax tree.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            /// Root node of a source file
            SourceFile,

            /// A namespace declaration, either `namespace A\B;` (owning all
            /// following items) or `namespace A\B { ... }`
            NamespaceDef,

            /// A whole import statement: `use A\B as C, D\E;`
            UseDecl,

            /// One imported name inside a `use` statement, with optional alias
            UseItem,

            /// The braced list of a grouped import: `use A\{B, C};`
            UseGroup,

            /// A class declaration: `class Name ... { ... }`
            ClassDecl,

            /// An interface declaration: `interface Name { ... }`
            InterfaceDecl,

            /// A trait declaration: `trait Name { ... }`
            TraitDecl,

            /// An anonymous class: `new class(...) { ... }`
            AnonClass,

            /// Extends clause: `extends Base` (interfaces may list several)
            ExtendsClause,

            /// Implements clause: `implements A, B`
            ImplementsClause,

            /// Trait usage inside a class body: `use SomeTrait;`
            TraitUseClause,

            /// A constant declaration: `const FOO = 1;`
            ConstDecl,

            /// A property declaration: `public ?Logger $log;`
            PropertyDecl,

            /// A named top-level function declaration
            FunctionDecl,

            /// A method declaration inside a class-like body
            MethodDecl,

            /// An anonymous function: `function (...) use (...) { ... }`
            ClosureExpr,

            /// An arrow function: `fn (...) => expr`
            ArrowFnExpr,

            /// Parameter list in a declaration
            ParamList,

            /// Single parameter
            Param,

            /// A type annotation: `?A\B|null`
            TypeHint,

            /// A return type: `: Type`
            ReturnType,

            /// A single name (one identifier)
            Name,

            /// A possibly fully-qualified name: `A\B\C` or `\A\B`
            QualifiedName,

            /// A brace-delimited region scanned tolerantly
            Block,

            /// An instantiation: `new A\B(...)`
            NewExpr,

            /// Scope resolution: `A\B::member`
            StaticAccess,

            /// The class-name side of `instanceof A\B`
            InstanceofExpr,

            /// A catch clause header: `catch (A | B $e)`
            CatchClause,

            /// A plain function call: `a\b(...)`
            CallExpr,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::DocComment
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` if this node declares a class, interface, or trait.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(self, Self::ClassDecl | Self::InterfaceDecl | Self::TraitDecl)
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for PHP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhpLanguage {}

macro_rules! define_syntax_kinds {
    ($($token:ident),* $(,)?) => {
        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            SyntaxKind::SourceFile,
            SyntaxKind::NamespaceDef,
            SyntaxKind::UseDecl,
            SyntaxKind::UseItem,
            SyntaxKind::UseGroup,
            SyntaxKind::ClassDecl,
            SyntaxKind::InterfaceDecl,
            SyntaxKind::TraitDecl,
            SyntaxKind::AnonClass,
            SyntaxKind::ExtendsClause,
            SyntaxKind::ImplementsClause,
            SyntaxKind::TraitUseClause,
            SyntaxKind::ConstDecl,
            SyntaxKind::PropertyDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::ClosureExpr,
            SyntaxKind::ArrowFnExpr,
            SyntaxKind::ParamList,
            SyntaxKind::Param,
            SyntaxKind::TypeHint,
            SyntaxKind::ReturnType,
            SyntaxKind::Name,
            SyntaxKind::QualifiedName,
            SyntaxKind::Block,
            SyntaxKind::NewExpr,
            SyntaxKind::StaticAccess,
            SyntaxKind::InstanceofExpr,
            SyntaxKind::CatchClause,
            SyntaxKind::CallExpr,
        ];
    };
}

for_each_token_kind!(define_syntax_kinds);

impl rowan::Language for PhpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the PHP syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<PhpLanguage>;

/// A syntax token in the PHP syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<PhpLanguage>;

/// A syntax element (either node or token) in the PHP syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<PhpLanguage>;

/// Returns the node's text with trivia removed.
///
/// A qualified name written as `A \ B` or split across comments reads
/// back as `A\B`.
#[must_use]
pub fn compact_text(node: &SyntaxNode) -> String {
    let mut text = String::new();
    for element in node.descendants_with_tokens() {
        if let rowan::NodeOrToken::Token(token) = element {
            if !token.kind().is_trivia() {
                text.push_str(token.text());
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwClass), SyntaxKind::KwClass);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(
            SyntaxKind::from(TokenKind::Backslash),
            SyntaxKind::Backslash
        );
    }

    #[test]
    fn test_is_trivia() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::LineComment.is_trivia());
        assert!(SyntaxKind::BlockComment.is_trivia());
        assert!(SyntaxKind::DocComment.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwUse.is_token());
        assert!(!SyntaxKind::UseDecl.is_token());
        assert!(!SyntaxKind::ClassDecl.is_token());

        assert!(!SyntaxKind::Ident.is_node());
        assert!(SyntaxKind::ClassDecl.is_node());
    }

    #[test]
    fn test_kind_round_trips_through_raw() {
        use rowan::Language;

        for kind in [
            SyntaxKind::Whitespace,
            SyntaxKind::Eof,
            SyntaxKind::SourceFile,
            SyntaxKind::CallExpr,
        ] {
            let raw = PhpLanguage::kind_to_raw(kind);
            assert_eq!(PhpLanguage::kind_from_raw(raw), kind);
        }
    }
}
