//! Single source of truth for the token kind list.
//!
//! `TokenKind` (lexer) and the token half of `SyntaxKind` (syntax tree) must
//! stay in lockstep. Both are generated from this macro so that adding or
//! removing a token is a one-line change.

macro_rules! for_each_token_kind {
    ($mac:ident) => {
        $mac! {
            // Trivia
            Whitespace,
            LineComment,
            BlockComment,
            DocComment,
            // PHP open/close tags
            OpenTag,
            CloseTag,
            // Punctuation
            Semicolon,
            Comma,
            Dot,
            Backslash,
            LBrace,
            RBrace,
            LParen,
            RParen,
            LBracket,
            RBracket,
            // Operators
            ColonColon,
            Colon,
            Arrow,
            FatArrow,
            Question,
            Pipe,
            Ampersand,
            Eq,
            Lt,
            Gt,
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            Bang,
            At,
            Ellipsis,
            // Keywords
            KwNamespace,
            KwUse,
            KwAs,
            KwClass,
            KwInterface,
            KwTrait,
            KwExtends,
            KwImplements,
            KwFunction,
            KwFn,
            KwConst,
            KwNew,
            KwInstanceof,
            KwCatch,
            KwPublic,
            KwPrivate,
            KwProtected,
            KwStatic,
            KwAbstract,
            KwFinal,
            KwVar,
            KwReadonly,
            // Literals
            IntLiteral,
            FloatLiteral,
            StringLiteral,
            InterpolatedString,
            HeredocLiteral,
            // Identifiers
            Variable,
            Ident,
            // Special
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
