//! Token definitions for PHP source files.
//!
//! This module defines all lexical tokens the linter distinguishes. The token
//! kinds are designed to work with both the `logos` lexer generator and the
//! `rowan` lossless syntax tree library.
//!
//! The set is deliberately smaller than a full PHP lexer: tokens the parser
//! reacts to (declarations, imports, class-like reference sites) are precise,
//! while the rest of the language only needs to tokenize without leaking
//! string or comment contents into code position.

use logos::Logos;

fn lex_doc_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    // `/**/` is an empty plain comment; the second `*` already closes it.
    if lex.remainder().starts_with('/') {
        lex.bump(1);
        return true;
    }
    lex_to_comment_close(lex)
}

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_to_comment_close(lex)
}

fn lex_to_comment_close(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            lex.bump(i + 2);
            return true;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

/// Consumes a heredoc or nowdoc body after the `<<<` introducer.
///
/// The body runs until a line that starts (after optional indentation) with
/// the opening label followed by a non-identifier character. Everything in
/// between is swallowed so that code-looking text inside the string can never
/// reach the parser.
fn lex_heredoc(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rem = lex.remainder();
    let bytes = rem.as_bytes();
    let mut i = 0usize;

    let quote = match bytes.first() {
        Some(b'\'') | Some(b'"') => {
            i += 1;
            bytes[0]
        }
        _ => 0,
    };

    let label_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    if i == label_start {
        return false;
    }
    let label = rem[label_start..i].as_bytes();

    if quote != 0 {
        if bytes.get(i) == Some(&quote) {
            i += 1;
        } else {
            return false;
        }
    }

    while i < bytes.len() {
        while i < bytes.len() && bytes[i] != b'\n' {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        i += 1;

        let mut j = i;
        while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
            j += 1;
        }
        if bytes[j..].starts_with(label) {
            let after = j + label.len();
            let closed = match bytes.get(after) {
                None => true,
                Some(c) => !c.is_ascii_alphanumeric() && *c != b'_',
            };
            if closed {
                lex.bump(after);
                return true;
            }
        }
    }

    lex.bump(bytes.len());
    false
}

/// All token kinds the linter distinguishes in PHP source.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments, doc comments) - preserved but skipped by the parser
/// - Open/close tags
/// - Punctuation and operators
/// - Keywords (reserved words the grammar reacts to)
/// - Literals (numbers, strings, heredocs)
/// - Identifiers and variables
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Single-line comment: `// ...` or `# ...`
    ///
    /// PHP 8 attributes (`#[...]`) also land here; the linter treats them as
    /// comment trivia.
    #[regex(r"//[^\r\n]*")]
    #[regex(r"#[^\r\n]*")]
    LineComment,

    /// Plain block comment: `/* ... */`
    #[token("/*", lex_block_comment)]
    BlockComment,

    /// Documentation comment: `/** ... */`
    ///
    /// Kept as a distinct trivia kind so the semantic layer can find docblocks
    /// in the tree without re-lexing.
    #[token("/**", lex_doc_comment)]
    DocComment,

    // =========================================================================
    // TAGS
    // =========================================================================
    /// `<?php` or `<?=`
    #[token("<?php", ignore(ascii_case))]
    #[token("<?=")]
    OpenTag,

    /// `?>`
    #[token("?>")]
    CloseTag,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `\` - the namespace separator
    #[token("\\")]
    Backslash,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `::` - scope resolution
    #[token("::")]
    ColonColon,

    /// `:`
    #[token(":")]
    Colon,

    /// `->`
    #[token("->")]
    Arrow,

    /// `=>`
    #[token("=>")]
    FatArrow,

    /// `?`
    #[token("?")]
    Question,

    /// `|`
    #[token("|")]
    Pipe,

    /// `&`
    #[token("&")]
    Ampersand,

    /// `=`
    #[token("=")]
    Eq,

    /// `<`
    #[token("<")]
    Lt,

    /// `>`
    #[token(">")]
    Gt,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `!`
    #[token("!")]
    Bang,

    /// `@` - error suppression
    #[token("@")]
    At,

    /// `...`
    #[token("...")]
    Ellipsis,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `namespace`
    #[token("namespace", ignore(ascii_case))]
    KwNamespace,

    /// `use`
    #[token("use", ignore(ascii_case))]
    KwUse,

    /// `as`
    #[token("as", ignore(ascii_case))]
    KwAs,

    /// `class`
    #[token("class", ignore(ascii_case))]
    KwClass,

    /// `interface`
    #[token("interface", ignore(ascii_case))]
    KwInterface,

    /// `trait`
    #[token("trait", ignore(ascii_case))]
    KwTrait,

    /// `extends`
    #[token("extends", ignore(ascii_case))]
    KwExtends,

    /// `implements`
    #[token("implements", ignore(ascii_case))]
    KwImplements,

    /// `function`
    #[token("function", ignore(ascii_case))]
    KwFunction,

    /// `fn`
    #[token("fn", ignore(ascii_case))]
    KwFn,

    /// `const`
    #[token("const", ignore(ascii_case))]
    KwConst,

    /// `new`
    #[token("new", ignore(ascii_case))]
    KwNew,

    /// `instanceof`
    #[token("instanceof", ignore(ascii_case))]
    KwInstanceof,

    /// `catch`
    #[token("catch", ignore(ascii_case))]
    KwCatch,

    /// `public`
    #[token("public", ignore(ascii_case))]
    KwPublic,

    /// `private`
    #[token("private", ignore(ascii_case))]
    KwPrivate,

    /// `protected`
    #[token("protected", ignore(ascii_case))]
    KwProtected,

    /// `static`
    #[token("static", ignore(ascii_case))]
    KwStatic,

    /// `abstract`
    #[token("abstract", ignore(ascii_case))]
    KwAbstract,

    /// `final`
    #[token("final", ignore(ascii_case))]
    KwFinal,

    /// `var`
    #[token("var", ignore(ascii_case))]
    KwVar,

    /// `readonly`
    #[token("readonly", ignore(ascii_case))]
    KwReadonly,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: `42`, `0xFF`, `0b1010`, `1_000`
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    IntLiteral,

    /// Float literal: `3.14`, `1e10`, `2.5e-3`
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,

    /// Single-quoted string or backtick shell string
    #[regex(r"'([^'\\]|\\[\s\S])*'")]
    #[regex(r"`([^`\\]|\\[\s\S])*`")]
    StringLiteral,

    /// Double-quoted string (interpolation is not expanded)
    #[regex(r#""([^"\\]|\\[\s\S])*""#)]
    InterpolatedString,

    /// Heredoc or nowdoc: `<<<EOT ... EOT`
    #[token("<<<", lex_heredoc)]
    HeredocLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Variable: `$name`
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    /// Identifier: class, function, and constant names
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Lexing error - unrecognized input
    #[default]
    Error,

    /// End of file (never produced by the lexer; used by the parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comments).
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::DocComment
        )
    }

    /// Returns `true` if this token is a member or parameter modifier.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::KwPublic
                | Self::KwPrivate
                | Self::KwProtected
                | Self::KwStatic
                | Self::KwAbstract
                | Self::KwFinal
                | Self::KwVar
                | Self::KwReadonly
        )
    }

    /// Returns `true` if this token can start a (possibly qualified) name.
    #[must_use]
    pub fn can_start_name(self) -> bool {
        matches!(self, Self::Ident | Self::Backslash)
    }

    /// Returns `true` if this token can start a type annotation.
    #[must_use]
    pub fn can_start_type(self) -> bool {
        matches!(
            self,
            Self::Question | Self::Ident | Self::Backslash | Self::KwStatic
        )
    }

    /// Returns `true` if this token is a reserved word.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::KwNamespace as u16) && (self as u16) <= (Self::KwReadonly as u16)
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        Self(kind as u16)
    }
}
