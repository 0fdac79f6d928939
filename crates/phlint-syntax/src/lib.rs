//! `phlint-syntax` - Lexer, parser, and concrete syntax tree for PHP source files.
//!
//! This crate provides the low-level syntactic analysis used by the linter:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//!
//! # Design Principles
//!
//! This crate follows the design of `rust-analyzer` and uses the `rowan` library
//! for building lossless syntax trees. Key design decisions:
//!
//! - **Lossless**: All source text is preserved, including whitespace, comments,
//!   and doc comments (which the semantic layer reads back out of the tree)
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Shallow**: Declarations, imports, and class-like reference sites get
//!   structured nodes; everything else is scanned token-by-token
//!
//! # Example
//!
//! ```
//! use phlint_syntax::lexer::{lex, TokenKind};
//!
//! let source = "<?php $x = new DateTime();";
//! let tokens = lex(source);
//!
//! // Filter out whitespace to see the meaningful tokens
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::OpenTag);
//! assert_eq!(meaningful[1].kind, TokenKind::Variable);
//! assert_eq!(meaningful[2].kind, TokenKind::Eq);
//! assert_eq!(meaningful[3].kind, TokenKind::KwNew);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{compact_text, PhpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
