//! Event-driven PHP parser.
//!
//! Parsing happens in two stages. The parser walks the non-trivia token
//! stream and records a flat list of events describing the tree shape.
//! The sink then replays those events against the full token stream,
//! weaving whitespace and comments back in, and builds the lossless
//! `rowan` tree.
//!
//! The grammar is deliberately shallow. Declarations, imports, type
//! hints, and name references get real nodes; everything else inside
//! function bodies is swallowed by a tolerant scanner. Errors never
//! abort a parse, they are collected alongside the tree.

mod event;
mod grammar;
#[allow(clippy::module_inception)]
mod parser;
mod sink;
mod source;

pub use parser::parse;

pub(crate) use parser::{CompletedMarker, Marker, Parser};

use crate::syntax::SyntaxNode;

/// The outcome of parsing: a green tree plus the errors encountered
/// while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// Returns the root node of the parsed file.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Returns the errors collected during parsing.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if the file parsed cleanly.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An error encountered while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {start}..{end}")]
pub struct ParseError {
    /// What the parser expected or could not make sense of.
    pub message: String,
    /// Byte offset where the error begins.
    pub start: u32,
    /// Byte offset where the error ends.
    pub end: u32,
}
