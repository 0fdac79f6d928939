//! Symbol index for PHP projects.
//!
//! This crate provides the queryable store the diagnostics engine
//! resolves names against:
//!
//! - **Symbols**: class-likes, functions, and methods keyed by
//!   lowercased fully qualified name (PHP identifiers compare
//!   case-insensitively)
//! - **Built-ins**: a seeded subset of the PHP standard library so
//!   references like `DateTime` or `Traversable` resolve out of the box
//! - **Indexer**: a syntax-tree walk that registers a file's own
//!   declarations and marks the file as indexed
//!
//! The index is read-only during a lint pass; building and seeding
//! happen up front.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod builtins;
mod defs;
mod index;
mod indexer;

pub use defs::{normalize_fqn, Symbol, SymbolKind};
pub use index::SymbolIndex;
pub use indexer::index_file;
