//! The PHP grammar, split by concern.
//!
//! Each submodule extends [`Parser`](crate::parser::Parser) with the
//! productions for one area of the language: top-level items and
//! members, type references, and the tolerant statement scanner.

mod exprs;
mod items;
mod types;
