//! Semantic diagnostics for PHP source files.
//!
//! This crate turns one parsed file plus a symbol index into a
//! deterministic report:
//!
//! - **Resolution**: every class-like reference is resolved through
//!   the file's imports and namespace; names the index does not know
//!   become unknown-class errors
//! - **Imports**: each namespace block tracks its use statements, and
//!   aliases nothing referenced are reported as unused
//! - **Docblocks**: `/** ... */` comments are parsed for tags, their
//!   type expressions are resolved like code, and each function or
//!   non-private method has its docblock checked against the declared
//!   signature
//!
//! [`lint`] is the entry point; everything else is exposed for
//! callers that want the intermediate layers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod docblock;
mod imports;
mod lint;
mod refs;
mod report;
mod resolve;
mod signature;

pub use docblock::{Docblock, DocblockTag, TypeExpr};
pub use imports::{collect_scopes, ImportAlias, ImportKind, NamespaceScope};
pub use lint::{lint, LintError};
pub use refs::{collect_sites, RefSite};
pub use report::{
    DocblockIssue, DocblockIssues, Errors, MissingParameter, Report, UnknownClass, UnusedUse,
    Warnings,
};
pub use resolve::{
    is_reserved_type, resolve, NamePosition, ResolutionResult, Resolved, TypeReference,
};
pub use signature::{CallableSignature, Parameter};
