//! The lint entry point: one file in, one report out.
//!
//! A pass runs in four phases over a single parse: collect namespace
//! scopes with their imports, resolve every reference site in source
//! order, check each callable's docblock against its declaration,
//! then sweep the import tables for aliases nothing touched. The
//! same index, path, and text always produce the same report.

use std::path::{Path, PathBuf};

use phlint_index::SymbolIndex;
use phlint_syntax::SyntaxNode;
use text_size::{TextRange, TextSize};
use thiserror::Error;
use tracing::debug;

use crate::docblock;
use crate::imports::{self, ImportKind, NamespaceScope};
use crate::refs::{self, RefSite};
use crate::report::{Report, UnknownClass, UnusedUse};
use crate::resolve::{self, NamePosition, ResolutionResult, TypeReference};
use crate::signature;

/// Errors that abort a lint run.
#[derive(Debug, Error)]
pub enum LintError {
    /// The file was never registered with the symbol index. Indexing
    /// must happen before linting.
    #[error("file has not been indexed: {}", .0.display())]
    FileNotIndexed(PathBuf),
}

/// Lints one file against the symbol index and produces its report.
///
/// The file must have been indexed first; linting an unknown file is
/// an error, not an empty report.
pub fn lint(index: &SymbolIndex, path: &Path, text: &str) -> Result<Report, LintError> {
    if !index.is_file_indexed(path) {
        return Err(LintError::FileNotIndexed(path.to_path_buf()));
    }
    let parse = phlint_syntax::parse(text);
    let root = parse.syntax();
    let lines = LineIndex::new(text);
    let mut scopes = imports::collect_scopes(&root);
    let mut report = Report::default();

    resolve_references(index, &root, &mut scopes, &mut report);
    check_callables(index, &root, &mut scopes, &lines, &mut report);
    imports::mark_doc_comment_mentions(&mut scopes, &root);
    collect_unused_imports(&scopes, &mut report);

    debug!(
        path = %path.display(),
        unknown = report.errors.unknown_classes.len(),
        unused = report.warnings.unused_use_statements.len(),
        "linted file"
    );
    Ok(report)
}

/// Resolves every reference site in source order, recording failed
/// class-like resolutions as unknown classes.
fn resolve_references(
    index: &SymbolIndex,
    root: &SyntaxNode,
    scopes: &mut [NamespaceScope],
    report: &mut Report,
) {
    for site in refs::collect_sites(root) {
        match site {
            RefSite::Class { name, range } => {
                let scope = scope_at_mut(scopes, range.start());
                let result = resolve::resolve(index, scope, &name, range, NamePosition::ClassLike);
                if let ResolutionResult::Unresolved(reference) = result {
                    push_unknown(report, &reference);
                }
            }
            RefSite::Call { name, range } => {
                // Unknown functions are not reported; resolving still
                // marks `use function` imports as used.
                let scope = scope_at_mut(scopes, range.start());
                let _ =
                    resolve::resolve(index, scope, &name, range, NamePosition::FunctionCall);
            }
            RefSite::Bare { name, range } => {
                mark_bare_mention(scopes, &name, range);
            }
            RefSite::Doc { text, range } => {
                resolve_docblock_types(index, scopes, &text, range, report);
            }
        }
    }
}

/// Resolves the type tags of one doc comment against the scope the
/// comment sits in.
fn resolve_docblock_types(
    index: &SymbolIndex,
    scopes: &mut [NamespaceScope],
    text: &str,
    range: TextRange,
    report: &mut Report,
) {
    let doc = docblock::parse(text, range);
    let scope = scope_at_mut(scopes, range.start());
    for expr in doc.type_exprs() {
        for member in resolve::type_members(&expr.text) {
            let start = expr.range.start() + TextSize::from(member.offset as u32);
            let member_range = TextRange::at(start, TextSize::of(member.name.as_str()));
            let result = resolve::resolve(
                index,
                scope,
                &member.name,
                member_range,
                NamePosition::ClassLike,
            );
            if let ResolutionResult::Unresolved(reference) = result {
                push_unknown(report, &reference);
            }
        }
    }
}

/// A bare name in expression position is how constant reads appear.
/// It keeps `use const` imports, and namespace paths through type
/// imports, alive without producing findings.
fn mark_bare_mention(scopes: &mut [NamespaceScope], name: &str, range: TextRange) {
    let scope = scope_at_mut(scopes, range.start());
    match name.split_once('\\') {
        Some((head, _)) => {
            if let Some(alias) = scope.alias_mut(head, ImportKind::Type) {
                alias.used = true;
            }
        }
        None => {
            if let Some(alias) = scope.alias_mut(name, ImportKind::Const) {
                alias.used = true;
            }
        }
    }
}

/// Runs the docblock checks over every checkable callable in source
/// order.
fn check_callables(
    index: &SymbolIndex,
    root: &SyntaxNode,
    scopes: &mut [NamespaceScope],
    lines: &LineIndex,
    report: &mut Report,
) {
    for node in root.descendants() {
        if !signature::is_checkable(&node) {
            continue;
        }
        let Some(sig) = signature::signature_of(&node) else {
            continue;
        };
        let start = node.text_range().start();
        let scope = scope_at_mut(scopes, start);
        signature::check(
            index,
            scope,
            &sig,
            lines.line_of(start),
            &mut report.warnings.docblock_issues,
        );
    }
}

fn collect_unused_imports(scopes: &[NamespaceScope], report: &mut Report) {
    for scope in scopes {
        for alias in scope.imports.iter().filter(|alias| !alias.used) {
            report.warnings.unused_use_statements.push(UnusedUse {
                name: alias.name.to_string(),
                alias: alias.alias.to_string(),
                start: alias.range.start().into(),
                end: alias.range.end().into(),
            });
        }
    }
}

fn push_unknown(report: &mut Report, reference: &TypeReference) {
    report.errors.unknown_classes.push(UnknownClass {
        name: reference.text.to_string(),
        namespace: reference.namespace.as_ref().map(ToString::to_string),
        start: reference.range.start().into(),
        end: reference.range.end().into(),
    });
}

/// The scope whose region contains `offset`. Scopes partition the
/// file by their starting offsets; anything before the first scope
/// belongs to the first.
fn scope_at_mut(scopes: &mut [NamespaceScope], offset: TextSize) -> &mut NamespaceScope {
    let at = scopes
        .iter()
        .rposition(|scope| scope.range.start() <= offset)
        .unwrap_or(0);
    &mut scopes[at]
}

/// Byte-offset to one-based line mapping.
struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (at, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((at + 1) as u32);
            }
        }
        Self { line_starts }
    }

    fn line_of(&self, offset: TextSize) -> u32 {
        let offset = u32::from(offset);
        self.line_starts
            .partition_point(|start| *start <= offset) as u32
    }
}
