//! The queryable symbol store.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::defs::{normalize_fqn, Symbol, SymbolKind};

/// A store of known symbols and indexed files.
///
/// Symbols are keyed by normalized fully qualified name and kept in
/// registration order. The store is read-only for the duration of a
/// lint pass; all mutation happens during indexing.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    classlikes: IndexMap<SmolStr, Symbol>,
    functions: IndexMap<SmolStr, Symbol>,
    methods: IndexMap<SmolStr, Symbol>,
    files: FxHashSet<PathBuf>,
}

impl SymbolIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index pre-seeded with the PHP built-in symbols.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut index = Self::new();
        index.register_builtins();
        index
    }

    /// Registers a symbol under its normalized fully qualified name.
    /// A later registration with the same name replaces the earlier one.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        let key = normalize_fqn(&symbol.fqn);
        match symbol.kind {
            SymbolKind::Class | SymbolKind::Interface | SymbolKind::Trait => {
                self.classlikes.insert(key, symbol);
            }
            SymbolKind::Function => {
                self.functions.insert(key, symbol);
            }
            SymbolKind::Method => {
                self.methods.insert(key, symbol);
            }
        }
    }

    /// Marks the file at `path` as indexed.
    pub fn add_file(&mut self, path: &Path) {
        self.files.insert(normalize_path(path));
    }

    /// Looks up the class, interface, or trait registered under this
    /// fully qualified name.
    #[must_use]
    pub fn classlike(&self, fqn: &str) -> Option<&Symbol> {
        self.classlikes.get(&normalize_fqn(fqn))
    }

    /// Looks up the function registered under this fully qualified
    /// name.
    #[must_use]
    pub fn function(&self, fqn: &str) -> Option<&Symbol> {
        self.functions.get(&normalize_fqn(fqn))
    }

    /// Returns `true` if a class, interface, or trait with this fully
    /// qualified name is known.
    #[must_use]
    pub fn classlike_exists(&self, fqn: &str) -> bool {
        self.classlike(fqn).is_some()
    }

    /// Returns `true` if a function with this fully qualified name is
    /// known.
    #[must_use]
    pub fn function_exists(&self, fqn: &str) -> bool {
        self.function(fqn).is_some()
    }

    /// Returns `true` if the file at `path` has been indexed.
    #[must_use]
    pub fn is_file_indexed(&self, path: &Path) -> bool {
        self.files.contains(&normalize_path(path))
    }

    /// Returns the number of known symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classlikes.len() + self.functions.len() + self.methods.len()
    }

    /// Returns `true` if the index holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every known symbol in registration order, class-likes
    /// first.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.classlikes
            .values()
            .chain(self.functions.values())
            .chain(self.methods.values())
    }
}

/// Canonicalizes when the file exists; otherwise resolves `.` and `..`
/// lexically so equal spellings of a not-yet-written path still compare
/// equal.
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canon) = path.canonicalize() {
        return canon;
    }
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}
