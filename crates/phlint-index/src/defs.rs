//! Symbol definitions.

use smol_str::SmolStr;
use text_size::TextRange;

/// The kind of an indexed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A class declaration.
    Class,
    /// An interface declaration.
    Interface,
    /// A trait declaration.
    Trait,
    /// A free function.
    Function,
    /// A method, keyed as `Class::method`.
    Method,
}

impl SymbolKind {
    /// Returns `true` for class, interface, and trait symbols.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Trait)
    }
}

/// A symbol known to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The fully qualified name as written at the declaration site.
    pub fqn: SmolStr,
    /// The kind of symbol.
    pub kind: SymbolKind,
    /// The declaration range within its file. Empty for built-ins.
    pub range: TextRange,
}

impl Symbol {
    /// Creates a new symbol.
    pub fn new(fqn: impl Into<SmolStr>, kind: SymbolKind, range: TextRange) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            range,
        }
    }
}

/// Normalizes a fully qualified name for lookup: strips a leading
/// separator and lowercases. PHP class and function names compare
/// case-insensitively.
#[must_use]
pub fn normalize_fqn(name: &str) -> SmolStr {
    let name = name.strip_prefix('\\').unwrap_or(name);
    SmolStr::new(name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::normalize_fqn;

    #[test]
    fn normalization_is_case_and_root_insensitive() {
        assert_eq!(normalize_fqn("\\App\\DateTime"), "app\\datetime");
        assert_eq!(normalize_fqn("App\\DateTime"), "app\\datetime");
        assert_eq!(normalize_fqn("DATETIME"), normalize_fqn("DateTime"));
    }
}
