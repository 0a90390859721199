//! Core symbol types shared by the scanner and the output layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a declaration recognized by the scanner.
///
/// `EnumClass` is distinct from `Enum` because scoped enums resolve their
/// enumerators differently; templated classes/structs are NOT tagged
/// separately (only templated free functions get their own kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Class,
    Struct,
    Enum,
    EnumClass,
    TypedefAlias,
    UsingAlias,
    Function,
    TemplateFunction,
}

impl SymbolKind {
    /// Stable display name used in text output and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "Namespace",
            SymbolKind::Class => "Class",
            SymbolKind::Struct => "Struct",
            SymbolKind::Enum => "Enum",
            SymbolKind::EnumClass => "EnumClass",
            SymbolKind::TypedefAlias => "TypedefAlias",
            SymbolKind::UsingAlias => "UsingAlias",
            SymbolKind::Function => "Function",
            SymbolKind::TemplateFunction => "TemplateFunction",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Namespace" => Ok(SymbolKind::Namespace),
            "Class" => Ok(SymbolKind::Class),
            "Struct" => Ok(SymbolKind::Struct),
            "Enum" => Ok(SymbolKind::Enum),
            "EnumClass" => Ok(SymbolKind::EnumClass),
            "TypedefAlias" => Ok(SymbolKind::TypedefAlias),
            "UsingAlias" => Ok(SymbolKind::UsingAlias),
            "Function" => Ok(SymbolKind::Function),
            "TemplateFunction" => Ok(SymbolKind::TemplateFunction),
            _ => Err("Unknown symbol kind"),
        }
    }
}

pub type CompactString = Box<str>;

pub fn compact_string(s: &str) -> CompactString {
    s.into()
}

/// One declared symbol extracted from a source snippet.
///
/// `namespace` is the innermost open namespace at the point of declaration.
/// A `namespace X {` line opens X before the symbol is recorded, so the
/// Namespace symbol carries its own name there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: CompactString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<CompactString>,
    /// 1-based line of the keyword token that introduced the declaration
    pub line: u32,
}

impl Symbol {
    pub fn new(
        kind: SymbolKind,
        name: impl Into<CompactString>,
        namespace: Option<CompactString>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace,
            line,
        }
    }

    /// Qualified name, empty namespace segment when at top level.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}::{}", self.name),
            None => format!("::{}", self.name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}::{}",
            self.line,
            self.kind,
            self.namespace.as_deref().unwrap_or(""),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_kind_round_trip() {
        let kinds = [
            SymbolKind::Namespace,
            SymbolKind::Class,
            SymbolKind::Struct,
            SymbolKind::Enum,
            SymbolKind::EnumClass,
            SymbolKind::TypedefAlias,
            SymbolKind::UsingAlias,
            SymbolKind::Function,
            SymbolKind::TemplateFunction,
        ];
        assert_eq!(kinds.len(), 9);

        for kind in kinds {
            assert_eq!(kind.as_str().parse::<SymbolKind>(), Ok(kind));
        }
        assert!("Widget".parse::<SymbolKind>().is_err());
    }

    #[test]
    fn test_symbol_display_with_namespace() {
        let sym = Symbol::new(
            SymbolKind::Class,
            "MyClass",
            Some(compact_string("MyNamespace")),
            7,
        );
        assert_eq!(sym.to_string(), "7: Class MyNamespace::MyClass");
        assert_eq!(sym.qualified_name(), "MyNamespace::MyClass");
    }

    #[test]
    fn test_symbol_display_top_level() {
        let sym = Symbol::new(SymbolKind::Function, "main", None, 1);
        assert_eq!(sym.to_string(), "1: Function ::main");
    }

    #[test]
    fn test_compact_string() {
        let s = compact_string("hello world");
        assert_eq!(&*s, "hello world");
    }
}
