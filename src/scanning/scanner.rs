//! The declaration scanner itself.
//!
//! Single pass over sanitized text. Statements are assembled up to a `;`,
//! `{`, or `}` boundary; a `{` classifies the statement head and pushes a
//! scope, a `}` pops one. Symbols are only recorded while every open scope
//! is a namespace (or `extern` block), which is what excludes members and
//! local declarations.

use super::source::{collect_includes, sanitize};
use crate::error::{ParseError, ParseResult};
use crate::types::{CompactString, Symbol, SymbolKind, compact_string};

/// Output of scanning one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Symbols in order of first occurrence in the source
    pub symbols: Vec<Symbol>,
    /// `#include` targets in first-occurrence order
    pub includes: Vec<String>,
}

#[derive(Debug)]
enum Scope {
    Namespace(CompactString),
    /// `extern "C" { ... }` is transparent for declarations
    Extern,
    /// class/struct/enum body; members are not recorded
    Type,
    FunctionBody,
    Block,
}

/// Keywords that can look like a function name in `<kw> (...)` position.
const CONTROL_KEYWORDS: &[&str] = &[
    "if",
    "while",
    "for",
    "switch",
    "return",
    "else",
    "do",
    "catch",
    "sizeof",
    "static_assert",
];

/// Statement-oriented scanner for C/C++ declarations.
///
/// Stateless: each `scan` call owns its scope stack and result buffer, so
/// scans may run in parallel across files with no shared mutable state.
#[derive(Debug, Default)]
pub struct CppScanner;

impl CppScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan one source text and return its symbols and includes.
    ///
    /// Empty or whitespace-only input yields an empty [`Scan`]. Scanning is
    /// deterministic: the same text always produces the same result.
    pub fn scan(&self, code: &str) -> ParseResult<Scan> {
        let includes = collect_includes(code);
        let masked = sanitize(code)?;

        let mut scopes: Vec<Scope> = Vec::new();
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut stmt = String::new();
        let mut stmt_blank = true;
        let mut stmt_line: u32 = 1;
        let mut line: u32 = 1;
        let mut in_directive = false;

        for ch in masked.chars() {
            if in_directive {
                if ch == '\n' {
                    line += 1;
                    in_directive = false;
                }
                continue;
            }
            match ch {
                '\n' => {
                    line += 1;
                    stmt.push(' ');
                }
                '#' if stmt_blank => {
                    // Preprocessor directives never enter statement assembly
                    in_directive = true;
                }
                '{' => {
                    let scope = open_scope(&stmt, stmt_line, &scopes, &mut symbols)?;
                    scopes.push(scope);
                    stmt.clear();
                    stmt_blank = true;
                }
                '}' => {
                    if scopes.pop().is_none() {
                        return Err(ParseError::UnexpectedClosingBrace { line });
                    }
                    stmt.clear();
                    stmt_blank = true;
                }
                ';' => {
                    classify_terminated(&stmt, stmt_line, &scopes, &mut symbols)?;
                    stmt.clear();
                    stmt_blank = true;
                }
                _ => {
                    if stmt_blank && !ch.is_whitespace() {
                        stmt_line = line;
                        stmt_blank = false;
                    }
                    stmt.push(ch);
                }
            }
        }

        if !scopes.is_empty() {
            return Err(ParseError::UnbalancedBraces {
                open: scopes.len(),
                line,
            });
        }

        Ok(Scan { symbols, includes })
    }
}

/// True while declarations should be recorded: only namespaces or extern
/// blocks are open.
fn at_declaration_scope(scopes: &[Scope]) -> bool {
    scopes
        .iter()
        .all(|s| matches!(s, Scope::Namespace(_) | Scope::Extern))
}

/// Innermost open namespace, if any.
fn current_namespace(scopes: &[Scope]) -> Option<CompactString> {
    scopes.iter().rev().find_map(|s| match s {
        Scope::Namespace(name) => Some(name.clone()),
        _ => None,
    })
}

/// Classify a statement head that opens a `{` body and emit its symbol.
fn open_scope(
    stmt: &str,
    line: u32,
    scopes: &[Scope],
    symbols: &mut Vec<Symbol>,
) -> ParseResult<Scope> {
    let head = stmt.trim();
    if head.is_empty() {
        return Ok(Scope::Block);
    }

    let (is_template, head) = strip_template_prefix(head);
    let declarative = at_declaration_scope(scopes);
    let mut words = head.split_whitespace();

    match words.next() {
        Some("namespace") => {
            let name = words
                .next()
                .and_then(leading_identifier)
                .ok_or(ParseError::MissingName {
                    construct: "namespace",
                    line,
                })?;
            let scope = Scope::Namespace(compact_string(name));
            if declarative {
                // The namespace is open at its own declaration point, so it
                // encloses itself.
                symbols.push(Symbol::new(
                    SymbolKind::Namespace,
                    name,
                    Some(compact_string(name)),
                    line,
                ));
            }
            Ok(scope)
        }
        Some(kw @ ("class" | "struct")) => {
            let kind = if kw == "class" {
                SymbolKind::Class
            } else {
                SymbolKind::Struct
            };
            let name = words
                .next()
                .and_then(leading_identifier)
                .ok_or(ParseError::MissingName {
                    construct: "class/struct",
                    line,
                })?;
            if declarative {
                symbols.push(Symbol::new(kind, name, current_namespace(scopes), line));
            }
            Ok(Scope::Type)
        }
        Some("enum") => {
            // Longest keyword match first: `enum class`/`enum struct` are
            // scoped enums, plain `enum` is not.
            let mut next = words.next();
            let kind = if matches!(next, Some("class") | Some("struct")) {
                next = words.next();
                SymbolKind::EnumClass
            } else {
                SymbolKind::Enum
            };
            let name = next
                .and_then(leading_identifier)
                .ok_or(ParseError::MissingName {
                    construct: "enum",
                    line,
                })?;
            if declarative {
                symbols.push(Symbol::new(kind, name, current_namespace(scopes), line));
            }
            Ok(Scope::Type)
        }
        Some("union") | Some("typedef") => Ok(Scope::Type),
        Some("extern") if !head.contains('(') => Ok(Scope::Extern),
        _ if head.contains('(') => {
            // `int a = g({1});` opens a brace initializer, not a function
            // body: an `=` before the parameter list rules out a definition.
            if head.split('(').next().is_some_and(|lead| lead.contains('=')) {
                return Ok(Scope::Block);
            }
            let Some(name) = function_name(head) else {
                return Ok(Scope::Block);
            };
            if CONTROL_KEYWORDS.contains(&name) {
                return Ok(Scope::Block);
            }
            if declarative {
                let kind = if is_template {
                    SymbolKind::TemplateFunction
                } else {
                    SymbolKind::Function
                };
                symbols.push(Symbol::new(kind, name, current_namespace(scopes), line));
                Ok(Scope::FunctionBody)
            } else {
                Ok(Scope::Block)
            }
        }
        // Array initializers, lambdas assigned mid-statement, etc.
        _ => Ok(Scope::Block),
    }
}

/// Classify a statement terminated by `;`.
///
/// Bodies were already handled at their `{`; what arrives here is forward
/// declarations, typedefs, aliases, prototypes, and variables. Prototypes
/// and variables are not recorded: a Function symbol requires a body.
fn classify_terminated(
    stmt: &str,
    line: u32,
    scopes: &[Scope],
    symbols: &mut Vec<Symbol>,
) -> ParseResult<()> {
    let head = stmt.trim();
    if head.is_empty() || !at_declaration_scope(scopes) {
        return Ok(());
    }

    let (_is_template, head) = strip_template_prefix(head);
    let namespace = current_namespace(scopes);
    let mut words = head.split_whitespace();

    match words.next() {
        Some(kw @ ("class" | "struct")) => {
            // Pure forward declaration only; `class Foo* p;` is a variable
            let name = words.next().and_then(leading_identifier);
            if let Some(name) = name
                && words.next().is_none()
                && head.ends_with(name)
            {
                let kind = if kw == "class" {
                    SymbolKind::Class
                } else {
                    SymbolKind::Struct
                };
                symbols.push(Symbol::new(kind, name, namespace, line));
            }
        }
        Some("enum") => {
            let mut next = words.next();
            let kind = if matches!(next, Some("class") | Some("struct")) {
                next = words.next();
                SymbolKind::EnumClass
            } else {
                SymbolKind::Enum
            };
            if let Some(name) = next.and_then(leading_identifier)
                && words.next().is_none()
                && head.ends_with(name)
            {
                symbols.push(Symbol::new(kind, name, namespace, line));
            }
        }
        Some("typedef") => {
            let name = last_identifier(head).ok_or(ParseError::MissingName {
                construct: "typedef",
                line,
            })?;
            symbols.push(Symbol::new(SymbolKind::TypedefAlias, name, namespace, line));
        }
        Some("using") => {
            // Only alias definitions (`using X = ...`); using-directives and
            // using-declarations are not symbols
            match words.next() {
                Some("namespace") | None => {}
                Some(word) => {
                    if let Some(name) = leading_identifier(word)
                        && head.contains('=')
                    {
                        symbols.push(Symbol::new(SymbolKind::UsingAlias, name, namespace, line));
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// Split a `template <...>` prefix off a statement head.
///
/// Returns `(true, remainder)` when a balanced prefix was found; `>>` closes
/// two levels, matching C++11 bracket rules.
fn strip_template_prefix(head: &str) -> (bool, &str) {
    let Some(rest) = head.strip_prefix("template") else {
        return (false, head);
    };
    // Reject identifiers that merely start with "template"
    if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        return (false, head);
    }
    let rest = rest.trim_start();
    if !rest.starts_with('<') {
        return (false, head);
    }

    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (true, rest[i + 1..].trim_start());
                }
            }
            _ => {}
        }
    }
    (false, head)
}

/// Identifier at the start of a word, e.g. `MyClass` from `MyClass:public`.
fn leading_identifier(word: &str) -> Option<&str> {
    let end = word
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    let candidate = &word[..end];
    if candidate.is_empty() || candidate.starts_with(|c: char| c.is_ascii_digit()) {
        None
    } else {
        Some(candidate)
    }
}

/// Last identifier token in a statement, e.g. `IntAlias` from
/// `typedef int IntAlias`.
fn last_identifier(stmt: &str) -> Option<&str> {
    let mut end = None;
    let mut start = 0;
    for (i, c) in stmt.char_indices().rev() {
        if c.is_alphanumeric() || c == '_' {
            if end.is_none() {
                end = Some(i + c.len_utf8());
            }
            start = i;
        } else if end.is_some() {
            break;
        }
    }
    let end = end?;
    let candidate = &stmt[start..end];
    if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        None
    } else {
        Some(candidate)
    }
}

/// Identifier immediately before the parameter-list `(`.
fn function_name(head: &str) -> Option<&str> {
    let paren = head.find('(')?;
    let before = head[..paren].trim_end();
    let mut start = before.len();
    for (i, c) in before.char_indices().rev() {
        if c.is_alphanumeric() || c == '_' {
            start = i;
        } else {
            break;
        }
    }
    if start < before.len() {
        Some(&before[start..])
    } else {
        None
    }
}
