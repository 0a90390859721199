//! Fixture-based scanner tests.
//!
//! The fixtures under tests/fixtures are small, syntactically valid C++
//! snippets; these tests pin down the exact symbol sets the scanner must
//! produce for them.

use declscan::scanning::{CppScanner, FileReport, Language};
use declscan::types::SymbolKind;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn symbol_triples(report: &FileReport) -> Vec<(SymbolKind, String, Option<String>)> {
    report
        .symbols
        .iter()
        .map(|s| {
            (
                s.kind,
                s.name.to_string(),
                s.namespace.as_ref().map(|n| n.to_string()),
            )
        })
        .collect()
}

#[test]
fn demo_fixture_yields_expected_symbols() {
    let report = FileReport::from_path(&fixture("demo.cpp")).unwrap();

    let ns = Some("MyNamespace".to_string());
    assert_eq!(
        symbol_triples(&report),
        vec![
            (SymbolKind::Namespace, "MyNamespace".to_string(), ns.clone()),
            (SymbolKind::Class, "MyClass".to_string(), ns.clone()),
            (SymbolKind::Struct, "MyStruct".to_string(), ns.clone()),
            (
                SymbolKind::TemplateFunction,
                "templateFunc".to_string(),
                ns.clone()
            ),
            (SymbolKind::Function, "my_func".to_string(), ns),
        ]
    );

    assert_eq!(report.language, Language::Cpp);
    assert_eq!(report.includes, vec!["iostream", "vector"]);

    let lines: Vec<u32> = report.symbols.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![4, 6, 13, 17, 20]);
}

#[test]
fn demo_v2_fixture_adds_enums_and_aliases() {
    let report = FileReport::from_path(&fixture("demo_v2.cpp")).unwrap();

    let kinds_and_names: Vec<(SymbolKind, &str)> = report
        .symbols
        .iter()
        .map(|s| (s.kind, &*s.name))
        .collect();
    assert_eq!(
        kinds_and_names,
        vec![
            (SymbolKind::Namespace, "MyNamespace"),
            (SymbolKind::Enum, "Color"),
            (SymbolKind::EnumClass, "Status"),
            (SymbolKind::TypedefAlias, "IntAlias"),
            (SymbolKind::UsingAlias, "StringAlias"),
            (SymbolKind::Class, "MyClass"),
            (SymbolKind::Struct, "MyStruct"),
            (SymbolKind::TemplateFunction, "templateFunc"),
            (SymbolKind::Function, "my_func"),
        ]
    );

    // Every symbol is namespace-scoped, and the new declarations appear in
    // source order before MyClass
    for symbol in &report.symbols {
        assert_eq!(symbol.namespace.as_deref(), Some("MyNamespace"));
    }
    let class_pos = report
        .symbols
        .iter()
        .position(|s| s.kind == SymbolKind::Class)
        .unwrap();
    let alias_pos = report
        .symbols
        .iter()
        .position(|s| s.kind == SymbolKind::UsingAlias)
        .unwrap();
    assert!(alias_pos < class_pos);
}

#[test]
fn member_declarations_are_not_top_level_symbols() {
    let report = FileReport::from_path(&fixture("demo.cpp")).unwrap();
    assert!(
        report.symbols.iter().all(|s| &*s.name != "method"),
        "MyClass::method must not appear as a top-level symbol"
    );
}

#[test]
fn scanning_is_idempotent_across_calls() {
    let text = std::fs::read_to_string(fixture("demo_v2.cpp")).unwrap();
    let scanner = CppScanner::new();
    let first = scanner.scan(&text).unwrap();
    let second = scanner.scan(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn removing_an_opening_brace_is_a_parse_error() {
    let text = std::fs::read_to_string(fixture("demo.cpp")).unwrap();
    // Drop the namespace's opening brace; the final `}` now underflows
    let broken = text.replacen("namespace MyNamespace {", "namespace MyNamespace", 1);
    let err = CppScanner::new().scan(&broken).unwrap_err();
    assert!(matches!(
        err,
        declscan::ParseError::UnexpectedClosingBrace { .. }
    ));
}

#[test]
fn appending_a_closing_brace_is_a_parse_error() {
    let mut text = std::fs::read_to_string(fixture("demo.cpp")).unwrap();
    text.push_str("\n}\n");
    let err = CppScanner::new().scan(&text).unwrap_err();
    assert!(matches!(
        err,
        declscan::ParseError::UnexpectedClosingBrace { .. }
    ));
}

#[test]
fn commented_declarations_are_ignored() {
    let text = std::fs::read_to_string(fixture("demo.cpp")).unwrap();
    let with_comment = text.replacen(
        "namespace MyNamespace {",
        "namespace MyNamespace {\n// class Fake {}",
        1,
    );
    let scan = CppScanner::new().scan(&with_comment).unwrap();
    assert!(scan.symbols.iter().all(|s| &*s.name != "Fake"));
}
