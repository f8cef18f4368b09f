//! Integration tests for language detection, parsing and feature extraction.

use std::path::PathBuf;

use modernizer::analysis::DeclarationKind;
use modernizer::language::{self, Language};
use modernizer::parser::{self, ParseOutcome};
use modernizer::FeatureRecord;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn setup() {
    parser::register_grammars();
}

fn analyze_fixture(name: &str) -> FeatureRecord {
    setup();
    let content = std::fs::read_to_string(testdata_path().join(name)).expect("fixture should exist");
    parser::parse(language::detect(name), &content).into_record()
}

#[test]
fn test_java_fixture() {
    let record = analyze_fixture("LegacyService.java");

    assert_eq!(record.language, Language::Java);
    assert_eq!(
        record.imports,
        vec![
            "import java.sql.Connection;",
            "import java.sql.PreparedStatement;",
            "import org.apache.log4j.Logger;"
        ]
    );
    assert!(record.functions.is_empty(), "Methods inside the class are not top-level");
    assert_eq!(record.classes.len(), 1);
    assert_eq!(record.classes[0].name, "LegacyService");
    assert_eq!(record.classes[0].start_line, 6);
    assert_eq!(record.classes[0].end_line, 23);
    // 1 + enhanced for + if + catch, counted inside the class body
    assert_eq!(record.complexity, 4);
    assert_eq!(record.lines_of_code, 25);
    assert!(record.parse_error.is_none());
}

#[test]
fn test_python_fixture() {
    let record = analyze_fixture("app.py");

    assert_eq!(record.language, Language::Python);
    assert_eq!(record.imports.len(), 4);
    assert_eq!(record.imports[2], "from org.apache.log4j import Logger");

    assert_eq!(record.functions.len(), 1);
    let load = &record.functions[0];
    assert_eq!(load.name, "load_orders");
    assert_eq!(load.kind, DeclarationKind::Function);
    assert_eq!(load.parameters, vec!["customer_id"]);
    assert_eq!((load.start_line, load.end_line), (8, 13));

    assert_eq!(record.classes.len(), 1);
    assert_eq!(record.classes[0].name, "OrderView");
    assert_eq!(record.complexity, 3);
    assert_eq!(record.lines_of_code, 20);
}

#[test]
fn test_typescript_fixture() {
    let record = analyze_fixture("inventory.ts");

    assert_eq!(record.language, Language::TypeScript);
    assert_eq!(record.imports, vec!["import { Pool } from 'pg';"]);
    assert_eq!(
        record.classes.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Item"],
        "Exported classes are wrapped in an export statement"
    );
    assert_eq!(record.functions.len(), 1);
    assert_eq!(record.functions[0].name, "restock");
    assert_eq!(
        record.functions[0].parameters,
        vec!["items: Item[]", "threshold?: number"]
    );
    assert_eq!(record.functions[0].start_line, 11);
    assert_eq!(record.functions[0].end_line, 19);
    assert_eq!(record.complexity, 3);
}

#[test]
fn test_unknown_extension_fixture() {
    let record = analyze_fixture("notes.xyz");

    assert_eq!(record.language, Language::Unknown);
    assert_eq!(record.complexity, 0);
    assert_eq!(record.lines_of_code, 5);
    assert!(record.functions.is_empty());
    assert!(record.classes.is_empty());
    assert!(record.imports.is_empty());
    assert!(record.parse_error.is_none());
}

#[test]
fn test_unrecognized_extensions_degrade() {
    setup();
    for name in ["README", "build.gradle", "style.css", "Makefile.am", "a.rs"] {
        assert_eq!(language::detect(name), Language::Unknown, "{}", name);
        let record = parser::parse(Language::Unknown, "").into_record();
        assert_eq!(record.complexity, 0);
        assert_eq!(record.lines_of_code, 1, "Empty content is one line");
    }
}

#[test]
fn test_cobol_has_no_grammar() {
    setup();
    assert_eq!(language::detect("PAYROLL.CBL"), Language::Cobol);
    match parser::parse(Language::Cobol, "       IDENTIFICATION DIVISION.\n") {
        ParseOutcome::Degraded(record) => {
            assert_eq!(record.language, Language::Cobol);
            assert!(record.parse_error.is_none());
        }
        ParseOutcome::Parsed(_) => panic!("cobol should degrade"),
    }
}

#[test]
fn test_java_single_method_scenario() {
    setup();
    let source = r#"static int total(int[] items, String label) {
    int sum = 0;
    for (int item : items) {
        if (item > 0) {
            sum += item;
        }
    }
    return sum;
}
"#;
    let record = parser::parse(Language::Java, source).into_record();

    assert_eq!(record.functions.len(), 1);
    assert_eq!(record.functions[0].name, "total");
    assert_eq!(record.functions[0].start_line, 0);
    assert_eq!(record.functions[0].end_line, 8);
    assert_eq!(record.complexity, 3);
}

#[test]
fn test_if_increments_complexity_at_any_depth() {
    setup();
    let flat = "def f(x):\n    return x\n";
    let shallow = "def f(x):\n    if x:\n        return x\n";
    let deep = "class A:\n    def f(self, x):\n        while x:\n            if x:\n                return x\n";

    let base = parser::parse(Language::Python, flat).into_record().complexity;
    assert_eq!(base, 1);
    assert_eq!(parser::parse(Language::Python, shallow).into_record().complexity, base + 1);
    // while + nested if
    assert_eq!(parser::parse(Language::Python, deep).into_record().complexity, base + 2);
}

#[test]
fn test_malformed_source_still_parses() {
    setup();
    let record = parser::parse(Language::Java, "class Broken { void x( { if }").into_record();
    assert!(record.parse_error.is_none(), "Error recovery yields a tree");
}
