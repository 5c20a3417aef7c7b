//! End-to-end runs: Java source through the adapter, normalizer, and
//! enumerator.

use arbor_ast::presentable::FieldValue;
use arbor_ast::raw::RawValue;

use crate::utils::{count_nodes, find_kind, parse_java, test_data_path};

const SIMPLE_CLASS: &str = r"
class Foo {
    void bar(int y) {
        int z = y + 1;
    }
}
";

#[test]
fn adapter_exposes_grammar_fields_as_attributes() {
    let raw = parse_java("class Foo {}");
    assert_eq!(raw.kind(), "program");
    let Some(RawValue::Node(class)) = raw.attribute("children") else {
        panic!("program should have one child");
    };
    assert_eq!(class.kind(), "class_declaration");
    let Some(RawValue::Node(name)) = class.attribute("name") else {
        panic!("class should carry its name field");
    };
    assert_eq!(name.kind(), "identifier");
    assert_eq!(
        name.attribute("text"),
        Some(&RawValue::Primitive("Foo".into()))
    );
}

#[test]
fn pipeline_produces_a_valid_dense_tree() {
    let raw = parse_java(SIMPLE_CLASS);
    let ast = arbor::normalize(&raw, false).unwrap();
    let tree = arbor::enumerate(&ast).unwrap();

    assert_eq!(tree.root_id, 0);
    assert_eq!(tree.nodes[&tree.root_id].kind, "program");
    assert_eq!(tree.len(), count_nodes(&ast));
    let ids: Vec<u32> = tree.nodes.keys().copied().collect();
    let expected: Vec<u32> = (0..u32::try_from(tree.len()).unwrap()).collect();
    assert_eq!(ids, expected);
    tree.validate().unwrap();
}

#[test]
fn operator_tokens_become_primitive_fields() {
    let raw = parse_java(SIMPLE_CLASS);
    let ast = arbor::normalize(&raw, false).unwrap();
    let binary = find_kind(&ast, "binary_expression").expect("y + 1 should survive");
    let Some(FieldValue::Primitive(op)) = binary.field("operator") else {
        panic!("operator should be a primitive");
    };
    assert_eq!(op.as_str(), Some("+"));
}

#[test]
fn round_trip_is_isomorphic_for_parsed_source() {
    let raw = parse_java(SIMPLE_CLASS);
    let ast = arbor::normalize(&raw, true).unwrap();
    let tree = arbor::enumerate(&ast).unwrap();
    assert_eq!(tree.reconstruct().unwrap(), ast);
}

#[test]
fn export_is_deterministic_end_to_end() {
    let first = arbor::to_json(&arbor::export(SIMPLE_CLASS, true).unwrap()).unwrap();
    let second = arbor::to_json(&arbor::export(SIMPLE_CLASS, true).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn diagnostic_mode_annotates_every_node() {
    let tree = arbor::export(SIMPLE_CLASS, true).unwrap();
    for node in tree.nodes.values() {
        assert!(node.declined.is_some(), "node `{}`", node.kind);
    }

    let plain = arbor::export(SIMPLE_CLASS, false).unwrap();
    for node in plain.nodes.values() {
        assert!(node.declined.is_none(), "node `{}`", node.kind);
    }
}

#[test]
fn json_output_has_the_documented_shape() {
    let tree = arbor::export(SIMPLE_CLASS, false).unwrap();
    let json: serde_json::Value = serde_json::from_str(&arbor::to_json(&tree).unwrap()).unwrap();

    assert_eq!(json["root_id"], serde_json::json!(0));
    let nodes = json["nodes"].as_object().expect("nodes is an object");
    assert_eq!(nodes.len(), tree.len());
    for node in nodes.values() {
        assert!(node["kind"].is_string());
        assert!(node["fields"].is_object());
        assert!(node.get("declined").is_none());
    }
}

const MODERN_CLASS: &str = r#"
class Modern {
    static int counter;

    static {
        counter = 0;
    }

    Class<?> token() {
        return Modern.class;
    }

    String describe(int x) {
        return switch (x) {
            case 0 -> "zero";
            default -> "other";
        };
    }
}

record Point(int x, int y) {}
"#;

#[test]
fn modern_constructs_export_cleanly() {
    let raw = parse_java(MODERN_CLASS);
    let ast = arbor::normalize(&raw, false).unwrap();
    for kind in [
        "static_initializer",
        "class_literal",
        "switch_rule",
        "record_declaration",
    ] {
        assert!(find_kind(&ast, kind).is_some(), "missing `{kind}`");
    }

    let record = find_kind(&ast, "record_declaration").unwrap();
    assert!(record.field("name").is_some());
    assert!(record.field("parameters").is_some());

    let tree = arbor::enumerate(&ast).unwrap();
    tree.validate().unwrap();
}

#[test]
fn annotation_and_module_declarations_normalize() {
    let annotation = parse_java("@interface Marker { int value() default 1; }");
    let ast = arbor::normalize(&annotation, false).unwrap();
    assert!(find_kind(&ast, "annotation_type_declaration").is_some());
    assert!(find_kind(&ast, "annotation_type_element_declaration").is_some());

    let module = parse_java("module com.example.app { requires java.base; }");
    let ast = arbor::normalize(&module, false).unwrap();
    assert!(find_kind(&ast, "module_declaration").is_some());
    assert!(find_kind(&ast, "requires_module_directive").is_some());
}

#[test]
fn text_blocks_normalize_as_string_literals() {
    let source = "class T { String s = \"\"\"\n        hi\n        \"\"\"; }";
    let ast = arbor::normalize(&parse_java(source), false).unwrap();
    let literal = find_kind(&ast, "string_literal").expect("text block parses as a string literal");
    assert!(
        literal
            .fields()
            .iter()
            .any(|(name, _)| name == "children" || name == "text"),
        "text block content should survive normalization"
    );
}

#[test]
fn example_fixture_exports_cleanly() -> anyhow::Result<()> {
    let source = std::fs::read_to_string(test_data_path().join("Example.java"))?;
    let raw = parse_java(&source);
    let ast = arbor::normalize(&raw, true)?;
    let tree = arbor::enumerate(&ast)?;
    tree.validate()?;

    // The fixture exercises declarations, control flow, and literals.
    for kind in [
        "package_declaration",
        "import_declaration",
        "constructor_declaration",
        "method_declaration",
        "enhanced_for_statement",
        "if_statement",
        "while_statement",
        "string_literal",
    ] {
        assert!(find_kind(&ast, kind).is_some(), "missing `{kind}`");
    }
    Ok(())
}
