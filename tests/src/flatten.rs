//! Enumerator behavior: pre-order numbering, density, reference integrity,
//! round-tripping.

use std::collections::BTreeMap;

use arbor_ast::errors::ExportError;
use arbor_ast::flatten::{EnumValue, EnumeratedNode, EnumeratedTree, enumerate_tree};
use arbor_ast::presentable::PresentableNode;

use crate::utils::count_nodes;

/// The specification scenario: a class with one method flattens to a
/// two-entry table rooted at id 0.
#[test]
fn class_with_method_scenario() {
    let ast = PresentableNode::new("Class")
        .with_field("name", "Foo")
        .with_field(
            "methods",
            vec![PresentableNode::new("Method").with_field("name", "bar")],
        );
    let tree = enumerate_tree(&ast).unwrap();

    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        serde_json::json!({
            "root_id": 0,
            "nodes": {
                "0": {"kind": "Class", "fields": {"name": "Foo", "methods": [1]}},
                "1": {"kind": "Method", "fields": {"name": "bar"}},
            }
        })
    );
}

fn sample_tree() -> PresentableNode {
    PresentableNode::new("root")
        .with_field(
            "first",
            PresentableNode::new("inner").with_field("leaf", PresentableNode::new("a")),
        )
        .with_field(
            "rest",
            vec![
                PresentableNode::new("b"),
                PresentableNode::new("c").with_field("tag", "t"),
            ],
        )
}

#[test]
fn identifiers_follow_preorder() {
    let tree = enumerate_tree(&sample_tree()).unwrap();
    assert_eq!(tree.root_id, 0);
    assert_eq!(tree.nodes[&0].kind, "root");
    assert_eq!(tree.nodes[&1].kind, "inner");
    assert_eq!(tree.nodes[&2].kind, "a");
    assert_eq!(tree.nodes[&3].kind, "b");
    assert_eq!(tree.nodes[&4].kind, "c");
}

#[test]
fn identifiers_are_dense_and_references_resolve() {
    let ast = sample_tree();
    let tree = enumerate_tree(&ast).unwrap();

    assert_eq!(tree.len(), count_nodes(&ast));
    let ids: Vec<u32> = tree.nodes.keys().copied().collect();
    let expected: Vec<u32> = (0..u32::try_from(tree.len()).unwrap()).collect();
    assert_eq!(ids, expected);

    tree.validate().unwrap();

    // Every non-root id is referenced from exactly one parent field.
    let mut reference_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for node in tree.nodes.values() {
        for (_, value) in &node.fields {
            match value {
                EnumValue::Primitive(_) => {}
                EnumValue::Ref(id) => *reference_counts.entry(*id).or_default() += 1,
                EnumValue::Refs(ids) => {
                    for id in ids {
                        *reference_counts.entry(*id).or_default() += 1;
                    }
                }
            }
        }
    }
    assert!(reference_counts.get(&tree.root_id).is_none());
    for id in tree.nodes.keys() {
        if *id != tree.root_id {
            assert_eq!(reference_counts.get(id), Some(&1), "id {id}");
        }
    }
}

#[test]
fn primitives_are_copied_verbatim() {
    let tree = enumerate_tree(&sample_tree()).unwrap();
    assert_eq!(
        tree.nodes[&4].fields,
        vec![("tag".to_string(), EnumValue::Primitive("t".into()))]
    );
}

#[test]
fn round_trip_reconstructs_an_isomorphic_tree() {
    let ast = sample_tree();
    let tree = enumerate_tree(&ast).unwrap();
    assert_eq!(tree.reconstruct().unwrap(), ast);
}

#[test]
fn declined_data_is_carried_through() {
    let mut ast = PresentableNode::new("root");
    ast.set_declined(vec!["alpha".to_string(), "beta".to_string()]);
    let tree = enumerate_tree(&ast).unwrap();
    assert_eq!(
        tree.nodes[&0].declined,
        Some(vec!["alpha".to_string(), "beta".to_string()])
    );
    assert_eq!(tree.reconstruct().unwrap(), ast);
}

#[test]
fn validate_detects_dangling_references() {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        0,
        EnumeratedNode {
            kind: "root".to_string(),
            fields: vec![("child".to_string(), EnumValue::Ref(99))],
            declined: None,
        },
    );
    let tree = EnumeratedTree { root_id: 0, nodes };

    assert_eq!(
        tree.validate().unwrap_err(),
        ExportError::DanglingReference { id: 99 }
    );
    assert_eq!(
        tree.reconstruct().unwrap_err(),
        ExportError::DanglingReference { id: 99 }
    );
}

fn table_node(kind: &str, fields: Vec<(String, EnumValue)>) -> EnumeratedNode {
    EnumeratedNode {
        kind: kind.to_string(),
        fields,
        declined: None,
    }
}

#[test]
fn validate_rejects_cyclic_tables() {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        0,
        table_node("a", vec![("child".to_string(), EnumValue::Ref(1))]),
    );
    nodes.insert(
        1,
        table_node("b", vec![("child".to_string(), EnumValue::Ref(0))]),
    );
    let tree = EnumeratedTree { root_id: 0, nodes };

    // The root gains an incoming reference, which no tree allows.
    assert_eq!(
        tree.validate().unwrap_err(),
        ExportError::InvalidReferenceCount { id: 0, count: 1 }
    );
}

#[test]
fn validate_rejects_shared_children() {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        0,
        table_node(
            "root",
            vec![
                ("left".to_string(), EnumValue::Ref(1)),
                ("right".to_string(), EnumValue::Ref(1)),
            ],
        ),
    );
    nodes.insert(1, table_node("leaf", Vec::new()));
    let tree = EnumeratedTree { root_id: 0, nodes };

    assert_eq!(
        tree.validate().unwrap_err(),
        ExportError::InvalidReferenceCount { id: 1, count: 2 }
    );
}

#[test]
fn validate_rejects_identifier_gaps() {
    let mut nodes = BTreeMap::new();
    nodes.insert(
        0,
        table_node("root", vec![("child".to_string(), EnumValue::Ref(2))]),
    );
    nodes.insert(2, table_node("leaf", Vec::new()));
    let tree = EnumeratedTree { root_id: 0, nodes };

    assert_eq!(
        tree.validate().unwrap_err(),
        ExportError::IdentifierGap {
            expected: 1,
            found: 2
        }
    );
}

#[test]
fn validate_rejects_nodes_detached_from_the_root() {
    let mut nodes = BTreeMap::new();
    nodes.insert(0, table_node("root", Vec::new()));
    nodes.insert(
        1,
        table_node("a", vec![("next".to_string(), EnumValue::Ref(2))]),
    );
    nodes.insert(
        2,
        table_node("b", vec![("next".to_string(), EnumValue::Ref(1))]),
    );
    let tree = EnumeratedTree { root_id: 0, nodes };

    assert_eq!(
        tree.validate().unwrap_err(),
        ExportError::UnreachableNode { id: 1 }
    );
}

#[test]
fn single_node_tree() {
    let tree = enumerate_tree(&PresentableNode::new("leaf")).unwrap();
    assert_eq!(tree.root_id, 0);
    assert_eq!(tree.len(), 1);
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        serde_json::json!({"root_id": 0, "nodes": {"0": {"kind": "leaf", "fields": {}}}})
    );
}

#[test]
fn enumeration_is_deterministic() {
    let ast = sample_tree();
    let first = serde_json::to_string(&enumerate_tree(&ast).unwrap()).unwrap();
    let second = serde_json::to_string(&enumerate_tree(&ast).unwrap()).unwrap();
    assert_eq!(first, second);
}
