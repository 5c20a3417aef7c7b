//! Shared helpers for the end-to-end tests.

use arbor_ast::presentable::{FieldValue, PresentableNode};
use arbor_ast::raw::RawNode;

/// Parses Java source into a raw tree, panicking on parser setup failures.
pub(crate) fn parse_java(source: &str) -> RawNode {
    arbor_source::parse(source).expect("Java source should parse")
}

/// Path to the shared Java fixtures.
pub(crate) fn test_data_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join("java")
}

/// First node of the given kind in pre-order, if any.
pub(crate) fn find_kind<'a>(node: &'a PresentableNode, kind: &str) -> Option<&'a PresentableNode> {
    if node.kind() == kind {
        return Some(node);
    }
    for (_, value) in node.fields() {
        match value {
            FieldValue::Primitive(_) => {}
            FieldValue::Node(child) => {
                if let Some(found) = find_kind(child, kind) {
                    return Some(found);
                }
            }
            FieldValue::Nodes(children) => {
                for child in children {
                    if let Some(found) = find_kind(child, kind) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

/// Total node count of a presentable tree.
pub(crate) fn count_nodes(node: &PresentableNode) -> usize {
    let mut count = 1;
    for (_, value) in node.fields() {
        match value {
            FieldValue::Primitive(_) => {}
            FieldValue::Node(child) => count += count_nodes(child),
            FieldValue::Nodes(children) => {
                count += children.iter().map(count_nodes).sum::<usize>();
            }
        }
    }
    count
}
