#![warn(clippy::pedantic)]
//! External-parser adapter: tree-sitter CST → raw exchange tree.
//!
//! This crate is the only place the grammar library is touched. The
//! conversion is mechanical and grammar-agnostic:
//!
//! - named children with a grammar field name become an attribute under
//!   that field name (several under one name become a sequence);
//! - anonymous children with a field name (operator tokens and the like)
//!   become a primitive string attribute holding the token text;
//! - named children without a field name are collected, in order, under a
//!   `children` attribute;
//! - nodes with no named children get a `text` attribute with their source
//!   slice.
//!
//! Which of those attributes actually survive normalization is decided by
//! the schema, not here.

use thiserror::Error;
use tree_sitter::Node;

use arbor_ast::raw::{Primitive, RawNode, RawValue};

/// Attribute name for named children the grammar leaves unfielded.
const CHILDREN_ATTR: &str = "children";
/// Attribute name for the source text of leaf nodes.
const TEXT_ATTR: &str = "text";

/// Failures at the parsing boundary.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum SourceError {
    /// The grammar could not be loaded into the parser; a dependency or
    /// ABI-version problem, not an input problem.
    #[error("failed to load the Java grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// tree-sitter returned no tree at all. Does not indicate a syntax
    /// error (those yield error nodes inside a tree) but a cancelled or
    /// misconfigured parse.
    #[error("the parser produced no tree for this input")]
    ParseFailed,
}

/// Parses Java source text and converts the resulting CST into a raw
/// exchange tree rooted at the grammar's `program` node.
///
/// # Errors
///
/// See [`SourceError`].
pub fn parse(source: &str) -> Result<RawNode, SourceError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_java::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(SourceError::ParseFailed)?;
    Ok(convert(tree.root_node(), source.as_bytes()))
}

/// Converts one CST node (and its subtree) into a [`RawNode`].
///
/// Traversal follows document order, so the produced attribute order is
/// deterministic for a given input. Attribute names are unique per node:
/// repeated named children under one field name merge into a sequence, a
/// repeated token keeps its first occurrence, and a named child under a
/// field name already holding a token replaces the token.
#[must_use]
pub fn convert(node: Node, code: &[u8]) -> RawNode {
    let mut groups: Vec<(&str, Group)> = Vec::new();

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            match (cursor.field_name(), child.is_named()) {
                (Some(field), true) => push_node(&mut groups, field, convert(child, code)),
                (Some(field), false) => push_token(&mut groups, field, node_text(child, code)),
                (None, true) => push_node(&mut groups, CHILDREN_ATTR, convert(child, code)),
                // Anonymous tokens without a field name are punctuation and
                // keywords; they carry no structure.
                (None, false) => {}
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    let mut raw = RawNode::new(node.kind());
    for (name, group) in groups {
        let value = match group {
            Group::Token(text) => RawValue::Primitive(Primitive::Str(text)),
            Group::Nodes(mut nodes) if nodes.len() == 1 => {
                RawValue::Node(Box::new(nodes.remove(0)))
            }
            Group::Nodes(nodes) => RawValue::Nodes(nodes),
        };
        raw.push_attribute(name, value);
    }

    if node.named_child_count() == 0 {
        raw.push_attribute(TEXT_ATTR, Primitive::Str(node_text(node, code)));
    }

    raw
}

enum Group {
    Nodes(Vec<RawNode>),
    Token(String),
}

fn push_node(groups: &mut Vec<(&str, Group)>, name: &'static str, node: RawNode) {
    match groups.iter_mut().find(|(group, _)| *group == name) {
        Some((_, Group::Nodes(nodes))) => nodes.push(node),
        // A named child under a name already holding a token: structure
        // wins over token text.
        Some((_, group)) => *group = Group::Nodes(vec![node]),
        None => groups.push((name, Group::Nodes(vec![node]))),
    }
}

// First token under a name wins; later ones (and tokens arriving after a
// named child of the same name) are dropped.
fn push_token(groups: &mut Vec<(&str, Group)>, name: &'static str, text: String) {
    if !groups.iter().any(|(group, _)| *group == name) {
        groups.push((name, Group::Token(text)));
    }
}

fn node_text(node: Node, code: &[u8]) -> String {
    node.utf8_text(code).unwrap_or_default().to_string()
}
