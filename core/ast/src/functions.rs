//! Method and constructor extraction from normalized Java trees.
//!
//! Walks a presentable tree and collects a summary per function-like
//! declaration: name, parameters, textual return type, and the nearest
//! enclosing element. Useful for consumers that want a function inventory
//! without walking the exported tree themselves.

use serde::Serialize;

use crate::presentable::{FieldValue, PresentableNode};

const METHOD_KINDS: &[&str] = &["method_declaration", "constructor_declaration"];
const ENCLOSING_KINDS: &[(&str, EnclosingElementType)] = &[
    ("class_declaration", EnclosingElementType::Class),
    ("interface_declaration", EnclosingElementType::Interface),
    ("enum_declaration", EnclosingElementType::Enum),
];

/// What a function-like declaration is nested inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EnclosingElementType {
    Class,
    Interface,
    Enum,
    Method,
}

/// The nearest enclosing declaration of a function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnclosingElement {
    pub element_type: EnclosingElementType,
    pub name: Option<String>,
}

/// One declared parameter: name plus the type as written in source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

/// Summary of one method or constructor declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub name: Option<String>,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: Option<String>,
    pub is_constructor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<EnclosingElement>,
}

/// Collects every method and constructor declaration in `root`, in
/// pre-order.
#[must_use]
pub fn split_into_functions(root: &PresentableNode) -> Vec<FunctionInfo> {
    let mut functions = Vec::new();
    collect(root, None, &mut functions);
    functions
}

fn collect(
    node: &PresentableNode,
    enclosing: Option<&EnclosingElement>,
    out: &mut Vec<FunctionInfo>,
) {
    if METHOD_KINDS.contains(&node.kind()) {
        out.push(function_info(node, enclosing));
        let inner = EnclosingElement {
            element_type: EnclosingElementType::Method,
            name: name_of(node),
        };
        descend(node, Some(&inner), out);
        return;
    }

    if let Some((_, element_type)) = ENCLOSING_KINDS
        .iter()
        .find(|(kind, _)| *kind == node.kind())
    {
        let inner = EnclosingElement {
            element_type: *element_type,
            name: name_of(node),
        };
        descend(node, Some(&inner), out);
        return;
    }

    descend(node, enclosing, out);
}

fn descend(node: &PresentableNode, enclosing: Option<&EnclosingElement>, out: &mut Vec<FunctionInfo>) {
    for (_, value) in node.fields() {
        match value {
            FieldValue::Primitive(_) => {}
            FieldValue::Node(child) => collect(child, enclosing, out),
            FieldValue::Nodes(children) => {
                for child in children {
                    collect(child, enclosing, out);
                }
            }
        }
    }
}

fn function_info(node: &PresentableNode, enclosing: Option<&EnclosingElement>) -> FunctionInfo {
    FunctionInfo {
        name: name_of(node),
        parameters: parameters_of(node),
        return_type: node
            .field("type")
            .and_then(field_node)
            .map(PresentableNode::subtree_text),
        is_constructor: node.kind() == "constructor_declaration",
        enclosing: enclosing.cloned(),
    }
}

fn parameters_of(node: &PresentableNode) -> Vec<ParameterInfo> {
    let Some(parameters) = node.field("parameters").and_then(field_node) else {
        return Vec::new();
    };
    let Some(FieldValue::Nodes(children)) = parameters.field("children") else {
        return Vec::new();
    };
    children
        .iter()
        .filter(|child| child.kind() == "formal_parameter" || child.kind() == "spread_parameter")
        .filter_map(|parameter| {
            let name = parameter.field("name").and_then(field_node)?.text()?;
            Some(ParameterInfo {
                name: name.to_string(),
                type_name: parameter
                    .field("type")
                    .and_then(field_node)
                    .map(PresentableNode::subtree_text),
            })
        })
        .collect()
}

fn name_of(node: &PresentableNode) -> Option<String> {
    node.field("name")
        .and_then(field_node)
        .and_then(PresentableNode::text)
        .map(str::to_string)
}

fn field_node(value: &FieldValue) -> Option<&PresentableNode> {
    match value {
        FieldValue::Node(node) => Some(node),
        _ => None,
    }
}
