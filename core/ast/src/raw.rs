//! The neutral exchange form of an external parse tree.
//!
//! A [`RawNode`] is what an adapter hands to the normalizer: a kind tag plus
//! an open-ended, ordered list of named attributes. The core never mutates a
//! raw tree; it only reads it during normalization.

use serde::Serialize;

/// A primitive attribute value, mirroring the JSON primitives.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Primitive {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::Str(s.to_string())
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Primitive::Str(s)
    }
}

impl From<i64> for Primitive {
    fn from(n: i64) -> Self {
        Primitive::Int(n)
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

/// An attribute value on a raw node: a primitive, a single nested node, or
/// an ordered sequence of nested nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Primitive(Primitive),
    Node(Box<RawNode>),
    Nodes(Vec<RawNode>),
}

impl RawValue {
    /// Human-readable shape name, used in malformed-attribute reports.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            RawValue::Primitive(_) => "a primitive",
            RawValue::Node(_) => "a node",
            RawValue::Nodes(_) => "a node sequence",
        }
    }
}

impl From<Primitive> for RawValue {
    fn from(p: Primitive) -> Self {
        RawValue::Primitive(p)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Primitive(s.into())
    }
}

impl From<RawNode> for RawValue {
    fn from(node: RawNode) -> Self {
        RawValue::Node(Box::new(node))
    }
}

impl From<Vec<RawNode>> for RawValue {
    fn from(nodes: Vec<RawNode>) -> Self {
        RawValue::Nodes(nodes)
    }
}

/// A node of the external parser's tree, reduced to a kind tag and ordered
/// named attributes.
///
/// Attribute order is preserved exactly as the adapter produced it; declined
/// attribute reporting depends on it, so it must be deterministic for a
/// given input.
#[derive(Clone, Debug, PartialEq)]
pub struct RawNode {
    kind: String,
    attributes: Vec<(String, RawValue)>,
}

impl RawNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute insertion, mostly for adapters and tests.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.push_attribute(name, value);
        self
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.attributes.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Looks up an attribute by name; first occurrence wins.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&RawValue> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, RawValue)] {
        &self.attributes
    }
}
