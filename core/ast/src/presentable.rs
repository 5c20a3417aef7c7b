//! The normalized, schema-conformant tree.
//!
//! A [`PresentableNode`] has a uniform shape regardless of which grammar
//! produced it: a kind from the closed schema set, recognized fields in
//! schema-declared order, and (in diagnostic mode) the list of raw
//! attributes that were declined. Children are exclusively owned; the tree
//! has no sharing.

use std::fmt::Write as _;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::raw::Primitive;

/// A recognized field value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Primitive(Primitive),
    Node(Box<PresentableNode>),
    Nodes(Vec<PresentableNode>),
}

impl From<Primitive> for FieldValue {
    fn from(p: Primitive) -> Self {
        FieldValue::Primitive(p)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Primitive(s.into())
    }
}

impl From<PresentableNode> for FieldValue {
    fn from(node: PresentableNode) -> Self {
        FieldValue::Node(Box::new(node))
    }
}

impl From<Vec<PresentableNode>> for FieldValue {
    fn from(nodes: Vec<PresentableNode>) -> Self {
        FieldValue::Nodes(nodes)
    }
}

/// A normalized tree node.
///
/// Serializes as `{"kind": ..., "fields": {...}}`, with a `declined` key
/// only when diagnostics were requested during normalization. An absent
/// `declined` key means "not computed", which is distinct from "computed
/// and empty".
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PresentableNode {
    kind: String,
    #[serde(serialize_with = "serialize_field_map")]
    fields: Vec<(String, FieldValue)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declined: Option<Vec<String>>,
}

impl PresentableNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
            declined: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push_field(name, value);
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn set_declined(&mut self, declined: Vec<String>) {
        self.declined = Some(declined);
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    #[must_use]
    pub fn declined(&self) -> Option<&[String]> {
        self.declined.as_deref()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// The leaf text attached by the adapter, if this node has one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self.field("text") {
            Some(FieldValue::Primitive(p)) => p.as_str(),
            _ => None,
        }
    }

    /// All leaf text in this subtree, pre-order, space-joined. Gives a
    /// readable rendering of composite constructs such as generic types.
    #[must_use]
    pub fn subtree_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if let Some(text) = self.text() {
            parts.push(text);
        }
        for (_, value) in &self.fields {
            match value {
                FieldValue::Primitive(_) => {}
                FieldValue::Node(child) => child.collect_text(parts),
                FieldValue::Nodes(children) => {
                    for child in children {
                        child.collect_text(parts);
                    }
                }
            }
        }
    }

    /// Indented plain-text rendering of the subtree, one node per line,
    /// `--` per nesting level, `kind : text` for leaves.
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("--");
        }
        match self.text() {
            Some(text) => {
                let _ = writeln!(out, "{} : {text}", self.kind);
            }
            None => {
                let _ = writeln!(out, "{}", self.kind);
            }
        }
        for (_, value) in &self.fields {
            match value {
                FieldValue::Primitive(_) => {}
                FieldValue::Node(child) => child.pretty_into(out, indent + 1),
                FieldValue::Nodes(children) => {
                    for child in children {
                        child.pretty_into(out, indent + 1);
                    }
                }
            }
        }
    }
}

/// Serializes ordered `(name, value)` pairs as a JSON map, preserving the
/// declared order instead of falling back to hash-map iteration order.
#[allow(clippy::ptr_arg)] // serde passes the field vector by reference as-is
pub(crate) fn serialize_field_map<S, V>(
    fields: &Vec<(String, V)>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (name, value) in fields {
        map.serialize_entry(name, value)?;
    }
    map.end()
}
