//! Raw-tree normalization against a per-kind attribute schema.

use crate::errors::ExportError;
use crate::presentable::{FieldValue, PresentableNode};
use crate::raw::{RawNode, RawValue};
use crate::schema::{FieldShape, SchemaRegistry};

/// Normalizes raw parse trees into presentable trees.
///
/// For every raw node the schema entry for its kind is consulted: recognized
/// attributes are copied (nested nodes normalized recursively), everything
/// else is declined. Declined names are only materialized when diagnostics
/// are on; either way they never affect the recognized output.
///
/// Output field order is the schema-declared order, so two runs over
/// identical input produce identical trees.
pub struct Normalizer<'s> {
    schema: &'s SchemaRegistry,
    diagnostics: bool,
}

impl<'s> Normalizer<'s> {
    #[must_use]
    pub fn new(schema: &'s SchemaRegistry) -> Self {
        Self {
            schema,
            diagnostics: false,
        }
    }

    /// Enables or disables declined-attribute tracking.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Normalizes `raw` and its entire subtree.
    ///
    /// # Errors
    ///
    /// `ExportError::UnsupportedNodeKind` if any node's kind is absent from
    /// the schema; `ExportError::MalformedAttribute` if a recognized
    /// attribute's runtime value does not match its declared shape. No
    /// partial output is produced on failure.
    pub fn normalize(&self, raw: &RawNode) -> Result<PresentableNode, ExportError> {
        let Some(schema_fields) = self.schema.fields_of(raw.kind()) else {
            return Err(ExportError::UnsupportedNodeKind {
                kind: raw.kind().to_string(),
            });
        };

        let mut node = PresentableNode::new(raw.kind());
        for &(name, shape) in schema_fields {
            let Some(value) = raw.attribute(name) else {
                continue;
            };
            let normalized = match (shape, value) {
                (FieldShape::Primitive, RawValue::Primitive(p)) => {
                    FieldValue::Primitive(p.clone())
                }
                (FieldShape::Node, RawValue::Node(child)) => {
                    FieldValue::Node(Box::new(self.normalize(child)?))
                }
                (FieldShape::NodeList, RawValue::Nodes(children)) => FieldValue::Nodes(
                    children
                        .iter()
                        .map(|child| self.normalize(child))
                        .collect::<Result<_, _>>()?,
                ),
                // A lone node where a sequence is declared: adapters cannot
                // tell a repeatable field with one occurrence from a
                // singular one.
                (FieldShape::NodeList, RawValue::Node(child)) => {
                    FieldValue::Nodes(vec![self.normalize(child)?])
                }
                (shape, value) => {
                    return Err(ExportError::MalformedAttribute {
                        kind: raw.kind().to_string(),
                        attribute: name.to_string(),
                        expected: shape.expected_name(),
                        found: value.shape_name(),
                    });
                }
            };
            node.push_field(name, normalized);
        }

        if self.diagnostics {
            let declined = raw
                .attributes()
                .iter()
                .filter(|(name, _)| !schema_fields.iter().any(|(field, _)| field == name))
                .map(|(name, _)| name.clone())
                .collect();
            node.set_declined(declined);
        }

        Ok(node)
    }
}
