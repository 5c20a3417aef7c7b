//! Tree flattening and enumeration.
//!
//! Rewrites a presentable tree into a flat node table: every node gets a
//! dense integer identifier assigned in pre-order, and parent→child
//! ownership becomes identifier references. The table is the arena; the
//! identifiers are its indices. This is the terminal, serializable form.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::errors::ExportError;
use crate::presentable::{FieldValue, PresentableNode, serialize_field_map};
use crate::raw::Primitive;

/// First identifier handed out by the enumerator.
pub const BASE_ID: u32 = 0;

/// An enumerated field value: a primitive copied verbatim, or child
/// identifiers in place of the nested structure.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Primitive(Primitive),
    Ref(u32),
    Refs(Vec<u32>),
}

/// A node of the flat table. No node holds another node inside it; all
/// child relationships go through identifiers.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EnumeratedNode {
    pub kind: String,
    #[serde(serialize_with = "serialize_field_map")]
    pub fields: Vec<(String, EnumValue)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined: Option<Vec<String>>,
}

impl EnumeratedNode {
    /// Identifiers this node's fields reference, in field order.
    fn references(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields
            .iter()
            .flat_map(|(_, value)| match value {
                EnumValue::Primitive(_) => &[][..],
                EnumValue::Ref(id) => std::slice::from_ref(id),
                EnumValue::Refs(ids) => ids.as_slice(),
            })
            .copied()
    }
}

/// The flattened tree: a root identifier plus the identifier-indexed node
/// table. This is the sole artifact crossing the serialization boundary.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EnumeratedTree {
    pub root_id: u32,
    pub nodes: BTreeMap<u32, EnumeratedNode>,
}

impl EnumeratedTree {
    /// Total number of enumerated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks the full tree shape of the table: the root and every
    /// referenced identifier resolve, identifiers are a contiguous range
    /// from [`BASE_ID`], the root has no incoming reference and every other
    /// node exactly one, and every node is reachable from the root. A table
    /// passing these checks is a tree, so [`reconstruct`](Self::reconstruct)
    /// terminates and visits each node once.
    ///
    /// # Errors
    ///
    /// `DanglingReference` for an unresolved identifier, `IdentifierGap`
    /// for a hole in the id range, `InvalidReferenceCount` for a shared or
    /// root-referencing parent link, `UnreachableNode` for an entry no
    /// root path reaches.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.nodes.contains_key(&self.root_id) {
            return Err(ExportError::DanglingReference { id: self.root_id });
        }

        let mut incoming: BTreeMap<u32, usize> = BTreeMap::new();
        for node in self.nodes.values() {
            for id in node.references() {
                self.check_ref(id)?;
                *incoming.entry(id).or_default() += 1;
            }
        }

        let mut expected = BASE_ID;
        for &id in self.nodes.keys() {
            if id != expected {
                return Err(ExportError::IdentifierGap { expected, found: id });
            }
            expected += 1;
        }

        for &id in self.nodes.keys() {
            let count = incoming.get(&id).copied().unwrap_or(0);
            let wanted = usize::from(id != self.root_id);
            if count != wanted {
                return Err(ExportError::InvalidReferenceCount { id, count });
            }
        }

        // Single-parenthood rules out cycles through the root, but not a
        // component detached from it entirely.
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.root_id];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            stack.extend(self.nodes[&id].references());
        }
        if seen.len() != self.nodes.len() {
            let id = self
                .nodes
                .keys()
                .find(|id| !seen.contains(*id))
                .copied()
                .unwrap_or(self.root_id);
            return Err(ExportError::UnreachableNode { id });
        }

        Ok(())
    }

    fn check_ref(&self, id: u32) -> Result<(), ExportError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(ExportError::DanglingReference { id })
        }
    }

    /// Rebuilds the presentable tree by resolving identifier references
    /// from the root. The result is isomorphic to the tree this table was
    /// built from; `declined` data is carried along.
    ///
    /// # Errors
    ///
    /// `ExportError::DanglingReference` if an identifier does not resolve.
    pub fn reconstruct(&self) -> Result<PresentableNode, ExportError> {
        self.reconstruct_node(self.root_id)
    }

    fn reconstruct_node(&self, id: u32) -> Result<PresentableNode, ExportError> {
        let Some(node) = self.nodes.get(&id) else {
            return Err(ExportError::DanglingReference { id });
        };
        let mut rebuilt = PresentableNode::new(node.kind.clone());
        for (name, value) in &node.fields {
            let rebuilt_value = match value {
                EnumValue::Primitive(p) => FieldValue::Primitive(p.clone()),
                EnumValue::Ref(child) => {
                    FieldValue::Node(Box::new(self.reconstruct_node(*child)?))
                }
                EnumValue::Refs(children) => FieldValue::Nodes(
                    children
                        .iter()
                        .map(|child| self.reconstruct_node(*child))
                        .collect::<Result<_, _>>()?,
                ),
            };
            rebuilt.push_field(name.clone(), rebuilt_value);
        }
        if let Some(declined) = &node.declined {
            rebuilt.set_declined(declined.clone());
        }
        Ok(rebuilt)
    }
}

/// Flattens a presentable tree into an [`EnumeratedTree`].
///
/// Identifiers start at [`BASE_ID`] and increment by one per node in
/// pre-order: a node is numbered before its children, children are visited
/// in field order, and within a sequence field in sequence order. Each node
/// is therefore numbered exactly once, and the table's identifiers form a
/// contiguous range.
///
/// # Errors
///
/// `ExportError::DanglingReference` if a finalized node would reference an
/// identifier not yet in the table. With a well-formed input tree this
/// cannot happen; the check guards against internal defects rather than bad
/// input.
pub fn enumerate_tree(root: &PresentableNode) -> Result<EnumeratedTree, ExportError> {
    let mut enumerator = Enumerator {
        next_id: BASE_ID,
        nodes: BTreeMap::new(),
    };
    let root_id = enumerator.visit(root)?;
    Ok(EnumeratedTree {
        root_id,
        nodes: enumerator.nodes,
    })
}

struct Enumerator {
    next_id: u32,
    nodes: BTreeMap<u32, EnumeratedNode>,
}

impl Enumerator {
    /// Numbers `node`, then its subtree, and inserts the finished
    /// enumerated node. Children are finalized before their parent, so by
    /// the time the parent's fields are checked every referenced identifier
    /// is already present.
    fn visit(&mut self, node: &PresentableNode) -> Result<u32, ExportError> {
        let id = self.next_id;
        self.next_id += 1;

        let mut fields = Vec::with_capacity(node.fields().len());
        for (name, value) in node.fields() {
            let enumerated = match value {
                FieldValue::Primitive(p) => EnumValue::Primitive(p.clone()),
                FieldValue::Node(child) => EnumValue::Ref(self.visit(child)?),
                FieldValue::Nodes(children) => EnumValue::Refs(
                    children
                        .iter()
                        .map(|child| self.visit(child))
                        .collect::<Result<_, _>>()?,
                ),
            };
            fields.push((name.clone(), enumerated));
        }

        for (_, value) in &fields {
            match value {
                EnumValue::Primitive(_) => {}
                EnumValue::Ref(child) => self.check_finalized(*child)?,
                EnumValue::Refs(children) => {
                    for child in children {
                        self.check_finalized(*child)?;
                    }
                }
            }
        }

        self.nodes.insert(
            id,
            EnumeratedNode {
                kind: node.kind().to_string(),
                fields,
                declined: node.declined().map(<[String]>::to_vec),
            },
        );
        Ok(id)
    }

    fn check_finalized(&self, id: u32) -> Result<(), ExportError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(ExportError::DanglingReference { id })
        }
    }
}
