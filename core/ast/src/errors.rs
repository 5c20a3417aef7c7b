//! Error types for tree normalization and enumeration.

use thiserror::Error;

/// Errors produced while turning a raw parse tree into its enumerated form.
#[derive(Debug, Error, PartialEq, Eq)]
#[must_use = "errors must not be silently ignored"]
pub enum ExportError {
    /// The external parser produced a node kind the schema does not know.
    /// The schema is out of date relative to the parser; never recoverable
    /// locally.
    #[error("unsupported node kind `{kind}`")]
    UnsupportedNodeKind { kind: String },

    /// An attribute's runtime shape contradicts its schema declaration,
    /// e.g. a primitive where a nested node was declared.
    #[error("malformed attribute `{attribute}` on `{kind}`: expected {expected}, found {found}")]
    MalformedAttribute {
        kind: String,
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A field referenced a node identifier missing from the table.
    /// Internal invariant violation in the enumerator; always a defect.
    #[error("dangling reference to node {id}")]
    DanglingReference { id: u32 },

    /// The table's identifiers do not form a contiguous range from the
    /// base identifier.
    #[error("identifier gap in node table: expected {expected}, found {found}")]
    IdentifierGap { expected: u32, found: u32 },

    /// A node's incoming reference count contradicts tree shape: the root
    /// takes none, every other node exactly one.
    #[error("node {id} has {count} incoming references")]
    InvalidReferenceCount { id: u32, count: usize },

    /// A node no path from the root reaches.
    #[error("node {id} is not reachable from the root")]
    UnreachableNode { id: u32 },
}
