#![warn(clippy::pedantic)]
//! Core orchestration crate for the Arbor syntax-tree exporter.
//!
//! Arbor turns Java source files into normalized, flat, JSON-serializable
//! syntax trees that do not depend on the grammar library's internal node
//! shapes.
//!
//! ## Pipeline
//!
//! ```text
//! .java source → tree-sitter → RawNode tree → Normalizer → PresentableNode
//!     tree → Enumerator → EnumeratedTree → serde_json → text
//! ```
//!
//! Each stage is exposed as a standalone function so callers can stop at
//! any intermediate representation:
//!
//! ```rust,no_run
//! use arbor::{parse_raw, normalize, enumerate, to_json};
//!
//! fn export_file(source: &str) -> anyhow::Result<String> {
//!     let raw = parse_raw(source)?;
//!     let ast = normalize(&raw, false)?;
//!     let tree = enumerate(&ast)?;
//!     to_json(&tree)
//! }
//! ```
//!
//! Or as one call:
//!
//! ```rust,no_run
//! use arbor::export;
//!
//! let tree = export("class Foo { void bar() {} }", false)?;
//! assert_eq!(tree.root_id, 0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Stages
//!
//! - **Parse** ([`parse_raw`]): tree-sitter builds the CST; the adapter in
//!   [`arbor_source`] reduces it to a neutral [`RawNode`] tree. This is the
//!   external-collaborator boundary — everything downstream is independent
//!   of the grammar library.
//! - **Normalize** ([`normalize`]): the bundled Java schema classifies each
//!   raw attribute as recognized (copied, recursively normalized) or
//!   declined (recorded when diagnostics are on). Unknown node kinds and
//!   shape mismatches are hard failures; there is no silent pass-through.
//! - **Enumerate** ([`enumerate`]): deterministic pre-order numbering turns
//!   the nested tree into a flat node table with identifier references, the
//!   form that serializes losslessly.
//!
//! ## Error Handling
//!
//! Library crates return structured errors
//! ([`ExportError`](arbor_ast::errors::ExportError),
//! [`SourceError`](arbor_source::SourceError)); this crate wraps them with
//! `anyhow` context. Nothing here prints, logs, or retries — failures
//! propagate to the caller, which owns user-facing reporting.

pub use arbor_ast::errors::ExportError;
pub use arbor_ast::flatten::{EnumeratedNode, EnumeratedTree, EnumValue, enumerate_tree};
pub use arbor_ast::functions::{FunctionInfo, split_into_functions};
pub use arbor_ast::normalize::Normalizer;
pub use arbor_ast::presentable::{FieldValue, PresentableNode};
pub use arbor_ast::raw::{Primitive, RawNode, RawValue};
pub use arbor_ast::schema::SchemaRegistry;

use anyhow::Context;

/// Parses Java source text into a raw exchange tree.
///
/// # Errors
///
/// Fails when the grammar cannot be loaded or the parser yields no tree.
pub fn parse_raw(source: &str) -> anyhow::Result<RawNode> {
    arbor_source::parse(source).context("parsing source text")
}

/// Normalizes a raw tree against the bundled Java schema.
///
/// With `diagnostics` on, every node carries the list of raw attributes
/// that fell outside its kind's schema; with it off, the list is not
/// computed at all. The recognized output is identical either way.
///
/// # Errors
///
/// Fails with `UnsupportedNodeKind` for a kind absent from the schema and
/// `MalformedAttribute` for a shape mismatch.
pub fn normalize(raw: &RawNode, diagnostics: bool) -> anyhow::Result<PresentableNode> {
    let schema = SchemaRegistry::java();
    let ast = Normalizer::new(&schema)
        .with_diagnostics(diagnostics)
        .normalize(raw)
        .context("normalizing parse tree")?;
    Ok(ast)
}

/// Flattens a presentable tree into its enumerated form.
///
/// # Errors
///
/// Fails with `DanglingReference` on an internal consistency defect; never
/// expected for a well-formed tree.
pub fn enumerate(ast: &PresentableNode) -> anyhow::Result<EnumeratedTree> {
    let tree = enumerate_tree(ast).context("enumerating tree")?;
    Ok(tree)
}

/// Runs the whole pipeline: source text to enumerated tree.
///
/// # Errors
///
/// Any stage failure, with context naming the stage.
pub fn export(source: &str, diagnostics: bool) -> anyhow::Result<EnumeratedTree> {
    let raw = parse_raw(source)?;
    let ast = normalize(&raw, diagnostics)?;
    enumerate(&ast)
}

/// Serializes an enumerated tree to compact JSON.
///
/// # Errors
///
/// Fails if JSON serialization fails, which would indicate a defect in the
/// tree's `Serialize` implementations.
pub fn to_json(tree: &EnumeratedTree) -> anyhow::Result<String> {
    serde_json::to_string(tree).context("serializing enumerated tree")
}
