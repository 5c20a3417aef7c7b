#![warn(clippy::pedantic)]
//! Data model and core transformations for Arbor.
//!
//! Two stages with real contracts live here: schema-driven normalization of
//! an external parse tree ([`normalize`]) and deterministic flattening into
//! an identifier-indexed table ([`flatten`]). Everything else is the data
//! they operate on.

pub mod errors;
pub mod flatten;
pub mod functions;
pub mod normalize;
pub mod presentable;
pub mod raw;
pub mod schema;
