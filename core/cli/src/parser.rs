//! Command line argument parsing for the Arbor exporter.
//!
//! This module defines the CLI interface using `clap`. The `Cli` struct
//! captures all command line flags and arguments passed to the `arbor`
//! binary.

use clap::Parser;

/// Command line interface definition for the Arbor exporter.
///
/// The `arbor` binary exports one JSON enumerated tree per processed file
/// to stdout. Output selection flags (`--pretty`, `--functions`) replace
/// the JSON tree with an alternative rendering; `--declined` switches the
/// pipeline into diagnostic mode.
///
/// ## Examples
///
/// Export a single file:
/// ```bash
/// arbor src/Main.java
/// ```
///
/// Export every `.java` file under a directory, with declined attributes:
/// ```bash
/// arbor src/ --declined
/// ```
///
/// Inspect the normalized tree instead of the JSON output:
/// ```bash
/// arbor src/Main.java --pretty
/// ```
#[derive(Parser)]
#[command(
    name = "arbor",
    author,
    version,
    about = "Export Java syntax trees as enumerated JSON",
    long_about = "The 'arbor' command parses Java source with tree-sitter, normalizes the parse tree \
against a fixed per-kind schema, flattens it into an identifier-indexed node table, and prints the \
result as JSON. Pass a directory to process every file with the selected extension."
)]
pub(crate) struct Cli {
    /// Path to a source file, or a directory to walk recursively.
    pub(crate) path: std::path::PathBuf,

    /// Track declined attributes.
    ///
    /// In diagnostic mode every exported node carries a `declined` array
    /// naming the raw attributes outside its kind's schema, and the
    /// "Declined attributes:" / "Generated AST:" banner lines frame the
    /// output. Without this flag the `declined` key is absent entirely.
    #[clap(short = 'd', long = "declined", action = clap::ArgAction::SetTrue)]
    pub(crate) declined: bool,

    /// Print the normalized tree as indented text instead of JSON.
    #[clap(long = "pretty", action = clap::ArgAction::SetTrue)]
    pub(crate) pretty: bool,

    /// Print a JSON summary of methods and constructors instead of the
    /// tree: name, parameters, return type, and enclosing element.
    #[clap(long = "functions", action = clap::ArgAction::SetTrue)]
    pub(crate) functions: bool,

    /// File extension to look for when walking a directory.
    #[clap(long = "extension", default_value = "java")]
    pub(crate) extension: String,
}
