//! Per-kind attribute schemas.
//!
//! The external grammar's node shapes are captured here as configuration
//! data: each known node kind declares, in order, the attribute names it
//! recognizes and the shape each attribute must have. Everything the
//! normalizer knows about a language lives in one of these tables; the rest
//! of the pipeline is grammar-agnostic.

use rustc_hash::{FxHashMap, FxHashSet};

/// Declared shape of a recognized attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldShape {
    /// A single nested node.
    Node,
    /// An ordered sequence of nested nodes. A single node is accepted as a
    /// singleton sequence, since adapters cannot know a field's arity.
    NodeList,
    /// A primitive value, copied verbatim.
    Primitive,
}

impl FieldShape {
    #[must_use]
    pub fn expected_name(self) -> &'static str {
        match self {
            FieldShape::Node => "a node",
            FieldShape::NodeList => "a node sequence",
            FieldShape::Primitive => "a primitive",
        }
    }
}

/// One schema table row: a node kind and its recognized fields in declared
/// order.
pub type SchemaEntry = (&'static str, &'static [(&'static str, FieldShape)]);

/// The closed set of node kinds the normalizer accepts, with the recognized
/// field list for each.
pub struct SchemaRegistry {
    kinds: FxHashMap<&'static str, &'static [(&'static str, FieldShape)]>,
}

impl SchemaRegistry {
    /// Builds a registry from a declarative table, checking it is
    /// well-formed: no duplicate kinds, no duplicate field names within a
    /// kind.
    ///
    /// # Panics
    ///
    /// Panics on a malformed table. Schema tables are authored, not
    /// computed, so this is a build-time style check.
    #[must_use]
    pub fn from_table(table: &'static [SchemaEntry]) -> Self {
        let mut kinds = FxHashMap::default();
        for (kind, fields) in table {
            let mut seen = FxHashSet::default();
            for (name, _) in *fields {
                assert!(seen.insert(*name), "duplicate field `{name}` on kind `{kind}`");
            }
            assert!(
                kinds.insert(*kind, *fields).is_none(),
                "duplicate schema entry for kind `{kind}`"
            );
        }
        Self { kinds }
    }

    /// The bundled schema for the tree-sitter Java grammar.
    #[must_use]
    pub fn java() -> Self {
        Self::from_table(JAVA_SCHEMA)
    }

    /// Recognized fields of `kind`, in schema-declared order, or `None` for
    /// an unknown kind.
    #[must_use]
    pub fn fields_of(&self, kind: &str) -> Option<&'static [(&'static str, FieldShape)]> {
        self.kinds.get(kind).copied()
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

use FieldShape::{Node, NodeList, Primitive};

/// Leaf kinds carry only the source text the adapter attaches to nodes
/// without named children.
const TEXT_ONLY: &[(&str, FieldShape)] = &[("text", Primitive)];

/// Container kinds whose named children carry no grammar field names; the
/// adapter groups those under `children`.
const CHILDREN_ONLY: &[(&str, FieldShape)] = &[("children", NodeList)];

/// Recognized attributes per tree-sitter-java node kind.
///
/// Field names follow the grammar's field declarations; `children` collects
/// named children the grammar leaves unfielded (modifiers on declarations,
/// statements in blocks, and so on); `text` is the adapter's leaf attribute.
/// Kinds absent from this table fail normalization with
/// `UnsupportedNodeKind`, which is the signal to extend the table when the
/// grammar grows.
static JAVA_SCHEMA: &[SchemaEntry] = &[
    // Top level
    ("program", CHILDREN_ONLY),
    ("package_declaration", CHILDREN_ONLY),
    ("import_declaration", &[("children", NodeList), ("text", Primitive)]),
    // Declarations
    (
        "class_declaration",
        &[
            ("name", Node),
            ("type_parameters", Node),
            ("superclass", Node),
            ("interfaces", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "interface_declaration",
        &[
            ("name", Node),
            ("type_parameters", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "enum_declaration",
        &[
            ("name", Node),
            ("interfaces", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "enum_constant",
        &[
            ("name", Node),
            ("arguments", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "field_declaration",
        &[
            ("type", Node),
            ("declarator", NodeList),
            ("children", NodeList),
        ],
    ),
    (
        "variable_declarator",
        &[("name", Node), ("dimensions", Node), ("value", Node)],
    ),
    (
        "method_declaration",
        &[
            ("type_parameters", Node),
            ("type", Node),
            ("name", Node),
            ("parameters", Node),
            ("dimensions", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "record_declaration",
        &[
            ("name", Node),
            ("type_parameters", Node),
            ("parameters", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    (
        "compact_constructor_declaration",
        &[("name", Node), ("body", Node), ("children", NodeList)],
    ),
    ("static_initializer", CHILDREN_ONLY),
    (
        "annotation_type_declaration",
        &[("name", Node), ("body", Node), ("children", NodeList)],
    ),
    ("annotation_type_body", CHILDREN_ONLY),
    (
        "annotation_type_element_declaration",
        &[
            ("type", Node),
            ("name", Node),
            ("dimensions", Node),
            ("value", Node),
            ("children", NodeList),
        ],
    ),
    (
        "module_declaration",
        &[("name", Node), ("body", Node), ("children", NodeList)],
    ),
    ("module_body", CHILDREN_ONLY),
    (
        "requires_module_directive",
        &[("modifiers", NodeList), ("module", Node), ("children", NodeList)],
    ),
    (
        "exports_module_directive",
        &[("package", Node), ("modules", NodeList), ("children", NodeList)],
    ),
    (
        "opens_module_directive",
        &[("package", Node), ("modules", NodeList), ("children", NodeList)],
    ),
    (
        "uses_module_directive",
        &[("type", Node), ("children", NodeList)],
    ),
    (
        "provides_module_directive",
        &[("provided", Node), ("provider", NodeList), ("children", NodeList)],
    ),
    (
        "constructor_declaration",
        &[
            ("type_parameters", Node),
            ("name", Node),
            ("parameters", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    ("constructor_body", CHILDREN_ONLY),
    ("formal_parameters", CHILDREN_ONLY),
    (
        "formal_parameter",
        &[
            ("type", Node),
            ("name", Node),
            ("dimensions", Node),
            ("children", NodeList),
        ],
    ),
    ("spread_parameter", CHILDREN_ONLY),
    ("class_body", CHILDREN_ONLY),
    ("interface_body", CHILDREN_ONLY),
    ("enum_body", CHILDREN_ONLY),
    ("enum_body_declarations", CHILDREN_ONLY),
    ("modifiers", &[("children", NodeList), ("text", Primitive)]),
    (
        "annotation",
        &[("name", Node), ("arguments", Node)],
    ),
    ("marker_annotation", &[("name", Node)]),
    ("annotation_argument_list", CHILDREN_ONLY),
    ("superclass", CHILDREN_ONLY),
    ("super_interfaces", CHILDREN_ONLY),
    ("extends_interfaces", CHILDREN_ONLY),
    ("type_list", CHILDREN_ONLY),
    ("type_parameters", CHILDREN_ONLY),
    ("type_parameter", CHILDREN_ONLY),
    ("throws", CHILDREN_ONLY),
    // Statements
    ("block", CHILDREN_ONLY),
    ("expression_statement", CHILDREN_ONLY),
    (
        "local_variable_declaration",
        &[
            ("type", Node),
            ("declarator", NodeList),
            ("children", NodeList),
        ],
    ),
    ("return_statement", &[("children", NodeList), ("text", Primitive)]),
    (
        "if_statement",
        &[
            ("condition", Node),
            ("consequence", Node),
            ("alternative", Node),
        ],
    ),
    ("while_statement", &[("condition", Node), ("body", Node)]),
    ("do_statement", &[("body", Node), ("condition", Node)]),
    (
        "for_statement",
        &[
            ("init", NodeList),
            ("condition", Node),
            ("update", NodeList),
            ("body", Node),
        ],
    ),
    (
        "enhanced_for_statement",
        &[
            ("type", Node),
            ("name", Node),
            ("value", Node),
            ("body", Node),
            ("children", NodeList),
        ],
    ),
    ("break_statement", &[("children", NodeList), ("text", Primitive)]),
    ("continue_statement", &[("children", NodeList), ("text", Primitive)]),
    ("throw_statement", CHILDREN_ONLY),
    (
        "try_statement",
        &[("body", Node), ("children", NodeList)],
    ),
    (
        "try_with_resources_statement",
        &[("resources", Node), ("body", Node), ("children", NodeList)],
    ),
    ("resource_specification", CHILDREN_ONLY),
    (
        "resource",
        &[("type", Node), ("name", Node), ("value", Node), ("children", NodeList)],
    ),
    ("catch_clause", &[("body", Node), ("children", NodeList)]),
    (
        "catch_formal_parameter",
        &[("name", Node), ("dimensions", Node), ("children", NodeList)],
    ),
    ("catch_type", CHILDREN_ONLY),
    ("finally_clause", CHILDREN_ONLY),
    (
        "switch_expression",
        &[("condition", Node), ("body", Node)],
    ),
    ("switch_block", CHILDREN_ONLY),
    ("switch_block_statement_group", CHILDREN_ONLY),
    ("switch_label", &[("children", NodeList), ("text", Primitive)]),
    ("switch_rule", CHILDREN_ONLY),
    ("assert_statement", CHILDREN_ONLY),
    ("synchronized_statement", &[("body", Node), ("children", NodeList)]),
    ("labeled_statement", CHILDREN_ONLY),
    ("yield_statement", CHILDREN_ONLY),
    // Expressions
    (
        "binary_expression",
        &[
            ("left", Node),
            ("operator", Primitive),
            ("right", Node),
        ],
    ),
    (
        "unary_expression",
        &[("operator", Primitive), ("operand", Node)],
    ),
    ("update_expression", &[("children", NodeList), ("text", Primitive)]),
    (
        "assignment_expression",
        &[
            ("left", Node),
            ("operator", Primitive),
            ("right", Node),
        ],
    ),
    (
        "instanceof_expression",
        &[("left", Node), ("right", Node), ("name", Node), ("children", NodeList)],
    ),
    (
        "ternary_expression",
        &[
            ("condition", Node),
            ("consequence", Node),
            ("alternative", Node),
        ],
    ),
    ("cast_expression", &[("type", NodeList), ("value", Node)]),
    ("parenthesized_expression", CHILDREN_ONLY),
    (
        "method_invocation",
        &[
            ("object", Node),
            ("type_arguments", Node),
            ("name", Node),
            ("arguments", Node),
        ],
    ),
    (
        "object_creation_expression",
        &[
            ("type_arguments", Node),
            ("type", Node),
            ("arguments", Node),
            ("children", NodeList),
        ],
    ),
    ("argument_list", CHILDREN_ONLY),
    ("field_access", &[("object", Node), ("field", Node)]),
    ("class_literal", CHILDREN_ONLY),
    ("array_access", &[("array", Node), ("index", Node)]),
    (
        "array_creation_expression",
        &[
            ("type", Node),
            ("dimensions", NodeList),
            ("value", Node),
            ("children", NodeList),
        ],
    ),
    ("array_initializer", CHILDREN_ONLY),
    (
        "lambda_expression",
        &[("parameters", Node), ("body", Node)],
    ),
    ("inferred_parameters", CHILDREN_ONLY),
    ("method_reference", &[("children", NodeList), ("text", Primitive)]),
    ("explicit_constructor_invocation", &[
        ("constructor", Node),
        ("arguments", Node),
        ("object", Node),
        ("children", NodeList),
    ]),
    // Types
    ("generic_type", CHILDREN_ONLY),
    ("type_arguments", CHILDREN_ONLY),
    ("array_type", &[("element", Node), ("dimensions", Node)]),
    ("scoped_identifier", &[("scope", Node), ("name", Node)]),
    ("scoped_type_identifier", CHILDREN_ONLY),
    ("wildcard", &[("children", NodeList), ("text", Primitive)]),
    ("dimensions_expr", CHILDREN_ONLY),
    // Leaves
    ("identifier", TEXT_ONLY),
    ("type_identifier", TEXT_ONLY),
    ("integral_type", TEXT_ONLY),
    ("floating_point_type", TEXT_ONLY),
    ("boolean_type", TEXT_ONLY),
    ("void_type", TEXT_ONLY),
    ("dimensions", TEXT_ONLY),
    ("this", TEXT_ONLY),
    ("super", TEXT_ONLY),
    ("asterisk", TEXT_ONLY),
    ("decimal_integer_literal", TEXT_ONLY),
    ("hex_integer_literal", TEXT_ONLY),
    ("octal_integer_literal", TEXT_ONLY),
    ("binary_integer_literal", TEXT_ONLY),
    ("decimal_floating_point_literal", TEXT_ONLY),
    ("hex_floating_point_literal", TEXT_ONLY),
    ("character_literal", TEXT_ONLY),
    ("string_literal", &[("children", NodeList), ("text", Primitive)]),
    ("string_fragment", TEXT_ONLY),
    ("multiline_string_fragment", TEXT_ONLY),
    ("escape_sequence", TEXT_ONLY),
    ("requires_modifier", TEXT_ONLY),
    ("true", TEXT_ONLY),
    ("false", TEXT_ONLY),
    ("null_literal", TEXT_ONLY),
    ("line_comment", TEXT_ONLY),
    ("block_comment", TEXT_ONLY),
];
