//! Syntax-tree walk and declaration classification

use crate::jsdoc::JsDoc;
use crate::syntax::{
    annotation_text, child_of_kind, collapse_whitespace, has_token, signature_text,
    split_top_level, text,
};
use crate::types::{DefinitionKind, Member, MemberKind, Parameter, SourceLocation, TypeDefinition};
use tracing::trace;
use tree_sitter::Node;

/// Statement containers whose variable statements count as top level
const TOP_LEVEL_PARENTS: &[&str] = &["program", "export_statement", "ambient_declaration"];

/// Declaration bodies of `declare namespace` / `declare module` / `declare global`
const MODULE_KINDS: &[&str] = &["internal_module", "module", "ambient_declaration"];

/// A syntax node recognized as a declaration
#[derive(Debug, Clone, Copy)]
pub(crate) enum Declaration<'t> {
    Function(Node<'t>),
    Interface(Node<'t>),
    TypeAlias(Node<'t>),
    Class(Node<'t>),
    Enum(Node<'t>),
    Variable {
        statement: Node<'t>,
        declarator: Node<'t>,
    },
}

impl<'t> Declaration<'t> {
    /// Recognize the declaration shape of a node, if any
    pub fn classify(node: Node<'t>) -> Option<Self> {
        // `export default function (): void` and friends declare nothing by name
        let anonymous = node.child_by_field_name("name").is_none() && !node.has_error();
        match node.kind() {
            _ if anonymous && node.kind() != "variable_declarator" => None,
            "function_signature" | "function_declaration" => Some(Self::Function(node)),
            "interface_declaration" => Some(Self::Interface(node)),
            "type_alias_declaration" => Some(Self::TypeAlias(node)),
            "class_declaration" | "abstract_class_declaration" => Some(Self::Class(node)),
            "enum_declaration" => Some(Self::Enum(node)),
            "variable_declarator" => {
                let statement = node.parent()?;
                let is_statement = matches!(
                    statement.kind(),
                    "lexical_declaration" | "variable_declaration"
                );
                (is_statement && is_top_level(statement)).then_some(Self::Variable {
                    statement,
                    declarator: node,
                })
            }
            _ => None,
        }
    }

    fn node(&self) -> Node<'t> {
        match *self {
            Self::Function(node)
            | Self::Interface(node)
            | Self::TypeAlias(node)
            | Self::Class(node)
            | Self::Enum(node) => node,
            Self::Variable { declarator, .. } => declarator,
        }
    }

    /// Build the definition, with documentation merged in
    pub fn build(self, source: &str) -> Result<TypeDefinition, String> {
        let node = self.node();
        let name = node
            .child_by_field_name("name")
            .map(|n| text(n, source).trim_matches(['"', '\'']).to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                format!(
                    "{} without a name at line {}",
                    node.kind().replace('_', " "),
                    node.start_position().row + 1
                )
            })?;

        let location = SourceLocation::from_point(node.start_position());
        let mut definition = match self {
            Self::Function(node) => build_function(node, name, location, source),
            Self::Interface(node) => build_interface(node, name, location, source),
            Self::TypeAlias(node) => {
                let mut def = TypeDefinition::new(
                    name,
                    DefinitionKind::Type,
                    signature_text(node, source),
                    location,
                );
                def.generics = generics(node, source);
                def
            }
            Self::Class(node) => build_class(node, name, location, source),
            Self::Enum(node) => build_enum(node, name, location, source),
            Self::Variable {
                statement,
                declarator,
            } => build_variable(statement, declarator, name, location, source),
        };

        JsDoc::for_node(node, source).apply_to(&mut definition);
        trace!(name = %definition.name, kind = %definition.kind, "Classified declaration");
        Ok(definition)
    }
}

fn is_top_level(statement: Node) -> bool {
    let Some(parent) = statement.parent() else {
        return false;
    };
    if TOP_LEVEL_PARENTS.contains(&parent.kind()) {
        return true;
    }
    parent.kind() == "statement_block"
        && parent
            .parent()
            .is_some_and(|owner| MODULE_KINDS.contains(&owner.kind()))
}

/// Text of `node` up to (not including) its body
fn header_text(node: Node, source: &str) -> String {
    match node.child_by_field_name("body") {
        Some(body) => {
            let header = source
                .get(node.start_byte()..body.start_byte())
                .unwrap_or_default();
            collapse_whitespace(header)
        }
        None => signature_text(node, source),
    }
}

fn generics(node: Node, source: &str) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "type_parameter")
        .map(|child| collapse_whitespace(text(child, source)))
        .collect()
}

fn parameters(node: Option<Node>, source: &str) -> Vec<Parameter> {
    let Some(node) = node else {
        return Vec::new();
    };
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "required_parameter" | "optional_parameter"))
        .map(|child| {
            let pattern = child.child_by_field_name("pattern");
            let rest = pattern.is_some_and(|p| p.kind() == "rest_pattern");
            let name = pattern
                .map(|p| collapse_whitespace(text(p, source)))
                .unwrap_or_default()
                .trim_start_matches("...")
                .to_string();
            let default_value = child
                .child_by_field_name("value")
                .map(|v| collapse_whitespace(text(v, source)));
            Parameter {
                name,
                type_annotation: child
                    .child_by_field_name("type")
                    .map(|t| annotation_text(t, source))
                    .unwrap_or_else(|| "any".to_string()),
                optional: child.kind() == "optional_parameter" || default_value.is_some(),
                rest,
                default_value,
                description: None,
            }
        })
        .collect()
}

fn return_type(node: Node, source: &str) -> Option<String> {
    node.child_by_field_name("return_type")
        .map(|t| annotation_text(t, source))
        .filter(|t| !t.is_empty())
}

fn build_function(
    node: Node,
    name: String,
    location: SourceLocation,
    source: &str,
) -> TypeDefinition {
    let mut def = TypeDefinition::new(
        name,
        DefinitionKind::Function,
        header_text(node, source),
        location,
    );
    def.parameters = parameters(node.child_by_field_name("parameters"), source);
    def.return_type = return_type(node, source);
    def.generics = generics(node, source);
    def
}

fn build_interface(
    node: Node,
    name: String,
    location: SourceLocation,
    source: &str,
) -> TypeDefinition {
    let mut def = TypeDefinition::new(
        name,
        DefinitionKind::Interface,
        signature_text(node, source),
        location,
    );
    def.generics = generics(node, source);
    if let Some(clause) = child_of_kind(node, &["extends_type_clause"]) {
        def.extends = clause_types(clause, "extends", source);
    }
    if let Some(body) = node.child_by_field_name("body") {
        def.members = type_members(body, source);
    }
    def
}

fn build_class(
    node: Node,
    name: String,
    location: SourceLocation,
    source: &str,
) -> TypeDefinition {
    let mut def = TypeDefinition::new(
        name,
        DefinitionKind::Class,
        signature_text(node, source),
        location,
    );
    def.generics = generics(node, source);
    if let Some(heritage) = child_of_kind(node, &["class_heritage"]) {
        if let Some(clause) = child_of_kind(heritage, &["extends_clause"]) {
            def.extends = clause_types(clause, "extends", source);
        }
        if let Some(clause) = child_of_kind(heritage, &["implements_clause"]) {
            def.implements = clause_types(clause, "implements", source);
        }
    }
    if let Some(body) = node.child_by_field_name("body") {
        def.members = type_members(body, source);
    }
    def
}

fn build_enum(node: Node, name: String, location: SourceLocation, source: &str) -> TypeDefinition {
    let mut def = TypeDefinition::new(
        name,
        DefinitionKind::Enum,
        signature_text(node, source),
        location,
    );
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        def.members = body
            .named_children(&mut cursor)
            .filter_map(|child| {
                let (name, value) = match child.kind() {
                    "enum_assignment" => (
                        child.child_by_field_name("name")?,
                        child
                            .child_by_field_name("value")
                            .map(|v| collapse_whitespace(text(v, source))),
                    ),
                    "property_identifier" | "string" | "number" => (child, None),
                    _ => return None,
                };
                Some(Member {
                    name: text(name, source).trim_matches(['"', '\'']).to_string(),
                    kind: MemberKind::EnumValue,
                    type_annotation: value.unwrap_or_else(|| "auto".to_string()),
                    optional: false,
                    readonly: true,
                })
            })
            .collect();
    }
    def
}

fn build_variable(
    statement: Node,
    declarator: Node,
    name: String,
    location: SourceLocation,
    source: &str,
) -> TypeDefinition {
    let keyword = statement
        .child_by_field_name("kind")
        .or_else(|| statement.child(0))
        .map(|k| text(k, source))
        .unwrap_or("const");
    let signature = format!("{keyword} {}", signature_text(declarator, source));

    let function_type = declarator
        .child_by_field_name("type")
        .and_then(|annotation| child_of_kind(annotation, &["function_type"]));

    match function_type {
        Some(function_type) => {
            let mut def =
                TypeDefinition::new(name, DefinitionKind::Function, signature, location);
            def.parameters = parameters(function_type.child_by_field_name("parameters"), source);
            def.return_type = function_type
                .child_by_field_name("return_type")
                .map(|t| collapse_whitespace(text(t, source)));
            def.generics = generics(function_type, source);
            def
        }
        None => {
            let mut def =
                TypeDefinition::new(name, DefinitionKind::Constant, signature, location);
            def.return_type = declarator
                .child_by_field_name("type")
                .map(|t| annotation_text(t, source));
            def
        }
    }
}

/// `extends A<T>, B` -> ["A<T>", "B"]
fn clause_types(clause: Node, keyword: &str, source: &str) -> Vec<String> {
    let body = collapse_whitespace(text(clause, source));
    let body = body.strip_prefix(keyword).unwrap_or(&body);
    split_top_level(body)
}

/// Members of an interface body, object type or class body
fn type_members(body: Node, source: &str) -> Vec<Member> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter_map(|child| member(child, source))
        .collect()
}

fn member(node: Node, source: &str) -> Option<Member> {
    let optional = has_token(node, "?");
    let readonly = has_token(node, "readonly");

    match node.kind() {
        "property_signature" | "public_field_definition" => Some(Member {
            name: text(node.child_by_field_name("name")?, source).to_string(),
            kind: MemberKind::Property,
            type_annotation: node
                .child_by_field_name("type")
                .map(|t| annotation_text(t, source))
                .unwrap_or_else(|| "any".to_string()),
            optional,
            readonly,
        }),
        "method_signature" | "abstract_method_signature" | "method_definition" => {
            let name = node.child_by_field_name("name")?;
            let accessor = has_token(node, "get");
            let type_annotation = if accessor {
                return_type(node, source).unwrap_or_else(|| "any".to_string())
            } else {
                let end = node
                    .child_by_field_name("body")
                    .map_or(node.end_byte(), |b| b.start_byte());
                let call = source.get(name.end_byte()..end).unwrap_or_default();
                let call = collapse_whitespace(call);
                call.trim_start_matches('?')
                    .trim_end_matches([';', ','])
                    .trim()
                    .to_string()
            };
            Some(Member {
                name: text(name, source).to_string(),
                kind: if accessor {
                    MemberKind::Accessor
                } else {
                    MemberKind::Method
                },
                type_annotation,
                optional,
                readonly: readonly || accessor,
            })
        }
        "call_signature" | "construct_signature" => {
            let construct = node.kind() == "construct_signature";
            Some(Member {
                name: if construct { "new" } else { "()" }.to_string(),
                kind: if construct {
                    MemberKind::Construct
                } else {
                    MemberKind::Call
                },
                type_annotation: signature_text(node, source),
                optional: false,
                readonly: false,
            })
        }
        "index_signature" => {
            let ty = node.child_by_field_name("type");
            let end = ty.map_or(node.end_byte(), |t| t.start_byte());
            let key = source.get(node.start_byte()..end).unwrap_or_default();
            let key = collapse_whitespace(key);
            Some(Member {
                name: key.trim_start_matches("readonly").trim().to_string(),
                kind: MemberKind::Index,
                type_annotation: ty
                    .map(|t| annotation_text(t, source))
                    .unwrap_or_else(|| "any".to_string()),
                optional: false,
                readonly,
            })
        }
        _ => None,
    }
}

/// Walk the whole tree in source order, collecting definitions and errors
pub(crate) fn collect(root: Node, source: &str) -> (Vec<TypeDefinition>, Vec<String>) {
    let mut definitions = Vec::new();
    let mut errors = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() {
            errors.push(format!(
                "syntax error at line {}",
                node.start_position().row + 1
            ));
        } else if node.is_missing() {
            errors.push(format!(
                "missing {} at line {}",
                node.kind(),
                node.start_position().row + 1
            ));
        }

        if let Some(declaration) = Declaration::classify(node) {
            match declaration.build(source) {
                Ok(definition) => definitions.push(definition),
                Err(message) => errors.push(message),
            }
        }

        // Children are always visited so nested and exported declarations are found
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    (definitions, errors)
}
