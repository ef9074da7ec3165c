//! Class extraction: heritage, methods, the constructor and properties.

use tree_sitter::Node as TsNode;

use super::comments::leading_comments;
use super::functions::extract_parameters;
use super::helpers::{
    children, field_children, first_child_of_kind, first_field, first_identifier, generic_types,
    has_token,
    is_exported, named_children, return_type, strip_type_prefix, value_after_equals,
};
use super::Context;
use crate::types::{ClassInfo, ConstructorInfo, MethodInfo, PropertyInfo};

const CONSTRUCTOR_NAMES: &[&str] = &["constructor", "__init__", "__construct", "initialize"];

const METHOD_KINDS: &[&str] = &[
    "method_definition",
    "abstract_method_signature",
    "method_declaration",
    "function_definition",
    "method",
    "singleton_method",
];

const PROPERTY_KINDS: &[&str] = &[
    "public_field_definition",
    "field_definition",
    "property_definition",
    "field_declaration",
    "property_declaration",
];

/// Heritage collected from whichever clauses the grammar exposes.
#[derive(Default)]
struct Heritage {
    extends: Option<String>,
    implements: Vec<String>,
}

impl Heritage {
    /// First name becomes the superclass, the rest are interfaces.
    fn push_bases(&mut self, names: Vec<String>) {
        let mut names = names.into_iter();
        if self.extends.is_none() {
            self.extends = names.next();
        }
        self.implements.extend(names);
    }
}

pub(crate) fn extract(ctx: &Context<'_>, node: TsNode<'_>) -> Option<ClassInfo> {
    let name = node
        .child_by_field_name("name")
        .map(|n| ctx.text(n))
        .unwrap_or_default();

    let heritage = heritage(ctx, node);

    let mut class = ClassInfo {
        name,
        methods: Vec::new(),
        properties: Vec::new(),
        constructor: None,
        extends: heritage.extends,
        implements: if heritage.implements.is_empty() {
            None
        } else {
            Some(heritage.implements)
        },
        is_exported: is_exported(ctx, node, true),
        is_abstract: node.kind() == "abstract_class_declaration" || has_token(ctx, node, "abstract"),
        generic_types: generic_types(ctx, node),
        location: ctx.location(node),
        comments: leading_comments(ctx, node),
    };

    let body = node
        .child_by_field_name("body")
        .or_else(|| first_child_of_kind(node, &["body_statement", "class_body", "declaration_list"]));
    let members = match body {
        Some(b) => named_children(b),
        None => named_children(node),
    };
    for member in members {
        visit_member(ctx, member, &mut class);
    }

    Some(class)
}

// ----------------------------------------------------------------------------
// Heritage
// ----------------------------------------------------------------------------

fn heritage(ctx: &Context<'_>, node: TsNode<'_>) -> Heritage {
    let mut h = Heritage::default();

    // Python `class A(B, C)` exposes its bases as a field.
    if let Some(bases) = node.child_by_field_name("superclasses") {
        h.push_bases(type_names(ctx, bases));
    }

    for child in children(node) {
        match child.kind() {
            "class_heritage" => {
                let clauses = named_children(child);
                let mut saw_clause = false;
                for clause in &clauses {
                    match clause.kind() {
                        "extends_clause" => {
                            saw_clause = true;
                            h.extends = clause
                                .child_by_field_name("value")
                                .or_else(|| named_children(*clause).into_iter().next())
                                .map(|v| ctx.text(v));
                        }
                        "implements_clause" => {
                            saw_clause = true;
                            h.implements.extend(type_names(ctx, *clause));
                        }
                        _ => {}
                    }
                }
                // JavaScript: `class_heritage` is `extends <expr>` with no clause node.
                if !saw_clause {
                    h.extends = clauses.first().map(|c| ctx.text(*c));
                }
            }
            // Java and Ruby.
            "superclass" => {
                h.extends = named_children(child).into_iter().next().map(|t| ctx.text(t));
            }
            "super_interfaces" => {
                for list in named_children(child) {
                    h.implements.extend(type_names(ctx, list));
                }
            }
            // PHP.
            "base_clause" => {
                h.extends = type_names(ctx, child).into_iter().next();
            }
            "class_interface_clause" => h.implements.extend(type_names(ctx, child)),
            // C#: no syntactic split between base class and interfaces.
            "base_list" => h.push_bases(type_names(ctx, child)),
            _ => {}
        }
    }
    h
}

/// Text of each type-like named child, skipping keyword arguments and comments.
pub(crate) fn type_names(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<String> {
    named_children(node)
        .into_iter()
        .filter(|c| !matches!(c.kind(), "keyword_argument" | "comment" | "argument_list"))
        .flat_map(|c| {
            if c.kind() == "type_list" {
                named_children(c).into_iter().map(|t| ctx.text(t)).collect()
            } else {
                vec![ctx.text(c)]
            }
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Members
// ----------------------------------------------------------------------------

fn visit_member(ctx: &Context<'_>, member: TsNode<'_>, class: &mut ClassInfo) {
    let kind = member.kind();

    if kind == "decorated_definition" {
        if let Some(def) = member.child_by_field_name("definition") {
            visit_member(ctx, def, class);
        }
        return;
    }

    if kind == "constructor_declaration" {
        set_constructor(ctx, member, class);
        return;
    }

    if METHOD_KINDS.contains(&kind) {
        let name = member
            .child_by_field_name("name")
            .map(|n| ctx.text(n))
            .unwrap_or_default();
        if CONSTRUCTOR_NAMES.contains(&name.as_str()) {
            set_constructor(ctx, member, class);
        } else {
            class.methods.push(method(ctx, member, name));
        }
        return;
    }

    if PROPERTY_KINDS.contains(&kind) {
        class.properties.extend(properties(ctx, member));
        return;
    }

    // Python class attributes: `x: int = 0`.
    if kind == "expression_statement" {
        if let Some(assign) = named_children(member)
            .into_iter()
            .find(|c| c.kind() == "assignment")
        {
            class.properties.extend(python_attribute(ctx, member, assign));
        }
    }
}

/// Only the first constructor is recorded; overloads are ignored.
fn set_constructor(ctx: &Context<'_>, member: TsNode<'_>, class: &mut ClassInfo) {
    if class.constructor.is_some() {
        return;
    }
    let parameters = member
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(ctx, p))
        .unwrap_or_default();
    class.constructor = Some(ConstructorInfo {
        parameters,
        location: ctx.location(member),
    });
}

fn method(ctx: &Context<'_>, member: TsNode<'_>, name: String) -> MethodInfo {
    let parameters = member
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(ctx, p))
        .unwrap_or_default();
    MethodInfo {
        is_private: name.starts_with('#') || has_token(ctx, member, "private"),
        name,
        parameters,
        return_type: return_type(ctx, member),
        is_static: member.kind() == "singleton_method" || has_token(ctx, member, "static"),
        is_protected: has_token(ctx, member, "protected"),
        is_async: has_token(ctx, member, "async"),
        is_abstract: member.kind() == "abstract_method_signature"
            || has_token(ctx, member, "abstract"),
        location: ctx.location(member),
        comments: leading_comments(ctx, member),
    }
}

/// One property per declared name; Java, C# and PHP allow several per declaration.
fn properties(ctx: &Context<'_>, member: TsNode<'_>) -> Vec<PropertyInfo> {
    let template = PropertyInfo {
        name: String::new(),
        type_name: member
            .child_by_field_name("type")
            .map(|t| strip_type_prefix(ctx.slice(t))),
        is_static: has_token(ctx, member, "static"),
        is_private: has_token(ctx, member, "private"),
        is_protected: has_token(ctx, member, "protected"),
        is_readonly: has_token(ctx, member, "readonly"),
        default_value: None,
        location: ctx.location(member),
    };

    // TS/JS fields and C# properties name themselves directly.
    if let Some(name) = first_field(member, &["name", "property"]) {
        let text = ctx.text(name);
        return vec![PropertyInfo {
            is_private: template.is_private || text.starts_with('#'),
            name: text,
            default_value: member
                .child_by_field_name("value")
                .map(|v| ctx.text(v))
                .or_else(|| value_after_equals(ctx, member)),
            ..template
        }];
    }

    declarators(member)
        .into_iter()
        .map(|(declarator, type_node)| PropertyInfo {
            name: declarator
                .child_by_field_name("name")
                .or_else(|| first_identifier(declarator))
                .map(|n| ctx.text(n))
                .unwrap_or_default(),
            type_name: type_node
                .map(|t| ctx.text(t))
                .or_else(|| template.type_name.clone()),
            default_value: initializer(ctx, declarator),
            ..template.clone()
        })
        .collect()
}

/// Declarator nodes of a field declaration, each with the type node that governs it.
fn declarators<'t>(member: TsNode<'t>) -> Vec<(TsNode<'t>, Option<TsNode<'t>>)> {
    // Java: field_declaration > declarator: variable_declarator.
    let direct = field_children(member, "declarator");
    if !direct.is_empty() {
        return direct.into_iter().map(|d| (d, None)).collect();
    }
    let mut out = Vec::new();
    for child in named_children(member) {
        match child.kind() {
            // C#: field_declaration > variable_declaration(type, variable_declarator+).
            "variable_declaration" => {
                let ty = child.child_by_field_name("type");
                for d in named_children(child) {
                    if d.kind() == "variable_declarator" {
                        out.push((d, ty));
                    }
                }
            }
            // PHP: property_declaration > property_element+.
            "property_element" => out.push((child, None)),
            _ => {}
        }
    }
    out
}

fn initializer(ctx: &Context<'_>, declarator: TsNode<'_>) -> Option<String> {
    if let Some(v) = first_field(declarator, &["value", "default_value"]) {
        return Some(ctx.text(v));
    }
    for child in named_children(declarator) {
        if matches!(child.kind(), "property_initializer" | "equals_value_clause") {
            return named_children(child).into_iter().next().map(|v| ctx.text(v));
        }
    }
    value_after_equals(ctx, declarator)
}

fn python_attribute(ctx: &Context<'_>, stmt: TsNode<'_>, assign: TsNode<'_>) -> Option<PropertyInfo> {
    let left = assign.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }
    let name = ctx.text(left);
    Some(PropertyInfo {
        is_private: name.starts_with("__"),
        is_protected: name.starts_with('_') && !name.starts_with("__"),
        name,
        type_name: assign.child_by_field_name("type").map(|t| ctx.text(t)),
        is_static: true,
        is_readonly: false,
        default_value: assign.child_by_field_name("right").map(|r| ctx.text(r)),
        location: ctx.location(stmt),
    })
}
