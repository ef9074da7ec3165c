//! Function and parameter extraction.

use tree_sitter::Node as TsNode;

use super::comments::leading_comments;
use super::helpers::{
    children, collapse_whitespace, field_children, first_field, first_identifier, has_token,
    is_exported, is_identifier_kind, named_children, return_type, strip_type_prefix,
    value_after_equals,
};
use super::Context;
use crate::grammar::GrammarFamily;
use crate::types::{FunctionInfo, Parameter, ANY_TYPE};

/// Node kinds accepted as entries of a parameter list, across all families.
const PARAMETER_KINDS: &[&str] = &[
    // ecma
    "required_parameter",
    "optional_parameter",
    "identifier",
    "assignment_pattern",
    "object_pattern",
    "array_pattern",
    "rest_pattern",
    // python
    "typed_parameter",
    "default_parameter",
    "typed_default_parameter",
    "list_splat_pattern",
    "dictionary_splat_pattern",
    // java
    "formal_parameter",
    "spread_parameter",
    // go
    "parameter_declaration",
    "variadic_parameter_declaration",
    // c / c++
    "optional_parameter_declaration",
    "variadic_parameter",
    // c# / rust
    "parameter",
    "self_parameter",
    // php
    "simple_parameter",
    "property_promotion_parameter",
    // ruby
    "splat_parameter",
    "hash_splat_parameter",
    "keyword_parameter",
    "block_parameter",
];

/// Kinds whose presence marks a parameter as variadic.
const REST_KINDS: &[&str] = &[
    "rest_pattern",
    "list_splat_pattern",
    "dictionary_splat_pattern",
    "spread_parameter",
    "variadic_parameter",
    "variadic_parameter_declaration",
    "splat_parameter",
    "hash_splat_parameter",
];

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Extracts a free-standing function. Every field degrades to a default.
pub(crate) fn extract(ctx: &Context<'_>, node: TsNode<'_>) -> Option<FunctionInfo> {
    let (name, params) = match ctx.grammar.family() {
        GrammarFamily::CFamily => c_signature(ctx, node),
        _ => (
            node.child_by_field_name("name")
                .map(|n| ctx.text(n))
                .unwrap_or_default(),
            node.child_by_field_name("parameters"),
        ),
    };

    Some(FunctionInfo {
        name,
        parameters: params.map(|p| extract_parameters(ctx, p)).unwrap_or_default(),
        return_type: return_type(ctx, node).unwrap_or_default(),
        is_async: has_token(ctx, node, "async"),
        is_generator: node.kind() == "generator_function_declaration" || has_token(ctx, node, "*"),
        is_exported: is_exported(ctx, node, false),
        location: ctx.location(node),
        comments: leading_comments(ctx, node),
    })
}

/// Follows the `declarator` chain of a C/C++ definition down to its
/// `function_declarator`, returning the declared name and parameter list.
fn c_signature<'t>(ctx: &Context<'_>, node: TsNode<'t>) -> (String, Option<TsNode<'t>>) {
    let mut current = node.child_by_field_name("declarator");
    while let Some(declarator) = current {
        if declarator.kind() == "function_declarator" {
            let name = declarator
                .child_by_field_name("declarator")
                .map(|n| ctx.text(n))
                .unwrap_or_default();
            return (name, declarator.child_by_field_name("parameters"));
        }
        // C++ `reference_declarator` wraps its inner declarator without a field.
        current = declarator
            .child_by_field_name("declarator")
            .or_else(|| match declarator.kind() {
                "reference_declarator" => named_children(declarator).into_iter().next(),
                _ => None,
            });
    }
    (String::new(), None)
}

// ----------------------------------------------------------------------------
// Parameters
// ----------------------------------------------------------------------------

/// Extracts every parameter of a parameter-list node, in order.
pub(crate) fn extract_parameters(ctx: &Context<'_>, list: TsNode<'_>) -> Vec<Parameter> {
    let mut params = Vec::new();
    for child in named_children(list) {
        let kind = child.kind();
        if !PARAMETER_KINDS.contains(&kind) {
            continue;
        }
        // C# `params T[] name` has no wrapper node; see `csharp_params_array`.
        if ctx.grammar.family() == GrammarFamily::CSharp && kind == "identifier" {
            continue;
        }
        // Go groups names sharing a type: `a, b int`.
        if ctx.grammar.family() == GrammarFamily::Go && kind == "parameter_declaration" {
            params.extend(go_parameters(ctx, child));
            continue;
        }
        params.push(extract_parameter(ctx, child));
    }
    if ctx.grammar.family() == GrammarFamily::CSharp {
        params.extend(csharp_params_array(ctx, list));
    }
    params
}

/// The trailing C# `params` array, whose type and name sit directly in the list.
fn csharp_params_array(ctx: &Context<'_>, list: TsNode<'_>) -> Option<Parameter> {
    let mut cursor = list.walk();
    if !cursor.goto_first_child() {
        return None;
    }
    let mut seen_params = false;
    let mut type_name = None;
    loop {
        let node = cursor.node();
        if !node.is_named() && ctx.slice(node) == "params" {
            seen_params = true;
        } else if seen_params {
            match cursor.field_name() {
                Some("type") => type_name = Some(ctx.text(node)),
                Some("name") => {
                    return Some(Parameter {
                        type_name: type_name.unwrap_or_else(|| ANY_TYPE.to_string()),
                        is_rest: true,
                        ..Parameter::named(ctx.text(node))
                    });
                }
                _ => {}
            }
        }
        if !cursor.goto_next_sibling() {
            return None;
        }
    }
}

fn go_parameters(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<Parameter> {
    let type_name = node
        .child_by_field_name("type")
        .map(|t| ctx.text(t))
        .unwrap_or_else(|| ANY_TYPE.to_string());
    let names = field_children(node, "name");
    if names.is_empty() {
        return vec![Parameter {
            type_name,
            ..Parameter::named("")
        }];
    }
    names
        .into_iter()
        .map(|n| Parameter {
            type_name: type_name.clone(),
            ..Parameter::named(ctx.text(n))
        })
        .collect()
}

/// Extracts a single parameter node.
pub(crate) fn extract_parameter(ctx: &Context<'_>, node: TsNode<'_>) -> Parameter {
    // Java `int... rest` carries its type as an unlabelled child.
    let type_node = node
        .child_by_field_name("type")
        .or_else(|| match node.kind() {
            "spread_parameter" => spread_type(node),
            _ => None,
        });
    let type_name = type_node
        .map(|t| strip_type_prefix(ctx.slice(t)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ANY_TYPE.to_string());

    let default_value = first_field(node, &["value", "default_value", "right"])
        .map(|v| ctx.text(v))
        .or_else(|| value_after_equals(ctx, node))
        .or_else(|| {
            // C#: `int retries = 3` wraps the default in `equals_value_clause`.
            named_children(node)
                .into_iter()
                .find(|c| c.kind() == "equals_value_clause")
                .and_then(|clause| named_children(clause).into_iter().next())
                .map(|v| ctx.text(v))
        });

    let binding = binding_node(node);
    let mut is_rest = REST_KINDS.contains(&node.kind()) || has_token(ctx, node, "...");
    let mut target = binding;
    if let Some(b) = binding {
        if REST_KINDS.contains(&b.kind()) {
            is_rest = true;
            target = named_children(b).into_iter().next().or(Some(b));
        }
    }

    let mut param = Parameter::named("");
    match target {
        Some(t) if is_pattern(t.kind()) => {
            param.name = collapse_whitespace(ctx.slice(t));
            param.is_destructured = true;
            param.parameters = pattern_elements(ctx, t);
        }
        Some(t) => {
            param.name = bare_name(ctx.slice(t)).to_string();
        }
        None => {}
    }

    param.is_optional = node.kind() == "optional_parameter"
        || has_token(ctx, node, "?")
        || default_value.is_some();
    param.is_rest = is_rest;
    param.default_value = default_value;
    param.type_name = type_name;

    // Function-typed annotation: `cb: (err: Error) => void`.
    if !param.is_destructured {
        if let Some(fn_type) = type_node.and_then(function_type) {
            if let Some(list) = fn_type.child_by_field_name("parameters") {
                param.parameters = extract_parameters(ctx, list);
            }
        }
    }

    param
}

/// Locates the node that names what a parameter binds.
fn binding_node(node: TsNode<'_>) -> Option<TsNode<'_>> {
    let kind = node.kind();
    if is_identifier_kind(kind) || is_pattern(kind) || kind == "rest_pattern" {
        return Some(node);
    }
    if matches!(kind, "list_splat_pattern" | "dictionary_splat_pattern") {
        return Some(node);
    }
    if let Some(n) = first_field(node, &["pattern", "left", "name", "declarator"]) {
        // `const A&` declares no name.
        if n.kind().starts_with("abstract_") {
            return None;
        }
        if is_identifier_kind(n.kind()) || is_pattern(n.kind()) || REST_KINDS.contains(&n.kind()) {
            return Some(n);
        }
        return first_identifier(n).or(Some(n));
    }
    // Python `*args: int` nests the splat inside `typed_parameter`.
    named_children(node)
        .into_iter()
        .find(|c| REST_KINDS.contains(&c.kind()))
        .or_else(|| first_identifier(node))
}

fn spread_type(node: TsNode<'_>) -> Option<TsNode<'_>> {
    named_children(node).into_iter().find(|c| {
        !matches!(
            c.kind(),
            "modifiers" | "variable_declarator" | "annotation" | "marker_annotation"
        )
    })
}

fn function_type(type_node: TsNode<'_>) -> Option<TsNode<'_>> {
    if type_node.kind() == "function_type" {
        return Some(type_node);
    }
    // `type_annotation` wraps the actual type.
    named_children(type_node)
        .into_iter()
        .find(|c| c.kind() == "function_type")
}

fn bare_name(text: &str) -> &str {
    text.trim_start_matches("...").trim_start_matches('*').trim()
}

pub(crate) fn is_pattern(kind: &str) -> bool {
    matches!(kind, "object_pattern" | "array_pattern")
}

// ----------------------------------------------------------------------------
// Destructuring patterns
// ----------------------------------------------------------------------------

/// Sub-parameters bound by an object or array pattern.
pub(crate) fn pattern_elements(ctx: &Context<'_>, pattern: TsNode<'_>) -> Vec<Parameter> {
    named_children(pattern)
        .into_iter()
        .filter_map(|element| pattern_binding(ctx, element))
        .collect()
}

fn pattern_binding(ctx: &Context<'_>, element: TsNode<'_>) -> Option<Parameter> {
    match element.kind() {
        "shorthand_property_identifier_pattern" | "identifier" => {
            Some(Parameter::named(ctx.text(element)))
        }
        // `b: c` binds `c`.
        "pair_pattern" => element
            .child_by_field_name("value")
            .and_then(|value| pattern_binding(ctx, value)),
        "assignment_pattern" | "object_assignment_pattern" => {
            let left = element.child_by_field_name("left")?;
            let mut param = pattern_binding(ctx, left)?;
            param.default_value = element.child_by_field_name("right").map(|r| ctx.text(r));
            param.is_optional = true;
            Some(param)
        }
        "rest_pattern" => {
            let inner = named_children(element).into_iter().next()?;
            let mut param = pattern_binding(ctx, inner)?;
            param.is_rest = true;
            Some(param)
        }
        "object_pattern" | "array_pattern" => Some(Parameter {
            is_destructured: true,
            parameters: pattern_elements(ctx, element),
            ..Parameter::named(collapse_whitespace(ctx.slice(element)))
        }),
        _ => None,
    }
}

/// Identifiers actually bound by a pattern, depth first.
pub(crate) fn bound_names(ctx: &Context<'_>, pattern: TsNode<'_>) -> Vec<String> {
    fn flatten(params: Vec<Parameter>, out: &mut Vec<String>) {
        for p in params {
            if p.is_destructured {
                flatten(p.parameters, out);
            } else {
                out.push(p.name);
            }
        }
    }
    let mut names = Vec::new();
    flatten(pattern_elements(ctx, pattern), &mut names);
    names
}

/// Display string for a pattern: `{ a, b: c }`, `[a, ...rest]`.
pub(crate) fn pattern_display(ctx: &Context<'_>, pattern: TsNode<'_>) -> String {
    let parts: Vec<String> = named_children(pattern)
        .into_iter()
        .filter_map(|element| element_display(ctx, element))
        .collect();
    if pattern.kind() == "array_pattern" {
        format!("[{}]", parts.join(", "))
    } else if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}

fn element_display(ctx: &Context<'_>, element: TsNode<'_>) -> Option<String> {
    match element.kind() {
        "shorthand_property_identifier_pattern" | "identifier" => Some(ctx.text(element)),
        "pair_pattern" => {
            let key = element.child_by_field_name("key").map(|k| ctx.text(k))?;
            let value = element
                .child_by_field_name("value")
                .and_then(|v| element_display(ctx, v))
                .unwrap_or_default();
            Some(format!("{key}: {value}"))
        }
        "assignment_pattern" | "object_assignment_pattern" => element
            .child_by_field_name("left")
            .and_then(|l| element_display(ctx, l)),
        "rest_pattern" => {
            let inner = children(element).into_iter().find(|c| c.is_named())?;
            Some(format!("...{}", element_display(ctx, inner)?))
        }
        "object_pattern" | "array_pattern" => Some(pattern_display(ctx, element)),
        _ => None,
    }
}
