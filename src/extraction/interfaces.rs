//! Interfaces and type aliases.

use tree_sitter::Node as TsNode;

use super::classes::type_names;
use super::helpers::{
    children, field_children, first_identifier, generic_types, has_token, is_exported,
    named_children, return_type, strip_type_prefix,
};
use super::Context;
use crate::types::{InterfaceInfo, InterfaceProperty, TypeAliasInfo, ANY_TYPE};

/// Clauses that list an interface's supertypes.
const EXTENDS_KINDS: &[&str] = &["extends_type_clause", "extends_interfaces", "base_list", "base_clause"];

pub(crate) fn extract(ctx: &Context<'_>, node: TsNode<'_>) -> Option<InterfaceInfo> {
    let name = node
        .child_by_field_name("name")
        .map(|n| ctx.text(n))
        .unwrap_or_default();

    let extends: Vec<String> = children(node)
        .into_iter()
        .filter(|c| EXTENDS_KINDS.contains(&c.kind()))
        .flat_map(|clause| type_names(ctx, clause))
        .collect();

    let properties = node
        .child_by_field_name("body")
        .map(|body| {
            named_children(body)
                .into_iter()
                .flat_map(|member| member_properties(ctx, member))
                .collect()
        })
        .unwrap_or_default();

    Some(InterfaceInfo {
        name,
        properties,
        extends: if extends.is_empty() { None } else { Some(extends) },
        is_exported: is_exported(ctx, node, false),
        generic_types: generic_types(ctx, node),
        location: ctx.location(node),
    })
}

fn member_properties(ctx: &Context<'_>, member: TsNode<'_>) -> Vec<InterfaceProperty> {
    let is_optional = has_token(ctx, member, "?");
    let is_readonly = has_token(ctx, member, "readonly");
    let property = |name: String, type_name: String| InterfaceProperty {
        name,
        type_name,
        is_optional,
        is_readonly,
    };

    match member.kind() {
        "property_signature" => {
            let name = field_or_empty(ctx, member, "name");
            let type_name = member
                .child_by_field_name("type")
                .map(|t| strip_type_prefix(ctx.slice(t)))
                .unwrap_or_else(|| ANY_TYPE.to_string());
            vec![property(name, type_name)]
        }
        // `[key: string]: number`
        "index_signature" => {
            let name = match (
                member.child_by_field_name("name"),
                member.child_by_field_name("index_type"),
            ) {
                (Some(key), Some(index)) => format!("[{}: {}]", ctx.slice(key), ctx.slice(index)),
                _ => named_children(member)
                    .into_iter()
                    .find(|c| c.kind() == "mapped_type_clause")
                    .map(|m| format!("[{}]", ctx.slice(m)))
                    .unwrap_or_default(),
            };
            let type_name = member
                .child_by_field_name("type")
                .map(|t| strip_type_prefix(ctx.slice(t)))
                .unwrap_or_else(|| ANY_TYPE.to_string());
            vec![property(name, type_name)]
        }
        // The call signature follows the name: `(a: number): void`.
        "method_signature" => {
            let Some(name) = member.child_by_field_name("name") else {
                return Vec::new();
            };
            let signature = &ctx.source[name.end_byte()..member.end_byte()];
            let signature = std::str::from_utf8(signature).unwrap_or("").trim();
            let signature = signature.trim_start_matches('?').trim();
            vec![property(ctx.text(name), signature.to_string())]
        }
        // Java, C# and PHP interface methods.
        "method_declaration" => {
            let name = field_or_empty(ctx, member, "name");
            let type_name = return_type(ctx, member).unwrap_or_else(|| ANY_TYPE.to_string());
            vec![property(name, type_name)]
        }
        "property_declaration" => {
            let name = field_or_empty(ctx, member, "name");
            let type_name = member
                .child_by_field_name("type")
                .map(|t| ctx.text(t))
                .unwrap_or_else(|| ANY_TYPE.to_string());
            vec![property(name, type_name)]
        }
        // Java interface constants.
        "constant_declaration" => {
            let type_name = member
                .child_by_field_name("type")
                .map(|t| ctx.text(t))
                .unwrap_or_else(|| ANY_TYPE.to_string());
            field_children(member, "declarator")
                .into_iter()
                .filter_map(|d| d.child_by_field_name("name").or_else(|| first_identifier(d)))
                .map(|n| property(ctx.text(n), type_name.clone()))
                .collect()
        }
        _ => Vec::new(),
    }
}

fn field_or_empty(ctx: &Context<'_>, node: TsNode<'_>, field: &str) -> String {
    node.child_by_field_name(field)
        .map(|n| ctx.text(n))
        .unwrap_or_default()
}

/// Extracts a type alias; the right-hand side is kept as raw text.
pub(crate) fn extract_type_alias(ctx: &Context<'_>, node: TsNode<'_>) -> Option<TypeAliasInfo> {
    let type_text = node
        .child_by_field_name("value")
        .or_else(|| node.child_by_field_name("type"))
        .map(|t| ctx.text(t))
        .unwrap_or_default();
    Some(TypeAliasInfo {
        name: field_or_empty(ctx, node, "name"),
        type_text,
        is_exported: is_exported(ctx, node, true),
        generic_types: generic_types(ctx, node),
        location: ctx.location(node),
    })
}
