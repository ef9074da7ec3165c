//! Variable declarations (`const`, `let`, `var`).

use tree_sitter::Node as TsNode;

use super::functions::{bound_names, is_pattern, pattern_display};
use super::helpers::{children, is_exported, named_children, strip_type_prefix};
use super::Context;
use crate::types::{DeclarationKind, VariableInfo, ANY_TYPE};

/// One entry per declarator. Locations span the whole declaration.
pub(crate) fn extract(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<VariableInfo> {
    let declaration_kind = declaration_kind(ctx, node);
    let is_exported = is_exported(ctx, node, true);
    let location = ctx.location(node);

    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "variable_declarator")
        .map(|declarator| {
            let (name, bindings) = match declarator.child_by_field_name("name") {
                Some(n) if is_pattern(n.kind()) => {
                    (pattern_display(ctx, n), bound_names(ctx, n))
                }
                Some(n) => {
                    let text = ctx.text(n);
                    (text.clone(), vec![text])
                }
                None => (String::new(), Vec::new()),
            };
            let value = declarator.child_by_field_name("value");
            let value_type = declarator
                .child_by_field_name("type")
                .map(|t| strip_type_prefix(ctx.slice(t)))
                .filter(|t| !t.is_empty())
                .or_else(|| value.map(|v| infer_type(v.kind()).to_string()))
                .unwrap_or_else(|| ANY_TYPE.to_string());

            VariableInfo {
                name,
                bindings,
                declaration_kind,
                is_exported,
                value_type,
                default_value: value.map(|v| ctx.text(v)),
                location: location.clone(),
            }
        })
        .collect()
}

fn declaration_kind(ctx: &Context<'_>, node: TsNode<'_>) -> DeclarationKind {
    if node.kind() == "variable_declaration" {
        return DeclarationKind::Var;
    }
    let keyword = node
        .child_by_field_name("kind")
        .or_else(|| children(node).into_iter().find(|c| !c.is_named()))
        .map(|k| ctx.slice(k))
        .unwrap_or("");
    match keyword {
        "const" => DeclarationKind::Const,
        "var" => DeclarationKind::Var,
        _ => DeclarationKind::Let,
    }
}

/// Type implied by an initializer's literal kind, or `any`.
pub(crate) fn infer_type(kind: &str) -> &'static str {
    match kind {
        "number" => "number",
        "string" | "template_string" => "string",
        "true" | "false" => "boolean",
        "null" => "null",
        "undefined" => "undefined",
        "array" => "array",
        "object" => "object",
        "arrow_function" | "function_expression" | "function" | "generator_function" => {
            "function"
        }
        _ => ANY_TYPE,
    }
}
