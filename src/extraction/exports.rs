//! Export statements.

use tree_sitter::Node as TsNode;

use super::helpers::{children, is_string_kind, is_token, named_children, string_value};
use super::Context;
use crate::types::{ExportInfo, ExportKind};

/// Extracts the bindings an export statement exports.
///
/// Export clauses yield one entry per specifier; every other form yields one.
pub(crate) fn extract(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<ExportInfo> {
    let kids = children(node);
    let is_default = kids.iter().any(|c| !c.is_named() && is_token(ctx, *c, "default"));
    let is_type_export = kids.iter().any(|c| !c.is_named() && is_token(ctx, *c, "type"));

    let original_source = node
        .child_by_field_name("source")
        .or_else(|| kids.iter().copied().find(|c| is_string_kind(c.kind())))
        .map(|s| string_value(ctx, s));
    let is_re_export = original_source.is_some();

    let export = |name: String, kind: ExportKind| ExportInfo {
        name,
        kind,
        is_re_export,
        original_source: original_source.clone(),
    };

    // `export { a, b as c }` / `export type { T }`
    if let Some(clause) = kids.iter().find(|c| c.kind() == "export_clause") {
        let kind = if is_type_export {
            ExportKind::Type
        } else {
            ExportKind::Variable
        };
        return named_children(*clause)
            .into_iter()
            .filter(|s| s.kind() == "export_specifier")
            .filter_map(|spec| {
                let name = spec
                    .child_by_field_name("alias")
                    .or_else(|| spec.child_by_field_name("name"))?;
                Some(export(string_value(ctx, name), kind))
            })
            .collect();
    }

    // `export * as ns from "m"`
    if let Some(ns) = kids.iter().find(|c| c.kind() == "namespace_export") {
        let name = named_children(*ns)
            .into_iter()
            .last()
            .map(|id| string_value(ctx, id))
            .unwrap_or_default();
        return vec![export(name, ExportKind::Variable)];
    }

    // `export * from "m"`
    if kids.iter().any(|c| !c.is_named() && is_token(ctx, *c, "*")) {
        return vec![export("*".to_string(), ExportKind::Variable)];
    }

    let (mut name, mut kind) = match node.child_by_field_name("declaration") {
        Some(decl) => declaration_export(ctx, decl),
        None => (String::new(), ExportKind::Variable),
    };

    if is_default {
        kind = ExportKind::Default;
        if name.is_empty() {
            // `export default foo;` names the exported identifier; other
            // expressions stay anonymous.
            if let Some(value) = node.child_by_field_name("value").or_else(|| {
                kids.iter()
                    .copied()
                    .find(|c| c.is_named() && c.kind() != "comment")
            }) {
                name = match value.kind() {
                    "identifier" => ctx.text(value),
                    "function_declaration" | "function_expression" | "class_declaration"
                    | "class" | "generator_function_declaration" => value
                        .child_by_field_name("name")
                        .map(|n| ctx.text(n))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
            }
        }
    }

    vec![export(name, kind)]
}

/// Name and kind of an exported declaration.
fn declaration_export(ctx: &Context<'_>, decl: TsNode<'_>) -> (String, ExportKind) {
    let own_name = || {
        decl.child_by_field_name("name")
            .map(|n| ctx.text(n))
            .unwrap_or_default()
    };
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            (own_name(), ExportKind::Function)
        }
        "class_declaration" | "abstract_class_declaration" => (own_name(), ExportKind::Class),
        "type_alias_declaration" => (own_name(), ExportKind::Type),
        "interface_declaration" => (own_name(), ExportKind::Interface),
        "lexical_declaration" | "variable_declaration" => {
            let name = named_children(decl)
                .into_iter()
                .find(|c| c.kind() == "variable_declarator")
                .and_then(|d| d.child_by_field_name("name"))
                .map(|n| ctx.text(n))
                .unwrap_or_default();
            (name, ExportKind::Variable)
        }
        _ => (own_name(), ExportKind::Variable),
    }
}
