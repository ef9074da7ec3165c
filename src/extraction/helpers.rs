//! Node-level utilities shared by the construct extractors.

use tree_sitter::Node as TsNode;

use super::Context;

/// Wrapper nodes whose children carry modifier keywords.
const MODIFIER_WRAPPERS: &[&str] = &[
    "accessibility_modifier",
    "modifiers",
    "modifier",
    "visibility_modifier",
    "function_modifiers",
    "static_modifier",
    "abstract_modifier",
    "readonly_modifier",
    "final_modifier",
    "override_modifier",
];

/// Kinds that name a single bound identifier.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "shorthand_property_identifier_pattern",
    "property_identifier",
    "private_property_identifier",
    "field_identifier",
    "variable_name",
    "simple_identifier",
    "constant",
    "word",
    "self",
];

/// Fields whose subtree never contains the bound name.
const NON_BINDING_FIELDS: &[&str] = &[
    "type",
    "return_type",
    "value",
    "default_value",
    "right",
    "attributes",
    "decorator",
];

/// All children of a node, named and anonymous, in document order.
pub(crate) fn children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub(crate) fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Children stored under `field`, for fields that repeat (Go names, Python imports).
pub(crate) fn field_children<'t>(node: TsNode<'t>, field: &str) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

pub(crate) fn first_child_of_kind<'t>(node: TsNode<'t>, kinds: &[&str]) -> Option<TsNode<'t>> {
    children(node).into_iter().find(|c| kinds.contains(&c.kind()))
}

/// Returns the first field present on `node` among `fields`.
pub(crate) fn first_field<'t>(node: TsNode<'t>, fields: &[&str]) -> Option<TsNode<'t>> {
    fields.iter().find_map(|f| node.child_by_field_name(f))
}

/// Whether `node` is the literal token `token`, by kind or by text.
pub(crate) fn is_token(ctx: &Context<'_>, node: TsNode<'_>, token: &str) -> bool {
    node.kind() == token
        || (node.end_byte() - node.start_byte() == token.len() && ctx.slice(node) == token)
}

/// Scans direct children (and one level into modifier wrappers) for `token`.
///
/// Ancestors are never consulted.
pub(crate) fn has_token(ctx: &Context<'_>, node: TsNode<'_>, token: &str) -> bool {
    children(node).into_iter().any(|child| {
        if is_token(ctx, child, token) {
            return true;
        }
        MODIFIER_WRAPPERS.contains(&child.kind())
            && children(child).into_iter().any(|c| is_token(ctx, c, token))
    })
}

/// Walks the parent chain looking for an export wrapper.
///
/// With `keyword` set, any ancestor whose direct children include an `export`
/// token also counts.
pub(crate) fn is_exported(ctx: &Context<'_>, node: TsNode<'_>, keyword: bool) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if matches!(ancestor.kind(), "export_statement" | "export_declaration") {
            return true;
        }
        if keyword && children(ancestor).into_iter().any(|c| is_token(ctx, c, "export")) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

/// Strips one optional leading `:` plus the whitespace after it.
pub(crate) fn strip_type_prefix(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.strip_prefix(':') {
        Some(rest) => rest.trim_start().to_string(),
        None => trimmed.to_string(),
    }
}

/// Collapses whitespace runs to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of a declaration's return type, with any `:` prefix removed.
pub(crate) fn return_type(ctx: &Context<'_>, node: TsNode<'_>) -> Option<String> {
    first_field(node, &["return_type", "result", "returns", "type"])
        .map(|n| strip_type_prefix(ctx.slice(n)))
        .filter(|t| !t.is_empty())
}

/// Content of a string literal node.
///
/// Prefers an inner fragment node when the grammar splits quotes from content,
/// otherwise strips quote characters from the full text.
pub(crate) fn string_value(ctx: &Context<'_>, node: TsNode<'_>) -> String {
    let fragment = children(node).into_iter().find(|c| {
        matches!(
            c.kind(),
            "string_fragment" | "string_content" | "interpreted_string_literal_content"
        )
    });
    match fragment {
        Some(f) => ctx.text(f),
        None => ctx
            .slice(node)
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string(),
    }
}

pub(crate) fn is_string_kind(kind: &str) -> bool {
    matches!(
        kind,
        "string" | "string_literal" | "interpreted_string_literal" | "raw_string_literal"
    )
}

/// Names declared by a `type_parameters` (or C# `type_parameter_list`) child.
pub(crate) fn generic_types(ctx: &Context<'_>, node: TsNode<'_>) -> Option<Vec<String>> {
    let params = node
        .child_by_field_name("type_parameters")
        .or_else(|| first_child_of_kind(node, &["type_parameters", "type_parameter_list"]))?;

    let names: Vec<String> = named_children(params)
        .into_iter()
        .filter(|c| c.kind() == "type_parameter" || c.kind() == "type_identifier")
        .map(|c| match c.child_by_field_name("name") {
            Some(name) => ctx.text(name),
            None => named_children(c)
                .into_iter()
                .find(|n| matches!(n.kind(), "type_identifier" | "identifier"))
                .map(|n| ctx.text(n))
                .unwrap_or_else(|| ctx.text(c)),
        })
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

pub(crate) fn is_identifier_kind(kind: &str) -> bool {
    IDENTIFIER_KINDS.contains(&kind)
}

/// Finds the first identifier under `node`, skipping type and value subtrees.
///
/// Uses an explicit stack so pathological nesting cannot overflow.
pub(crate) fn first_identifier<'t>(node: TsNode<'t>) -> Option<TsNode<'t>> {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if is_identifier_kind(current.kind()) {
            return Some(current);
        }
        let mut cursor = current.walk();
        let mut kept = Vec::new();
        if cursor.goto_first_child() {
            loop {
                let skip = cursor
                    .field_name()
                    .is_some_and(|f| NON_BINDING_FIELDS.contains(&f));
                if !skip && cursor.node().is_named() {
                    kept.push(cursor.node());
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        stack.extend(kept.into_iter().rev());
    }
    None
}

/// Text following the first `=` token among `node`'s children.
pub(crate) fn value_after_equals(ctx: &Context<'_>, node: TsNode<'_>) -> Option<String> {
    let kids = children(node);
    let pos = kids.iter().position(|c| !c.is_named() && ctx.slice(*c) == "=")?;
    kids[pos + 1..]
        .iter()
        .find(|c| c.is_named())
        .map(|c| ctx.text(*c))
}
