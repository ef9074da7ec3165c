//! Import extraction for static declarations and dynamic `import()` calls.

use tree_sitter::Node as TsNode;
use tracing::debug;

use super::helpers::{children, field_children, is_string_kind, is_token, named_children, string_value};
use super::Context;
use crate::grammar::GrammarFamily;
use crate::types::{ImportInfo, ImportKind, ImportedItem};

/// Extracts the imports declared by a static import node.
///
/// Most forms produce one entry; Python `import a, b` and Go import blocks
/// produce one per imported module.
pub(crate) fn extract_static(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<ImportInfo> {
    match ctx.grammar.family() {
        GrammarFamily::Ecma => ecma_import(ctx, node).into_iter().collect(),
        GrammarFamily::Python => python_import(ctx, node),
        GrammarFamily::Go => go_imports(ctx, node),
        GrammarFamily::Java => java_import(ctx, node).into_iter().collect(),
        _ => Vec::new(),
    }
}

// ----------------------------------------------------------------------------
// ECMAScript
// ----------------------------------------------------------------------------

fn ecma_import(ctx: &Context<'_>, node: TsNode<'_>) -> Option<ImportInfo> {
    let mut source = String::new();
    let mut imports = Vec::new();
    let mut kind = ImportKind::Named;

    // `import type { A } from "m"` puts `type` on the statement itself.
    let is_type_only = children(node)
        .into_iter()
        .any(|c| !c.is_named() && is_token(ctx, c, "type"));

    for child in children(node) {
        match child.kind() {
            k if is_string_kind(k) => source = string_value(ctx, child),
            "import_clause" => {
                for clause in named_children(child) {
                    match clause.kind() {
                        "identifier" => {
                            kind = ImportKind::Default;
                            imports.push(item(ctx.text(clause), None, is_type_only));
                        }
                        "namespace_import" => {
                            kind = ImportKind::Namespace;
                            if let Some(id) = named_children(clause)
                                .into_iter()
                                .find(|c| c.kind() == "identifier")
                            {
                                imports.push(item(ctx.text(id), None, is_type_only));
                            }
                        }
                        "named_imports" => {
                            kind = ImportKind::Named;
                            for spec in named_children(clause) {
                                if spec.kind() != "import_specifier" {
                                    continue;
                                }
                                let Some(name) = spec.child_by_field_name("name") else {
                                    continue;
                                };
                                let spec_type = children(spec)
                                    .into_iter()
                                    .any(|c| !c.is_named() && is_token(ctx, c, "type"));
                                imports.push(item(
                                    ctx.text(name),
                                    spec.child_by_field_name("alias").map(|a| ctx.text(a)),
                                    is_type_only || spec_type,
                                ));
                            }
                        }
                        _ => {}
                    }
                }
            }
            // `import fs = require("fs")`
            "import_require_clause" => {
                kind = ImportKind::Default;
                if let Some(id) = named_children(child)
                    .into_iter()
                    .find(|c| c.kind() == "identifier")
                {
                    imports.push(item(ctx.text(id), None, is_type_only));
                }
                if let Some(src) = child.child_by_field_name("source").or_else(|| {
                    named_children(child)
                        .into_iter()
                        .find(|c| is_string_kind(c.kind()))
                }) {
                    source = string_value(ctx, src);
                }
            }
            _ => {}
        }
    }

    if imports.is_empty() && !source.is_empty() {
        kind = ImportKind::SideEffect;
    }

    Some(ImportInfo {
        source,
        imports,
        kind,
        is_type_only,
    })
}

/// Recognizes `import("m")`. Other calls yield nothing.
///
/// An enclosing `await` needs no special handling: the walker reaches the
/// inner call on its own.
pub(crate) fn extract_dynamic(ctx: &Context<'_>, call: TsNode<'_>) -> Option<ImportInfo> {
    let callee = call.child_by_field_name("function")?;
    if ctx.slice(callee) != "import" {
        return None;
    }

    let source = call
        .child_by_field_name("arguments")
        .and_then(|args| {
            named_children(args)
                .into_iter()
                .find(|a| is_string_kind(a.kind()))
        })
        .map(|s| string_value(ctx, s))
        .unwrap_or_default();
    if source.is_empty() {
        debug!(path = ctx.file_path, "dynamic import with non-literal specifier");
    }

    Some(ImportInfo {
        source,
        imports: Vec::new(),
        kind: ImportKind::Dynamic,
        is_type_only: false,
    })
}

fn item(name: String, alias: Option<String>, is_type: bool) -> ImportedItem {
    ImportedItem {
        name,
        alias,
        is_type,
    }
}

// ----------------------------------------------------------------------------
// Python
// ----------------------------------------------------------------------------

fn python_import(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<ImportInfo> {
    // `name` repeats; each entry is a dotted_name or aliased_import.
    let names: Vec<(String, Option<String>)> = field_children(node, "name")
        .into_iter()
        .map(|n| match n.kind() {
            "aliased_import" => (
                n.child_by_field_name("name")
                    .map(|x| ctx.text(x))
                    .unwrap_or_default(),
                n.child_by_field_name("alias").map(|a| ctx.text(a)),
            ),
            _ => (ctx.text(n), None),
        })
        .collect();

    if node.kind() == "import_statement" {
        // `import a.b as c`: every module is its own namespace import.
        return names
            .into_iter()
            .map(|(name, alias)| ImportInfo {
                source: name.clone(),
                imports: vec![item(name, alias, false)],
                kind: ImportKind::Namespace,
                is_type_only: false,
            })
            .collect();
    }

    let source = node
        .child_by_field_name("module_name")
        .map(|m| ctx.text(m))
        .unwrap_or_default();

    if children(node).iter().any(|c| c.kind() == "wildcard_import") {
        return vec![ImportInfo {
            source,
            imports: vec![item("*".to_string(), None, false)],
            kind: ImportKind::Namespace,
            is_type_only: false,
        }];
    }

    let imports: Vec<ImportedItem> = names
        .into_iter()
        .map(|(name, alias)| item(name, alias, false))
        .collect();
    let kind = if imports.is_empty() {
        ImportKind::SideEffect
    } else {
        ImportKind::Named
    };
    vec![ImportInfo {
        source,
        imports,
        kind,
        is_type_only: false,
    }]
}

// ----------------------------------------------------------------------------
// Go
// ----------------------------------------------------------------------------

fn go_imports(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<ImportInfo> {
    let mut specs = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_spec_list" => specs.extend(
                named_children(child)
                    .into_iter()
                    .filter(|c| c.kind() == "import_spec"),
            ),
            _ => {}
        }
    }

    specs
        .into_iter()
        .map(|spec| {
            let source = spec
                .child_by_field_name("path")
                .map(|p| string_value(ctx, p))
                .unwrap_or_default();
            let package = source.rsplit('/').next().unwrap_or("").to_string();
            let alias = spec.child_by_field_name("name").map(|n| ctx.text(n));

            let (kind, imports) = match alias.as_deref() {
                Some("_") => (ImportKind::SideEffect, Vec::new()),
                Some(".") => (ImportKind::Namespace, vec![item("*".to_string(), None, false)]),
                _ => (ImportKind::Namespace, vec![item(package, alias, false)]),
            };
            ImportInfo {
                source,
                imports,
                kind,
                is_type_only: false,
            }
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Java
// ----------------------------------------------------------------------------

fn java_import(ctx: &Context<'_>, node: TsNode<'_>) -> Option<ImportInfo> {
    let path = named_children(node)
        .into_iter()
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .map(|p| ctx.text(p))?;

    if children(node).iter().any(|c| c.kind() == "asterisk") {
        return Some(ImportInfo {
            source: path,
            imports: vec![item("*".to_string(), None, false)],
            kind: ImportKind::Namespace,
            is_type_only: false,
        });
    }

    // `a.b.C` imports `C` from `a.b`.
    let (source, name) = match path.rsplit_once('.') {
        Some((pkg, name)) => (pkg.to_string(), name.to_string()),
        None => (String::new(), path),
    };
    Some(ImportInfo {
        source,
        imports: vec![item(name, None, false)],
        kind: ImportKind::Named,
        is_type_only: false,
    })
}
