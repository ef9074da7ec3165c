//! Tree walker and construct extractors.
//!
//! [`extract`] walks a parsed tree in document order with an explicit work
//! stack, classifies every node against the grammar family's dispatch table and
//! hands matches to the extractor for that construct. Children of matched
//! nodes are always visited, so nested constructs are reported in the same flat
//! lists as top-level ones.

mod classes;
mod comments;
mod exports;
mod functions;
mod helpers;
mod imports;
mod interfaces;
mod variables;

use tree_sitter::{Node as TsNode, Tree};

use crate::grammar::{Grammar, GrammarFamily};
use crate::types::{ParsedFileResult, Position, SourceLocation};

pub use comments::parse_comment;

/// Knobs for a single extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Attach leading comments to functions, classes and methods.
    pub extract_comments: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extract_comments: true,
        }
    }
}

/// A construct the walker knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Import,
    DynamicImport,
    Export,
    Function,
    Class,
    Variable,
    Interface,
    TypeAlias,
}

impl Construct {
    /// Classifies a node kind for the given grammar.
    ///
    /// Kinds outside the family's table return `None`: the walker descends into
    /// them without extracting anything.
    pub fn classify(grammar: Grammar, kind: &str) -> Option<Construct> {
        use Construct::*;
        match grammar.family() {
            GrammarFamily::Ecma => match kind {
                "import_statement" => Some(Import),
                "call_expression" => Some(DynamicImport),
                "export_statement" | "export_declaration" => Some(Export),
                "function_declaration"
                | "generator_function_declaration"
                | "function_definition" => Some(Function),
                "class_declaration" | "abstract_class_declaration" => Some(Class),
                "variable_declaration" | "lexical_declaration" => Some(Variable),
                "interface_declaration" => Some(Interface),
                "type_alias_declaration" => Some(TypeAlias),
                _ => None,
            },
            GrammarFamily::Python => match kind {
                "import_statement" | "import_from_statement" => Some(Import),
                "function_definition" => Some(Function),
                "class_definition" => Some(Class),
                _ => None,
            },
            GrammarFamily::Java => match kind {
                "import_declaration" => Some(Import),
                "class_declaration" => Some(Class),
                "interface_declaration" => Some(Interface),
                _ => None,
            },
            GrammarFamily::Go => match kind {
                "import_declaration" => Some(Import),
                "function_declaration" | "method_declaration" => Some(Function),
                _ => None,
            },
            GrammarFamily::CFamily => match kind {
                "function_definition" => Some(Function),
                _ => None,
            },
            GrammarFamily::CSharp => match kind {
                "class_declaration" => Some(Class),
                "interface_declaration" => Some(Interface),
                _ => None,
            },
            GrammarFamily::Php => match kind {
                "function_definition" => Some(Function),
                "class_declaration" => Some(Class),
                "interface_declaration" => Some(Interface),
                _ => None,
            },
            GrammarFamily::Rust => match kind {
                "function_item" => Some(Function),
                "type_item" => Some(TypeAlias),
                _ => None,
            },
            GrammarFamily::Ruby => match kind {
                "method" | "singleton_method" => Some(Function),
                "class" => Some(Class),
                _ => None,
            },
            GrammarFamily::Bash => match kind {
                "function_definition" => Some(Function),
                _ => None,
            },
            GrammarFamily::Markup => None,
        }
    }
}

/// Read-only state shared by every extractor during one pass.
pub(crate) struct Context<'a> {
    pub source: &'a [u8],
    pub grammar: Grammar,
    pub file_path: &'a str,
    pub options: ExtractOptions,
}

impl<'a> Context<'a> {
    /// Gets the text of a tree-sitter node from the source.
    pub fn text(&self, node: TsNode<'_>) -> String {
        self.slice(node).to_string()
    }

    /// Borrowed text of a node; empty when the span is not valid UTF-8.
    pub fn slice(&self, node: TsNode<'_>) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    pub fn location(&self, node: TsNode<'_>) -> SourceLocation {
        let start = node.start_position();
        let end = node.end_position();
        SourceLocation {
            start: Position {
                line: start.row as u32 + 1,
                column: start.column as u32,
            },
            end: Position {
                line: end.row as u32 + 1,
                column: end.column as u32,
            },
            file_path: self.file_path.to_string(),
        }
    }
}

/// Extracts every recognized construct from `tree`.
///
/// `source` must be the exact text the tree was parsed from.
pub fn extract(
    tree: &Tree,
    source: &str,
    grammar: Grammar,
    file_path: &str,
    options: ExtractOptions,
) -> ParsedFileResult {
    let ctx = Context {
        source: source.as_bytes(),
        grammar,
        file_path,
        options,
    };
    let mut result = ParsedFileResult::default();

    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        // Keyword tokens can share a kind with a construct (Ruby `class`).
        if node.is_named() {
            if let Some(construct) = Construct::classify(grammar, node.kind()) {
                visit(&ctx, construct, node, &mut result);
            }
        }

        // Reverse so the leftmost child is popped first.
        let mut cursor = node.walk();
        let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    result
}

fn visit(ctx: &Context<'_>, construct: Construct, node: TsNode<'_>, out: &mut ParsedFileResult) {
    match construct {
        Construct::Import => out.imports.extend(imports::extract_static(ctx, node)),
        Construct::DynamicImport => out.imports.extend(imports::extract_dynamic(ctx, node)),
        Construct::Export => out.exports.extend(exports::extract(ctx, node)),
        Construct::Function => out.functions.extend(functions::extract(ctx, node)),
        Construct::Class => out.classes.extend(classes::extract(ctx, node)),
        Construct::Variable => out.variables.extend(variables::extract(ctx, node)),
        Construct::Interface => out.interfaces.extend(interfaces::extract(ctx, node)),
        Construct::TypeAlias => out.type_aliases.extend(interfaces::extract_type_alias(ctx, node)),
    }
}
