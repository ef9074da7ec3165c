//! Parse invocation.
//!
//! [`SyntaxParser`] is the seam between the engine and the grammar engine, so
//! callers (and tests) can substitute their own implementation.

use tracing::{debug, error};
use tree_sitter::{Parser, Tree};

use crate::errors::{RepoLensError, Result};
use crate::grammar::Grammar;

/// Number of characters of content kept in a parse error for diagnostics.
pub const PREVIEW_CHARS: usize = 200;

/// Produces a syntax tree for a piece of text.
pub trait SyntaxParser: Send + Sync {
    /// Parses `text` with `grammar`, returning a message on failure.
    fn parse(&self, grammar: Grammar, text: &str) -> std::result::Result<Tree, String>;
}

/// Tree-sitter backed parser. A fresh [`Parser`] is built for every call, so
/// nothing is held between invocations and the type is trivially shareable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterParser;

impl SyntaxParser for TreeSitterParser {
    fn parse(&self, grammar: Grammar, text: &str) -> std::result::Result<Tree, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| format!("failed to load {} grammar: {e}", grammar.name()))?;
        parser
            .parse(text, None)
            .ok_or_else(|| "tree-sitter parse returned None".to_string())
    }
}

/// Runs `parser` over `text` and validates the resulting tree.
///
/// Failures are logged and returned as [`RepoLensError::Parse`] carrying the
/// path and a short content preview.
pub fn parse_tree<P: SyntaxParser + ?Sized>(
    parser: &P,
    grammar: Grammar,
    text: &str,
    path: &str,
) -> Result<Tree> {
    let tree = parser
        .parse(grammar, text)
        .map_err(|message| parse_error(message, text, path))?;

    let root = tree.root_node();
    if root.is_missing() {
        return Err(parse_error("tree has no usable root".to_string(), text, path));
    }
    debug!(path, grammar = grammar.name(), has_error = root.has_error(), "parsed");
    Ok(tree)
}

fn parse_error(message: String, text: &str, path: &str) -> RepoLensError {
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    error!(path, %message, "parse failed");
    RepoLensError::Parse {
        message,
        path: path.to_string(),
        preview,
    }
}
