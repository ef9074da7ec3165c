//! Per-file pipeline: registry lookup, ingestion guard, parse, extraction.

use tracing::debug;

use crate::errors::Result;
use crate::extraction::{self, ExtractOptions};
use crate::grammar;
use crate::ingest::{self, Ingested, SourceContent};
use crate::parse::{parse_tree, SyntaxParser, TreeSitterParser};
use crate::types::ParsedFileResult;

/// Content longer than this many characters is skipped by default.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 30_000;

/// Tunables for [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Size cap in characters; longer content yields an empty result.
    pub max_content_chars: usize,
    /// Attach leading comments to extracted constructs.
    pub extract_comments: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            extract_comments: true,
        }
    }
}

/// Single-file normalization engine.
///
/// Holds no per-file state, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Engine<P = TreeSitterParser> {
    parser: P,
    options: EngineOptions,
}

impl Engine<TreeSitterParser> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            parser: TreeSitterParser,
            options,
        }
    }
}

impl<P: SyntaxParser> Engine<P> {
    /// Builds an engine around a custom parser implementation.
    pub fn with_parser(parser: P, options: EngineOptions) -> Self {
        Self { parser, options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parses one file.
    ///
    /// Returns `Ok(None)` when `extension` has no registered grammar, an
    /// all-empty result for empty or oversize content (the parser is never
    /// invoked for those), and an error for undecodable content or a parser
    /// failure.
    pub fn parse_file<'a>(
        &self,
        content: impl Into<SourceContent<'a>>,
        extension: &str,
        path: &str,
    ) -> Result<Option<ParsedFileResult>> {
        let Some(grammar) = grammar::resolve(extension) else {
            debug!(path, extension, "unsupported extension");
            return Ok(None);
        };

        let text = match ingest::validate(content.into(), path, self.options.max_content_chars)? {
            Ingested::Ready(text) => text,
            Ingested::Empty | Ingested::Oversize { .. } => {
                return Ok(Some(ParsedFileResult::default()));
            }
        };

        let tree = parse_tree(&self.parser, grammar, &text, path)?;
        let result = extraction::extract(
            &tree,
            &text,
            grammar,
            path,
            ExtractOptions {
                extract_comments: self.options.extract_comments,
            },
        );
        debug!(
            path,
            grammar = grammar.name(),
            functions = result.functions.len(),
            classes = result.classes.len(),
            imports = result.imports.len(),
            "extracted"
        );
        Ok(Some(result))
    }
}

/// Parses one file with a default engine.
pub fn parse_file<'a>(
    content: impl Into<SourceContent<'a>>,
    extension: &str,
    path: &str,
) -> Result<Option<ParsedFileResult>> {
    Engine::new().parse_file(content, extension, path)
}
