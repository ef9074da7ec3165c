//! Parallel parsing of many files with per-file failure isolation.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::Engine;
use crate::errors::{RepoLensError, Result};
use crate::grammar;
use crate::parse::{SyntaxParser, TreeSitterParser};
use crate::summary::ParsedFile;

/// A candidate file as handed over by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub content: Vec<u8>,
    pub extension: String,
    pub relative_path: String,
}

impl SourceInput {
    /// Builds an input, taking the extension from the path.
    pub fn new(relative_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let relative_path = relative_path.into();
        let extension = std::path::Path::new(&relative_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            content: content.into(),
            extension,
            relative_path,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Worker threads; 0 lets rayon pick one per CPU.
    pub workers: usize,
    /// Abort on the first failure (in input order) instead of recording it.
    pub fail_fast: bool,
}

/// A file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

/// Outcome of a batch run. Every list preserves input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<ParsedFile>,
    /// Paths whose extension has no registered grammar.
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
}

enum Outcome {
    Parsed(ParsedFile),
    Skipped(String),
    Failed(String, RepoLensError),
}

/// Runs an [`Engine`] over many inputs on a dedicated thread pool.
pub struct BatchParser<P = TreeSitterParser> {
    engine: Engine<P>,
    options: BatchOptions,
}

impl<P: SyntaxParser> BatchParser<P> {
    pub fn new(engine: Engine<P>, options: BatchOptions) -> Self {
        Self { engine, options }
    }

    /// Parses every input. With `fail_fast` the first failure is returned as
    /// the error; otherwise failures are collected alongside the parsed files.
    pub fn run(&self, inputs: Vec<SourceInput>) -> Result<BatchReport> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .build()
            .map_err(|e| RepoLensError::Config {
                message: format!("failed to build worker pool: {e}"),
            })?;

        let total = inputs.len();
        let outcomes: Vec<Outcome> =
            pool.install(|| inputs.into_par_iter().map(|input| self.parse_one(input)).collect());

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Parsed(file) => report.files.push(file),
                Outcome::Skipped(path) => report.skipped.push(path),
                Outcome::Failed(path, err) => {
                    if self.options.fail_fast {
                        return Err(err);
                    }
                    warn!(path = %path, error = %err, "file failed, continuing");
                    report.failures.push(FileFailure {
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            total,
            parsed = report.files.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "batch complete"
        );
        Ok(report)
    }

    fn parse_one(&self, input: SourceInput) -> Outcome {
        let SourceInput {
            content,
            extension,
            relative_path,
        } = input;
        match self
            .engine
            .parse_file(&content, &extension, &relative_path)
        {
            Ok(Some(result)) => match grammar::resolve(&extension) {
                Some(g) => Outcome::Parsed(ParsedFile::new(&relative_path, g, &content, result)),
                None => Outcome::Skipped(relative_path),
            },
            Ok(None) => Outcome::Skipped(relative_path),
            Err(err) => Outcome::Failed(relative_path, err),
        }
    }
}
