//! Per-file records and the project-level summary built from a batch run.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::batch::{BatchReport, FileFailure};
use crate::grammar::Grammar;
use crate::types::ParsedFileResult;

/// Version string recorded in every summary.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes the SHA-256 hex digest of raw file content.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Number of lines: newline count plus one, so empty content has one line.
pub fn line_count(text: &[u8]) -> usize {
    text.iter().filter(|b| **b == b'\n').count() + 1
}

/// One successfully parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub relative_path: String,
    pub language: String,
    pub line_count: usize,
    pub content_hash: String,
    #[serde(flatten)]
    pub result: ParsedFileResult,
}

impl ParsedFile {
    pub fn new(relative_path: &str, grammar: Grammar, content: &[u8], result: ParsedFileResult) -> Self {
        Self {
            relative_path: relative_path.to_string(),
            language: grammar.language_name().to_string(),
            line_count: line_count(content),
            content_hash: content_hash(content),
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    pub language: String,
    pub file_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    /// Seconds since the UNIX epoch.
    pub timestamp: u64,
    pub parser_version: String,
    pub project_name: String,
    pub root_directory: String,
    pub total_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub languages: Vec<LanguageStats>,
}

/// Everything produced by scanning one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub metadata: SummaryMetadata,
    pub files: Vec<ParsedFile>,
    pub failures: Vec<FileFailure>,
    pub skipped: Vec<String>,
}

impl ProjectSummary {
    /// Aggregates a batch report. Language stats are sorted by language name.
    pub fn from_report(project_name: &str, root_directory: &str, report: BatchReport) -> Self {
        let mut by_language: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for file in &report.files {
            let entry = by_language.entry(file.language.as_str()).or_default();
            entry.0 += 1;
            entry.1 += file.line_count;
        }
        let languages = by_language
            .into_iter()
            .map(|(language, (file_count, line_count))| LanguageStats {
                language: language.to_string(),
                file_count,
                line_count,
            })
            .collect();

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let metadata = SummaryMetadata {
            timestamp,
            parser_version: PARSER_VERSION.to_string(),
            project_name: project_name.to_string(),
            root_directory: root_directory.to_string(),
            total_files: report.files.len(),
            total_functions: report.files.iter().map(|f| f.result.functions.len()).sum(),
            total_classes: report.files.iter().map(|f| f.result.classes.len()).sum(),
            languages,
        };

        Self {
            metadata,
            files: report.files,
            failures: report.failures,
            skipped: report.skipped,
        }
    }
}
