//! Finds candidate source files under a project root.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::batch::SourceInput;
use crate::config::{should_include_file, RepoLensConfig};
use crate::errors::{RepoLensError, Result};
use crate::grammar;

/// Walks `root` and loads every file that passes the configuration filters.
///
/// Excluded directories are pruned without descending. Files must match the
/// include globs, fit within `max_file_size`, and have a registered grammar.
/// Results are sorted by their `/`-separated relative path.
pub fn discover(root: &Path, config: &RepoLensConfig) -> Result<Vec<SourceInput>> {
    if !root.is_dir() {
        return Err(RepoLensError::File {
            message: "project root is not a directory".to_string(),
            path: root.display().to_string(),
        });
    }

    let mut inputs = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        // Probe with a child path so `dir/**` excludes prune the directory.
        let probe = format!("{}/_", relative(root, e.path()));
        !config
            .exclude
            .iter()
            .any(|p| glob::Pattern::new(p).is_ok_and(|pat| pat.matches(&probe)))
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative(root, entry.path());
        if !should_include_file(&rel, config) || grammar::for_path(entry.path()).is_none() {
            continue;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(u64::MAX);
        if size > config.max_file_size {
            debug!(path = %rel, size, "file exceeds max_file_size");
            continue;
        }

        let content = fs::read(entry.path()).map_err(|e| RepoLensError::File {
            message: format!("failed to read file: {e}"),
            path: rel.clone(),
        })?;
        inputs.push(SourceInput::new(rel, content));
    }

    inputs.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!(count = inputs.len(), root = %root.display(), "discovered files");
    Ok(inputs)
}

fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
