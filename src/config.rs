use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_MAX_CONTENT_CHARS;
use crate::errors::{RepoLensError, Result};
use crate::grammar;

/// Name of the configuration file stored inside the `.repolens` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory holding project settings.
pub const REPOLENS_DIR: &str = ".repolens";

/// Paths skipped by default: dependencies, VCS metadata, build output,
/// editor state, lock files and binary assets.
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/.svn/**",
    "**/.hg/**",
    "**/.repolens/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/target/**",
    "**/coverage/**",
    "**/.next/**",
    "**/.nuxt/**",
    "**/.cache/**",
    "**/__pycache__/**",
    "**/.pytest_cache/**",
    "**/venv/**",
    "**/.venv/**",
    "**/vendor/**",
    "**/.idea/**",
    "**/.vscode/**",
    "**/*.min.js",
    "**/*.min.css",
    "**/*.map",
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/Cargo.lock",
    "**/.env",
    "**/.env.*",
    "**/.DS_Store",
    "**/*.log",
    "**/*.{png,jpg,jpeg,gif,svg,ico,webp}",
    "**/*.{mp4,mp3,wav,pdf,zip,tar,gz,rar,7z}",
    "**/*.{exe,dll,so,dylib,bin,class,jar,pyc,o}",
];

/// Settings for scanning a project.
///
/// Controls which files are considered, size limits, and batch behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoLensConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Root directory of the project being scanned.
    pub root_dir: String,
    /// Glob patterns for files to include.
    pub include: Vec<String>,
    /// Glob patterns for files to exclude. Exclusion wins over inclusion.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes; larger files are never read.
    pub max_file_size: u64,
    /// Character cap applied to content before parsing.
    pub max_content_chars: usize,
    /// Batch worker threads; 0 means one per CPU.
    pub workers: usize,
    /// Stop the batch on the first failed file.
    pub fail_fast: bool,
    /// Attach leading comments to functions, classes and methods.
    pub extract_comments: bool,
}

impl Default for RepoLensConfig {
    fn default() -> Self {
        Self {
            version: 1,
            root_dir: String::new(),
            include: grammar::supported_extensions()
                .map(|ext| format!("**/*.{ext}"))
                .collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            max_file_size: 1_048_576,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            workers: 0,
            fail_fast: false,
            extract_comments: true,
        }
    }
}

/// Returns the path to the `.repolens` directory within the given project root.
pub fn get_repolens_dir(project_root: &Path) -> PathBuf {
    project_root.join(REPOLENS_DIR)
}

/// Returns the path to `config.json` within the `.repolens` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_repolens_dir(project_root).join(CONFIG_FILENAME)
}

/// Loads the configuration from disk.
///
/// If no configuration file exists, returns the defaults with `root_dir` set
/// to the given project root. Missing keys in an existing file take their
/// default values.
pub fn load_config(project_root: &Path) -> Result<RepoLensConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        return Ok(RepoLensConfig {
            root_dir: project_root.to_string_lossy().to_string(),
            ..RepoLensConfig::default()
        });
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| RepoLensError::Config {
        message: format!("failed to read config file '{}': {}", config_path.display(), e),
    })?;

    serde_json::from_str(&contents).map_err(|e| RepoLensError::Config {
        message: format!("failed to parse config file '{}': {}", config_path.display(), e),
    })
}

/// Saves the configuration, writing a temporary file and renaming it into place.
pub fn save_config(project_root: &Path, config: &RepoLensConfig) -> Result<()> {
    let dir = get_repolens_dir(project_root);
    fs::create_dir_all(&dir).map_err(|e| RepoLensError::Config {
        message: format!("failed to create directory '{}': {}", dir.display(), e),
    })?;

    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| RepoLensError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| RepoLensError::Config {
        message: format!("failed to write '{}': {}", tmp_path.display(), e),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| RepoLensError::Config {
        message: format!(
            "failed to move '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })
}

/// Whether `file_path` (relative, `/`-separated) passes the include and
/// exclude globs. Exclude patterns take precedence.
///
/// Brace alternatives such as `*.{png,jpg}` are expanded before matching.
pub fn should_include_file(file_path: &str, config: &RepoLensConfig) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    let matches = |patterns: &[String]| {
        patterns.iter().flat_map(|p| expand_braces(p)).any(|p| {
            Pattern::new(&p).is_ok_and(|pattern| pattern.matches_with(file_path, match_opts))
        })
    };

    if matches(&config.exclude) {
        return false;
    }
    matches(&config.include)
}

/// Expands the first `{a,b}` group in a pattern, recursively.
fn expand_braces(pattern: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (pattern.find('{'), pattern.find('}')) else {
        return vec![pattern.to_string()];
    };
    if close < open {
        return vec![pattern.to_string()];
    }
    let (head, tail) = (&pattern[..open], &pattern[close + 1..]);
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{head}{alt}{tail}")))
        .collect()
}
