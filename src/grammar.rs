//! Grammar registry.
//!
//! Maps file-extension tokens to tree-sitter grammars through a fixed table.
//! Lookups are pure; an unmapped extension resolves to `None`.

use std::path::Path;

use tree_sitter::Language;

/// A grammar the engine knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grammar {
    JavaScript,
    TypeScript,
    Tsx,
    Python,
    Java,
    Go,
    Rust,
    Php,
    Ruby,
    Html,
    Json,
    C,
    Cpp,
    CSharp,
    Css,
    Bash,
    Yaml,
}

/// Groups of grammars that share a node taxonomy, and therefore a dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarFamily {
    Ecma,
    Python,
    Java,
    Go,
    CFamily,
    CSharp,
    Php,
    Rust,
    Ruby,
    Bash,
    /// Parsed for validity only; nothing is extracted.
    Markup,
}

/// Extension token to grammar. Every extension appears exactly once.
const EXTENSIONS: &[(&str, Grammar)] = &[
    ("js", Grammar::JavaScript),
    ("jsx", Grammar::JavaScript),
    ("ts", Grammar::TypeScript),
    ("tsx", Grammar::Tsx),
    ("py", Grammar::Python),
    ("java", Grammar::Java),
    ("go", Grammar::Go),
    ("rs", Grammar::Rust),
    ("php", Grammar::Php),
    ("rb", Grammar::Ruby),
    ("html", Grammar::Html),
    ("json", Grammar::Json),
    ("c", Grammar::C),
    ("cpp", Grammar::Cpp),
    ("cc", Grammar::Cpp),
    ("cxx", Grammar::Cpp),
    ("h", Grammar::Cpp),
    ("hpp", Grammar::Cpp),
    ("cs", Grammar::CSharp),
    ("css", Grammar::Css),
    ("sh", Grammar::Bash),
    ("bash", Grammar::Bash),
    ("yml", Grammar::Yaml),
    ("yaml", Grammar::Yaml),
];

impl Grammar {
    /// Returns the compiled tree-sitter language for this grammar.
    pub fn language(&self) -> Language {
        match self {
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::Python => tree_sitter_python::LANGUAGE.into(),
            Grammar::Java => tree_sitter_java::LANGUAGE.into(),
            Grammar::Go => tree_sitter_go::LANGUAGE.into(),
            Grammar::Rust => tree_sitter_rust::LANGUAGE.into(),
            Grammar::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Grammar::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Grammar::Html => tree_sitter_html::LANGUAGE.into(),
            Grammar::Json => tree_sitter_json::LANGUAGE.into(),
            Grammar::C => tree_sitter_c::LANGUAGE.into(),
            Grammar::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Grammar::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Grammar::Css => tree_sitter_css::LANGUAGE.into(),
            Grammar::Bash => tree_sitter_bash::LANGUAGE.into(),
            Grammar::Yaml => tree_sitter_yaml::LANGUAGE.into(),
        }
    }

    /// Stable identifier of the grammar itself (`tsx` is distinct from `typescript`).
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::JavaScript => "javascript",
            Grammar::TypeScript => "typescript",
            Grammar::Tsx => "tsx",
            Grammar::Python => "python",
            Grammar::Java => "java",
            Grammar::Go => "go",
            Grammar::Rust => "rust",
            Grammar::Php => "php",
            Grammar::Ruby => "ruby",
            Grammar::Html => "html",
            Grammar::Json => "json",
            Grammar::C => "c",
            Grammar::Cpp => "cpp",
            Grammar::CSharp => "csharp",
            Grammar::Css => "css",
            Grammar::Bash => "bash",
            Grammar::Yaml => "yaml",
        }
    }

    /// Language name used in reports. TSX files report as TypeScript.
    pub fn language_name(&self) -> &'static str {
        match self {
            Grammar::Tsx => "typescript",
            other => other.name(),
        }
    }

    pub fn family(&self) -> GrammarFamily {
        match self {
            Grammar::JavaScript | Grammar::TypeScript | Grammar::Tsx => GrammarFamily::Ecma,
            Grammar::Python => GrammarFamily::Python,
            Grammar::Java => GrammarFamily::Java,
            Grammar::Go => GrammarFamily::Go,
            Grammar::C | Grammar::Cpp => GrammarFamily::CFamily,
            Grammar::CSharp => GrammarFamily::CSharp,
            Grammar::Php => GrammarFamily::Php,
            Grammar::Rust => GrammarFamily::Rust,
            Grammar::Ruby => GrammarFamily::Ruby,
            Grammar::Bash => GrammarFamily::Bash,
            Grammar::Html | Grammar::Json | Grammar::Css | Grammar::Yaml => GrammarFamily::Markup,
        }
    }

    /// Whether the grammar carries TypeScript-only syntax (type annotations, interfaces).
    pub fn is_typescript(&self) -> bool {
        matches!(self, Grammar::TypeScript | Grammar::Tsx)
    }
}

/// Resolves an extension token (with or without a leading `.`) to a grammar.
///
/// Matching is exact and case-sensitive; unknown extensions return `None`.
pub fn resolve(extension: &str) -> Option<Grammar> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    EXTENSIONS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, grammar)| *grammar)
}

/// Resolves the grammar for a path from its final extension.
pub fn for_path(path: &Path) -> Option<Grammar> {
    path.extension().and_then(|e| e.to_str()).and_then(resolve)
}

/// All registered extensions, without leading dots, in table order.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    EXTENSIONS.iter().map(|(ext, _)| *ext)
}
