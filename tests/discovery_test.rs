use std::fs;
use std::path::Path;

use repolens::batch::{BatchOptions, BatchParser, BatchReport, FileFailure, SourceInput};
use repolens::config::RepoLensConfig;
use repolens::discovery::discover;
use repolens::summary::{content_hash, line_count, ProjectSummary, PARSER_VERSION};
use repolens::{Engine, RepoLensError};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/main.ts", "import { util } from './util';\nexport function main() {}\n");
    write(root, "src/util.ts", "export const util = 1;\n");
    write(root, "scripts/build.py", "def build():\n    pass\n");
    write(root, "README.md", "# sample\n");
    write(root, "node_modules/left-pad/index.js", "module.exports = function () {};\n");
    write(root, "dist/bundle.min.js", "function x(){}\n");
    dir
}

fn paths(inputs: &[SourceInput]) -> Vec<&str> {
    inputs.iter().map(|i| i.relative_path.as_str()).collect()
}

#[test]
fn test_discover_filters_and_sorts() {
    let dir = sample_project();
    let inputs = discover(dir.path(), &RepoLensConfig::default()).unwrap();
    assert_eq!(paths(&inputs), ["scripts/build.py", "src/main.ts", "src/util.ts"]);
    assert_eq!(inputs[1].extension, "ts");
    assert_eq!(inputs[2].content, b"export const util = 1;\n");
}

#[test]
fn test_discover_respects_max_file_size() {
    let dir = sample_project();
    write(dir.path(), "src/huge.js", &"x".repeat(4096));
    let config = RepoLensConfig {
        max_file_size: 1024,
        ..RepoLensConfig::default()
    };
    let inputs = discover(dir.path(), &config).unwrap();
    assert!(!paths(&inputs).contains(&"src/huge.js"));
    assert!(paths(&inputs).contains(&"src/main.ts"));
}

#[test]
fn test_discover_custom_include_and_exclude() {
    let dir = sample_project();
    let config = RepoLensConfig {
        include: vec!["src/**/*.ts".to_string()],
        exclude: vec!["**/util.ts".to_string()],
        ..RepoLensConfig::default()
    };
    let inputs = discover(dir.path(), &config).unwrap();
    assert_eq!(paths(&inputs), ["src/main.ts"]);
}

#[test]
fn test_discover_rejects_missing_root() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    match discover(&missing, &RepoLensConfig::default()) {
        Err(RepoLensError::File { .. }) => {}
        other => panic!("expected file error, got {other:?}"),
    }
}

#[test]
fn test_content_hash_and_line_count() {
    assert_eq!(
        content_hash(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(content_hash(b"abc").len(), 64);
    assert_ne!(content_hash(b"abc"), content_hash(b"abd"));

    assert_eq!(line_count(b""), 1);
    assert_eq!(line_count(b"one"), 1);
    assert_eq!(line_count(b"one\ntwo\n"), 3);
}

#[test]
fn test_project_summary_aggregates_report() {
    let dir = sample_project();
    let inputs = discover(dir.path(), &RepoLensConfig::default()).unwrap();
    let mut report = BatchParser::new(Engine::new(), BatchOptions::default())
        .run(inputs)
        .unwrap();
    report.failures.push(FileFailure {
        path: "src/bad.ts".to_string(),
        message: "boom".to_string(),
    });

    let summary = ProjectSummary::from_report("sample", "/tmp/sample", report);
    let meta = &summary.metadata;
    assert_eq!(meta.project_name, "sample");
    assert_eq!(meta.root_directory, "/tmp/sample");
    assert_eq!(meta.parser_version, PARSER_VERSION);
    assert_eq!(meta.total_files, 3);
    assert_eq!(meta.total_functions, 2);
    assert_eq!(meta.total_classes, 0);
    assert!(meta.timestamp > 0);

    let langs: Vec<_> = meta
        .languages
        .iter()
        .map(|l| (l.language.as_str(), l.file_count, l.line_count))
        .collect();
    assert_eq!(langs, [("python", 1, 3), ("typescript", 2, 5)]);
    assert_eq!(summary.failures.len(), 1);

    let main = &summary.files[1];
    assert_eq!(main.relative_path, "src/main.ts");
    assert_eq!(main.result.imports[0].source, "./util");
}

#[test]
fn test_summary_json_flattens_file_results() {
    let report = BatchReport {
        files: BatchParser::new(Engine::new(), BatchOptions::default())
            .run(vec![SourceInput::new("a.ts", "type Id = string;")])
            .unwrap()
            .files,
        ..BatchReport::default()
    };
    let summary = ProjectSummary::from_report("p", ".", report);
    let json = serde_json::to_value(&summary).unwrap();

    let file = &json["files"][0];
    assert_eq!(file["relativePath"], "a.ts");
    assert_eq!(file["language"], "typescript");
    assert_eq!(file["lineCount"], 1);
    assert_eq!(file["types"][0]["name"], "Id");
    assert_eq!(json["metadata"]["totalFiles"], 1);
}
