use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use repolens::batch::{BatchOptions, BatchParser, SourceInput};
use repolens::grammar::Grammar;
use repolens::parse::{SyntaxParser, TreeSitterParser};
use repolens::{Engine, EngineOptions, RepoLensError};

/// Fails for any content containing `BOOM`, delegates otherwise.
#[derive(Clone, Default)]
struct SelectiveParser {
    calls: Arc<AtomicUsize>,
}

impl SyntaxParser for SelectiveParser {
    fn parse(&self, grammar: Grammar, text: &str) -> Result<tree_sitter::Tree, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("BOOM") {
            return Err("refusing to parse".to_string());
        }
        TreeSitterParser.parse(grammar, text)
    }
}

fn inputs() -> Vec<SourceInput> {
    vec![
        SourceInput::new("src/a.ts", "export function a() {}"),
        SourceInput::new("README.md", "# readme"),
        SourceInput::new("src/b.py", "def b(x):\n    pass\n"),
        SourceInput::new("src/broken.js", "// BOOM\nfunction c() {}"),
        SourceInput::new("src/d.go", "package d\n\nfunc D() {}\n"),
    ]
}

fn batch(parser: SelectiveParser, options: BatchOptions) -> BatchParser<SelectiveParser> {
    BatchParser::new(Engine::with_parser(parser, EngineOptions::default()), options)
}

#[test]
fn test_source_input_takes_extension_from_path() {
    let input = SourceInput::new("lib/nested/mod.test.tsx", "");
    assert_eq!(input.extension, "tsx");
    assert_eq!(SourceInput::new("Makefile", "").extension, "");
}

#[test]
fn test_failures_are_isolated_by_default() {
    let report = batch(SelectiveParser::default(), BatchOptions::default())
        .run(inputs())
        .unwrap();

    let parsed: Vec<_> = report.files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(parsed, ["src/a.ts", "src/b.py", "src/d.go"]);
    assert_eq!(report.skipped, ["README.md"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, "src/broken.js");
    assert!(report.failures[0].message.contains("refusing to parse"));

    assert_eq!(report.files[0].language, "typescript");
    assert_eq!(report.files[0].result.functions[0].name, "a");
    assert_eq!(report.files[1].language, "python");
    assert_eq!(report.files[1].line_count, 3);
}

#[test]
fn test_fail_fast_returns_first_failure() {
    let options = BatchOptions {
        fail_fast: true,
        ..BatchOptions::default()
    };
    let err = batch(SelectiveParser::default(), options)
        .run(inputs())
        .unwrap_err();
    match err {
        RepoLensError::Parse { path, .. } => assert_eq!(path, "src/broken.js"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fail_fast_with_clean_inputs_succeeds() {
    let options = BatchOptions {
        fail_fast: true,
        workers: 2,
    };
    let clean: Vec<_> = inputs()
        .into_iter()
        .filter(|i| i.relative_path != "src/broken.js")
        .collect();
    let report = batch(SelectiveParser::default(), options).run(clean).unwrap();
    assert_eq!(report.files.len(), 3);
    assert!(report.failures.is_empty());
}

#[test]
fn test_order_is_preserved_across_workers() {
    let many: Vec<_> = (0..64)
        .map(|i| SourceInput::new(format!("src/f{i:02}.js"), format!("function f{i}() {{}}")))
        .collect();

    for workers in [1, 4] {
        let parser = SelectiveParser::default();
        let calls = parser.calls.clone();
        let report = batch(
            parser,
            BatchOptions {
                workers,
                fail_fast: false,
            },
        )
        .run(many.clone())
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 64);
        for (i, file) in report.files.iter().enumerate() {
            assert_eq!(file.relative_path, format!("src/f{i:02}.js"));
            assert_eq!(file.result.functions[0].name, format!("f{i}"));
        }
    }
}

#[test]
fn test_empty_and_unsupported_inputs_never_reach_parser() {
    let parser = SelectiveParser::default();
    let calls = parser.calls.clone();
    let report = batch(parser, BatchOptions::default())
        .run(vec![
            SourceInput::new("empty.rs", ""),
            SourceInput::new("notes.txt", "BOOM"),
        ])
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.files.len(), 1);
    assert!(report.files[0].result.is_empty());
    assert_eq!(report.skipped, ["notes.txt"]);
}

#[test]
fn test_invalid_utf8_is_recorded_as_failure() {
    let report = batch(SelectiveParser::default(), BatchOptions::default())
        .run(vec![SourceInput::new("bin.js", vec![0xffu8, 0xfe, 0x00])])
        .unwrap();
    assert!(report.files.is_empty());
    assert_eq!(report.failures[0].path, "bin.js");
}
