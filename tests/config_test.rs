use repolens::config::*;
use tempfile::TempDir;

#[test]
fn test_default_config_covers_registered_extensions() {
    let config = RepoLensConfig::default();
    assert!(config.include.iter().any(|p| p == "**/*.ts"));
    assert!(config.include.iter().any(|p| p == "**/*.py"));
    assert!(config.include.iter().any(|p| p == "**/*.yaml"));
    assert!(config.exclude.iter().any(|p| p == "**/node_modules/**"));
    assert_eq!(config.max_content_chars, 30_000);
    assert!(!config.fail_fast);
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let config = RepoLensConfig {
        workers: 3,
        fail_fast: true,
        ..RepoLensConfig::default()
    };
    save_config(dir.path(), &config).unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(config, loaded);
    assert!(!get_config_path(dir.path()).with_extension("tmp").exists());
}

#[test]
fn test_load_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.root_dir, dir.path().to_string_lossy());
    assert_eq!(loaded.include, RepoLensConfig::default().include);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(get_repolens_dir(dir.path())).unwrap();
    std::fs::write(get_config_path(dir.path()), r#"{"max_content_chars": 10}"#).unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.max_content_chars, 10);
    assert_eq!(loaded.version, 1);
    assert!(loaded.extract_comments);
}

#[test]
fn test_malformed_config_is_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(get_repolens_dir(dir.path())).unwrap();
    std::fs::write(get_config_path(dir.path()), "{ not json").unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert!(matches!(err, repolens::RepoLensError::Config { .. }));
}

#[test]
fn test_should_include_file() {
    let config = RepoLensConfig::default();
    assert!(should_include_file("src/main.rs", &config));
    assert!(should_include_file("index.ts", &config));
    assert!(!should_include_file("node_modules/left-pad/index.js", &config));
    assert!(!should_include_file("web/dist/bundle.js", &config));
    assert!(!should_include_file("static/app.min.js", &config));
    assert!(!should_include_file("assets/logo.png", &config));
    assert!(!should_include_file("README.md", &config));
}

#[test]
fn test_exclude_wins_over_include() {
    let config = RepoLensConfig {
        include: vec!["**/*.js".to_string()],
        exclude: vec!["legacy/**".to_string()],
        ..RepoLensConfig::default()
    };
    assert!(should_include_file("src/a.js", &config));
    assert!(!should_include_file("legacy/a.js", &config));
}

#[test]
fn test_repolens_dir_name() {
    let dir = TempDir::new().unwrap();
    assert!(get_repolens_dir(dir.path()).ends_with(".repolens"));
    assert!(get_config_path(dir.path()).ends_with(".repolens/config.json"));
}
