use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repolens::batch::{BatchOptions, BatchParser};
use repolens::config::{get_config_path, load_config, save_config, RepoLensConfig};
use repolens::discovery::discover;
use repolens::errors::RepoLensError;
use repolens::summary::ProjectSummary;
use repolens::{grammar, Engine, EngineOptions};

/// Source normalization for multi-language repositories.
#[derive(Parser)]
#[command(
    name = "repolens",
    version,
    about = "Extract functions, classes, imports and exports from source trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Project path (default: current directory)
        path: Option<String>,
    },
    /// Scan a project and summarize every supported file
    Scan {
        /// Project path (default: current directory)
        path: Option<String>,
        /// Print the full summary as JSON
        #[arg(short, long)]
        json: bool,
        /// Stop at the first file that fails to parse
        #[arg(long)]
        fail_fast: bool,
        /// Worker threads (default: from config, 0 = one per CPU)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Write the JSON summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a single file and print its extraction result as JSON
    Parse {
        /// File to parse
        file: PathBuf,
        /// Override the extension used to pick a grammar
        #[arg(long)]
        ext: Option<String>,
    },
    /// List supported file extensions
    Languages,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "repolens=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> repolens::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let project_path = resolve_path(path);
            let config = RepoLensConfig {
                root_dir: project_path.to_string_lossy().to_string(),
                ..RepoLensConfig::default()
            };
            save_config(&project_path, &config)?;
            println!("Wrote {}", get_config_path(&project_path).display());
        }
        Commands::Scan {
            path,
            json,
            fail_fast,
            workers,
            output,
        } => {
            let project_path = resolve_path(path);
            let config = load_config(&project_path)?;
            let summary = scan(&project_path, &config, fail_fast, workers)?;

            if let Some(out) = output {
                fs::write(&out, serde_json::to_string_pretty(&summary)?)?;
                info!(path = %out.display(), "summary written");
            } else if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Commands::Parse { file, ext } => {
            let extension = ext
                .or_else(|| {
                    file.extension()
                        .and_then(|e| e.to_str())
                        .map(str::to_string)
                })
                .unwrap_or_default();
            let content = fs::read(&file).map_err(|e| RepoLensError::File {
                message: e.to_string(),
                path: file.display().to_string(),
            })?;
            let path = file.to_string_lossy();
            match Engine::new().parse_file(&content, &extension, &path)? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => {
                    eprintln!("Unsupported extension '{}'", extension);
                    process::exit(2);
                }
            }
        }
        Commands::Languages => {
            for ext in grammar::supported_extensions() {
                if let Some(g) = grammar::resolve(ext) {
                    println!(".{:<6} {}", ext, g.language_name());
                }
            }
        }
    }
    Ok(())
}

fn scan(
    root: &Path,
    config: &RepoLensConfig,
    fail_fast: bool,
    workers: Option<usize>,
) -> repolens::Result<ProjectSummary> {
    let inputs = discover(root, config)?;
    info!(files = inputs.len(), "discovered");

    let engine = Engine::with_options(EngineOptions {
        max_content_chars: config.max_content_chars,
        extract_comments: config.extract_comments,
    });
    let batch = BatchParser::new(
        engine,
        BatchOptions {
            workers: workers.unwrap_or(config.workers),
            fail_fast: fail_fast || config.fail_fast,
        },
    );
    let report = batch.run(inputs)?;

    let project_name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| root.display().to_string());
    Ok(ProjectSummary::from_report(
        &project_name,
        &root.display().to_string(),
        report,
    ))
}

fn print_summary(summary: &ProjectSummary) {
    let meta = &summary.metadata;
    println!("{} ({})", meta.project_name, meta.root_directory);
    println!("  Files:      {}", meta.total_files);
    println!("  Functions:  {}", meta.total_functions);
    println!("  Classes:    {}", meta.total_classes);
    if !meta.languages.is_empty() {
        println!("\n  Languages:");
        for lang in &meta.languages {
            println!(
                "    {}: {} files, {} lines",
                lang.language, lang.file_count, lang.line_count
            );
        }
    }
    if !summary.failures.is_empty() {
        println!("\n  Failures:");
        for f in &summary.failures {
            println!("    {}: {}", f.path, f.message);
        }
    }
}

/// Resolves an optional path argument to a `PathBuf`.
///
/// Defaults to the current working directory if no path is provided.
fn resolve_path(path: Option<String>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
