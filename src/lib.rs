pub mod batch;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod grammar;
pub mod ingest;
pub mod parse;
pub mod summary;
pub mod types;

pub use engine::{parse_file, Engine, EngineOptions};
pub use errors::{RepoLensError, Result};
pub use types::ParsedFileResult;
