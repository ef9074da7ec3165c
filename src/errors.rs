use thiserror::Error;

/// Errors that can occur while normalizing source files.
///
/// Unsupported extensions, empty files and oversize files are not errors;
/// they are reported through `Option` or an empty result instead.
#[derive(Error, Debug)]
pub enum RepoLensError {
    #[error("invalid content: {message} (path: {path})")]
    InvalidContent { message: String, path: String },

    #[error("parse error: {message} (path: {path}, preview: {preview:?})")]
    Parse {
        message: String,
        path: String,
        preview: String,
    },

    #[error("file error: {message} (path: {path})")]
    File { message: String, path: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RepoLensError {
    /// Returns the file path this error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidContent { path, .. } | Self::Parse { path, .. } | Self::File { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Convenience alias for results using `RepoLensError`.
pub type Result<T> = std::result::Result<T, RepoLensError>;
