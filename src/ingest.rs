//! Ingestion guard: normalizes raw content to text and applies the size cap.

use std::borrow::Cow;

use tracing::warn;

use crate::errors::{RepoLensError, Result};

/// Raw file content handed to the engine.
#[derive(Debug, Clone, Copy)]
pub enum SourceContent<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> SourceContent<'a> {
    pub fn is_empty(&self) -> bool {
        match self {
            SourceContent::Text(t) => t.is_empty(),
            SourceContent::Bytes(b) => b.is_empty(),
        }
    }
}

impl<'a> From<&'a str> for SourceContent<'a> {
    fn from(text: &'a str) -> Self {
        SourceContent::Text(text)
    }
}

impl<'a> From<&'a String> for SourceContent<'a> {
    fn from(text: &'a String) -> Self {
        SourceContent::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for SourceContent<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SourceContent::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for SourceContent<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        SourceContent::Bytes(bytes.as_slice())
    }
}

/// Outcome of validating content before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested<'a> {
    /// Text ready for the parser.
    Ready(Cow<'a, str>),
    /// Zero-length content; nothing to report.
    Empty,
    /// Content longer than the cap, in characters.
    Oversize { chars: usize },
}

/// Validates `content` and decodes it to text.
///
/// Byte buffers must be valid UTF-8. The cap is measured in characters, and
/// content strictly longer than `max_chars` is skipped rather than rejected.
pub fn validate<'a>(content: SourceContent<'a>, path: &str, max_chars: usize) -> Result<Ingested<'a>> {
    if content.is_empty() {
        return Ok(Ingested::Empty);
    }

    let text = match content {
        SourceContent::Text(t) => t,
        SourceContent::Bytes(b) => {
            std::str::from_utf8(b).map_err(|e| RepoLensError::InvalidContent {
                message: format!("content is not valid UTF-8: {e}"),
                path: path.to_string(),
            })?
        }
    };

    // Byte length bounds char count from above, so only count when it could exceed.
    if text.len() > max_chars {
        let chars = text.chars().count();
        if chars > max_chars {
            warn!(path, chars, max_chars, "content exceeds size cap, skipping");
            return Ok(Ingested::Oversize { chars });
        }
    }

    Ok(Ingested::Ready(Cow::Borrowed(text)))
}
