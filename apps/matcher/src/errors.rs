use std::path::PathBuf;

use thiserror::Error;

use crate::extraction::DocumentFormat;

/// Failure signal of the text extraction layer.
///
/// Every variant is terminal for the call that produced it: corrupt or
/// unsupported uploads are not retried. Skill extraction and ranking are
/// total and never produce errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {format} document: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },
}

impl ExtractError {
    pub(crate) fn parse(format: DocumentFormat, message: impl Into<String>) -> Self {
        ExtractError::Parse {
            format,
            message: message.into(),
        }
    }

    /// Short machine-readable code for logs and caller-side mapping.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ExtractError::Io { .. } => "IO_ERROR",
            ExtractError::Parse { .. } => "PARSE_ERROR",
        }
    }
}
