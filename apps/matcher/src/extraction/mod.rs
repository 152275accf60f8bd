//! Text extraction: turns an uploaded PDF or Word document into plain text.
//!
//! Each format sits behind [`DocumentExtractor`], so the parsing library for a
//! format can be replaced without touching skill extraction or ranking.

pub mod pdf;
pub mod word;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ExtractError;

pub use pdf::PdfExtractor;
pub use word::{DocxExtractor, LegacyWordExtractor};

const MIME_PDF: &str = "application/pdf";
const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document families the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    /// Office Open XML word processing document (zip container).
    Docx,
    /// Legacy Word 97-2003 binary document (OLE2 compound file).
    Doc,
}

impl DocumentFormat {
    /// Resolves a declared extension (`pdf`, `.DOCX`) or MIME type.
    pub fn from_declared(declared: &str) -> Result<Self, ExtractError> {
        let normalized = declared.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" | MIME_PDF => Ok(DocumentFormat::Pdf),
            "docx" | MIME_DOCX => Ok(DocumentFormat::Docx),
            "doc" | MIME_DOC => Ok(DocumentFormat::Doc),
            _ => Err(ExtractError::UnsupportedFormat(declared.trim().to_string())),
        }
    }

    /// Resolves the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_declared(extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format-specific text extraction backend.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Returns the default backend for a format.
pub fn extractor_for(format: DocumentFormat) -> &'static dyn DocumentExtractor {
    match format {
        DocumentFormat::Pdf => &PdfExtractor,
        DocumentFormat::Docx => &DocxExtractor,
        DocumentFormat::Doc => &LegacyWordExtractor,
    }
}

/// Reads `path` and extracts its text, interpreting the bytes as `declared`.
///
/// The declared format is validated before the file is touched, so an
/// unsupported upload fails with `UnsupportedFormat` even if it is missing.
pub fn extract_text(path: impl AsRef<Path>, declared: &str) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_declared(declared)?;

    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        format = %format,
        size = bytes.len(),
        "Extracting document text"
    );

    extractor_for(format).extract(&bytes)
}

/// Extracts text from an in-memory upload.
pub fn extract_text_from_bytes(bytes: &[u8], declared: &str) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_declared(declared)?;
    extractor_for(format).extract(bytes)
}
