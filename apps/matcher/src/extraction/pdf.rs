use std::panic;

use tracing::warn;

use crate::errors::ExtractError;
use crate::extraction::{DocumentExtractor, DocumentFormat};

/// PDF backend over `pdf-extract`.
///
/// Page text is concatenated in page order exactly as the parser emits it;
/// no separators are added between pages.
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ExtractError::parse(
                DocumentFormat::Pdf,
                "missing %PDF header",
            ));
        }

        // pdf-extract panics on some malformed object streams instead of
        // returning an error.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractError::parse(DocumentFormat::Pdf, e.to_string())),
            Err(_) => {
                warn!(size = bytes.len(), "PDF parser panicked on input");
                Err(ExtractError::parse(
                    DocumentFormat::Pdf,
                    "parser aborted on malformed content",
                ))
            }
        }
    }
}
