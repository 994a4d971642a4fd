//! Text extraction: turns an uploaded document into plain text.
//!
//! PDF parsing itself is delegated to `pdf-extract`. Callers treat an
//! extraction failure the same as a document with no text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("failed to read PDF: {0}")]
    Pdf(String),
}

/// Converts opaque document bytes into concatenated page text.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`. Implementations are
/// synchronous; async callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Production extractor backed by `pdf_extract::extract_text_from_mem`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_is_rejected_before_parsing() {
        let err = PdfTextExtractor.extract(&[]).unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyDocument));
    }

    #[test]
    fn test_non_pdf_bytes_report_pdf_error() {
        let err = PdfTextExtractor
            .extract(b"definitely not a pdf document")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
