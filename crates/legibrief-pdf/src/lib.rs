//! Legibrief PDF text extraction
//!
//! Thin boundary over the `pdf-extract` crate: bytes in, plain text
//! out. Uploaded documents are untrusted, so the payload is checked for
//! the PDF magic number before the parser ever sees it, and parser
//! failures surface as typed errors rather than panics reaching the
//! transport layer.

#![warn(missing_docs)]

use thiserror::Error;
use tracing::debug;

/// Leading bytes of every well-formed PDF
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Errors that can occur while reading a document
#[derive(Error, Debug)]
pub enum PdfError {
    /// Payload does not look like a PDF at all
    #[error("Document is not a PDF")]
    NotPdf,

    /// The PDF parser rejected the document
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// The document parsed but contained no extractable text
    #[error("Document contains no extractable text")]
    EmptyDocument,
}

/// Extract the full text of a PDF document.
///
/// # Errors
///
/// Returns [`PdfError::NotPdf`] when the magic number is missing,
/// [`PdfError::Extraction`] when the parser fails, and
/// [`PdfError::EmptyDocument`] when extraction yields only whitespace.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(PdfError::EmptyDocument);
    }

    debug!(chars = text.len(), "extracted document text");
    Ok(text)
}
