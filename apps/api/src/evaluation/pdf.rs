//! PDF → plain text for uploaded résumés.

use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Uploaded file is not a valid PDF")]
    NotPdf,

    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("PDF file contains no extractable text")]
    Empty,
}

/// `true` when `filename` ends in `.pdf`, any case.
pub fn has_pdf_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Extracts the text of every page, trimmed. Whitespace-only output is an error.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    // The parser panics on some malformed inputs; treat that as a failed extraction.
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| PdfError::Extraction("PDF parser aborted on malformed input".to_string()))?
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(PdfError::Empty);
    }

    debug!("Extracted {} characters from PDF", text.len());
    Ok(text.to_string())
}
