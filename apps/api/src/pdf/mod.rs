//! PDF intake: upload sniffing and text extraction.

pub mod contact;

use thiserror::Error;

/// Magic bytes every PDF file starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Turns PDF bytes into plain text. Implementations are synchronous and
/// CPU-bound; callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Production extractor backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        let text = normalize_text(&raw);
        if text.is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(text)
    }
}

/// Returns true when the upload both claims to be a PDF (by filename or
/// content type) and actually starts with the PDF magic bytes.
pub fn is_pdf(filename: Option<&str>, content_type: Option<&str>, head: &[u8]) -> bool {
    let named_pdf = filename
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    let typed_pdf = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/pdf"))
        .unwrap_or(false);

    (named_pdf || typed_pdf) && head.starts_with(PDF_MAGIC)
}

/// Normalizes extracted text: unifies line endings, strips trailing
/// whitespace, and collapses runs of blank lines into one.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        let line = line.trim_end().replace('\u{0c}', "");
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
            continue;
        }
        blank_run = 0;
        out.push_str(&line);
        out.push('\n');
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_requires_magic() {
        assert!(is_pdf(Some("resume.pdf"), None, b"%PDF-1.7\n..."));
        assert!(!is_pdf(Some("resume.pdf"), None, b"PK\x03\x04"));
    }

    #[test]
    fn test_is_pdf_accepts_content_type_without_extension() {
        assert!(is_pdf(Some("upload"), Some("application/pdf"), b"%PDF-1.4"));
    }

    #[test]
    fn test_is_pdf_rejects_docx_name() {
        assert!(!is_pdf(Some("resume.docx"), None, b"%PDF-1.4"));
        assert!(!is_pdf(None, None, b"%PDF-1.4"));
    }

    #[test]
    fn test_is_pdf_extension_is_case_insensitive() {
        assert!(is_pdf(Some("CV.PDF"), None, b"%PDF-1.5"));
    }

    #[test]
    fn test_normalize_collapses_blank_lines() {
        let raw = "Jane Doe\r\n\r\n\r\n\r\nEXPERIENCE   \n\n\nEngineer";
        assert_eq!(normalize_text(raw), "Jane Doe\n\nEXPERIENCE\n\nEngineer");
    }

    #[test]
    fn test_normalize_strips_form_feeds() {
        assert_eq!(normalize_text("Page one\u{0c}\nPage two"), "Page one\nPage two");
    }
}
