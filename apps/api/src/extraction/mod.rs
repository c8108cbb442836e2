//! Document extraction — the PDF-to-text collaborator and the text normalizer.
//!
//! Extraction is the only I/O-adjacent stage of the pipeline; everything after
//! it is pure text processing. A document keeps TWO copies of its text: the
//! raw extractor output (line breaks intact, needed for section and bullet
//! detection) and the normalized copy used by every other analyzer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s@.\-+(),/;:]").unwrap());

/// The two text views of one uploaded document. Immutable once built; both
/// copies flow through the rest of the pipeline for the duration of a single
/// analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Text as the extractor produced it, line breaks preserved.
    pub raw: String,
    /// Whitespace-collapsed, character-filtered copy.
    pub normalized: String,
}

impl Document {
    pub fn from_raw(raw: String) -> Self {
        let normalized = normalize_text(&raw);
        Self { raw, normalized }
    }
}

/// Extracts the full text of a PDF held in memory. Corrupt or unreadable
/// input surfaces as an extraction error and aborts the analysis call.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to extract text from PDF: {e}")))
}

/// Cleans raw extracted text: collapses every whitespace run (including
/// newlines) to a single space, strips characters that are not alphanumeric,
/// whitespace, or one of `@ . - + ( ) , / ; :`, then trims. Total function —
/// empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let filtered = DISALLOWED_CHARS.replace_all(&collapsed, "");
    filtered.trim().to_string()
}
