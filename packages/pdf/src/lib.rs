#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Best-effort plain-text extraction from crash report PDFs.
//!
//! Two pure-Rust backends are tried in order:
//!
//! 1. [`layout::LayoutBackend`] ([`pdf_extract`]), which keeps the reading
//!    order of positioned text and is the better source for form labels.
//! 2. [`raw::RawBackend`] ([`lopdf`]), which decodes content-stream text
//!    operators page by page.
//!
//! The primary entry point is [`extract_text`]. It never fails: a document
//! that neither backend can read yields empty text, and callers are
//! expected to treat empty text as "nothing matched" rather than as an
//! error.

pub mod layout;
pub mod raw;

#[cfg(test)]
mod fixtures;

use std::panic::{self, AssertUnwindSafe};

use strum_macros::{AsRefStr, Display};

/// Errors raised by a single extraction backend.
///
/// These never escape [`extract_text`]; they are logged and trigger the
/// fallback to the next backend.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The backend rejected the document (not a PDF, encrypted, corrupt).
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// The backend panicked while decoding the document.
    #[error("PDF extraction panicked: {0}")]
    Panicked(String),
}

/// Which backend produced a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExtractionMethod {
    /// Layout-preserving extraction via `pdf-extract`.
    Layout,
    /// Raw content-stream extraction via `lopdf`.
    Raw,
    /// No backend could read the document.
    None,
}

/// A text extraction backend.
///
/// Implementations return one string per page, in page order.
pub trait TextBackend {
    /// The method this backend reports in [`ExtractedText::method`].
    fn method(&self) -> ExtractionMethod;

    /// Extracts the text of every page of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the document cannot be decoded.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError>;
}

/// The text of one document, newline-joined across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Concatenated page text. Empty when extraction failed.
    pub text: String,
    /// Backend that produced [`Self::text`].
    pub method: ExtractionMethod,
    /// Number of pages the backend reported.
    pub pages: usize,
}

impl ExtractedText {
    /// The outcome for a document no backend could read.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            text: String::new(),
            method: ExtractionMethod::None,
            pages: 0,
        }
    }

    /// Returns `true` if no usable (non-whitespace) text was extracted.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extracts the text of a PDF, preferring layout-preserving extraction and
/// falling back to raw content-stream extraction.
#[must_use]
pub fn extract_text(bytes: &[u8]) -> ExtractedText {
    extract_with_fallback(bytes, &[&layout::LayoutBackend, &raw::RawBackend])
}

/// Runs `backends` in order and returns the first usable result.
///
/// A backend's output is usable when it is non-blank. The last backend's
/// successful output is returned as-is even when blank; if every backend
/// errors, the result is [`ExtractedText::empty`].
#[must_use]
pub fn extract_with_fallback(bytes: &[u8], backends: &[&dyn TextBackend]) -> ExtractedText {
    for (idx, backend) in backends.iter().enumerate() {
        let method = backend.method();
        let is_last = idx + 1 == backends.len();

        match backend.extract_pages(bytes) {
            Ok(pages) => {
                let page_count = pages.len();
                let text = pages.join("\n");

                if is_last || !text.trim().is_empty() {
                    log::debug!(
                        "{method} extraction produced {} characters from {page_count} page(s)",
                        text.chars().count()
                    );
                    return ExtractedText {
                        text,
                        method,
                        pages: page_count,
                    };
                }

                log::debug!("{method} extraction produced no text, trying next backend");
            }
            Err(e) => {
                log::debug!("{method} extraction failed: {e}");
            }
        }
    }

    log::warn!("No extraction backend could read the document");
    ExtractedText::empty()
}

/// Runs `f`, converting a panic inside the PDF library into
/// [`PdfError::Panicked`].
pub(crate) fn catch_panics<T>(
    f: impl FnOnce() -> Result<T, PdfError>,
) -> Result<T, PdfError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "malformed document".to_string());
            Err(PdfError::Panicked(message))
        }
    }
}
