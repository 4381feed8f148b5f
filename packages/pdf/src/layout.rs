//! Layout-preserving extraction via [`pdf_extract`].

use crate::{ExtractionMethod, PdfError, TextBackend, catch_panics};

/// Extracts text in reading order using `pdf-extract`.
///
/// This is the preferred backend: numbered form labels and their values
/// usually come out on adjacent lines, which the field matchers rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutBackend;

impl TextBackend for LayoutBackend {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Layout
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError> {
        catch_panics(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
                .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))
        })
    }
}
