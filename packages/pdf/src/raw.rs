//! Raw content-stream extraction via [`lopdf`].

use lopdf::Document;

use crate::{ExtractionMethod, PdfError, TextBackend, catch_panics};

/// Decodes text-showing operators page by page using `lopdf`.
///
/// Used when the layout backend errors or finds no text. A page that fails
/// to decode contributes an empty string rather than failing the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBackend;

impl TextBackend for RawBackend {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Raw
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, PdfError> {
        catch_panics(|| {
            let doc = Document::load_mem(bytes)
                .map_err(|e| PdfError::Extraction(format!("invalid PDF: {e}")))?;

            // `get_pages` is keyed by 1-based page number, so iteration is
            // already in page order.
            let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

            Ok(page_numbers
                .iter()
                .map(|&n| {
                    doc.extract_text(&[n]).unwrap_or_else(|e| {
                        log::debug!("Raw extraction skipped page {n}: {e}");
                        String::new()
                    })
                })
                .collect())
        })
    }
}
