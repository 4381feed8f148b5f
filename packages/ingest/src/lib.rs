#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch processing of uploaded crash reports.
//!
//! Each document runs through text extraction, parsing and row assembly.
//! Documents are processed one at a time in upload order. A document that
//! cannot be read or decoded never aborts the batch: it contributes the
//! single placeholder row and a warning in the log.

pub mod progress;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crash_leads_lead_models::{LeadRow, LeadSummary};
use crash_leads_parser::{ProfileError, ReportParser, ReportProfile};
use crash_leads_pdf::{ExtractedText, ExtractionMethod};

use progress::BatchProgress;

/// Errors raised while setting up or feeding a batch.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Reading an input file failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The report profile could not be loaded or compiled.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// A blocking worker task failed.
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Turns raw document bytes into text.
pub type Extractor = fn(&[u8]) -> ExtractedText;

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Display name, usually the file name.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Read`] if the file cannot be read.
    pub async fn read(path: &Path) -> Result<Self, IngestError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| IngestError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(display_name(path), bytes))
    }
}

/// What happened to one document of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Document display name.
    pub name: String,
    /// Extraction backend that produced the text.
    pub method: ExtractionMethod,
    /// Page count reported by the backend.
    pub pages: usize,
    /// Characters of extracted text.
    pub text_chars: usize,
    /// Occupant candidates found (0 means a placeholder row was emitted).
    pub occupants: usize,
    /// Charged-driver hint, if one was found.
    pub charged_driver_hint: Option<String>,
    /// Why the document could not be processed, if it could not.
    pub error: Option<String>,
}

/// The rows and report of a single processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub report: DocumentReport,
    pub rows: Vec<LeadRow>,
}

/// The accumulated result of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadBatch {
    /// Per-document reports, in upload order.
    pub documents: Vec<DocumentReport>,
    /// All lead rows, in upload order.
    pub rows: Vec<LeadRow>,
}

impl LeadBatch {
    /// Appends one processed document.
    pub fn push(&mut self, processed: ProcessedDocument) {
        self.documents.push(processed.report);
        self.rows.extend(processed.rows);
    }

    /// Summary metrics for the batch.
    #[must_use]
    pub fn summary(&self) -> LeadSummary {
        LeadSummary::from_rows(self.documents.len(), &self.rows)
    }
}

/// Runs documents through extraction and parsing.
///
/// Cheap to clone; the compiled parser is shared.
#[derive(Clone)]
pub struct BatchProcessor {
    parser: Arc<ReportParser>,
    extract: Extractor,
}

impl BatchProcessor {
    /// A processor that extracts text with [`crash_leads_pdf::extract_text`].
    #[must_use]
    pub fn new(parser: ReportParser) -> Self {
        Self::with_extractor(parser, crash_leads_pdf::extract_text)
    }

    /// A processor with a custom text extractor.
    #[must_use]
    pub fn with_extractor(parser: ReportParser, extract: Extractor) -> Self {
        Self {
            parser: Arc::new(parser),
            extract,
        }
    }

    #[must_use]
    pub fn parser(&self) -> &ReportParser {
        &self.parser
    }

    /// Extracts, parses and assembles one document.
    #[must_use]
    pub fn process_document(&self, doc: &UploadedDocument) -> ProcessedDocument {
        let extracted = (self.extract)(&doc.bytes);
        if extracted.is_blank() {
            log::warn!("{}: no text could be extracted", doc.name);
        }

        let parsed = self.parser.parse(&extracted.text);
        let rows = self.parser.rows(&parsed);

        log::debug!(
            "{}: {} occupant(s), {} row(s) via {} extraction",
            doc.name,
            parsed.occupants.len(),
            rows.len(),
            extracted.method
        );

        ProcessedDocument {
            report: DocumentReport {
                name: doc.name.clone(),
                method: extracted.method,
                pages: extracted.pages,
                text_chars: extracted.text.chars().count(),
                occupants: parsed.occupants.len(),
                charged_driver_hint: parsed.charged_driver_hint,
                error: None,
            },
            rows,
        }
    }

    /// Processes in-memory documents in order.
    #[must_use]
    pub fn process_batch(
        &self,
        docs: &[UploadedDocument],
        progress: &Arc<dyn BatchProgress>,
    ) -> LeadBatch {
        progress.start(docs.len() as u64);

        let mut batch = LeadBatch::default();
        for doc in docs {
            progress.document_started(&doc.name);
            batch.push(self.process_document(doc));
            progress.document_finished();
        }

        progress.finish(&finished_message(&batch));
        batch
    }

    /// Reads and processes files in order.
    ///
    /// Extraction and parsing run on the blocking thread pool, one document
    /// at a time. A file that cannot be read, or whose worker task fails,
    /// yields the placeholder row.
    pub async fn process_paths(
        &self,
        paths: &[PathBuf],
        progress: &Arc<dyn BatchProgress>,
    ) -> LeadBatch {
        progress.start(paths.len() as u64);

        let mut batch = LeadBatch::default();
        for path in paths {
            let name = display_name(path);
            progress.document_started(&name);

            let processed = match self.process_path(path).await {
                Ok(processed) => processed,
                Err(e) => {
                    log::warn!("{name}: {e}");
                    self.failed(name, &e)
                }
            };

            batch.push(processed);
            progress.document_finished();
        }

        progress.finish(&finished_message(&batch));
        batch
    }

    async fn process_path(&self, path: &Path) -> Result<ProcessedDocument, IngestError> {
        let doc = UploadedDocument::read(path).await?;
        let this = self.clone();
        Ok(tokio::task::spawn_blocking(move || this.process_document(&doc)).await?)
    }

    fn failed(&self, name: String, error: &IngestError) -> ProcessedDocument {
        ProcessedDocument {
            report: DocumentReport {
                name,
                method: ExtractionMethod::None,
                pages: 0,
                text_chars: 0,
                occupants: 0,
                charged_driver_hint: None,
                error: Some(error.to_string()),
            },
            rows: self.parser.parse_document(""),
        }
    }
}

/// Builds the parser for `profile_path`, or for the embedded NJTR-1 profile
/// when no path is given.
///
/// # Errors
///
/// Returns [`IngestError::Profile`] if the profile cannot be loaded or its
/// patterns do not compile.
pub fn load_parser(profile_path: Option<&Path>) -> Result<ReportParser, IngestError> {
    let profile = match profile_path {
        Some(path) => ReportProfile::load(path)?,
        None => ReportProfile::njtr1(),
    };
    Ok(ReportParser::new(profile)?)
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn finished_message(batch: &LeadBatch) -> String {
    format!(
        "Parsed {} file(s), {} row(s).",
        batch.documents.len(),
        batch.rows.len()
    )
}
