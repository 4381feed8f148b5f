//! Batch progress reporting.
//!
//! The batch processor announces each document as it starts and finishes
//! through [`BatchProgress`]; the CLI renders that with an `indicatif` bar.

use std::sync::Arc;

/// Receives per-document progress while a batch runs.
///
/// Shared as `Arc<dyn BatchProgress>`, so implementations must be
/// `Send + Sync`.
pub trait BatchProgress: Send + Sync {
    /// A batch of `documents` files is starting.
    fn start(&self, documents: u64);

    /// Work on the document called `name` is starting.
    fn document_started(&self, name: &str);

    /// The current document is done (processed or failed).
    fn document_finished(&self);

    /// The batch is done; `summary` is the success line.
    fn finish(&self, summary: &str);

    /// Remove the indicator from the terminal.
    fn clear(&self);
}

/// Discards every update.
pub struct NullProgress;

impl BatchProgress for NullProgress {
    fn start(&self, _documents: u64) {}
    fn document_started(&self, _name: &str) {}
    fn document_finished(&self) {}
    fn finish(&self, _summary: &str) {}
    fn clear(&self) {}
}

/// A shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn BatchProgress> {
    Arc::new(NullProgress)
}
