//! Classification backend trait.
//!
//! The remote service is an opaque boundary: implementations turn one text,
//! one file, or an ordered batch of files into classification results.
//! Nothing behind this trait touches persistence or views.

use async_trait::async_trait;

use triage_core::{BatchItem, ClassificationResult, FilePayload, Result};

/// Backend for classifying email content.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Classify free text.
    async fn classify_text(&self, text: &str) -> Result<ClassificationResult>;

    /// Classify a single document.
    async fn classify_file(&self, file: &FilePayload) -> Result<ClassificationResult>;

    /// Classify an ordered batch of documents in one round-trip.
    ///
    /// The returned items are in request order; per-item failures are
    /// reported inside the sequence, not as an overall error.
    async fn classify_batch(&self, files: &[FilePayload]) -> Result<Vec<BatchItem>>;
}
