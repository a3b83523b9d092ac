//! Core data model for the submission-and-reconciliation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::defaults::{EXCERPT_MAX_CHARS, MAX_BATCH_FILES};
use crate::error::{Error, Result};

// =============================================================================
// REQUEST SIDE
// =============================================================================

/// A file selected for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub filename: String,
    /// MIME type resolved at intake (magic bytes, then extension).
    pub content_type: String,
    pub data: Vec<u8>,
}

/// The two request shapes the service accepts, plus the single-file case.
///
/// Exactly one variant is ever active for a submission. `MultiFile` holds
/// between 1 and [`MAX_BATCH_FILES`] payloads in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationRequest {
    /// Free text, already trimmed and non-empty.
    Text(String),
    SingleFile(FilePayload),
    MultiFile(Vec<FilePayload>),
}

impl ClassificationRequest {
    /// Build a text request from a raw field value.
    ///
    /// Fails with [`Error::EmptyInput`] when the trimmed value is empty.
    pub fn text(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(ClassificationRequest::Text(trimmed.to_string()))
    }

    /// Build a multi-file request, enforcing the length invariant.
    pub fn multi(files: Vec<FilePayload>) -> Result<Self> {
        if files.is_empty() {
            return Err(Error::EmptyInput);
        }
        if files.len() > MAX_BATCH_FILES {
            return Err(Error::InvalidInput(format!(
                "batch holds at most {} files, got {}",
                MAX_BATCH_FILES,
                files.len()
            )));
        }
        Ok(ClassificationRequest::MultiFile(files))
    }

    /// True when this request settles through the batch endpoint.
    pub fn is_batch(&self) -> bool {
        matches!(self, ClassificationRequest::MultiFile(_))
    }

    pub fn file_count(&self) -> usize {
        match self {
            ClassificationRequest::Text(_) => 0,
            ClassificationRequest::SingleFile(_) => 1,
            ClassificationRequest::MultiFile(files) => files.len(),
        }
    }
}

// =============================================================================
// RESPONSE SIDE
// =============================================================================

/// A single classification produced by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Suggested reply text.
    pub reply: String,
    /// Text the service extracted from a submitted document, if any.
    pub extracted_preview: Option<String>,
}

/// Per-file outcome inside a batch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchItemOutcome {
    Classified(ClassificationResult),
    /// Per-item error reported by the service; isolated from other items.
    Failed(String),
}

/// One entry of a batch response, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub filename: String,
    pub outcome: BatchItemOutcome,
}

impl BatchItem {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, BatchItemOutcome::Failed(_))
    }
}

/// Settled result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Single(ClassificationResult),
    Batch(Vec<BatchItem>),
}

// =============================================================================
// SUBMISSION LIFECYCLE
// =============================================================================

/// Lifecycle of one submission, owned by the submission controller.
///
/// `Succeeded`/`Failed` are idle-equivalent: the trigger is re-enabled the
/// moment the state leaves `InFlight`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    /// True once a submission has settled either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed(_))
    }
}

// =============================================================================
// PERSISTED STATE
// =============================================================================

/// One recorded classification, newest-first in the stored list.
///
/// Entries are immutable once created and evicted oldest-first past the
/// history cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonic, timestamp-derived identifier.
    pub id: i64,
    pub category: Category,
    pub reply: String,
    /// Bounded display snippet derived from extracted content or raw input.
    pub excerpt: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Running aggregate counters across sessions.
///
/// `total == productive + unproductive` holds after every update; counters
/// only grow except on explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    pub productive: u64,
    pub unproductive: u64,
}

impl Stats {
    /// Count one classified result.
    pub fn record(&mut self, category: Category) {
        self.total += 1;
        match category {
            Category::Productive => self.productive += 1,
            Category::Unproductive => self.unproductive += 1,
        }
    }

    /// The invariant every update must preserve.
    pub fn is_consistent(&self) -> bool {
        self.total == self.productive + self.unproductive
    }
}

/// Derive a history excerpt from extracted content or raw input.
///
/// Bounded at [`EXCERPT_MAX_CHARS`] characters, cut on a char boundary.
pub fn excerpt(source: &str) -> String {
    source.chars().take(EXCERPT_MAX_CHARS).collect()
}

// =============================================================================
// VIEW-FACING VALUES
// =============================================================================

/// Immutable row data for the batch results table, in response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub filename: String,
    pub status: RowStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Classified { category: Category, reply: String },
    Failed { message: String },
}

/// Transient status message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A transient status line for the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> FilePayload {
        FilePayload {
            filename: name.to_string(),
            content_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        }
    }

    #[test]
    fn test_text_request_trims() {
        let req = ClassificationRequest::text("  resend the invoice  ").unwrap();
        assert_eq!(
            req,
            ClassificationRequest::Text("resend the invoice".to_string())
        );
    }

    #[test]
    fn test_text_request_rejects_whitespace_only() {
        assert!(matches!(
            ClassificationRequest::text("   \n\t "),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_multi_bounds() {
        assert!(matches!(
            ClassificationRequest::multi(vec![]),
            Err(Error::EmptyInput)
        ));

        let six: Vec<_> = (0..6).map(|i| payload(&format!("f{}.txt", i))).collect();
        assert!(ClassificationRequest::multi(six).is_ok());

        let seven: Vec<_> = (0..7).map(|i| payload(&format!("f{}.txt", i))).collect();
        assert!(matches!(
            ClassificationRequest::multi(seven),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_file_count() {
        assert_eq!(
            ClassificationRequest::text("hi").unwrap().file_count(),
            0
        );
        assert_eq!(
            ClassificationRequest::SingleFile(payload("a.txt")).file_count(),
            1
        );
        let multi = ClassificationRequest::multi(vec![payload("a.txt"), payload("b.txt")]).unwrap();
        assert_eq!(multi.file_count(), 2);
        assert!(multi.is_batch());
    }

    #[test]
    fn test_stats_record_preserves_invariant() {
        let mut stats = Stats::default();
        for i in 0..7 {
            let cat = if i % 2 == 0 {
                Category::Productive
            } else {
                Category::Unproductive
            };
            stats.record(cat);
            assert!(stats.is_consistent());
        }
        assert_eq!(stats.total, 7);
        assert_eq!(stats.productive, 4);
        assert_eq!(stats.unproductive, 3);
    }

    #[test]
    fn test_stats_serde_key_names() {
        let stats = Stats { total: 3, productive: 2, unproductive: 1 };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["productive"], 2);
        assert_eq!(json["unproductive"], 1);
    }

    #[test]
    fn test_history_entry_serde_created_at_key() {
        let entry = HistoryEntry {
            id: 1700000000000,
            category: Category::Productive,
            reply: "Will resend today.".to_string(),
            excerpt: "Please resend the invoice".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());

        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_excerpt_bounds() {
        assert_eq!(excerpt("short"), "short");

        let long = "x".repeat(500);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        // Multi-byte characters must not be split.
        let long = "é".repeat(300);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_MAX_CHARS);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_submission_state_queries() {
        assert!(!SubmissionState::Idle.is_in_flight());
        assert!(SubmissionState::InFlight.is_in_flight());
        assert!(SubmissionState::Succeeded.is_settled());
        assert!(SubmissionState::Failed("boom".to_string()).is_settled());
        assert!(!SubmissionState::InFlight.is_settled());
    }
}
