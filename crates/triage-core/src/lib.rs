//! # triage-core
//!
//! Core types, error taxonomy, and shared defaults for inboxtriage.
//!
//! This crate provides the foundational data structures the other
//! inboxtriage crates depend on: the request/response model, the persisted
//! history and stats shapes, the submission lifecycle, and the single
//! category normalization point.

pub mod category;
pub mod defaults;
pub mod error;
pub mod intake;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use category::{Category, PRODUCTIVE_LABEL, UNPRODUCTIVE_LABEL};
pub use error::{Error, Result};
pub use intake::{detect_content_type, intake_file, is_accepted_filename};
pub use models::{
    excerpt, BatchItem, BatchItemOutcome, ClassificationRequest, ClassificationResult,
    FilePayload, HistoryEntry, Outcome, RenderRow, RowStatus, Stats, StatusKind, StatusLine,
    SubmissionState,
};
