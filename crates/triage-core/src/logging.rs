//! Structured logging field name constants for inboxtriage.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by standardized names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Submission failed, persistence failed |
//! | WARN  | Recoverable issue, fallback applied (truncated selection, discarded state) |
//! | INFO  | Lifecycle events, settled submissions |
//! | DEBUG | Decision points, request shapes, config choices |
//! | TRACE | Per-item batch reconciliation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID for one submission. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Component originating the log event.
/// Values: "builder", "submission", "reconcile", "aggregator", "store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "submit", "reconcile", "record_success", "load", "save"
pub const OPERATION: &str = "op";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of files in a selection or batch.
pub const FILE_COUNT: &str = "file_count";

/// Number of items in a batch response.
pub const ITEM_COUNT: &str = "item_count";

/// Stored history length after a mutation.
pub const HISTORY_LEN: &str = "history_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Normalized category label of a classification.
pub const CATEGORY: &str = "category";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
