//! Centralized default constants for inboxtriage.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// BATCH LIMITS
// =============================================================================

/// Maximum files accepted per batch submission. Selections beyond this are
/// truncated to the first N and a warning is surfaced.
pub const MAX_BATCH_FILES: usize = 6;

// =============================================================================
// HISTORY
// =============================================================================

/// Maximum stored history entries; oldest entries are evicted past this.
pub const HISTORY_CAP: usize = 50;

/// Entries the history panel actually renders (of the stored cap).
pub const HISTORY_VIEW_LIMIT: usize = 10;

/// Maximum characters kept in a history excerpt.
pub const EXCERPT_MAX_CHARS: usize = 200;

// =============================================================================
// REMOTE SERVICE
// =============================================================================

/// Default classification service base URL.
pub const API_BASE: &str = "http://localhost:8000";

/// Single text/file classification endpoint.
pub const PROCESS_PATH: &str = "/process";

/// Multi-file classification endpoint.
pub const PROCESS_BATCH_PATH: &str = "/process_batch";

/// Default request timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Default state directory for persisted history/stats.
pub const STATE_DIR: &str = ".triage";

/// Named persisted value holding the history list.
pub const HISTORY_KEY: &str = "emailHistory";

/// Named persisted value holding the aggregate counters.
pub const STATS_KEY: &str = "emailStats";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Override for the classification service base URL.
pub const ENV_API_BASE: &str = "TRIAGE_API_BASE";

/// Override for the state directory.
pub const ENV_STATE_DIR: &str = "TRIAGE_STATE_DIR";

/// Override for the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "TRIAGE_TIMEOUT_SECS";
