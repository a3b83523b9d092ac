//! History and stats aggregation over an injected store.
//!
//! Owns the in-process copy of the persisted state. Every successful
//! classification becomes one immutable history entry (newest first, capped)
//! and one counter increment; both structures persist in a single save per
//! mutation, so a same-process read never observes a partial update.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use triage_core::defaults::{HISTORY_CAP, HISTORY_VIEW_LIMIT};
use triage_core::{excerpt, ClassificationResult, HistoryEntry, Result, Stats};

use crate::store::{PersistedState, StateStore};

/// Appends history entries, maintains counters, and persists both.
pub struct Aggregator {
    store: Arc<dyn StateStore>,
    history: Vec<HistoryEntry>,
    stats: Stats,
    last_id: i64,
}

impl Aggregator {
    /// Load persisted state and build an aggregator over it.
    pub async fn open(store: Arc<dyn StateStore>) -> Result<Self> {
        let PersistedState { history, stats } = store.load().await?;
        let last_id = history.iter().map(|e| e.id).max().unwrap_or(0);

        debug!(
            component = "aggregator",
            history_len = history.len(),
            total = stats.total,
            "Loaded persisted state"
        );

        Ok(Self { store, history, stats, last_id })
    }

    /// Record one successful classification.
    ///
    /// The excerpt prefers the service-extracted preview and falls back to
    /// the raw submitted input. Returns the created entry.
    pub async fn record_success(
        &mut self,
        result: &ClassificationResult,
        excerpt_source: &str,
    ) -> Result<HistoryEntry> {
        let source = result
            .extracted_preview
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(excerpt_source);

        let entry = HistoryEntry {
            id: self.next_id(),
            category: result.category,
            reply: result.reply.clone(),
            excerpt: excerpt(source),
            created_at: Utc::now(),
        };

        self.history.insert(0, entry.clone());
        self.history.truncate(HISTORY_CAP);
        self.stats.record(result.category);
        debug_assert!(self.stats.is_consistent());

        self.persist().await?;

        info!(
            component = "aggregator",
            op = "record_success",
            category = %result.category,
            history_len = self.history.len(),
            "Recorded classification"
        );

        Ok(entry)
    }

    /// Clear history and zero stats, persisting the cleared state.
    ///
    /// Explicit and destructive; confirming with the user happens at the
    /// boundary, not here.
    pub async fn reset(&mut self) -> Result<()> {
        self.history.clear();
        self.stats = Stats::default();
        self.store.clear().await?;

        info!(component = "aggregator", op = "reset", "History and stats cleared");
        Ok(())
    }

    /// Full stored history, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The newest entries the history panel renders.
    pub fn recent(&self) -> &[HistoryEntry] {
        let n = self.history.len().min(HISTORY_VIEW_LIMIT);
        &self.history[..n]
    }

    /// Look up one entry for click-to-restore.
    pub fn entry(&self, id: i64) -> Option<&HistoryEntry> {
        self.history.iter().find(|e| e.id == id)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Timestamp-derived id, bumped to stay strictly monotonic when two
    /// records land in the same millisecond.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    async fn persist(&self) -> Result<()> {
        self.store
            .save(&PersistedState {
                history: self.history.clone(),
                stats: self.stats,
            })
            .await
    }
}
