//! Engine wiring: build → submit → record/reconcile → notify views.
//!
//! Owns the submission controller and the aggregator; everything the user
//! triggers flows through here. Failures surface as status lines and never
//! touch persisted state.

use std::sync::Arc;

use tracing::debug;

use triage_client::{ClassifierBackend, SubmissionController};
use triage_core::{
    ClassificationResult, HistoryEntry, Outcome, Result, Stats, StatusLine, SubmissionState,
};
use triage_store::{Aggregator, StateStore};

use crate::builder::{self, Selection};
use crate::reconcile::reconcile;
use crate::view::ViewSink;

/// The submission-and-reconciliation engine.
pub struct Engine<V: ViewSink> {
    controller: SubmissionController,
    aggregator: Aggregator,
    view: V,
}

impl<V: ViewSink> Engine<V> {
    /// Load persisted state and render the initial history/stats panel.
    pub async fn new(
        backend: Arc<dyn ClassifierBackend>,
        store: Arc<dyn StateStore>,
        view: V,
    ) -> Result<Self> {
        let aggregator = Aggregator::open(store).await?;
        let mut engine = Self {
            controller: SubmissionController::new(backend),
            aggregator,
            view,
        };
        engine.sync_history();
        Ok(engine)
    }

    /// Classify the current selection end to end.
    ///
    /// On success the result (or batch table) is rendered and history/stats
    /// are updated and re-rendered. On failure a status line is surfaced and
    /// nothing is persisted.
    pub async fn classify(&mut self, selection: Selection) -> Result<()> {
        let raw_text = selection.text.trim().to_string();

        let built = match builder::build(selection) {
            Ok(built) => built,
            Err(e) => {
                self.view.status_shown(&StatusLine::error(e.surface_message()));
                return Err(e);
            }
        };

        if let Some(warning) = &built.warning {
            debug!(component = "engine", warning = %warning, "Selection truncated");
            self.view.warning_shown(warning);
        }

        self.view.status_shown(&StatusLine::info("Analyzing..."));

        let outcome = match self.controller.submit(built.request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.view.status_shown(&StatusLine::error(e.surface_message()));
                return Err(e);
            }
        };

        match outcome {
            Outcome::Single(result) => {
                self.aggregator.record_success(&result, &raw_text).await?;
                self.view.result_shown(&result);
            }
            Outcome::Batch(items) => {
                let rows = reconcile(&items, &mut self.aggregator).await?;
                self.view.batch_shown(&rows);
            }
        }

        self.view.status_shown(&StatusLine::success("Analysis complete."));
        self.sync_history();
        Ok(())
    }

    /// Re-render a stored entry into the result panel (history click).
    ///
    /// Returns false when the id is unknown (e.g. already evicted).
    pub fn restore(&mut self, id: i64) -> bool {
        let restored = match self.aggregator.entry(id) {
            Some(entry) => ClassificationResult {
                category: entry.category,
                reply: entry.reply.clone(),
                extracted_preview: Some(entry.excerpt.clone()),
            },
            None => return false,
        };
        self.view.result_shown(&restored);
        true
    }

    /// Clear history and stats; the caller confirms with the user first.
    pub async fn reset_history(&mut self) -> Result<()> {
        self.aggregator.reset().await?;
        self.view
            .status_shown(&StatusLine::success("History cleared."));
        self.sync_history();
        Ok(())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.aggregator.history()
    }

    pub fn stats(&self) -> Stats {
        self.aggregator.stats()
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.controller.state()
    }

    /// The sink, for callers that own richer view state.
    pub fn view(&self) -> &V {
        &self.view
    }

    fn sync_history(&mut self) {
        let stats = self.aggregator.stats();
        self.view.history_shown(self.aggregator.recent(), &stats);
    }
}
