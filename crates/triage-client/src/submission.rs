//! Submission lifecycle state machine.
//!
//! One controller owns one [`SubmissionState`]. At most one request is in
//! flight at a time: a second `submit` while InFlight is rejected with
//! [`Error::Busy`] rather than queued. The in-flight flag is cleared on
//! every exit path, so the trigger is re-enabled whatever the outcome.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use triage_core::{ClassificationRequest, Error, Outcome, Result, SubmissionState};

use crate::backend::ClassifierBackend;

/// Owns the request lifecycle: idle → in-flight → settled.
///
/// Dispatches to the configured backend and reports the settled
/// [`Outcome`]; persistence and rendering are the caller's concern.
pub struct SubmissionController {
    backend: Arc<dyn ClassifierBackend>,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn ClassifierBackend>) -> Self {
        Self {
            backend,
            state: SubmissionState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// True while a request is in flight; new submissions are rejected.
    pub fn is_busy(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Submit a request and drive it to settlement.
    ///
    /// Single requests settle to [`Outcome::Single`], multi-file requests to
    /// [`Outcome::Batch`]. Per-item batch errors settle as success; only
    /// transport, HTTP, server-reported, and malformed-response failures
    /// settle as `Err`.
    pub async fn submit(&mut self, request: ClassificationRequest) -> Result<Outcome> {
        if self.state.is_in_flight() {
            warn!(component = "submission", "Rejecting overlapping submission");
            return Err(Error::Busy);
        }

        let request_id = Uuid::now_v7();
        let start = Instant::now();

        debug!(
            request_id = %request_id,
            component = "submission",
            op = "submit",
            file_count = request.file_count(),
            batch = request.is_batch(),
            "Dispatching classification request"
        );

        self.state = SubmissionState::InFlight;
        let outcome = self.dispatch(&request).await;

        // Settlement: every path leaves the controller re-enabled.
        let duration_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => {
                self.state = SubmissionState::Succeeded;
                info!(
                    request_id = %request_id,
                    component = "submission",
                    duration_ms,
                    success = true,
                    "Submission settled"
                );
            }
            Err(e) => {
                self.state = SubmissionState::Failed(e.to_string());
                warn!(
                    request_id = %request_id,
                    component = "submission",
                    duration_ms,
                    success = false,
                    error = %e,
                    "Submission failed"
                );
            }
        }

        outcome
    }

    async fn dispatch(&self, request: &ClassificationRequest) -> Result<Outcome> {
        match request {
            ClassificationRequest::Text(text) => self
                .backend
                .classify_text(text)
                .await
                .map(Outcome::Single),
            ClassificationRequest::SingleFile(file) => self
                .backend
                .classify_file(file)
                .await
                .map(Outcome::Single),
            ClassificationRequest::MultiFile(files) => self
                .backend
                .classify_batch(files)
                .await
                .map(Outcome::Batch),
        }
    }
}
