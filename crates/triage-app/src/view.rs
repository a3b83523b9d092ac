//! View synchronization interface.
//!
//! Rendering owns no invariants: a sink consumes immutable values produced
//! by the engine and draws them however it likes. The engine notifies the
//! sink after every state change so the result panel, batch table, and
//! history/stats panel always reflect the same state.

use triage_core::{ClassificationResult, HistoryEntry, RenderRow, Stats, StatusLine};

use crate::builder::BuildWarning;

/// Receiver for view updates.
pub trait ViewSink {
    /// A single classification settled; show it in the result panel.
    fn result_shown(&mut self, result: &ClassificationResult);

    /// A batch settled; show the table rows in response order.
    fn batch_shown(&mut self, rows: &[RenderRow]);

    /// History or stats changed; re-render the panel.
    fn history_shown(&mut self, entries: &[HistoryEntry], stats: &Stats);

    /// Transient status line for the active view.
    fn status_shown(&mut self, status: &StatusLine);

    /// Non-fatal warning (e.g. a truncated file selection).
    fn warning_shown(&mut self, warning: &BuildWarning);
}
